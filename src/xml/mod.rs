// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! XML wire encoding of signal frames.
//!
//! ```text
//! <cfxml version="1.0">
//!   <signal target="configure" receiver="cpath:/solver">
//!     <valuemap>
//!       <value key="OptInt"><integer>-156</integer></value>
//!       <array key="VecInt" type="integer" size="3"><e>2</e><e>8</e><e>9</e></array>
//!       <valuemap key="OptList"><value key="mi"><integer>2</integer></value></valuemap>
//!     </valuemap>
//!   </signal>
//! </cfxml>
//! ```
//!
//! Entries may carry `desc`, `pretty` and `mode` attributes and a
//! `<restricted>` child listing allowed values. Elements the decoder does not
//! know are skipped. Element text is trimmed before decoding.

mod decode;
mod encode;
mod integration_tests;

pub use decode::{decode_frame, decode_signal};
pub use encode::{encode_frame, encode_signal};

use crate::signal::SignalFrame;

/// A decoded signal invocation: which signal, on which component, with
/// which arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalDocument {
    /// Signal name.
    pub target: String,
    /// Component path of the receiver.
    pub receiver: String,
    pub frame: SignalFrame,
}

mod tags {
    pub const DOCUMENT: &str = "cfxml";
    pub const SIGNAL: &str = "signal";
    pub const VALUEMAP: &str = "valuemap";
    pub const VALUE: &str = "value";
    pub const ARRAY: &str = "array";
    pub const ELEMENT: &str = "e";
    pub const RESTRICTED: &str = "restricted";

    pub const KEY: &str = "key";
    pub const TYPE: &str = "type";
    pub const SIZE: &str = "size";
    pub const DESC: &str = "desc";
    pub const PRETTY: &str = "pretty";
    pub const MODE: &str = "mode";
    pub const TARGET: &str = "target";
    pub const RECEIVER: &str = "receiver";
}
