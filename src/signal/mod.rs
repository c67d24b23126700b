// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Remotely invocable operations and their argument frames.
//!
//! A [`Signal`] binds a name to a [`Handler`] and, optionally, a
//! [`SignatureBuilder`] declaring the arguments the handler reads. Handlers
//! receive a [`SignalContext`] for the receiving component and a
//! [`SignalFrame`] of arguments, and may answer with a reply frame.

mod context;
mod frame;
mod list;

pub use context::SignalContext;
pub use frame::{EntryMeta, FrameEntry, SignalFrame};
pub use list::{Handler, Signal, SignalList, SignatureBuilder};
