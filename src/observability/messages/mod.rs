// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `component` - component creation and removal, builder registration, links
//! * `option` - option value changes, links to external slots, trigger failures
//! * `signal` - signal dispatch lifecycle and skipped wire elements
//!
//! # Usage Pattern
//!
//! ```rust
//! use cfcore::observability::messages::signal::SignalDispatched;
//!
//! let msg = SignalDispatched {
//!     component: "cpath:/",
//!     signal: "list_tree",
//!     argument_count: 0,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

use tracing::Span;

pub mod component;
pub mod option;
pub mod signal;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a single event.
    fn log(&self);

    /// Open a span carrying the message fields.
    fn span(&self, name: &str) -> Span;
}
