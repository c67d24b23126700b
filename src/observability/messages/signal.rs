// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for signal dispatch and the wire codec.

use crate::errors::CoreError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A signal call is about to run its handler.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SignalDispatched<'a> {
    pub component: &'a str,
    pub signal: &'a str,
    pub argument_count: usize,
}

impl Display for SignalDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dispatching signal '{}' to {} with {} arguments",
            self.signal, self.component, self.argument_count
        )
    }
}

impl StructuredLog for SignalDispatched<'_> {
    fn log(&self) {
        tracing::info!(
            component = self.component,
            signal = self.signal,
            argument_count = self.argument_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "signal",
            span_name = name,
            component = self.component,
            signal = self.signal,
        )
    }
}

/// A signal handler returned successfully.
///
/// # Log Level
/// `debug!` - Routine completion
pub struct SignalCompleted<'a> {
    pub component: &'a str,
    pub signal: &'a str,
    pub replied: bool,
}

impl Display for SignalCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let reply = if self.replied { "with reply" } else { "without reply" };
        write!(
            f,
            "Signal '{}' on {} completed {}",
            self.signal, self.component, reply
        )
    }
}

impl StructuredLog for SignalCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            component = self.component,
            signal = self.signal,
            replied = self.replied,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "signal_completed",
            span_name = name,
            component = self.component,
            signal = self.signal,
        )
    }
}

/// A signal handler failed.
///
/// # Log Level
/// `error!` - The caller receives the failure
///
/// # Example
/// ```
/// use cfcore::errors::CoreError;
/// use cfcore::observability::messages::signal::SignalFailed;
///
/// let error = CoreError::MissingArgument { key: "file".to_string() };
/// let msg = SignalFailed {
///     component: "cpath:/Tools/reader",
///     signal: "read",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct SignalFailed<'a> {
    pub component: &'a str,
    pub signal: &'a str,
    pub error: &'a CoreError,
}

impl Display for SignalFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Signal '{}' on {} failed: {}",
            self.signal, self.component, self.error
        )
    }
}

impl StructuredLog for SignalFailed<'_> {
    fn log(&self) {
        tracing::error!(
            component = self.component,
            signal = self.signal,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "signal_failed",
            span_name = name,
            component = self.component,
            signal = self.signal,
            error = %self.error,
        )
    }
}

/// An unrecognized element was skipped while decoding a wire document.
///
/// # Log Level
/// `debug!` - Tolerated extension point
pub struct ElementSkipped<'a> {
    pub element: &'a str,
    pub parent: &'a str,
}

impl Display for ElementSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Skipping unknown element <{}> inside <{}>",
            self.element, self.parent
        )
    }
}

impl StructuredLog for ElementSkipped<'_> {
    fn log(&self) {
        tracing::debug!(element = self.element, parent = self.parent, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "element_skipped",
            span_name = name,
            element = self.element,
        )
    }
}
