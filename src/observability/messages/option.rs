// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for option events.
//!
//! This module contains message types for logging events related to:
//! * Committed option values
//! * Options bound to external storage slots
//! * Triggers failing after a commit

use crate::errors::CoreError;
use crate::observability::messages::StructuredLog;
use crate::value::{Value, ValueKind};
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An option committed a new value.
///
/// # Log Level
/// `debug!` - Routine state change
///
/// # Example
/// ```
/// use cfcore::observability::messages::option::OptionChanged;
/// use cfcore::value::Value;
///
/// let value = Value::Int(-156);
/// let msg = OptionChanged {
///     option: "OptInt",
///     value: &value,
/// };
///
/// assert_eq!(msg.to_string(), "Option 'OptInt' set to -156");
/// ```
pub struct OptionChanged<'a> {
    pub option: &'a str,
    pub value: &'a Value,
}

impl Display for OptionChanged<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Option '{}' set to {}", self.option, self.value)
    }
}

impl StructuredLog for OptionChanged<'_> {
    fn log(&self) {
        tracing::debug!(
            option = self.option,
            kind = %self.value.kind(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "option_changed",
            span_name = name,
            option = self.option,
            kind = %self.value.kind(),
        )
    }
}

/// An option was bound to an external storage slot.
///
/// # Log Level
/// `debug!` - Routine wiring
pub struct OptionLinked<'a> {
    pub option: &'a str,
    pub kind: ValueKind,
}

impl Display for OptionLinked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Option '{}' linked to external {} slot",
            self.option, self.kind
        )
    }
}

impl StructuredLog for OptionLinked<'_> {
    fn log(&self) {
        tracing::debug!(option = self.option, kind = %self.kind, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "option_linked",
            span_name = name,
            option = self.option,
            kind = %self.kind,
        )
    }
}

/// A trigger failed after the option committed its new value.
///
/// The value stays committed; remaining triggers are skipped.
///
/// # Log Level
/// `warn!` - Partial update visible to the caller
///
/// # Example
/// ```
/// use cfcore::errors::CoreError;
/// use cfcore::observability::messages::option::TriggerFailed;
///
/// let error = CoreError::Other(anyhow::anyhow!("mesh not loaded"));
/// let msg = TriggerFailed {
///     option: "OptInt",
///     trigger_index: 1,
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct TriggerFailed<'a> {
    pub option: &'a str,
    pub trigger_index: usize,
    pub error: &'a CoreError,
}

impl Display for TriggerFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Trigger #{} of option '{}' failed, value kept: {}",
            self.trigger_index, self.option, self.error
        )
    }
}

impl StructuredLog for TriggerFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            option = self.option,
            trigger_index = self.trigger_index,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "trigger_failed",
            span_name = name,
            option = self.option,
            trigger_index = self.trigger_index,
        )
    }
}
