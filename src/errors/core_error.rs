// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error type for the configuration and remote-invocation core.
//!
//! Every failure the core can detect is a variant of [`CoreError`]. Errors are
//! returned at the point of detection and propagated unchanged; the only
//! wrapping the core performs is [`CoreError::Handler`], which tags a failure
//! raised inside a signal handler while keeping the original cause as its
//! `source`.

use crate::value::ValueKind;
use thiserror::Error;

/// Errors raised by values, options, components, signals and the wire codec.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Text could not be decoded as the requested kind.
    #[error("cannot decode {text:?} as {expected}{}: {reason}", location_suffix(.location))]
    Format {
        expected: String,
        text: String,
        reason: String,
        /// Element index or key path of the offending entry, empty at top level.
        location: String,
    },

    /// A value of one kind was supplied or requested where another is fixed.
    #[error("type mismatch for '{name}': expected {expected}, found {found}")]
    TypeMismatch {
        name: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// The value is not a member of the option's restricted list.
    #[error("value {value} is not allowed for option '{name}'")]
    RestrictionViolation { name: String, value: String },

    /// An option or component name is empty, malformed or already used.
    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// A child component or signal with this name already exists.
    #[error("'{name}' already exists in {owner}")]
    DuplicateName { owner: String, name: String },

    /// A builder was registered twice for the same type name.
    #[error("builder for type '{type_name}' is already registered")]
    DuplicateType { type_name: String },

    /// No builder is registered for the type name.
    #[error("no builder registered for type '{type_name}'")]
    UnknownType { type_name: String },

    /// The component has no signal with this name.
    #[error("component {component} has no signal '{signal}'")]
    UnknownSignal { component: String, signal: String },

    /// A configuration entry addressed an option that does not exist.
    #[error("component {component} has no option '{option}'")]
    UnknownOption { component: String, option: String },

    /// A path segment or named entry did not resolve.
    #[error("not found: {path}")]
    NotFound { path: String },

    /// A signal frame was read for a key it does not carry.
    #[error("missing argument '{key}'")]
    MissingArgument { key: String },

    /// A weak reference points into a subtree that has been destroyed.
    #[error("link '{link}' no longer points to a live component")]
    DanglingLink { link: String },

    /// A signal handler failed; `source` is the original cause.
    #[error("signal '{signal}' failed: {source}")]
    Handler {
        signal: String,
        #[source]
        source: Box<CoreError>,
    },

    /// Domain failure raised by a handler or trigger.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

fn location_suffix(location: &str) -> String {
    if location.is_empty() {
        String::new()
    } else {
        format!(" at {}", location)
    }
}

impl CoreError {
    pub(crate) fn format(expected: impl Into<String>, text: &str, reason: impl Into<String>) -> Self {
        CoreError::Format {
            expected: expected.into(),
            text: text.to_string(),
            reason: reason.into(),
            location: String::new(),
        }
    }

    /// Prefix the location of a `Format` error with an outer segment.
    ///
    /// Index segments (`[2]`) attach without a separator, key segments are
    /// dot-joined. Other variants pass through untouched.
    pub(crate) fn located(self, segment: &str) -> Self {
        match self {
            CoreError::Format {
                expected,
                text,
                reason,
                location,
            } => {
                let location = if location.is_empty() {
                    segment.to_string()
                } else if location.starts_with('[') {
                    format!("{}{}", segment, location)
                } else {
                    format!("{}.{}", segment, location)
                };
                CoreError::Format {
                    expected,
                    text,
                    reason,
                    location,
                }
            }
            other => other,
        }
    }

    /// The original cause, unwrapping any `Handler` layers.
    pub fn root(&self) -> &CoreError {
        match self {
            CoreError::Handler { source, .. } => source.root(),
            other => other,
        }
    }
}
