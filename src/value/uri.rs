// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;

/// Scheme used for component paths (`cpath:/Tools/mesh`).
pub const CPATH_SCHEME: &str = "cpath";

/// A `scheme:path` reference, or a bare path when no scheme is given.
///
/// Uris are built by parsing, or inside the crate from component names that
/// already passed name validation, so the textual form always parses back to
/// the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Uri {
    scheme: Option<String>,
    path: String,
}

impl Uri {
    /// Parse `text`, failing only on embedded whitespace.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let text = text.trim();
        if text.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(CoreError::format(
                "path",
                text,
                "a URI may not contain whitespace",
            ));
        }
        match text.split_once(':') {
            Some((scheme, path)) if is_scheme(scheme) => Ok(Self {
                scheme: Some(scheme.to_string()),
                path: path.to_string(),
            }),
            _ => Ok(Self {
                scheme: None,
                path: text.to_string(),
            }),
        }
    }

    /// A component path in the `cpath` scheme.
    ///
    /// `path` is not checked; callers pass segments made of validated
    /// component names. Outside the crate use [`Uri::parse`].
    pub(crate) fn cpath(path: &str) -> Self {
        Self {
            scheme: Some(CPATH_SCHEME.to_string()),
            path: path.to_string(),
        }
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_cpath(&self) -> bool {
        self.scheme() == Some(CPATH_SCHEME)
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scheme {
            Some(scheme) => write!(f, "{}:{}", scheme, self.path),
            None => f.write_str(&self.path),
        }
    }
}

impl FromStr for Uri {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s)
    }
}
