// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::CoreError;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while loading a tree description and building it.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The description file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML document is malformed or does not match the schema.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON document is malformed or does not match the schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither YAML nor JSON.
    #[error("unsupported configuration format: '{0}'")]
    UnsupportedFormat(String),

    /// Structural problems found before building.
    #[error("tree configuration is invalid:\n{}", join_lines(.0))]
    Invalid(Vec<ValidationError>),

    /// Building the tree failed in the core.
    #[error("building the tree failed: {0}")]
    Core(#[from] CoreError),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Problems detected in a tree description before anything is built
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two components resolve to the same path
    DuplicateComponentPath {
        /// The path declared twice
        path: String,
    },
    /// A component or link declares an empty name
    EmptyName {
        /// Parent path of the offending entry
        parent: String,
    },
    /// A component names a type with no registered builder
    UnknownComponentType {
        /// Path of the component being declared
        path: String,
        /// The unregistered type name
        type_name: String,
    },
    /// A parent, link owner or link target path is not declared before use
    UndeclaredPath {
        /// The unresolved path
        path: String,
        /// What referenced it
        referenced_by: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateComponentPath { path } => {
                write!(f, "Component path '{}' is declared more than once", path)
            }
            ValidationError::EmptyName { parent } => {
                write!(f, "Entry under '{}' has an empty name", parent)
            }
            ValidationError::UnknownComponentType { path, type_name } => {
                write!(
                    f,
                    "Component '{}' uses type '{}' which has no registered builder",
                    path, type_name
                )
            }
            ValidationError::UndeclaredPath {
                path,
                referenced_by,
            } => {
                write!(
                    f,
                    "Path '{}' used by {} is not declared before it",
                    path, referenced_by
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
