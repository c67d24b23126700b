// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for component tree events.
//!
//! This module contains message types for logging events related to:
//! * Builder registration
//! * Component creation and removal
//! * Links created, followed after invalidation, and removed

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A component builder was registered.
///
/// # Log Level
/// `debug!` - Startup wiring
pub struct BuilderRegistered<'a> {
    pub type_name: &'a str,
}

impl Display for BuilderRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Registered builder for component type '{}'", self.type_name)
    }
}

impl StructuredLog for BuilderRegistered<'_> {
    fn log(&self) {
        tracing::debug!(type_name = self.type_name, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "builder_registered",
            span_name = name,
            type_name = self.type_name,
        )
    }
}

/// A component was created and attached to the tree.
///
/// # Log Level
/// `info!` - Tree mutation
///
/// # Example
/// ```
/// use cfcore::observability::messages::component::ComponentCreated;
///
/// let msg = ComponentCreated {
///     path: "cpath:/Tools/mesh",
///     type_name: "Group",
/// };
///
/// assert_eq!(msg.to_string(), "Created component cpath:/Tools/mesh of type 'Group'");
/// ```
pub struct ComponentCreated<'a> {
    pub path: &'a str,
    pub type_name: &'a str,
}

impl Display for ComponentCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Created component {} of type '{}'",
            self.path, self.type_name
        )
    }
}

impl StructuredLog for ComponentCreated<'_> {
    fn log(&self) {
        tracing::info!(path = self.path, type_name = self.type_name, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "component_created",
            span_name = name,
            path = self.path,
            type_name = self.type_name,
        )
    }
}

/// A component and its whole subtree were removed.
///
/// # Log Level
/// `info!` - Tree mutation
pub struct ComponentRemoved<'a> {
    pub path: &'a str,
    pub subtree_size: usize,
}

impl Display for ComponentRemoved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Removed component {} ({} components destroyed)",
            self.path, self.subtree_size
        )
    }
}

impl StructuredLog for ComponentRemoved<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            subtree_size = self.subtree_size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "component_removed",
            span_name = name,
            path = self.path,
            subtree_size = self.subtree_size,
        )
    }
}

/// A named link was bound to a target component.
///
/// # Log Level
/// `debug!` - Wiring
pub struct LinkBound<'a> {
    pub owner: &'a str,
    pub link: &'a str,
    pub target: &'a str,
}

impl Display for LinkBound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Link '{}' of {} now points to {}",
            self.link, self.owner, self.target
        )
    }
}

impl StructuredLog for LinkBound<'_> {
    fn log(&self) {
        tracing::debug!(
            owner = self.owner,
            link = self.link,
            target = self.target,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "link_bound",
            span_name = name,
            owner = self.owner,
            link = self.link,
        )
    }
}

/// A link was followed but its target no longer exists.
///
/// # Log Level
/// `warn!` - Stale reference detected
pub struct LinkInvalidated<'a> {
    pub owner: &'a str,
    pub link: &'a str,
}

impl Display for LinkInvalidated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Link '{}' of {} points into a removed subtree",
            self.link, self.owner
        )
    }
}

impl StructuredLog for LinkInvalidated<'_> {
    fn log(&self) {
        tracing::warn!(owner = self.owner, link = self.link, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "link_invalidated",
            span_name = name,
            owner = self.owner,
            link = self.link,
        )
    }
}
