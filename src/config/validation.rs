// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation of tree descriptions.
//!
//! Validation walks the description once, in declaration order, and collects
//! every problem instead of stopping at the first:
//!
//! 1. every component and link has a non-empty name
//! 2. every parent path is the root or a component declared earlier
//! 3. no two components share a path
//! 4. every component type has a registered builder
//! 5. link owners and targets are declared components
//!
//! Option names and values are not checked here; they depend on what the
//! builders declare and are reported by the tree while building.

use super::loader::TreeConfig;
use crate::component::BuilderRegistry;
use crate::errors::ValidationError;
use std::collections::HashSet;

/// Check `config` against `registry`, returning every problem found.
pub fn validate_tree_config(
    config: &TreeConfig,
    registry: &BuilderRegistry,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut declared: HashSet<String> = HashSet::new();
    declared.insert(normalize(""));

    for component in &config.components {
        let parent = normalize(&component.parent);
        if component.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName {
                parent: parent.clone(),
            });
            continue;
        }
        let path = join(&parent, &component.name);

        if !declared.contains(&parent) {
            errors.push(ValidationError::UndeclaredPath {
                path: parent.clone(),
                referenced_by: format!("component '{}'", path),
            });
        }
        if !registry.contains(&component.type_name) {
            errors.push(ValidationError::UnknownComponentType {
                path: path.clone(),
                type_name: component.type_name.clone(),
            });
        }
        if !declared.insert(path.clone()) {
            errors.push(ValidationError::DuplicateComponentPath { path });
        }
    }

    for link in &config.links {
        let owner = normalize(&link.owner);
        if link.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { parent: owner });
            continue;
        }
        for endpoint in [&link.owner, &link.target] {
            let endpoint = normalize(endpoint);
            if !declared.contains(&endpoint) {
                errors.push(ValidationError::UndeclaredPath {
                    path: endpoint,
                    referenced_by: format!("link '{}' of {}", link.name, owner),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Canonical `cpath:/a/b` form of an absolute path, `.` and `..` collapsed.
///
/// A path climbing above the root has no canonical form and is returned
/// trimmed, so it never matches a declared path.
fn normalize(path: &str) -> String {
    canonical(path).unwrap_or_else(|| path.trim().to_string())
}

fn canonical(path: &str) -> Option<String> {
    let path = path.trim();
    let path = path.strip_prefix("cpath:").unwrap_or(path);
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            name => segments.push(name),
        }
    }
    Some(format!("cpath:/{}", segments.join("/")))
}

fn join(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{}{}", parent, name)
    } else {
        format!("{}/{}", parent, name)
    }
}
