// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::registry::{BuilderRegistry, GROUP_TYPE};
use super::Component;
use crate::errors::{CoreError, CoreResult};
use crate::observability::messages::component::{
    ComponentCreated, ComponentRemoved, LinkBound, LinkInvalidated,
};
use crate::observability::messages::StructuredLog;
use crate::value::{Uri, Value, CPATH_SCHEME};
use slotmap::{new_key_type, SlotMap};
use std::sync::Arc;

new_key_type! {
    /// Handle of a component inside one tree.
    ///
    /// Ids are generational: once a component is removed its id never
    /// resolves again, even after new components reuse the slot.
    pub struct ComponentId;
}

/// Arena-owned tree of components.
///
/// The tree owns every component. Parent, child and link references are
/// [`ComponentId`]s, validated on every use; following a link whose target
/// was removed fails with `DanglingLink`.
pub struct ComponentTree {
    nodes: SlotMap<ComponentId, Component>,
    root: ComponentId,
    registry: Arc<BuilderRegistry>,
}

impl ComponentTree {
    /// A tree with a `Group` root, building children from the global registry.
    pub fn new(root_name: &str) -> Self {
        Self::with_registry(root_name, BuilderRegistry::global())
    }

    pub fn with_registry(root_name: &str, registry: Arc<BuilderRegistry>) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut root = Component::new(root_name, GROUP_TYPE);
        root.attach(root_name, None, &Uri::cpath("/").to_string());
        let root = nodes.insert(root);
        Self {
            nodes,
            root,
            registry,
        }
    }

    pub fn root(&self) -> ComponentId {
        self.root
    }

    pub fn registry(&self) -> &Arc<BuilderRegistry> {
        &self.registry
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.nodes.get_mut(id)
    }

    /// Like [`get`](Self::get) but failing with `NotFound` for removed ids.
    pub fn component(&self, id: ComponentId) -> CoreResult<&Component> {
        self.nodes.get(id).ok_or_else(|| removed(id))
    }

    pub fn component_mut(&mut self, id: ComponentId) -> CoreResult<&mut Component> {
        self.nodes.get_mut(id).ok_or_else(|| removed(id))
    }

    /// Build a `type_name` component through the registry and attach it
    /// under `parent` as `name`.
    pub fn create_child(
        &mut self,
        parent: ComponentId,
        type_name: &str,
        name: &str,
    ) -> CoreResult<ComponentId> {
        let factory = self.registry.factory(type_name)?;
        self.check_new_child(parent, name)?;
        let mut component = factory(name)?;
        component.set_type_name(type_name);
        self.attach(parent, name, component)
    }

    /// Attach a directly constructed component under `parent`.
    pub fn add_child(&mut self, parent: ComponentId, component: Component) -> CoreResult<ComponentId> {
        let name = component.name().to_string();
        self.check_new_child(parent, &name)?;
        self.attach(parent, &name, component)
    }

    /// Destroy the child `name` of `parent` and its whole subtree.
    pub fn remove_child(&mut self, parent: ComponentId, name: &str) -> CoreResult<()> {
        let child = self
            .component(parent)?
            .child(name)
            .ok_or_else(|| CoreError::NotFound {
                path: self.child_path(parent, name),
            })?;
        let path = self.path_string(child);

        let mut doomed = Vec::new();
        self.collect_subtree(child, &mut doomed);
        for id in &doomed {
            self.nodes.remove(*id);
        }
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.remove_child_entry(name);
        }

        ComponentRemoved {
            path: &path,
            subtree_size: doomed.len(),
        }
        .log();
        Ok(())
    }

    /// Ids of `id` and all its descendants, parents before children.
    pub fn subtree(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut ids = Vec::new();
        if self.contains(id) {
            self.collect_subtree(id, &mut ids);
        }
        ids
    }

    /// Path of a live component as a `cpath` uri; the root is `cpath:/`.
    pub fn path_of(&self, id: ComponentId) -> CoreResult<Uri> {
        let mut segments = Vec::new();
        let mut current = self.component(id)?;
        while let Some(parent) = current.parent() {
            segments.push(current.name());
            current = self.component(parent)?;
        }
        segments.reverse();
        Ok(Uri::cpath(&format!("/{}", segments.join("/"))))
    }

    /// Resolve `path` starting at `from`.
    ///
    /// Absolute paths (`cpath:/a/b` or `/a/b`) start at the root, anything
    /// else at `from`. Segments are matched left to right against child
    /// names; `..` steps to the parent and `.` stays put.
    pub fn resolve(&self, from: ComponentId, path: &str) -> CoreResult<ComponentId> {
        let not_found = || CoreError::NotFound {
            path: path.to_string(),
        };
        let relative = match path.trim().split_once(':') {
            Some((scheme, rest)) if scheme == CPATH_SCHEME => rest,
            Some(_) => return Err(not_found()),
            None => path.trim(),
        };

        let mut current = if relative.starts_with('/') {
            self.root
        } else {
            self.component(from)?;
            from
        };
        for segment in relative.split('/') {
            current = match segment {
                "" | "." => current,
                ".." => self.component(current)?.parent().ok_or_else(not_found)?,
                name => self.component(current)?.child(name).ok_or_else(not_found)?,
            };
        }
        Ok(current)
    }

    /// Resolve a `cpath` uri from the root.
    pub fn find(&self, path: &Uri) -> CoreResult<ComponentId> {
        if !path.is_cpath() && path.scheme().is_some() {
            return Err(CoreError::NotFound {
                path: path.to_string(),
            });
        }
        self.resolve(self.root, path.path())
    }

    /// Bind (or re-bind) the named link of `owner` to `target`.
    pub fn link(&mut self, owner: ComponentId, name: &str, target: ComponentId) -> CoreResult<()> {
        let target_path = self.path_string(target);
        self.component(target)?;
        let owner_path = self.path_string(owner);
        self.component_mut(owner)?.set_link(name, target);
        LinkBound {
            owner: &owner_path,
            link: name,
            target: &target_path,
        }
        .log();
        Ok(())
    }

    /// The live target of the named link of `owner`.
    pub fn follow_link(&self, owner: ComponentId, name: &str) -> CoreResult<ComponentId> {
        let target = self
            .component(owner)?
            .link_target(name)
            .ok_or_else(|| CoreError::NotFound {
                path: format!("{}#{}", self.path_string(owner), name),
            })?;
        if self.contains(target) {
            return Ok(target);
        }
        let owner_path = self.path_string(owner);
        LinkInvalidated {
            owner: &owner_path,
            link: name,
        }
        .log();
        Err(CoreError::DanglingLink {
            link: format!("{}#{}", owner_path, name),
        })
    }

    pub fn unlink(&mut self, owner: ComponentId, name: &str) -> CoreResult<()> {
        let path = self.path_string(owner);
        self.component_mut(owner)?
            .remove_link(name)
            .map(|_| ())
            .ok_or(CoreError::NotFound {
                path: format!("{}#{}", path, name),
            })
    }

    /// Set one option of a component.
    pub fn set_option(
        &mut self,
        id: ComponentId,
        option: &str,
        value: impl Into<Value>,
    ) -> CoreResult<()> {
        self.component_mut(id)?.options_mut().set(option, value)
    }

    /// Decode `text` through the option's kind and set it.
    pub fn set_option_text(&mut self, id: ComponentId, option: &str, text: &str) -> CoreResult<()> {
        self.component_mut(id)?
            .options_mut()
            .option_mut(option)?
            .set_text(text)
    }

    /// Indented outline of the subtree at `id`, one component per line.
    pub fn render(&self, id: ComponentId) -> String {
        let mut out = String::new();
        self.render_into(id, 0, &mut out);
        out
    }

    pub(crate) fn path_string(&self, id: ComponentId) -> String {
        self.path_of(id)
            .map(|uri| uri.to_string())
            .unwrap_or_else(|_| "<removed>".to_string())
    }

    fn child_path(&self, parent: ComponentId, name: &str) -> String {
        let parent = self.path_string(parent);
        if parent.ends_with('/') {
            format!("{}{}", parent, name)
        } else {
            format!("{}/{}", parent, name)
        }
    }

    fn check_new_child(&self, parent: ComponentId, name: &str) -> CoreResult<()> {
        validate_name(name)?;
        if self.component(parent)?.child(name).is_some() {
            return Err(CoreError::DuplicateName {
                owner: self.path_string(parent),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn attach(&mut self, parent: ComponentId, name: &str, mut component: Component) -> CoreResult<ComponentId> {
        let path = self.child_path(parent, name);
        component.attach(name, Some(parent), &path);
        let type_name = component.type_name().to_string();
        let id = self.nodes.insert(component);
        self.component_mut(parent)?.insert_child(name, id);
        ComponentCreated {
            path: &path,
            type_name: &type_name,
        }
        .log();
        Ok(id)
    }

    fn collect_subtree(&self, id: ComponentId, out: &mut Vec<ComponentId>) {
        out.push(id);
        if let Some(component) = self.nodes.get(id) {
            for (_, child) in component.children() {
                self.collect_subtree(child, out);
            }
        }
    }

    fn render_into(&self, id: ComponentId, depth: usize, out: &mut String) {
        let Some(component) = self.nodes.get(id) else {
            return;
        };
        let name = if component.parent().is_none() {
            "/"
        } else {
            component.name()
        };
        out.push_str(&format!(
            "{}{} ({})\n",
            "  ".repeat(depth),
            name,
            component.type_name()
        ));
        for (_, child) in component.children() {
            self.render_into(child, depth + 1, out);
        }
    }
}

fn validate_name(name: &str) -> CoreResult<()> {
    let reason = if name.is_empty() {
        "component names may not be empty"
    } else if name.contains('/') {
        "component names may not contain '/'"
    } else if name == "." || name == ".." {
        "'.' and '..' are reserved path segments"
    } else if name.chars().any(char::is_whitespace) {
        "component names may not contain whitespace"
    } else {
        return Ok(());
    };
    Err(CoreError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

fn removed(id: ComponentId) -> CoreError {
    CoreError::NotFound {
        path: format!("component {:?}", id),
    }
}
