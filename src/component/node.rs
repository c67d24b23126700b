// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::builtin;
use super::ComponentId;
use crate::options::OptionList;
use crate::signal::SignalList;
use indexmap::IndexMap;

/// One node of a [`ComponentTree`](super::ComponentTree).
///
/// A component owns its options and signals. Children and links are stored
/// as ids into the tree arena: the tree owns every node, a component only
/// names its children and its link targets.
#[derive(Debug, Clone)]
pub struct Component {
    name: String,
    type_name: String,
    parent: Option<ComponentId>,
    children: IndexMap<String, ComponentId>,
    links: IndexMap<String, ComponentId>,
    options: OptionList,
    signals: SignalList,
}

impl Component {
    /// A detached component carrying the built-in signals.
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            parent: None,
            children: IndexMap::new(),
            links: IndexMap::new(),
            options: OptionList::new(name),
            signals: builtin::signals(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    pub fn child(&self, name: &str) -> Option<ComponentId> {
        self.children.get(name).copied()
    }

    /// Children in creation order.
    pub fn children(&self) -> impl Iterator<Item = (&str, ComponentId)> {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Link names and their (possibly stale) targets.
    pub fn links(&self) -> impl Iterator<Item = (&str, ComponentId)> {
        self.links.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn options(&self) -> &OptionList {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut OptionList {
        &mut self.options
    }

    pub fn signals(&self) -> &SignalList {
        &self.signals
    }

    pub fn signals_mut(&mut self) -> &mut SignalList {
        &mut self.signals
    }

    pub(crate) fn attach(&mut self, name: &str, parent: Option<ComponentId>, path: &str) {
        self.name = name.to_string();
        self.parent = parent;
        self.options.set_owner(path);
        self.signals.set_owner(path);
    }

    pub(crate) fn set_type_name(&mut self, type_name: &str) {
        self.type_name = type_name.to_string();
    }

    pub(crate) fn insert_child(&mut self, name: &str, id: ComponentId) {
        self.children.insert(name.to_string(), id);
    }

    pub(crate) fn remove_child_entry(&mut self, name: &str) -> Option<ComponentId> {
        self.children.shift_remove(name)
    }

    pub(crate) fn link_target(&self, name: &str) -> Option<ComponentId> {
        self.links.get(name).copied()
    }

    pub(crate) fn set_link(&mut self, name: &str, target: ComponentId) {
        self.links.insert(name.to_string(), target);
    }

    pub(crate) fn remove_link(&mut self, name: &str) -> Option<ComponentId> {
        self.links.shift_remove(name)
    }
}
