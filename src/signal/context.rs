// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::component::{Component, ComponentId, ComponentTree};
use crate::errors::CoreResult;
use crate::options::OptionList;

/// What a handler sees while it runs: the receiving component and mutable
/// access to the whole tree, so handlers may create or remove components.
pub struct SignalContext<'a> {
    tree: &'a mut ComponentTree,
    receiver: ComponentId,
    signal: &'a str,
}

impl<'a> SignalContext<'a> {
    pub(crate) fn new(tree: &'a mut ComponentTree, receiver: ComponentId, signal: &'a str) -> Self {
        Self {
            tree,
            receiver,
            signal,
        }
    }

    pub fn receiver(&self) -> ComponentId {
        self.receiver
    }

    /// Name of the signal being executed.
    pub fn signal(&self) -> &str {
        self.signal
    }

    pub fn tree(&self) -> &ComponentTree {
        &*self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut *self.tree
    }

    pub fn component(&self) -> CoreResult<&Component> {
        self.tree.component(self.receiver)
    }

    pub fn component_mut(&mut self) -> CoreResult<&mut Component> {
        self.tree.component_mut(self.receiver)
    }

    pub fn options(&self) -> CoreResult<&OptionList> {
        Ok(self.component()?.options())
    }

    pub fn options_mut(&mut self) -> CoreResult<&mut OptionList> {
        Ok(self.component_mut()?.options_mut())
    }

    /// Follow a named link of the receiver.
    pub fn linked(&self, link: &str) -> CoreResult<ComponentId> {
        self.tree.follow_link(self.receiver, link)
    }
}
