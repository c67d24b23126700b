// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::ComponentTree;
use crate::errors::CoreResult;
use crate::signal::SignalFrame;
use std::sync::{Arc, Mutex, PoisonError};

/// A tree shared between callers.
///
/// Every operation holds the lock from path resolution until the handler
/// returns, so handlers that reshape the tree never race another dispatch.
#[derive(Clone)]
pub struct SharedTree {
    inner: Arc<Mutex<ComponentTree>>,
}

impl SharedTree {
    pub fn new(tree: ComponentTree) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tree)),
        }
    }

    /// Run `f` with exclusive access to the tree.
    pub fn with_tree<R>(&self, f: impl FnOnce(&mut ComponentTree) -> R) -> R {
        let mut tree = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut tree)
    }

    pub fn dispatch(
        &self,
        path: &str,
        signal: &str,
        frame: &SignalFrame,
    ) -> CoreResult<Option<SignalFrame>> {
        self.with_tree(|tree| tree.dispatch(path, signal, frame))
    }

    pub fn dispatch_xml(&self, text: &str) -> CoreResult<String> {
        self.with_tree(|tree| tree.dispatch_xml(text))
    }
}
