// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The component tree: ownership, addressing, links and signal dispatch.
//!
//! Components live in a [`ComponentTree`] arena and are addressed either by
//! [`ComponentId`] or by `cpath` paths such as `cpath:/Tools/mesh`. Typed
//! children are built through a [`BuilderRegistry`].
//!
//! # Examples
//!
//! ```rust
//! use cfcore::component::{BuilderRegistry, ComponentTree};
//! use cfcore::signal::SignalFrame;
//! use std::sync::Arc;
//!
//! let mut tree = ComponentTree::with_registry("Root", Arc::new(BuilderRegistry::new()));
//! let root = tree.root();
//! let tools = tree.create_child(root, "Group", "Tools").unwrap();
//! assert_eq!(tree.path_of(tools).unwrap().to_string(), "cpath:/Tools");
//!
//! let outline = tree.dispatch("cpath:/", "list_tree", &SignalFrame::new()).unwrap();
//! assert!(outline.is_some());
//! ```

pub mod builtin;
mod dispatch;
mod node;
mod registry;
mod shared;
mod tree;

pub use node::Component;
pub use registry::{BuilderRegistry, ComponentFactory, GROUP_TYPE};
pub use shared::SharedTree;
pub use tree::{ComponentId, ComponentTree};
