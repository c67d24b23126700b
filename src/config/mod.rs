// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Declarative tree descriptions.
//!
//! A [`TreeConfig`] is read from YAML or JSON, checked with
//! [`validate_tree_config`], then turned into a live
//! [`ComponentTree`](crate::component::ComponentTree) with
//! [`TreeConfig::build`].

mod build;
mod loader;
mod validation;

#[cfg(test)]
mod integration_tests;

pub use loader::{
    load_and_validate_tree_config, load_tree_config, ComponentConfig, LinkConfig,
    OptionDeclaration, TreeConfig,
};
pub use validation::validate_tree_config;
