// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod component;  // tree, registry, dispatch
pub mod config;     // declarative tree descriptions
pub mod errors;     // error handling
pub mod observability;
pub mod options;    // typed options and option lists
pub mod signal;     // signal frames, signal lists, handler context
pub mod value;      // value model and text codec
pub mod xml;        // wire documents
