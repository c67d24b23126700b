// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic output of the core goes through message types defined in
//! [`messages`]. Each message is a plain struct with a `Display`
//! implementation and a [`messages::StructuredLog`] implementation, so the
//! same event renders identically as a log line and carries its fields as
//! structured `tracing` data.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::component` - tree mutation, builders and links
//! * `messages::option` - option updates and trigger failures
//! * `messages::signal` - signal dispatch and wire decoding
//!
//! # Usage
//!
//! ```rust
//! use cfcore::observability::messages::component::ComponentCreated;
//! use cfcore::observability::messages::StructuredLog;
//!
//! ComponentCreated {
//!     path: "cpath:/Tools/mesh",
//!     type_name: "Group",
//! }
//! .log();
//! ```

pub mod messages;
