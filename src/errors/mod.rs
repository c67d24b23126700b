// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod core_error;

pub use config::{ConfigError, ValidationError};
pub use core_error::{CoreError, CoreResult};
