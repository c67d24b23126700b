// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed configuration options and the ordered lists that own them.
//!
//! # Examples
//!
//! ```rust
//! use cfcore::options::OptionList;
//!
//! let mut options = OptionList::new("cpath:/solver");
//! options.add("OptInt", "int option", -5i64).unwrap().mark_basic();
//! options.option_mut("OptInt").unwrap().set_text("-156").unwrap();
//! assert_eq!(options.option("OptInt").unwrap().get_text(), "-156");
//! ```

mod option;
mod option_list;

pub use option::{ConfigOption, Tier, Trigger};
pub use option_list::OptionList;
