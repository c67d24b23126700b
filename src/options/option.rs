// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{CoreError, CoreResult};
use crate::observability::messages::option::{OptionChanged, OptionLinked, TriggerFailed};
use crate::observability::messages::StructuredLog;
use crate::value::{decode, encode, Value, ValueKind, ValueType};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Callback run after an option commits a new value.
pub type Trigger = Arc<dyn Fn(&Value) -> CoreResult<()> + Send + Sync>;

/// An external slot bound by [`ConfigOption::link`].
///
/// `accepts` tells whether the slot's Rust type can hold a value; an `i32`
/// slot on an `integer` option cannot hold every `i64`.
#[derive(Clone)]
struct Slot {
    accepts: fn(&Value) -> bool,
    write: Arc<dyn Fn(&Value) + Send + Sync>,
}

/// Visibility tier of an option in generated forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tier {
    Basic,
    #[default]
    Advanced,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Basic => "basic",
            Tier::Advanced => "advanced",
        }
    }

    pub fn parse(text: &str) -> Option<Tier> {
        match text.trim() {
            "basic" => Some(Tier::Basic),
            "advanced" => Some(Tier::Advanced),
            _ => None,
        }
    }
}

/// A named, typed, validated configuration value with change triggers.
///
/// The kind of an option is fixed by its default. [`set`](Self::set) checks
/// the kind and the restricted list, commits the new value, writes any linked
/// slots, then runs the triggers in registration order. A failing trigger
/// stops the remaining ones and its error is returned, but the new value stays
/// committed: callers needing all-or-nothing updates must validate first.
#[derive(Clone)]
pub struct ConfigOption {
    name: String,
    description: String,
    pretty_name: String,
    value: Value,
    default: Value,
    restricted: Vec<Value>,
    tier: Tier,
    triggers: Vec<Trigger>,
    slots: Vec<Slot>,
}

impl ConfigOption {
    pub fn new(name: &str, description: &str, default: impl Into<Value>) -> CoreResult<Self> {
        if name.trim().is_empty() {
            return Err(CoreError::InvalidName {
                name: name.to_string(),
                reason: "option names may not be empty".to_string(),
            });
        }
        let default = default.into();
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            pretty_name: String::new(),
            value: default.clone(),
            default,
            restricted: Vec::new(),
            tier: Tier::default(),
            triggers: Vec::new(),
            slots: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Display name, falling back to the option name.
    pub fn pretty_name(&self) -> &str {
        if self.pretty_name.is_empty() {
            &self.name
        } else {
            &self.pretty_name
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.default.kind()
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn restricted_values(&self) -> &[Value] {
        &self.restricted
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn get(&self) -> &Value {
        &self.value
    }

    /// Typed copy of the current value.
    pub fn value<T: ValueType>(&self) -> CoreResult<T> {
        self.value.extract(&self.name)
    }

    /// Text form of the current value.
    pub fn get_text(&self) -> String {
        encode(&self.value)
    }

    pub fn set_description(&mut self, description: &str) -> &mut Self {
        self.description = description.to_string();
        self
    }

    pub fn set_pretty_name(&mut self, pretty_name: &str) -> &mut Self {
        self.pretty_name = pretty_name.to_string();
        self
    }

    pub fn mark_basic(&mut self) -> &mut Self {
        self.tier = Tier::Basic;
        self
    }

    pub fn set_tier(&mut self, tier: Tier) -> &mut Self {
        self.tier = tier;
        self
    }

    /// Restrict the option to `values`. The default is always allowed.
    pub fn restrict_to(&mut self, values: Vec<Value>) -> CoreResult<&mut Self> {
        for value in &values {
            self.check_kind(value)?;
        }
        let mut restricted = values;
        if !restricted.contains(&self.default) {
            restricted.insert(0, self.default.clone());
        }
        if !restricted.contains(&self.value) {
            return Err(self.restriction_violation(&self.value));
        }
        self.restricted = restricted;
        Ok(self)
    }

    pub fn attach_trigger<F>(&mut self, trigger: F) -> &mut Self
    where
        F: Fn(&Value) -> CoreResult<()> + Send + Sync + 'static,
    {
        self.triggers.push(Arc::new(trigger));
        self
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Bind an external slot. The slot's current content becomes the option's
    /// default and current value; every later successful `set` writes it.
    pub fn link<T>(&mut self, slot: Arc<RwLock<T>>) -> CoreResult<&mut Self>
    where
        T: ValueType + Clone + Send + Sync + 'static,
    {
        if T::value_kind() != self.kind() {
            return Err(CoreError::TypeMismatch {
                name: self.name.clone(),
                expected: self.kind(),
                found: T::value_kind(),
            });
        }
        let initial = slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .into_value();
        if !self.is_allowed(&initial) {
            return Err(self.restriction_violation(&initial));
        }
        self.default = initial.clone();
        self.value = initial;
        self.slots.push(Slot {
            accepts: |value| T::from_value(value).is_some(),
            write: Arc::new(move |value: &Value| {
                if let Some(typed) = T::from_value(value) {
                    *slot.write().unwrap_or_else(PoisonError::into_inner) = typed;
                }
            }),
        });
        OptionLinked {
            option: &self.name,
            kind: self.kind(),
        }
        .log();
        Ok(self)
    }

    /// Replace the value, then notify slots and triggers.
    ///
    /// A value a linked slot cannot hold is rejected with `TypeMismatch`
    /// before anything is committed.
    pub fn set(&mut self, value: impl Into<Value>) -> CoreResult<()> {
        let value = value.into();
        self.check_kind(&value)?;
        if !self.is_allowed(&value) {
            return Err(self.restriction_violation(&value));
        }
        if !self.slots.iter().all(|slot| (slot.accepts)(&value)) {
            return Err(CoreError::TypeMismatch {
                name: format!("{} (linked slot)", self.name),
                expected: self.kind(),
                found: value.kind(),
            });
        }
        self.value = value;

        OptionChanged {
            option: &self.name,
            value: &self.value,
        }
        .log();

        for slot in &self.slots {
            (slot.write)(&self.value);
        }
        for (index, trigger) in self.triggers.iter().enumerate() {
            if let Err(error) = trigger(&self.value) {
                TriggerFailed {
                    option: &self.name,
                    trigger_index: index,
                    error: &error,
                }
                .log();
                return Err(error);
            }
        }
        Ok(())
    }

    /// Decode `text` through the option's kind and [`set`](Self::set) it.
    pub fn set_text(&mut self, text: &str) -> CoreResult<()> {
        let value = decode(text, self.kind()).map_err(|e| e.located(&self.name))?;
        self.set(value)
    }

    /// Set the default value back, running triggers as any `set` does.
    pub fn reset(&mut self) -> CoreResult<()> {
        let default = self.default.clone();
        self.set(default)
    }

    fn check_kind(&self, value: &Value) -> CoreResult<()> {
        if value.kind() != self.kind() {
            return Err(CoreError::TypeMismatch {
                name: self.name.clone(),
                expected: self.kind(),
                found: value.kind(),
            });
        }
        Ok(())
    }

    fn is_allowed(&self, value: &Value) -> bool {
        self.restricted.is_empty() || self.restricted.contains(value)
    }

    fn restriction_violation(&self, value: &Value) -> CoreError {
        CoreError::RestrictionViolation {
            name: self.name.clone(),
            value: encode(value),
        }
    }
}

impl fmt::Debug for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOption")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("value", &self.value)
            .field("default", &self.default)
            .field("restricted", &self.restricted)
            .field("tier", &self.tier)
            .field("trigger_count", &self.triggers.len())
            .field("slot_count", &self.slots.len())
            .finish()
    }
}
