// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{CoreError, CoreResult};
use crate::options::Tier;
use crate::value::{Value, ValueKind, ValueMap, ValueType};
use indexmap::IndexMap;

/// Schema details an entry may carry when a frame describes options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryMeta {
    pub description: String,
    pub pretty_name: String,
    pub tier: Option<Tier>,
    pub restricted: Vec<Value>,
}

/// One keyed entry of a frame: a value or a nested frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEntry {
    Value { value: Value, meta: EntryMeta },
    Frame(SignalFrame),
}

impl FrameEntry {
    /// The entry as a value; nested frames become maps.
    pub fn to_value(&self) -> Value {
        match self {
            FrameEntry::Value { value, .. } => value.clone(),
            FrameEntry::Frame(frame) => Value::Map(frame.to_value_map()),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            FrameEntry::Value { value, .. } => value.kind(),
            FrameEntry::Frame(_) => ValueKind::Map,
        }
    }
}

/// Argument and reply container of a signal call.
///
/// A frame is an ordered map of keys to values and nested frames, mirroring
/// the `valuemap` element of the wire encoding. Handlers read their arguments
/// with [`get`](Self::get), which distinguishes a missing key
/// (`MissingArgument`) from a key of the wrong kind (`TypeMismatch`).
///
/// # Examples
///
/// ```rust
/// use cfcore::signal::SignalFrame;
///
/// let mut frame = SignalFrame::new();
/// frame.set("name", "mesh").set("count", 3u64);
/// assert_eq!(frame.get::<String>("name").unwrap(), "mesh");
/// assert!(frame.get::<u64>("missing").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalFrame {
    description: String,
    tier: Option<Tier>,
    entries: IndexMap<String, FrameEntry>,
}

impl SignalFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from a map; nested maps become nested frames.
    pub fn from_value_map(map: &ValueMap) -> Self {
        let mut frame = SignalFrame::new();
        for (key, value) in map {
            match value {
                Value::Map(inner) => {
                    frame.set_entry(key, FrameEntry::Frame(SignalFrame::from_value_map(inner)));
                }
                other => {
                    frame.set(key, other.clone());
                }
            }
        }
        frame
    }

    /// Flatten to a map; nested frames become nested maps.
    pub fn to_value_map(&self) -> ValueMap {
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.to_value()))
            .collect()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) -> &mut Self {
        self.description = description.to_string();
        self
    }

    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    pub fn set_tier(&mut self, tier: Option<Tier>) -> &mut Self {
        self.tier = tier;
        self
    }

    /// Insert or replace a plain value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.set_entry(
            key,
            FrameEntry::Value {
                value: value.into(),
                meta: EntryMeta::default(),
            },
        )
    }

    pub fn set_entry(&mut self, key: &str, entry: FrameEntry) -> &mut Self {
        self.entries.insert(key.to_string(), entry);
        self
    }

    /// Insert an empty nested frame under `key` and return it.
    pub fn add_frame(&mut self, key: &str) -> &mut SignalFrame {
        self.entries
            .insert(key.to_string(), FrameEntry::Frame(SignalFrame::new()));
        match self.entries.get_mut(key) {
            Some(FrameEntry::Frame(frame)) => frame,
            _ => unreachable!("entry was inserted as a frame"),
        }
    }

    pub fn entry(&self, key: &str) -> Option<&FrameEntry> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &FrameEntry)> {
        self.entries.iter()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Typed read of an argument.
    pub fn get<T: ValueType>(&self, key: &str) -> CoreResult<T> {
        match self.entries.get(key) {
            None => Err(CoreError::MissingArgument {
                key: key.to_string(),
            }),
            Some(FrameEntry::Value { value, .. }) => value.extract(key),
            Some(entry @ FrameEntry::Frame(_)) => entry.to_value().extract(key),
        }
    }

    /// Typed read of an optional argument.
    pub fn get_or<T: ValueType>(&self, key: &str, default: T) -> CoreResult<T> {
        if self.contains(key) {
            self.get(key)
        } else {
            Ok(default)
        }
    }

    /// Untyped read of an argument.
    pub fn value(&self, key: &str) -> CoreResult<Value> {
        self.entries
            .get(key)
            .map(FrameEntry::to_value)
            .ok_or_else(|| CoreError::MissingArgument {
                key: key.to_string(),
            })
    }

    /// Nested frame under `key`.
    pub fn frame(&self, key: &str) -> CoreResult<&SignalFrame> {
        match self.entries.get(key) {
            None => Err(CoreError::MissingArgument {
                key: key.to_string(),
            }),
            Some(FrameEntry::Frame(frame)) => Ok(frame),
            Some(FrameEntry::Value { value, .. }) => Err(CoreError::TypeMismatch {
                name: key.to_string(),
                expected: ValueKind::Map,
                found: value.kind(),
            }),
        }
    }
}
