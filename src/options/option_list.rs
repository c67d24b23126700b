// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::option::{ConfigOption, Tier};
use crate::errors::{CoreError, CoreResult};
use crate::signal::{EntryMeta, FrameEntry, SignalFrame};
use crate::value::Value;
use indexmap::IndexMap;

/// Ordered, name-unique collection of options owned by one component.
///
/// Insertion order is kept so that enumeration and generated forms list
/// options the way their owner declared them.
#[derive(Debug, Clone, Default)]
pub struct OptionList {
    owner: String,
    options: IndexMap<String, ConfigOption>,
}

impl OptionList {
    /// An empty list; `owner` labels errors (usually the component path).
    pub fn new(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            options: IndexMap::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: &str) {
        self.owner = owner.to_string();
    }

    /// Declare a new option and return it for further chaining.
    pub fn add(
        &mut self,
        name: &str,
        description: &str,
        default: impl Into<Value>,
    ) -> CoreResult<&mut ConfigOption> {
        let option = ConfigOption::new(name, description, default)?;
        self.insert(option)
    }

    pub fn insert(&mut self, option: ConfigOption) -> CoreResult<&mut ConfigOption> {
        if self.options.contains_key(option.name()) {
            return Err(CoreError::InvalidName {
                name: option.name().to_string(),
                reason: format!("already used in {}", self.owner_label()),
            });
        }
        let (index, _) = self.options.insert_full(option.name().to_string(), option);
        Ok(&mut self.options[index])
    }

    pub fn get(&self, name: &str) -> Option<&ConfigOption> {
        self.options.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ConfigOption> {
        self.options.get_mut(name)
    }

    /// Like [`get`](Self::get) but failing with `UnknownOption`.
    pub fn option(&self, name: &str) -> CoreResult<&ConfigOption> {
        self.options.get(name).ok_or_else(|| self.unknown(name))
    }

    pub fn option_mut(&mut self, name: &str) -> CoreResult<&mut ConfigOption> {
        if !self.options.contains_key(name) {
            return Err(self.unknown(name));
        }
        Ok(&mut self.options[name])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigOption> {
        self.options.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Set one option by name.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> CoreResult<()> {
        self.option_mut(name)?.set(value)
    }

    /// Apply every entry of a decoded frame as an option `set`.
    ///
    /// Entries are applied in frame order and the first failure stops the
    /// walk; entries already applied stay applied. A key that matches no
    /// option fails with `UnknownOption`.
    pub fn configure(&mut self, frame: &SignalFrame) -> CoreResult<()> {
        for (key, entry) in frame.entries() {
            let option = self.option_mut(key)?;
            option.set(entry.to_value())?;
        }
        Ok(())
    }

    /// Describe the list as a frame: current values plus description,
    /// pretty name, tier and restricted values of every option.
    pub fn to_frame(&self) -> SignalFrame {
        let mut frame = SignalFrame::new();
        for option in self.iter() {
            frame.set_entry(
                option.name(),
                FrameEntry::Value {
                    value: option.get().clone(),
                    meta: EntryMeta {
                        description: option.description().to_string(),
                        pretty_name: option.pretty_name().to_string(),
                        tier: Some(option.tier()),
                        restricted: option.restricted_values().to_vec(),
                    },
                },
            );
        }
        frame
    }

    /// Rebuild a schema from a frame produced by [`to_frame`](Self::to_frame).
    ///
    /// Entry values become defaults. Sub-frames become map options.
    pub fn from_frame(owner: &str, frame: &SignalFrame) -> CoreResult<Self> {
        let mut list = OptionList::new(owner);
        for (key, entry) in frame.entries() {
            match entry {
                FrameEntry::Value { value, meta } => {
                    let option = list.add(key, &meta.description, value.clone())?;
                    if meta.pretty_name != key.as_str() {
                        option.set_pretty_name(&meta.pretty_name);
                    }
                    option.set_tier(meta.tier.unwrap_or(Tier::Advanced));
                    if !meta.restricted.is_empty() {
                        option.restrict_to(meta.restricted.clone())?;
                    }
                }
                FrameEntry::Frame(sub) => {
                    let option = list.add(key, sub.description(), Value::Map(sub.to_value_map()))?;
                    option.set_tier(sub.tier().unwrap_or(Tier::Advanced));
                }
            }
        }
        Ok(list)
    }

    fn owner_label(&self) -> String {
        if self.owner.is_empty() {
            "option list".to_string()
        } else {
            self.owner.clone()
        }
    }

    fn unknown(&self, name: &str) -> CoreError {
        CoreError::UnknownOption {
            component: self.owner_label(),
            option: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueMap;

    fn sample_list() -> OptionList {
        let mut options = OptionList::new("cpath:/MyC");
        options.add("OptBool", "bool option", false).unwrap();
        options.add("OptInt", "int option", -5i64).unwrap().mark_basic();
        options.add("OptUInt", "unsigned option", 10u64).unwrap();
        options.add("OptReal", "real option", 0.0).unwrap();
        options.add("OptStr", "string option", "LOLO").unwrap();
        options
            .add("VecInt", "vector ints option", vec![1, 2, 3, 4, 5, 6, 7, 8, 9])
            .unwrap();
        options
            .add("VecStr", "vector strs option", vec!["lolo", "koko"])
            .unwrap();
        options
    }

    #[test]
    fn test_duplicate_names_are_invalid() {
        let mut options = sample_list();
        match options.add("OptInt", "again", 1i64) {
            Err(CoreError::InvalidName { name, reason }) => {
                assert_eq!(name, "OptInt");
                assert!(reason.contains("cpath:/MyC"));
            }
            other => panic!("unexpected result: {:?}", other.map(|o| o.name().to_string())),
        }
        assert_eq!(options.len(), 7);
    }

    #[test]
    fn test_enumeration_keeps_declaration_order() {
        let options = sample_list();
        let names: Vec<&str> = options.names().collect();
        assert_eq!(
            names,
            vec!["OptBool", "OptInt", "OptUInt", "OptReal", "OptStr", "VecInt", "VecStr"]
        );
    }

    #[test]
    fn test_configure_applies_frame_entries() {
        let mut options = sample_list();
        let mut frame = SignalFrame::new();
        frame.set("OptInt", -156i64);
        frame.set("VecInt", vec![2, 8, 9]);
        options.configure(&frame).unwrap();

        assert_eq!(options.option("OptInt").unwrap().get_text(), "-156");
        assert_eq!(
            options.option("VecInt").unwrap().value::<Vec<i32>>().unwrap(),
            vec![2, 8, 9]
        );
    }

    #[test]
    fn test_configure_rejects_unknown_keys() {
        let mut options = sample_list();
        let mut frame = SignalFrame::new();
        frame.set("OptInt", 7i64);
        frame.set("OptMissing", 1i64);
        match options.configure(&frame) {
            Err(CoreError::UnknownOption { component, option }) => {
                assert_eq!(component, "cpath:/MyC");
                assert_eq!(option, "OptMissing");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(options.option("OptInt").unwrap().value::<i64>().unwrap(), 7);
    }

    #[test]
    fn test_configure_sub_frame_into_map_option() {
        let mut options = OptionList::new("");
        options.add("OptList", "sub set", ValueMap::new()).unwrap();
        let mut frame = SignalFrame::new();
        let sub = frame.add_frame("OptList");
        sub.set("mi", 2i64);
        sub.set("mb", true);
        options.configure(&frame).unwrap();

        let map = options.option("OptList").unwrap().value::<ValueMap>().unwrap();
        assert_eq!(map.get("mi"), Some(&Value::Int(2)));
        assert_eq!(map.get("mb"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_schema_survives_frame_description() {
        let mut options = sample_list();
        options
            .option_mut("OptInt")
            .unwrap()
            .set_pretty_name("Integer")
            .restrict_to(vec![Value::Int(-5), Value::Int(3)])
            .unwrap();

        let rebuilt = OptionList::from_frame("copy", &options.to_frame()).unwrap();
        let names: Vec<&str> = rebuilt.names().collect();
        assert_eq!(names, options.names().collect::<Vec<_>>());

        let opt_int = rebuilt.option("OptInt").unwrap();
        assert_eq!(opt_int.description(), "int option");
        assert_eq!(opt_int.pretty_name(), "Integer");
        assert_eq!(opt_int.tier(), Tier::Basic);
        assert_eq!(opt_int.restricted_values(), &[Value::Int(-5), Value::Int(3)]);
        assert_eq!(rebuilt.option("VecStr").unwrap().get(), options.option("VecStr").unwrap().get());
    }

    #[test]
    fn test_map_option_schema_survives_wire_encoding() {
        let mut allowed = ValueMap::new();
        allowed.insert("ctype".to_string(), Value::from("Newton"));

        let mut options = OptionList::new("cpath:/MyC");
        options
            .add("OptMap", "map option", ValueMap::new())
            .unwrap()
            .set_pretty_name("Pretty Map")
            .mark_basic()
            .restrict_to(vec![Value::Map(allowed.clone())])
            .unwrap();

        let text = crate::xml::encode_frame(&options.to_frame());
        let decoded = crate::xml::decode_frame(&text).unwrap();
        let rebuilt = OptionList::from_frame("copy", &decoded).unwrap();

        let opt_map = rebuilt.option("OptMap").unwrap();
        assert_eq!(opt_map.description(), "map option");
        assert_eq!(opt_map.pretty_name(), "Pretty Map");
        assert_eq!(opt_map.tier(), Tier::Basic);
        assert_eq!(
            opt_map.restricted_values(),
            &[Value::Map(ValueMap::new()), Value::Map(allowed)]
        );
    }
}
