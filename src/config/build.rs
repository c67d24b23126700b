// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::loader::{ComponentConfig, OptionDeclaration, TreeConfig};
use crate::component::{BuilderRegistry, ComponentId, ComponentTree};
use crate::errors::{ConfigError, CoreError, CoreResult};
use crate::options::ConfigOption;
use crate::value::{decode, decode_scalar, ScalarKind, Value, ValueKind, ValueMap};
use serde_yaml::Value as Yaml;
use std::sync::Arc;

impl TreeConfig {
    /// Build the described tree with builders from the global registry.
    pub fn build(&self) -> Result<ComponentTree, ConfigError> {
        self.build_with(BuilderRegistry::global())
    }

    /// Build the described tree with builders from `registry`.
    ///
    /// Components are created in file order; declared options are added, then
    /// option values are applied (running triggers); links are bound last.
    pub fn build_with(&self, registry: Arc<BuilderRegistry>) -> Result<ComponentTree, ConfigError> {
        let mut tree = ComponentTree::with_registry(&self.root, registry);
        let root = tree.root();

        for component in &self.components {
            let parent = tree.resolve(root, &component.parent)?;
            let id = tree.create_child(parent, &component.type_name, &component.name)?;
            apply_component(&mut tree, id, component)?;
        }

        for link in &self.links {
            let owner = tree.resolve(root, &link.owner)?;
            let target = tree.resolve(root, &link.target)?;
            tree.link(owner, &link.name, target)?;
        }
        Ok(tree)
    }
}

fn apply_component(
    tree: &mut ComponentTree,
    id: ComponentId,
    config: &ComponentConfig,
) -> CoreResult<()> {
    for (name, declaration) in &config.declare {
        let option = declare_option(name, declaration)?;
        tree.component_mut(id)?.options_mut().insert(option)?;
    }
    for (name, raw) in &config.options {
        let kind = tree.component(id)?.options().option(name)?.kind();
        let value = yaml_to_value(raw, kind).map_err(|e| e.located(name))?;
        tree.set_option(id, name, value)?;
    }
    Ok(())
}

fn declare_option(name: &str, declaration: &OptionDeclaration) -> CoreResult<ConfigOption> {
    let kind = ValueKind::parse(&declaration.kind).ok_or_else(|| {
        CoreError::format("kind name", &declaration.kind, "unknown kind").located(name)
    })?;
    let default = match &declaration.default {
        Some(raw) => yaml_to_value(raw, kind).map_err(|e| e.located(name))?,
        None => Value::zero(kind),
    };

    let mut option = ConfigOption::new(name, &declaration.description, default)?;
    if let Some(pretty) = &declaration.pretty_name {
        option.set_pretty_name(pretty);
    }
    if declaration.basic {
        option.mark_basic();
    }
    if !declaration.restricted.is_empty() {
        let allowed = declaration
            .restricted
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                yaml_to_value(raw, kind).map_err(|e| e.located(&format!("[{}]", i)).located(name))
            })
            .collect::<CoreResult<Vec<_>>>()?;
        option.restrict_to(allowed)?;
    }
    Ok(option)
}

/// Convert a YAML node to a value of `kind`.
///
/// Scalars go through the text codec. A list kind takes a sequence (or the
/// JSON text form); a map takes a mapping whose entry kinds are inferred.
pub(crate) fn yaml_to_value(raw: &Yaml, kind: ValueKind) -> CoreResult<Value> {
    match (kind, raw) {
        (ValueKind::Scalar(scalar), _) => decode_scalar(&scalar_text(raw, kind)?, scalar),
        (ValueKind::List(element), Yaml::Sequence(items)) => {
            let values = items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let text = scalar_text(item, ValueKind::Scalar(element))
                        .and_then(|text| decode_scalar(&text, element));
                    text.map_err(|e| e.located(&format!("[{}]", i)))
                })
                .collect::<CoreResult<Vec<_>>>()?;
            Value::list(element, values)
        }
        (ValueKind::List(_), Yaml::String(text)) => decode(text, kind),
        (ValueKind::Map, Yaml::Mapping(_)) => infer_value(raw),
        (ValueKind::Map, Yaml::String(text)) => decode(text, kind),
        _ => Err(CoreError::format(kind.to_string(), &describe(raw), "wrong shape")),
    }
}

/// Value of a YAML node whose kind is not declared anywhere.
fn infer_value(raw: &Yaml) -> CoreResult<Value> {
    match raw {
        Yaml::Bool(b) => Ok(Value::Bool(*b)),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::UInt(u))
            } else {
                Ok(Value::Real(n.as_f64().unwrap_or_default()))
            }
        }
        Yaml::String(s) => Ok(Value::String(s.clone())),
        Yaml::Sequence(items) => {
            let element = match items.first().map(infer_value).transpose()? {
                Some(first) => match first.kind() {
                    ValueKind::Scalar(kind) => kind,
                    other => {
                        return Err(CoreError::format(
                            "array element",
                            &describe(raw),
                            format!("lists hold scalars, found {}", other),
                        ))
                    }
                },
                None => ScalarKind::String,
            };
            yaml_to_value(raw, ValueKind::List(element))
        }
        Yaml::Mapping(mapping) => {
            let mut map = ValueMap::new();
            for (key, item) in mapping {
                let key = match key {
                    Yaml::String(key) => key.clone(),
                    other => {
                        return Err(CoreError::format("map key", &describe(other), "keys must be strings"))
                    }
                };
                let value = infer_value(item).map_err(|e| e.located(&key))?;
                map.insert(key, value);
            }
            Ok(Value::Map(map))
        }
        Yaml::Tagged(tagged) => infer_value(&tagged.value),
        Yaml::Null => Err(CoreError::format("value", "null", "values may not be null")),
    }
}

fn scalar_text(raw: &Yaml, kind: ValueKind) -> CoreResult<String> {
    match raw {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Tagged(tagged) => scalar_text(&tagged.value, kind),
        other => Err(CoreError::format(kind.to_string(), &describe(other), "expected a scalar")),
    }
}

fn describe(raw: &Yaml) -> String {
    serde_yaml::to_string(raw)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| format!("{:?}", raw))
}
