// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::component::{BuilderRegistry, GROUP_TYPE};
use crate::errors::ConfigError;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Declarative description of a component tree.
///
/// Components are created in the order they are listed, so a parent must be
/// listed before its children. Links are bound after every component exists.
///
/// # Example
/// ```yaml
/// root: Root
/// components:
///   - name: Tools
///   - parent: cpath:/Tools
///     name: solver
///     declare:
///       cfl: { kind: real, default: 0.5, description: "CFL number", basic: true }
///       scheme: { kind: string, default: euler, restricted: [euler, rk3] }
///     options:
///       cfl: 0.8
/// links:
///   - owner: cpath:/Tools/solver
///     name: mesh
///     target: cpath:/Tools
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TreeConfig {
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
    #[serde(default)]
    pub links: Vec<LinkConfig>,
}

/// One component of a [`TreeConfig`].
///
/// # Fields
/// * `parent` - path of the parent, `cpath:/` (the root) when omitted
/// * `name` - child name, unique under the parent
/// * `type_name` - registered builder type (`type` in the file), `Group` when omitted
/// * `declare` - options added to the built component
/// * `options` - values set on existing or declared options, decoded through each option's kind
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ComponentConfig {
    #[serde(default = "default_parent")]
    pub parent: String,
    pub name: String,
    #[serde(rename = "type", default = "default_type")]
    pub type_name: String,
    #[serde(default)]
    pub declare: IndexMap<String, OptionDeclaration>,
    #[serde(default)]
    pub options: IndexMap<String, serde_yaml::Value>,
}

/// An option added by the configuration file rather than by the builder.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OptionDeclaration {
    /// Kind name as on the wire: `integer`, `array[real]`, `map`, ...
    pub kind: String,
    /// Default value; the zero value of the kind when omitted.
    #[serde(default)]
    pub default: Option<serde_yaml::Value>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pretty_name: Option<String>,
    #[serde(default)]
    pub restricted: Vec<serde_yaml::Value>,
    #[serde(default)]
    pub basic: bool,
}

/// A named link from `owner` to `target`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LinkConfig {
    pub owner: String,
    pub name: String,
    pub target: String,
}

fn default_root() -> String {
    "Root".to_string()
}

fn default_parent() -> String {
    "cpath:/".to_string()
}

fn default_type() -> String {
    GROUP_TYPE.to_string()
}

/// Load a tree description, choosing YAML or JSON by file extension.
pub fn load_tree_config<P: AsRef<Path>>(path: P) -> Result<TreeConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let content = fs::read_to_string(path)?;
    match extension.as_str() {
        "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
        "json" => Ok(serde_json::from_str(&content)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

/// Load a tree description and check it against `registry`.
///
/// All structural problems are reported together as `ConfigError::Invalid`.
pub fn load_and_validate_tree_config<P: AsRef<Path>>(
    path: P,
    registry: &BuilderRegistry,
) -> Result<TreeConfig, ConfigError> {
    let config = load_tree_config(path)?;
    crate::config::validate_tree_config(&config, registry).map_err(ConfigError::Invalid)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn parse_minimal_config() {
        let yaml = r#"
components:
  - name: Tools
  - parent: cpath:/Tools
    name: mesh
"#;
        let cfg: TreeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.root, "Root");
        assert_eq!(cfg.components.len(), 2);
        assert_eq!(cfg.components[0].parent, "cpath:/");
        assert_eq!(cfg.components[0].type_name, "Group");
        assert_eq!(cfg.components[1].parent, "cpath:/Tools");
        assert!(cfg.links.is_empty());
    }

    #[test]
    fn test_load_by_extension() {
        struct TestCase {
            name: &'static str,
            suffix: &'static str,
            content: &'static str,
            expect_ok: bool,
        }

        let test_cases = vec![
            TestCase {
                name: "yaml",
                suffix: ".yaml",
                content: "root: Sim\ncomponents:\n  - name: Tools\n",
                expect_ok: true,
            },
            TestCase {
                name: "json",
                suffix: ".json",
                content: r#"{"root": "Sim", "components": [{"name": "Tools"}]}"#,
                expect_ok: true,
            },
            TestCase {
                name: "toml is not supported",
                suffix: ".toml",
                content: "root = \"Sim\"\n",
                expect_ok: false,
            },
            TestCase {
                name: "malformed yaml",
                suffix: ".yml",
                content: "components: [unclosed\n",
                expect_ok: false,
            },
        ];

        for test_case in test_cases {
            let mut file = Builder::new().suffix(test_case.suffix).tempfile().unwrap();
            file.write_all(test_case.content.as_bytes()).unwrap();

            let result = load_tree_config(file.path());
            assert_eq!(result.is_ok(), test_case.expect_ok, "{}: {:?}", test_case.name, result);
            if let Ok(cfg) = result {
                assert_eq!(cfg.root, "Sim");
                assert_eq!(cfg.components[0].name, "Tools");
            }
        }
    }

    #[test]
    fn test_unsupported_format_names_extension() {
        let file = Builder::new().suffix(".ini").tempfile().unwrap();
        match load_tree_config(file.path()) {
            Err(ConfigError::UnsupportedFormat(ext)) => assert_eq!(ext, "ini"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_tree_config("configs/does-not-exist.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
