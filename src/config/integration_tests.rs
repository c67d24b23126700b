// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use crate::component::{BuilderRegistry, Component, ComponentTree};
    use crate::config::{load_and_validate_tree_config, load_tree_config, TreeConfig};
    use crate::errors::{ConfigError, CoreError, ValidationError};
    use crate::value::{ScalarKind, Uri, Value, ValueKind};
    use crate::xml::decode_signal;
    use std::fs;
    use std::io::Write;
    use std::sync::{Arc, Mutex, PoisonError};
    use tempfile::Builder;

    const DEMO_TREE: &str = "configs/demo-tree.yaml";

    fn demo_tree() -> ComponentTree {
        let config = load_and_validate_tree_config(DEMO_TREE, &BuilderRegistry::new()).unwrap();
        config.build_with(Arc::new(BuilderRegistry::new())).unwrap()
    }

    /// The demo description loads, validates and builds into the expected outline
    #[test]
    fn test_demo_tree_builds() {
        let tree = demo_tree();
        assert_eq!(
            tree.render(tree.root()),
            "/ (Group)\n  Tools (Group)\n    mesh (Group)\n    solver (Group)\n"
        );
        assert_eq!(tree.component(tree.root()).unwrap().name(), "Root");
    }

    /// Declared options receive their defaults, then the configured values
    #[test]
    fn test_demo_tree_option_values() {
        let tree = demo_tree();
        let root = tree.root();

        let mesh = tree.resolve(root, "cpath:/Tools/mesh").unwrap();
        let options = tree.component(mesh).unwrap().options();
        assert_eq!(options.option("dimension").unwrap().value::<u64>().unwrap(), 3);
        assert_eq!(
            options.option("dimension").unwrap().restricted_values(),
            &[Value::UInt(2), Value::UInt(1), Value::UInt(3)]
        );
        assert_eq!(
            options.option("file").unwrap().value::<Uri>().unwrap(),
            Uri::parse("file:/opt/meshes/square.msh").unwrap()
        );

        let solver = tree.resolve(root, "/Tools/solver").unwrap();
        let options = tree.component(solver).unwrap().options();
        assert_eq!(options.option("cfl").unwrap().value::<f64>().unwrap(), 0.8);
        assert_eq!(options.option("cfl").unwrap().pretty_name(), "CFL");
        assert_eq!(options.option("scheme").unwrap().value::<String>().unwrap(), "rk3");
        assert_eq!(
            options.option("residuals").unwrap().value::<Vec<String>>().unwrap(),
            vec!["rho", "rhoU", "rhoE"]
        );

        let limits = options.option("limits").unwrap().get().as_map().unwrap().clone();
        assert_eq!(limits["max_iterations"], Value::Int(500));
        assert_eq!(limits["tolerance"], Value::Real(1.0e-6));
    }

    /// Links in the description are bound after every component exists
    #[test]
    fn test_demo_tree_links() {
        let tree = demo_tree();
        let solver = tree.resolve(tree.root(), "cpath:/Tools/solver").unwrap();
        let mesh = tree.follow_link(solver, "mesh").unwrap();
        assert_eq!(tree.path_of(mesh).unwrap(), Uri::cpath("/Tools/mesh"));
    }

    /// The fixture signal documents run against the demo tree
    #[test]
    fn test_demo_tree_accepts_fixture_signals() {
        let mut tree = demo_tree();

        let create = fs::read_to_string("signals/create-fields.xml").unwrap();
        let reply = decode_signal(&tree.dispatch_xml(&create).unwrap()).unwrap();
        assert_eq!(reply.target, "create_component");
        assert_eq!(reply.receiver, "cpath:/Tools");
        assert_eq!(
            reply.frame.get::<Uri>("path").unwrap(),
            Uri::cpath("/Tools/fields")
        );

        let list = fs::read_to_string("signals/list-tree.xml").unwrap();
        let reply = decode_signal(&tree.dispatch_xml(&list).unwrap()).unwrap();
        assert_eq!(reply.frame.get::<String>("name").unwrap(), "Root");
        assert!(tree.resolve(tree.root(), "cpath:/Tools/fields").is_ok());
    }

    #[test]
    fn test_build_with_global_registry() {
        let config = load_tree_config(DEMO_TREE).unwrap();
        let tree = config.build().unwrap();
        assert_eq!(tree.len(), 4);
        assert!(tree.resolve(tree.root(), "cpath:/Tools/solver").is_ok());
    }

    /// The same description in JSON builds the same tree
    #[test]
    fn test_json_description() {
        let json = r#"{
            "root": "Sim",
            "components": [
                { "name": "Tools" },
                {
                    "parent": "cpath:/Tools",
                    "name": "solver",
                    "declare": { "iterations": { "kind": "integer", "default": 10 } },
                    "options": { "iterations": 250 }
                }
            ]
        }"#;
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let tree = load_tree_config(file.path())
            .unwrap()
            .build_with(Arc::new(BuilderRegistry::new()))
            .unwrap();
        let solver = tree.resolve(tree.root(), "/Tools/solver").unwrap();
        assert_eq!(
            tree.component(solver)
                .unwrap()
                .options()
                .option("iterations")
                .unwrap()
                .value::<i64>()
                .unwrap(),
            250
        );
    }

    /// Options declared by a registered builder are configured through it, triggers included
    #[test]
    fn test_builder_options_and_triggers() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let registry = Arc::new(BuilderRegistry::new());
        let seen = Arc::clone(&fired);
        registry
            .register_builder("Solver", move |name: &str| -> crate::errors::CoreResult<Component> {
                let mut component = Component::new(name, "Solver");
                let seen = Arc::clone(&seen);
                component
                    .options_mut()
                    .add("cfl", "CFL number", 0.5)?
                    .attach_trigger(move |value| {
                        seen.lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(value.clone());
                        Ok(())
                    });
                Ok(component)
            })
            .unwrap();

        let config: TreeConfig = serde_yaml::from_str(
            "components:\n  - name: solver\n    type: Solver\n    options:\n      cfl: 0.9\n",
        )
        .unwrap();
        let tree = config.build_with(Arc::clone(&registry)).unwrap();

        let solver = tree.resolve(tree.root(), "cpath:/solver").unwrap();
        assert_eq!(tree.component(solver).unwrap().type_name(), "Solver");
        assert_eq!(*fired.lock().unwrap(), vec![Value::Real(0.9)]);
    }

    /// Failures while building surface as ConfigError::Core with the core cause
    #[test]
    fn test_build_failures() {
        struct TestCase {
            name: &'static str,
            yaml: &'static str,
            check: fn(&CoreError) -> bool,
        }

        let test_cases = vec![
            TestCase {
                name: "unknown option",
                yaml: "components:\n  - name: a\n    options:\n      missing: 1\n",
                check: |e| matches!(e, CoreError::UnknownOption { option, .. } if option == "missing"),
            },
            TestCase {
                name: "wrong value for kind",
                yaml: "components:\n  - name: a\n    declare:\n      n: { kind: integer }\n    options:\n      n: many\n",
                check: |e| matches!(e, CoreError::Format { location, .. } if location == "n"),
            },
            TestCase {
                name: "list element located",
                yaml: "components:\n  - name: a\n    declare:\n      v: { kind: \"array[real]\" }\n    options:\n      v: [1.0, x]\n",
                check: |e| matches!(e, CoreError::Format { location, .. } if location == "v[1]"),
            },
            TestCase {
                name: "restricted value",
                yaml: "components:\n  - name: a\n    declare:\n      s: { kind: string, default: a, restricted: [b] }\n    options:\n      s: c\n",
                check: |e| matches!(e, CoreError::RestrictionViolation { name, .. } if name == "s"),
            },
            TestCase {
                name: "unknown type",
                yaml: "components:\n  - name: a\n    type: Nope\n",
                check: |e| matches!(e, CoreError::UnknownType { type_name } if type_name == "Nope"),
            },
            TestCase {
                name: "missing parent",
                yaml: "components:\n  - parent: cpath:/x\n    name: a\n",
                check: |e| matches!(e, CoreError::NotFound { .. }),
            },
            TestCase {
                name: "duplicate sibling",
                yaml: "components:\n  - name: a\n  - name: a\n",
                check: |e| matches!(e, CoreError::DuplicateName { name, .. } if name == "a"),
            },
        ];

        for test_case in test_cases {
            let config: TreeConfig = serde_yaml::from_str(test_case.yaml).unwrap();
            match config.build_with(Arc::new(BuilderRegistry::new())) {
                Err(ConfigError::Core(error)) => {
                    assert!((test_case.check)(&error), "{}: {}", test_case.name, error)
                }
                Err(other) => panic!("{}: unexpected error {}", test_case.name, other),
                Ok(_) => panic!("{}: build should fail", test_case.name),
            }
        }
    }

    /// Structural problems are reported together before anything is built
    #[test]
    fn test_invalid_description_is_rejected_on_load() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(
            b"components:\n  - name: a\n    type: Solver\n  - name: a\nlinks:\n  - owner: cpath:/a\n    name: l\n    target: cpath:/b\n",
        )
        .unwrap();

        match load_and_validate_tree_config(file.path(), &BuilderRegistry::new()) {
            Err(ConfigError::Invalid(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(matches!(errors[0], ValidationError::UnknownComponentType { .. }));
                assert!(matches!(errors[1], ValidationError::DuplicateComponentPath { .. }));
                assert!(matches!(errors[2], ValidationError::UndeclaredPath { ref path, .. } if path == "cpath:/b"));
            }
            other => panic!("unexpected result: {:?}", other.map(|c| c.components.len())),
        }
    }

    #[test]
    fn test_declared_kinds() {
        let tree = demo_tree();
        let solver = tree.resolve(tree.root(), "cpath:/Tools/solver").unwrap();
        let options = tree.component(solver).unwrap().options();
        let kinds: Vec<ValueKind> = options.iter().map(|o| o.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ValueKind::Scalar(ScalarKind::Real),
                ValueKind::Scalar(ScalarKind::String),
                ValueKind::List(ScalarKind::String),
                ValueKind::Map,
            ]
        );
    }
}
