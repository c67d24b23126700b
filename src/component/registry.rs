// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::Component;
use crate::errors::{CoreError, CoreResult};
use crate::observability::messages::component::BuilderRegistered;
use crate::observability::messages::StructuredLog;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Builds a detached component of one type, given the name it will carry.
pub type ComponentFactory = Arc<dyn Fn(&str) -> CoreResult<Component> + Send + Sync>;

/// Type name of the plain container registered in every new registry.
pub const GROUP_TYPE: &str = "Group";

static GLOBAL: OnceLock<Arc<BuilderRegistry>> = OnceLock::new();

/// Maps component type names to factories.
///
/// The process-wide instance is returned by [`BuilderRegistry::global`];
/// populate it during startup, before building trees. Trees hold an `Arc` to
/// the registry they were created with, so tests can use private registries.
pub struct BuilderRegistry {
    builders: RwLock<HashMap<String, ComponentFactory>>,
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BuilderRegistry {
    /// A registry holding only the built-in `Group` type.
    pub fn new() -> Self {
        let registry = Self::empty();
        let mut builders = registry
            .builders
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        builders.insert(
            GROUP_TYPE.to_string(),
            Arc::new(|name: &str| -> CoreResult<Component> {
                Ok(Component::new(name, GROUP_TYPE))
            }),
        );
        drop(builders);
        registry
    }

    pub fn empty() -> Self {
        Self {
            builders: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> Arc<BuilderRegistry> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(BuilderRegistry::new())))
    }

    pub fn register_builder<F>(&self, type_name: &str, factory: F) -> CoreResult<()>
    where
        F: Fn(&str) -> CoreResult<Component> + Send + Sync + 'static,
    {
        let mut builders = self
            .builders
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if builders.contains_key(type_name) {
            return Err(CoreError::DuplicateType {
                type_name: type_name.to_string(),
            });
        }
        builders.insert(type_name.to_string(), Arc::new(factory));
        BuilderRegistered { type_name }.log();
        Ok(())
    }

    /// Remove a builder; meant for test teardown.
    pub fn unregister(&self, type_name: &str) -> bool {
        self.builders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(type_name)
            .is_some()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.builders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .builders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn factory(&self, type_name: &str) -> CoreResult<ComponentFactory> {
        self.builders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_name)
            .cloned()
            .ok_or_else(|| CoreError::UnknownType {
                type_name: type_name.to_string(),
            })
    }

    /// Run the factory for `type_name`. The lock is released before the
    /// factory runs, so factories may consult the registry.
    pub fn build(&self, type_name: &str, name: &str) -> CoreResult<Component> {
        let factory = self.factory(type_name)?;
        let mut component = factory(name)?;
        component.set_type_name(type_name);
        Ok(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_build() {
        let registry = BuilderRegistry::new();
        registry
            .register_builder("Solver", |name| {
                let mut component = Component::new(name, "Solver");
                component.options_mut().add("cfl", "CFL number", 0.5)?;
                Ok(component)
            })
            .unwrap();

        let solver = registry.build("Solver", "MySolver").unwrap();
        assert_eq!(solver.name(), "MySolver");
        assert_eq!(solver.type_name(), "Solver");
        assert!(solver.options().contains("cfl"));
        assert_eq!(registry.type_names(), vec!["Group", "Solver"]);
    }

    #[test]
    fn test_registry_errors() {
        struct TestCase {
            name: &'static str,
            action: fn(&BuilderRegistry) -> CoreResult<()>,
            check: fn(&CoreError) -> bool,
        }

        let test_cases = vec![
            TestCase {
                name: "duplicate builder",
                action: |registry| {
                    registry.register_builder("Group", |name| Ok(Component::new(name, "Group")))
                },
                check: |e| matches!(e, CoreError::DuplicateType { type_name } if type_name == "Group"),
            },
            TestCase {
                name: "unknown type",
                action: |registry| registry.build("Nope", "x").map(|_| ()),
                check: |e| matches!(e, CoreError::UnknownType { type_name } if type_name == "Nope"),
            },
            TestCase {
                name: "factory failure propagates",
                action: |registry| {
                    registry.register_builder("Broken", |_| {
                        Err(CoreError::Other(anyhow::anyhow!("no mesh")))
                    })?;
                    registry.build("Broken", "b").map(|_| ())
                },
                check: |e| matches!(e, CoreError::Other(_)),
            },
        ];

        for test_case in test_cases {
            let registry = BuilderRegistry::new();
            let error = (test_case.action)(&registry).expect_err(test_case.name);
            assert!((test_case.check)(&error), "{}: {}", test_case.name, error);
        }
    }

    #[test]
    fn test_unregister_for_teardown() {
        let registry = BuilderRegistry::empty();
        assert!(!registry.contains(GROUP_TYPE));
        registry
            .register_builder("Temp", |name| Ok(Component::new(name, "Temp")))
            .unwrap();
        assert!(registry.unregister("Temp"));
        assert!(!registry.unregister("Temp"));
        assert!(matches!(
            registry.build("Temp", "t"),
            Err(CoreError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_global_registry_is_shared() {
        let a = BuilderRegistry::global();
        let b = BuilderRegistry::global();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.contains(GROUP_TYPE));
    }
}
