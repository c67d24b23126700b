// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use crate::component::{BuilderRegistry, Component, ComponentId, ComponentTree};
    use crate::errors::CoreError;
    use crate::options::OptionList;
    use crate::signal::SignalFrame;
    use crate::value::{Uri, Value, ValueMap};
    use crate::xml::{decode_signal, encode_signal, SignalDocument};
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex, PoisonError, RwLock};

    struct Fixture {
        tree: ComponentTree,
        my_c: ComponentId,
        int_slot: Arc<RwLock<i64>>,
        str_slot: Arc<RwLock<String>>,
        fired: Arc<Mutex<Vec<&'static str>>>,
    }

    fn record(fired: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> impl Fn(&Value) -> crate::errors::CoreResult<()> {
        let fired = Arc::clone(fired);
        move |_| {
            fired.lock().unwrap_or_else(PoisonError::into_inner).push(name);
            Ok(())
        }
    }

    /// A component declaring every option the configure document addresses.
    fn fixture() -> Fixture {
        let int_slot = Arc::new(RwLock::new(-5i64));
        let str_slot = Arc::new(RwLock::new("LOLO".to_string()));
        let fired = Arc::new(Mutex::new(Vec::new()));

        let mut my_c = Component::new("MyC", "MyC");
        let options = my_c.options_mut();
        options.add("OptBool", "bool option", false).unwrap();
        options.add("OptInt", "int option", -5i64).unwrap();
        options.add("OptUInt", "int option", 10u64).unwrap();
        options.add("OptReal", "real option", 0.0).unwrap();
        options.add("OptStr", "string option", "LOLO").unwrap();
        options.add("OptPath", "path option", Uri::parse("/").unwrap()).unwrap();
        options
            .add("OptDate", "date option", NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
            .unwrap();
        options.add("OptData", "data option", Vec::<u8>::new()).unwrap();
        options.add("OptList", "sub set", ValueMap::new()).unwrap();
        options
            .add("VecInt", "vector ints option", vec![1, 2, 3, 4, 5, 6, 7, 8, 9])
            .unwrap();
        options
            .add("VecStr", "vector strs option", vec!["lolo", "koko"])
            .unwrap();
        options.add("OptComp", "component option", ValueMap::new()).unwrap();

        options
            .option_mut("OptInt")
            .unwrap()
            .link(Arc::clone(&int_slot))
            .unwrap()
            .attach_trigger(record(&fired, "OptInt"));
        options
            .option_mut("OptStr")
            .unwrap()
            .link(Arc::clone(&str_slot))
            .unwrap()
            .attach_trigger(record(&fired, "OptStr"));
        options
            .option_mut("OptBool")
            .unwrap()
            .attach_trigger(record(&fired, "OptBool"));
        options
            .option_mut("VecInt")
            .unwrap()
            .attach_trigger(record(&fired, "VecInt"));

        let mut tree = ComponentTree::with_registry("Root", Arc::new(BuilderRegistry::new()));
        let root = tree.root();
        let my_c = tree.add_child(root, my_c).unwrap();
        Fixture {
            tree,
            my_c,
            int_slot,
            str_slot,
            fired,
        }
    }

    /// The full configure document reaches every option with the right kind
    #[test]
    fn test_configure_document_sets_every_option() {
        let mut fixture = fixture();
        let text = std::fs::read_to_string("signals/configure-myc.xml").unwrap();
        let reply = fixture.tree.dispatch_xml(&text).unwrap();

        let reply = decode_signal(&reply).unwrap();
        assert_eq!(reply.target, "configure");
        assert_eq!(reply.receiver, "cpath:/MyC");
        assert!(reply.frame.is_empty());

        let options = fixture.tree.component(fixture.my_c).unwrap().options();
        let option = |name: &str| options.option(name).unwrap();

        assert!(option("OptBool").value::<bool>().unwrap());
        assert_eq!(option("OptBool").get_text(), "true");
        assert_eq!(option("OptInt").value::<i64>().unwrap(), -156);
        assert_eq!(option("OptInt").get_text(), "-156");
        assert_eq!(option("OptUInt").value::<u64>().unwrap(), 134);
        assert_eq!(option("OptUInt").get_text(), "134");
        assert_eq!(option("OptReal").value::<f64>().unwrap(), 6.4564E+5);
        assert_eq!(option("OptStr").value::<String>().unwrap(), "lolo");
        assert_eq!(option("OptPath").value::<Uri>().unwrap().path(), "/opt/path");
        assert_eq!(
            option("OptDate").value::<NaiveDate>().unwrap(),
            NaiveDate::from_ymd_opt(2010, 5, 24).unwrap()
        );
        assert_eq!(option("OptData").get_text(), "PEKBpYGlmYFCPA==");
        assert_eq!(option("VecInt").value::<Vec<i32>>().unwrap(), vec![2, 8, 9]);
        assert_eq!(
            option("VecStr").value::<Vec<String>>().unwrap(),
            vec!["aabbcc".to_string(), "ddeeff".to_string()]
        );

        let list = option("OptList").value::<ValueMap>().unwrap();
        assert_eq!(list.get("mi"), Some(&Value::Int(2)));
        assert_eq!(list.get("mr"), Some(&Value::Real(8.0)));
        assert_eq!(list.get("mb"), Some(&Value::Bool(true)));

        let comp = option("OptComp").value::<ValueMap>().unwrap();
        assert_eq!(comp.get("ctype"), Some(&Value::from("Newton")));

        assert_eq!(*fixture.int_slot.read().unwrap(), -156);
        assert_eq!(*fixture.str_slot.read().unwrap(), "lolo");
        assert_eq!(
            *fixture.fired.lock().unwrap(),
            vec!["OptBool", "OptInt", "OptStr", "VecInt"]
        );
    }

    /// A single value fragment configures one integer option
    #[test]
    fn test_integer_fragment() {
        let mut fixture = fixture();
        fixture
            .tree
            .configure_xml(
                fixture.my_c,
                r#"<valuemap><value key="OptInt"><integer>-156</integer></value></valuemap>"#,
            )
            .unwrap();

        let option = fixture
            .tree
            .component(fixture.my_c)
            .unwrap()
            .options()
            .option("OptInt")
            .unwrap();
        assert_eq!(option.get(), &Value::Int(-156));
        assert_eq!(option.get_text(), "-156");
    }

    /// An array fragment replaces a list option element by element
    #[test]
    fn test_array_fragment() {
        let mut fixture = fixture();
        fixture
            .tree
            .configure_xml(
                fixture.my_c,
                r#"<valuemap><array key="VecInt" type="integer" size="3"><e>2</e><e>8</e><e>9</e></array></valuemap>"#,
            )
            .unwrap();

        let options = fixture.tree.component(fixture.my_c).unwrap().options();
        assert_eq!(
            options.option("VecInt").unwrap().get(),
            &Value::from(vec![2i64, 8, 9])
        );
    }

    /// Wire values of the wrong kind or for unknown options are rejected
    #[test]
    fn test_configuration_failures() {
        struct TestCase {
            name: &'static str,
            text: &'static str,
            check: fn(&CoreError) -> bool,
        }

        let test_cases = vec![
            TestCase {
                name: "real into integer option",
                text: r#"<valuemap><value key="OptInt"><real>1.5</real></value></valuemap>"#,
                check: |e| matches!(e, CoreError::TypeMismatch { name, .. } if name == "OptInt"),
            },
            TestCase {
                name: "unknown option",
                text: r#"<valuemap><value key="OptNope"><integer>1</integer></value></valuemap>"#,
                check: |e| matches!(e, CoreError::UnknownOption { option, .. } if option == "OptNope"),
            },
            TestCase {
                name: "array of the wrong element kind",
                text: r#"<valuemap><array key="VecInt" type="real" size="1"><e>1.0</e></array></valuemap>"#,
                check: |e| matches!(e, CoreError::TypeMismatch { name, .. } if name == "VecInt"),
            },
            TestCase {
                name: "undecodable text",
                text: r#"<valuemap><value key="OptUInt"><unsigned>-3</unsigned></value></valuemap>"#,
                check: |e| matches!(e, CoreError::Format { location, .. } if location == "OptUInt"),
            },
        ];

        for test_case in test_cases {
            let mut fixture = fixture();
            let error = fixture
                .tree
                .configure_xml(fixture.my_c, test_case.text)
                .expect_err(test_case.name);
            assert!((test_case.check)(&error), "{}: {}", test_case.name, error);
        }
    }

    /// Restricted options reject values outside the allowed set and fire
    /// triggers exactly once, in order, on accepted values
    #[test]
    fn test_restricted_option_over_the_wire() {
        let mut fixture = fixture();
        let order = Arc::new(Mutex::new(Vec::new()));
        {
            let options = fixture
                .tree
                .component_mut(fixture.my_c)
                .unwrap()
                .options_mut();
            let first = Arc::clone(&order);
            let second = Arc::clone(&order);
            options
                .add("OptLevel", "restricted level", 1i64)
                .unwrap()
                .restrict_to(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
                .unwrap()
                .attach_trigger(move |_| {
                    first.lock().unwrap_or_else(PoisonError::into_inner).push(1);
                    Ok(())
                })
                .attach_trigger(move |_| {
                    second.lock().unwrap_or_else(PoisonError::into_inner).push(2);
                    Ok(())
                });
        }

        let error = fixture
            .tree
            .configure_xml(
                fixture.my_c,
                r#"<valuemap><value key="OptLevel"><integer>5</integer></value></valuemap>"#,
            )
            .unwrap_err();
        assert!(matches!(error, CoreError::RestrictionViolation { .. }));
        assert!(order.lock().unwrap().is_empty());

        fixture
            .tree
            .configure_xml(
                fixture.my_c,
                r#"<valuemap><value key="OptLevel"><integer>2</integer></value></valuemap>"#,
            )
            .unwrap();
        assert_eq!(*order.lock().unwrap(), vec![1, 2]);
    }

    /// Unknown signals and missing arguments surface through dispatch_xml
    #[test]
    fn test_signal_failures_over_the_wire() {
        let mut fixture = fixture();
        fixture
            .tree
            .component_mut(fixture.my_c)
            .unwrap()
            .signals_mut()
            .register("read", |_, frame| {
                let file = frame.get::<Uri>("file")?;
                let mut reply = SignalFrame::new();
                reply.set("file", file);
                Ok(Some(reply))
            })
            .unwrap();

        let unknown = encode_signal(&SignalDocument {
            target: "write".to_string(),
            receiver: "cpath:/MyC".to_string(),
            frame: SignalFrame::new(),
        });
        assert!(matches!(
            fixture.tree.dispatch_xml(&unknown),
            Err(CoreError::UnknownSignal { signal, .. }) if signal == "write"
        ));

        let missing = r#"<signal target="read" receiver="cpath:/MyC"><valuemap/></signal>"#;
        let error = fixture.tree.dispatch_xml(missing).unwrap_err();
        assert!(matches!(error.root(), CoreError::MissingArgument { key } if key == "file"));

        let ok = r#"<signal target="read" receiver="cpath:/MyC">
                      <valuemap><value key="file"><path>file:cube.msh</path></value></valuemap>
                    </signal>"#;
        let reply = decode_signal(&fixture.tree.dispatch_xml(ok).unwrap()).unwrap();
        assert_eq!(reply.frame.get::<Uri>("file").unwrap().to_string(), "file:cube.msh");
    }

    /// The option schema published over the wire rebuilds the same list
    #[test]
    fn test_option_schema_over_the_wire() {
        let mut fixture = fixture();
        fixture
            .tree
            .component_mut(fixture.my_c)
            .unwrap()
            .options_mut()
            .option_mut("OptInt")
            .unwrap()
            .set_pretty_name("Integer")
            .mark_basic();

        let request = r#"<signal target="list_options" receiver="cpath:/MyC"/>"#;
        let reply = decode_signal(&fixture.tree.dispatch_xml(request).unwrap()).unwrap();
        let schema = OptionList::from_frame("copy", &reply.frame).unwrap();

        let original = fixture.tree.component(fixture.my_c).unwrap().options();
        assert_eq!(
            schema.names().collect::<Vec<_>>(),
            original.names().collect::<Vec<_>>()
        );
        let opt_int = schema.option("OptInt").unwrap();
        assert_eq!(opt_int.pretty_name(), "Integer");
        assert_eq!(opt_int.tier(), crate::options::Tier::Basic);
        assert_eq!(opt_int.default_value(), &Value::Int(-5));
        assert_eq!(
            schema.option("VecStr").unwrap().get(),
            original.option("VecStr").unwrap().get()
        );
    }
}
