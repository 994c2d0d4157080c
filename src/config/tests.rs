use super::*;

fn normalize(config: BindingsConfig) -> Result<Vec<Descriptor<()>>, ConfigError> {
    config.normalize()
}

fn only(config: BindingsConfig) -> Descriptor<()> {
    let mut descriptors = normalize(config).unwrap();
    assert_eq!(descriptors.len(), 1);
    descriptors.remove(0)
}

#[test]
fn shorthand_is_a_text_binding() {
    let d = only(BindingsConfig::new().shorthand("model", ".thing"));
    assert_eq!(d.key, "model");
    assert_eq!(d.selector, ".thing");
    assert!(matches!(d.strategy, Strategy::Text));
}

#[test]
fn missing_type_defaults_to_text() {
    let d = only(BindingsConfig::new().bind("k", Binding::default().hook("x")));
    assert!(matches!(d.strategy, Strategy::Text));
}

#[test]
fn selector_wins_over_hook() {
    let d = only(BindingsConfig::new().bind("k", Binding::text().selector("").hook("x")));
    assert_eq!(d.selector, "");

    let d = only(BindingsConfig::new().bind("k", Binding::text().hook("a b")));
    assert_eq!(d.selector, "[data-hook~=\"a\"], [data-hook~=\"b\"]");

    let d = only(BindingsConfig::new().bind("k", Binding::text()));
    assert_eq!(d.selector, "");
}

#[test]
fn names_normalize_to_lists() {
    let d = only(BindingsConfig::new().bind("k", Binding::attribute().name("href")));
    match d.strategy {
        Strategy::Attribute { names } => assert_eq!(names, vec!["href"]),
        _ => panic!("expected attribute strategy"),
    }
}

#[test]
fn boolean_bindings_pick_yes_no_form_when_either_branch_is_set() {
    let d = only(BindingsConfig::new().bind("k", Binding::boolean_class().no("off").invert(true)));
    match d.strategy {
        Strategy::BooleanClass(switches) => assert_eq!(
            switches,
            Switches::YesNo {
                yes: Vec::new(),
                no: vec!["off".to_string()],
                invert: true,
            }
        ),
        _ => panic!("expected booleanClass strategy"),
    }

    let d = only(BindingsConfig::new().bind("k", Binding::boolean_attribute()));
    match d.strategy {
        Strategy::BooleanAttribute(switches) => assert_eq!(
            switches,
            Switches::Names {
                names: None,
                invert: false,
            }
        ),
        _ => panic!("expected booleanAttribute strategy"),
    }
}

#[test]
fn toggle_branches_join_selector_lists() {
    let d = only(BindingsConfig::new().bind("k", Binding::toggle().yes([".a", ".b"])));
    match d.strategy {
        Strategy::Toggle {
            mode,
            invert,
            branches,
        } => {
            assert_eq!(mode, ToggleMode::Display);
            assert!(!invert);
            assert_eq!(
                branches,
                Some(ToggleBranches {
                    yes: Some(".a, .b".to_string()),
                    no: None,
                })
            );
        }
        _ => panic!("expected toggle strategy"),
    }
}

#[test]
fn switch_mode_is_validated() {
    let d = only(
        BindingsConfig::new().bind("k", Binding::switch().mode("visibility").case("a", ".a")),
    );
    assert!(matches!(
        d.strategy,
        Strategy::Switch {
            mode: ToggleMode::Visibility,
            ..
        }
    ));

    let err = normalize(
        BindingsConfig::new().bind("k", Binding::switch().mode("opacity").case("a", ".a")),
    )
    .err()
    .unwrap();
    assert_eq!(
        err.to_string(),
        "binding \"k\" has mode \"opacity\"; expected \"display\" or \"visibility\""
    );
}

#[test]
fn unknown_type_names_are_rejected() {
    let err = normalize(BindingsConfig::new().bind("k", Binding::named("nope")))
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "no such binding type: nope");
}

#[test]
fn missing_name_and_cases_are_rejected() {
    let err = normalize(BindingsConfig::new().bind("k", Binding::attribute()))
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "attribute binding for \"k\" must have a \"name\"");

    let err = normalize(BindingsConfig::new().bind("k", Binding::switch_class().name("on")))
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "switchClass binding for \"k\" must have \"cases\"");
}

#[test]
fn switch_attribute_cases_keep_both_shapes() {
    let d = only(
        BindingsConfig::new().bind(
            "k",
            Binding::switch_attribute()
                .case("a", "/a")
                .case("b", [("href", "/b"), ("rel", "next")]),
        ),
    );
    match d.strategy {
        Strategy::SwitchAttribute { names, cases } => {
            assert_eq!(names, None);
            assert_eq!(
                cases,
                vec![
                    ("a".to_string(), AttributeCase::Value("/a".to_string())),
                    (
                        "b".to_string(),
                        AttributeCase::Attributes(vec![
                            ("href".to_string(), "/b".to_string()),
                            ("rel".to_string(), "next".to_string()),
                        ])
                    ),
                ]
            );
        }
        _ => panic!("expected switchAttribute strategy"),
    }
}

#[test]
fn bind_all_keeps_registration_order() {
    let descriptors = normalize(BindingsConfig::new().bind_all(
        "k",
        [Binding::class(), Binding::value(), Binding::inner_html()],
    ))
    .unwrap();
    assert_eq!(descriptors.len(), 3);
    assert!(matches!(descriptors[0].strategy, Strategy::Class));
    assert!(matches!(descriptors[1].strategy, Strategy::Value));
    assert!(matches!(descriptors[2].strategy, Strategy::InnerHtml));
}

#[test]
fn json_entries_parse_every_form() {
    let config: BindingsConfig = BindingsConfig::from_json_str(
        r#"{
            "b": ".b",
            "a": [{ "type": "class" }, { "hook": "h", "invert": true }],
            "c": { "type": "attribute", "name": ["x", "y"] }
        }"#,
    )
    .unwrap();
    assert_eq!(config.len(), 4);
    let keys: Vec<String> = normalize(config)
        .unwrap()
        .into_iter()
        .map(|d| d.key)
        .collect();
    assert_eq!(keys, vec!["a", "a", "b", "c"]);
}

#[test]
fn custom_bindings_keep_their_selector() {
    let d = only(
        BindingsConfig::new().bind(
            "k",
            Binding::custom(|_: &(), _: &mut dyn Dom, _: ElementId, _: &Value, _: &Value| {})
                .hook("h"),
        ),
    );
    assert_eq!(d.selector, "[data-hook~=\"h\"]");
    assert!(matches!(d.strategy, Strategy::Custom(_)));
}
