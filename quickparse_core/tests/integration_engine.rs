//! End-to-end tests for the extraction engine.
//!
//! These tests verify that:
//! - templates load identically from YAML and JSON files
//! - discovery, extraction and comparison compose as a pipeline
//! - unreadable or unsupported template files fail with `TemplateError`

use quickparse_core::{
    CompiledFieldTree, Discoverer, NOT_FOUND, Template, TemplateError, Tree, Value, compare,
    discover, extract, flatten_leaves, prune,
};

const DEVICE_YAML: &str = r"
'*':
  Generic Version: 'Version (\S+)'
Dev:
  Version: 'Version: (\S+)'
Switch:
  Version:
    - 'Software, Version (\S+)'
    - 'Software Version (\S+)'
  Hardware:
    Model: 'Model number\s+:\s+(\S+)'
    Serial: 'System serial number\s+:\s+(\S+)'
";

#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn device_template() -> Template {
    Template::parse(DEVICE_YAML, quickparse_core::TemplateFormat::Yaml)
        .expect("device template should parse")
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn reference_and_target_scenario() {
    let template = Template::parse(
        r#"{"Dev": {"Version": "Version: (\\S+)"}}"#,
        quickparse_core::TemplateFormat::Json,
    )
    .expect("template should parse");
    let keywords: Vec<&str> = template.keywords().collect();

    let reference_text = "Device Dev online. Version: 1.0";
    let target_text = "Dev node. Version: 2.0";

    let ref_kw = discover(reference_text, &keywords)
        .expect("keywords compile")
        .expect("reference keyword");
    let targ_kw = discover(target_text, &keywords)
        .expect("keywords compile")
        .expect("target keyword");
    assert_eq!(ref_kw, "Dev");
    assert_eq!(targ_kw, "Dev");

    let reference = extract(reference_text, &template, &ref_kw, true).expect("extracts");
    let target = extract(target_text, &template, &targ_kw, true).expect("extracts");
    assert_eq!(reference["Version"], Value::from("1.0"));
    assert_eq!(target["Version"], Value::from("2.0"));

    let result = compare(&reference, &target);
    assert!(result.matches.is_empty());
    assert_eq!(result.mismatches.len(), 1);
    assert_eq!(result.mismatches["Version"], Value::from("2.0"));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn switch_pipeline_with_nested_fields() {
    let template = device_template();
    let discoverer = Discoverer::from_template(&template).expect("keywords compile");

    let reference_text = "Switch uplink\nCisco IOS XE Software, Version 17.9.4\n\
                          Model number : C9200L-48P\nSystem serial number : JAE111\n";
    let target_text = "Switch uplink\nCisco IOS XE Software Version 17.6.1\n\
                       Model number : C9200L-48P\n";

    let kw = discoverer.discover(reference_text).expect("keyword");
    assert_eq!(kw, "Switch");
    let compiled = CompiledFieldTree::for_keyword(&template, kw).expect("compiles");

    let reference = compiled.extract(reference_text, false);
    let target = compiled.extract(target_text, false);
    assert!(
        flatten_leaves(&reference).iter().all(|v| !v.is_not_found()),
        "reference should be complete"
    );

    let result = compare(&reference, &target);
    assert_eq!(result.mismatches["Version"], Value::from("17.6.1"));
    let hardware = result.mismatches["Hardware"].as_map().expect("nested deviations");
    assert_eq!(hardware["Serial"], Value::from(NOT_FOUND));
    let matched = result.matches["Hardware"].as_map().expect("nested matches");
    assert_eq!(matched["Model"], Value::from("C9200L-48P"));
    assert_eq!(flatten_leaves(&result.mismatches).len(), 2);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn unknown_text_falls_back_to_wildcard() {
    let template = device_template();
    let discoverer = Discoverer::from_template(&template).expect("keywords compile");
    let text = "appliance Version 4.2";
    let kw = discoverer.discover(text).expect("wildcard");
    assert_eq!(kw, "*");
    let parsed = extract(text, &template, kw, true).expect("extracts");
    assert_eq!(parsed["Generic Version"], Value::from("4.2"));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn collapse_only_changes_unmatched_leaves() {
    let template = device_template();
    let compiled = CompiledFieldTree::for_keyword(&template, "Switch").expect("compiles");
    let text = "Software Version 9.9\nModel number : X1\n";

    let with_null = compiled.extract_raw(text, true);
    let with_sentinel = compiled.extract_raw(text, false);

    fn same_shape(a: &Tree, b: &Tree) {
        assert_eq!(a.keys().collect::<Vec<_>>(), b.keys().collect::<Vec<_>>());
        for (key, left) in a {
            match (left, &b[key]) {
                (Value::Map(l), Value::Map(r)) => same_shape(l, r),
                (Value::Null, right) => assert!(right.is_not_found()),
                (left, right) => assert_eq!(left, right),
            }
        }
    }
    same_shape(&with_null, &with_sentinel);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn self_comparison_matches_pruned_tree() {
    let template = device_template();
    let text = "Switch\nSoftware Version 1\n";
    let parsed = CompiledFieldTree::for_keyword(&template, "Switch")
        .expect("compiles")
        .extract_raw(text, true);
    let result = compare(&parsed, &parsed);
    assert_eq!(result.matches, prune(parsed));
    assert!(result.mismatches.is_empty());
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn loads_yaml_and_json_files_identically() {
    let dir = tempfile::tempdir().expect("tempdir");
    let yaml_path = dir.path().join("patterns.yaml");
    let json_path = dir.path().join("patterns.JSON");

    std::fs::write(&yaml_path, DEVICE_YAML).expect("write yaml");
    let as_json = serde_json::to_string_pretty(&device_template()).expect("serialize");
    std::fs::write(&json_path, as_json).expect("write json");

    let from_yaml = Template::load(&yaml_path).expect("yaml loads");
    let from_json = Template::load(&json_path).expect("json loads");
    assert_eq!(from_yaml, from_json);
    assert_eq!(
        from_json.keywords().collect::<Vec<_>>(),
        vec!["*", "Dev", "Switch"]
    );
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn load_failures_are_template_errors() {
    let dir = tempfile::tempdir().expect("tempdir");

    let missing = dir.path().join("missing.yaml");
    assert!(matches!(
        Template::load(&missing),
        Err(TemplateError::Io { .. })
    ));

    let unsupported = dir.path().join("patterns.ini");
    std::fs::write(&unsupported, "[Dev]").expect("write");
    assert!(matches!(
        Template::load(&unsupported),
        Err(TemplateError::UnsupportedFormat(_))
    ));

    let scalar = dir.path().join("scalar.yml");
    std::fs::write(&scalar, "42\n").expect("write");
    assert!(matches!(
        Template::load(&scalar),
        Err(TemplateError::NotAMapping)
    ));
}
