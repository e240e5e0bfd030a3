use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use twig_generator::config::{get_config, load_config, parse_config, Config, ConfigOverrides};
use twig_generator::constants::CONFIG_FILES;
use twig_generator::error::Error;
use twig_generator::renderer::DEFAULT_FILENAME_TEMPLATE;

#[test]
fn test_defaults() {
    let config = parse_config("{}").unwrap();

    assert!(config.add_comment);
    assert!(config.replace_content);
    assert!(config.generate_all_view_modes);
    assert!(!config.replace_all_placeholders);
    assert_eq!(config.excluded_fields, "field_metatags");
    assert_eq!(config.indent, None);
    assert_eq!(config.filename_template, DEFAULT_FILENAME_TEMPLATE);
    assert!(config.entity_types.is_empty());
}

#[test]
fn test_parse_yaml_config() {
    let content = r#"
add_comment: false
excluded_fields: "field_metatags field_seo"
indent: "    "
entity_types:
  node:
    template: templates/node.html.twig
    destination: out/node
    bundles: [article, page]
  paragraph:
    template: templates/paragraph.html.twig
"#;

    let config = parse_config(content).unwrap();

    assert!(!config.add_comment);
    assert!(config.replace_content);
    assert_eq!(config.indent.as_deref(), Some("    "));
    let ids: Vec<&str> = config.entity_types.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["node", "paragraph"]);

    let node = &config.entity_types["node"];
    assert_eq!(node.template, Some(PathBuf::from("templates/node.html.twig")));
    assert_eq!(node.destination_dir("node"), PathBuf::from("out/node"));
    assert_eq!(node.bundles, Some(vec!["article".to_string(), "page".to_string()]));

    let paragraph = &config.entity_types["paragraph"];
    assert_eq!(paragraph.destination_dir("paragraph"), PathBuf::from("modules/templates/paragraph"));
    assert_eq!(paragraph.bundles, None);
}

#[test]
fn test_invalid_config() {
    match parse_config("add_comment: [not, a, bool]") {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("Invalid configuration format")),
        other => panic!("Expected ConfigError, got {:?}", other),
    }
}

#[test]
fn test_apply_overrides() {
    let mut config = Config::default();
    config.apply(&ConfigOverrides {
        no_comment: true,
        no_replace_content: true,
        replace_all: true,
        default_view_mode_only: true,
        indent: Some("\t".to_string()),
        exclude: Some("field_a field_b".to_string()),
    });

    assert!(!config.add_comment);
    assert!(!config.replace_content);
    assert!(config.replace_all_placeholders);
    assert!(!config.generate_all_view_modes);

    let options = config.synthesis_options().unwrap();
    assert_eq!(options.indent.as_deref(), Some("\t"));
    assert!(options.excluded_fields.is_excluded("field_b"));
    assert!(!options.excluded_fields.is_excluded("field_metatags"));
}

#[test]
fn test_empty_overrides_keep_file_values() {
    let mut config = parse_config(r#"{"add_comment": false, "excluded_fields": "field_x"}"#).unwrap();
    config.apply(&ConfigOverrides::default());

    assert!(!config.add_comment);
    assert!(config.replace_content);
    assert_eq!(config.excluded_fields, "field_x");
}

#[test]
fn test_load_config_from_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("twig_generator.yml"), "replace_content: false\n").unwrap();

    let content = load_config(temp_dir.path(), &CONFIG_FILES).unwrap();
    assert_eq!(content, "replace_content: false\n");

    let config = get_config(temp_dir.path()).unwrap();
    assert!(!config.replace_content);
}

#[test]
fn test_json_file_is_preferred() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("twig_generator.json"), r#"{"add_comment": false}"#).unwrap();
    fs::write(temp_dir.path().join("twig_generator.yml"), "add_comment: true\n").unwrap();

    let config = get_config(temp_dir.path()).unwrap();
    assert!(!config.add_comment);
}

#[test]
fn test_load_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.yaml");
    fs::write(&path, "generate_all_view_modes: false\n").unwrap();

    let config = get_config(&path).unwrap();
    assert!(!config.generate_all_view_modes);
}

#[test]
fn test_missing_config() {
    let temp_dir = TempDir::new().unwrap();

    match load_config(temp_dir.path(), &CONFIG_FILES) {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("twig_generator.json")),
        other => panic!("Expected ConfigError, got {:?}", other),
    }
    assert!(get_config(temp_dir.path().join("missing.yml")).is_err());
}
