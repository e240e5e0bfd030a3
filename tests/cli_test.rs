use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use twig_generator::cli::{Args, Command};

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("twig-generator")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_generate_args() {
    let args = make_args(&["generate", "./config", "./site.yml"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(!parsed.verbose);
    match parsed.command {
        Command::Generate { config, manifest, synthesis, default_view_mode_only, dry_run } => {
            assert_eq!(config, PathBuf::from("./config"));
            assert_eq!(manifest, PathBuf::from("./site.yml"));
            assert!(!synthesis.no_comment);
            assert!(!synthesis.no_replace_content);
            assert!(!synthesis.replace_all);
            assert_eq!(synthesis.indent, None);
            assert_eq!(synthesis.exclude, None);
            assert!(!default_view_mode_only);
            assert!(!dry_run);
        }
        other => panic!("Expected generate command, got {:?}", other),
    }
}

#[test]
fn test_generate_flags() {
    let args = make_args(&[
        "-v",
        "generate",
        "--no-comment",
        "--no-replace-content",
        "--replace-all",
        "--default-view-mode-only",
        "--dry-run",
        "--indent",
        "    ",
        "--exclude",
        "field_metatags field_seo",
        "twig_generator.yml",
        "site.json",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    let Command::Generate { synthesis, default_view_mode_only, dry_run, .. } = parsed.command else {
        panic!("Expected generate command");
    };
    assert!(default_view_mode_only);
    assert!(dry_run);

    let overrides = synthesis.overrides(default_view_mode_only);
    assert!(overrides.no_comment);
    assert!(overrides.no_replace_content);
    assert!(overrides.replace_all);
    assert!(overrides.default_view_mode_only);
    assert_eq!(overrides.indent.as_deref(), Some("    "));
    assert_eq!(overrides.exclude.as_deref(), Some("field_metatags field_seo"));
}

#[test]
fn test_synthesize_args() {
    let args = make_args(&["synthesize", "node.html.twig", "fields.json", "-o", "out/node.html.twig", "--verbose"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    match parsed.command {
        Command::Synthesize { template, fields, output, .. } => {
            assert_eq!(template, PathBuf::from("node.html.twig"));
            assert_eq!(fields, PathBuf::from("fields.json"));
            assert_eq!(output, Some(PathBuf::from("out/node.html.twig")));
        }
        other => panic!("Expected synthesize command, got {:?}", other),
    }
}

#[test]
fn test_synthesize_has_no_view_mode_flag() {
    let args = make_args(&["synthesize", "--default-view-mode-only", "a.twig", "f.json"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_missing_args() {
    assert!(Args::try_parse_from(make_args(&["generate", "./config"])).is_err());
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

#[test]
fn test_too_many_args() {
    let args = make_args(&["generate", "./config", "./site.yml", "extra"]);
    assert!(Args::try_parse_from(args).is_err());
}
