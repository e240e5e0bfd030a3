use twig_generator::error::Error;
use twig_generator::processor::{destination_file_name, is_file_name_valid};
use twig_generator::renderer::{
    hyphenate, MiniJinjaRenderer, TemplateRenderer, DEFAULT_FILENAME_TEMPLATE,
};

#[test]
fn test_default_view_mode_name() {
    let renderer = MiniJinjaRenderer::new();

    let name =
        destination_file_name(&renderer, DEFAULT_FILENAME_TEMPLATE, "article", "blog_post", "default")
            .unwrap();

    assert_eq!(name, "article--blog-post.html.twig");
}

#[test]
fn test_view_mode_suffix() {
    let renderer = MiniJinjaRenderer::new();

    let teaser =
        destination_file_name(&renderer, DEFAULT_FILENAME_TEMPLATE, "article", "blog_post", "teaser")
            .unwrap();
    let search = destination_file_name(
        &renderer,
        DEFAULT_FILENAME_TEMPLATE,
        "node",
        "page",
        "search_index",
    )
    .unwrap();

    assert_eq!(teaser, "article--blog-post--teaser.html.twig");
    assert_eq!(search, "node--page--search-index.html.twig");
}

#[test]
fn test_entity_type_keeps_underscores() {
    let renderer = MiniJinjaRenderer::new();

    let name = destination_file_name(
        &renderer,
        DEFAULT_FILENAME_TEMPLATE,
        "taxonomy_term",
        "tags",
        "default",
    )
    .unwrap();

    assert_eq!(name, "taxonomy_term--tags.html.twig");
}

#[test]
fn test_custom_pattern() {
    let renderer = MiniJinjaRenderer::new();

    let name = destination_file_name(
        &renderer,
        "{{ bundle | hyphenate }}.{{ view_mode }}.twig",
        "node",
        "landing_page",
        "full",
    )
    .unwrap();

    assert_eq!(name, "landing-page.full.twig");
}

#[test]
fn test_invalid_file_names_are_rejected() {
    let renderer = MiniJinjaRenderer::new();

    match destination_file_name(&renderer, "{{ entity_type }}/{{ bundle }}", "node", "page", "default") {
        Err(Error::InvalidFileNameError { file_name }) => assert_eq!(file_name, "node/page"),
        other => panic!("Expected InvalidFileNameError, got {:?}", other),
    }
    assert!(destination_file_name(&renderer, "{{ missing }}", "node", "page", "default").is_err());
    assert!(destination_file_name(&renderer, "{% if %}", "node", "page", "default").is_err());
}

#[test]
fn test_is_file_name_valid() {
    assert!(is_file_name_valid("node--page.html.twig"));
    assert!(!is_file_name_valid(""));
    assert!(!is_file_name_valid("  "));
    assert!(!is_file_name_valid("a/b.html.twig"));
    assert!(!is_file_name_valid("a\\b.html.twig"));
    assert!(!is_file_name_valid(".."));
}

#[test]
fn test_minijinja_renderer() {
    let renderer = MiniJinjaRenderer::new();
    let context = serde_json::json!({ "name": "field_tags" });

    let result = renderer.render("{{ name | hyphenate | upper }}", &context).unwrap();

    assert_eq!(result, "FIELD-TAGS");
    assert_eq!(hyphenate("a_b_c".to_string()), "a-b-c");
}
