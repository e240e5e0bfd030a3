//! Template field synthesis.
//! Turns a base template and an ordered list of field descriptors into a
//! template that prints every field explicitly and documents them in the
//! leading comment block.
//!
//! Everything here is pure text surgery: anchors that are not found are
//! simply left alone, and the input text is never modified in place.

use crate::exclude::ExcludedFields;
use crate::field::FieldDescriptor;
use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// Indent used for generated include lines when none can be detected.
pub const DEFAULT_INDENT: &str = "  ";

/// Marker printing every remaining field of the entity.
pub const CONTENT_PLACEHOLDER: &str = "{{ content }}";

/// Phrase identifying the line the field documentation is inserted above.
pub const COMMENT_ANCHOR: &str = "Available variables:";

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\n\s+{}", regex::escape(CONTENT_PLACEHOLDER)))
        .expect("valid placeholder regex")
});

// Same line as PLACEHOLDER_RE, capturing only the whitespace after the last newline.
static INDENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\n([^\S\r\n]+){}", regex::escape(CONTENT_PLACEHOLDER)))
        .expect("valid indent regex")
});

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i).*{}", regex::escape(COMMENT_ANCHOR))).expect("valid anchor regex")
});

/// Options controlling a synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    /// Document the fields in the template's comment block
    pub add_comment: bool,
    /// Replace the `{{ content }}` placeholder with one include per field
    pub replace_content: bool,
    /// Replace every placeholder instead of only the first one
    pub replace_all_placeholders: bool,
    /// Indent of the generated include lines, detected from the template when unset
    pub indent: Option<String>,
    /// Fields left out of both the comment and the includes
    pub excluded_fields: ExcludedFields,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            add_comment: true,
            replace_content: true,
            replace_all_placeholders: false,
            indent: None,
            excluded_fields: ExcludedFields::none(),
        }
    }
}

/// Comment and include text computed for a list of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldsInfo {
    pub comment: String,
    pub fields: String,
}

/// Returns the indentation of the first `{{ content }}` line, or [`DEFAULT_INDENT`].
pub fn derive_indent(base_template: &str) -> String {
    INDENT_RE
        .captures(base_template)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_INDENT.to_string())
}

fn field_comment(field: &FieldDescriptor) -> String {
    let line_start = " * ";
    let mut comment = format!("{line_start}- {}:\n", field.name());
    comment.push_str(&format!("{line_start}  | type: {}\n", field.field_type()));
    comment.push_str(&format!("{line_start}  | cardinality: {}\n", field.cardinality()));
    if field.is_required() {
        comment.push_str(&format!("{line_start}  | required\n"));
    }
    comment
}

fn field_include(field: &FieldDescriptor, indent: &str) -> String {
    format!(
        "\n{indent}{{{{ content.{} }}}} {{# {}(max: {}) #}}",
        field.name(),
        field.field_type(),
        field.cardinality()
    )
}

fn fields_info_with_indent<'a, I>(fields: I, options: &SynthesisOptions, indent: &str) -> FieldsInfo
where
    I: IntoIterator<Item = &'a FieldDescriptor>,
{
    let mut info = FieldsInfo::default();
    for field in fields {
        if options.add_comment {
            info.comment.push_str(&field_comment(field));
        }
        if options.replace_content {
            info.fields.push_str(&field_include(field, indent));
        }
    }
    info
}

/// Builds the comment block and include lines for `fields`, in order.
///
/// Fields are expected to be filtered already; duplicates produce duplicate lines.
/// Uses `options.indent`, or [`DEFAULT_INDENT`] when it is unset.
pub fn build_fields_info<'a, I>(fields: I, options: &SynthesisOptions) -> FieldsInfo
where
    I: IntoIterator<Item = &'a FieldDescriptor>,
{
    let indent = options.indent.as_deref().unwrap_or(DEFAULT_INDENT);
    fields_info_with_indent(fields, options, indent)
}

/// Applies precomputed field information to a base template.
///
/// 1. with `replace_content`, the first placeholder line (every one with
///    `replace_all_placeholders`) is replaced by `info.fields`
/// 2. with `add_comment`, the field documentation is inserted right before the
///    line containing `Available variables:`
pub fn render_template(base_template: &str, info: &FieldsInfo, options: &SynthesisOptions) -> String {
    let mut content = base_template.to_string();

    if options.replace_content {
        let limit = if options.replace_all_placeholders { 0 } else { 1 };
        content = PLACEHOLDER_RE
            .replacen(&content, limit, NoExpand(&info.fields))
            .into_owned();
    }

    if options.add_comment {
        if let Some(start) = ANCHOR_RE.find(&content).map(|m| m.start()) {
            let header = format!(
                " * Available fields:\n *   You can print them like this: {{{{ content.[fieldname] }}}}\n{} *\n",
                info.comment
            );
            content.insert_str(start, &header);
        }
    }

    content
}

/// Synthesizes the final template text for `fields`.
///
/// Excluded fields are dropped first, then the indent is resolved from the
/// options or detected from `base_template`.
pub fn synthesize(base_template: &str, fields: &[FieldDescriptor], options: &SynthesisOptions) -> String {
    let kept = options.excluded_fields.filter(fields);
    let indent = options
        .indent
        .clone()
        .unwrap_or_else(|| derive_indent(base_template));
    let info = fields_info_with_indent(kept, options, &indent);
    render_template(base_template, &info, options)
}
