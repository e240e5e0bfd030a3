//! MiniJinja rendering for destination file names.
//! File names are produced from a small pattern so sites with their own
//! theme suggestion conventions can change them without touching the code.
use crate::error::{Error, Result};
use minijinja::Environment;

/// Pattern producing `<entity>--<bundle>[--<view-mode>].html.twig`.
pub const DEFAULT_FILENAME_TEMPLATE: &str = "{{ entity_type }}--{{ bundle | hyphenate }}\
{% if view_mode != \"default\" %}--{{ view_mode | hyphenate }}{% endif %}.html.twig";

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// Maps machine name underscores to the hyphens Twig suggestions use.
pub fn hyphenate(value: String) -> String {
    value.replace('_', "-")
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with the `hyphenate` filter registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_filter("hyphenate", hyphenate);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the template does not parse or fails to render
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let mut env = self.env.clone();
        env.add_template_owned("temp", template.to_string()).map_err(Error::MinijinjaError)?;

        let tmpl = env.get_template("temp").map_err(Error::MinijinjaError)?;

        tmpl.render(context).map_err(Error::MinijinjaError)
    }
}
