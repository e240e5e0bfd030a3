//! Configuration handling for twig-generator.
//! Loads the generator settings and the entity type associations (which base
//! template to start from, where to write the results, which bundles to
//! generate) from a JSON or YAML file.

use crate::constants::{CONFIG_FILES, DEFAULT_DESTINATION_ROOT};
use crate::error::{Error, Result};
use crate::exclude::{ExcludedFields, DEFAULT_EXCLUDED_FIELDS};
use crate::renderer::DEFAULT_FILENAME_TEMPLATE;
use crate::synthesizer::SynthesisOptions;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_true() -> bool {
    true
}

fn default_excluded_fields() -> String {
    DEFAULT_EXCLUDED_FIELDS.to_string()
}

fn default_filename_template() -> String {
    DEFAULT_FILENAME_TEMPLATE.to_string()
}

/// Main configuration structure.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Add the fields to the template's comment block
    #[serde(default = "default_true")]
    pub add_comment: bool,

    /// Replace `{{ content }}` with one include per field
    #[serde(default = "default_true")]
    pub replace_content: bool,

    /// Replace every `{{ content }}` instead of the first one only
    #[serde(default)]
    pub replace_all_placeholders: bool,

    /// Generate every enabled view mode of a bundle, not only `default`
    #[serde(default = "default_true")]
    pub generate_all_view_modes: bool,

    /// Space separated machine names (or glob patterns) to leave out
    #[serde(default = "default_excluded_fields")]
    pub excluded_fields: String,

    /// Indent of the generated include lines, detected from the base template if unset
    #[serde(default)]
    pub indent: Option<String>,

    /// MiniJinja pattern for the generated file names
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Entity types to generate templates for, in generation order
    #[serde(default)]
    pub entity_types: IndexMap<String, EntityTypeConfig>,
}

/// Per entity type settings.
#[derive(Debug, Default, Deserialize)]
pub struct EntityTypeConfig {
    /// Base template every bundle of this entity type starts from
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Directory the generated files are written to
    #[serde(default)]
    pub destination: Option<PathBuf>,

    /// Bundles to generate; all bundles of the manifest when unset
    #[serde(default)]
    pub bundles: Option<Vec<String>>,
}

impl EntityTypeConfig {
    /// Returns the destination directory, `modules/templates/<entity_type>` by default.
    pub fn destination_dir(&self, entity_type_id: &str) -> PathBuf {
        self.destination
            .clone()
            .unwrap_or_else(|| Path::new(DEFAULT_DESTINATION_ROOT).join(entity_type_id))
    }
}

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub no_comment: bool,
    pub no_replace_content: bool,
    pub replace_all: bool,
    pub default_view_mode_only: bool,
    pub indent: Option<String>,
    pub exclude: Option<String>,
}

impl Config {
    /// Applies command line overrides on top of the loaded settings.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if overrides.no_comment {
            self.add_comment = false;
        }
        if overrides.no_replace_content {
            self.replace_content = false;
        }
        if overrides.replace_all {
            self.replace_all_placeholders = true;
        }
        if overrides.default_view_mode_only {
            self.generate_all_view_modes = false;
        }
        if let Some(indent) = &overrides.indent {
            self.indent = Some(indent.clone());
        }
        if let Some(exclude) = &overrides.exclude {
            self.excluded_fields = exclude.clone();
        }
    }

    /// Builds the synthesizer options described by this configuration.
    ///
    /// # Errors
    /// * `Error::ExcludePatternError` if `excluded_fields` holds an invalid pattern
    pub fn synthesis_options(&self) -> Result<SynthesisOptions> {
        Ok(SynthesisOptions {
            add_comment: self.add_comment,
            replace_content: self.replace_content,
            replace_all_placeholders: self.replace_all_placeholders,
            indent: self.indent.clone(),
            excluded_fields: ExcludedFields::parse(&self.excluded_fields)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            add_comment: true,
            replace_content: true,
            replace_all_placeholders: false,
            generate_all_view_modes: true,
            excluded_fields: default_excluded_fields(),
            indent: None,
            filename_template: default_filename_template(),
            entity_types: IndexMap::new(),
        }
    }
}

/// Reads the configuration content.
///
/// `config_path` is either the configuration file itself or a directory, in
/// which case the first existing file of `config_files` is used.
///
/// # Errors
/// * `Error::ConfigError` if no configuration file exists
pub fn load_config<P: AsRef<Path>>(config_path: P, config_files: &[&str]) -> Result<String> {
    let config_path = config_path.as_ref();
    if config_path.is_file() {
        debug!("Loading configuration from {}", config_path.display());
        return std::fs::read_to_string(config_path).map_err(Error::IoError);
    }

    if config_path.is_dir() {
        for file in config_files {
            let path = config_path.join(file);
            if path.exists() {
                debug!("Loading configuration from {}", path.display());
                return std::fs::read_to_string(&path).map_err(Error::IoError);
            }
        }
    }

    Err(Error::ConfigError(format!(
        "No configuration file found at '{}' (tried: {})",
        config_path.display(),
        config_files.join(", ")
    )))
}

/// Parses the configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
pub fn parse_config(content: &str) -> Result<Config> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {}", e))),
    }
}

/// Loads and parses the configuration found at `config_path`.
pub fn get_config<P: AsRef<Path>>(config_path: P) -> Result<Config> {
    let content = load_config(config_path, &CONFIG_FILES)?;
    parse_config(&content)
}
