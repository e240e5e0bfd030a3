//! Site manifest: the entity types, bundles, field definitions and view
//! displays of a site, exported as plain JSON or YAML.

use crate::constants::DEFAULT_VIEW_MODE;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::Path;

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct SiteManifest {
    #[serde(default)]
    pub entity_types: IndexMap<String, EntityTypeInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EntityTypeInfo {
    #[serde(default)]
    pub label: Option<String>,
    /// Only fieldable entity types get templates
    #[serde(default = "default_true")]
    pub fieldable: bool,
    #[serde(default)]
    pub bundles: IndexMap<String, BundleInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BundleInfo {
    /// Field definitions keyed by machine name
    #[serde(default)]
    pub fields: IndexMap<String, FieldDefinition>,
    /// View displays keyed by view mode
    #[serde(default)]
    pub displays: IndexMap<String, ViewDisplay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "type")]
    pub field_type: String,
    pub cardinality: i64,
    #[serde(default)]
    pub required: bool,
    /// Base fields (title, uid, ...) are defined by the entity type itself
    /// and never printed through `content`.
    #[serde(default)]
    pub base_field: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewDisplay {
    #[serde(default = "default_true")]
    pub status: bool,
    /// Visible components of the display keyed by name
    #[serde(default)]
    pub content: IndexMap<String, DisplayComponent>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct DisplayComponent {
    #[serde(default)]
    pub weight: i64,
}

impl EntityTypeInfo {
    /// Display label, falling back to the machine name.
    pub fn label_or<'a>(&'a self, entity_type_id: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(entity_type_id)
    }
}

impl BundleInfo {
    /// View modes to generate for this bundle.
    ///
    /// With `all`, `default` comes first followed by every other enabled display
    /// in manifest order. Otherwise only `default` is returned.
    pub fn view_modes(&self, all: bool) -> Vec<String> {
        let mut view_modes = vec![DEFAULT_VIEW_MODE.to_string()];
        if all {
            view_modes.extend(
                self.displays
                    .iter()
                    .filter(|(name, display)| name.as_str() != DEFAULT_VIEW_MODE && display.status)
                    .map(|(name, _)| name.clone()),
            );
        }
        view_modes
    }

    /// Names of the visible components of `view_mode`, sorted by weight.
    ///
    /// The sort is stable, so components with equal weight keep manifest order.
    pub fn ordered_components(&self, view_mode: &str) -> Option<Vec<&str>> {
        let display = self.displays.get(view_mode)?;
        let mut components: Vec<(&str, i64)> =
            display.content.iter().map(|(name, c)| (name.as_str(), c.weight)).collect();
        components.sort_by_key(|(_, weight)| *weight);
        Some(components.into_iter().map(|(name, _)| name).collect())
    }
}

/// Parses manifest content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ManifestError` if the content is neither valid JSON nor valid YAML
pub fn parse_manifest(content: &str) -> Result<SiteManifest> {
    match serde_json::from_str(content) {
        Ok(manifest) => Ok(manifest),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ManifestError(format!("Invalid manifest format: {}", e))),
    }
}

/// Reads and parses the manifest at `path`.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<SiteManifest> {
    let path = path.as_ref();
    debug!("Loading site manifest from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::ManifestError(format!("Could not read '{}': {}", path.display(), e))
    })?;
    parse_manifest(&content)
}
