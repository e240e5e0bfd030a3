//! Generation orchestration.
//! Walks the configured entity types, resolves the ordered field list of every
//! (bundle, view mode) pair from the site manifest, synthesizes the templates
//! and writes them to the destination directories.
//!
//! An entity type is the unit of work: a failure while handling one is logged
//! and counted, and the remaining entity types are still processed.

use crate::config::{Config, EntityTypeConfig};
use crate::error::{Error, Result};
use crate::exclude::ExcludedFields;
use crate::field::FieldDescriptor;
use crate::manifest::{BundleInfo, SiteManifest};
use crate::renderer::TemplateRenderer;
use crate::synthesizer::{synthesize, SynthesisOptions};
use indexmap::{IndexMap, IndexSet};
use log::{debug, error, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// One synthesized template waiting to be written.
#[derive(Debug)]
pub struct GeneratedFile {
    pub bundle: String,
    pub view_mode: String,
    pub target: PathBuf,
    pub content: String,
}

/// Everything produced for one entity type.
#[derive(Debug)]
pub struct EntityTypeOutput {
    pub entity_type: String,
    pub destination: PathBuf,
    pub files: Vec<GeneratedFile>,
}

/// Files written (or planned, for a dry run) for one entity type.
#[derive(Debug)]
pub struct EntityTypeReport {
    pub entity_type: String,
    pub destination: PathBuf,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Default)]
pub struct GenerationReport {
    pub entity_types: Vec<EntityTypeReport>,
    pub failed: usize,
}

/// Checks that a rendered file name stays inside the destination directory.
pub fn is_file_name_valid(file_name: &str) -> bool {
    !file_name.trim().is_empty()
        && !file_name.contains('/')
        && !file_name.contains('\\')
        && file_name != "."
        && file_name != ".."
}

/// Renders the destination file name of a (entity type, bundle, view mode) triple.
///
/// # Errors
/// * `Error::MinijinjaError` if the pattern fails to render
/// * `Error::InvalidFileNameError` if the rendered name is empty or contains a path separator
pub fn destination_file_name(
    renderer: &dyn TemplateRenderer,
    pattern: &str,
    entity_type: &str,
    bundle: &str,
    view_mode: &str,
) -> Result<String> {
    let context = serde_json::json!({
        "entity_type": entity_type,
        "bundle": bundle,
        "view_mode": view_mode,
    });
    let file_name = renderer.render(pattern, &context)?;
    if !is_file_name_valid(&file_name) {
        return Err(Error::InvalidFileNameError { file_name });
    }
    Ok(file_name)
}

/// Resolves the ordered field descriptors shown by `view_mode` of a bundle.
///
/// Returns `None` when the bundle has no display for `view_mode`. Components
/// without a field definition are skipped with a warning, base fields and
/// excluded fields are skipped silently.
pub fn collect_fields(
    entity_type_id: &str,
    bundle_id: &str,
    bundle: &BundleInfo,
    view_mode: &str,
    excluded: &ExcludedFields,
) -> Option<Vec<FieldDescriptor>> {
    let components = bundle.ordered_components(view_mode)?;

    let mut fields = Vec::with_capacity(components.len());
    for name in components {
        if excluded.is_excluded(name) {
            debug!("Excluding field '{}' from {}.{}", name, entity_type_id, bundle_id);
            continue;
        }
        let Some(definition) = bundle.fields.get(name) else {
            warn!("Field has no definition ({}.{}): {}", entity_type_id, bundle_id, name);
            continue;
        };
        if definition.base_field {
            debug!("Skipping base field '{}' of {}.{}", name, entity_type_id, bundle_id);
            continue;
        }
        match FieldDescriptor::new(
            name,
            &definition.field_type,
            definition.cardinality,
            definition.required,
        ) {
            Ok(field) => fields.push(field),
            Err(e) => warn!("Skipping field '{}' of {}.{}: {}", name, entity_type_id, bundle_id, e),
        }
    }
    Some(fields)
}

/// Writes the files of one entity type, creating the destination directory if needed.
///
/// Returns the written paths and the number of files that could not be written.
///
/// # Errors
/// * `Error::DestinationError` if the destination directory cannot be created
pub fn write_output(output: &EntityTypeOutput) -> Result<(Vec<PathBuf>, usize)> {
    fs::create_dir_all(&output.destination).map_err(|source| Error::DestinationError {
        destination: output.destination.display().to_string(),
        source,
    })?;

    let mut written = Vec::with_capacity(output.files.len());
    let mut failed = 0;
    for file in &output.files {
        debug!("Writing file: {}", file.target.display());
        match fs::write(&file.target, &file.content) {
            Ok(()) => written.push(file.target.clone()),
            Err(e) => {
                error!("Could not write '{}': {}", file.target.display(), e);
                failed += 1;
            }
        }
    }
    Ok((written, failed))
}

pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    config: &'a Config,
    manifest: &'a SiteManifest,
    options: SynthesisOptions,
}

impl<'a> Processor<'a> {
    /// # Errors
    /// * `Error::ExcludePatternError` if the configured exclusions do not compile
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        config: &'a Config,
        manifest: &'a SiteManifest,
    ) -> Result<Self> {
        let options = config.synthesis_options()?;
        Ok(Self { renderer, config, manifest, options })
    }

    fn selected_bundles<'m>(
        &self,
        entity_type_id: &str,
        available: &'m IndexMap<String, BundleInfo>,
        selection: Option<&[String]>,
    ) -> Vec<(&'m str, &'m BundleInfo)> {
        let Some(selection) = selection else {
            return available.iter().map(|(id, info)| (id.as_str(), info)).collect();
        };

        let unique: IndexSet<&str> = selection.iter().map(String::as_str).collect();
        unique
            .into_iter()
            .filter_map(|bundle_id| match available.get_key_value(bundle_id) {
                Some((id, info)) => Some((id.as_str(), info)),
                None => {
                    warn!("Bundle '{}' of '{}' is not in the manifest", bundle_id, entity_type_id);
                    None
                }
            })
            .collect()
    }

    /// Synthesizes every template of one entity type without writing anything.
    ///
    /// Returns `Ok(None)` when there is nothing to do for the entity type.
    ///
    /// # Errors
    /// * `Error::MissingTemplateError` if no base template is configured
    /// * `Error::TemplateReadError` if the base template cannot be read
    /// * `Error::InvalidFileNameError` or `Error::MinijinjaError` if the file name
    ///   pattern is unusable
    pub fn process(
        &self,
        entity_type_id: &str,
        entity_config: &EntityTypeConfig,
    ) -> Result<Option<EntityTypeOutput>> {
        let Some(entity_info) = self.manifest.entity_types.get(entity_type_id) else {
            warn!("Entity type '{}' is not in the manifest, skipping", entity_type_id);
            return Ok(None);
        };
        if !entity_info.fieldable {
            warn!("Entity type '{}' is not fieldable, skipping", entity_type_id);
            return Ok(None);
        }

        let bundles = self.selected_bundles(
            entity_type_id,
            &entity_info.bundles,
            entity_config.bundles.as_deref(),
        );
        if bundles.is_empty() {
            debug!("No bundle selected for '{}'", entity_type_id);
            return Ok(None);
        }

        debug!("Processing {} ({})", entity_info.label_or(entity_type_id), entity_type_id);
        let template_path = entity_config.template.as_ref().ok_or_else(|| {
            Error::MissingTemplateError { entity_type: entity_type_id.to_string() }
        })?;
        let base_template =
            fs::read_to_string(template_path).map_err(|source| Error::TemplateReadError {
                template: template_path.display().to_string(),
                source,
            })?;

        let destination = entity_config.destination_dir(entity_type_id);
        let mut files = Vec::new();
        for (bundle_id, bundle) in bundles {
            for view_mode in bundle.view_modes(self.config.generate_all_view_modes) {
                let Some(fields) = collect_fields(
                    entity_type_id,
                    bundle_id,
                    bundle,
                    &view_mode,
                    &self.options.excluded_fields,
                ) else {
                    warn!(
                        "No '{}' display for {}.{}, skipping",
                        view_mode, entity_type_id, bundle_id
                    );
                    continue;
                };

                let file_name = destination_file_name(
                    self.renderer,
                    &self.config.filename_template,
                    entity_type_id,
                    bundle_id,
                    &view_mode,
                )?;
                let content = synthesize(&base_template, &fields, &self.options);
                files.push(GeneratedFile {
                    bundle: bundle_id.to_string(),
                    view_mode,
                    target: destination.join(file_name),
                    content,
                });
            }
        }

        Ok(Some(EntityTypeOutput {
            entity_type: entity_type_id.to_string(),
            destination,
            files,
        }))
    }

    /// Processes every configured entity type in order.
    ///
    /// With `dry_run` the target paths are reported but nothing is written.
    pub fn generate(&self, dry_run: bool) -> GenerationReport {
        let mut report = GenerationReport::default();

        for (entity_type_id, entity_config) in &self.config.entity_types {
            let output = match self.process(entity_type_id, entity_config) {
                Ok(Some(output)) => output,
                Ok(None) => continue,
                Err(e) => {
                    error!("{}", e);
                    report.failed += 1;
                    continue;
                }
            };

            let files = if dry_run {
                output.files.iter().map(|file| file.target.clone()).collect()
            } else {
                match write_output(&output) {
                    Ok((written, failed)) => {
                        report.failed += failed;
                        written
                    }
                    Err(e) => {
                        error!("{}", e);
                        report.failed += 1;
                        continue;
                    }
                }
            };

            report.entity_types.push(EntityTypeReport {
                entity_type: output.entity_type,
                destination: output.destination,
                files,
            });
        }

        report
    }
}

/// Reads a base template for the `synthesize` command.
pub fn read_template<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| Error::TemplateReadError {
        template: path.display().to_string(),
        source,
    })
}
