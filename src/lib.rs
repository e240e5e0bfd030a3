//! twig-generator scaffolds Twig templates for content entity view modes.
//! It reads field metadata from a site manifest and expands a base template
//! into one template per entity type, bundle and view mode.

/// Command-line interface module
pub mod cli;

/// Generator settings and entity type associations
/// Supports JSON and YAML formats (twig_generator.json, .yml, .yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Excluded field names
pub mod exclude;

/// Field descriptors consumed by the synthesizer
pub mod field;

/// Logger initialization
pub mod logger;

/// Entity types, bundles, field definitions and view displays of a site
pub mod manifest;

/// Generation orchestration: field resolution, naming and file output
pub mod processor;

/// MiniJinja rendering of destination file names
pub mod renderer;

/// Template field synthesis
pub mod synthesizer;
