//! Error handling for twig-generator.
//! Defines the error type and result alias used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for generator operations.
///
/// Every failure the generator can report is one of these variants. Most of them
/// are fatal only to the unit of work that raised them; see `processor` for how
/// they are collected per entity type.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Errors while loading or interpreting the generator configuration
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Errors while loading or interpreting the site manifest
    #[error("Manifest error: {0}.")]
    ManifestError(String),

    /// Represents validation failures in field data
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Represents errors in the excluded field name patterns
    #[error("Exclude pattern error: {0}.")]
    ExcludePatternError(String),

    /// Errors raised by MiniJinja while rendering file names
    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// The base template of an entity type could not be read
    #[error("Could not read the base template '{template}': {source}.")]
    TemplateReadError { template: String, source: io::Error },

    /// The destination directory of an entity type could not be prepared
    #[error("Could not prepare the directory '{destination}': {source}.")]
    DestinationError { destination: String, source: io::Error },

    /// An entity type is configured without a base template path
    #[error("No default template set for entity type '{entity_type}'.")]
    MissingTemplateError { entity_type: String },

    /// A rendered destination file name is empty or escapes its directory
    #[error("Invalid destination file name '{file_name}'.")]
    InvalidFileNameError { file_name: String },

    /// Some units of work failed while others completed
    #[error("Generation finished with {failed} failure(s).")]
    GenerationFailed { failed: usize },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
