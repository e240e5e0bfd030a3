//! Common constants used throughout twig-generator.

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] =
    ["twig_generator.json", "twig_generator.yml", "twig_generator.yaml"];

/// Parent of the per entity type destination directories
pub const DEFAULT_DESTINATION_ROOT: &str = "modules/templates";

/// View mode every bundle has
pub const DEFAULT_VIEW_MODE: &str = "default";
