//! Command-line interface implementation for twig-generator.
//! Provides argument parsing and help text formatting using clap.

use crate::config::ConfigOverrides;
use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for twig-generator.
#[derive(Parser, Debug)]
#[command(author, version, about = "twig-generator: scaffold Twig templates for entity view modes", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the templates of every configured entity type
    Generate {
        /// Configuration file, or a directory containing twig_generator.{json,yml,yaml}
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Site manifest describing entity types, bundles, fields and displays
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        #[command(flatten)]
        synthesis: SynthesisArgs,

        /// Generate the default view mode only
        #[arg(long)]
        default_view_mode_only: bool,

        /// Print the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Expand a single base template with the given fields
    Synthesize {
        /// Base template to expand
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// JSON or YAML list of field descriptors
        #[arg(value_name = "FIELDS")]
        fields: PathBuf,

        #[command(flatten)]
        synthesis: SynthesisArgs,

        /// Write the result to this file instead of stdout
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
}

/// Options shared by both commands, overriding the configuration file.
#[derive(ClapArgs, Debug, Default)]
pub struct SynthesisArgs {
    /// Do not document the fields in the template comment
    #[arg(long)]
    pub no_comment: bool,

    /// Keep the {{ content }} placeholder instead of listing the fields
    #[arg(long)]
    pub no_replace_content: bool,

    /// Replace every {{ content }} placeholder, not only the first one
    #[arg(long)]
    pub replace_all: bool,

    /// Indent of the generated field lines (detected from the template by default)
    #[arg(long, value_name = "INDENT")]
    pub indent: Option<String>,

    /// Space separated field names to exclude
    #[arg(long, value_name = "FIELDS", allow_hyphen_values = true)]
    pub exclude: Option<String>,
}

impl SynthesisArgs {
    pub fn overrides(&self, default_view_mode_only: bool) -> ConfigOverrides {
        ConfigOverrides {
            no_comment: self.no_comment,
            no_replace_content: self.no_replace_content,
            replace_all: self.replace_all,
            default_view_mode_only,
            indent: self.indent.clone(),
            exclude: self.exclude.clone(),
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
