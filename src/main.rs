//! twig-generator's main application entry point.
//! Parses the command line and dispatches to template generation or
//! single template synthesis.

use std::path::Path;

use twig_generator::{
    cli::{get_args, Args, Command, SynthesisArgs},
    config::{get_config, Config},
    error::{default_error_handler, Error, Result},
    field::parse_fields,
    logger::init_logger,
    manifest::load_manifest,
    processor::{read_template, Processor},
    renderer::MiniJinjaRenderer,
    synthesizer::synthesize,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Generate { config, manifest, synthesis, default_view_mode_only, dry_run } => {
            run_generate(&config, &manifest, &synthesis, default_view_mode_only, dry_run)
        }
        Command::Synthesize { template, fields, synthesis, output } => {
            run_synthesize(&template, &fields, &synthesis, output.as_deref())
        }
    }
}

/// Generates the templates of every configured entity type.
///
/// # Flow
/// 1. Loads the configuration and applies command line overrides
/// 2. Loads the site manifest
/// 3. Synthesizes and writes the templates of each entity type
/// 4. Reports what was written, failing if any unit of work failed
fn run_generate(
    config_path: &Path,
    manifest_path: &Path,
    synthesis: &SynthesisArgs,
    default_view_mode_only: bool,
    dry_run: bool,
) -> Result<()> {
    let mut config = get_config(config_path)?;
    config.apply(&synthesis.overrides(default_view_mode_only));
    let manifest = load_manifest(manifest_path)?;

    let renderer = MiniJinjaRenderer::new();
    let processor = Processor::new(&renderer, &config, &manifest)?;
    let report = processor.generate(dry_run);

    let action = if dry_run { "Would write" } else { "Written" };
    for entity_type in &report.entity_types {
        for file in &entity_type.files {
            println!("{}: '{}'", action, file.display());
        }
        if !dry_run {
            println!(
                "Templates for '{}' have been created in {}.",
                entity_type.entity_type,
                entity_type.destination.display()
            );
        }
    }

    if report.failed > 0 {
        return Err(Error::GenerationFailed { failed: report.failed });
    }
    Ok(())
}

/// Expands one base template and prints or writes the result.
fn run_synthesize(
    template_path: &Path,
    fields_path: &Path,
    synthesis: &SynthesisArgs,
    output: Option<&Path>,
) -> Result<()> {
    let mut config = Config::default();
    config.apply(&synthesis.overrides(false));
    let options = config.synthesis_options()?;

    let base_template = read_template(template_path)?;
    let fields = parse_fields(&std::fs::read_to_string(fields_path)?)?;
    if fields.is_empty() {
        log::warn!("No fields given in '{}'", fields_path.display());
    }

    let content = synthesize(&base_template, &fields, &options);
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
            println!("Written: '{}'", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
