use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use procmap::config::{AppConfig, CliConfig, OutputFormat};
use procmap::function_catalog::{EntityFunctionMappings, EntityFunctionsDefinition};
use serde::Serialize;

/// procmap - apply declared modification function overrides to inferred mappings
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Application config file (YAML); environment variables are used otherwise
    #[arg(long, global = true)]
    app_config: Option<PathBuf>,

    /// Output format for printed mappings (yaml or json)
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    /// Let the right-hand declaration replace functions the left one already declares
    #[arg(long, global = true)]
    allow_override: bool,

    /// Default log filter when RUST_LOG is not set
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Configure inferred function mappings with a declared configuration
    Apply {
        /// Inferred insert/update/delete mappings for one entity
        #[arg(long)]
        mapping: PathBuf,
        /// Declared function overrides for the same entity
        #[arg(long)]
        config: PathBuf,
    },
    /// Check two declarations for compatibility and print their merge
    Check {
        #[arg(long)]
        left: PathBuf,
        #[arg(long)]
        right: PathBuf,
    },
}

fn load_app_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.app_config {
        Some(path) => AppConfig::from_yaml_file(path)
            .with_context(|| format!("loading app config {}", path.display()))?,
        None => AppConfig::from_env().context("reading PROCMAP_* environment")?,
    };

    let cli_config = CliConfig::layered(&config, cli.format, cli.allow_override, cli.log.clone());
    config.merge(AppConfig::from_cli(cli_config)?);
    Ok(config)
}

fn print<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn apply(mapping: &Path, declared: &Path, config: &AppConfig) -> anyhow::Result<()> {
    let mut mappings = EntityFunctionMappings::from_yaml_file(mapping)?;
    let definition = EntityFunctionsDefinition::from_yaml_file(declared)?;

    if definition.entity != mappings.entity {
        log::warn!(
            "Declared entity '{}' differs from mapped entity '{}'",
            definition.entity,
            mappings.entity
        );
    }

    definition
        .to_configuration()?
        .configure(&mut mappings)
        .with_context(|| format!("configuring functions for entity '{}'", mappings.entity))?;

    print(&mappings, config.output_format)
}

fn check(left: &Path, right: &Path, config: &AppConfig) -> anyhow::Result<bool> {
    let left_definition = EntityFunctionsDefinition::from_yaml_file(left)?;
    let right_definition = EntityFunctionsDefinition::from_yaml_file(right)?;

    let outcome = left_definition.check(&right_definition, config.allow_override)?;
    if let Some(merged) = &outcome.merged {
        print(merged, config.output_format)?;
    }
    match &outcome.incompatibility {
        Some(e) if outcome.merged.is_some() => {
            log::warn!("Right-hand declarations replaced conflicting left-hand ones");
            eprintln!("Incompatible: {}", e);
        }
        Some(e) => eprintln!("Incompatible: {}", e),
        None => log::info!("Declarations are compatible"),
    }
    Ok(outcome.is_compatible())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = load_app_config(&cli)?;

    // RUST_LOG takes precedence over the configured filter
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter.as_str()))
        .init();

    match &cli.command {
        Command::Apply { mapping, config: declared } => apply(mapping, declared, &config),
        Command::Check { left, right } => {
            if !check(left, right, &config)? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
