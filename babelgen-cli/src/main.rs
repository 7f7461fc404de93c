//! # babelgen
//!
//! CLI tool for generating Java and Go sources from Babel IDL models.
//!
//! ## Usage
//!
//! ```bash
//! # Generate Java sources for a model
//! babelgen generate --input model.json --lang java --package com.example
//!
//! # Generate Java and Go into a specific directory
//! babelgen generate --input model.json --lang java --lang go --output ./gen
//!
//! # Dry run to preview changes
//! babelgen generate --input model.json --dry-run
//!
//! # Initialize configuration
//! babelgen init
//!
//! # Check that generated sources are up-to-date
//! babelgen validate --input model.json
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use babelgen_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::CliError,
    generator::{load_model, ModelGenerator},
    writer::{FileStatus, OutputSync, SyncOutcome},
};

#[derive(Parser)]
#[command(name = "babelgen")]
#[command(author, version, about = "Generate Java and Go sources from Babel IDL models", long_about = None)]
struct Cli {
    /// Log rendering details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sources from a JSON model
    Generate {
        /// JSON model produced by the IDL front end
        #[arg(short, long)]
        input: PathBuf,

        /// Target language (repeatable)
        #[arg(short, long = "lang")]
        languages: Vec<String>,

        /// Output package for the selected languages
        #[arg(short, long)]
        package: Option<String>,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indentation (tabs, spaces2, spaces4)
        #[arg(long)]
        indent: Option<String>,

        /// Attribute scope to emit (repeatable)
        #[arg(long = "scope")]
        scopes: Vec<String>,

        /// Omit comments from the generated code
        #[arg(long)]
        no_docs: bool,

        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new babelgen configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "babelgen.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Validate that generated sources are up-to-date
    Validate {
        /// JSON model produced by the IDL front end
        #[arg(short, long)]
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            match e {
                CliError::Validation(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

/// Install a stderr subscriber; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "babelgen=debug,babelgen_cli=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            input,
            languages,
            package,
            output,
            indent,
            scopes,
            no_docs,
            dry_run,
            config,
        } => {
            let args = CliArgs {
                output,
                languages,
                package,
                generate_docs: no_docs.then_some(false),
                indent,
                scopes,
            };
            cmd_generate(input, &args, dry_run, config)
        }

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Validate { input, config } => cmd_validate(input, config),
    }
}

fn load_config(config_path: Option<PathBuf>, args: &CliArgs) -> Result<Config, CliError> {
    let config = ConfigManager::load(config_path.as_deref())?;
    Ok(ConfigManager::merge_cli_args(config, args))
}

/// Generate command implementation.
fn cmd_generate(
    input: PathBuf,
    args: &CliArgs,
    dry_run: bool,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(config_path, args)?;

    println!("{} {}", "Loading model".cyan(), input.display());
    let document = load_model(&input)?;
    println!(
        "  Found {} declaration(s)",
        document.declarations.len().to_string().green()
    );

    println!(
        "{} {}",
        "Rendering".cyan(),
        config.output.languages.join(", ")
    );
    let generator = ModelGenerator::new(config.clone())?;
    let output = generator.generate(&document)?;
    for language in &config.output.languages {
        println!(
            "  {}: {} file(s)",
            language,
            output.count_for(language).to_string().green()
        );
    }

    let sync = OutputSync::new(dry_run);
    let outcomes = sync.sync_all(&output.files)?;
    for (file, outcome) in output.files.iter().zip(&outcomes) {
        let path = file.path.display();
        match outcome {
            SyncOutcome::Created => println!("{} Created {}", "✓".green(), path),
            SyncOutcome::Updated => println!("{} Updated {}", "✓".green(), path),
            SyncOutcome::Unchanged => println!("{} Unchanged {}", "·".dimmed(), path),
            SyncOutcome::Planned(status) if status.is_current() => {
                println!("{} {} ({})", "[dry-run]".yellow(), path, status);
            }
            SyncOutcome::Planned(status) => {
                println!("{} Would write {} ({}):", "[dry-run]".yellow(), path, status);
                println!("{}", "─".repeat(60).dimmed());
                println!("{}", file.contents);
                println!("{}", "─".repeat(60).dimmed());
            }
        }
    }

    if !sync.is_dry_run() {
        let written = outcomes.iter().filter(|o| o.wrote()).count();
        println!(
            "{} of {} file(s) written",
            written.to_string().green(),
            outcomes.len()
        );
    }
    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        println!(
            "{} Configuration file already exists: {}",
            "Error:".red(),
            output.display()
        );
        println!("  Use --force to overwrite");
        return Err(CliError::Validation(
            "Configuration file already exists".to_string(),
        ));
    }

    let content = ConfigManager::default_config_content();
    std::fs::write(&output, content)?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Validate command implementation.
fn cmd_validate(input: PathBuf, config_path: Option<PathBuf>) -> Result<(), CliError> {
    println!("{}", "Validating generated sources...".cyan());

    let config = load_config(config_path, &CliArgs::default())?;
    let document = load_model(&input)?;
    let output = ModelGenerator::new(config)?.generate(&document)?;

    let mut stale = Vec::new();
    for file in &output.files {
        let status = FileStatus::of(file)?;
        if !status.is_current() {
            stale.push((file, status));
        }
    }

    if stale.is_empty() {
        println!("{} {} file(s) up-to-date", "✓".green(), output.files.len());
        Ok(())
    } else {
        for (file, status) in &stale {
            println!("{} {} ({})", "✗".red(), file.path.display(), status);
        }
        println!("  Run 'babelgen generate' to update");
        Err(CliError::Validation(format!(
            "{} file(s) out of date",
            stale.len()
        )))
    }
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
