//! hide-widgets - toggle non-essential widgets of a game client viewport
//!
//! Runs the widget subsystem inside a simulated client and renders the
//! client's widget tree in the terminal.

mod app;
mod config;
mod core;
mod data;
mod frontend;
mod host;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use data::{DisplayMode, LayoutVariant};
use frontend::{Frontend, TuiFrontend};
use std::path::PathBuf;
use std::time::Duration;

#[derive(ClapParser)]
#[command(name = "hide-widgets")]
#[command(about = "Toggle non-essential widgets of a game client viewport", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.hide-widgets)
    /// Can also be set via HIDE_WIDGETS_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Resizable skin the simulated client starts with
    #[arg(short, long, value_enum, default_value = "modern")]
    layout: LayoutVariant,

    /// Start the simulated client in fixed display mode
    #[arg(long)]
    fixed: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    ValidateConfig {
        /// Config file to validate (defaults to the data directory's config.toml)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
    /// Overwrite the config file with defaults
    ResetConfig,
}

fn main() -> Result<()> {
    // TUI apps can't log to stdout, so we write to a file (RUST_LOG controls the level)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("hide-widgets.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    // Must happen before any config path is resolved
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var("HIDE_WIDGETS_DIR", data_dir);
        tracing::info!("Using custom data directory: {:?}", data_dir);
    } else if let Ok(env_dir) = std::env::var("HIDE_WIDGETS_DIR") {
        tracing::info!("Using data directory from HIDE_WIDGETS_DIR: {}", env_dir);
    }

    if let Some(command) = cli.command {
        return match command {
            Commands::ValidateConfig { path } => validate_config(path.or(cli.config)),
            Commands::ResetConfig => {
                let path = config::Config::reset()?;
                println!("✓ Wrote default config to {:?}", path);
                Ok(())
            }
        };
    }

    let config = match &cli.config {
        Some(path) => config::Config::load_from_path(path)?,
        None => config::Config::load()?,
    };

    let mode = if cli.fixed {
        DisplayMode::Fixed
    } else {
        DisplayMode::Resizable
    };

    run_tui(config, cli.layout, mode)
}

fn validate_config(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => config::Config::config_path()?,
    };
    println!("Validating config file: {:?}", path);

    let config = config::Config::parse_file(&path)?;
    println!("✓ Config parsed successfully");

    let result = config::validator::validate_config(&config);
    for issue in result.errors() {
        eprintln!("✗ Error: {}", issue.message());
    }
    for issue in result.warnings() {
        eprintln!("⚠ Warning: {}", issue.message());
    }

    if result.is_valid() && !result.has_warnings() {
        println!("✓ Config is valid with no issues");
    } else if result.has_errors() {
        eprintln!(
            "✗ {} error(s), {} warning(s)",
            result.errors().len(),
            result.warnings().len()
        );
        std::process::exit(1);
    } else {
        println!("✓ Config is valid ({} warning(s))", result.warnings().len());
    }

    Ok(())
}

fn run_tui(config: config::Config, layout: LayoutVariant, mode: DisplayMode) -> Result<()> {
    let poll_timeout = Duration::from_millis(config.ui.poll_timeout_ms);
    let mut app = app::App::new(config, layout, mode);

    let mut frontend = TuiFrontend::new().context("Failed to start terminal frontend")?;
    frontend.set_poll_timeout(poll_timeout);

    let (width, height) = frontend.size();
    tracing::info!(
        "Simulated client started ({}, {:?}, {}x{})",
        layout.display_name(),
        mode,
        width,
        height
    );

    let result = app.run(&mut frontend);
    let cleanup = frontend.cleanup();
    result?;
    cleanup?;

    tracing::info!("Simulated client exited");
    Ok(())
}
