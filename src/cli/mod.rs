//! CLI command definitions for chimera-config
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod dotenv;
pub mod get;
pub mod show;

use crate::config::{ConfigLoader, ConfigPaths, expand_home};
use crate::env::Environment;
use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::DotenvArgs;
use get::GetArgs;
use show::ShowArgs;
use std::path::PathBuf;

/// Resolve and inspect Project Chimera configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration directory (default: $CHIMERA_CONFIG_DIR or ./config)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Dotenv file (default: $CHIMERA_DOTENV_PATH or ./.env)
    #[arg(short = 'e', long, global = true, value_name = "FILE")]
    pub dotenv: Option<PathBuf>,

    /// Skip the dotenv step entirely
    #[arg(long, global = true, conflicts_with = "dotenv")]
    pub no_dotenv: bool,

    /// Let .env values replace variables already set in the environment
    #[arg(long, global = true)]
    pub override_dotenv: bool,

    /// Required dot-separated key (repeatable, or comma-separated)
    #[arg(short, long, global = true, value_name = "KEY", value_delimiter = ',')]
    pub require: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration (default if no subcommand given)
    Show(ShowArgs),

    /// Load and validate configuration, reporting the first failure
    Check,

    /// Print one value by dot-separated key
    Get(GetArgs),

    /// List the keys a dotenv file defines and whether each took effect
    Dotenv(DotenvArgs),
}

impl Cli {
    /// Configuration paths from flags, falling back to discovery.
    pub fn paths(&self) -> ConfigPaths {
        let mut paths = ConfigPaths::discover();
        if let Some(ref dir) = self.config_dir {
            paths.config_dir = expand_home(dir);
        }
        if let Some(ref file) = self.dotenv {
            paths.dotenv_path = Some(expand_home(file));
        }
        if self.no_dotenv {
            paths.dotenv_path = None;
        }
        paths
    }

    /// Build the loader described by the global flags.
    pub fn loader(&self) -> ConfigLoader {
        ConfigLoader::new(self.paths())
            .require(self.require.iter().cloned())
            .override_dotenv(self.override_dotenv)
    }
}

/// Run a command and return what it prints on stdout.
pub fn run<E: Environment + ?Sized>(cli: &Cli, env: &mut E) -> Result<String> {
    let loader = cli.loader();
    match cli.command {
        Some(Command::Show(ref args)) => show::run_show(&loader, args, env),
        None => show::run_show(&loader, &ShowArgs::default(), env),
        Some(Command::Check) => {
            loader.load_with_env(env)?;
            Ok("ok\n".to_string())
        }
        Some(Command::Get(ref args)) => get::run_get(&loader, args, env),
        Some(Command::Dotenv(ref args)) => dotenv::run_dotenv(&loader, args, env),
    }
}
