//! Chimera configuration resolver library
//!
//! This module exports the resolver pipeline, the environment stores it runs
//! against, and the error type.

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod format;

pub use config::{ConfigLoader, ConfigPaths, LoadedConfig, load_config};
pub use env::{Environment, MemoryEnv, ProcessEnv};
pub use error::{ConfigError, Result};
