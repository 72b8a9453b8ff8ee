//! Configuration management for the config editor.
//!
//! Handles:
//! - Command-line argument parsing
//! - The endpoint pair (load/save URLs), optionally read from a TOML file

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Url;
use serde::Deserialize;

/// Command-line arguments for the config editor
#[derive(Debug, Parser)]
#[command(name = "confedit")]
#[command(about = "Edit a remote JSON configuration document")]
#[command(version)]
pub struct Args {
    /// Endpoint the configuration is loaded from
    #[arg(long, help = "URL the configuration is restored from (optional)")]
    pub load_url: Option<String>,

    /// Endpoint the configuration is saved to
    #[arg(long, help = "URL the configuration is saved to")]
    pub save_url: Option<String>,

    /// TOML file providing the endpoint pair
    #[arg(long, help = "TOML file with load_url/save_url entries")]
    pub endpoints_file: Option<PathBuf>,

    /// Log level for the editor
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// On-disk shape of the endpoints file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointsFile {
    pub load_url: Option<String>,
    pub save_url: Option<String>,
}

/// The resolved endpoint pair, fixed at initialization
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Where to restore from; `None` makes the load path a no-op
    pub load_url: Option<Url>,
    /// Where to save to
    pub save_url: Url,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoints: Endpoints,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let file = load_endpoints_file(args.endpoints_file.as_deref())?;

        // CLI wins over the file for both halves of the pair
        let load = args.load_url.or(file.load_url);
        let save = args
            .save_url
            .or(file.save_url)
            .context("a save endpoint is required (--save-url or an endpoints file)")?;

        // An empty load URL means "nothing to restore from"
        let load_url = match load.as_deref() {
            None | Some("") => None,
            Some(url) => Some(Url::parse(url).context("invalid load endpoint URL")?),
        };
        let save_url = Url::parse(&save).context("invalid save endpoint URL")?;

        Ok(Config {
            endpoints: Endpoints { load_url, save_url },
            log_level: args.log_level,
        })
    }

    /// Default endpoints file under the user config directory
    pub fn default_endpoints_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("confedit").join("endpoints.toml"))
    }
}

/// An explicitly passed file must parse (hard error); the default location
/// is only consulted when it exists.
fn load_endpoints_file(explicit: Option<&Path>) -> Result<EndpointsFile> {
    if let Some(path) = explicit {
        return read_endpoints_file(path);
    }
    match Config::default_endpoints_path() {
        Some(path) if path.exists() => read_endpoints_file(&path),
        _ => Ok(EndpointsFile::default()),
    }
}

fn read_endpoints_file(path: &Path) -> Result<EndpointsFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read endpoints file {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("failed to parse endpoints file {:?}", path))
}
