//! Configuration for shelf.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variable (SHELF_FILE)
//! 2. Config file (.shelf/config.yaml)
//! 3. Defaults (./books.txt, built-in demo entries)
//!
//! Config file discovery:
//! - Searches current directory and parents for .shelf/config.yaml
//! - Falls back to the user config directory (e.g. ~/.config/shelf/config.yaml)
//! - Relative paths in a project config resolve against the project root
//!   (the directory that contains `.shelf/`); in the user config they
//!   resolve against the directory holding config.yaml
//! - A leading `~/` expands to the home directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::{EntryData, EntryKind};

/// Environment variable overriding the catalog file path
pub const FILE_ENV: &str = "SHELF_FILE";

/// Catalog file used when nothing else is configured
pub const DEFAULT_CATALOG_FILE: &str = "books.txt";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ShelfConfig {
    pub version: String,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub seed: Vec<SeedEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file (relative to the project root)
    pub file: Option<String>,
}

/// A demo entry supplied by the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedEntry {
    pub kind: EntryKind,
    #[serde(flatten)]
    pub data: EntryData,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Path of the flat catalog file
    pub catalog_file: PathBuf,
    /// Validated seed entries (empty means use the built-in sample)
    pub seed: Vec<SeedEntry>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".shelf").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// User-level config file inside `config_dir`, if it exists
fn user_config_file(config_dir: &Path) -> Option<PathBuf> {
    let config_path = config_dir.join("shelf").join("config.yaml");
    config_path.exists().then_some(config_path)
}

/// Project config first, then the user config directory
fn locate_config_file(start: &Path, config_dir: Option<&Path>) -> Option<PathBuf> {
    find_config_file(start).or_else(|| config_dir.and_then(user_config_file))
}

/// Directory that relative paths in `config_path` resolve against
fn config_base_dir(config_path: &Path) -> Option<&Path> {
    let dir = config_path.parent()?;
    if dir.file_name().is_some_and(|name| name == ".shelf") {
        dir.parent()
    } else {
        Some(dir)
    }
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ShelfConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base` or start with `~/`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Validate every seed entry before anything uses them
fn validate_seed(seed: &[SeedEntry]) -> Result<()> {
    for (i, entry) in seed.iter().enumerate() {
        entry
            .data
            .validate()
            .with_context(|| format!("Invalid seed entry #{}", i + 1))?;
    }
    Ok(())
}

/// Build the resolved config from its sources
fn resolve(cwd: &Path, config_file: Option<PathBuf>, env_file: Option<String>) -> Result<ResolvedConfig> {
    let (file_setting, seed, base_dir) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;
        validate_seed(&config.seed)
            .with_context(|| format!("Invalid config file: {}", config_path.display()))?;

        let base_dir = config_base_dir(config_path).unwrap_or(cwd).to_path_buf();

        (config.catalog.file, config.seed, base_dir)
    } else {
        (None, Vec::new(), cwd.to_path_buf())
    };

    let catalog_file = if let Some(env_file) = env_file {
        resolve_path(cwd, &env_file)
    } else if let Some(ref file) = file_setting {
        resolve_path(&base_dir, file)
    } else {
        cwd.join(DEFAULT_CATALOG_FILE)
    };

    Ok(ResolvedConfig {
        catalog_file,
        seed,
        config_file,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config_file = locate_config_file(&cwd, dirs::config_dir().as_deref());
    let env_file = std::env::var(FILE_ENV).ok();

    resolve(&cwd, config_file, env_file)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
