//! Command-line interface for shelf.
//!
//! Runs the demonstration sequence, lists a saved catalog file, and
//! shows the resolved configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config;
use crate::library::{Catalog, CatalogFile};

pub mod demo;

/// shelf - Catalog of books and magazines
#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the demonstration sequence (default)
    Demo {
        /// Catalog file to write and read back
        #[arg(short, long, env = config::FILE_ENV)]
        file: Option<PathBuf>,

        /// Author to list (defaults to the first sample entry's author)
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Load a saved catalog file and list its entries
    Show {
        /// Catalog file to read
        #[arg(short, long, env = config::FILE_ENV)]
        file: Option<PathBuf>,

        /// Only list entries by this author
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command.unwrap_or(Commands::Demo {
            file: None,
            author: None,
        }) {
            Commands::Demo { file, author } => run_demo(file, author),
            Commands::Show { file, author } => show_file(file, author),
            Commands::Config => show_config(),
        }
    }
}

/// Pick the file from the flag, falling back to configuration
fn catalog_file(file: Option<PathBuf>) -> Result<PathBuf> {
    match file {
        Some(path) => Ok(path),
        None => Ok(config::config()?.catalog_file.clone()),
    }
}

fn run_demo(file: Option<PathBuf>, author: Option<String>) -> Result<()> {
    let cfg = config::config()?;
    let file = catalog_file(file)?;

    let seed = if cfg.seed.is_empty() {
        demo::default_seed()
    } else {
        cfg.seed.clone()
    };

    demo::run(&file, &seed, author.as_deref())?;
    Ok(())
}

fn show_file(file: Option<PathBuf>, author: Option<String>) -> Result<()> {
    let file = catalog_file(file)?;

    let mut catalog = Catalog::new();
    CatalogFile::new(&file).load_into(&mut catalog)?;

    if catalog.is_empty() {
        println!("Catalog file {} has no entries.", file.display());
        return Ok(());
    }

    match author {
        Some(author) => {
            let entries: Vec<_> = catalog.entries_by_author(&author).collect();
            if entries.is_empty() {
                println!("No entries found for author {}.", author);
            }
            for entry in entries {
                println!("{}", entry);
            }
        }
        None => {
            for entry in &catalog {
                println!("{}", entry);
            }
            println!("\nTotal: {} entries", catalog.len());
        }
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!(
        "Config file:  {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Catalog file: {}", cfg.catalog_file.display());
    println!();
    println!("Seed entries:");
    if cfg.seed.is_empty() {
        println!("  (built-in sample)");
    } else {
        for entry in &cfg.seed {
            println!(
                "  [{}] {}, {}, {}",
                entry.kind, entry.data.title, entry.data.author, entry.data.year
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn test_file_flag_reads_env() {
        let cli = Cli::command();

        for name in ["demo", "show"] {
            let sub = cli.find_subcommand(name).unwrap();
            let file = sub.get_arguments().find(|a| a.get_id() == "file").unwrap();
            assert_eq!(file.get_env(), Some(OsStr::new(config::FILE_ENV)));
        }
    }

    #[test]
    fn test_default_command_is_demo() {
        let cli = Cli::try_parse_from(["shelf"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["shelf", "show", "--file", "books.txt", "-a", "X"]).unwrap();
        match cli.command {
            Some(Commands::Show { file, author }) => {
                assert_eq!(file, Some(PathBuf::from("books.txt")));
                assert_eq!(author.as_deref(), Some("X"));
            }
            other => panic!("Expected Show command, got {:?}", other),
        }
    }
}
