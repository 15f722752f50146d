//! lore: a local-first CLI for a curated engineering-experience
//! knowledge base.
//!
//! The library is a directory tree of "experience entries" - one YAML
//! file (or markdown with YAML front matter) per engineering lesson,
//! organized as `experiences/<category>/<file>`. Files are authored by
//! humans and versioned in git; `lore` is the tooling that makes the
//! collection operational:
//!
//! - `search` / `stats`: filter and summarize the library
//! - `validate`: enforce the entry schema and quality conventions
//! - `convert`: render YAML entries as standalone markdown documents
//! - `new`: scaffold a draft entry from the embedded template
//! - `docs`: the embedded schema reference and contribution policy
//!
//! All state is plain text on disk; there is no daemon, no database, and
//! no network surface.
//!
//! # Crate structure
//!
//! - [`core`]: data model, corpus loading, config, errors, rendering
//! - [`commands`]: one module per CLI surface

pub mod commands;
pub mod core;

use commands::{convert, docs, new, search, stats, validate};
use core::config::Workspace;
use core::error::LoreError;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "lore",
    version = env!("CARGO_PKG_VERSION"),
    about = "Curate, search, and validate an engineering-experience knowledge base"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
    /// Library root (defaults to the nearest ancestor with a lore.toml
    /// or an experiences/ directory)
    #[clap(long, global = true)]
    root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the library
    #[clap(name = "search", visible_alias = "s")]
    Search(search::SearchCli),

    /// Library distribution statistics
    #[clap(name = "stats")]
    Stats(stats::StatsCli),

    /// Check entries against the schema and quality conventions
    #[clap(name = "validate", visible_alias = "v")]
    Validate(validate::ValidateCli),

    /// Render YAML entries as markdown documents
    #[clap(name = "convert", visible_alias = "c")]
    Convert(convert::ConvertCli),

    /// Scaffold a draft entry
    #[clap(name = "new", visible_alias = "n")]
    New(new::NewCli),

    /// Embedded schema reference and contribution policy
    #[clap(name = "docs", visible_alias = "d")]
    Docs(docs::DocsCli),

    /// Show version information
    #[clap(name = "version")]
    Version,
}

pub fn run() -> Result<(), LoreError> {
    let cli = Cli::parse();
    let workspace = Workspace::resolve(cli.root.as_deref())?;

    match cli.command {
        Command::Search(args) => search::run_search_cli(args, &workspace),
        Command::Stats(args) => stats::run_stats_cli(args, &workspace),
        Command::Validate(args) => validate::run_validate_cli(args, &workspace),
        Command::Convert(args) => convert::run_convert_cli(args, &workspace),
        Command::New(args) => new::run_new_cli(args, &workspace),
        Command::Docs(args) => docs::run_docs_cli(args),
        Command::Version => {
            println!("lore {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
