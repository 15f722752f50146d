//! `lore search`: filter the library by keyword, tech stack, difficulty,
//! category, and subcategory.
//!
//! Filters compose with AND when several are given. `--list` (or `--list`
//! alone) returns every entry; a bare `search` with no filter is an error
//! rather than silently dumping the whole library.

use crate::core::config::Workspace;
use crate::core::corpus::Library;
use crate::core::entry::{Category, Difficulty, Experience};
use crate::core::error::LoreError;
use crate::core::output;
use colored::Colorize;

#[derive(clap::Args, Debug)]
pub struct SearchCli {
    /// Match keyword against title, description, tags, and taxonomy
    #[clap(short, long)]
    pub keyword: Option<String>,
    /// Match against the tech stack
    #[clap(short, long)]
    pub tech: Option<String>,
    /// Filter by difficulty
    #[clap(short, long, value_enum)]
    pub difficulty: Option<Difficulty>,
    /// Filter by category
    #[clap(short, long, value_enum)]
    pub category: Option<Category>,
    /// Filter by subcategory (requires --category)
    #[clap(short, long, requires = "category")]
    pub subcategory: Option<String>,
    /// List every entry
    #[clap(long)]
    pub list: bool,
    /// Output format: 'text' or 'json'
    #[clap(long, default_value = "text")]
    pub format: String,
}

impl SearchCli {
    fn has_filter(&self) -> bool {
        self.keyword.is_some()
            || self.tech.is_some()
            || self.difficulty.is_some()
            || self.category.is_some()
    }

    /// AND-composition of every provided filter.
    pub fn matches(&self, exp: &Experience) -> bool {
        if let Some(keyword) = &self.keyword {
            if !exp.matches_keyword(&keyword.to_lowercase()) {
                return false;
            }
        }
        if let Some(tech) = &self.tech {
            if !exp.matches_tech(&tech.to_lowercase()) {
                return false;
            }
        }
        if let Some(difficulty) = self.difficulty {
            if exp.difficulty != difficulty {
                return false;
            }
        }
        if let Some(category) = self.category {
            if exp.category != category {
                return false;
            }
            if let Some(sub) = &self.subcategory {
                if !exp.subcategory.eq_ignore_ascii_case(sub) {
                    return false;
                }
            }
        }
        true
    }
}

pub fn run_search_cli(cli: SearchCli, workspace: &Workspace) -> Result<(), LoreError> {
    if !cli.has_filter() && !cli.list {
        return Err(LoreError::ValidationError(
            "no filter given; pass --keyword/--tech/--difficulty/--category, or --list for everything"
                .to_string(),
        ));
    }

    let library = Library::load(&workspace.library_dir())?;
    output::warn_load_failures(&library.failures);

    let results: Vec<&Experience> = library
        .entries
        .iter()
        .filter(|exp| cli.matches(exp))
        .collect();

    match cli.format.as_str() {
        "json" => {
            let payload: Vec<serde_json::Value> = results.iter().map(|e| summary(e)).collect();
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        _ => {
            if results.is_empty() {
                println!("no matching experiences");
                return Ok(());
            }
            println!(
                "{}",
                format!("found {} matching experiences", results.len()).bold()
            );
            for exp in &results {
                println!();
                println!("{}", output::entry_card(exp));
            }
        }
    }
    Ok(())
}

fn summary(exp: &Experience) -> serde_json::Value {
    serde_json::json!({
        "id": exp.id,
        "title": exp.title,
        "category": exp.category.as_str(),
        "subcategory": exp.subcategory,
        "tags": exp.tags,
        "difficulty": exp.difficulty.as_str(),
        "tech_stack": exp.tech_stack,
        "description": exp.description,
        "file": exp.source.display().to_string(),
    })
}
