//! `lore new`: scaffold a skeleton entry from the embedded template.
//!
//! The scaffold is a draft: TODO blocks mark what the author still owes,
//! but the file already passes `lore validate` with warnings only.

use crate::core::assets;
use crate::core::config::Workspace;
use crate::core::entry::Category;
use crate::core::error::LoreError;
use chrono::Local;
use colored::Colorize;
use regex::Regex;
use std::fs;

#[derive(clap::Args, Debug)]
pub struct NewCli {
    /// Title of the new entry
    pub title: String,
    /// Category the entry belongs to
    #[clap(short, long, value_enum)]
    pub category: Category,
    /// Subcategory refinement
    #[clap(short, long, default_value = "general")]
    pub subcategory: String,
    /// Tag (repeatable); defaults to the category name
    #[clap(long = "tag")]
    pub tags: Vec<String>,
    /// Tech stack element (repeatable); defaults to the category name
    #[clap(long = "tech")]
    pub tech: Vec<String>,
    /// Author recorded in metadata
    #[clap(long)]
    pub author: Option<String>,
    /// Overwrite an existing file
    #[clap(long)]
    pub force: bool,
}

pub fn run_new_cli(cli: NewCli, workspace: &Workspace) -> Result<(), LoreError> {
    let slug = slugify(&cli.title);
    if slug.is_empty() {
        return Err(LoreError::ValidationError(
            "title produces an empty slug; use at least one alphanumeric character".to_string(),
        ));
    }

    let today = Local::now().format("%Y-%m-%d").to_string();
    let year = &today[..4];
    let dir = workspace.library_dir().join(cli.category.as_str());
    let path = dir.join(format!("{}-{}.yaml", slug, year));
    if path.exists() && !cli.force {
        return Err(LoreError::ValidationError(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }

    let tags = default_to_category(&cli.tags, cli.category);
    let tech = default_to_category(&cli.tech, cli.category);
    let content = assets::EMBEDDED_ENTRY_TEMPLATE
        .replace("{{id}}", &format!("{}-{}", cli.category, slug))
        .replace("{{title}}", &cli.title.replace('"', "'"))
        .replace("{{category}}", cli.category.as_str())
        .replace("{{subcategory}}", &cli.subcategory)
        .replace("{{tags}}", &yaml_list(&tags))
        .replace("{{tech_stack}}", &yaml_list(&tech))
        .replace("{{author}}", cli.author.as_deref().unwrap_or(""))
        .replace("{{date}}", &today);

    fs::create_dir_all(&dir).map_err(LoreError::IoError)?;
    fs::write(&path, content).map_err(LoreError::IoError)?;
    println!("{} created {}", "✅".green(), path.display());
    println!("fill in the TODO blocks, then run: lore validate {}", path.display());
    Ok(())
}

fn default_to_category(values: &[String], category: Category) -> Vec<String> {
    if values.is_empty() {
        vec![category.as_str().to_string()]
    } else {
        values.to_vec()
    }
}

fn yaml_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("  - {}", v))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lowercase, alphanumeric runs joined by single dashes.
pub fn slugify(title: &str) -> String {
    let non_alnum = Regex::new(r"[^a-z0-9]+").unwrap();
    let lowered = title.to_lowercase();
    non_alnum
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Pydantic v2: Config Migration!"), "pydantic-v2-config-migration");
        assert_eq!(slugify("  spaces  "), "spaces");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn yaml_list_indents_items() {
        let list = yaml_list(&["python".to_string(), "pydantic".to_string()]);
        assert_eq!(list, "  - python\n  - pydantic");
    }
}
