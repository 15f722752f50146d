//! `lore stats`: distribution of the library across categories,
//! difficulties, and tech stacks.

use crate::core::config::Workspace;
use crate::core::corpus::Library;
use crate::core::error::LoreError;
use crate::core::output;
use colored::Colorize;
use rustc_hash::FxHashMap;

#[derive(clap::Args, Debug)]
pub struct StatsCli {
    /// Output format: 'text' or 'json'
    #[clap(long, default_value = "text")]
    pub format: String,
}

const TOP_TECH_STACKS: usize = 10;

#[derive(Debug)]
pub struct LibraryStats {
    pub total: usize,
    pub categories: Vec<(String, usize)>,
    pub difficulties: Vec<(String, usize)>,
    pub top_tech_stacks: Vec<(String, usize)>,
}

pub fn compute(library: &Library) -> LibraryStats {
    let mut categories: FxHashMap<String, usize> = FxHashMap::default();
    let mut difficulties: FxHashMap<String, usize> = FxHashMap::default();
    let mut tech_stacks: FxHashMap<String, usize> = FxHashMap::default();

    for exp in &library.entries {
        *categories.entry(exp.category.as_str().to_string()).or_default() += 1;
        *difficulties
            .entry(exp.difficulty.as_str().to_string())
            .or_default() += 1;
        for tech in &exp.tech_stack {
            *tech_stacks.entry(tech.clone()).or_default() += 1;
        }
    }

    let mut top_tech_stacks = sorted_counts(tech_stacks);
    top_tech_stacks.truncate(TOP_TECH_STACKS);

    LibraryStats {
        total: library.entries.len(),
        categories: sorted_counts(categories),
        difficulties: sorted_counts(difficulties),
        top_tech_stacks,
    }
}

/// Counts descending, then name ascending, so output is deterministic.
fn sorted_counts(map: FxHashMap<String, usize>) -> Vec<(String, usize)> {
    let mut pairs: Vec<(String, usize)> = map.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

pub fn run_stats_cli(cli: StatsCli, workspace: &Workspace) -> Result<(), LoreError> {
    let library = Library::load(&workspace.library_dir())?;
    output::warn_load_failures(&library.failures);
    let stats = compute(&library);

    match cli.format.as_str() {
        "json" => {
            let as_object = |pairs: &[(String, usize)]| {
                pairs
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::json!(v)))
                    .collect::<serde_json::Map<String, serde_json::Value>>()
            };
            let payload = serde_json::json!({
                "total_experiences": stats.total,
                "categories": as_object(&stats.categories),
                "difficulties": as_object(&stats.difficulties),
                "top_tech_stacks": as_object(&stats.top_tech_stacks),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        _ => {
            println!("{}", "experience library stats".bold());
            println!("  total entries: {}", stats.total);
            print_section("categories", &stats.categories);
            print_section("difficulties", &stats.difficulties);
            print_section("top tech stacks", &stats.top_tech_stacks);
        }
    }
    Ok(())
}

fn print_section(label: &str, pairs: &[(String, usize)]) {
    if pairs.is_empty() {
        return;
    }
    println!("  {}:", label.cyan());
    for (name, count) in pairs {
        println!("    {:<24} {}", name, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::{Category, Difficulty, Experience};

    fn lib(entries: Vec<Experience>) -> Library {
        Library {
            entries,
            ..Default::default()
        }
    }

    #[test]
    fn counts_are_sorted_desc_then_by_name() {
        let mk = |cat: Category, tech: &[&str]| Experience {
            category: cat,
            difficulty: Difficulty::Intermediate,
            tech_stack: tech.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        let library = lib(vec![
            mk(Category::Debugging, &["python", "pydantic"]),
            mk(Category::Debugging, &["python"]),
            mk(Category::Testing, &["dart"]),
        ]);
        let stats = compute(&library);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.categories[0], ("debugging".to_string(), 2));
        assert_eq!(stats.categories[1], ("testing".to_string(), 1));
        assert_eq!(stats.top_tech_stacks[0], ("python".to_string(), 2));
        // ties break alphabetically
        assert_eq!(stats.top_tech_stacks[1].1, 1);
        assert_eq!(stats.top_tech_stacks[1].0, "dart");
    }

    #[test]
    fn tech_stack_list_is_capped() {
        let entries = (0..15)
            .map(|i| Experience {
                tech_stack: vec![format!("tech-{i:02}")],
                ..Default::default()
            })
            .collect();
        let stats = compute(&lib(entries));
        assert_eq!(stats.top_tech_stacks.len(), TOP_TECH_STACKS);
    }
}
