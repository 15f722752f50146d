//! `lore convert`: render YAML entries as standalone markdown documents.
//!
//! The section inventory mirrors the entry schema: meta blockquote,
//! background, problem, solution with fenced code examples, benefits,
//! tradeoffs, applicable scenarios, pitfalls, related entries, and a
//! changelog footer. Sections for absent fields are omitted.

use crate::core::config::Workspace;
use crate::core::corpus;
use crate::core::entry::{Experience, Tradeoffs};
use crate::core::error::LoreError;
use colored::Colorize;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(clap::Args, Debug)]
pub struct ConvertCli {
    /// YAML entry or directory of entries (defaults to the library root)
    pub path: Option<PathBuf>,
    /// Output directory (defaults to each source file's directory)
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run_convert_cli(cli: ConvertCli, workspace: &Workspace) -> Result<(), LoreError> {
    let target = cli
        .path
        .clone()
        .unwrap_or_else(|| workspace.library_dir());

    if target.is_file() {
        let written = convert_file(&target, cli.output.as_deref())?;
        println!("{} {} -> {}", "✅".green(), target.display(), written.display());
        Ok(())
    } else if target.is_dir() {
        convert_tree(&target, cli.output.as_deref())
    } else {
        Err(LoreError::NotFound(format!(
            "no such file or directory: {}",
            target.display()
        )))
    }
}

fn convert_tree(root: &Path, output: Option<&Path>) -> Result<(), LoreError> {
    let files = corpus::collect_entry_files(root, &["yaml", "yml"])?;
    if files.is_empty() {
        println!("no YAML entries found under {}", root.display());
        return Ok(());
    }

    let results: Vec<(PathBuf, Result<PathBuf, LoreError>)> = files
        .par_iter()
        .map(|path| (path.clone(), convert_file(path, output)))
        .collect();

    let mut converted = 0usize;
    for (source, result) in &results {
        match result {
            Ok(written) => {
                converted += 1;
                println!("{} {} -> {}", "✅".green(), source.display(), written.display());
            }
            Err(err) => {
                println!("{} {}: {}", "❌".red(), source.display(), err);
            }
        }
    }
    println!();
    println!(
        "{} {}/{} files converted",
        "summary:".bold(),
        converted,
        results.len()
    );

    if converted == results.len() {
        Ok(())
    } else {
        Err(LoreError::ValidationError(format!(
            "{} of {} files failed to convert",
            results.len() - converted,
            results.len()
        )))
    }
}

/// Convert one YAML entry, returning the path of the markdown written.
///
/// Only `.yaml`/`.yml` sources are accepted: a markdown source would
/// render to `<stem>.md` next to itself and clobber the original.
pub fn convert_file(path: &Path, output: Option<&Path>) -> Result<PathBuf, LoreError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !matches!(ext, "yaml" | "yml") {
        return Err(LoreError::ValidationError(format!(
            "not a YAML entry: {}",
            path.display()
        )));
    }

    let exp = corpus::parse_entry_file(path)
        .map_err(|f| LoreError::ValidationError(f.message))?
        .ok_or_else(|| {
            LoreError::ValidationError("not a YAML entry (no front matter)".to_string())
        })?;

    let markdown = render_markdown(&exp);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| LoreError::PathError(format!("bad file name: {}", path.display())))?;
    let out_dir = match output {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(LoreError::IoError)?;
            dir.to_path_buf()
        }
        None => path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let out_path = out_dir.join(format!("{}.md", stem));
    fs::write(&out_path, markdown).map_err(LoreError::IoError)?;
    Ok(out_path)
}

/// Render an entry as a markdown document.
pub fn render_markdown(exp: &Experience) -> String {
    let mut lines: Vec<String> = Vec::new();
    let title = if exp.title.is_empty() {
        "Untitled experience"
    } else {
        &exp.title
    };
    lines.push(format!("# {}", title));
    lines.push(String::new());
    meta_block(exp, &mut lines);
    lines.push(String::new());

    if !exp.description.is_empty() {
        section(&mut lines, "Background");
        lines.push(exp.description.trim_end().to_string());
        lines.push(String::new());
    }

    if let Some(problem) = &exp.problem {
        section(&mut lines, "Problem");
        if !problem.scenario.is_empty() {
            lines.push(format!("**Scenario**: {}", problem.scenario));
            lines.push(String::new());
        }
        bullet_block(&mut lines, "**Challenges**:", &problem.challenges);
        bullet_block(&mut lines, "**Constraints**:", &problem.constraints);
    }

    if let Some(solution) = &exp.solution {
        section(&mut lines, "Solution");
        if !solution.approach.is_empty() {
            subsection(&mut lines, "Approach");
            lines.push(solution.approach.trim_end().to_string());
            lines.push(String::new());
        }
        if !solution.implementation.is_empty() {
            subsection(&mut lines, "Implementation");
            lines.push(solution.implementation.trim_end().to_string());
            lines.push(String::new());
        }
        if !solution.code_examples.is_empty() {
            subsection(&mut lines, "Code examples");
            for (i, example) in solution.code_examples.iter().enumerate() {
                match &example.filename {
                    Some(name) if !name.is_empty() => {
                        lines.push(format!("#### {}. {}", i + 1, name));
                    }
                    _ => lines.push(format!("#### Example {}", i + 1)),
                }
                lines.push(String::new());
                if let Some(desc) = &example.description {
                    if !desc.is_empty() {
                        lines.push(desc.clone());
                        lines.push(String::new());
                    }
                }
                let language = if example.language.is_empty() {
                    "text"
                } else {
                    &example.language
                };
                lines.push(format!("```{}", language));
                lines.push(example.code.trim_end().to_string());
                lines.push("```".to_string());
                lines.push(String::new());
                if let Some(explanation) = &example.explanation {
                    if !explanation.is_empty() {
                        lines.push(format!("**Note**: {}", explanation));
                        lines.push(String::new());
                    }
                }
            }
        }
    }

    if let Some(benefits) = &exp.benefits {
        if !benefits.is_empty() {
            section(&mut lines, "Benefits");
            for (key, value) in benefits {
                if !value.is_empty() {
                    lines.push(format!("**{}**: {}", benefit_label(key), value));
                    lines.push(String::new());
                }
            }
        }
    }

    if let Some(tradeoffs) = &exp.tradeoffs {
        tradeoffs_section(tradeoffs, &mut lines);
    }

    if !exp.applicable_scenarios.is_empty() {
        section(&mut lines, "Applicable scenarios");
        for scenario in &exp.applicable_scenarios {
            lines.push(format!("- {}", scenario));
        }
        lines.push(String::new());
    }

    if !exp.anti_patterns.is_empty() {
        section(&mut lines, "Pitfalls");
        for pitfall in &exp.anti_patterns {
            lines.push(format!("- ⚠ {}", pitfall));
        }
        lines.push(String::new());
    }

    if !exp.related_experiences.is_empty() {
        section(&mut lines, "Related experiences");
        for related in &exp.related_experiences {
            lines.push(format!("- [{}]({})", related, related));
        }
        lines.push(String::new());
    }

    if let Some(meta) = &exp.metadata {
        lines.push("---".to_string());
        lines.push(String::new());
        lines.push("**Changelog**:".to_string());
        if !meta.created_at.is_empty() {
            lines.push(format!("- {}: created", meta.created_at));
        }
        if !meta.updated_at.is_empty() && meta.updated_at != meta.created_at {
            lines.push(format!("- {}: updated", meta.updated_at));
        }
        if !meta.author.is_empty() {
            lines.push(format!("- Author: {}", meta.author));
        }
        if !meta.source_project.is_empty() {
            lines.push(format!("- Source project: {}", meta.source_project));
        }
    }

    let mut doc = lines.join("\n");
    doc.truncate(doc.trim_end().len());
    doc.push('\n');
    doc
}

fn meta_block(exp: &Experience, lines: &mut Vec<String>) {
    if let Some(meta) = &exp.metadata {
        if !meta.source_project.is_empty() {
            lines.push(format!("> **Source**: {}", meta.source_project));
        }
    }
    if exp.category.is_known() && !exp.subcategory.is_empty() {
        lines.push(format!(
            "> **Scope**: {} · {}",
            exp.category, exp.subcategory
        ));
    }
    lines.push(format!(
        "> **Difficulty**: {} ({})",
        exp.difficulty.stars(),
        exp.difficulty
    ));
    if !exp.tech_stack.is_empty() {
        lines.push(format!("> **Tech stack**: {}", exp.tech_stack.join(", ")));
    }
}

fn tradeoffs_section(tradeoffs: &Tradeoffs, lines: &mut Vec<String>) {
    if tradeoffs.pros.is_empty() && tradeoffs.cons.is_empty() && tradeoffs.alternatives.is_empty()
    {
        return;
    }
    section(lines, "Tradeoffs");
    if !tradeoffs.pros.is_empty() {
        subsection(lines, "Pros");
        for pro in &tradeoffs.pros {
            lines.push(format!("- ✅ {}", pro));
        }
        lines.push(String::new());
    }
    if !tradeoffs.cons.is_empty() {
        subsection(lines, "Cons");
        for con in &tradeoffs.cons {
            lines.push(format!("- ❌ {}", con));
        }
        lines.push(String::new());
    }
    if !tradeoffs.alternatives.is_empty() {
        subsection(lines, "Alternatives");
        for alt in &tradeoffs.alternatives {
            lines.push(format!("**{}**: {}", alt.name, alt.description));
            if !alt.pros.is_empty() {
                lines.push(format!("- Pros: {}", alt.pros.join(", ")));
            }
            if !alt.cons.is_empty() {
                lines.push(format!("- Cons: {}", alt.cons.join(", ")));
            }
            lines.push(String::new());
        }
    }
}

/// Label line followed by `- item` bullets and a blank line. Emits
/// nothing when the list is empty.
fn bullet_block(lines: &mut Vec<String>, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(label.to_string());
    for item in items {
        lines.push(format!("- {}", item));
    }
    lines.push(String::new());
}

fn section(lines: &mut Vec<String>, heading: &str) {
    lines.push(format!("## {}", heading));
    lines.push(String::new());
}

fn subsection(lines: &mut Vec<String>, heading: &str) {
    lines.push(format!("### {}", heading));
    lines.push(String::new());
}

fn benefit_label(key: &str) -> String {
    match key {
        "performance_gain" => "Performance gain".to_string(),
        "maintainability" => "Maintainability".to_string(),
        "scalability" => "Scalability".to_string(),
        "cost_reduction" => "Cost reduction".to_string(),
        other => {
            let spaced = other.replace('_', " ");
            let mut chars = spaced.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => spaced,
            }
        }
    }
}
