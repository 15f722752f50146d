//! `lore validate`: format, completeness, and quality checks for entries.
//!
//! Errors are contract violations (missing required fields, unknown
//! taxonomy values, code examples without a language). Warnings are
//! advisory (short descriptions, missing authorship, naming conventions).
//! The run fails only on errors.

use crate::core::config::{ValidateSection, Workspace};
use crate::core::corpus;
use crate::core::entry::{Category, CodeExample, Experience};
use crate::core::error::LoreError;
use colored::Colorize;
use rayon::prelude::*;
use regex::Regex;
use std::path::{Path, PathBuf};

#[derive(clap::Args, Debug)]
pub struct ValidateCli {
    /// File or directory to validate (defaults to the library root)
    pub path: Option<PathBuf>,
    /// Show every file, not only the ones with findings
    #[clap(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl FileReport {
    fn new(path: &Path) -> FileReport {
        FileReport {
            path: path.to_path_buf(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Validate one file. `None` means the file is not an entry (markdown
/// without front matter) and carries no findings.
pub fn validate_file(path: &Path, rules: &ValidateSection) -> Option<FileReport> {
    let mut report = FileReport::new(path);
    let exp = match corpus::parse_entry_file(path) {
        Ok(Some(exp)) => exp,
        Ok(None) => return None,
        Err(failure) => {
            report.error(format!("parse error: {}", failure.message));
            return Some(report);
        }
    };

    check_required_fields(&exp, &mut report);
    check_field_formats(&exp, &mut report);
    check_content_quality(&exp, rules, &mut report);
    check_file_naming(path, &exp, &mut report);
    Some(report)
}

fn check_required_fields(exp: &Experience, report: &mut FileReport) {
    let scalars = [
        ("id", &exp.id),
        ("title", &exp.title),
        ("subcategory", &exp.subcategory),
        ("description", &exp.description),
    ];
    for (name, value) in scalars {
        if value.trim().is_empty() {
            report.error(format!("missing or empty required field: {}", name));
        }
    }
    if exp.tags.is_empty() {
        report.error("missing or empty required field: tags");
        report.warn("consider adding at least one tag");
    }
    if exp.tech_stack.is_empty() {
        report.error("missing or empty required field: tech_stack");
    }
}

fn check_field_formats(exp: &Experience, report: &mut FileReport) {
    if !exp.category.is_known() {
        report.error(format!(
            "invalid or missing category (expected one of: {})",
            Category::ALL
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if !exp.difficulty.is_known() {
        report.error(
            "invalid or missing difficulty (expected one of: beginner, intermediate, advanced, expert)",
        );
    }
    if exp.category.is_known() && !exp.id.is_empty() {
        let expected = format!("{}-", exp.category);
        if !exp.id.starts_with(&expected) {
            report.warn(format!("id should start with '{}'", expected));
        }
    }
}

fn check_content_quality(exp: &Experience, rules: &ValidateSection, report: &mut FileReport) {
    let desc_len = exp.description.chars().count();
    if desc_len > 0 {
        if desc_len < rules.description_min {
            report.warn(format!(
                "description is short ({} chars; aim for at least {})",
                desc_len, rules.description_min
            ));
        } else if desc_len > rules.description_max {
            report.warn(format!(
                "description is long ({} chars; keep it under {})",
                desc_len, rules.description_max
            ));
        }
    }

    match &exp.solution {
        None => report.error("missing solution"),
        Some(solution) => {
            if solution.approach.trim().is_empty() {
                report.error("solution.approach must not be empty");
            }
            if solution.code_examples.is_empty() {
                report.warn("consider adding a code example");
            }
            for (i, example) in solution.code_examples.iter().enumerate() {
                check_code_example(i + 1, example, report);
            }
        }
    }

    match &exp.metadata {
        None => {
            report.warn("consider adding metadata.author");
            report.warn("consider adding metadata.created_at");
            report.warn("quality score below 5; improve the entry before citing it");
        }
        Some(meta) => {
            if meta.author.trim().is_empty() {
                report.warn("consider adding metadata.author");
            }
            if meta.created_at.trim().is_empty() {
                report.warn("consider adding metadata.created_at");
            }
            if meta.quality_score.unwrap_or(0) < 5 {
                report.warn("quality score below 5; improve the entry before citing it");
            }
        }
    }
}

fn check_code_example(index: usize, example: &CodeExample, report: &mut FileReport) {
    if example.language.trim().is_empty() {
        report.error(format!("code example {} is missing a language", index));
    }
    if example.code.trim().is_empty() {
        report.error(format!("code example {} is missing its code", index));
    }
}

fn check_file_naming(path: &Path, exp: &Experience, report: &mut FileReport) {
    if exp.category.is_known() {
        let parent = path
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        if !parent.contains(exp.category.as_str()) {
            report.warn(format!(
                "file should live under a '{}' directory",
                exp.category
            ));
        }
    }

    let year_re = Regex::new(r"20\d{2}").unwrap();
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    if !year_re.is_match(stem) {
        report.warn("consider including the year in the filename");
    }
}

pub fn run_validate_cli(cli: ValidateCli, workspace: &Workspace) -> Result<(), LoreError> {
    let target = cli
        .path
        .clone()
        .unwrap_or_else(|| workspace.library_dir());
    let rules = &workspace.config.validate;

    if target.is_file() {
        validate_single(&target, rules)
    } else if target.is_dir() {
        validate_tree(&target, rules, cli.verbose)
    } else {
        Err(LoreError::NotFound(format!(
            "no such file or directory: {}",
            target.display()
        )))
    }
}

fn validate_single(path: &Path, rules: &ValidateSection) -> Result<(), LoreError> {
    let report = validate_file(path, rules).unwrap_or_else(|| {
        let mut report = FileReport::new(path);
        report.error("markdown file has no front matter");
        report
    });

    println!("validating {}", path.display());
    if report.is_valid() {
        println!("{} entry is valid", "✅".green());
    } else {
        println!("{} entry has errors", "❌".red());
    }
    print_findings(&report, "  ");

    if report.is_valid() {
        Ok(())
    } else {
        Err(LoreError::ValidationError(format!(
            "{} error(s) in {}",
            report.errors.len(),
            path.display()
        )))
    }
}

fn validate_tree(root: &Path, rules: &ValidateSection, verbose: bool) -> Result<(), LoreError> {
    let files = corpus::collect_entry_files(root, &["yaml", "yml", "md"])?;
    let mut reports: Vec<FileReport> = files
        .par_iter()
        .filter_map(|path| validate_file(path, rules))
        .collect();
    reports.sort_by(|a, b| a.path.cmp(&b.path));

    let total = reports.len();
    let valid = reports.iter().filter(|r| r.is_valid()).count();

    println!("validating directory {}", root.display());
    for report in &reports {
        if !verbose && report.is_clean() {
            continue;
        }
        let marker = if !report.is_valid() {
            "❌".red()
        } else if !report.is_clean() {
            "⚠".yellow()
        } else {
            "✅".green()
        };
        println!("{} {}", marker, report.path.display());
        print_findings(report, "    ");
    }

    let rate = valid as f64 * 100.0 / total.max(1) as f64;
    println!();
    println!(
        "{} {} files, {} valid ({:.1}%)",
        "summary:".bold(),
        total,
        valid,
        rate
    );

    if valid == total {
        Ok(())
    } else {
        Err(LoreError::ValidationError(format!(
            "{} of {} files have errors",
            total - valid,
            total
        )))
    }
}

fn print_findings(report: &FileReport, indent: &str) {
    for error in &report.errors {
        println!("{}{} {}", indent, "error:".red(), error);
    }
    for warning in &report.warnings {
        println!("{}{} {}", indent, "warning:".yellow(), warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CLEAN_ENTRY: &str = r#"
id: debugging-pydantic-config-migration
title: Migrating nested settings to pydantic v2
category: debugging
subcategory: configuration
tags: [pydantic, settings]
difficulty: intermediate
tech_stack: [python, pydantic]
description: How a v1-to-v2 settings migration surfaced silent coercion bugs and the env-nesting fix.
solution:
  approach: Split the settings model and validate eagerly at startup.
  code_examples:
    - language: python
      code: |
        class AppSettings(BaseSettings):
            model_config = SettingsConfigDict(env_nested_delimiter="__")
metadata:
  author: sam
  created_at: "2026-03-01"
  quality_score: 7
"#;

    fn rules() -> ValidateSection {
        ValidateSection {
            description_min: 20,
            description_max: 200,
        }
    }

    fn write_entry(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn clean_entry_has_no_findings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_entry(dir.path(), "debugging/pydantic-2026.yaml", CLEAN_ENTRY);
        let report = validate_file(&path, &rules()).unwrap();
        assert!(report.is_clean(), "findings: {:?}", report);
    }

    #[test]
    fn missing_required_fields_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_entry(
            dir.path(),
            "debugging/sparse-2026.yaml",
            "title: only a title\n",
        );
        let report = validate_file(&path, &rules()).unwrap();
        assert!(!report.is_valid());
        let joined = report.errors.join("\n");
        for field in ["id", "tags", "tech_stack", "description"] {
            assert!(joined.contains(field), "no finding for {}: {}", field, joined);
        }
        assert!(joined.contains("category"));
        assert!(joined.contains("missing solution"));
    }

    #[test]
    fn empty_tags_raise_both_error_and_warning() {
        let dir = tempfile::tempdir().unwrap();
        let entry = CLEAN_ENTRY.replace("tags: [pydantic, settings]", "tags: []");
        let path = write_entry(dir.path(), "debugging/untagged-2026.yaml", &entry);
        let report = validate_file(&path, &rules()).unwrap();
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("required field: tags")));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("at least one tag")));
    }

    #[test]
    fn unknown_taxonomy_values_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let entry = CLEAN_ENTRY
            .replace("category: debugging", "category: cooking")
            .replace("difficulty: intermediate", "difficulty: impossible");
        let path = write_entry(dir.path(), "debugging/bad-tax-2026.yaml", &entry);
        let report = validate_file(&path, &rules()).unwrap();
        let joined = report.errors.join("\n");
        assert!(joined.contains("invalid or missing category"));
        assert!(joined.contains("invalid or missing difficulty"));
    }

    #[test]
    fn naming_and_quality_findings_are_warnings_only() {
        let dir = tempfile::tempdir().unwrap();
        // wrong directory, no year, low quality score, short description
        let entry = CLEAN_ENTRY
            .replace("quality_score: 7", "quality_score: 3")
            .replace(
                "description: How a v1-to-v2 settings migration surfaced silent coercion bugs and the env-nesting fix.",
                "description: Too short here.",
            );
        let path = write_entry(dir.path(), "misc/pydantic", &entry);
        let report = validate_file(&path, &rules()).unwrap();
        assert!(report.is_valid());
        let joined = report.warnings.join("\n");
        assert!(joined.contains("should live under a 'debugging' directory"));
        assert!(joined.contains("year in the filename"));
        assert!(joined.contains("quality score below 5"));
        assert!(joined.contains("description is short"));
    }

    #[test]
    fn code_example_without_language_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let entry = CLEAN_ENTRY.replace("language: python", "language: \"\"");
        let path = write_entry(dir.path(), "debugging/pydantic-2026.yaml", &entry);
        let report = validate_file(&path, &rules()).unwrap();
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("code example 1 is missing a language")));
    }

    #[test]
    fn prose_markdown_is_not_an_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_entry(dir.path(), "debugging/notes.md", "# prose\n");
        assert!(validate_file(&path, &rules()).is_none());
    }
}
