//! Library loading: walking the experiences tree and parsing entries.
//!
//! Two on-disk shapes are accepted: whole-file YAML (`*.yaml` / `*.yml`)
//! and markdown with a YAML front-matter block (`*.md`). Markdown without
//! front matter is prose, not an entry, and is skipped. A file that fails
//! to parse never aborts the load; it is carried as a load error so each
//! surface can decide how loudly to report it.

use crate::core::entry::Experience;
use crate::core::error::LoreError;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Library {
    pub root: PathBuf,
    pub entries: Vec<Experience>,
    pub failures: Vec<LoadFailure>,
}

impl Library {
    /// Load every entry under `root`. Parsing runs in parallel; results
    /// are re-sorted by path so output stays deterministic.
    pub fn load(root: &Path) -> Result<Library, LoreError> {
        if !root.is_dir() {
            return Err(LoreError::NotFound(format!(
                "experiences directory not found: {}",
                root.display()
            )));
        }

        let files = collect_entry_files(root, &["yaml", "yml", "md"])?;
        let parsed: Vec<Result<Option<Experience>, LoadFailure>> =
            files.par_iter().map(|p| parse_entry_file(p)).collect();

        let mut entries = Vec::new();
        let mut failures = Vec::new();
        for result in parsed {
            match result {
                Ok(Some(exp)) => entries.push(exp),
                Ok(None) => {}
                Err(fail) => failures.push(fail),
            }
        }
        entries.sort_by(|a, b| a.source.cmp(&b.source));
        failures.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(Library {
            root: root.to_path_buf(),
            entries,
            failures,
        })
    }
}

/// Recursively collect files with one of `extensions`, skipping `.git`
/// and `target`. Returned paths are sorted.
pub fn collect_entry_files(
    root: &Path,
    extensions: &[&str],
) -> Result<Vec<PathBuf>, LoreError> {
    fn recurse(
        dir: &Path,
        extensions: &[&str],
        out: &mut Vec<PathBuf>,
    ) -> Result<(), LoreError> {
        if !dir.is_dir() {
            return Ok(());
        }
        let name = dir.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if name == ".git" || name == "target" {
            return Ok(());
        }
        for entry in fs::read_dir(dir).map_err(LoreError::IoError)? {
            let entry = entry.map_err(LoreError::IoError)?;
            let path = entry.path();
            if path.is_dir() {
                recurse(&path, extensions, out)?;
            } else if path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.contains(&e))
            {
                out.push(path);
            }
        }
        Ok(())
    }

    let mut files = Vec::new();
    recurse(root, extensions, &mut files)?;
    files.sort();
    Ok(files)
}

/// Parse one file into an entry. `Ok(None)` means the file is not an
/// entry at all (markdown without front matter).
pub fn parse_entry_file(path: &Path) -> Result<Option<Experience>, LoadFailure> {
    let content = fs::read_to_string(path).map_err(|e| LoadFailure {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let yaml_src = if path.extension().and_then(|e| e.to_str()) == Some("md") {
        match front_matter(&content) {
            Some(block) => block,
            None => return Ok(None),
        }
    } else {
        content.as_str()
    };

    let mut exp: Experience = serde_yaml::from_str(yaml_src).map_err(|e| LoadFailure {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    exp.source = path.to_path_buf();
    Ok(Some(exp))
}

/// Extract the YAML block between the leading `---` fences of a markdown
/// document. Returns `None` when the document has no front matter.
pub fn front_matter(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("---")?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;
    let end = rest.find("\n---")?;
    Some(&rest[..end])
}
