//! Terminal rendering helpers for CLI surfaces.
//!
//! Keeps command output bounded and readable while preserving signal.

use crate::core::corpus::LoadFailure;
use crate::core::entry::Experience;
use colored::Colorize;

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Render up to `max_items` messages with compact formatting.
pub fn preview_messages(messages: &[String], max_items: usize, max_chars: usize) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let shown = messages
        .iter()
        .take(max_items)
        .map(|m| compact_line(m, max_chars))
        .collect::<Vec<_>>()
        .join(" | ");
    if messages.len() > max_items {
        format!("{} (+{} more)", shown, messages.len() - max_items)
    } else {
        shown
    }
}

/// One search-result card for an entry.
pub fn entry_card(exp: &Experience) -> String {
    let mut lines = Vec::new();
    lines.push(format!("{}", exp.title.bold()));
    lines.push(format!(
        "  {} {} > {}   {} {}",
        "scope:".bright_black(),
        exp.category,
        if exp.subcategory.is_empty() {
            "-"
        } else {
            &exp.subcategory
        },
        exp.difficulty.stars(),
        exp.difficulty.as_str().cyan()
    ));
    if !exp.tech_stack.is_empty() {
        lines.push(format!(
            "  {} {}",
            "stack:".bright_black(),
            exp.tech_stack.join(", ")
        ));
    }
    if !exp.description.is_empty() {
        lines.push(format!("  {}", compact_line(&exp.description, 120)));
    }
    lines.push(format!(
        "  {} {}",
        "file:".bright_black(),
        exp.source.display()
    ));
    lines.join("\n")
}

/// Report skipped files on stderr without aborting the command.
pub fn warn_load_failures(failures: &[LoadFailure]) {
    for failure in failures {
        eprintln!(
            "{} skipping {}: {}",
            "warning:".yellow(),
            failure.path.display(),
            compact_line(&failure.message, 100)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_line_collapses_and_bounds() {
        assert_eq!(compact_line("a\n  b\tc", 10), "a b c");
        assert_eq!(compact_line("abcdef", 3), "abc...");
        assert_eq!(compact_line("abc", 3), "abc");
    }

    #[test]
    fn preview_messages_counts_overflow() {
        let msgs = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        assert_eq!(preview_messages(&msgs, 2, 10), "one | two (+1 more)");
        assert_eq!(preview_messages(&[], 2, 10), "");
    }

    #[test]
    fn entry_card_mentions_title_and_path() {
        let exp = Experience {
            title: "Composable form state".to_string(),
            source: std::path::PathBuf::from("experiences/patterns/forms.yaml"),
            ..Default::default()
        };
        let card = entry_card(&exp);
        assert!(card.contains("Composable form state"));
        assert!(card.contains("experiences/patterns/forms.yaml"));
    }
}
