//! Experience entry data model.
//!
//! One entry captures a single engineering lesson: what the problem was,
//! how it was solved, what it cost, and where it applies. Entries live as
//! YAML files (or YAML front matter in markdown) under the library root.
//!
//! Deserialization is deliberately lenient: required fields default to
//! empty values and the enums carry an `Unknown` catch-all, so a partially
//! filled file still loads and `lore validate` can report field-level
//! findings instead of one opaque parse error.

use clap::ValueEnum;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Top-level taxonomy for entries. Mirrors the directory layout
/// `experiences/<category>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Category {
    Architecture,
    Patterns,
    Debugging,
    Performance,
    Testing,
    Deployment,
    /// Anything not in the taxonomy. Never valid; flagged by validation.
    #[value(skip)]
    #[default]
    Unknown,
}

impl Category {
    /// Case-insensitive label lookup. Anything unrecognized maps to
    /// `Unknown` so a bad file still loads and validation can flag it.
    pub fn from_label(label: &str) -> Category {
        match label.to_lowercase().as_str() {
            "architecture" => Category::Architecture,
            "patterns" => Category::Patterns,
            "debugging" => Category::Debugging,
            "performance" => Category::Performance,
            "testing" => Category::Testing,
            "deployment" => Category::Deployment,
            _ => Category::Unknown,
        }
    }

    pub const ALL: [Category; 6] = [
        Category::Architecture,
        Category::Patterns,
        Category::Debugging,
        Category::Performance,
        Category::Testing,
        Category::Deployment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Architecture => "architecture",
            Category::Patterns => "patterns",
            Category::Debugging => "debugging",
            Category::Performance => "performance",
            Category::Testing => "testing",
            Category::Deployment => "deployment",
            Category::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unknown)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Category::from_label(&label))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    #[value(skip)]
    #[default]
    Unknown,
}

impl Difficulty {
    pub fn from_label(label: &str) -> Difficulty {
        match label.to_lowercase().as_str() {
            "beginner" => Difficulty::Beginner,
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            "expert" => Difficulty::Expert,
            _ => Difficulty::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Expert => "expert",
            Difficulty::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Difficulty::Unknown)
    }

    /// Star scale used in rendered markdown. Unknown renders as the
    /// middle of the scale.
    pub fn stars(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "⭐⭐",
            Difficulty::Intermediate => "⭐⭐⭐",
            Difficulty::Advanced => "⭐⭐⭐⭐",
            Difficulty::Expert => "⭐⭐⭐⭐⭐",
            Difficulty::Unknown => "⭐⭐⭐",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Difficulty::from_label(&label))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Problem {
    pub scenario: String,
    pub challenges: Vec<String>,
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CodeExample {
    pub filename: Option<String>,
    pub language: String,
    pub code: String,
    pub description: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Solution {
    pub approach: String,
    pub implementation: String,
    pub code_examples: Vec<CodeExample>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Alternative {
    pub name: String,
    pub description: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Tradeoffs {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Metadata {
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
    pub source_project: String,
    pub review_status: String,
    pub quality_score: Option<u8>,
}

/// A single experience entry as authored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub subcategory: String,
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    pub tech_stack: Vec<String>,
    pub description: String,
    pub problem: Option<Problem>,
    pub solution: Option<Solution>,
    /// Free-form benefit dimensions (performance_gain, maintainability, ...).
    /// BTreeMap keeps rendered output stable across runs.
    pub benefits: Option<BTreeMap<String, String>>,
    pub tradeoffs: Option<Tradeoffs>,
    pub applicable_scenarios: Vec<String>,
    pub anti_patterns: Vec<String>,
    pub related_experiences: Vec<String>,
    pub metadata: Option<Metadata>,
    /// Where this entry was loaded from. Attached by the loader.
    #[serde(skip)]
    pub source: PathBuf,
}

impl Experience {
    /// Case-insensitive substring match over title, description, tags,
    /// category, and subcategory.
    pub fn matches_keyword(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
            || self
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(needle_lower))
            || self.category.as_str().contains(needle_lower)
            || self.subcategory.to_lowercase().contains(needle_lower)
    }

    /// Case-insensitive substring match against any tech stack element.
    pub fn matches_tech(&self, needle_lower: &str) -> bool {
        self.tech_stack
            .iter()
            .any(|t| t.to_lowercase().contains(needle_lower))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_serde() {
        let c: Category = serde_yaml::from_str("debugging").unwrap();
        assert_eq!(c, Category::Debugging);
        assert_eq!(c.to_string(), "debugging");
    }

    #[test]
    fn unknown_category_does_not_fail_parse() {
        let c: Category = serde_yaml::from_str("cooking").unwrap();
        assert_eq!(c, Category::Unknown);
        assert!(!c.is_known());
    }

    #[test]
    fn difficulty_star_scale() {
        assert_eq!(Difficulty::Beginner.stars().chars().count(), 2);
        assert_eq!(Difficulty::Expert.stars().chars().count(), 5);
        assert_eq!(Difficulty::Unknown.stars().chars().count(), 3);
    }

    #[test]
    fn keyword_matches_tags_and_subcategory() {
        let exp = Experience {
            title: "Index-only scans".to_string(),
            subcategory: "indexing".to_string(),
            tags: vec!["postgresql".to_string()],
            ..Default::default()
        };
        assert!(exp.matches_keyword("postgres"));
        assert!(exp.matches_keyword("index"));
        assert!(!exp.matches_keyword("redis"));
    }

    #[test]
    fn partial_entry_still_deserializes() {
        let exp: Experience = serde_yaml::from_str("title: half-finished\n").unwrap();
        assert_eq!(exp.title, "half-finished");
        assert!(exp.id.is_empty());
        assert_eq!(exp.category, Category::Unknown);
        assert!(exp.solution.is_none());
    }
}
