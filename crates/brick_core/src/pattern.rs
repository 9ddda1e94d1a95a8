//! Named tiling patterns for repeated scenery.

use crate::ExpansionError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One placement inside a pattern, authored as `[thing, dx, dy, width?]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntryRepr", into = "EntryRepr")]
pub struct PatternEntry {
    pub thing: String,
    pub dx: f64,
    pub dy: f64,
    pub width: Option<f64>,
}

impl PatternEntry {
    pub fn new(thing: impl Into<String>, dx: f64, dy: f64) -> Self {
        Self {
            thing: thing.into(),
            dx,
            dy,
            width: None,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum EntryRepr {
    Sized(String, f64, f64, f64),
    Plain(String, f64, f64),
}

impl From<EntryRepr> for PatternEntry {
    fn from(repr: EntryRepr) -> Self {
        match repr {
            EntryRepr::Sized(thing, dx, dy, width) => {
                PatternEntry::new(thing, dx, dy).with_width(width)
            }
            EntryRepr::Plain(thing, dx, dy) => PatternEntry::new(thing, dx, dy),
        }
    }
}

impl From<PatternEntry> for EntryRepr {
    fn from(entry: PatternEntry) -> Self {
        match entry.width {
            Some(width) => EntryRepr::Sized(entry.thing, entry.dx, entry.dy, width),
            None => EntryRepr::Plain(entry.thing, entry.dx, entry.dy),
        }
    }
}

/// Ordered entries plus the declared horizontal period of the pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub entries: Vec<PatternEntry>,
    pub width: f64,
}

/// Pattern lookup by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternRegistry {
    patterns: HashMap<String, Pattern>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, pattern: Pattern) {
        self.patterns.insert(name.into(), pattern);
    }

    pub fn get(&self, name: &str) -> Result<&Pattern, ExpansionError> {
        self.patterns
            .get(name)
            .ok_or_else(|| ExpansionError::UnknownPattern {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_deserialize_from_tuples() {
        let registry: PatternRegistry = serde_json::from_str(
            r#"{
                "BackRegular": {
                    "width": 384,
                    "entries": [["HillLarge", 0, 0], ["Cloud1", 68, 68], ["Fence", 192, 0, 64]]
                }
            }"#,
        )
        .unwrap();

        let pattern = registry.get("BackRegular").unwrap();
        assert_eq!(pattern.width, 384.0);
        assert_eq!(pattern.entries[0], PatternEntry::new("HillLarge", 0.0, 0.0));
        assert_eq!(
            pattern.entries[2],
            PatternEntry::new("Fence", 192.0, 0.0).with_width(64.0)
        );
    }

    #[test]
    fn unknown_pattern_is_an_error() {
        let registry = PatternRegistry::new();
        assert_eq!(
            registry.get("BackFence"),
            Err(ExpansionError::UnknownPattern { name: "BackFence".into() })
        );
    }
}
