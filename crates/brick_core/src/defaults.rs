//! Baseline geometry per entity type.
//!
//! The entity factory owns these values; macros only read them, e.g. to
//! size a `Fill` step or to lift a pattern entry onto its baseline.

use crate::ExpansionError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default size of an entity type, in game units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThingDefaults {
    pub width: f64,
    pub height: f64,
}

/// Source of per-type defaults.
pub trait DefaultsProvider {
    fn defaults_of(&self, thing: &str) -> Option<ThingDefaults>;

    /// Like [`defaults_of`](Self::defaults_of) but failing on unknown types.
    fn require(&self, thing: &str) -> Result<ThingDefaults, ExpansionError> {
        self.defaults_of(thing)
            .ok_or_else(|| ExpansionError::UnknownThing {
                thing: thing.to_string(),
            })
    }
}

/// Table-backed provider, usually loaded from JSON:
/// `{ "Brick": { "width": 8, "height": 8 }, ... }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultsTable {
    things: HashMap<String, ThingDefaults>,
}

impl DefaultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, thing: impl Into<String>, width: f64, height: f64) {
        self.things
            .insert(thing.into(), ThingDefaults { width, height });
    }

    pub fn with(mut self, thing: impl Into<String>, width: f64, height: f64) -> Self {
        self.insert(thing, width, height);
        self
    }

    pub fn len(&self) -> usize {
        self.things.len()
    }

    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }
}

impl DefaultsProvider for DefaultsTable {
    fn defaults_of(&self, thing: &str) -> Option<ThingDefaults> {
        self.things.get(thing).copied()
    }
}
