//! Collection naming.
//!
//! Composites stamp a shared name onto co-generated records so the runtime can
//! find "the other half" of an assembly when one part spawns. Producers and the
//! spawn-time lookup must agree on the exact string, so every name is built
//! here from structured inputs.

use crate::Directive;
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq)]
pub enum CollectionError {
    #[error("collection '{name}' has more than one record keyed '{key}'")]
    DuplicateKey { name: String, key: String },
}

/// Builders for the collection names used by the built-in macros.
pub struct CollectionName;

impl CollectionName {
    /// Shared by the NPC detector and the text blocks it reveals.
    pub const END_INSIDE_CASTLE_TEXT: &'static str = "endInsideCastleText";

    /// `ScaleCollection--x,y,widthLeft,widthRight,dropLeft,dropRight`
    pub fn scale(
        x: f64,
        y: f64,
        width_left: f64,
        width_right: f64,
        drop_left: f64,
        drop_right: f64,
    ) -> String {
        format!(
            "ScaleCollection--{}",
            join_numbers(&[x, y, width_left, width_right, drop_left, drop_right])
        )
    }

    /// `WarpWorldCollection-<warp>.<warp>...`
    pub fn warp_world<S: AsRef<str>>(warps: &[S]) -> String {
        let joined = warps
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(".");
        format!("WarpWorldCollection-{joined}")
    }

    /// `EndOutsideCastle-x,y,large` with an absent `large` rendered empty.
    pub fn end_outside_castle(x: f64, y: f64, large: Option<bool>) -> String {
        let large = large.map(|flag| flag.to_string()).unwrap_or_default();
        format!(
            "EndOutsideCastle-{},{},{}",
            format_number(x),
            format_number(y),
            large
        )
    }
}

/// Render a coordinate the way level files write it: integral values carry no
/// fractional part.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| format_number(*value))
        .collect::<Vec<_>>()
        .join(",")
}

/// Check that no two records share both a collection name and a key.
pub fn validate_collections(records: &[Directive]) -> Result<(), CollectionError> {
    let mut seen = HashSet::new();
    for tag in records.iter().filter_map(|record| record.collection.as_ref()) {
        if !seen.insert((tag.name.as_str(), tag.key.as_str())) {
            warn!(collection = %tag.name, key = %tag.key, "duplicate collection key");
            return Err(CollectionError::DuplicateKey {
                name: tag.name.clone(),
                key: tag.key.clone(),
            });
        }
    }
    Ok(())
}
