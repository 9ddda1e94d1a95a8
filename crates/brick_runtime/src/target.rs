//! The spawned entity a callback acts on.

use brick_core::{Callback, Directive, Hook};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TargetError {
    #[error("record still references macro '{name}'; resolve it before spawning")]
    NotTerminal { name: String },
}

/// Runtime view of a spawned detector or entity.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivationTarget {
    pub thing: String,
    pub x: f64,
    pub y: f64,
    /// Section to spawn; written by a decider before activation.
    pub section: usize,
    pub pass: usize,
    pub fail: usize,
    pub transport: Option<Value>,
    /// The record the entity was spawned from.
    pub record: Directive,
}

impl ActivationTarget {
    /// Build from a terminal record. Section numbers default to 0.
    pub fn from_record(record: &Directive) -> Result<Self, TargetError> {
        let thing = match record.thing_name() {
            Some(thing) => thing.to_string(),
            None => {
                return Err(TargetError::NotTerminal {
                    name: record.macro_name().unwrap_or_default().to_string(),
                })
            }
        };

        Ok(Self {
            thing,
            x: record.x,
            y: record.y,
            section: section_number(record, "section"),
            pass: section_number(record, "pass"),
            fail: section_number(record, "fail"),
            transport: record.forwarded("transport"),
            record: record.clone(),
        })
    }

    /// Callbacks the target carries, in hook order.
    pub fn callbacks(&self) -> impl Iterator<Item = (Hook, Callback)> + '_ {
        self.record.hooks()
    }
}

impl TryFrom<&Directive> for ActivationTarget {
    type Error = TargetError;

    fn try_from(record: &Directive) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

fn section_number(record: &Directive, key: &str) -> usize {
    let value = record.number_or(key, 0.0);
    if value.is_finite() && value > 0.0 {
        value as usize
    } else {
        0
    }
}
