//! Placement directives.
//!
//! A directive is either a terminal entity placement (`thing`) or a call to a
//! further macro (`macro`). The closed set of fields every consumer relies on
//! is typed; everything else rides along in an attribute bag and is forwarded
//! verbatim to the entity factory.

mod callback;
mod codec;

pub use callback::{Callback, Hook};
pub use codec::DirectiveError;

use glam::DVec2;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// What a directive asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveKind {
    /// Terminal placement of an entity type.
    Thing(String),
    /// Non-terminal call to a registered macro.
    Macro(String),
}

/// Width or height of a placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Extent {
    Finite(f64),
    /// Extends to the playfield's current height.
    Infinite,
}

impl Extent {
    #[inline]
    pub fn finite(self) -> Option<f64> {
        match self {
            Extent::Finite(value) => Some(value),
            Extent::Infinite => None,
        }
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        matches!(self, Extent::Infinite)
    }
}

impl From<f64> for Extent {
    fn from(value: f64) -> Self {
        if value.is_infinite() {
            Extent::Infinite
        } else {
            Extent::Finite(value)
        }
    }
}

/// Group membership used to find sibling records at spawn time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollectionTag {
    pub name: String,
    pub key: String,
}

/// One placement record.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    kind: DirectiveKind,
    pub x: f64,
    pub y: f64,
    pub width: Option<Extent>,
    pub height: Option<Extent>,
    pub collection: Option<CollectionTag>,
    hooks: BTreeMap<Hook, Callback>,
    attributes: Map<String, Value>,
}

impl Directive {
    fn with_kind(kind: DirectiveKind) -> Self {
        Self {
            kind,
            x: 0.0,
            y: 0.0,
            width: None,
            height: None,
            collection: None,
            hooks: BTreeMap::new(),
            attributes: Map::new(),
        }
    }

    /// Terminal placement of `thing` at the origin.
    pub fn thing(thing: impl Into<String>) -> Self {
        Self::with_kind(DirectiveKind::Thing(thing.into()))
    }

    /// Call to the macro registered as `name`.
    pub fn macro_call(name: impl Into<String>) -> Self {
        Self::with_kind(DirectiveKind::Macro(name.into()))
    }

    pub fn kind(&self) -> &DirectiveKind {
        &self.kind
    }

    pub fn thing_name(&self) -> Option<&str> {
        match &self.kind {
            DirectiveKind::Thing(thing) => Some(thing),
            DirectiveKind::Macro(_) => None,
        }
    }

    pub fn macro_name(&self) -> Option<&str> {
        match &self.kind {
            DirectiveKind::Macro(name) => Some(name),
            DirectiveKind::Thing(_) => None,
        }
    }

    /// Whether the resolver can hand this record to the entity factory as-is.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, DirectiveKind::Thing(_))
    }

    /// Turn this record into a terminal placement of `thing`, dropping any macro reference.
    pub fn into_thing(mut self, thing: impl Into<String>) -> Self {
        self.kind = DirectiveKind::Thing(thing.into());
        self
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn at_point(self, point: DVec2) -> Self {
        self.at(point.x, point.y)
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(Extent::from(width));
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(Extent::from(height));
        self
    }

    pub fn with_infinite_height(mut self) -> Self {
        self.height = Some(Extent::Infinite);
        self
    }

    pub fn in_collection(mut self, name: impl Into<String>, key: impl Into<String>) -> Self {
        self.collection = Some(CollectionTag {
            name: name.into(),
            key: key.into(),
        });
        self
    }

    pub fn with_hook(mut self, hook: Hook, callback: Callback) -> Self {
        self.hooks.insert(hook, callback);
        self
    }

    pub fn on_activate(self, callback: Callback) -> Self {
        self.with_hook(Hook::Activate, callback)
    }

    /// Attach a pass-through attribute.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Attach a pass-through attribute only when a value is present.
    pub fn with_optional(self, key: impl Into<String>, value: Option<Value>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Copy every setting the record does not already define.
    ///
    /// The kind is never touched and the `thing` setting of a macro call is
    /// skipped, so a terminal record cannot end up naming two entity types.
    pub fn absorb_settings(mut self, settings: &Directive) -> Self {
        if self.width.is_none() {
            self.width = settings.width;
        }
        if self.height.is_none() {
            self.height = settings.height;
        }
        if self.collection.is_none() {
            self.collection = settings.collection.clone();
        }
        for (hook, callback) in &settings.hooks {
            self.hooks.entry(*hook).or_insert(*callback);
        }
        for (key, value) in &settings.attributes {
            if key == "thing" || key == "macro" {
                continue;
            }
            if !self.attributes.contains_key(key) {
                self.attributes.insert(key.clone(), value.clone());
            }
        }
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn hook(&self, hook: Hook) -> Option<Callback> {
        self.hooks.get(&hook).copied()
    }

    pub fn hooks(&self) -> impl Iterator<Item = (Hook, Callback)> + '_ {
        self.hooks.iter().map(|(hook, callback)| (*hook, *callback))
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn point(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    // ------------------------------------------------------------------
    // Settings readers
    //
    // A macro receives its invoking directive as the settings bag. Wrong
    // types read as absent; callers are expected not to send them.
    // ------------------------------------------------------------------

    /// Numeric setting, if present.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).and_then(number_of)
    }

    /// Numeric setting where zero is a legitimate value.
    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.number(key).unwrap_or(default)
    }

    /// Numeric setting where missing or zero both mean "use the default".
    pub fn nonzero_or(&self, key: &str, default: f64) -> f64 {
        nonzero(self.number(key)).unwrap_or(default)
    }

    /// Truthiness of a setting: `true`, a non-zero number or a non-empty string.
    pub fn flag(&self, key: &str) -> bool {
        match self.attributes.get(key) {
            Some(Value::Bool(value)) => *value,
            Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(text)) => !text.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
            Some(Value::Null) | None => false,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Attribute value when present and truthy, cloned for forwarding.
    pub fn forwarded(&self, key: &str) -> Option<Value> {
        self.flag(key)
            .then(|| self.attributes.get(key).cloned())
            .flatten()
    }

    /// Finite width, with missing, zero or infinite falling back to `default`.
    pub fn width_or(&self, default: f64) -> f64 {
        nonzero(self.width.and_then(Extent::finite)).unwrap_or(default)
    }

    /// Finite height, with missing, zero or infinite falling back to `default`.
    pub fn height_or(&self, default: f64) -> f64 {
        nonzero(self.height.and_then(Extent::finite)).unwrap_or(default)
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) if text == "Infinity" => Some(f64::INFINITY),
        _ => None,
    }
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}
