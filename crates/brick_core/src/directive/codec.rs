// codec.rs - Flat JSON record format for directives
//
// Field names are a stable contract with the entity factory:
// `thing`, `macro`, `x`, `y`, `width`, `height`, `collectionName`,
// `collectionKey` and the hook slots. Everything else is forwarded as-is.

use super::{Callback, CollectionTag, Directive, DirectiveKind, Extent, Hook};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use thiserror::Error;

const INFINITY: &str = "Infinity";

/// Errors raised while decoding a record from its JSON form.
#[derive(Debug, Error, PartialEq)]
pub enum DirectiveError {
    #[error("directive must be a JSON object, found {found}")]
    NotAnObject { found: String },

    #[error("directive has neither a `thing` nor a `macro` field")]
    MissingKind,

    #[error("field `{field}` is invalid: {reason}")]
    InvalidField { field: String, reason: String },
}

impl Directive {
    /// Decode a record from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, DirectiveError> {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => Err(DirectiveError::NotAnObject {
                found: type_name(&other).to_string(),
            }),
        }
    }

    /// Decode a record from a JSON object.
    ///
    /// A `macro` field wins over `thing`; the latter then stays in the
    /// attribute bag as an ordinary setting (e.g. the entity a `Fill` places).
    /// A `null` macro reads as absent.
    pub fn from_map(mut map: Map<String, Value>) -> Result<Self, DirectiveError> {
        let macro_name = match map.remove("macro") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            Some(other) => return Err(invalid("macro", "expected a string", &other)),
        };

        let kind = match macro_name {
            Some(name) => DirectiveKind::Macro(name),
            None => match map.remove("thing") {
                Some(Value::String(thing)) => DirectiveKind::Thing(thing),
                Some(other) => return Err(invalid("thing", "expected a string", &other)),
                None => return Err(DirectiveError::MissingKind),
            },
        };

        let x = take_coordinate(&mut map, "x")?;
        let y = take_coordinate(&mut map, "y")?;
        let width = take_extent(&mut map, "width")?;
        let height = take_extent(&mut map, "height")?;
        let collection = take_collection(&mut map);

        let mut hooks = BTreeMap::new();
        for hook in Hook::ALL {
            match map.remove(hook.field()) {
                None | Some(Value::Null) => {}
                Some(Value::String(identifier)) => {
                    let callback = Callback::from_identifier(&identifier).ok_or_else(|| {
                        DirectiveError::InvalidField {
                            field: hook.field().to_string(),
                            reason: format!("unknown callback `{identifier}`"),
                        }
                    })?;
                    hooks.insert(hook, callback);
                }
                Some(other) => {
                    return Err(invalid(hook.field(), "expected a callback identifier", &other))
                }
            }
        }

        Ok(Self {
            kind,
            x,
            y,
            width,
            height,
            collection,
            hooks,
            attributes: map,
        })
    }

    /// Encode into the flat record format.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.attributes.clone();
        match &self.kind {
            DirectiveKind::Thing(thing) => {
                map.insert("thing".into(), Value::String(thing.clone()));
            }
            DirectiveKind::Macro(name) => {
                map.insert("macro".into(), Value::String(name.clone()));
            }
        }
        map.insert("x".into(), number_value(self.x));
        map.insert("y".into(), number_value(self.y));
        if let Some(width) = self.width {
            map.insert("width".into(), extent_value(width));
        }
        if let Some(height) = self.height {
            map.insert("height".into(), extent_value(height));
        }
        if let Some(tag) = &self.collection {
            map.insert("collectionName".into(), Value::String(tag.name.clone()));
            map.insert("collectionKey".into(), Value::String(tag.key.clone()));
        }
        for (hook, callback) in &self.hooks {
            map.insert(
                hook.field().into(),
                Value::String(callback.identifier().to_string()),
            );
        }
        map
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }
}

impl TryFrom<Value> for Directive {
    type Error = DirectiveError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Directive::from_value(value)
    }
}

impl Serialize for Directive {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Directive {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Directive::from_map(map).map_err(de::Error::custom)
    }
}

fn take_coordinate(map: &mut Map<String, Value>, field: &str) -> Result<f64, DirectiveError> {
    match map.remove(field) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| invalid_reason(field, "not representable as f64")),
        Some(other) => Err(invalid(field, "expected a number", &other)),
    }
}

fn take_extent(map: &mut Map<String, Value>, field: &str) -> Result<Option<Extent>, DirectiveError> {
    match map.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_f64()
            .map(|value| Some(Extent::from(value)))
            .ok_or_else(|| invalid_reason(field, "not representable as f64")),
        Some(Value::String(text)) if text == INFINITY => Ok(Some(Extent::Infinite)),
        Some(other) => Err(invalid(field, "expected a number or \"Infinity\"", &other)),
    }
}

/// Lift `collectionName`/`collectionKey` into a tag only when both are strings.
fn take_collection(map: &mut Map<String, Value>) -> Option<CollectionTag> {
    let name = map.get("collectionName").and_then(Value::as_str)?.to_string();
    let key = map.get("collectionKey").and_then(Value::as_str)?.to_string();
    map.remove("collectionName");
    map.remove("collectionKey");
    Some(CollectionTag { name, key })
}

fn number_value(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn extent_value(extent: Extent) -> Value {
    match extent {
        Extent::Finite(value) => number_value(value),
        Extent::Infinite => Value::String(INFINITY.to_string()),
    }
}

fn invalid(field: &str, expected: &str, found: &Value) -> DirectiveError {
    invalid_reason(field, &format!("{expected}, found {}", type_name(found)))
}

fn invalid_reason(field: &str, reason: &str) -> DirectiveError {
    DirectiveError::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
