// Hidden CustomText blocks, revealed later by collision callbacks.

use brick_core::glam::DVec2;
use brick_core::Directive;
use serde_json::{json, Value};

/// One line of a text block, optionally indented by `offset` units.
pub(crate) struct Line<'a> {
    pub text: &'a str,
    pub offset: Option<f64>,
}

impl<'a> Line<'a> {
    pub const fn plain(text: &'a str) -> Self {
        Self { text, offset: None }
    }

    pub const fn indented(text: &'a str, offset: f64) -> Self {
        Self {
            text,
            offset: Some(offset),
        }
    }

    fn to_value(&self) -> Value {
        match self.offset {
            Some(offset) => json!({ "text": self.text, "offset": offset }),
            None => json!({ "text": self.text }),
        }
    }
}

/// `CustomText` record that starts hidden.
pub(crate) fn hidden_text(at: DVec2, lines: &[Line<'_>]) -> Directive {
    let texts: Vec<Value> = lines.iter().map(Line::to_value).collect();
    Directive::thing("CustomText")
        .at_point(at)
        .with("texts", texts)
        .with("textAttributes", json!({ "hidden": true }))
}
