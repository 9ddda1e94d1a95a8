//! Layout helpers for macros that place records at fixed offsets.

use crate::Directive;
use glam::{dvec2, DVec2};

/// Origin of a composite. Every child is placed relative to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor(DVec2);

impl Anchor {
    pub fn new(x: f64, y: f64) -> Self {
        Self(dvec2(x, y))
    }

    /// Origin taken from a macro's settings (missing coordinates read as 0).
    pub fn of(settings: &Directive) -> Self {
        Self(settings.point())
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> DVec2 {
        self.0 + dvec2(dx, dy)
    }

    /// Shift the anchor itself.
    pub fn shifted(self, dx: f64, dy: f64) -> Self {
        Self(self.offset(dx, dy))
    }

    /// Terminal record of `thing` at the given offset.
    pub fn place(self, thing: &str, dx: f64, dy: f64) -> Directive {
        Directive::thing(thing).at_point(self.offset(dx, dy))
    }

    /// Nested macro call at the given offset.
    pub fn invoke(self, macro_name: &str, dx: f64, dy: f64) -> Directive {
        Directive::macro_call(macro_name).at_point(self.offset(dx, dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_relative_to_origin() {
        let anchor = Anchor::of(&Directive::macro_call("Bridge").at(40.0, 16.0));
        let railing = anchor.place("Railing", 8.0, 4.0);
        assert_eq!(railing.thing_name(), Some("Railing"));
        assert_eq!((railing.x, railing.y), (48.0, 20.0));

        let small = anchor.shifted(16.0, 48.0).invoke("CastleSmall", 0.0, 0.0);
        assert_eq!(small.macro_name(), Some("CastleSmall"));
        assert_eq!(small.point(), dvec2(56.0, 64.0));
    }
}
