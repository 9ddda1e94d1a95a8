//! Read-only context handed to every macro invocation.

use crate::{DefaultsProvider, Directive, PatternRegistry};

/// Runtime screen constants some macros derive geometry from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMetrics {
    /// Pixels per game unit.
    pub unitsize: f64,
    /// Playfield height in pixels.
    pub height: f64,
    /// Floor y-coordinate in game units.
    pub floor: f64,
}

impl ScreenMetrics {
    /// Playfield height expressed in game units.
    #[inline]
    pub fn height_in_units(&self) -> f64 {
        self.height / self.unitsize
    }
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self {
            unitsize: 4.0,
            height: 464.0,
            floor: 104.0,
        }
    }
}

/// Collaborators owned by the calling engine.
pub struct Engine<'a> {
    pub defaults: &'a dyn DefaultsProvider,
    pub patterns: &'a PatternRegistry,
    pub screen: ScreenMetrics,
}

impl<'a> Engine<'a> {
    pub fn new(defaults: &'a dyn DefaultsProvider, patterns: &'a PatternRegistry) -> Self {
        Self {
            defaults,
            patterns,
            screen: ScreenMetrics::default(),
        }
    }

    pub fn with_screen(mut self, screen: ScreenMetrics) -> Self {
        self.screen = screen;
        self
    }
}

/// The map/area being built and its raw creation commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelScope {
    pub map: String,
    pub area: usize,
    pub prethings: Vec<Directive>,
}

impl LevelScope {
    pub fn new(map: impl Into<String>, area: usize) -> Self {
        Self {
            map: map.into(),
            area,
            prethings: Vec::new(),
        }
    }
}

/// Everything a macro may look at besides its own settings.
#[derive(Clone, Copy)]
pub struct MacroContext<'a> {
    pub scope: &'a LevelScope,
    pub engine: &'a Engine<'a>,
}

impl<'a> MacroContext<'a> {
    pub fn new(scope: &'a LevelScope, engine: &'a Engine<'a>) -> Self {
        Self { scope, engine }
    }

    #[inline]
    pub fn screen(&self) -> &ScreenMetrics {
        &self.engine.screen
    }

    #[inline]
    pub fn unitsize(&self) -> f64 {
        self.engine.screen.unitsize
    }
}
