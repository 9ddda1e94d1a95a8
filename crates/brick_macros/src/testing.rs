// Shared fixtures for macro tests.

use crate::{builtin_registry, MacroFn};
use brick_core::{
    DefaultsTable, Directive, Engine, ExpansionError, LevelScope, MacroContext, PatternRegistry,
    Resolution, Resolver,
};

pub(crate) struct Fixture {
    pub defaults: DefaultsTable,
    pub patterns: PatternRegistry,
    pub scope: LevelScope,
}

impl Fixture {
    pub fn new() -> Self {
        let defaults = DefaultsTable::new()
            .with("Brick", 8.0, 8.0)
            .with("Block", 8.0, 8.0)
            .with("Stone", 8.0, 8.0)
            .with("Coin", 5.0, 7.0)
            .with("HillLarge", 80.0, 35.0)
            .with("Cloud1", 16.0, 12.0)
            .with("Bush3", 64.0, 8.0)
            .with("Fence", 8.0, 8.0);
        Self {
            defaults,
            patterns: PatternRegistry::new(),
            scope: LevelScope::new("1-1", 0),
        }
    }

    pub fn expand(&self, macro_fn: MacroFn, settings: Directive) -> Vec<Directive> {
        self.try_expand(macro_fn, settings)
            .expect("macro expansion failed")
    }

    pub fn try_expand(
        &self,
        macro_fn: MacroFn,
        settings: Directive,
    ) -> Result<Vec<Directive>, ExpansionError> {
        let engine = Engine::new(&self.defaults, &self.patterns);
        let cx = MacroContext::new(&self.scope, &engine);
        macro_fn(&settings, &cx).map(|expansion| expansion.into_directives())
    }

    pub fn resolve(&self, root: Directive) -> Resolution {
        let registry = builtin_registry().unwrap();
        let engine = Engine::new(&self.defaults, &self.patterns);
        Resolver::new(&registry)
            .resolve(root, &self.scope, &engine)
            .expect("resolution failed")
    }
}

/// `(thing, x, y)` triples for compact layout assertions.
pub(crate) fn layout(records: &[Directive]) -> Vec<(String, f64, f64)> {
    records
        .iter()
        .map(|record| {
            let name = record
                .thing_name()
                .or(record.macro_name())
                .unwrap_or_default()
                .to_string();
            (name, record.x, record.y)
        })
        .collect()
}
