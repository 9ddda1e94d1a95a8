//! Brick Macro Library
//!
//! The built-in placement macros, grouped the way levels use them:
//!
//! - **primitives:** `Fill`, `Pattern`, `Floor`, `Water`, `Pipe`, `Ceiling`
//! - **structures:** `PipeCorner`, `Tree`, `Shroom`, `Bridge`, `Scale`,
//!   `PlatformGenerator`, `WarpWorld`
//! - **detectors:** spawner start/stop triggers
//! - **castle / ending:** castles and level-end assemblies
//! - **section:** pass/fail section flow hooks
//!
//! Every macro is a plain function with the [`MacroFn`] signature; composites
//! that need another macro emit a nested directive and leave it to the
//! resolver.

pub mod castle;
pub mod detectors;
pub mod ending;
pub mod primitives;
pub mod section;
pub mod structures;

mod text;

#[cfg(test)]
mod testing;

use brick_core::{
    Directive, Expansion, ExpansionError, MacroContext, MacroRegistrationError, MacroRegistry,
    MAX_RECORDS_PER_EXPANSION,
};

/// Signature shared by every built-in macro.
pub type MacroFn = fn(&Directive, &MacroContext<'_>) -> Result<Expansion, ExpansionError>;

/// Built-in macros by registry name.
pub const BUILTINS: [(&str, MacroFn); 27] = [
    ("Fill", primitives::fill),
    ("Pattern", primitives::pattern),
    ("Floor", primitives::floor),
    ("Pipe", primitives::pipe),
    ("PipeCorner", structures::pipe_corner),
    ("Tree", structures::tree),
    ("Shroom", structures::shroom),
    ("Water", primitives::water),
    ("Ceiling", primitives::ceiling),
    ("Bridge", structures::bridge),
    ("Scale", structures::scale),
    ("PlatformGenerator", structures::platform_generator),
    ("WarpWorld", structures::warp_world),
    ("CheepsStart", detectors::cheeps_start),
    ("CheepsStop", detectors::cheeps_stop),
    ("BulletBillsStart", detectors::bullet_bills_start),
    ("BulletBillsStop", detectors::bullet_bills_stop),
    ("LakituStop", detectors::lakitu_stop),
    ("CastleSmall", castle::castle_small),
    ("CastleLarge", castle::castle_large),
    ("StartInsideCastle", castle::start_inside_castle),
    ("EndOutsideCastle", ending::end_outside_castle),
    ("EndInsideCastle", ending::end_inside_castle),
    ("Section", section::section),
    ("SectionPass", section::section_pass),
    ("SectionFail", section::section_fail),
    ("SectionDecider", section::section_decider),
];

/// Iterations of a `for (i = 0; i < n; i += 1)` loop over a level-authored
/// count: fractions round up, and zero, negative or NaN counts run no times.
pub(crate) fn loop_count(n: f64) -> usize {
    if n > 0.0 {
        n.ceil() as usize
    } else {
        0
    }
}

/// Product of `counts`, failing when it exceeds [`MAX_RECORDS_PER_EXPANSION`].
pub(crate) fn record_budget(macro_name: &str, counts: &[usize]) -> Result<usize, ExpansionError> {
    counts
        .iter()
        .try_fold(1usize, |total, count| total.checked_mul(*count))
        .filter(|total| *total <= MAX_RECORDS_PER_EXPANSION)
        .ok_or_else(|| ExpansionError::TooManyRecords {
            macro_name: macro_name.to_string(),
            limit: MAX_RECORDS_PER_EXPANSION,
        })
}

/// Register every built-in macro into `registry`.
pub fn register_builtins(registry: &mut MacroRegistry) -> Result<(), MacroRegistrationError> {
    for (name, definition) in BUILTINS {
        registry.register(name, definition)?;
    }
    tracing::debug!(count = BUILTINS.len(), "registered built-in macros");
    Ok(())
}

/// Fresh registry holding only the built-in macros.
pub fn builtin_registry() -> Result<MacroRegistry, MacroRegistrationError> {
    let mut registry = MacroRegistry::new();
    register_builtins(&mut registry)?;
    Ok(registry)
}
