//! Terminal macros: grid fills, tiled patterns and single structures.
//!
//! None of these emit further macro calls except `Ceiling`, which is a
//! shorthand for a `Fill`.

use crate::{loop_count, record_budget};
use brick_core::{Anchor, Directive, Expansion, ExpansionError, Extent, MacroContext};
use serde_json::Value;
use std::collections::HashSet;

/// Place one entity type `xnum` x `ynum` times.
///
/// Columns advance by `xwidth` and rows by `yheight`, both defaulting to the
/// entity's own size, which is only looked up when the step is used. Each column is emitted bottom to top before moving on.
/// Every record keeps the remaining settings of the fill.
pub fn fill(settings: &Directive, cx: &MacroContext<'_>) -> Result<Expansion, ExpansionError> {
    let thing = settings
        .text("thing")
        .ok_or_else(|| ExpansionError::missing("Fill", "thing"))?;
    let xnum = loop_count(settings.nonzero_or("xnum", 1.0));
    let ynum = loop_count(settings.nonzero_or("ynum", 1.0));
    let total = record_budget("Fill", &[xnum, ynum])?;

    let defaults = || cx.engine.defaults.require(thing);
    let xwidth = match settings.number("xwidth").filter(|value| *value != 0.0) {
        Some(value) => value,
        None if xnum > 1 => defaults()?.width,
        None => 0.0,
    };
    let yheight = match settings.number("yheight").filter(|value| *value != 0.0) {
        Some(value) => value,
        None if ynum > 1 => defaults()?.height,
        None => 0.0,
    };

    let mut outputs = Vec::with_capacity(total);
    let mut x = settings.x;
    for _ in 0..xnum {
        let mut y = settings.y;
        for _ in 0..ynum {
            outputs.push(Directive::thing(thing).at(x, y).absorb_settings(settings));
            y += yheight;
        }
        x += xwidth;
    }

    Ok(outputs.into())
}

/// Repeat a named pattern left to right.
///
/// Entries listed in `skips` are left out of every repetition. Each entry is
/// lifted by its entity's default height since patterns are authored against
/// baselines, and the origin advances by the pattern's declared width.
pub fn pattern(settings: &Directive, cx: &MacroContext<'_>) -> Result<Expansion, ExpansionError> {
    let name = settings
        .text("pattern")
        .ok_or_else(|| ExpansionError::missing("Pattern", "pattern"))?;
    let pattern = cx.engine.patterns.get(name)?;
    let repeats = loop_count(settings.nonzero_or("repeat", 1.0));
    let total = record_budget("Pattern", &[repeats, pattern.entries.len()])?;
    let skips: HashSet<usize> = settings
        .attribute("skips")
        .and_then(Value::as_array)
        .map(|skips| {
            skips
                .iter()
                .filter_map(Value::as_u64)
                .map(|index| index as usize)
                .collect()
        })
        .unwrap_or_default();

    let mut origin = Anchor::of(settings);
    let mut outputs = Vec::with_capacity(total);
    for _ in 0..repeats {
        for (index, entry) in pattern.entries.iter().enumerate() {
            if skips.contains(&index) {
                continue;
            }

            let baseline = cx.engine.defaults.require(&entry.thing)?.height;
            let mut output = origin.place(&entry.thing, entry.dx, entry.dy + baseline);
            if let Some(width) = entry.width.filter(|width| *width != 0.0) {
                output = output.with_width(width);
            }
            outputs.push(output);
        }
        origin = origin.shifted(pattern.width, 0.0);
    }

    Ok(outputs.into())
}

/// A `Floor` of infinite height, 8 wide unless told otherwise.
pub fn floor(settings: &Directive, _cx: &MacroContext<'_>) -> Result<Expansion, ExpansionError> {
    let floor = Directive::thing("Floor")
        .at(settings.x, settings.y)
        .with_width(settings.width_or(8.0))
        .with_infinite_height()
        .absorb_settings(settings);
    Ok(floor.into())
}

/// `Water` of infinite height. The sprite sits two units above the given y.
pub fn water(settings: &Directive, _cx: &MacroContext<'_>) -> Result<Expansion, ExpansionError> {
    let water = Directive::thing("Water")
        .at(settings.x, settings.y + 2.0)
        .with_infinite_height()
        .absorb_settings(settings);
    Ok(water.into())
}

/// A `Pipe`, optionally with a `Piranha` in its mouth.
///
/// An infinite height reaches the full screen height from the given y.
/// Otherwise the record is lifted by its height so `y` names the pipe's base.
pub fn pipe(settings: &Directive, cx: &MacroContext<'_>) -> Result<Expansion, ExpansionError> {
    let infinite = settings.height.is_some_and(Extent::is_infinite);
    let mut pipe = Directive::thing("Pipe")
        .at(settings.x, settings.y)
        .with_width(16.0);

    if infinite {
        pipe = pipe.with_height(cx.screen().height);
    } else {
        pipe = pipe.with_height(settings.height_or(8.0));
        pipe.y += settings.height_or(16.0);
    }

    let pipe = pipe.absorb_settings(settings);
    let mouth = pipe.y;
    let mut output = vec![pipe];

    if settings.flag("piranha") {
        output.push(
            Directive::thing("Piranha")
                .at(settings.x + 4.0, mouth + 12.0)
                .with("onPipe", true),
        );
    }

    Ok(output.into())
}

/// A row of `Brick`s at the ceiling line, one per 8 units of width.
pub fn ceiling(settings: &Directive, _cx: &MacroContext<'_>) -> Result<Expansion, ExpansionError> {
    let width = settings.width.and_then(Extent::finite).unwrap_or(0.0);
    let columns = (width / 8.0).trunc() as i64;

    let fill = Directive::macro_call("Fill")
        .at(settings.x, 88.0)
        .with("thing", "Brick")
        .with("xnum", columns)
        .with("xwidth", 8);
    Ok(fill.into())
}
