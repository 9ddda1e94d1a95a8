//! Full-height collision strips that toggle area-wide spawners.

use brick_core::{Callback, Directive, Expansion, ExpansionError, MacroContext};

/// A `DetectCollision` spanning the playfield from the floor up.
fn spawner_detector(settings: &Directive, cx: &MacroContext<'_>, activate: Callback) -> Directive {
    let screen = cx.screen();
    Directive::thing("DetectCollision")
        .at(settings.x, screen.floor)
        .with_width(settings.width_or(8.0))
        .with_height(screen.height_in_units())
        .on_activate(activate)
}

pub fn cheeps_start(
    settings: &Directive,
    cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    Ok(spawner_detector(settings, cx, Callback::ActivateCheepsStart).into())
}

pub fn cheeps_stop(
    settings: &Directive,
    cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    Ok(spawner_detector(settings, cx, Callback::ActivateCheepsStop).into())
}

pub fn bullet_bills_start(
    settings: &Directive,
    cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    Ok(spawner_detector(settings, cx, Callback::ActivateBulletBillsStart).into())
}

pub fn bullet_bills_stop(
    settings: &Directive,
    cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    Ok(spawner_detector(settings, cx, Callback::ActivateBulletBillsStop).into())
}

/// Tells any Lakitu on screen to flee.
pub fn lakitu_stop(
    settings: &Directive,
    cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    Ok(spawner_detector(settings, cx, Callback::ActivateLakituStop).into())
}
