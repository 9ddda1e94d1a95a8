//! Fixed multi-part assemblies: pipe corners, trees, bridges, scales,
//! platform generators and the warp world.

use crate::text::{hidden_text, Line};
use brick_core::collection::format_number;
use brick_core::{
    Anchor, Callback, CollectionName, Directive, Expansion, ExpansionError, Hook, MacroContext,
};
use serde_json::{json, Value};

/// Horizontal pipe feeding into a vertical one.
pub fn pipe_corner(
    settings: &Directive,
    _cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    let origin = Anchor::of(settings);
    let height = settings.height_or(16.0);
    let transport = settings.forwarded("transport").unwrap_or_else(|| json!(0));

    let mut output = vec![
        origin.place("PipeHorizontal", 0.0, 0.0).with("transport", transport),
        origin
            .place("PipeVertical", 16.0, height - 16.0)
            .with_height(height),
    ];

    if settings.flag("scrollEnabler") {
        output.push(
            origin
                .place("ScrollEnabler", 16.0, height + 48.0)
                .with_height(64.0)
                .with_width(16.0),
        );
    }

    if settings.flag("scrollBlocker") {
        output.push(Directive::thing("ScrollBlocker").at(origin.x() + 32.0, 0.0));
    }

    Ok(output.into())
}

fn trunk_group(settings: &Directive) -> &'static str {
    if settings.flag("solidTrunk") {
        "Solid"
    } else {
        "Scenery"
    }
}

/// Tree top with a trunk underneath when wide enough to show one.
pub fn tree(settings: &Directive, _cx: &MacroContext<'_>) -> Result<Expansion, ExpansionError> {
    let origin = Anchor::of(settings);
    let width = settings.width_or(24.0);
    let mut output = vec![origin.place("TreeTop", 0.0, 0.0).with_width(width)];

    if width > 16.0 {
        output.push(
            origin
                .place("TreeTrunk", 8.0, -8.0)
                .with_width(width - 16.0)
                .with_infinite_height()
                .with("groupType", trunk_group(settings)),
        );
    }

    Ok(output.into())
}

/// Mushroom-shaped tree; the trunk is centered and keeps its default width.
pub fn shroom(settings: &Directive, _cx: &MacroContext<'_>) -> Result<Expansion, ExpansionError> {
    let origin = Anchor::of(settings);
    let width = settings.width_or(24.0);
    let mut output = vec![origin.place("ShroomTop", 0.0, 0.0).with_width(width)];

    if width > 16.0 {
        output.push(
            origin
                .place("ShroomTrunk", (width - 8.0) / 2.0, -8.0)
                .with_infinite_height()
                .with("groupType", trunk_group(settings)),
        );
    }

    Ok(output.into())
}

/// Bridge deck with a railing, optionally bounded by stone columns.
///
/// A `begin` column takes 8 units off the span and pushes it right; an `end`
/// column only takes 8 units off.
pub fn bridge(settings: &Directive, _cx: &MacroContext<'_>) -> Result<Expansion, ExpansionError> {
    let mut origin = Anchor::of(settings);
    let mut width = settings.width_or(0.0).max(16.0);
    let mut output = Vec::with_capacity(4);

    if settings.flag("begin") {
        width -= 8.0;
        output.push(origin.place("Stone", 0.0, 0.0).with_infinite_height());
        origin = origin.shifted(8.0, 0.0);
    }

    if settings.flag("end") {
        width -= 8.0;
        output.push(origin.place("Stone", width, 0.0).with_infinite_height());
    }

    output.push(origin.place("BridgeBase", 0.0, 0.0).with_width(width));
    output.push(origin.place("Railing", 0.0, 4.0).with_width(width));

    Ok(output.into())
}

/// Two platforms hanging from strings over a shared pulley.
///
/// Strings, corners and platforms share one collection so a platform can find
/// its counterpart when it spawns. Tension grows linearly with the drop.
pub fn scale(settings: &Directive, cx: &MacroContext<'_>) -> Result<Expansion, ExpansionError> {
    let origin = Anchor::of(settings);
    let unitsize = cx.unitsize();
    let width_left = settings.nonzero_or("widthLeft", 24.0);
    let width_right = settings.nonzero_or("widthRight", 24.0);
    let between = settings.nonzero_or("between", 40.0);
    let drop_left = settings.nonzero_or("dropLeft", 24.0);
    let drop_right = settings.nonzero_or("dropRight", 24.0);
    let name = CollectionName::scale(
        origin.x(),
        origin.y(),
        width_left,
        width_right,
        drop_left,
        drop_right,
    );

    let platform = |dx: f64, width: f64, drop: f64, key: &str| {
        origin
            .place("Platform", dx - width / 2.0, -drop)
            .with_width(width)
            .with("inScale", true)
            .with("tension", (drop - 1.5) * unitsize)
            .with_hook(Hook::OnThingAdd, Callback::SpawnScalePlatform)
            .in_collection(name.as_str(), key)
    };

    let output = vec![
        origin
            .place("String", 0.0, -4.0)
            .with_height(drop_left - 4.0)
            .in_collection(name.as_str(), "stringLeft"),
        origin
            .place("String", between, -4.0)
            .with_height(drop_right - 4.0)
            .in_collection(name.as_str(), "stringRight"),
        origin
            .place("String", 4.0, 0.0)
            .with_width(between - 7.0)
            .in_collection(name.as_str(), "stringMiddle"),
        origin
            .place("StringCornerLeft", 0.0, 0.0)
            .in_collection(name.as_str(), "stringCornerLeft"),
        origin
            .place("StringCornerRight", between - 4.0, 0.0)
            .in_collection(name.as_str(), "stringCornerRight"),
        platform(0.0, width_left, drop_left, "platformLeft"),
        platform(between, width_right, drop_right, "platformRight"),
    ];

    Ok(output.into())
}

/// Platforms that travel vertically and respawn, plus the guide string.
///
/// Platform heights are absolute; only `x` comes from the settings.
pub fn platform_generator(
    settings: &Directive,
    cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    let direction = settings.nonzero_or("direction", 1.0);
    let levels = if direction > 0.0 {
        [0.0, 48.0]
    } else {
        [8.0, 56.0]
    };
    let width = settings.width_or(16.0);
    let x = settings.x;
    let yvel = direction * cx.unitsize() * 0.42;

    let mut output: Vec<Directive> = levels
        .iter()
        .map(|level| {
            Directive::thing("Platform")
                .at(x, *level)
                .with_width(width)
                .with("yvel", yvel)
                .with_hook(Hook::Movement, Callback::MovePlatformSpawn)
        })
        .collect();

    output.push(
        Directive::thing("PlatformString")
            .at(x + width / 2.0 - 0.5, cx.screen().floor)
            .with_width(1.0)
            .with_height(cx.screen().height_in_units()),
    );

    Ok(output.into())
}

/// A row of warp pipes, each with a piranha and a destination label.
///
/// With a single destination the row is recentered by shifting everything
/// after the welcome text and detector 32 units right.
pub fn warp_world(
    settings: &Directive,
    _cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    let origin = Anchor::of(settings);
    let text_height = settings.number_or("textHeight", 8.0);
    let warps: Vec<String> = settings
        .attribute("warps")
        .and_then(Value::as_array)
        .ok_or_else(|| ExpansionError::missing("WarpWorld", "warps"))?
        .iter()
        .filter_map(|warp| match warp {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => number.as_f64().map(format_number),
            _ => None,
        })
        .collect();
    let name = CollectionName::warp_world(&warps);

    let mut output = Vec::with_capacity(2 + warps.len() * 3);
    output.push(
        hidden_text(
            origin.offset(8.0, text_height + 56.0),
            &[Line::plain("WELCOME TO WARP WORLD!")],
        )
        .in_collection(name.as_str(), "Welcomer"),
    );
    output.push(
        origin
            .place("DetectCollision", 64.0, 174.0)
            .with_width(40.0)
            .with_height(102.0)
            .on_activate(Callback::ActivateWarpWorld)
            .in_collection(name.as_str(), "Detector"),
    );

    for (i, warp) in warps.iter().enumerate() {
        let column = i as f64 * 32.0;
        output.push(
            Directive::macro_call("Pipe")
                .at(origin.x() + 8.0 + column, 0.0)
                .with_height(24.0)
                .with("transport", json!({ "map": format!("{warp}-1") }))
                .in_collection(name.as_str(), format!("{i}-Pipe")),
        );
        output.push(
            origin
                .place("Piranha", 12.0 + column, 36.0)
                .in_collection(name.as_str(), format!("{i}-Piranha")),
        );
        output.push(
            hidden_text(
                origin.offset(14.0 + column, 32.0 + text_height),
                &[Line::plain(warp)],
            )
            .in_collection(name.as_str(), format!("{i}-Text")),
        );
    }

    if warps.len() == 1 {
        for record in output.iter_mut().skip(2) {
            record.x += 32.0;
        }
    }

    Ok(output.into())
}
