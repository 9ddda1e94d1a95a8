//! Castle scenery and the stairs that open castle levels.
//!
//! Castle pieces are tagged `position: "end"` so they draw above the player
//! once the level is over. A castle with a `transport` setting also gets a
//! door detector that carries the player to the next map.

use crate::{loop_count, record_budget};
use brick_core::{Anchor, Callback, Directive, Expansion, ExpansionError, MacroContext};

const END: &str = "end";

fn door_detector(origin: Anchor, settings: &Directive) -> Option<Directive> {
    settings.forwarded("transport").map(|transport| {
        origin
            .place("DetectCollision", 24.0, 16.0)
            .with_height(16.0)
            .on_activate(Callback::CollideCastleDoor)
            .with("transport", transport)
            .with("position", END)
    })
}

/// Two-story castle built from brick and railing sceneries.
pub fn castle_small(
    settings: &Directive,
    _cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    let origin = Anchor::of(settings);
    let mut output = Vec::with_capacity(24);

    // Base filling, left then right
    for base in [0.0, 24.0] {
        for i in 0..2 {
            let dx = base + f64::from(i) * 8.0;
            output.push(origin.place("BrickHalf", dx, 4.0));
            for j in 1..3 {
                output.push(origin.place("BrickPlain", dx, 4.0 + f64::from(j) * 8.0));
            }
        }
    }

    output.push(origin.place("CastleRailing", 0.0, 24.0));
    for i in 1..4 {
        output.push(origin.place("CastleRailingFilled", f64::from(i) * 8.0, 24.0));
    }
    output.push(origin.place("CastleRailing", 32.0, 24.0));

    for i in 1..4 {
        output.push(origin.place("CastleRailing", f64::from(i) * 8.0, 40.0));
    }
    for i in 0..2 {
        output.push(origin.place("CastleTop", 8.0 + f64::from(i) * 12.0, 36.0));
    }
    output.push(origin.place("CastleDoor", 16.0, 20.0));

    let mut output: Vec<Directive> = output
        .into_iter()
        .map(|record| record.with("position", END))
        .collect();
    output.extend(door_detector(origin, settings));

    Ok(output.into())
}

/// Fortress wrapped around a small castle that sits on its roof.
///
/// `walls` sets the number of wall segments on the right; zero is allowed.
pub fn castle_large(
    settings: &Directive,
    _cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    let origin = Anchor::of(settings);
    let walls = loop_count(settings.number_or("walls", 2.0));
    record_budget("CastleLarge", &[walls])?;
    let mut output = vec![origin.invoke("CastleSmall", 16.0, 48.0)];

    for i in 0..2 {
        output.push(origin.place("CastleWall", f64::from(i) * 8.0, 48.0));
    }

    // Bottom doors with bricks stacked on top
    for i in 0..3 {
        let dx = 16.0 + f64::from(i) * 16.0;
        output.push(origin.place("CastleDoor", dx, 20.0).with("position", END));
        for j in 0..2 {
            output.push(origin.place("BrickPlain", dx, 28.0 + f64::from(j) * 8.0));
            output.push(origin.place("BrickHalf", dx, 40.0 + f64::from(j) * 4.0));
        }
    }

    // Brick columns between them, capped by windows
    for i in 0..2 {
        let dx = 24.0 + f64::from(i) * 16.0;
        for j in 0..3 {
            output.push(origin.place("BrickPlain", dx, 8.0 + f64::from(j) * 8.0));
        }
        output.push(origin.place("CastleDoor", dx, 44.0));
    }

    for i in 0..5 {
        output.push(origin.place("CastleRailingFilled", 16.0 + f64::from(i) * 8.0, 48.0));
    }

    for i in 0..walls {
        output.push(
            origin
                .place("CastleWall", 56.0 + i as f64 * 8.0, 48.0)
                .with("position", END),
        );
    }

    output.extend(door_detector(origin, settings));
    Ok(output.into())
}

/// Entrance stairs of a castle level, followed by floor for the remaining width.
pub fn start_inside_castle(
    settings: &Directive,
    _cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    let origin = Anchor::of(settings);
    let width = settings.width_or(0.0) - 40.0;

    let mut output = vec![
        origin
            .place("Stone", 0.0, 48.0)
            .with_width(24.0)
            .with_infinite_height(),
        origin
            .place("Stone", 24.0, 40.0)
            .with_width(8.0)
            .with_infinite_height(),
        origin
            .place("Stone", 32.0, 32.0)
            .with_width(8.0)
            .with_infinite_height(),
    ];

    if width > 0.0 {
        output.push(origin.invoke("Floor", 40.0, 24.0).with_width(width));
    }

    Ok(output.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{layout, Fixture};
    use brick_core::{Extent, Hook};
    use serde_json::json;

    fn count(records: &[Directive], thing: &str) -> usize {
        records
            .iter()
            .filter(|record| record.thing_name() == Some(thing))
            .count()
    }

    #[test]
    fn small_castle_layout() {
        let fixture = Fixture::new();
        let records = fixture.expand(castle_small, Directive::macro_call("CastleSmall").at(100.0, 0.0));

        assert_eq!(records.len(), 12 + 5 + 3 + 2 + 1);
        assert_eq!(count(&records, "BrickHalf"), 4);
        assert_eq!(count(&records, "BrickPlain"), 8);
        assert_eq!(count(&records, "CastleRailing"), 5);
        assert_eq!(count(&records, "CastleRailingFilled"), 3);
        assert!(records
            .iter()
            .all(|record| record.text("position") == Some("end")));

        let layout = layout(&records);
        assert_eq!(layout[0], ("BrickHalf".to_string(), 100.0, 4.0));
        assert_eq!(layout[2], ("BrickPlain".to_string(), 100.0, 20.0));
        assert_eq!(layout[6], ("BrickHalf".to_string(), 124.0, 4.0));
        assert_eq!(layout.last(), Some(&("CastleDoor".to_string(), 116.0, 20.0)));
    }

    #[test]
    fn transport_adds_a_door_detector() {
        let fixture = Fixture::new();
        let records = fixture.expand(
            castle_small,
            Directive::macro_call("CastleSmall")
                .at(100.0, 0.0)
                .with("transport", json!({ "map": "1-2" })),
        );

        let detector = records.last().unwrap();
        assert_eq!(detector.thing_name(), Some("DetectCollision"));
        assert_eq!((detector.x, detector.y), (124.0, 16.0));
        assert_eq!(detector.height, Some(Extent::Finite(16.0)));
        assert_eq!(detector.hook(Hook::Activate), Some(Callback::CollideCastleDoor));
        assert_eq!(detector.attribute("transport"), Some(&json!({ "map": "1-2" })));
    }

    #[test]
    fn large_castle_nests_exactly_one_small_castle() {
        let fixture = Fixture::new();
        let records = fixture.expand(castle_large, Directive::macro_call("CastleLarge").at(40.0, 8.0));

        let nested: Vec<_> = records
            .iter()
            .filter(|record| record.macro_name().is_some())
            .collect();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].macro_name(), Some("CastleSmall"));
        assert_eq!((nested[0].x, nested[0].y), (56.0, 56.0));
        assert_eq!(count(&records, "CastleWall"), 4);
        assert_eq!(count(&records, "CastleDoor"), 5);
    }

    #[test]
    fn large_castle_wall_count_accepts_zero() {
        let fixture = Fixture::new();
        let none = fixture.expand(castle_large, Directive::macro_call("CastleLarge").with("walls", 0));
        assert_eq!(count(&none, "CastleWall"), 2);

        let many = fixture.expand(castle_large, Directive::macro_call("CastleLarge").with("walls", 8));
        assert_eq!(count(&many, "CastleWall"), 10);
        let last = many
            .iter()
            .filter(|record| record.thing_name() == Some("CastleWall"))
            .last()
            .unwrap();
        assert_eq!(last.x, 56.0 + 7.0 * 8.0);
        assert_eq!(last.text("position"), Some("end"));
    }

    #[test]
    fn large_castle_fractional_walls_round_up() {
        let fixture = Fixture::new();
        let records = fixture.expand(castle_large, Directive::macro_call("CastleLarge").with("walls", 1.5));
        assert_eq!(count(&records, "CastleWall"), 2 + 2);

        let negative = fixture.expand(castle_large, Directive::macro_call("CastleLarge").with("walls", -4));
        assert_eq!(count(&negative, "CastleWall"), 2);
    }

    #[test]
    fn large_castle_refuses_absurd_wall_counts() {
        let fixture = Fixture::new();
        let error = fixture
            .try_expand(castle_large, Directive::macro_call("CastleLarge").with("walls", 1e12))
            .unwrap_err();
        assert!(matches!(error, ExpansionError::TooManyRecords { .. }));
    }

    #[test]
    fn resolved_large_castle_is_terminal() {
        let fixture = Fixture::new();
        let resolution = fixture.resolve(
            Directive::macro_call("CastleLarge").with("transport", json!({ "map": "2-1" })),
        );
        assert!(resolution.records.iter().all(Directive::is_terminal));
        assert_eq!(resolution.depth, 2);
        // Only the outer castle carries the transport, so only it gets a detector.
        assert_eq!(count(&resolution.records, "DetectCollision"), 1);
    }

    #[test]
    fn start_inside_castle_stairs_and_floor() {
        let fixture = Fixture::new();
        let records = fixture.expand(
            start_inside_castle,
            Directive::macro_call("StartInsideCastle").with_width(104.0),
        );
        assert_eq!(
            layout(&records),
            [
                ("Stone".to_string(), 0.0, 48.0),
                ("Stone".to_string(), 24.0, 40.0),
                ("Stone".to_string(), 32.0, 32.0),
                ("Floor".to_string(), 40.0, 24.0),
            ]
        );
        assert!(records[0].height.is_some_and(Extent::is_infinite));
        assert_eq!(records[3].width, Some(Extent::Finite(64.0)));

        let short = fixture.expand(
            start_inside_castle,
            Directive::macro_call("StartInsideCastle").with_width(40.0),
        );
        assert_eq!(short.len(), 3);
    }
}
