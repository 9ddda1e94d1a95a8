//! Level-end assemblies: the flagpole run and the boss bridge.

use crate::text::{hidden_text, Line};
use brick_core::glam::dvec2;
use brick_core::{
    Anchor, Callback, CollectionName, Directive, Expansion, ExpansionError, Hook, MacroContext,
};
use serde_json::Value;

/// Flagpole, its detector and a castle further along.
///
/// The castle is large when `large` is set; `castleDistance` moves it away
/// from the pole and `walls` is passed on to a large castle.
pub fn end_outside_castle(
    settings: &Directive,
    _cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    let origin = Anchor::of(settings);
    let large = settings.flag("large");
    let name = CollectionName::end_outside_castle(
        origin.x(),
        origin.y(),
        settings.attribute("large").and_then(Value::as_bool),
    );
    let transport = settings.forwarded("transport");

    let mut output = vec![
        origin
            .place("DetectCollision", 0.0, 108.0)
            .with_height(100.0)
            .on_activate(Callback::CollideFlagpole)
            .with_hook(Hook::ActivateFail, Callback::KillNormal)
            .with("noActivateDeath", true)
            .in_collection(name.as_str(), "DetectCollision"),
        origin
            .place("Flag", -4.5, 79.5)
            .in_collection(name.as_str(), "Flag"),
        origin
            .place("FlagTop", 1.5, 84.0)
            .in_collection(name.as_str(), "FlagTop"),
        origin
            .place("FlagPole", 3.0, 80.0)
            .in_collection(name.as_str(), "FlagPole"),
        origin
            .place("Stone", 0.0, 8.0)
            .in_collection(name.as_str(), "Stone"),
    ];

    let castle = if large {
        origin
            .invoke("CastleLarge", settings.nonzero_or("castleDistance", 24.0), 0.0)
            .with_optional("transport", transport)
            .with("walls", settings.nonzero_or("walls", 8.0))
    } else {
        origin
            .invoke("CastleSmall", settings.nonzero_or("castleDistance", 32.0), 0.0)
            .with_optional("transport", transport)
    };
    output.push(castle);

    Ok(output.into())
}

/// Who waits at the end of a castle and what they say.
struct Rescue {
    keys: &'static [&'static str],
    texts: Vec<Directive>,
}

impl Rescue {
    fn for_npc(npc: &str, origin: Anchor) -> Self {
        let thanks = || hidden_text(origin.offset(164.0, 64.0), &[Line::plain("THANK YOU MARIO!")]);
        match npc {
            "Toad" => Self {
                keys: &["1", "2"],
                texts: vec![
                    thanks(),
                    hidden_text(
                        origin.offset(152.0, 48.0),
                        &[
                            Line::plain("BUT OUR PRINCESS IS IN"),
                            Line::plain("ANOTHER CASTLE!"),
                        ],
                    ),
                ],
            },
            "Peach" => Self {
                keys: &["1", "2", "3"],
                texts: vec![
                    thanks(),
                    hidden_text(
                        origin.offset(152.0, 48.0),
                        &[
                            Line::indented("YOUR QUEST IS OVER.", 12.0),
                            Line::plain("WE PRESENT YOU A NEW QUEST."),
                        ],
                    ),
                    // Pinned to the screen, not the castle floor
                    hidden_text(
                        dvec2(origin.x() + 152.0, 32.0),
                        &[
                            Line::indented("PRESS BUTTON B", 8.0),
                            Line::plain("TO SELECT A WORLD"),
                        ],
                    ),
                ],
            },
            _ => Self {
                keys: &[],
                texts: Vec::new(),
            },
        }
    }
}

/// Bowser's bridge, the axe, and the chamber holding the rescued NPC.
pub fn end_inside_castle(
    settings: &Directive,
    _cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    let origin = Anchor::of(settings);
    let npc = settings
        .text("npc")
        .filter(|npc| !npc.is_empty())
        .unwrap_or("Toad");
    let spawn_type = settings
        .text("spawnType")
        .filter(|spawn| !spawn.is_empty())
        .unwrap_or("Goomba");
    let rescue = Rescue::for_npc(npc, origin);

    let mut output = vec![
        origin.place("Stone", 0.0, 88.0).with_width(256.0),
        origin.invoke("Water", 0.0, 0.0).with_width(104.0),
        origin.place("CastleBridge", 0.0, 24.0).with_width(104.0),
        origin
            .place("Bowser", 69.0, 42.0)
            .with_optional("hard", settings.attribute("hard").cloned())
            .with("spawnType", spawn_type)
            .with_optional("throwing", settings.attribute("throwing").cloned()),
        origin.place("CastleChain", 96.0, 32.0),
        origin.place("CastleAxe", 104.0, 40.0),
        Directive::thing("ScrollBlocker").at(origin.x() + 112.0, 0.0),
        origin.invoke("Floor", 104.0, 0.0).with_width(152.0),
        origin
            .place("Stone", 104.0, 32.0)
            .with_width(24.0)
            .with_height(32.0),
        origin
            .place("Stone", 112.0, 80.0)
            .with_width(16.0)
            .with_height(24.0),
        Directive::thing("DetectCollision")
            .at(origin.x() + 180.0, 0.0)
            .on_activate(Callback::CollideCastleNpc)
            .with_optional("transport", settings.forwarded("transport"))
            .in_collection(CollectionName::END_INSIDE_CASTLE_TEXT, "npc")
            .with("collectionKeys", rescue.keys.to_vec()),
        Directive::thing(npc).at(origin.x() + 200.0, 13.0),
        Directive::thing("ScrollBlocker").at(origin.x() + 256.0, 0.0),
    ];

    if settings.flag("topScrollEnabler") {
        for dx in [96.0, 240.0] {
            output.push(
                origin
                    .place("ScrollEnabler", dx, 140.0)
                    .with_height(52.0)
                    .with_width(16.0),
            );
        }
    }

    output.extend(rescue.texts.into_iter().zip(rescue.keys).map(|(text, key)| {
        text.in_collection(CollectionName::END_INSIDE_CASTLE_TEXT, *key)
    }));

    Ok(output.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{layout, Fixture};
    use brick_core::{validate_collections, Extent};
    use serde_json::json;

    #[test]
    fn flagpole_records_share_a_collection() {
        let fixture = Fixture::new();
        let records = fixture.expand(
            end_outside_castle,
            Directive::macro_call("EndOutsideCastle").at(1600.0, 0.0),
        );

        assert_eq!(records.len(), 6);
        let tagged = &records[..5];
        assert!(tagged.iter().all(|record| {
            record.collection.as_ref().map(|tag| tag.name.as_str()) == Some("EndOutsideCastle-1600,0,")
        }));
        assert_eq!(validate_collections(&records), Ok(()));

        let detector = &records[0];
        assert_eq!((detector.x, detector.y), (1600.0, 108.0));
        assert_eq!(detector.hook(Hook::Activate), Some(Callback::CollideFlagpole));
        assert_eq!(detector.hook(Hook::ActivateFail), Some(Callback::KillNormal));
        assert_eq!(detector.attribute("noActivateDeath"), Some(&json!(true)));
        assert_eq!((records[1].x, records[1].y), (1595.5, 79.5));

        let castle = &records[5];
        assert_eq!(castle.macro_name(), Some("CastleSmall"));
        assert_eq!(castle.x, 1632.0);
        assert_eq!(castle.attribute("transport"), None);
    }

    #[test]
    fn large_end_passes_walls_and_transport() {
        let fixture = Fixture::new();
        let records = fixture.expand(
            end_outside_castle,
            Directive::macro_call("EndOutsideCastle")
                .at(200.0, 0.0)
                .with("large", true)
                .with("transport", json!({ "map": "1-4" })),
        );

        let tag = records[0].collection.as_ref().unwrap();
        assert_eq!(tag.name, "EndOutsideCastle-200,0,true");

        let castle = &records[5];
        assert_eq!(castle.macro_name(), Some("CastleLarge"));
        assert_eq!(castle.x, 224.0);
        assert_eq!(castle.number("walls"), Some(8.0));
        assert_eq!(castle.attribute("transport"), Some(&json!({ "map": "1-4" })));
    }

    #[test]
    fn large_end_resolves_three_levels_deep() {
        let fixture = Fixture::new();
        let settings = Directive::macro_call("EndOutsideCastle")
            .at(200.0, 0.0)
            .with("large", true)
            .with("castleDistance", 40)
            .with("transport", json!({ "map": "2-1" }));

        let first = fixture.resolve(settings.clone());
        let second = fixture.resolve(settings);

        assert_eq!(first, second);
        assert_eq!(first.depth, 3);
        assert!(first.records.iter().all(Directive::is_terminal));
        assert_eq!(first.expansions.get("CastleSmall"), Some(&1));

        let walls = first
            .records
            .iter()
            .filter(|record| record.thing_name() == Some("CastleWall"))
            .count();
        assert_eq!(walls, 2 + 8);
    }

    #[test]
    fn toad_chamber() {
        let fixture = Fixture::new();
        let records = fixture.expand(
            end_inside_castle,
            Directive::macro_call("EndInsideCastle")
                .at(0.0, 0.0)
                .with("transport", json!({ "map": "2-1" })),
        );

        assert_eq!(records.len(), 13 + 2);
        assert_eq!(records[1].macro_name(), Some("Water"));
        assert_eq!(records[7].macro_name(), Some("Floor"));
        assert_eq!(records[3].text("spawnType"), Some("Goomba"));
        assert_eq!(records[3].attribute("hard"), None);

        let detector = &records[10];
        assert_eq!(detector.hook(Hook::Activate), Some(Callback::CollideCastleNpc));
        assert_eq!(detector.attribute("collectionKeys"), Some(&json!(["1", "2"])));
        assert_eq!(detector.attribute("transport"), Some(&json!({ "map": "2-1" })));

        assert_eq!(layout(&records[11..12]), [("Toad".to_string(), 200.0, 13.0)]);

        let keys: Vec<_> = records[13..]
            .iter()
            .map(|text| text.collection.as_ref().unwrap().key.clone())
            .collect();
        assert_eq!(keys, ["1", "2"]);
        assert_eq!(
            records[14].attribute("texts"),
            Some(&json!([
                { "text": "BUT OUR PRINCESS IS IN" },
                { "text": "ANOTHER CASTLE!" }
            ]))
        );
        assert_eq!(validate_collections(&records), Ok(()));
    }

    #[test]
    fn peach_chamber_with_scroll_enablers() {
        let fixture = Fixture::new();
        let records = fixture.expand(
            end_inside_castle,
            Directive::macro_call("EndInsideCastle")
                .at(100.0, 8.0)
                .with("npc", "Peach")
                .with("hard", true)
                .with("spawnType", "Fireball")
                .with("topScrollEnabler", true),
        );

        assert_eq!(records.len(), 13 + 2 + 3);
        assert_eq!(records[3].attribute("hard"), Some(&json!(true)));
        assert_eq!(records[3].text("spawnType"), Some("Fireball"));
        assert_eq!(records[11].thing_name(), Some("Peach"));
        assert_eq!((records[13].x, records[13].y), (196.0, 148.0));
        assert_eq!(records[13].height, Some(Extent::Finite(52.0)));

        let last = records.last().unwrap();
        assert_eq!((last.x, last.y), (252.0, 32.0));
        assert_eq!(
            last.attribute("texts"),
            Some(&json!([
                { "text": "PRESS BUTTON B", "offset": 8.0 },
                { "text": "TO SELECT A WORLD" }
            ]))
        );
        assert_eq!(last.collection.as_ref().unwrap().key, "3");
        assert_eq!(records[10].attribute("collectionKeys"), Some(&json!(["1", "2", "3"])));
    }

    #[test]
    fn unknown_npc_has_nothing_to_say() {
        let fixture = Fixture::new();
        let records = fixture.expand(
            end_inside_castle,
            Directive::macro_call("EndInsideCastle").with("npc", "Luigi"),
        );
        assert_eq!(records.len(), 13);
        assert_eq!(records[11].thing_name(), Some("Luigi"));
        assert_eq!(records[10].attribute("collectionKeys"), Some(&json!([])));
    }
}
