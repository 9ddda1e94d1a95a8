//! Detectors driving branching sections.
//!
//! A section ends with pass/fail detectors that record the outcome; a decider
//! placed later spawns the section picked by that outcome. The records only
//! carry callback identifiers and section numbers. The flag itself lives in
//! the runtime's per-level session.

use brick_core::{Callback, Directive, Expansion, ExpansionError, MacroContext};
use serde_json::Value;

/// Section index setting, written as an integer whenever it is whole.
fn section_index(settings: &Directive, key: &str) -> Value {
    let index = settings.nonzero_or(key, 0.0);
    if index.is_finite() && index.fract() == 0.0 {
        Value::from(index as i64)
    } else {
        Value::from(index)
    }
}

/// Spawns section `section` (default 0) when scrolled into view.
pub fn section(settings: &Directive, _cx: &MacroContext<'_>) -> Result<Expansion, ExpansionError> {
    Ok(Directive::thing("DetectSpawn")
        .at(settings.x, settings.y)
        .on_activate(Callback::ActivateSectionBefore)
        .with("section", section_index(settings, "section"))
        .into())
}

fn outcome_detector(settings: &Directive, callback: Callback) -> Directive {
    Directive::thing("DetectCollision")
        .at(settings.x, settings.y)
        .with_width(settings.width_or(8.0))
        .with_height(settings.height_or(8.0))
        .on_activate(callback)
}

pub fn section_pass(
    settings: &Directive,
    _cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    Ok(outcome_detector(settings, Callback::SectionPass).into())
}

pub fn section_fail(
    settings: &Directive,
    _cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    Ok(Expansion::Many(vec![outcome_detector(
        settings,
        Callback::SectionFail,
    )]))
}

/// Chooses between the `pass` and `fail` sections at spawn time.
pub fn section_decider(
    settings: &Directive,
    _cx: &MacroContext<'_>,
) -> Result<Expansion, ExpansionError> {
    Ok(Directive::thing("DetectSpawn")
        .at(settings.x, settings.y)
        .on_activate(Callback::SectionDecide)
        .with("pass", section_index(settings, "pass"))
        .with("fail", section_index(settings, "fail"))
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use brick_core::{Extent, Hook};
    use serde_json::json;

    #[test]
    fn section_spawner_defaults_to_zero() {
        let fixture = Fixture::new();
        let records = fixture.expand(section, Directive::macro_call("Section").at(16.0, 0.0));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].thing_name(), Some("DetectSpawn"));
        assert_eq!(records[0].number("section"), Some(0.0));
        assert_eq!(records[0].hook(Hook::Activate), Some(Callback::ActivateSectionBefore));

        let numbered = fixture.expand(section, Directive::macro_call("Section").with("section", 2));
        assert_eq!(numbered[0].number("section"), Some(2.0));
    }

    #[test]
    fn outcome_detectors() {
        let fixture = Fixture::new();
        let pass = fixture.expand(
            section_pass,
            Directive::macro_call("SectionPass").at(80.0, 0.0).with_height(64.0),
        );
        assert_eq!(pass[0].width, Some(Extent::Finite(8.0)));
        assert_eq!(pass[0].height, Some(Extent::Finite(64.0)));
        assert_eq!(pass[0].hook(Hook::Activate), Some(Callback::SectionPass));

        let fail = fixture.expand(section_fail, Directive::macro_call("SectionFail").at(80.0, 72.0));
        assert_eq!(fail.len(), 1);
        assert_eq!((fail[0].x, fail[0].y), (80.0, 72.0));
        assert_eq!(fail[0].hook(Hook::Activate), Some(Callback::SectionFail));
    }

    #[test]
    fn decider_carries_both_branches() {
        let fixture = Fixture::new();
        let records = fixture.expand(
            section_decider,
            Directive::macro_call("SectionDecider").with("pass", 3),
        );
        let decider = &records[0];
        assert_eq!(decider.hook(Hook::Activate), Some(Callback::SectionDecide));
        assert_eq!(decider.number("pass"), Some(3.0));
        assert_eq!(decider.number("fail"), Some(0.0));
    }

    #[test]
    fn section_numbers_are_written_as_integers() {
        let fixture = Fixture::new();
        let spawner = fixture.expand(section, Directive::macro_call("Section"));
        assert_eq!(spawner[0].attribute("section"), Some(&json!(0)));
        assert_eq!(spawner[0].to_value()["section"], json!(0));

        let decider = fixture.expand(
            section_decider,
            Directive::macro_call("SectionDecider").with("pass", 3.0),
        );
        assert_eq!(decider[0].attribute("pass"), Some(&json!(3)));
        assert_eq!(decider[0].attribute("fail"), Some(&json!(0)));
        assert_eq!(
            serde_json::to_string(&decider[0].attribute("pass")).unwrap(),
            "3"
        );
    }
}
