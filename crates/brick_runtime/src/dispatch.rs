//! Callback dispatch.
//!
//! Section callbacks are handled here because they only touch the session.
//! Everything else (warp worlds, flagpoles, spawners, platform movement) is
//! game behavior and goes to the host unchanged.

use crate::{ActivationTarget, SectionSession};
use brick_core::Callback;
use tracing::{debug, warn};

/// Sound cues section detectors ask the host to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Coin,
    Fail,
}

impl Cue {
    /// Name of the sound in the game's audio library.
    pub const fn sound(self) -> &'static str {
        match self {
            Cue::Coin => "Coin",
            Cue::Fail => "Fail",
        }
    }
}

/// Game-side collaborator receiving the effects of a dispatch.
pub trait RuntimeHost {
    fn play(&mut self, cue: Cue);

    /// Spawn the section named by `target.section`.
    fn activate_section_before(&mut self, target: &ActivationTarget);

    /// Run any callback the runtime does not handle itself.
    fn invoke(&mut self, callback: Callback, target: &mut ActivationTarget);
}

/// Run `callback` against `target`.
pub fn dispatch(
    callback: Callback,
    target: &mut ActivationTarget,
    session: &mut SectionSession,
    host: &mut impl RuntimeHost,
) {
    match callback {
        Callback::SectionPass => {
            host.play(Cue::Coin);
            session.mark(true);
            debug!(x = target.x, "section passed");
        }
        Callback::SectionFail => {
            host.play(Cue::Fail);
            session.mark(false);
            debug!(x = target.x, "section failed");
        }
        Callback::SectionDecide => {
            if session.passed().is_none() {
                warn!(x = target.x, "section decider fired before any outcome; taking fail branch");
            }
            target.section = session.branch(target.pass, target.fail);
            debug!(section = target.section, "section decided");
            host.activate_section_before(target);
        }
        Callback::ActivateSectionBefore => host.activate_section_before(target),
        other => host.invoke(other, target),
    }
}
