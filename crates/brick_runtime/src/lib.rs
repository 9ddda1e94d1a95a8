//! Brick Runtime
//!
//! Spawn-time side of the placement records: the callbacks that macros stamp
//! into hook slots are dispatched here against a host supplied by the game.
//!
//! Section flow is the one behavior owned by this crate. The pass/fail flag
//! lives in a [`SectionSession`] that the caller threads through every
//! dispatch, so independent playthroughs never share state.

pub mod dispatch;
pub mod session;
pub mod target;

pub use dispatch::{dispatch, Cue, RuntimeHost};
pub use session::SectionSession;
pub use target::{ActivationTarget, TargetError};
