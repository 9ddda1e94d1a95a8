//! Named runtime callbacks stored on directives.
//!
//! Directives never carry closures. A macro stamps a [`Callback`] identifier
//! into one of the [`Hook`] slots and the gameplay runtime resolves it against
//! its own dispatch table when the entity spawns, moves or is touched.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Slot on a directive that a callback can be attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Hook {
    /// Fired by the collision/spawn scan when the detector triggers.
    Activate,
    /// Fired when a detector's precondition is not met (e.g. flagpole while dying).
    ActivateFail,
    /// Per-frame movement function.
    Movement,
    /// Called once when the entity is added to the world.
    OnThingAdd,
}

impl Hook {
    pub const ALL: [Hook; 4] = [
        Hook::Activate,
        Hook::ActivateFail,
        Hook::Movement,
        Hook::OnThingAdd,
    ];

    /// Field name used in the record format.
    pub const fn field(self) -> &'static str {
        match self {
            Hook::Activate => "activate",
            Hook::ActivateFail => "activateFail",
            Hook::Movement => "movement",
            Hook::OnThingAdd => "onThingAdd",
        }
    }

    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|hook| hook.field() == field)
    }
}

/// Identifier of a runtime behavior. The expansion engine only stores these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Callback {
    ActivateWarpWorld,
    ActivateCheepsStart,
    ActivateCheepsStop,
    ActivateBulletBillsStart,
    ActivateBulletBillsStop,
    ActivateLakituStop,
    ActivateSectionBefore,
    CollideCastleDoor,
    CollideCastleNpc,
    CollideFlagpole,
    KillNormal,
    MovePlatformSpawn,
    SpawnScalePlatform,
    SectionPass,
    SectionFail,
    SectionDecide,
}

impl Callback {
    pub const ALL: [Callback; 16] = [
        Callback::ActivateWarpWorld,
        Callback::ActivateCheepsStart,
        Callback::ActivateCheepsStop,
        Callback::ActivateBulletBillsStart,
        Callback::ActivateBulletBillsStop,
        Callback::ActivateLakituStop,
        Callback::ActivateSectionBefore,
        Callback::CollideCastleDoor,
        Callback::CollideCastleNpc,
        Callback::CollideFlagpole,
        Callback::KillNormal,
        Callback::MovePlatformSpawn,
        Callback::SpawnScalePlatform,
        Callback::SectionPass,
        Callback::SectionFail,
        Callback::SectionDecide,
    ];

    /// Identifier written into records. Serialization goes through this table.
    pub const fn identifier(self) -> &'static str {
        match self {
            Callback::ActivateWarpWorld => "activateWarpWorld",
            Callback::ActivateCheepsStart => "activateCheepsStart",
            Callback::ActivateCheepsStop => "activateCheepsStop",
            Callback::ActivateBulletBillsStart => "activateBulletBillsStart",
            Callback::ActivateBulletBillsStop => "activateBulletBillsStop",
            Callback::ActivateLakituStop => "activateLakituStop",
            Callback::ActivateSectionBefore => "activateSectionBefore",
            Callback::CollideCastleDoor => "collideCastleDoor",
            Callback::CollideCastleNpc => "collideCastleNpc",
            Callback::CollideFlagpole => "collideFlagpole",
            Callback::KillNormal => "killNormal",
            Callback::MovePlatformSpawn => "movePlatformSpawn",
            Callback::SpawnScalePlatform => "spawnScalePlatform",
            Callback::SectionPass => "sectionPass",
            Callback::SectionFail => "sectionFail",
            Callback::SectionDecide => "sectionDecide",
        }
    }

    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|callback| callback.identifier() == identifier)
    }
}

impl Serialize for Callback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.identifier())
    }
}

impl<'de> Deserialize<'de> for Callback {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let identifier = String::deserialize(deserializer)?;
        Self::from_identifier(&identifier)
            .ok_or_else(|| de::Error::custom(format!("unknown callback `{identifier}`")))
    }
}
