//! Client-side assist loop.
//!
//! A connected player can let the client act for them stage by stage. The
//! loop runs the same [`decide`] the server driver uses, restricted to the
//! stages the player switched on, and can also request rebirth
//! automatically.

use tower_core::{ActRequest, AutoActs, DecisionSnapshot, decide};

/// One on/off switch of the assist panel, each bound to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum AssistToggle {
    /// Server-side AI for this player. Mirrors the flag only; the server drives.
    AutoPlay,
    AutoRebirth,
    AutoBattle,
    AutoPickup,
    AutoEquip,
    AutoUsePotionScroll,
    AutoRecyclePotionScroll,
    AutoRecycleEquip,
}

impl AssistToggle {
    pub const fn key(self) -> char {
        match self {
            Self::AutoPlay => 'z',
            Self::AutoRebirth => 'x',
            Self::AutoBattle => 'c',
            Self::AutoPickup => 'v',
            Self::AutoEquip => 'b',
            Self::AutoUsePotionScroll => 'n',
            Self::AutoRecyclePotionScroll => 'm',
            Self::AutoRecycleEquip => ',',
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        <Self as strum::IntoEnumIterator>::iter().find(|toggle| toggle.key() == key)
    }

    /// The pipeline stage this toggle gates, if it gates one.
    pub const fn stage(self) -> Option<AutoActs> {
        match self {
            Self::AutoPlay | Self::AutoRebirth => None,
            Self::AutoBattle => Some(AutoActs::BATTLE),
            Self::AutoPickup => Some(AutoActs::PICKUP),
            Self::AutoEquip => Some(AutoActs::EQUIP),
            Self::AutoUsePotionScroll => Some(AutoActs::USE_POTION_SCROLL),
            Self::AutoRecyclePotionScroll => Some(AutoActs::RECYCLE_POTION_SCROLL),
            Self::AutoRecycleEquip => Some(AutoActs::RECYCLE_EQUIP),
        }
    }
}

/// Assist state of one client. Everything starts switched on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssistLoop {
    pub acts: AutoActs,
    pub auto_play: bool,
    pub auto_rebirth: bool,
}

impl Default for AssistLoop {
    fn default() -> Self {
        Self {
            acts: AutoActs::default(),
            auto_play: true,
            auto_rebirth: true,
        }
    }
}

impl AssistLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self, toggle: AssistToggle) -> bool {
        match toggle {
            AssistToggle::AutoPlay => self.auto_play,
            AssistToggle::AutoRebirth => self.auto_rebirth,
            other => other.stage().is_some_and(|stage| self.acts.contains(stage)),
        }
    }

    /// Flips `toggle` and returns its new state.
    pub fn toggle(&mut self, toggle: AssistToggle) -> bool {
        match toggle {
            AssistToggle::AutoPlay => self.auto_play = !self.auto_play,
            AssistToggle::AutoRebirth => self.auto_rebirth = !self.auto_rebirth,
            other => {
                if let Some(stage) = other.stage() {
                    self.acts.toggle(stage);
                }
            }
        }
        self.is_on(toggle)
    }

    /// Handles a key press; `None` when the key is not bound.
    pub fn press(&mut self, key: char) -> Option<(AssistToggle, bool)> {
        let toggle = AssistToggle::from_key(key)?;
        Some((toggle, self.toggle(toggle)))
    }

    /// The request to send this tick, if any enabled stage finds one.
    pub fn tick(&self, snapshot: &DecisionSnapshot<'_>) -> Option<ActRequest> {
        decide(snapshot, self.acts)
    }

    /// Whether a rebirth should be requested for a player that is `dead`.
    pub fn wants_rebirth(&self, dead: bool) -> bool {
        dead && self.auto_rebirth
    }
}
