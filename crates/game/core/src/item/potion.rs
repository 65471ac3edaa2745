use super::{ItemId, pick_by_rate, total_rate};

/// Potion kinds.
///
/// Healing/Acting tiers restore a flat amount of HP/SP, Heal/Act tiers a
/// fraction of the maximum, Span kinds work over several turns, and the
/// vision kinds extend sight. The last three are junk the AI never drinks.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PotionKind {
    MinorHealing,
    MajorHealing,
    GreatHealing,
    MinorHeal,
    MajorHeal,
    CompleteHeal,
    MinorSpanHealing,

    MinorActing,
    MajorActing,
    GreatActing,
    MinorAct,
    MajorAct,
    CompleteAct,
    MinorSpanActing,

    MinorSpanVision,
    MajorSpanVision,
    PerfectSpanVision,

    Empty,
    Nausea,
    Blindness,
}

impl PotionKind {
    /// Relative creation weights.
    const MAKE_RATES: [(PotionKind, u32); 20] = [
        (PotionKind::MinorHealing, 40),
        (PotionKind::MajorHealing, 20),
        (PotionKind::GreatHealing, 10),
        (PotionKind::MinorHeal, 20),
        (PotionKind::MajorHeal, 10),
        (PotionKind::CompleteHeal, 5),
        (PotionKind::MinorSpanHealing, 10),
        (PotionKind::MinorActing, 40),
        (PotionKind::MajorActing, 20),
        (PotionKind::GreatActing, 10),
        (PotionKind::MinorAct, 20),
        (PotionKind::MajorAct, 10),
        (PotionKind::CompleteAct, 5),
        (PotionKind::MinorSpanActing, 10),
        (PotionKind::MinorSpanVision, 10),
        (PotionKind::MajorSpanVision, 5),
        (PotionKind::PerfectSpanVision, 2),
        (PotionKind::Empty, 10),
        (PotionKind::Nausea, 5),
        (PotionKind::Blindness, 5),
    ];

    /// Sum of all make rates; rolls for [`from_make_roll`](Self::from_make_roll)
    /// are drawn from `[0, TOTAL_MAKE_RATE)`.
    pub const TOTAL_MAKE_RATE: u32 = total_rate(&Self::MAKE_RATES);

    pub fn from_make_roll(roll: u32) -> Self {
        pick_by_rate(&Self::MAKE_RATES, roll)
    }

    /// Whether the AI should get rid of this potion at a recycle station.
    pub const fn ai_recyclable(self) -> bool {
        matches!(
            self,
            PotionKind::Empty | PotionKind::Nausea | PotionKind::Blindness
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PotionItem {
    pub id: ItemId,
    pub kind: PotionKind,
}

impl PotionItem {
    pub const fn new(id: ItemId, kind: PotionKind) -> Self {
        Self { id, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_roll_covers_whole_range() {
        assert_eq!(PotionKind::from_make_roll(0), PotionKind::MinorHealing);
        assert_eq!(PotionKind::from_make_roll(39), PotionKind::MinorHealing);
        assert_eq!(PotionKind::from_make_roll(40), PotionKind::MajorHealing);
        assert_eq!(
            PotionKind::from_make_roll(PotionKind::TOTAL_MAKE_RATE - 1),
            PotionKind::Blindness
        );
    }

    #[test]
    fn only_junk_is_recyclable() {
        assert!(PotionKind::Empty.ai_recyclable());
        assert!(PotionKind::Nausea.ai_recyclable());
        assert!(!PotionKind::MinorHealing.ai_recyclable());
        assert!(!PotionKind::PerfectSpanVision.ai_recyclable());
    }
}
