//! When to drink, read or throw away consumables.

use super::{AutoActs, DecisionSnapshot, VitalsView, select_recycle_equip};
use crate::actor::ActRequest;
use crate::env::FieldObjectKind;
use crate::item::{PotionKind, ScrollKind};

/// Whether drinking a potion of `kind` helps right now.
///
/// Flat restores wait until the missing amount exceeds what they restore;
/// fractional ones trigger on a share of the maximum. Junk potions never do.
pub fn should_drink_potion(kind: PotionKind, vitals: &VitalsView) -> bool {
    let VitalsView {
        hp,
        hp_max,
        sp,
        sp_max,
        sight,
        required_sight,
    } = *vitals;

    match kind {
        PotionKind::MinorHealing => hp_max - hp > 10.0,
        PotionKind::MajorHealing => hp_max - hp > 50.0,
        PotionKind::GreatHealing => hp_max - hp > 100.0,

        PotionKind::MinorActing => sp_max - sp > 10.0,
        PotionKind::MajorActing => sp_max - sp > 50.0,
        PotionKind::GreatActing => sp_max - sp > 100.0,

        PotionKind::MinorHeal => hp_max - hp > hp_max / 10.0,
        PotionKind::MajorHeal => hp_max / 2.0 > hp,
        PotionKind::CompleteHeal => hp_max / 10.0 > hp,

        PotionKind::MinorAct => sp_max - sp > sp_max / 10.0,
        PotionKind::MajorAct => sp_max / 2.0 > sp,
        PotionKind::CompleteAct => sp_max / 10.0 > sp,

        PotionKind::MinorSpanHealing => hp_max / 2.0 > hp,
        PotionKind::MinorSpanActing => sp_max / 2.0 > sp,

        PotionKind::MinorSpanVision
        | PotionKind::MajorSpanVision
        | PotionKind::PerfectSpanVision => sight <= required_sight,

        PotionKind::Empty | PotionKind::Nausea | PotionKind::Blindness => false,
    }
}

/// Only a floor map is worth reading, and only while the floor is not fully explored.
pub fn should_read_scroll(kind: ScrollKind, exploration_rate: f64) -> bool {
    kind == ScrollKind::FloorMap && exploration_rate < 1.0
}

pub fn should_recycle_potion(kind: PotionKind) -> bool {
    kind.ai_recyclable()
}

pub fn should_recycle_scroll(kind: ScrollKind) -> bool {
    kind.ai_recyclable()
}

/// First potion worth drinking, else first scroll worth reading.
pub fn select_consumable(snapshot: &DecisionSnapshot<'_>) -> Option<ActRequest> {
    let actor = &snapshot.actor;

    if let Some(potion) = actor
        .potion_bag
        .iter()
        .find(|potion| should_drink_potion(potion.kind, &actor.vitals))
    {
        return Some(ActRequest::DrinkPotion { item: potion.id });
    }

    let exploration = snapshot.surroundings.exploration_rate;
    actor
        .scroll_bag
        .iter()
        .find(|scroll| should_read_scroll(scroll.kind, exploration))
        .map(|scroll| ActRequest::ReadScroll { item: scroll.id })
}

/// Junk to hand to the recycle station the actor is standing on.
///
/// Floating actors cannot reach the station. Potions go first, then scrolls
/// (both gated by [`AutoActs::RECYCLE_POTION_SCROLL`]), then the weakest
/// equipment (gated by [`AutoActs::RECYCLE_EQUIP`]).
pub fn select_recycle(snapshot: &DecisionSnapshot<'_>, acts: AutoActs) -> Option<ActRequest> {
    let actor = &snapshot.actor;
    if actor.is_floating() {
        return None;
    }
    if !snapshot
        .surroundings
        .standing_on()
        .is_some_and(FieldObjectKind::is_recycle_station)
    {
        return None;
    }

    if acts.contains(AutoActs::RECYCLE_POTION_SCROLL) {
        if let Some(potion) = actor
            .potion_bag
            .iter()
            .find(|potion| should_recycle_potion(potion.kind))
        {
            return Some(ActRequest::Recycle { item: potion.id });
        }
        if let Some(scroll) = actor
            .scroll_bag
            .iter()
            .find(|scroll| should_recycle_scroll(scroll.kind))
        {
            return Some(ActRequest::Recycle { item: scroll.id });
        }
    }

    if acts.contains(AutoActs::RECYCLE_EQUIP) {
        return select_recycle_equip(actor.equip_bag).map(|item| ActRequest::Recycle { item: item.id });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vitals(hp: f64, hp_max: f64, sp: f64, sp_max: f64) -> VitalsView {
        VitalsView {
            hp,
            hp_max,
            sp,
            sp_max,
            sight: 5.0,
            required_sight: 4.0,
        }
    }

    #[test]
    fn minor_healing_threshold() {
        assert!(should_drink_potion(
            PotionKind::MinorHealing,
            &vitals(89.0, 100.0, 0.0, 0.0)
        ));
        assert!(!should_drink_potion(
            PotionKind::MinorHealing,
            &vitals(91.0, 100.0, 0.0, 0.0)
        ));
        // exactly 10 missing is not enough
        assert!(!should_drink_potion(
            PotionKind::MinorHealing,
            &vitals(90.0, 100.0, 0.0, 0.0)
        ));
    }

    #[test]
    fn flat_tiers_scale_with_missing_amount() {
        let v = vitals(140.0, 200.0, 0.0, 200.0);
        assert!(should_drink_potion(PotionKind::MajorHealing, &v));
        assert!(!should_drink_potion(PotionKind::GreatHealing, &v));
        assert!(should_drink_potion(PotionKind::GreatActing, &v));
    }

    #[test]
    fn fractional_tiers() {
        let v = vitals(40.0, 100.0, 95.0, 100.0);
        assert!(should_drink_potion(PotionKind::MinorHeal, &v));
        assert!(should_drink_potion(PotionKind::MajorHeal, &v));
        assert!(should_drink_potion(PotionKind::MinorSpanHealing, &v));
        assert!(!should_drink_potion(PotionKind::CompleteHeal, &v));
        assert!(!should_drink_potion(PotionKind::MinorAct, &v));
        assert!(!should_drink_potion(PotionKind::MajorAct, &v));

        let low = vitals(9.0, 100.0, 9.0, 100.0);
        assert!(should_drink_potion(PotionKind::CompleteHeal, &low));
        assert!(should_drink_potion(PotionKind::CompleteAct, &low));
        assert!(should_drink_potion(PotionKind::MinorSpanActing, &low));
    }

    #[test]
    fn vision_potions_follow_required_sight() {
        let mut v = vitals(100.0, 100.0, 100.0, 100.0);
        assert!(!should_drink_potion(PotionKind::MinorSpanVision, &v));
        v.sight = 4.0;
        assert!(should_drink_potion(PotionKind::PerfectSpanVision, &v));
    }

    #[test]
    fn junk_is_never_drunk() {
        let v = vitals(0.0, 100.0, 0.0, 100.0);
        for kind in [PotionKind::Empty, PotionKind::Nausea, PotionKind::Blindness] {
            assert!(!should_drink_potion(kind, &v));
            assert!(should_recycle_potion(kind));
        }
        assert!(!should_recycle_potion(PotionKind::MinorHeal));
    }

    #[test]
    fn floor_map_only_until_explored() {
        assert!(should_read_scroll(ScrollKind::FloorMap, 0.4));
        assert!(!should_read_scroll(ScrollKind::FloorMap, 1.0));
        assert!(!should_read_scroll(ScrollKind::Teleport, 0.0));
        assert!(should_recycle_scroll(ScrollKind::Forget));
        assert!(!should_recycle_scroll(ScrollKind::FloorMap));
    }
}
