//! Building-type policies consulted by the footprint validator.

use super::Placer;
use crate::buildings::BuildingDef;

/// What the validator should do with an occupied residence cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidenceVerdict {
    /// Remove the residence as part of the placement.
    Displace,
    /// The cell is taken; ordinary occupancy conflict.
    Occupied,
    /// The rule itself forbids overwriting.
    Refuse,
}

/// Decides whether an existing residence may be built over.
///
/// Only building types flagged `can_build_on_residence` may replace homes, and
/// spawner placements never replace any residence.
pub struct ResidenceRule;

impl ResidenceRule {
    pub fn check(new: &BuildingDef, existing: &BuildingDef, placer: Placer) -> ResidenceVerdict {
        if !existing.is_residence() || !new.can_build_on_residence {
            return ResidenceVerdict::Occupied;
        }
        match placer {
            Placer::Player => ResidenceVerdict::Displace,
            Placer::Spawner => ResidenceVerdict::Refuse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::BuildingKind;

    #[test]
    fn test_player_tower_displaces_house() {
        let tower = BuildingKind::ApartmentTower.def();
        let house = BuildingKind::SmallHouse.def();
        assert_eq!(
            ResidenceRule::check(tower, house, Placer::Player),
            ResidenceVerdict::Displace
        );
    }

    #[test]
    fn test_spawner_never_displaces() {
        let tower = BuildingKind::ApartmentTower.def();
        let house = BuildingKind::SmallHouse.def();
        assert_eq!(
            ResidenceRule::check(tower, house, Placer::Spawner),
            ResidenceVerdict::Refuse
        );
    }

    #[test]
    fn test_non_residence_is_plain_occupancy() {
        let plaza = BuildingKind::ShoppingPlaza.def();
        let store = BuildingKind::CornerStore.def();
        assert_eq!(
            ResidenceRule::check(plaza, store, Placer::Player),
            ResidenceVerdict::Occupied
        );
        let house = BuildingKind::SmallHouse.def();
        let duplex = BuildingKind::Duplex.def();
        assert_eq!(
            ResidenceRule::check(house, duplex, Placer::Player),
            ResidenceVerdict::Occupied
        );
    }
}
