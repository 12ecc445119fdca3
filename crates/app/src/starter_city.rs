//! The opening moves of a fresh headless city, issued through the action
//! queue like any player input.

use simulation::budget::{TaxCategory, ServiceCategory};
use simulation::buildings::BuildingKind;
use simulation::game_actions::GameAction;

const STARTER_BUILDINGS: &[(BuildingKind, u32, u32)] = &[
    (BuildingKind::PowerPlant, 4, 4),
    (BuildingKind::WaterTower, 8, 4),
    (BuildingKind::SmallHouse, 10, 8),
    (BuildingKind::SmallHouse, 11, 8),
    (BuildingKind::SmallHouse, 12, 8),
    (BuildingKind::Duplex, 10, 10),
    (BuildingKind::Duplex, 13, 10),
    (BuildingKind::CornerStore, 14, 8),
    (BuildingKind::Park, 12, 12),
    (BuildingKind::PoliceStation, 16, 8),
    (BuildingKind::School, 16, 11),
];

/// Builds around `(origin_x, origin_y)`. Placements that hit water or each
/// other simply fail in the executor and show up in the result log.
pub fn starter_actions(origin_x: u32, origin_y: u32) -> Vec<GameAction> {
    let mut actions: Vec<GameAction> = STARTER_BUILDINGS
        .iter()
        .map(|&(kind, dx, dy)| GameAction::Build {
            kind,
            x: origin_x + dx,
            y: origin_y + dy,
        })
        .collect();
    actions.push(GameAction::SetTaxRate {
        category: TaxCategory::Property,
        rate: 0.07,
    });
    actions.push(GameAction::SetServiceAllocation {
        service: ServiceCategory::Parks,
        allocation: 0.8,
    });
    actions
}
