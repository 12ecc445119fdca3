//! Action executor: drains the [`ActionQueue`] each fixed-update tick and
//! applies every queued [`GameAction`] to the [`City`], recording results in
//! the [`ActionResultLog`].
//!
//! Each action is validated completely before anything is mutated, so a
//! failed action leaves the city untouched.

use bevy::prelude::*;

use crate::buildings::BuildingId;
use crate::city::City;
use crate::clock::SimClock;
use crate::config::{DEMOLITION_FEE_PER_TILE, REMOVE_REFUND_FRACTION};
use crate::placement::Placer;

use super::result_log::ActionResultLog;
use super::{ActionError, ActionQueue, ActionResult, GameAction};

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Drains all pending actions from the queue and executes them in order.
pub fn execute_queued_actions(
    mut queue: ResMut<ActionQueue>,
    mut log: ResMut<ActionResultLog>,
    mut city: ResMut<City>,
    mut clock: ResMut<SimClock>,
) {
    for queued in queue.drain() {
        let result = execute_action(&queued.action, &mut city, &mut clock);
        if let ActionResult::Error(e) = &result {
            debug!("Action {:?} from {:?} failed: {}", queued.action, queued.source, e);
        }
        log.push(queued.action, result);
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub fn execute_action(action: &GameAction, city: &mut City, clock: &mut SimClock) -> ActionResult {
    match *action {
        GameAction::Build { kind, x, y } => execute_build(kind, x, y, city),
        GameAction::Remove { building } => execute_remove(building, city),
        GameAction::Demolish { x, y } => execute_demolish(x, y, city),
        GameAction::Move { building, x, y } => execute_move(building, x, y, city),
        GameAction::SetTaxRate { category, rate } => {
            if !rate.is_finite() {
                return invalid(format!("tax rate {rate} is not a number"));
            }
            let stored = city.budget.tax_rates.set(category, rate);
            clamped_result(rate, stored)
        }
        GameAction::SetServiceAllocation {
            service,
            allocation,
        } => {
            if !allocation.is_finite() {
                return invalid(format!("allocation {allocation} is not a number"));
            }
            let stored = city.budget.service_allocations.set(service, allocation);
            clamped_result(allocation, stored)
        }
        GameAction::SetImportLimit { resource, limit } => {
            if !limit.is_finite() || limit < 0.0 {
                return invalid(format!("import limit {limit} must be a non-negative number"));
            }
            city.budget.import_limits.set(resource, limit);
            ActionResult::Success
        }
        GameAction::StartResearch { technology } => match city.research.start(technology) {
            Ok(()) => ActionResult::Success,
            Err(e) => invalid(e.to_string()),
        },
        GameAction::SetPaused { paused } => {
            clock.paused = paused;
            ActionResult::Success
        }
        GameAction::SetSpeed { speed } => {
            if speed == 0 || speed > SimClock::MAX_SPEED {
                return invalid(format!("speed must be 1..={}", SimClock::MAX_SPEED));
            }
            clock.speed = speed;
            ActionResult::Success
        }
    }
}

// ---------------------------------------------------------------------------
// Execution functions
// ---------------------------------------------------------------------------

fn invalid(msg: String) -> ActionResult {
    ActionResult::Error(ActionError::InvalidAction(msg))
}

fn clamped_result(requested: f32, stored: f32) -> ActionResult {
    if requested == stored {
        ActionResult::Success
    } else {
        ActionResult::SuccessWithWarning(format!("{requested} clamped to {stored}"))
    }
}

fn displaced_result(displaced: usize) -> ActionResult {
    if displaced == 0 {
        ActionResult::Success
    } else {
        ActionResult::SuccessWithWarning(format!("replaced {displaced} residence(s)"))
    }
}

fn execute_build(kind: crate::buildings::BuildingKind, x: u32, y: u32, city: &mut City) -> ActionResult {
    let cost = kind.def().cost;
    if city.budget.treasury < cost {
        return ActionResult::Error(ActionError::InsufficientFunds);
    }
    match city.place(kind, x as usize, y as usize, Placer::Player) {
        Ok(placement) => {
            city.budget.treasury -= cost;
            displaced_result(placement.displaced.len())
        }
        Err(e) => ActionResult::Error(e.into()),
    }
}

fn execute_remove(building: BuildingId, city: &mut City) -> ActionResult {
    match city.remove(building) {
        Some(removed) => {
            city.budget.treasury += removed.def().cost * REMOVE_REFUND_FRACTION;
            ActionResult::Success
        }
        None => ActionResult::Error(ActionError::NotFound),
    }
}

fn execute_demolish(x: u32, y: u32, city: &mut City) -> ActionResult {
    let (x, y) = (x as usize, y as usize);
    if !city.grid().in_bounds(x, y) {
        return ActionResult::Error(ActionError::OutOfBounds);
    }
    let Some(fee) = city
        .building_at(x, y)
        .map(|b| b.tile_count() as f64 * DEMOLITION_FEE_PER_TILE)
    else {
        return ActionResult::Error(ActionError::NotFound);
    };
    if city.budget.treasury < fee {
        return ActionResult::Error(ActionError::InsufficientFunds);
    }
    if city.demolish_at(x, y).is_some() {
        city.budget.treasury -= fee;
    }
    ActionResult::Success
}

fn execute_move(building: BuildingId, x: u32, y: u32, city: &mut City) -> ActionResult {
    match city.relocate(building, x as usize, y as usize) {
        Ok(displaced) => displaced_result(displaced.len()),
        Err(e) => ActionResult::Error(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{ImportResource, TaxCategory};
    use crate::buildings::BuildingKind;
    use crate::placement::FootprintConflict;
    use crate::research::Technology;

    fn setup() -> (City, SimClock) {
        (City::new(1, "Actions", 16, 16), SimClock::default())
    }

    #[test]
    fn test_build_deducts_cost() {
        let (mut city, mut clock) = setup();
        let start = city.budget.treasury;
        let result = execute_action(
            &GameAction::Build {
                kind: BuildingKind::Park,
                x: 1,
                y: 1,
            },
            &mut city,
            &mut clock,
        );
        assert_eq!(result, ActionResult::Success);
        assert_eq!(city.budget.treasury, start - BuildingKind::Park.def().cost);
    }

    #[test]
    fn test_build_out_of_bounds() {
        let (mut city, mut clock) = setup();
        let result = execute_action(
            &GameAction::Build {
                kind: BuildingKind::Factory,
                x: 15,
                y: 15,
            },
            &mut city,
            &mut clock,
        );
        assert_eq!(result, ActionResult::Error(ActionError::OutOfBounds));
    }

    #[test]
    fn test_build_without_funds_does_nothing() {
        let (mut city, mut clock) = setup();
        city.budget.treasury = 10.0;
        let result = execute_action(
            &GameAction::Build {
                kind: BuildingKind::Factory,
                x: 0,
                y: 0,
            },
            &mut city,
            &mut clock,
        );
        assert_eq!(result, ActionResult::Error(ActionError::InsufficientFunds));
        assert_eq!(city.building_count(), 0);
        assert_eq!(city.budget.treasury, 10.0);
    }

    #[test]
    fn test_build_conflict_is_reported() {
        let (mut city, mut clock) = setup();
        let store = city
            .place(BuildingKind::CornerStore, 0, 0, Placer::Player)
            .unwrap()
            .id;
        let result = execute_action(
            &GameAction::Build {
                kind: BuildingKind::Park,
                x: 0,
                y: 0,
            },
            &mut city,
            &mut clock,
        );
        assert_eq!(
            result,
            ActionResult::Error(ActionError::FootprintConflict(
                FootprintConflict::Occupied {
                    x: 0,
                    y: 0,
                    by: store
                }
            ))
        );
    }

    #[test]
    fn test_tower_over_house_warns() {
        let (mut city, mut clock) = setup();
        city.place(BuildingKind::SmallHouse, 0, 0, Placer::Player).unwrap();
        let result = execute_action(
            &GameAction::Build {
                kind: BuildingKind::ApartmentTower,
                x: 0,
                y: 0,
            },
            &mut city,
            &mut clock,
        );
        assert_eq!(result.warning(), Some("replaced 1 residence(s)"));
    }

    #[test]
    fn test_remove_refunds_and_missing_is_not_found() {
        let (mut city, mut clock) = setup();
        let id = city.place(BuildingKind::Park, 0, 0, Placer::Player).unwrap().id;
        let start = city.budget.treasury;
        let action = GameAction::Remove { building: id };
        assert_eq!(execute_action(&action, &mut city, &mut clock), ActionResult::Success);
        let refund = BuildingKind::Park.def().cost * REMOVE_REFUND_FRACTION;
        assert_eq!(city.budget.treasury, start + refund);
        assert_eq!(
            execute_action(&action, &mut city, &mut clock),
            ActionResult::Error(ActionError::NotFound)
        );
    }

    #[test]
    fn test_demolish_charges_per_tile() {
        let (mut city, mut clock) = setup();
        city.place(BuildingKind::Factory, 2, 2, Placer::Player).unwrap();
        let start = city.budget.treasury;
        let result = execute_action(&GameAction::Demolish { x: 4, y: 3 }, &mut city, &mut clock);
        assert_eq!(result, ActionResult::Success);
        assert_eq!(city.budget.treasury, start - 6.0 * DEMOLITION_FEE_PER_TILE);
        assert_eq!(
            execute_action(&GameAction::Demolish { x: 4, y: 3 }, &mut city, &mut clock),
            ActionResult::Error(ActionError::NotFound)
        );
        assert_eq!(
            execute_action(&GameAction::Demolish { x: 99, y: 3 }, &mut city, &mut clock),
            ActionResult::Error(ActionError::OutOfBounds)
        );
    }

    #[test]
    fn test_move_keeps_id() {
        let (mut city, mut clock) = setup();
        let id = city.place(BuildingKind::School, 0, 0, Placer::Player).unwrap().id;
        let result = execute_action(
            &GameAction::Move {
                building: id,
                x: 8,
                y: 8,
            },
            &mut city,
            &mut clock,
        );
        assert_eq!(result, ActionResult::Success);
        assert_eq!(city.grid().occupant(9, 9), Some(id));
        assert_eq!(
            execute_action(
                &GameAction::Move {
                    building: BuildingId(77),
                    x: 0,
                    y: 0
                },
                &mut city,
                &mut clock
            ),
            ActionResult::Error(ActionError::NotFound)
        );
    }

    #[test]
    fn test_tax_rate_clamps_with_warning() {
        let (mut city, mut clock) = setup();
        let result = execute_action(
            &GameAction::SetTaxRate {
                category: TaxCategory::Income,
                rate: 0.9,
            },
            &mut city,
            &mut clock,
        );
        assert!(result.is_success());
        assert!(result.warning().is_some());
        assert_eq!(city.budget.tax_rates.income, 0.5);

        let nan = execute_action(
            &GameAction::SetTaxRate {
                category: TaxCategory::Income,
                rate: f32::NAN,
            },
            &mut city,
            &mut clock,
        );
        assert!(matches!(nan, ActionResult::Error(ActionError::InvalidAction(_))));
    }

    #[test]
    fn test_import_limit_rejects_negative() {
        let (mut city, mut clock) = setup();
        let result = execute_action(
            &GameAction::SetImportLimit {
                resource: ImportResource::Water,
                limit: -1.0,
            },
            &mut city,
            &mut clock,
        );
        assert!(!result.is_success());
        assert_eq!(city.budget.import_limits.water, 50.0);
    }

    #[test]
    fn test_research_twice_is_invalid() {
        let (mut city, mut clock) = setup();
        let action = GameAction::StartResearch {
            technology: Technology::SchoolBuses,
        };
        assert!(execute_action(&action, &mut city, &mut clock).is_success());
        assert!(!execute_action(&action, &mut city, &mut clock).is_success());
    }

    #[test]
    fn test_speed_and_pause() {
        let (mut city, mut clock) = setup();
        assert!(execute_action(&GameAction::SetSpeed { speed: 4 }, &mut city, &mut clock)
            .is_success());
        assert_eq!(clock.speed, 4);
        assert!(!execute_action(&GameAction::SetSpeed { speed: 0 }, &mut city, &mut clock)
            .is_success());
        execute_action(&GameAction::SetPaused { paused: true }, &mut city, &mut clock);
        assert!(clock.paused);
    }
}
