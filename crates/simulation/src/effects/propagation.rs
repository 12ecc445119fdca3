//! Spreads building effects over nearby cells and takes them back again.
//!
//! Every spread is recorded in the city's `EffectTotals` ledger with the exact
//! amount and cell list, so stopping a building subtracts precisely what it
//! added. Research bonuses are read at spread time only.

use std::collections::BTreeSet;

use bevy::prelude::*;

use super::dynamic::DynamicInputs;
use super::types::{Effect, EffectDefinition};
use crate::buildings::{BuildingId, BuildingKind};
use crate::city::City;
use crate::grid::GridRect;
use crate::research::ResearchState;

/// Slack on the ellipse test so cells exactly on the boundary are included.
const ELLIPSE_EPSILON: f64 = 1e-9;

/// Distance from `v` to the half-open span `[lo, hi)`, zero inside it.
#[inline]
fn axis_gap(v: usize, lo: usize, hi: usize) -> usize {
    if v < lo {
        lo - v
    } else if v >= hi {
        v + 1 - hi
    } else {
        0
    }
}

/// Elliptical membership measured from the nearest footprint cell.
fn within_ellipse(footprint: GridRect, x: usize, y: usize, radius_x: u32, radius_y: u32) -> bool {
    let term = |gap: usize, radius: u32| -> Option<f64> {
        if radius == 0 {
            (gap == 0).then_some(0.0)
        } else {
            let t = gap as f64 / radius as f64;
            Some(t * t)
        }
    };
    match (
        term(axis_gap(x, footprint.x0, footprint.x1), radius_x),
        term(axis_gap(y, footprint.y0, footprint.y1), radius_y),
    ) {
        (Some(a), Some(b)) => a + b <= 1.0 + ELLIPSE_EPSILON,
        _ => false,
    }
}

/// Flat indices of every cell within the radius of `footprint` on a
/// `width` x `height` grid. Rectangular spreads use the Chebyshev expansion.
pub fn affected_cells(
    width: usize,
    height: usize,
    footprint: GridRect,
    radius_x: u32,
    radius_y: u32,
    rounded: bool,
) -> Vec<u32> {
    let Some(bounds) = GridRect::padded(
        footprint.x0 as i32,
        footprint.y0 as i32,
        footprint.width() as i32,
        footprint.height() as i32,
        radius_x as i32,
        radius_y as i32,
        width,
        height,
    ) else {
        return Vec::new();
    };
    bounds
        .cells()
        .filter(|&(x, y)| !rounded || within_ellipse(footprint, x, y, radius_x, radius_y))
        .map(|(x, y)| (y * width + x) as u32)
        .collect()
}

fn residents_on(city: &City, cells: &[u32]) -> u32 {
    let width = city.grid.width;
    let occupants: BTreeSet<BuildingId> = cells
        .iter()
        .filter_map(|&c| {
            let c = c as usize;
            city.grid.occupant(c % width, c / width)
        })
        .collect();
    occupants
        .into_iter()
        .filter_map(|id| city.building(id))
        .map(|b| b.def().residents)
        .sum()
}

/// Adds `effect` to every cell within the radius of its source building.
pub fn spread_effect(city: &mut City, effect: Effect, radius_x: u32, radius_y: u32, rounded: bool) {
    let Some(source) = city.building(effect.source) else {
        warn!(
            "Cannot spread {} from missing building {}",
            effect.effect_type.name(),
            effect.source
        );
        return;
    };
    let footprint = source.footprint();
    let efficiency = source.last_efficiency;
    let cells = affected_cells(
        city.grid.width,
        city.grid.height,
        footprint,
        radius_x,
        radius_y,
        rounded,
    );
    if cells.is_empty() {
        return;
    }
    let amount = match effect.dynamic {
        Some(calculation) => {
            let inputs = DynamicInputs {
                efficiency,
                nearby_residents: residents_on(city, &cells),
            };
            calculation.evaluate(effect.magnitude, &inputs)
        }
        None => effect.magnitude,
    };
    city.effects.add(effect, amount, cells);
}

/// Removes every contribution `building` made inside its footprint padded by
/// the given radius. Returns the number of cell contributions removed.
pub fn stop_effects(city: &mut City, building: BuildingId, radius_x: u32, radius_y: u32) -> usize {
    let bounds = match city.building(building) {
        Some(b) => {
            let fp = b.footprint();
            GridRect::padded(
                fp.x0 as i32,
                fp.y0 as i32,
                fp.width() as i32,
                fp.height() as i32,
                radius_x as i32,
                radius_y as i32,
                city.grid.width,
                city.grid.height,
            )
        }
        // Footprint unknown, so sweep the whole grid.
        None => Some(city.grid.full_rect()),
    };
    match bounds {
        Some(rect) => city.effects.remove_within(building, rect),
        None => 0,
    }
}

/// Definition radius for `kind`, including researched bonuses.
pub fn effect_radius(
    def: &EffectDefinition,
    kind: BuildingKind,
    research: &ResearchState,
) -> (u32, u32) {
    let (rx, ry) = def.base_radius(kind.def().area_indicator_radius);
    let bonus = research.radius_bonus(kind, def.effect_type);
    (rx + bonus, ry + bonus)
}

/// Largest radius any of `kind`'s effects can reach, never below the area indicator.
pub fn max_effect_radius(kind: BuildingKind, research: &ResearchState) -> (u32, u32) {
    let indicator = kind.def().area_indicator_radius;
    kind.def()
        .effects
        .iter()
        .map(|def| effect_radius(def, kind, research))
        .fold((indicator, indicator), |(mx, my), (rx, ry)| {
            (mx.max(rx), my.max(ry))
        })
}

/// Spreads every effect in the building's definition.
pub fn apply_building_effects(city: &mut City, building: BuildingId) {
    let Some(kind) = city.building(building).map(|b| b.kind) else {
        return;
    };
    let def = kind.def();
    for effect_def in def.effects {
        let (rx, ry) = effect_radius(effect_def, kind, &city.research);
        let rounded = effect_def.rounded.unwrap_or(def.area_indicator_rounded);
        spread_effect(
            city,
            Effect::from_definition(effect_def, building),
            rx,
            ry,
            rounded,
        );
    }
}

pub fn stop_building_effects(city: &mut City, building: BuildingId) -> usize {
    let (rx, ry) = match city.building(building) {
        Some(b) => max_effect_radius(b.kind, &city.research),
        None => (0, 0),
    };
    stop_effects(city, building, rx, ry)
}

/// Stop then re-spread, picking up new research bonuses and dynamic inputs.
pub fn refresh_building_effects(city: &mut City, building: BuildingId) {
    stop_building_effects(city, building);
    apply_building_effects(city, building);
}

/// Re-spreads every building with a dynamic effect so its totals follow the
/// latest efficiency and nearby residents. Returns how many were refreshed.
pub fn refresh_dynamic_effects(city: &mut City) -> usize {
    let targets: Vec<BuildingId> = city
        .buildings()
        .filter(|b| b.def().effects.iter().any(|e| e.dynamic.is_some()))
        .map(|b| b.id)
        .collect();
    for id in &targets {
        refresh_building_effects(city, *id);
    }
    targets.len()
}

pub fn update_dynamic_effects(mut city: ResMut<City>) {
    let refreshed = refresh_dynamic_effects(&mut city);
    if refreshed > 0 {
        debug!("Refreshed dynamic effects of {refreshed} buildings");
    }
}
