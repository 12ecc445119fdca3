//! Grows housing where jobs outnumber residents.

use bevy::prelude::*;
use rand::Rng;

use crate::buildings::{BuildingId, BuildingKind};
use crate::city::City;
use crate::config::{SPAWNER_ATTEMPTS, SPAWNER_BASE_DEMAND};
use crate::effects::EffectType;
use crate::grid::GridRect;
use crate::placement::Placer;
use crate::sim_rng::SimRng;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SpawnerSettings {
    pub enabled: bool,
    /// Cells sampled per long tick.
    pub attempts: u32,
    pub base_demand: i64,
    pub kind: BuildingKind,
}

impl Default for SpawnerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            attempts: SPAWNER_ATTEMPTS,
            base_demand: SPAWNER_BASE_DEMAND,
            kind: BuildingKind::SmallHouse,
        }
    }
}

pub fn residential_demand(city: &City, settings: &SpawnerSettings) -> i64 {
    city.jobs() as i64 + settings.base_demand - city.population() as i64
}

/// Samples candidate anchors and builds one home on the legal candidate with
/// the highest land value. Spawned homes never replace existing residences.
pub fn spawn_home(
    city: &mut City,
    settings: &SpawnerSettings,
    rng: &mut SimRng,
) -> Option<BuildingId> {
    if !settings.enabled || residential_demand(city, settings) <= 0 {
        return None;
    }
    let def = settings.kind.def();
    if city.width() < def.width || city.height() < def.height {
        return None;
    }
    let max_x = city.width() - def.width;
    let max_y = city.height() - def.height;

    let mut best: Option<(f64, usize, usize)> = None;
    for _ in 0..settings.attempts {
        let x = rng.0.gen_range(0..=max_x);
        let y = rng.0.gen_range(0..=max_y);
        if !city.can_place(settings.kind, x, y, Placer::Spawner) {
            continue;
        }
        let footprint = GridRect {
            x0: x,
            y0: y,
            x1: x + def.width,
            y1: y + def.height,
        };
        let land_value = city.effects().average_in(footprint, EffectType::LandValue);
        if best.is_none_or(|(v, ..)| land_value > v) {
            best = Some((land_value, x, y));
        }
    }

    let (_, x, y) = best?;
    match city.place(settings.kind, x, y, Placer::Spawner) {
        Ok(placement) => {
            debug!("Spawner built {} at ({}, {})", settings.kind.name(), x, y);
            Some(placement.id)
        }
        Err(e) => {
            warn!("Spawner candidate ({}, {}) became invalid: {}", x, y, e);
            None
        }
    }
}

pub fn spawn_homes(
    mut city: ResMut<City>,
    settings: Res<SpawnerSettings>,
    mut rng: ResMut<SimRng>,
) {
    spawn_home(&mut city, &settings, &mut rng);
}
