//! Builder methods (consume and return `Self`).

use bevy::prelude::*;

use crate::buildings::{BuildingId, BuildingKind};
use crate::city::City;
use crate::clock::SimClock;
use crate::footprint::FootprintType;
use crate::game_actions::{ActionQueue, ActionSource, GameAction};
use crate::placement::Placer;
use crate::spawner::SpawnerSettings;

use super::TestCity;

impl TestCity {
    /// Set the city treasury to the given amount.
    pub fn with_budget(mut self, treasury: f64) -> Self {
        self.city_mut().budget.treasury = treasury;
        self
    }

    /// Place a building directly, bypassing the action queue and its costs.
    /// Panics if the placement is illegal.
    pub fn with_building(mut self, kind: BuildingKind, x: usize, y: usize) -> Self {
        self.place(kind, x, y);
        self
    }

    /// Overwrite the terrain bits of a single cell.
    pub fn with_terrain(mut self, x: usize, y: usize, terrain: FootprintType) -> Self {
        self.city_mut().set_terrain(x, y, terrain);
        self
    }

    /// Overwrite the terrain bits of a rectangle (inclusive).
    pub fn with_terrain_rect(
        mut self,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
        terrain: FootprintType,
    ) -> Self {
        let mut city = self.city_mut();
        for y in y0..=y1 {
            for x in x0..=x1 {
                city.set_terrain(x, y, terrain);
            }
        }
        self
    }

    /// Turn the home spawner off so it cannot disturb exact assertions.
    pub fn without_spawner(mut self) -> Self {
        self.app
            .world_mut()
            .resource_mut::<SpawnerSettings>()
            .enabled = false;
        self
    }

    pub fn paused(mut self) -> Self {
        self.app.world_mut().resource_mut::<SimClock>().paused = true;
        self
    }

    /// Place a building and return its id. Panics if the placement is illegal.
    pub fn place(&mut self, kind: BuildingKind, x: usize, y: usize) -> BuildingId {
        match self.city_mut().place(kind, x, y, Placer::Player) {
            Ok(placement) => placement.id,
            Err(e) => panic!("cannot place {} at ({x}, {y}): {e}", kind.name()),
        }
    }

    /// Queue a player action for the next tick.
    pub fn queue(&mut self, action: GameAction) {
        let tick = self.clock().tick;
        self.app
            .world_mut()
            .resource_mut::<ActionQueue>()
            .push(tick, ActionSource::Player, action);
    }

    pub fn city_mut(&mut self) -> Mut<'_, City> {
        self.app.world_mut().resource_mut::<City>()
    }
}
