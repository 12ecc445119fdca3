use bevy::prelude::*;

use crate::achievements::AchievementTracker;
use crate::budget::Budget;
use crate::buildings::{Building, BuildingId};
use crate::city::City;
use crate::clock::SimClock;
use crate::config::SHORT_TICKS_PER_LONG_TICK;
use crate::effects::EffectType;
use crate::game_actions::{ActionResult, ActionResultLog};

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run `n` short ticks of the FixedUpdate schedule.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Run whole days; each ends on a long tick.
    pub fn tick_days(&mut self, days: u32) {
        self.tick(days * SHORT_TICKS_PER_LONG_TICK);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn city(&self) -> &City {
        self.resource::<City>()
    }

    pub fn budget(&self) -> &Budget {
        &self.city().budget
    }

    pub fn clock(&self) -> &SimClock {
        self.resource::<SimClock>()
    }

    pub fn achievements(&self) -> &AchievementTracker {
        self.resource::<AchievementTracker>()
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.city().building(id)
    }

    pub fn building_count(&self) -> usize {
        self.city().building_count()
    }

    pub fn effect_at(&self, x: usize, y: usize, effect_type: EffectType) -> f64 {
        self.city().effect_at(x, y, effect_type)
    }

    /// Result of the most recently executed action.
    pub fn last_result(&self) -> Option<&ActionResult> {
        self.resource::<ActionResultLog>().latest().map(|(_, r)| r)
    }
}
