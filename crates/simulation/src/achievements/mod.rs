pub(crate) mod systems;
pub mod types;

pub use systems::{check_achievements, evaluate_achievements};
pub use types::{Achievement, AchievementTracker, AchievementUnlocked};

use bevy::prelude::*;

use crate::clock::on_long_tick;
use crate::SaveableAppExt;

pub struct AchievementsPlugin;

impl Plugin for AchievementsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AchievementTracker>()
            .add_event::<AchievementUnlocked>()
            .register_saveable::<AchievementTracker>()
            .add_systems(
                FixedUpdate,
                check_achievements
                    .after(crate::economy::settle_daily_budget)
                    .after(crate::research::advance_research)
                    .run_if(on_long_tick)
                    .in_set(crate::SimulationSet::PostSim),
            );
    }
}
