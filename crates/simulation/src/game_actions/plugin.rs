use bevy::prelude::*;

use super::executor::execute_queued_actions;
use super::result_log::ActionResultLog;
use super::ActionQueue;
use crate::SimulationSet;

/// Registers the action queue, result log and executor. Actions run before the
/// clock advances so a queued pause takes effect on the same tick.
pub struct GameActionsPlugin;

impl Plugin for GameActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionQueue>();
        app.init_resource::<ActionResultLog>();

        app.add_systems(
            FixedUpdate,
            execute_queued_actions
                .before(crate::clock::tick_clock)
                .in_set(SimulationSet::PreSim),
        );
    }
}
