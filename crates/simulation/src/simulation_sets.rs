//! Deterministic simulation ordering via `SystemSet` phases.
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – Queued game actions, then the clock tick. Actions always
//!   land on a city that no system has touched yet this tick.
//! * **Simulation** – Short-tick work: utility balancing, then the rolling
//!   budget aggregation that reads the efficiencies it produced.
//! * **PostSim** – Long-tick work, gated on `clock::on_long_tick`: budget
//!   settlement, research progress and effect refresh, home spawning and
//!   achievement evaluation.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain: `PreSim` → `Simulation` → `PostSim`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
    PostSim,
}
