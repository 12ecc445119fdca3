//! # TestCity — headless integration test harness
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `SimulationPlugin`
//! for running integration tests without a window or renderer.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::city_init::NewCityConfig;
use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to set up city state, then call `tick()` to advance the
/// simulation and query/assert on the resulting ECS state.
pub struct TestCity {
    app: App,
}

impl TestCity {
    /// Create a new **blank** city: a default-sized grid with no terrain and
    /// all resources at their defaults.
    pub fn new() -> Self {
        Self::with_size(GRID_WIDTH, GRID_HEIGHT)
    }

    pub fn with_size(width: usize, height: usize) -> Self {
        Self::from_config(NewCityConfig {
            width,
            height,
            terrain_seed: None,
            ..Default::default()
        })
    }

    /// Create a city with generated terrain.
    pub fn with_terrain_seed(seed: i32) -> Self {
        Self::from_config(NewCityConfig {
            terrain_seed: Some(seed),
            ..Default::default()
        })
    }

    fn from_config(config: NewCityConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Insert BEFORE SimulationPlugin so init_resource keeps it.
        app.insert_resource(config);
        app.add_plugins(SimulationPlugin);

        // Run one update so Startup systems execute and the City exists.
        app.update();

        Self { app }
    }
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new()
    }
}
