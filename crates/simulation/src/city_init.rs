use bevy::prelude::*;

use crate::city::City;
use crate::config::{GRID_HEIGHT, GRID_WIDTH};

/// Parameters for the city created at startup when none is present.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct NewCityConfig {
    pub id: u64,
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// `None` leaves the grid without terrain.
    pub terrain_seed: Option<i32>,
}

impl Default for NewCityConfig {
    fn default() -> Self {
        Self {
            id: 1,
            name: "New City".to_string(),
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            terrain_seed: Some(42),
        }
    }
}

pub fn build_city(config: &NewCityConfig) -> City {
    let mut city = City::new(config.id, config.name.clone(), config.width, config.height);
    if let Some(seed) = config.terrain_seed {
        city.generate_terrain(seed);
    }
    city
}

/// Startup system. A `City` inserted before startup (a loaded save, a test
/// fixture) is kept as is.
pub fn init_city(mut commands: Commands, existing: Option<Res<City>>, config: Res<NewCityConfig>) {
    if existing.is_some() {
        return;
    }
    info!(
        "Creating {}x{} city \"{}\"",
        config.width, config.height, config.name
    );
    commands.insert_resource(build_city(&config));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_city_has_no_terrain() {
        let config = NewCityConfig {
            terrain_seed: None,
            width: 8,
            height: 6,
            ..Default::default()
        };
        let city = build_city(&config);
        assert_eq!((city.width(), city.height()), (8, 6));
        assert!(city.grid().cells.iter().all(|c| c.flags.is_empty()));
    }

    #[test]
    fn test_seeded_city_matches_terrain_generation() {
        let city = build_city(&NewCityConfig::default());
        let mut grid = crate::grid::Grid::new(GRID_WIDTH, GRID_HEIGHT);
        crate::terrain::generate_terrain(&mut grid, 42);
        assert_eq!(city.grid(), &grid);
    }
}
