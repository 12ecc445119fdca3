//! The `City` resource: grid, building arena, effect totals and budget.
//!
//! The grid and the arena are only mutated together (see `placement`), and
//! the effect totals only through `effects::propagation`, so every occupied
//! cell maps to exactly one live building.

use std::collections::BTreeSet;
use std::fmt;

use bevy::prelude::*;

use crate::area::buildings_in_area;
use crate::budget::Budget;
use crate::buildings::{Building, BuildingId};
use crate::config::MAX_BUILDING_IDS;
use crate::effects::{EffectTotals, EffectType};
use crate::footprint::FootprintType;
use crate::grid::Grid;
use crate::research::ResearchState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityError {
    GridSize { width: usize, height: usize },
    DuplicateBuilding(BuildingId),
    /// An id (or the next id to hand out) beyond `MAX_BUILDING_IDS`.
    IdOutOfRange(u32),
    BuildingOutOfBounds(BuildingId),
    /// A cell disagrees with the building list about who occupies it.
    CellMismatch { x: usize, y: usize },
    EffectShape,
}

impl fmt::Display for CityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CityError::GridSize { width, height } => {
                write!(f, "grid cell count does not match {width}x{height}")
            }
            CityError::DuplicateBuilding(id) => write!(f, "building {id} appears twice"),
            CityError::IdOutOfRange(id) => {
                write!(f, "building id {id} exceeds the limit of {MAX_BUILDING_IDS}")
            }
            CityError::BuildingOutOfBounds(id) => write!(f, "building {id} is off the grid"),
            CityError::CellMismatch { x, y } => {
                write!(f, "cell ({x}, {y}) disagrees with the building list")
            }
            CityError::EffectShape => write!(f, "effect totals do not fit the grid"),
        }
    }
}

impl std::error::Error for CityError {}

#[derive(Resource, Debug, Clone)]
pub struct City {
    id: u64,
    name: String,
    pub(crate) grid: Grid,
    /// Arena indexed by `BuildingId`. Removed buildings leave a `None` hole.
    pub(crate) buildings: Vec<Option<Building>>,
    pub(crate) effects: EffectTotals,
    pub budget: Budget,
    pub research: ResearchState,
    /// Days settled so far.
    pub day: u32,
}

impl City {
    pub fn new(id: u64, name: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            id,
            name: name.into(),
            grid: Grid::new(width, height),
            buildings: Vec::new(),
            effects: EffectTotals::new(width, height),
            budget: Budget::default(),
            research: ResearchState::default(),
            day: 0,
        }
    }

    /// Reassembles a city from persisted parts, checking that the grid and the
    /// building list agree. Occupancy flags are re-stamped from the buildings.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: u64,
        name: String,
        mut grid: Grid,
        buildings: Vec<Building>,
        budget: Budget,
        research: ResearchState,
        effects: EffectTotals,
        day: u32,
        next_id: u32,
    ) -> Result<Self, CityError> {
        let (width, height) = (grid.width, grid.height);
        if grid.cells.len() != width * height {
            return Err(CityError::GridSize { width, height });
        }
        if effects.width() != width || effects.height() != height {
            return Err(CityError::EffectShape);
        }

        if next_id > MAX_BUILDING_IDS {
            return Err(CityError::IdOutOfRange(next_id));
        }
        if let Some(b) = buildings.iter().find(|b| b.id.0 >= MAX_BUILDING_IDS) {
            return Err(CityError::IdOutOfRange(b.id.0));
        }

        let arena_len = buildings
            .iter()
            .map(|b| b.id.index() + 1)
            .max()
            .unwrap_or(0)
            .max(next_id as usize);
        let mut arena: Vec<Option<Building>> = vec![None; arena_len];
        let mut expected: Vec<Option<(BuildingId, FootprintType)>> = vec![None; width * height];
        for building in buildings {
            if !grid.rect_in_bounds(building.x, building.y, building.width, building.height) {
                return Err(CityError::BuildingOutOfBounds(building.id));
            }
            if arena[building.id.index()].is_some() {
                return Err(CityError::DuplicateBuilding(building.id));
            }
            for (x, y) in building.footprint().cells() {
                let slot = &mut expected[y * width + x];
                if slot.is_some() {
                    return Err(CityError::CellMismatch { x, y });
                }
                *slot = Some((building.id, building.def().produces));
            }
            let index = building.id.index();
            arena[index] = Some(building);
        }

        for (index, (cell, expected)) in grid.cells.iter_mut().zip(&expected).enumerate() {
            cell.flags.remove(FootprintType::DYNAMIC);
            match *expected {
                Some((id, produces)) if cell.building == Some(id) => {
                    cell.flags.insert(produces & FootprintType::DYNAMIC);
                }
                None if cell.building.is_none() => {}
                _ => {
                    return Err(CityError::CellMismatch {
                        x: index % width,
                        y: index / width,
                    })
                }
            }
        }

        Ok(Self {
            id,
            name,
            grid,
            buildings: arena,
            effects,
            budget,
            research,
            day,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Replaces the terrain bits of one cell; occupancy bits are left alone.
    pub fn set_terrain(&mut self, x: usize, y: usize, terrain: FootprintType) {
        if !self.grid.in_bounds(x, y) {
            return;
        }
        let cell = self.grid.get_mut(x, y);
        cell.flags = (cell.flags & FootprintType::DYNAMIC) | (terrain & FootprintType::MUST_BE_ON);
    }

    pub fn generate_terrain(&mut self, seed: i32) {
        crate::terrain::generate_terrain(&mut self.grid, seed);
    }

    pub fn effects(&self) -> &EffectTotals {
        &self.effects
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id.index()).and_then(Option::as_ref)
    }

    pub fn building_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        self.buildings.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter().flatten()
    }

    pub fn buildings_mut(&mut self) -> impl Iterator<Item = &mut Building> {
        self.buildings.iter_mut().flatten()
    }

    pub fn building_count(&self) -> usize {
        self.buildings().count()
    }

    /// The id the next placed building will receive.
    pub fn next_id(&self) -> BuildingId {
        BuildingId(self.buildings.len() as u32)
    }

    pub fn building_at(&self, x: usize, y: usize) -> Option<&Building> {
        if !self.grid.in_bounds(x, y) {
            return None;
        }
        self.grid.occupant(x, y).and_then(|id| self.building(id))
    }

    pub fn population(&self) -> u32 {
        self.buildings().map(|b| b.def().residents).sum()
    }

    pub fn jobs(&self) -> u32 {
        self.buildings().map(|b| b.def().jobs).sum()
    }

    pub fn service_building_count(&self) -> usize {
        self.buildings().filter(|b| b.def().service.is_some()).count()
    }

    pub fn effect_at(&self, x: usize, y: usize, effect_type: EffectType) -> f64 {
        self.effects.get(x, y, effect_type)
    }

    /// Distinct buildings touching the rectangle grown by the radius.
    pub fn buildings_in_area(
        &self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        radius_x: i32,
        radius_y: i32,
    ) -> BTreeSet<BuildingId> {
        buildings_in_area(&self.grid, x, y, width, height, radius_x, radius_y)
    }
}

impl Default for City {
    fn default() -> Self {
        Self::new(
            0,
            "New City",
            crate::config::GRID_WIDTH,
            crate::config::GRID_HEIGHT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::BuildingKind;
    use crate::placement::Placer;

    #[test]
    fn test_population_and_jobs() {
        let mut city = City::new(1, "Test", 16, 16);
        city.place(BuildingKind::SmallHouse, 0, 0, Placer::Player).unwrap();
        city.place(BuildingKind::Duplex, 2, 0, Placer::Player).unwrap();
        city.place(BuildingKind::CornerStore, 5, 0, Placer::Player).unwrap();
        assert_eq!(city.population(), 14);
        assert_eq!(city.jobs(), 5);
        assert_eq!(city.building_count(), 3);
    }

    #[test]
    fn test_from_parts_roundtrip() {
        let mut city = City::new(7, "Parts", 12, 12);
        city.place(BuildingKind::Duplex, 3, 3, Placer::Player).unwrap();
        let buildings: Vec<_> = city.buildings().cloned().collect();
        let rebuilt = City::from_parts(
            7,
            "Parts".into(),
            city.grid().clone(),
            buildings,
            city.budget.clone(),
            city.research.clone(),
            city.effects().clone(),
            0,
            city.next_id().0,
        )
        .unwrap();
        assert_eq!(rebuilt.grid(), city.grid());
        assert_eq!(rebuilt.building_count(), 1);
        assert_eq!(rebuilt.next_id(), city.next_id());
    }

    #[test]
    fn test_from_parts_rejects_stray_cell() {
        let city = City::new(1, "Bad", 4, 4);
        let mut grid = city.grid().clone();
        grid.get_mut(1, 1).building = Some(BuildingId(0));
        let result = City::from_parts(
            1,
            "Bad".into(),
            grid,
            Vec::new(),
            Budget::default(),
            ResearchState::default(),
            EffectTotals::new(4, 4),
            0,
            0,
        );
        assert_eq!(result.unwrap_err(), CityError::CellMismatch { x: 1, y: 1 });
    }

    #[test]
    fn test_from_parts_rejects_duplicates() {
        let mut city = City::new(1, "Dup", 8, 8);
        city.place(BuildingKind::SmallHouse, 0, 0, Placer::Player).unwrap();
        let house = city.buildings().next().cloned().unwrap();
        let result = City::from_parts(
            1,
            "Dup".into(),
            city.grid().clone(),
            vec![house.clone(), house],
            Budget::default(),
            ResearchState::default(),
            EffectTotals::new(8, 8),
            0,
            1,
        );
        assert_eq!(result.unwrap_err(), CityError::DuplicateBuilding(BuildingId(0)));
    }

    #[test]
    fn test_from_parts_rejects_huge_ids() {
        let mut city = City::new(1, "Huge", 8, 8);
        city.place(BuildingKind::SmallHouse, 0, 0, Placer::Player).unwrap();
        let rebuild = |buildings: Vec<Building>, next_id: u32| {
            City::from_parts(
                1,
                "Huge".into(),
                city.grid().clone(),
                buildings,
                Budget::default(),
                ResearchState::default(),
                EffectTotals::new(8, 8),
                0,
                next_id,
            )
        };
        let house = city.buildings().next().cloned().unwrap();

        assert_eq!(
            rebuild(vec![house.clone()], u32::MAX).unwrap_err(),
            CityError::IdOutOfRange(u32::MAX)
        );
        let mut stray = house;
        stray.id = BuildingId(u32::MAX);
        assert_eq!(
            rebuild(vec![stray], 1).unwrap_err(),
            CityError::IdOutOfRange(u32::MAX)
        );
    }

    #[test]
    fn test_building_at_out_of_bounds() {
        let city = City::new(1, "Test", 4, 4);
        assert!(city.building_at(10, 10).is_none());
    }
}
