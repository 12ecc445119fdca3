//! Footprint validation and all-or-nothing grid mutation.
//!
//! Every public mutator validates the whole footprint first and only then
//! touches the grid, the building arena and the effect totals.

mod rules;

use std::fmt;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

pub use rules::{ResidenceRule, ResidenceVerdict};

use crate::buildings::{Building, BuildingId, BuildingKind};
use crate::city::City;
use crate::effects::{apply_building_effects, stop_building_effects};
use crate::footprint::FootprintType;

/// Who is asking for the placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub enum Placer {
    Player,
    Spawner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum FootprintConflict {
    MissingTerrain {
        x: u32,
        y: u32,
        missing: FootprintType,
    },
    ForbiddenTerrain {
        x: u32,
        y: u32,
        found: FootprintType,
    },
    Occupied {
        x: u32,
        y: u32,
        by: BuildingId,
    },
    ResidenceRule {
        x: u32,
        y: u32,
        by: BuildingId,
    },
}

impl fmt::Display for FootprintConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FootprintConflict::MissingTerrain { x, y, missing } => {
                write!(f, "cell ({x}, {y}) lacks {missing}")
            }
            FootprintConflict::ForbiddenTerrain { x, y, found } => {
                write!(f, "cell ({x}, {y}) has forbidden {found}")
            }
            FootprintConflict::Occupied { x, y, by } => {
                write!(f, "cell ({x}, {y}) is occupied by {by}")
            }
            FootprintConflict::ResidenceRule { x, y, by } => {
                write!(f, "cell ({x}, {y}) holds residence {by}, which cannot be replaced")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    OutOfBounds,
    /// The building to move does not exist.
    NotFound,
    FootprintConflict(FootprintConflict),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "footprint leaves the grid"),
            PlacementError::NotFound => write!(f, "building not found"),
            PlacementError::FootprintConflict(c) => write!(f, "footprint conflict: {c}"),
        }
    }
}

impl std::error::Error for PlacementError {}

impl From<FootprintConflict> for PlacementError {
    fn from(conflict: FootprintConflict) -> Self {
        PlacementError::FootprintConflict(conflict)
    }
}

/// A successful placement and the residences it replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub id: BuildingId,
    pub displaced: Vec<Building>,
}

impl City {
    /// Checks every footprint cell for `kind` anchored at (`x`, `y`). Cells
    /// held by `ignore` count as free. Returns the residences that would be
    /// displaced.
    pub fn validate_placement(
        &self,
        kind: BuildingKind,
        x: usize,
        y: usize,
        placer: Placer,
        ignore: Option<BuildingId>,
    ) -> Result<Vec<BuildingId>, PlacementError> {
        let def = kind.def();
        if !self.grid.rect_in_bounds(x, y, def.width, def.height) {
            return Err(PlacementError::OutOfBounds);
        }
        let mut displaced = Vec::new();
        for cy in y..y + def.height {
            for cx in x..x + def.width {
                let cell = self.grid.get(cx, cy);
                let (px, py) = (cx as u32, cy as u32);
                let terrain = cell.terrain();
                if !terrain.contains(def.requires) {
                    return Err(FootprintConflict::MissingTerrain {
                        x: px,
                        y: py,
                        missing: def.requires & !terrain,
                    }
                    .into());
                }
                if terrain.intersects(def.forbids) {
                    return Err(FootprintConflict::ForbiddenTerrain {
                        x: px,
                        y: py,
                        found: terrain & def.forbids,
                    }
                    .into());
                }
                let Some(by) = cell.building.filter(|&b| Some(b) != ignore) else {
                    continue;
                };
                if displaced.contains(&by) {
                    continue;
                }
                let Some(existing) = self.building(by) else {
                    return Err(FootprintConflict::Occupied { x: px, y: py, by }.into());
                };
                match ResidenceRule::check(def, existing.def(), placer) {
                    ResidenceVerdict::Displace => displaced.push(by),
                    ResidenceVerdict::Occupied => {
                        return Err(FootprintConflict::Occupied { x: px, y: py, by }.into())
                    }
                    ResidenceVerdict::Refuse => {
                        return Err(FootprintConflict::ResidenceRule { x: px, y: py, by }.into())
                    }
                }
            }
        }
        Ok(displaced)
    }

    pub fn can_place(&self, kind: BuildingKind, x: usize, y: usize, placer: Placer) -> bool {
        self.validate_placement(kind, x, y, placer, None).is_ok()
    }

    /// Places a new building, removing any residences it legally replaces.
    pub fn place(
        &mut self,
        kind: BuildingKind,
        x: usize,
        y: usize,
        placer: Placer,
    ) -> Result<Placement, PlacementError> {
        let displaced_ids = self
            .validate_placement(kind, x, y, placer, None)
            .inspect_err(|e| debug!("Rejected {} at ({}, {}): {}", kind.name(), x, y, e))?;
        let displaced: Vec<Building> = displaced_ids
            .into_iter()
            .filter_map(|id| self.remove(id))
            .collect();

        let id = self.next_id();
        let building = Building::new(id, kind, x, y, self.day);
        self.stamp(&building);
        self.buildings.push(Some(building));
        apply_building_effects(self, id);
        debug!("Placed {} {} at ({}, {})", kind.name(), id, x, y);
        Ok(Placement { id, displaced })
    }

    /// Removes a building: stops its effects, clears its cells, frees its slot.
    pub fn remove(&mut self, id: BuildingId) -> Option<Building> {
        self.building(id)?;
        stop_building_effects(self, id);
        let building = self.buildings.get_mut(id.index())?.take()?;
        self.clear(&building);
        debug!("Removed {} {}", building.kind.name(), id);
        Some(building)
    }

    /// Removes whatever building covers (`x`, `y`).
    pub fn demolish_at(&mut self, x: usize, y: usize) -> Option<Building> {
        let id = self.building_at(x, y)?.id;
        self.remove(id)
    }

    /// Moves a building to a new anchor, keeping its id. Returns the
    /// residences displaced at the destination.
    pub fn relocate(
        &mut self,
        id: BuildingId,
        x: usize,
        y: usize,
    ) -> Result<Vec<Building>, PlacementError> {
        let Some(kind) = self.building(id).map(|b| b.kind) else {
            return Err(PlacementError::NotFound);
        };
        let displaced_ids = self.validate_placement(kind, x, y, Placer::Player, Some(id))?;
        stop_building_effects(self, id);
        let displaced: Vec<Building> = displaced_ids
            .into_iter()
            .filter_map(|d| self.remove(d))
            .collect();

        let Some(mut building) = self.buildings.get_mut(id.index()).and_then(Option::take)
        else {
            return Ok(displaced);
        };
        self.clear(&building);
        building.x = x;
        building.y = y;
        self.stamp(&building);
        self.buildings[id.index()] = Some(building);
        apply_building_effects(self, id);
        debug!("Moved {} {} to ({}, {})", kind.name(), id, x, y);
        Ok(displaced)
    }

    fn stamp(&mut self, building: &Building) {
        let produces = building.def().produces & FootprintType::DYNAMIC;
        for (x, y) in building.footprint().cells() {
            let cell = self.grid.get_mut(x, y);
            cell.building = Some(building.id);
            cell.flags.insert(produces);
        }
    }

    fn clear(&mut self, building: &Building) {
        for (x, y) in building.footprint().cells() {
            let cell = self.grid.get_mut(x, y);
            if cell.building == Some(building.id) {
                cell.building = None;
                cell.flags.remove(FootprintType::DYNAMIC);
            }
        }
    }
}
