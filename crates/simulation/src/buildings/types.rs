use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::catalog::BuildingDef;
use crate::grid::GridRect;

/// Stable arena index of a building. Ids are never reused within a city.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
#[serde(transparent)]
pub struct BuildingId(pub u32);

impl BuildingId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub enum BuildingKind {
    SmallHouse,
    Duplex,
    ApartmentTower,
    CornerStore,
    ShoppingPlaza,
    Factory,
    OreMine,
    FishingDock,
    Farm,
    PoliceStation,
    FireStation,
    School,
    Clinic,
    Hospital,
    Park,
    PowerPlant,
    WaterTower,
}

impl BuildingKind {
    pub const ALL: &'static [BuildingKind] = &[
        BuildingKind::SmallHouse,
        BuildingKind::Duplex,
        BuildingKind::ApartmentTower,
        BuildingKind::CornerStore,
        BuildingKind::ShoppingPlaza,
        BuildingKind::Factory,
        BuildingKind::OreMine,
        BuildingKind::FishingDock,
        BuildingKind::Farm,
        BuildingKind::PoliceStation,
        BuildingKind::FireStation,
        BuildingKind::School,
        BuildingKind::Clinic,
        BuildingKind::Hospital,
        BuildingKind::Park,
        BuildingKind::PowerPlant,
        BuildingKind::WaterTower,
    ];

    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn is_residence(self) -> bool {
        self.def().is_residence()
    }
}

/// A placed building. Every grid cell inside its footprint refers back to `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub kind: BuildingKind,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// Fraction of full operation achieved on the last short tick (0..=1).
    pub last_efficiency: f64,
    pub built_day: u32,
}

impl Building {
    pub fn new(id: BuildingId, kind: BuildingKind, x: usize, y: usize, built_day: u32) -> Self {
        let def = kind.def();
        Self {
            id,
            kind,
            x,
            y,
            width: def.width,
            height: def.height,
            last_efficiency: 1.0,
            built_day,
        }
    }

    pub fn def(&self) -> &'static BuildingDef {
        self.kind.def()
    }

    pub fn footprint(&self) -> GridRect {
        GridRect {
            x0: self.x,
            y0: self.y,
            x1: self.x + self.width,
            y1: self.y + self.height,
        }
    }

    pub fn covers(&self, x: usize, y: usize) -> bool {
        self.footprint().contains(x, y)
    }

    pub fn tile_count(&self) -> usize {
        self.width * self.height
    }
}
