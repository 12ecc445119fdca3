//! Static definitions for every placeable building type.

use super::types::BuildingKind;
use crate::budget::ServiceCategory;
use crate::effects::{DynamicCalculation, EffectDefinition, EffectType};
use crate::footprint::FootprintType;

#[derive(Debug, Clone, PartialEq)]
pub struct BuildingDef {
    pub name: &'static str,
    pub width: usize,
    pub height: usize,
    /// Terrain every covered cell must already carry.
    pub requires: FootprintType,
    /// Terrain no covered cell may carry.
    pub forbids: FootprintType,
    /// Occupancy bits stamped onto covered cells while the building stands.
    pub produces: FootprintType,
    pub area_indicator_radius: u32,
    pub area_indicator_rounded: bool,
    pub can_build_on_residence: bool,
    pub residents: u32,
    pub jobs: u32,
    /// Daily gross sales before the sales tax rate.
    pub business_value: f64,
    /// Daily running cost at full service allocation.
    pub upkeep: f64,
    pub cost: f64,
    pub service: Option<ServiceCategory>,
    /// Units produced (positive) or consumed (negative) per short tick.
    pub power: f64,
    pub water: f64,
    pub effects: &'static [EffectDefinition],
}

impl BuildingDef {
    pub fn is_residence(&self) -> bool {
        self.produces.contains(FootprintType::RESIDENCE)
    }

    pub fn tile_count(&self) -> usize {
        self.width * self.height
    }
}

const BASE: BuildingDef = BuildingDef {
    name: "",
    width: 1,
    height: 1,
    requires: FootprintType::EMPTY,
    forbids: FootprintType::WATER,
    produces: FootprintType::OCCUPIED,
    area_indicator_radius: 0,
    area_indicator_rounded: true,
    can_build_on_residence: false,
    residents: 0,
    jobs: 0,
    business_value: 0.0,
    upkeep: 0.0,
    cost: 0.0,
    service: None,
    power: 0.0,
    water: 0.0,
    effects: &[],
};

const HOME: FootprintType = FootprintType::OCCUPIED.union(FootprintType::RESIDENCE);

static SMALL_HOUSE: BuildingDef = BuildingDef {
    name: "Small House",
    produces: HOME,
    area_indicator_radius: 2,
    residents: 4,
    cost: 100.0,
    power: -1.0,
    water: -1.0,
    ..BASE
};

static DUPLEX: BuildingDef = BuildingDef {
    name: "Duplex",
    width: 2,
    produces: HOME,
    area_indicator_radius: 2,
    residents: 10,
    cost: 300.0,
    power: -2.0,
    water: -2.0,
    ..BASE
};

static APARTMENT_TOWER: BuildingDef = BuildingDef {
    name: "Apartment Tower",
    width: 2,
    height: 2,
    produces: HOME,
    area_indicator_radius: 3,
    can_build_on_residence: true,
    residents: 60,
    cost: 2_500.0,
    power: -8.0,
    water: -8.0,
    effects: &[EffectDefinition::new(EffectType::Noise, 1.0).with_radius(1, 1)],
    ..BASE
};

static CORNER_STORE: BuildingDef = BuildingDef {
    name: "Corner Store",
    area_indicator_radius: 3,
    jobs: 5,
    business_value: 200.0,
    cost: 400.0,
    power: -2.0,
    water: -1.0,
    effects: &[EffectDefinition::new(EffectType::Noise, 0.5).with_radius(1, 1)],
    ..BASE
};

static SHOPPING_PLAZA: BuildingDef = BuildingDef {
    name: "Shopping Plaza",
    width: 3,
    height: 3,
    area_indicator_radius: 4,
    can_build_on_residence: true,
    jobs: 40,
    business_value: 1_800.0,
    cost: 5_000.0,
    power: -10.0,
    water: -4.0,
    effects: &[
        EffectDefinition::new(EffectType::BusinessValue, 0.2)
            .with_dynamic(DynamicCalculation::ScaledByNearbyResidents),
        EffectDefinition::new(EffectType::Noise, 2.0)
            .with_radius(2, 2)
            .rectangular(),
    ],
    ..BASE
};

static FACTORY: BuildingDef = BuildingDef {
    name: "Factory",
    width: 3,
    height: 2,
    area_indicator_radius: 5,
    jobs: 60,
    business_value: 1_200.0,
    cost: 3_000.0,
    power: -15.0,
    water: -10.0,
    effects: &[
        EffectDefinition::new(EffectType::Pollution, 8.0),
        EffectDefinition::new(EffectType::Noise, 4.0).with_radius(3, 3),
        EffectDefinition::new(EffectType::LandValue, -0.2),
        EffectDefinition::new(EffectType::Crime, 1.0).with_radius(2, 2),
    ],
    ..BASE
};

static ORE_MINE: BuildingDef = BuildingDef {
    name: "Ore Mine",
    width: 2,
    height: 2,
    requires: FootprintType::ORE,
    area_indicator_radius: 4,
    jobs: 25,
    business_value: 900.0,
    cost: 2_000.0,
    power: -6.0,
    water: -2.0,
    effects: &[
        EffectDefinition::new(EffectType::Pollution, 5.0),
        EffectDefinition::new(EffectType::Noise, 3.0)
            .with_radius(2, 2)
            .rectangular(),
    ],
    ..BASE
};

static FISHING_DOCK: BuildingDef = BuildingDef {
    name: "Fishing Dock",
    width: 2,
    requires: FootprintType::WATER,
    forbids: FootprintType::EMPTY,
    area_indicator_radius: 2,
    jobs: 10,
    business_value: 500.0,
    cost: 800.0,
    power: -1.0,
    effects: &[EffectDefinition::new(EffectType::Noise, 1.0).with_radius(1, 1)],
    ..BASE
};

static FARM: BuildingDef = BuildingDef {
    name: "Farm",
    width: 3,
    height: 3,
    requires: FootprintType::FERTILE,
    area_indicator_rounded: false,
    jobs: 12,
    business_value: 400.0,
    cost: 600.0,
    power: -1.0,
    water: -6.0,
    ..BASE
};

static POLICE_STATION: BuildingDef = BuildingDef {
    name: "Police Station",
    width: 2,
    height: 2,
    area_indicator_radius: 6,
    jobs: 15,
    upkeep: 60.0,
    cost: 1_500.0,
    service: Some(ServiceCategory::Police),
    power: -3.0,
    water: -1.0,
    effects: &[EffectDefinition::new(EffectType::Crime, -10.0)
        .with_dynamic(DynamicCalculation::ScaledByEfficiency)],
    ..BASE
};

static FIRE_STATION: BuildingDef = BuildingDef {
    name: "Fire Station",
    width: 2,
    height: 2,
    area_indicator_radius: 6,
    jobs: 12,
    upkeep: 55.0,
    cost: 1_400.0,
    service: Some(ServiceCategory::Fire),
    power: -3.0,
    water: -4.0,
    effects: &[EffectDefinition::new(EffectType::FireProtection, 10.0)
        .with_dynamic(DynamicCalculation::ScaledByEfficiency)],
    ..BASE
};

static SCHOOL: BuildingDef = BuildingDef {
    name: "School",
    width: 3,
    height: 2,
    area_indicator_radius: 5,
    jobs: 20,
    upkeep: 70.0,
    cost: 1_800.0,
    service: Some(ServiceCategory::Education),
    power: -4.0,
    water: -3.0,
    effects: &[
        EffectDefinition::new(EffectType::Education, 10.0)
            .with_dynamic(DynamicCalculation::ScaledByEfficiency),
        EffectDefinition::new(EffectType::LandValue, 0.1).with_radius(3, 3),
    ],
    ..BASE
};

static CLINIC: BuildingDef = BuildingDef {
    name: "Clinic",
    width: 2,
    height: 2,
    area_indicator_radius: 5,
    jobs: 18,
    upkeep: 65.0,
    cost: 1_600.0,
    service: Some(ServiceCategory::Health),
    power: -4.0,
    water: -3.0,
    effects: &[EffectDefinition::new(EffectType::Healthcare, 10.0)
        .with_dynamic(DynamicCalculation::ScaledByEfficiency)],
    ..BASE
};

static HOSPITAL: BuildingDef = BuildingDef {
    name: "Hospital",
    width: 3,
    height: 4,
    area_indicator_radius: 8,
    jobs: 45,
    upkeep: 160.0,
    cost: 4_500.0,
    service: Some(ServiceCategory::Health),
    power: -8.0,
    water: -6.0,
    effects: &[
        EffectDefinition::new(EffectType::Healthcare, 15.0)
            .with_dynamic(DynamicCalculation::ScaledByEfficiency),
        EffectDefinition::new(EffectType::Noise, 1.5).with_radius(2, 2),
    ],
    ..BASE
};

static PARK: BuildingDef = BuildingDef {
    name: "Park",
    area_indicator_radius: 3,
    upkeep: 10.0,
    cost: 250.0,
    service: Some(ServiceCategory::Parks),
    water: -1.0,
    effects: &[
        EffectDefinition::new(EffectType::LandValue, 0.3),
        EffectDefinition::new(EffectType::Pollution, -2.0),
        EffectDefinition::new(EffectType::BusinessValue, 0.1).with_radius(2, 2),
    ],
    ..BASE
};

static POWER_PLANT: BuildingDef = BuildingDef {
    name: "Power Plant",
    width: 3,
    height: 3,
    area_indicator_radius: 6,
    jobs: 30,
    upkeep: 120.0,
    cost: 6_000.0,
    service: Some(ServiceCategory::Utilities),
    power: 200.0,
    water: -10.0,
    effects: &[
        EffectDefinition::new(EffectType::Pollution, 12.0),
        EffectDefinition::new(EffectType::Noise, 3.0).with_radius(3, 3),
        EffectDefinition::new(EffectType::LandValue, -0.3),
    ],
    ..BASE
};

static WATER_TOWER: BuildingDef = BuildingDef {
    name: "Water Tower",
    jobs: 2,
    upkeep: 30.0,
    cost: 900.0,
    service: Some(ServiceCategory::Utilities),
    power: -4.0,
    water: 120.0,
    ..BASE
};

impl BuildingKind {
    pub fn def(self) -> &'static BuildingDef {
        match self {
            BuildingKind::SmallHouse => &SMALL_HOUSE,
            BuildingKind::Duplex => &DUPLEX,
            BuildingKind::ApartmentTower => &APARTMENT_TOWER,
            BuildingKind::CornerStore => &CORNER_STORE,
            BuildingKind::ShoppingPlaza => &SHOPPING_PLAZA,
            BuildingKind::Factory => &FACTORY,
            BuildingKind::OreMine => &ORE_MINE,
            BuildingKind::FishingDock => &FISHING_DOCK,
            BuildingKind::Farm => &FARM,
            BuildingKind::PoliceStation => &POLICE_STATION,
            BuildingKind::FireStation => &FIRE_STATION,
            BuildingKind::School => &SCHOOL,
            BuildingKind::Clinic => &CLINIC,
            BuildingKind::Hospital => &HOSPITAL,
            BuildingKind::Park => &PARK,
            BuildingKind::PowerPlant => &POWER_PLANT,
            BuildingKind::WaterTower => &WATER_TOWER,
        }
    }
}
