pub const GRID_WIDTH: usize = 64;
pub const GRID_HEIGHT: usize = 64;

/// Short ticks (simulation steps) per long tick (one in-game day).
pub const SHORT_TICKS_PER_LONG_TICK: u32 = 24;

/// Building ids a single city may hand out. Saves claiming more are rejected.
pub const MAX_BUILDING_IDS: u32 = 1 << 20;

pub const STARTING_TREASURY: f64 = 20_000.0;

/// Daily taxable income per resident.
pub const INCOME_PER_RESIDENT: f64 = 12.0;
/// Daily assessed property value per footprint tile, before land value.
pub const PROPERTY_BASE_PER_TILE: f64 = 40.0;

/// Price per imported unit, charged every short tick.
pub const POWER_IMPORT_PRICE: f64 = 0.05;
pub const WATER_IMPORT_PRICE: f64 = 0.03;

/// Fraction of the construction cost returned when a building is removed.
pub const REMOVE_REFUND_FRACTION: f64 = 0.5;
/// Per-tile fee charged when a building is demolished.
pub const DEMOLITION_FEE_PER_TILE: f64 = 15.0;

pub const SPAWNER_ATTEMPTS: u32 = 16;
/// Residential demand present even when no jobs exist.
pub const SPAWNER_BASE_DEMAND: i64 = 20;

/// Residents counted within an effect radius for the full `ScaledByNearbyResidents` value.
pub const NEARBY_RESIDENTS_SATURATION: f64 = 100.0;

pub const WATER_THRESHOLD: f32 = 0.30;
pub const ORE_THRESHOLD: f32 = 0.78;
pub const FERTILE_THRESHOLD: f32 = 0.65;
pub const TERRAIN_BASE_FREQUENCY: f32 = 0.035;
