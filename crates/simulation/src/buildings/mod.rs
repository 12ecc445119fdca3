mod catalog;
pub mod types;

pub use catalog::BuildingDef;
pub use types::{Building, BuildingId, BuildingKind};
