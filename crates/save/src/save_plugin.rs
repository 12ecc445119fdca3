use bevy::prelude::*;
use simulation::SaveableRegistry;

use crate::storage::{CityStorage, PlayerId};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// The storage backend save/load requests are served from.
#[derive(Resource)]
pub struct StorageResource(pub Box<dyn CityStorage>);

impl StorageResource {
    pub fn new(storage: impl CityStorage + 'static) -> Self {
        Self(Box::new(storage))
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Saves the current `City` resource for `player`.
#[derive(Event, Debug, Clone, Copy)]
pub struct SaveCityEvent {
    pub player: PlayerId,
}

/// Replaces the current `City` resource with a stored one.
#[derive(Event, Debug, Clone, Copy)]
pub struct LoadCityEvent {
    pub player: PlayerId,
    pub city_id: u64,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitySaved {
    pub player: PlayerId,
    pub city_id: u64,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityLoaded {
    pub player: PlayerId,
    pub city_id: u64,
    /// Stored offline actions put back on the action queue.
    pub replayed_actions: usize,
}

/// The requested city was missing or unreadable. The caller decides whether
/// to start a fresh city.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityLoadFailed {
    pub player: PlayerId,
    pub city_id: u64,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveCityEvent>()
            .add_event::<LoadCityEvent>()
            .add_event::<CitySaved>()
            .add_event::<CityLoaded>()
            .add_event::<CityLoadFailed>()
            .init_resource::<SaveableRegistry>();

        // Exclusive systems: both need the storage box and the registry while
        // reading or replacing other resources. Saves run first so a save and
        // a load in the same frame persist the city being replaced.
        app.add_systems(
            Update,
            (
                crate::exclusive_save::exclusive_save,
                crate::exclusive_load::exclusive_load,
            )
                .chain(),
        );
    }
}
