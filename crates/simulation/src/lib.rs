use bevy::prelude::*;
use std::collections::BTreeMap;

pub mod achievements;
pub mod area;
pub mod budget;
pub mod buildings;
pub mod city;
pub mod city_init;
pub mod clock;
pub mod config;
pub mod economy;
pub mod effects;
pub mod footprint;
pub mod game_actions;
pub mod grid;
pub mod placement;
pub mod research;
pub mod sim_rng;
pub mod simulation_sets;
pub mod spawner;
pub mod terrain;
pub mod utilities;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

// ---------------------------------------------------------------------------
// Saveable trait + registry for resources persisted next to the city
// ---------------------------------------------------------------------------

/// A resource that lives outside [`city::City`] but is still part of a save.
///
/// Saves carry these as an extension map keyed by `SAVE_KEY`, so a resource
/// only has to register itself to be persisted.
pub trait Saveable: Resource + Default + Send + Sync + 'static {
    /// Must stay stable across versions; it is the lookup key on load.
    const SAVE_KEY: &'static str;

    /// Return `None` to skip saving (e.g. when the resource is at its default state).
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    fn load_from_bytes(bytes: &[u8]) -> Self;
}

/// Decode bytes via `bitcode::decode`, logging a warning and returning `Default` on failure.
pub fn decode_or_warn<T: bitcode::DecodeOwned + Default>(key: &str, bytes: &[u8]) -> T {
    match bitcode::decode(bytes) {
        Ok(v) => v,
        Err(e) => {
            warn!(
                "Saveable {}: failed to decode {} bytes, falling back to default: {}",
                key,
                bytes.len(),
                e
            );
            T::default()
        }
    }
}

pub type SaveFn = Box<dyn Fn(&World) -> Option<Vec<u8>> + Send + Sync>;
pub type LoadFn = Box<dyn Fn(&mut World, &[u8]) + Send + Sync>;
pub type ResetFn = Box<dyn Fn(&mut World) + Send + Sync>;

/// Type-erased save/load/reset operations for a single registered resource.
pub struct SaveableEntry {
    pub key: String,
    pub save_fn: SaveFn,
    pub load_fn: LoadFn,
    pub reset_fn: ResetFn,
}

#[derive(Resource, Default)]
pub struct SaveableRegistry {
    pub entries: Vec<SaveableEntry>,
}

impl SaveableRegistry {
    /// Register a resource type. A second registration under the same key is
    /// ignored with a warning.
    pub fn register<T: Saveable>(&mut self) {
        let key = T::SAVE_KEY.to_string();
        if self.entries.iter().any(|e| e.key == key) {
            warn!("SaveableRegistry: duplicate key '{}', ignoring", key);
            return;
        }
        self.entries.push(SaveableEntry {
            key,
            save_fn: Box::new(|world: &World| {
                world.get_resource::<T>().and_then(|r| r.save_to_bytes())
            }),
            load_fn: Box::new(|world: &mut World, bytes: &[u8]| {
                world.insert_resource(T::load_from_bytes(bytes));
            }),
            reset_fn: Box::new(|world: &mut World| {
                world.insert_resource(T::default());
            }),
        });
    }

    pub fn save_all(&self, world: &World) -> BTreeMap<String, Vec<u8>> {
        let mut extensions = BTreeMap::new();
        for entry in &self.entries {
            if let Some(bytes) = (entry.save_fn)(world) {
                extensions.insert(entry.key.clone(), bytes);
            }
        }
        extensions
    }

    /// Resources whose key is absent from `extensions` are reset to default,
    /// so nothing from the previous city survives a load.
    pub fn load_all(&self, world: &mut World, extensions: &BTreeMap<String, Vec<u8>>) {
        for entry in &self.entries {
            match extensions.get(&entry.key) {
                Some(bytes) => (entry.load_fn)(world, bytes),
                None => (entry.reset_fn)(world),
            }
        }
    }
}

/// Convenience for plugins: `app.register_saveable::<T>()`.
pub trait SaveableAppExt {
    fn register_saveable<T: Saveable>(&mut self) -> &mut Self;
}

impl SaveableAppExt for App {
    fn register_saveable<T: Saveable>(&mut self) -> &mut Self {
        self.init_resource::<SaveableRegistry>();
        self.world_mut()
            .resource_mut::<SaveableRegistry>()
            .register::<T>();
        self
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        );

        app.init_resource::<clock::SimClock>()
            .init_resource::<sim_rng::SimRng>()
            .init_resource::<spawner::SpawnerSettings>()
            .init_resource::<city_init::NewCityConfig>()
            .init_resource::<utilities::UtilityUsage>()
            .init_resource::<SaveableRegistry>()
            .add_event::<research::ResearchCompleted>()
            .register_saveable::<clock::SimClock>()
            .add_systems(Startup, city_init::init_city)
            .add_systems(Update, clock::sync_fixed_timestep);

        app.add_systems(
            FixedUpdate,
            clock::tick_clock.in_set(SimulationSet::PreSim),
        );

        app.add_systems(
            FixedUpdate,
            (utilities::update_utilities, economy::update_budget)
                .chain()
                .run_if(clock::sim_running)
                .in_set(SimulationSet::Simulation),
        );

        app.add_systems(
            FixedUpdate,
            (
                economy::settle_daily_budget,
                research::advance_research,
                research::refresh_researched_effects,
                spawner::spawn_homes,
                effects::update_dynamic_effects,
            )
                .chain()
                .run_if(clock::on_long_tick)
                .in_set(SimulationSet::PostSim),
        );

        app.add_plugins((
            game_actions::GameActionsPlugin,
            achievements::AchievementsPlugin,
        ));
    }
}

#[cfg(test)]
mod saveable_tests {
    use super::*;

    #[derive(Resource, Default, Debug, PartialEq)]
    struct TestCounter {
        value: u32,
    }

    impl Saveable for TestCounter {
        const SAVE_KEY: &'static str = "test_counter";

        fn save_to_bytes(&self) -> Option<Vec<u8>> {
            if self.value == 0 {
                None
            } else {
                Some(self.value.to_le_bytes().to_vec())
            }
        }

        fn load_from_bytes(bytes: &[u8]) -> Self {
            let value = u32::from_le_bytes(bytes.try_into().unwrap_or([0; 4]));
            TestCounter { value }
        }
    }

    #[test]
    fn test_registry_register_and_save() {
        let mut world = World::new();
        world.insert_resource(TestCounter { value: 42 });

        let mut registry = SaveableRegistry::default();
        registry.register::<TestCounter>();

        let extensions = registry.save_all(&world);
        assert_eq!(extensions.len(), 1);
        assert_eq!(extensions["test_counter"], 42u32.to_le_bytes().to_vec());
    }

    #[test]
    fn test_registry_save_skips_default() {
        let mut world = World::new();
        world.insert_resource(TestCounter { value: 0 });

        let mut registry = SaveableRegistry::default();
        registry.register::<TestCounter>();

        assert!(registry.save_all(&world).is_empty());
    }

    #[test]
    fn test_registry_load_all() {
        let mut world = World::new();
        world.insert_resource(TestCounter::default());

        let mut registry = SaveableRegistry::default();
        registry.register::<TestCounter>();

        let mut extensions = BTreeMap::new();
        extensions.insert("test_counter".to_string(), 99u32.to_le_bytes().to_vec());
        registry.load_all(&mut world, &extensions);

        assert_eq!(world.resource::<TestCounter>().value, 99);
    }

    #[test]
    fn test_registry_load_resets_missing_keys() {
        let mut world = World::new();
        world.insert_resource(TestCounter { value: 5 });

        let mut registry = SaveableRegistry::default();
        registry.register::<TestCounter>();

        let mut extensions = BTreeMap::new();
        extensions.insert("unknown_feature".to_string(), vec![0xFF, 0xFF]);
        registry.load_all(&mut world, &extensions);

        assert_eq!(world.resource::<TestCounter>().value, 0);
    }

    #[test]
    fn test_registry_ignores_duplicate_key() {
        let mut registry = SaveableRegistry::default();
        registry.register::<TestCounter>();
        registry.register::<TestCounter>();
        assert_eq!(registry.entries.len(), 1);
    }
}
