use bevy::prelude::*;
use simulation::game_actions::{ActionQueue, ActionSource, QueuedAction};
use simulation::SaveableRegistry;

use crate::save_plugin::{CityLoadFailed, CityLoaded, LoadCityEvent, StorageResource};

/// Serves `LoadCityEvent`s. Only the most recent request in a frame is
/// honoured; earlier ones would be overwritten immediately.
pub(crate) fn exclusive_load(world: &mut World) {
    let Some(request) = world
        .resource_mut::<Events<LoadCityEvent>>()
        .drain()
        .last()
    else {
        return;
    };

    let Some(mut storage) = world.remove_resource::<StorageResource>() else {
        warn!("Ignoring load request: no storage configured");
        world.send_event(CityLoadFailed {
            player: request.player,
            city_id: request.city_id,
        });
        return;
    };

    match storage.0.load_city(request.player, request.city_id) {
        Some(loaded) => {
            info!(
                "Loaded city {} '{}' ({} buildings) for {}",
                loaded.city.id(),
                loaded.city.name(),
                loaded.city.building_count(),
                request.player
            );
            world.insert_resource(loaded.city);

            // Keys missing from the save are reset to their defaults.
            if world.contains_resource::<SaveableRegistry>() {
                world.resource_scope(|world, registry: Mut<SaveableRegistry>| {
                    registry.load_all(world, &loaded.extensions);
                });
            }

            let stored = storage.0.queued_actions();
            let replayed_actions = stored.len();
            if replayed_actions > 0 {
                let mut queue = world.get_resource_or_insert_with(ActionQueue::default);
                for queued in stored {
                    queue.push_queued(QueuedAction {
                        source: ActionSource::Replay,
                        ..queued
                    });
                }
                if let Err(e) = storage.0.clear_queued_actions() {
                    error!("Failed to clear replayed actions from storage: {e}");
                }
            }

            world.send_event(CityLoaded {
                player: request.player,
                city_id: request.city_id,
                replayed_actions,
            });
        }
        None => {
            warn!(
                "No city {} found for {}, caller may start fresh",
                request.city_id, request.player
            );
            world.send_event(CityLoadFailed {
                player: request.player,
                city_id: request.city_id,
            });
        }
    }

    world.insert_resource(storage);
}
