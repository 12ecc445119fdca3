use bevy::prelude::*;
use simulation::city::City;
use simulation::game_actions::ActionQueue;
use simulation::SaveableRegistry;

use crate::save_plugin::{CitySaved, SaveCityEvent, StorageResource};
use crate::serialization::CitySave;

/// Serves every pending `SaveCityEvent` with full world access.
///
/// Actions still waiting on the queue are handed to storage too, so they
/// replay after the next load.
pub(crate) fn exclusive_save(world: &mut World) {
    let requests: Vec<SaveCityEvent> = world
        .resource_mut::<Events<SaveCityEvent>>()
        .drain()
        .collect();
    if requests.is_empty() {
        return;
    }

    let Some(mut storage) = world.remove_resource::<StorageResource>() else {
        warn!(
            "Ignoring {} save request(s): no storage configured",
            requests.len()
        );
        return;
    };

    match world.get_resource::<City>() {
        Some(city) => {
            let extensions = world
                .get_resource::<SaveableRegistry>()
                .map(|registry| registry.save_all(world))
                .unwrap_or_default();
            let save = CitySave::capture(city).with_extensions(extensions);

            let pending = world
                .get_resource::<ActionQueue>()
                .map(|queue| queue.pending().to_vec())
                .unwrap_or_default();
            for action in pending {
                if let Err(e) = storage.0.queue_action(action) {
                    error!("Failed to store pending action: {e}");
                }
            }

            let mut saved = Vec::new();
            for request in &requests {
                match storage.0.save_city(request.player, &save) {
                    Ok(()) => saved.push(CitySaved {
                        player: request.player,
                        city_id: save.id,
                    }),
                    Err(e) => error!("Failed to save city {} for {}: {e}", save.id, request.player),
                }
            }
            for event in saved {
                world.send_event(event);
            }
        }
        None => warn!("Ignoring save request: no city loaded"),
    }

    world.insert_resource(storage);
}
