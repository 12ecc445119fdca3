use bevy::prelude::*;

use simulation::buildings::BuildingKind;
use simulation::city::City;
use simulation::clock::SimClock;
use simulation::game_actions::{ActionQueue, ActionSource, GameAction};
use simulation::placement::Placer;
use simulation::SaveableAppExt;

use crate::{
    CityLoadFailed, CityLoaded, CitySaved, LoadCityEvent, MemoryStorage, PlayerId, SaveCityEvent,
    SavePlugin, StorageResource,
};

const PLAYER: PlayerId = PlayerId(1);

fn starter_city() -> City {
    let mut city = City::new(21, "Plugin Town", 16, 16);
    city.place(BuildingKind::SmallHouse, 2, 2, Placer::Player).unwrap();
    city.place(BuildingKind::Park, 4, 2, Placer::Player).unwrap();
    city
}

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(SavePlugin)
        .insert_resource(starter_city())
        .insert_resource(StorageResource::new(MemoryStorage::new()))
        .init_resource::<SimClock>()
        .init_resource::<ActionQueue>()
        .register_saveable::<SimClock>();
    app
}

fn current_events<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world()
        .resource::<Events<E>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

#[test]
fn test_save_then_load_restores_city_and_extensions() {
    let mut app = test_app();
    app.world_mut().resource_mut::<SimClock>().tick = 480;
    app.world_mut().send_event(SaveCityEvent { player: PLAYER });
    app.update();
    assert_eq!(
        current_events::<CitySaved>(&app),
        vec![CitySaved {
            player: PLAYER,
            city_id: 21
        }]
    );

    app.world_mut()
        .insert_resource(City::new(99, "Scratch", 8, 8));
    app.world_mut().resource_mut::<SimClock>().tick = 3;

    app.world_mut().send_event(LoadCityEvent {
        player: PLAYER,
        city_id: 21,
    });
    app.update();

    let city = app.world().resource::<City>();
    assert_eq!(city.id(), 21);
    assert_eq!(city.name(), "Plugin Town");
    assert_eq!(city.building_count(), 2);
    assert_eq!(app.world().resource::<SimClock>().tick, 480);
    assert_eq!(current_events::<CityLoaded>(&app).len(), 1);
}

#[test]
fn test_load_missing_city_reports_failure() {
    let mut app = test_app();
    app.world_mut().send_event(LoadCityEvent {
        player: PLAYER,
        city_id: 404,
    });
    app.update();

    assert_eq!(
        current_events::<CityLoadFailed>(&app),
        vec![CityLoadFailed {
            player: PLAYER,
            city_id: 404
        }]
    );
    // The running city is untouched.
    assert_eq!(app.world().resource::<City>().id(), 21);
}

#[test]
fn test_pending_actions_replay_after_load() {
    let mut app = test_app();
    app.world_mut().resource_mut::<ActionQueue>().push(
        7,
        ActionSource::Player,
        GameAction::Build {
            kind: BuildingKind::Park,
            x: 9,
            y: 9,
        },
    );
    app.world_mut().send_event(SaveCityEvent { player: PLAYER });
    app.update();

    app.world_mut().resource_mut::<ActionQueue>().drain();
    app.world_mut().send_event(LoadCityEvent {
        player: PLAYER,
        city_id: 21,
    });
    app.update();

    let loaded = current_events::<CityLoaded>(&app);
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].replayed_actions, 1);

    let queue = app.world().resource::<ActionQueue>();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.pending()[0].source, ActionSource::Replay);
    assert_eq!(queue.pending()[0].tick, 7);
}

#[test]
fn test_save_without_storage_is_ignored() {
    let mut app = test_app();
    app.world_mut().remove_resource::<StorageResource>();
    app.world_mut().send_event(SaveCityEvent { player: PLAYER });
    app.update();
    assert!(current_events::<CitySaved>(&app).is_empty());
}
