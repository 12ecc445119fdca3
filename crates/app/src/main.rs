//! Headless `tilecity` runner: loads or founds a city, plays it for a number
//! of days with no rendering, logs the daily reports and saves the result.

mod run_config;
mod starter_city;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use save::{CityLoaded, FileStorage, LoadCityEvent, SaveCityEvent, SavePlugin, StorageResource};
use simulation::achievements::AchievementTracker;
use simulation::city::City;
use simulation::city_init::NewCityConfig;
use simulation::clock::SimClock;
use simulation::config::SHORT_TICKS_PER_LONG_TICK;
use simulation::game_actions::{ActionQueue, ActionResultLog, ActionSource};

use run_config::RunConfig;

fn main() {
    let config = RunConfig::from_env();

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(NewCityConfig {
            id: config.city_id,
            name: config.city_name.clone(),
            terrain_seed: Some(config.terrain_seed),
            ..Default::default()
        })
        .insert_resource(StorageResource::new(FileStorage::new(&config.save_dir)))
        .add_plugins((simulation::SimulationPlugin, SavePlugin));

    // First update runs Startup (fresh city) and then serves the load request,
    // which replaces that city when a save exists.
    app.world_mut().send_event(LoadCityEvent {
        player: config.player,
        city_id: config.city_id,
    });
    app.update();

    let loaded = !app
        .world()
        .resource::<Events<CityLoaded>>()
        .is_empty();
    if loaded {
        info!("Continuing saved city {}", config.city_id);
    } else {
        info!(
            "Founding city {} with terrain seed {}",
            config.city_id, config.terrain_seed
        );
        let tick = app.world().resource::<SimClock>().tick;
        let mut queue = app.world_mut().resource_mut::<ActionQueue>();
        for action in starter_city::starter_actions(8, 8) {
            queue.push(tick, ActionSource::Agent, action);
        }
    }

    for _ in 0..config.days {
        for _ in 0..SHORT_TICKS_PER_LONG_TICK {
            app.world_mut().run_schedule(FixedUpdate);
        }
        log_day(app.world());
    }

    report(app.world());

    app.world_mut().send_event(SaveCityEvent {
        player: config.player,
    });
    app.update();
}

fn log_day(world: &World) {
    let city = world.resource::<City>();
    if let Some(day) = city.budget.history.last() {
        info!(
            "Day {:>3}: income {:>9.2} expenses {:>9.2} balance {:>+9.2} treasury {:>11.2} pop {}",
            day.day,
            day.income,
            day.expenses,
            day.balance,
            day.treasury,
            city.population()
        );
    }
}

fn report(world: &World) {
    let city = world.resource::<City>();
    info!(
        "City '{}' after day {}: {} buildings, {} residents, {} jobs, treasury {:.2}",
        city.name(),
        city.day,
        city.building_count(),
        city.population(),
        city.jobs(),
        city.budget.treasury
    );

    if let Some(log) = world.get_resource::<ActionResultLog>() {
        for (action, result) in log.failures() {
            warn!("Action {action:?} failed: {result:?}");
        }
    }

    if let Some(tracker) = world.get_resource::<AchievementTracker>() {
        for (achievement, day) in &tracker.unlocked {
            info!("Achievement '{}' unlocked on day {day}", achievement.name());
        }
    }
}
