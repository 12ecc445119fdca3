use crate::achievements::{Achievement, AchievementUnlocked};
use crate::buildings::BuildingKind;
use crate::research::Technology;
use crate::test_harness::TestCity;

#[test]
fn test_first_building_unlocks_on_first_day() {
    let mut city = TestCity::with_size(16, 16)
        .without_spawner()
        .with_building(BuildingKind::SmallHouse, 0, 0);
    city.tick(23);
    assert!(!city.achievements().is_unlocked(Achievement::FirstBuilding));
    city.tick(1);
    assert_eq!(
        city.achievements().unlocked.get(&Achievement::FirstBuilding),
        Some(&1)
    );
}

#[test]
fn test_balanced_week() {
    let mut city = TestCity::with_size(16, 16)
        .without_spawner()
        .with_building(BuildingKind::SmallHouse, 0, 0);
    city.tick_days(6);
    assert!(!city.achievements().is_unlocked(Achievement::BalancedWeek));
    city.tick_days(1);
    assert!(city.achievements().is_unlocked(Achievement::BalancedWeek));
}

#[test]
fn test_first_research_unlock_is_announced() {
    let mut city = TestCity::with_size(16, 16).without_spawner();
    city.city_mut().research.start(Technology::FireHydrants).unwrap();
    city.tick_days(Technology::FireHydrants.cost_days());

    assert!(city.achievements().is_unlocked(Achievement::FirstResearch));
    let events = city.resource::<bevy::prelude::Events<AchievementUnlocked>>();
    let mut reader = events.get_cursor();
    assert!(reader
        .read(events)
        .any(|e| e.achievement == Achievement::FirstResearch));
}

#[test]
fn test_empty_city_earns_nothing() {
    let mut city = TestCity::with_size(16, 16).without_spawner();
    city.tick_days(3);
    assert_eq!(city.achievements().unlocked_count(), 0);
}
