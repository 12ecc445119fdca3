use crate::budget::ServiceCategory;
use crate::buildings::BuildingKind;
use crate::effects::EffectType;
use crate::game_actions::GameAction;
use crate::test_harness::TestCity;

#[test]
fn test_unfunded_police_stops_reducing_crime() {
    let mut city = TestCity::with_size(32, 32)
        .without_spawner()
        .with_building(BuildingKind::PoliceStation, 10, 10);
    city.assert_effect(10, 10, EffectType::Crime, -10.0);

    city.queue(GameAction::SetServiceAllocation {
        service: ServiceCategory::Police,
        allocation: 0.0,
    });
    city.tick_days(1);

    city.assert_effect(10, 10, EffectType::Crime, 0.0);
    city.assert_effect(16, 11, EffectType::Crime, 0.0);
}

#[test]
fn test_restored_funding_restores_crime_reduction() {
    let mut city = TestCity::with_size(32, 32)
        .without_spawner()
        .with_building(BuildingKind::PoliceStation, 10, 10);
    city.queue(GameAction::SetServiceAllocation {
        service: ServiceCategory::Police,
        allocation: 0.0,
    });
    city.tick_days(1);
    city.queue(GameAction::SetServiceAllocation {
        service: ServiceCategory::Police,
        allocation: 1.0,
    });
    city.tick_days(1);

    city.assert_effect(10, 10, EffectType::Crime, -10.0);
}

#[test]
fn test_plaza_picks_up_residents_moving_in() {
    let mut city = TestCity::with_size(32, 32)
        .without_spawner()
        .with_building(BuildingKind::ShoppingPlaza, 10, 10);
    city.assert_effect(11, 11, EffectType::BusinessValue, 0.0);

    city.place(BuildingKind::ApartmentTower, 14, 10);
    city.assert_effect(11, 11, EffectType::BusinessValue, 0.0);

    city.tick_days(1);
    assert!(city.effect_at(11, 11, EffectType::BusinessValue) > 0.0);
}
