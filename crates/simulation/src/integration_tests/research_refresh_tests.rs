use crate::buildings::BuildingKind;
use crate::effects::EffectType;
use crate::game_actions::GameAction;
use crate::research::Technology;
use crate::test_harness::TestCity;

#[test]
fn test_completed_research_widens_existing_buildings() {
    let mut city = TestCity::with_size(32, 32)
        .without_spawner()
        .with_building(BuildingKind::PoliceStation, 10, 10);
    // Footprint is 10..12; (18, 11) is seven tiles out, past the base radius of 6.
    city.assert_effect(16, 11, EffectType::Crime, -10.0);
    city.assert_effect(18, 11, EffectType::Crime, 0.0);

    city.queue(GameAction::StartResearch {
        technology: Technology::CommunityPolicing,
    });
    city.tick_days(Technology::CommunityPolicing.cost_days() - 1);
    city.assert_effect(18, 11, EffectType::Crime, 0.0);

    city.tick_days(1);
    assert!(city.city().research.is_researched(Technology::CommunityPolicing));
    city.assert_effect(18, 11, EffectType::Crime, -10.0);
    city.assert_effect(16, 11, EffectType::Crime, -10.0);
    city.assert_effect(20, 11, EffectType::Crime, 0.0);
}

#[test]
fn test_buildings_placed_after_research_use_bonus() {
    let mut city = TestCity::with_size(32, 32).without_spawner();
    city.city_mut().research.start(Technology::Landscaping).unwrap();
    city.tick_days(Technology::Landscaping.cost_days());

    city.place(BuildingKind::Park, 10, 10);
    // Park land value radius is 3, plus 1 from landscaping.
    city.assert_effect(14, 10, EffectType::LandValue, 0.3);
    city.assert_effect(15, 10, EffectType::LandValue, 0.0);
}

#[test]
fn test_research_leaves_other_kinds_alone() {
    let mut city = TestCity::with_size(32, 32)
        .without_spawner()
        .with_building(BuildingKind::Clinic, 2, 2)
        .with_building(BuildingKind::Park, 20, 20);
    let before = city.city().effects().clone();
    city.city_mut().research.start(Technology::SchoolBuses).unwrap();
    city.tick_days(Technology::SchoolBuses.cost_days());
    assert_eq!(city.city().effects(), &before);
}
