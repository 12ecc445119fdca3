use std::collections::BTreeMap;

use simulation::budget::TaxCategory;
use simulation::buildings::BuildingKind;
use simulation::city::City;
use simulation::effects::EffectType;
use simulation::footprint::FootprintType;
use simulation::placement::Placer;
use simulation::research::Technology;

use super::*;

fn sample_city() -> City {
    let mut city = City::new(7, "Riverside", 24, 16);
    city.set_terrain(10, 10, FootprintType::WATER);
    city.place(BuildingKind::SmallHouse, 2, 2, Placer::Player).unwrap();
    city.place(BuildingKind::Park, 4, 2, Placer::Player).unwrap();
    let clinic = city.place(BuildingKind::Clinic, 8, 4, Placer::Player).unwrap();
    city.place(BuildingKind::SmallHouse, 15, 3, Placer::Player).unwrap();
    city.remove(clinic.id);
    city.place(BuildingKind::PoliceStation, 12, 8, Placer::Player).unwrap();
    city.budget.tax_rates.set(TaxCategory::Sales, 0.12);
    city.research.start(Technology::ALL[0]).unwrap();
    city.day = 9;
    city
}

fn assert_same_city(a: &City, b: &City) {
    assert_eq!(a.id(), b.id());
    assert_eq!(a.name(), b.name());
    assert_eq!(a.grid(), b.grid());
    assert_eq!(
        a.buildings().collect::<Vec<_>>(),
        b.buildings().collect::<Vec<_>>()
    );
    assert_eq!(a.budget, b.budget);
    assert_eq!(a.research, b.research);
    assert_eq!(a.day, b.day);
    assert_eq!(a.next_id(), b.next_id());
    for y in 0..a.height() {
        for x in 0..a.width() {
            for ty in EffectType::ALL {
                assert!((a.effect_at(x, y, ty) - b.effect_at(x, y, ty)).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn test_roundtrip_preserves_city() {
    let city = sample_city();
    let bytes = encode_city(&city, BTreeMap::new()).unwrap();
    let loaded = decode_city(&bytes).unwrap();
    assert_same_city(&city, &loaded.city);
    assert!(loaded.extensions.is_empty());
}

#[test]
fn test_roundtrip_keeps_removed_slot_holes() {
    let city = sample_city();
    let loaded = decode_city(&encode_city(&city, BTreeMap::new()).unwrap()).unwrap();
    // The clinic's id stays retired after a load.
    assert_eq!(loaded.city.next_id(), city.next_id());
    let mut restored = loaded.city;
    let placement = restored
        .place(BuildingKind::SmallHouse, 20, 12, Placer::Player)
        .unwrap();
    assert_eq!(placement.id, city.next_id());
}

#[test]
fn test_roundtrip_preserves_extensions() {
    let mut extensions = BTreeMap::new();
    extensions.insert("clock".to_string(), vec![1, 2, 3]);
    extensions.insert("achievements".to_string(), vec![9]);
    let loaded = decode_city(&encode_city(&sample_city(), extensions.clone()).unwrap()).unwrap();
    assert_eq!(loaded.extensions, extensions);
}

#[test]
fn test_missing_extensions_field_defaults_to_empty() {
    let save = CitySave::capture(&sample_city());
    let mut value = serde_json::to_value(&save).unwrap();
    value.as_object_mut().unwrap().remove("extensions");
    let restored: CitySave = serde_json::from_value(value).unwrap();
    assert!(restored.extensions.is_empty());
    assert!(restored.restore().is_ok());
}

#[test]
fn test_empty_city_roundtrip() {
    let city = City::new(1, "Empty", 8, 8);
    let loaded = decode_city(&encode_city(&city, BTreeMap::new()).unwrap()).unwrap();
    assert_same_city(&city, &loaded.city);
    assert_eq!(loaded.city.building_count(), 0);
}

#[test]
fn test_restored_city_keeps_working() {
    let city = sample_city();
    let mut restored = decode_city(&encode_city(&city, BTreeMap::new()).unwrap())
        .unwrap()
        .city;
    let house = restored.building_at(2, 2).unwrap().id;
    restored.remove(house).unwrap();
    // Removing every building must bring effects back to zero.
    let ids: Vec<_> = restored.buildings().map(|b| b.id).collect();
    for id in ids {
        restored.remove(id);
    }
    for y in 0..restored.height() {
        for x in 0..restored.width() {
            for ty in EffectType::ALL {
                assert!(restored.effect_at(x, y, ty).abs() < 1e-9);
            }
        }
    }
}
