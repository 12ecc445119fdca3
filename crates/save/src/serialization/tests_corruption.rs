use simulation::buildings::{BuildingId, BuildingKind};
use simulation::city::City;
use simulation::placement::Placer;

use super::*;

fn saved_city() -> CitySave {
    let mut city = City::new(3, "Hilltop", 12, 12);
    city.place(BuildingKind::SmallHouse, 1, 1, Placer::Player).unwrap();
    city.place(BuildingKind::Park, 5, 5, Placer::Player).unwrap();
    CitySave::capture(&city)
}

#[test]
fn test_future_version_rejected() {
    let mut save = saved_city();
    save.version = SAVE_VERSION + 1;
    assert!(matches!(
        save.restore(),
        Err(SaveError::VersionMismatch { found, .. }) if found == SAVE_VERSION + 1
    ));
}

#[test]
fn test_zero_version_rejected() {
    let mut save = saved_city();
    save.version = 0;
    assert!(matches!(save.restore(), Err(SaveError::Corrupt(_))));
}

#[test]
fn test_cell_count_mismatch_rejected() {
    let mut save = saved_city();
    save.grid.cells.pop();
    assert!(matches!(save.restore(), Err(SaveError::Corrupt(_))));
}

#[test]
fn test_dangling_occupant_rejected() {
    let mut save = saved_city();
    save.grid.cells[100].building = Some(BuildingId(55));
    assert!(matches!(save.restore(), Err(SaveError::Corrupt(_))));
}

#[test]
fn test_missing_building_rejected() {
    let mut save = saved_city();
    save.buildings.retain(|b| b.kind != BuildingKind::SmallHouse);
    assert!(save.restore().is_err());
}

#[test]
fn test_tampered_totals_rejected() {
    let mut save = saved_city();
    save.effect_totals[0][0] += 5.0;
    assert!(matches!(save.restore(), Err(SaveError::Corrupt(_))));
}

#[test]
fn test_effect_totals_wrong_length_rejected() {
    let mut save = saved_city();
    save.effect_totals.truncate(3);
    assert!(matches!(save.restore(), Err(SaveError::Corrupt(_))));
}

#[test]
fn test_garbage_bytes_rejected() {
    assert!(deserialize_city(b"definitely not a save file").is_err());
    assert!(deserialize_city(&[]).is_err());
}

#[test]
fn test_flipped_payload_byte_rejected() {
    let mut bytes = serialize_city(&saved_city()).unwrap();
    let mid = bytes.len() / 2 + 12;
    bytes[mid] ^= 0x55;
    assert!(matches!(deserialize_city(&bytes), Err(SaveError::Corrupt(_))));
}

#[test]
fn test_valid_header_with_bad_json_rejected() {
    let bytes = crate::file_header::wrap_compressed(b"{\"version\": 1}").unwrap();
    assert!(matches!(deserialize_city(&bytes), Err(SaveError::Decode(_))));
}

#[test]
fn test_huge_next_id_rejected() {
    let mut save = saved_city();
    save.next_id = u32::MAX;
    let bytes = serialize_city(&save).unwrap();
    assert!(matches!(decode_city(&bytes), Err(SaveError::Corrupt(_))));
}

#[test]
fn test_huge_building_id_rejected() {
    let mut save = saved_city();
    let old_id = save.buildings[0].id;
    let huge = BuildingId(u32::MAX);
    save.buildings[0].id = huge;
    for cell in save.grid.cells.iter_mut() {
        if cell.building == Some(old_id) {
            cell.building = Some(huge);
        }
    }
    for applied in save.applied_effects.iter_mut() {
        if applied.effect.source == old_id {
            applied.effect.source = huge;
        }
    }
    let bytes = serialize_city(&save).unwrap();
    assert!(matches!(decode_city(&bytes), Err(SaveError::Corrupt(_))));
}
