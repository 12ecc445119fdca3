//! Save/load performance benchmarks for a densely built city.
//!
//! Run with: `cargo bench -p save --bench save_bench`

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use save::serialization::{decode_city, deserialize_city, encode_city, serialize_city, CitySave};
use simulation::buildings::BuildingKind;
use simulation::city::City;
use simulation::config::{GRID_HEIGHT, GRID_WIDTH};
use simulation::placement::Placer;

fn build_dense_city() -> City {
    let mut city = City::new(1, "Bench", GRID_WIDTH, GRID_HEIGHT);
    let block = [
        (BuildingKind::SmallHouse, 0, 0),
        (BuildingKind::Duplex, 1, 0),
        (BuildingKind::CornerStore, 3, 0),
        (BuildingKind::Park, 2, 1),
        (BuildingKind::PoliceStation, 3, 1),
        (BuildingKind::School, 0, 3),
    ];
    for by in (0..GRID_HEIGHT).step_by(6) {
        for bx in (0..GRID_WIDTH).step_by(6) {
            for &(kind, dx, dy) in &block {
                let _ = city.place(kind, bx + dx, by + dy, Placer::Player);
            }
        }
    }
    city
}

fn bench_capture(c: &mut Criterion) {
    let city = build_dense_city();
    c.bench_function("capture_city", |b| {
        b.iter(|| black_box(CitySave::capture(black_box(&city))))
    });
}

fn bench_encode(c: &mut Criterion) {
    let city = build_dense_city();
    let save = CitySave::capture(&city);
    let bytes = serialize_city(&save).unwrap_or_default();
    eprintln!("encoded save: {} bytes", bytes.len());

    c.bench_function("serialize_city", |b| {
        b.iter(|| black_box(serialize_city(black_box(&save))))
    });
    c.bench_function("encode_city_full", |b| {
        b.iter(|| black_box(encode_city(black_box(&city), BTreeMap::new())))
    });
}

fn bench_decode(c: &mut Criterion) {
    let city = build_dense_city();
    let bytes = encode_city(&city, BTreeMap::new()).unwrap_or_default();

    c.bench_function("deserialize_city", |b| {
        b.iter(|| black_box(deserialize_city(black_box(&bytes))))
    });
    c.bench_function("decode_city_full", |b| {
        b.iter(|| black_box(decode_city(black_box(&bytes))))
    });
}

criterion_group!(benches, bench_capture, bench_encode, bench_decode);
criterion_main!(benches);
