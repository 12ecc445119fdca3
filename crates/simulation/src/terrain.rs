use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::config::{FERTILE_THRESHOLD, ORE_THRESHOLD, TERRAIN_BASE_FREQUENCY, WATER_THRESHOLD};
use crate::footprint::FootprintType;
use crate::grid::Grid;

fn layer(seed: i32, frequency: f32) -> FastNoiseLite {
    let mut noise = FastNoiseLite::with_seed(seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(frequency));
    noise
}

/// Normalized noise sample in 0..1.
fn sample(noise: &FastNoiseLite, x: usize, y: usize) -> f32 {
    ((noise.get_noise_2d(x as f32, y as f32) + 1.0) * 0.5).clamp(0.0, 1.0)
}

/// Stamps terrain bits from three noise layers: low elevation is water, and
/// land carries ore deposits or fertile soil. Occupancy bits are untouched.
pub fn generate_terrain(grid: &mut Grid, seed: i32) {
    let elevation = layer(seed, TERRAIN_BASE_FREQUENCY);
    let ore = layer(seed.wrapping_add(1), TERRAIN_BASE_FREQUENCY * 3.0);
    let fertile = layer(seed.wrapping_add(2), TERRAIN_BASE_FREQUENCY * 1.5);

    for y in 0..grid.height {
        for x in 0..grid.width {
            let terrain = if sample(&elevation, x, y) < WATER_THRESHOLD {
                FootprintType::WATER
            } else if sample(&ore, x, y) > ORE_THRESHOLD {
                FootprintType::ORE
            } else if sample(&fertile, x, y) > FERTILE_THRESHOLD {
                FootprintType::FERTILE
            } else {
                FootprintType::EMPTY
            };
            let cell = grid.get_mut(x, y);
            cell.flags = (cell.flags & FootprintType::DYNAMIC) | terrain;
        }
    }
}
