use bevy::prelude::*;

use crate::city::City;

use super::types::{Achievement, AchievementTracker, AchievementUnlocked};

const BALANCED_WEEK_DAYS: usize = 7;
const SERVICE_TARGET: usize = 10;
const MILLIONAIRE_TREASURY: f64 = 1_000_000.0;

/// Checks every locked achievement against the current city and unlocks the
/// ones whose condition holds. Returns the newly unlocked ones in `ALL` order.
pub fn evaluate_achievements(city: &City, tracker: &mut AchievementTracker) -> Vec<Achievement> {
    let population = city.population();
    let mut newly_unlocked = Vec::new();
    for &achievement in Achievement::ALL {
        if tracker.is_unlocked(achievement) {
            continue;
        }
        let reached = match achievement {
            Achievement::FirstBuilding => city.building_count() > 0,
            Achievement::Population100 => population >= 100,
            Achievement::Population1K => population >= 1_000,
            Achievement::TenServices => city.service_building_count() >= SERVICE_TARGET,
            Achievement::BalancedWeek => {
                city.budget.positive_balance_streak() >= BALANCED_WEEK_DAYS
            }
            Achievement::FirstResearch => !city.research.researched.is_empty(),
            Achievement::Millionaire => city.budget.treasury >= MILLIONAIRE_TREASURY,
        };
        if reached && tracker.unlock(achievement, city.day) {
            newly_unlocked.push(achievement);
        }
    }
    newly_unlocked
}

/// Long-tick system.
pub fn check_achievements(
    city: Res<City>,
    mut tracker: ResMut<AchievementTracker>,
    mut unlocked: EventWriter<AchievementUnlocked>,
) {
    for achievement in evaluate_achievements(&city, &mut tracker) {
        info!(
            "Achievement unlocked: {} - {}",
            achievement.name(),
            achievement.description()
        );
        unlocked.send(AchievementUnlocked {
            achievement,
            day: city.day,
        });
    }
}
