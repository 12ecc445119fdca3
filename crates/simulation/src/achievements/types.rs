use std::collections::BTreeMap;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

// =============================================================================
// Achievement Definition
// =============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode, Serialize, Deserialize,
)]
pub enum Achievement {
    FirstBuilding,
    Population100,
    Population1K,
    TenServices,
    BalancedWeek, // Seven settled days in a row with a positive balance
    FirstResearch,
    Millionaire,
}

impl Achievement {
    pub const ALL: &'static [Achievement] = &[
        Achievement::FirstBuilding,
        Achievement::Population100,
        Achievement::Population1K,
        Achievement::TenServices,
        Achievement::BalancedWeek,
        Achievement::FirstResearch,
        Achievement::Millionaire,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Achievement::FirstBuilding => "Groundbreaking",
            Achievement::Population100 => "Village",
            Achievement::Population1K => "Town",
            Achievement::TenServices => "Public Servant",
            Achievement::BalancedWeek => "Balanced Books",
            Achievement::FirstResearch => "Eureka",
            Achievement::Millionaire => "Millionaire",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstBuilding => "Place your first building",
            Achievement::Population100 => "Reach a population of 100",
            Achievement::Population1K => "Reach a population of 1,000",
            Achievement::TenServices => "Run ten service buildings at once",
            Achievement::BalancedWeek => "Finish seven days in a row with a positive balance",
            Achievement::FirstResearch => "Complete a research project",
            Achievement::Millionaire => "Hold $1M in the treasury",
        }
    }
}

// =============================================================================
// Achievement Tracker Resource
// =============================================================================

/// Unlocked achievements and the day each was earned.
#[derive(Resource, Debug, Clone, Default, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct AchievementTracker {
    pub unlocked: BTreeMap<Achievement, u32>,
}

impl AchievementTracker {
    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains_key(&achievement)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Returns true if the achievement was newly unlocked.
    pub(crate) fn unlock(&mut self, achievement: Achievement, day: u32) -> bool {
        if self.is_unlocked(achievement) {
            return false;
        }
        self.unlocked.insert(achievement, day);
        true
    }
}

impl crate::Saveable for AchievementTracker {
    const SAVE_KEY: &'static str = "achievements";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if self.unlocked.is_empty() {
            return None;
        }
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementUnlocked {
    pub achievement: Achievement,
    pub day: u32,
}
