use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::config::SHORT_TICKS_PER_LONG_TICK;

/// Short-tick counter. Every `SHORT_TICKS_PER_LONG_TICK` short ticks is a
/// long tick (one in-game day).
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct SimClock {
    pub tick: u64,
    pub speed: u32,
    pub paused: bool,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            tick: 0,
            speed: 1,
            paused: false,
        }
    }
}

impl SimClock {
    pub const MAX_SPEED: u32 = 16;

    pub fn advance(&mut self) {
        if self.paused {
            return;
        }
        self.tick += 1;
    }

    /// True on the short tick that closes a day.
    pub fn is_long_tick(&self) -> bool {
        self.tick > 0 && self.tick % SHORT_TICKS_PER_LONG_TICK as u64 == 0
    }

    /// Short ticks elapsed in the current day.
    pub fn tick_of_day(&self) -> u32 {
        (self.tick % SHORT_TICKS_PER_LONG_TICK as u64) as u32
    }
}

impl crate::Saveable for SimClock {
    const SAVE_KEY: &'static str = "clock";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

pub fn tick_clock(mut clock: ResMut<SimClock>) {
    clock.advance();
}

/// Scales the FixedUpdate timestep with the clock speed.
/// Base rate is 10 Hz (100 ms); 2x speed is 50 ms and so on.
pub fn sync_fixed_timestep(clock: Res<SimClock>, mut time: ResMut<Time<Fixed>>) {
    let base = std::time::Duration::from_millis(100);
    let effective = if clock.paused || clock.speed == 0 {
        base
    } else {
        base / clock.speed.clamp(1, SimClock::MAX_SPEED)
    };
    time.set_timestep(effective);
}

pub fn sim_running(clock: Res<SimClock>) -> bool {
    !clock.paused
}

pub fn on_long_tick(clock: Res<SimClock>) -> bool {
    !clock.paused && clock.is_long_tick()
}
