//! Bitmask vocabulary for what a grid cell contains or a building needs.
//!
//! Terrain bits (`WATER`, `ORE`, `FERTILE`) are stamped once at city creation.
//! Occupancy bits (`OCCUPIED`, `RESIDENCE`) are written by placement and
//! cleared by removal, so they always mirror the building sitting on the cell.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode,
)]
#[serde(transparent)]
pub struct FootprintType(u16);

impl FootprintType {
    pub const EMPTY: Self = Self(0);
    pub const WATER: Self = Self(1 << 0);
    pub const ORE: Self = Self(1 << 1);
    pub const FERTILE: Self = Self(1 << 2);
    pub const OCCUPIED: Self = Self(1 << 3);
    pub const RESIDENCE: Self = Self(1 << 4);

    /// Terrain a building may demand to stand on.
    pub const MUST_BE_ON: Self = Self(Self::WATER.0 | Self::ORE.0 | Self::FERTILE.0);
    /// Bits owned by placement/removal rather than terrain generation.
    pub const DYNAMIC: Self = Self(Self::OCCUPIED.0 | Self::RESIDENCE.0);
    pub const ALL: Self = Self(Self::MUST_BE_ON.0 | Self::DYNAMIC.0);

    const NAMES: [(Self, &'static str); 5] = [
        (Self::WATER, "WATER"),
        (Self::ORE, "ORE"),
        (Self::FERTILE, "FERTILE"),
        (Self::OCCUPIED, "OCCUPIED"),
        (Self::RESIDENCE, "RESIDENCE"),
    ];

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Builds a set from raw bits, dropping any bit outside `ALL`.
    pub const fn from_bits_truncate(bits: u16) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for FootprintType {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for FootprintType {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl BitAnd for FootprintType {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for FootprintType {
    type Output = Self;
    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}

impl fmt::Debug for FootprintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl fmt::Display for FootprintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
