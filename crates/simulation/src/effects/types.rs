use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::dynamic::DynamicCalculation;
use crate::buildings::BuildingId;

/// Named influences a building radiates over nearby cells.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub enum EffectType {
    Pollution,
    Noise,
    Crime,
    LandValue,
    Education,
    Healthcare,
    FireProtection,
    BusinessValue,
}

impl EffectType {
    pub const COUNT: usize = 8;

    pub const ALL: [EffectType; Self::COUNT] = [
        EffectType::Pollution,
        EffectType::Noise,
        EffectType::Crime,
        EffectType::LandValue,
        EffectType::Education,
        EffectType::Healthcare,
        EffectType::FireProtection,
        EffectType::BusinessValue,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            EffectType::Pollution => "Pollution",
            EffectType::Noise => "Noise",
            EffectType::Crime => "Crime",
            EffectType::LandValue => "Land Value",
            EffectType::Education => "Education",
            EffectType::Healthcare => "Healthcare",
            EffectType::FireProtection => "Fire Protection",
            EffectType::BusinessValue => "Business Value",
        }
    }
}

/// How an effect definition's radius combines with the building's area indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadiusMode {
    /// Definition radius is added on top of the area-indicator radius.
    AddToAreaIndicator,
    /// Definition radius is used on its own.
    Replace,
}

/// Static template for one effect a building type produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectDefinition {
    pub effect_type: EffectType,
    pub magnitude: f64,
    pub dynamic: Option<DynamicCalculation>,
    /// `None` means "use the area indicator only".
    pub radius_x: Option<u32>,
    pub radius_y: Option<u32>,
    pub radius_mode: RadiusMode,
    /// Overrides the building's rounded/rectangular area indicator shape.
    pub rounded: Option<bool>,
}

impl EffectDefinition {
    pub const fn new(effect_type: EffectType, magnitude: f64) -> Self {
        Self {
            effect_type,
            magnitude,
            dynamic: None,
            radius_x: None,
            radius_y: None,
            radius_mode: RadiusMode::AddToAreaIndicator,
            rounded: None,
        }
    }

    /// Extra radius on top of the area indicator.
    pub const fn with_extra_radius(mut self, radius: u32) -> Self {
        self.radius_x = Some(radius);
        self.radius_y = Some(radius);
        self.radius_mode = RadiusMode::AddToAreaIndicator;
        self
    }

    /// Fixed radius that ignores the area indicator.
    pub const fn with_radius(mut self, radius_x: u32, radius_y: u32) -> Self {
        self.radius_x = Some(radius_x);
        self.radius_y = Some(radius_y);
        self.radius_mode = RadiusMode::Replace;
        self
    }

    pub const fn with_dynamic(mut self, dynamic: DynamicCalculation) -> Self {
        self.dynamic = Some(dynamic);
        self
    }

    pub const fn rectangular(mut self) -> Self {
        self.rounded = Some(false);
        self
    }

    /// Radius before research bonuses, given the building's area indicator.
    pub fn base_radius(&self, area_indicator: u32) -> (u32, u32) {
        let combine = |own: Option<u32>| match (own, self.radius_mode) {
            (None, _) => area_indicator,
            (Some(r), RadiusMode::AddToAreaIndicator) => area_indicator + r,
            (Some(r), RadiusMode::Replace) => r,
        };
        (combine(self.radius_x), combine(self.radius_y))
    }
}

/// Runtime effect instance attributed to the building that sourced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub effect_type: EffectType,
    pub magnitude: f64,
    pub source: BuildingId,
    pub dynamic: Option<DynamicCalculation>,
}

impl Effect {
    pub fn from_definition(def: &EffectDefinition, source: BuildingId) -> Self {
        Self {
            effect_type: def.effect_type,
            magnitude: def.magnitude,
            source,
            dynamic: def.dynamic,
        }
    }
}
