//! Technologies that widen building effect radii.
//!
//! Upgrades apply eagerly: effects already spread keep their old radius until
//! the building is refreshed. `refresh_researched_effects` does that refresh
//! for every building kind a newly completed technology touches.

use std::collections::BTreeSet;
use std::fmt;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::buildings::BuildingKind;
use crate::city::City;
use crate::effects::{refresh_building_effects, EffectType};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub enum Technology {
    CommunityPolicing,
    SchoolBuses,
    FireHydrants,
    Ambulances,
    Landscaping,
}

/// Extra radius granted to one building kind. `effect_type: None` widens every
/// effect the kind produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadiusUpgrade {
    pub kind: BuildingKind,
    pub effect_type: Option<EffectType>,
    pub bonus: u32,
}

impl Technology {
    pub const ALL: [Technology; 5] = [
        Technology::CommunityPolicing,
        Technology::SchoolBuses,
        Technology::FireHydrants,
        Technology::Ambulances,
        Technology::Landscaping,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Technology::CommunityPolicing => "Community Policing",
            Technology::SchoolBuses => "School Buses",
            Technology::FireHydrants => "Fire Hydrants",
            Technology::Ambulances => "Ambulances",
            Technology::Landscaping => "Landscaping",
        }
    }

    /// Research time in days (long ticks).
    pub fn cost_days(self) -> u32 {
        match self {
            Technology::CommunityPolicing => 5,
            Technology::SchoolBuses => 4,
            Technology::FireHydrants => 3,
            Technology::Ambulances => 4,
            Technology::Landscaping => 2,
        }
    }

    pub fn upgrades(self) -> &'static [RadiusUpgrade] {
        match self {
            Technology::CommunityPolicing => &[RadiusUpgrade {
                kind: BuildingKind::PoliceStation,
                effect_type: Some(EffectType::Crime),
                bonus: 2,
            }],
            Technology::SchoolBuses => &[RadiusUpgrade {
                kind: BuildingKind::School,
                effect_type: Some(EffectType::Education),
                bonus: 3,
            }],
            Technology::FireHydrants => &[RadiusUpgrade {
                kind: BuildingKind::FireStation,
                effect_type: None,
                bonus: 2,
            }],
            Technology::Ambulances => &[RadiusUpgrade {
                kind: BuildingKind::Clinic,
                effect_type: Some(EffectType::Healthcare),
                bonus: 3,
            }],
            Technology::Landscaping => &[RadiusUpgrade {
                kind: BuildingKind::Park,
                effect_type: None,
                bonus: 1,
            }],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchError {
    AlreadyResearched(Technology),
    ProjectInProgress(Technology),
}

impl fmt::Display for ResearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResearchError::AlreadyResearched(t) => write!(f, "{} is already researched", t.name()),
            ResearchError::ProjectInProgress(t) => {
                write!(f, "{} is still being researched", t.name())
            }
        }
    }
}

impl std::error::Error for ResearchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchProject {
    pub technology: Technology,
    pub days_done: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchState {
    pub researched: BTreeSet<Technology>,
    pub in_progress: Option<ResearchProject>,
}

impl ResearchState {
    pub fn is_researched(&self, technology: Technology) -> bool {
        self.researched.contains(&technology)
    }

    pub fn start(&mut self, technology: Technology) -> Result<(), ResearchError> {
        if self.is_researched(technology) {
            return Err(ResearchError::AlreadyResearched(technology));
        }
        if let Some(project) = self.in_progress {
            return Err(ResearchError::ProjectInProgress(project.technology));
        }
        self.in_progress = Some(ResearchProject {
            technology,
            days_done: 0,
        });
        Ok(())
    }

    /// Advances the current project by one day. Returns the technology when
    /// this day completes it.
    pub fn advance_day(&mut self) -> Option<Technology> {
        let project = self.in_progress.as_mut()?;
        project.days_done += 1;
        if project.days_done < project.technology.cost_days() {
            return None;
        }
        let technology = project.technology;
        self.in_progress = None;
        self.researched.insert(technology);
        Some(technology)
    }

    /// Sum of bonuses from researched technologies for `kind`'s `effect_type`.
    pub fn radius_bonus(&self, kind: BuildingKind, effect_type: EffectType) -> u32 {
        self.researched
            .iter()
            .flat_map(|t| t.upgrades())
            .filter(|u| u.kind == kind && u.effect_type.is_none_or(|ty| ty == effect_type))
            .map(|u| u.bonus)
            .sum()
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ResearchCompleted {
    pub technology: Technology,
}

/// Long-tick system: one research day.
pub fn advance_research(mut city: ResMut<City>, mut completed: EventWriter<ResearchCompleted>) {
    if let Some(technology) = city.research.advance_day() {
        info!("Research completed: {}", technology.name());
        completed.send(ResearchCompleted { technology });
    }
}

/// Re-spreads the effects of every building a completed technology upgrades.
pub fn refresh_researched_effects(
    mut events: EventReader<ResearchCompleted>,
    mut city: ResMut<City>,
) {
    for event in events.read() {
        let kinds: BTreeSet<BuildingKind> =
            event.technology.upgrades().iter().map(|u| u.kind).collect();
        let targets: Vec<_> = city
            .buildings()
            .filter(|b| kinds.contains(&b.kind))
            .map(|b| b.id)
            .collect();
        for id in &targets {
            refresh_building_effects(&mut city, *id);
        }
        debug!(
            "Refreshed effects of {} buildings after {}",
            targets.len(),
            event.technology.name()
        );
    }
}
