//! Short-tick power and water balance.
//!
//! Production and consumption come straight from the building catalog. Any
//! shortfall is imported up to the budget's import limits; what still cannot
//! be covered lowers the efficiency of every consumer.

use bevy::prelude::*;

use crate::budget::ImportResource;
use crate::city::City;
use crate::config::{POWER_IMPORT_PRICE, WATER_IMPORT_PRICE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilityBalance {
    pub supply: f64,
    pub demand: f64,
    pub imported: f64,
    /// Fraction of demand met after imports (0..=1).
    pub satisfaction: f64,
}

impl Default for UtilityBalance {
    fn default() -> Self {
        Self {
            supply: 0.0,
            demand: 0.0,
            imported: 0.0,
            satisfaction: 1.0,
        }
    }
}

impl UtilityBalance {
    fn resolve(supply: f64, demand: f64, import_limit: f64) -> Self {
        let shortfall = (demand - supply).max(0.0);
        let imported = shortfall.min(import_limit.max(0.0));
        let satisfaction = if demand <= 0.0 {
            1.0
        } else {
            ((supply + imported) / demand).min(1.0)
        };
        Self {
            supply,
            demand,
            imported,
            satisfaction,
        }
    }
}

/// Latest utility balance, for readers outside the simulation.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct UtilityUsage {
    pub power: UtilityBalance,
    pub water: UtilityBalance,
}

impl UtilityUsage {
    pub fn import_cost(&self) -> f64 {
        self.power.imported * POWER_IMPORT_PRICE + self.water.imported * WATER_IMPORT_PRICE
    }
}

/// Balances supply against demand, charges imports to the budget and writes
/// each building's `last_efficiency`.
pub fn balance_utilities(city: &mut City) -> UtilityUsage {
    let (mut power_supply, mut power_demand) = (0.0, 0.0);
    let (mut water_supply, mut water_demand) = (0.0, 0.0);
    for b in city.buildings() {
        let def = b.def();
        if def.power >= 0.0 {
            power_supply += def.power;
        } else {
            power_demand -= def.power;
        }
        if def.water >= 0.0 {
            water_supply += def.water;
        } else {
            water_demand -= def.water;
        }
    }

    let limits = &city.budget.import_limits;
    let usage = UtilityUsage {
        power: UtilityBalance::resolve(
            power_supply,
            power_demand,
            limits.get(ImportResource::Power),
        ),
        water: UtilityBalance::resolve(
            water_supply,
            water_demand,
            limits.get(ImportResource::Water),
        ),
    };

    let allocations = city.budget.service_allocations.clone();
    for b in city.buildings_mut() {
        let def = b.def();
        let mut efficiency: f64 = 1.0;
        if def.power < 0.0 {
            efficiency = efficiency.min(usage.power.satisfaction);
        }
        if def.water < 0.0 {
            efficiency = efficiency.min(usage.water.satisfaction);
        }
        if let Some(service) = def.service {
            efficiency *= allocations.get(service) as f64;
        }
        b.last_efficiency = efficiency.clamp(0.0, 1.0);
    }

    city.budget.last_import_costs = usage.import_cost();
    usage
}

pub fn update_utilities(mut city: ResMut<City>, mut usage: ResMut<UtilityUsage>) {
    let balance = balance_utilities(&mut city);
    if balance.power.satisfaction < 1.0 || balance.water.satisfaction < 1.0 {
        debug!(
            "Utility shortfall: power {:.0}%, water {:.0}%",
            balance.power.satisfaction * 100.0,
            balance.water.satisfaction * 100.0
        );
    }
    *usage = balance;
}
