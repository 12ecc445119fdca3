use bevy::prelude::*;

use crate::budget::{DailyReport, RevenueBreakdown, ServiceCosts, TaxCategory};
use crate::city::City;
use crate::config::{INCOME_PER_RESIDENT, PROPERTY_BASE_PER_TILE, SHORT_TICKS_PER_LONG_TICK};
use crate::effects::EffectType;

/// Per-tick revenue and upkeep of every building, folded into the budget's
/// rolling totals. Tax rates and allocations are only read here.
pub fn apply_budget_effects(city: &mut City) {
    let ticks = SHORT_TICKS_PER_LONG_TICK as f64;
    let rates = city.budget.tax_rates.clone();
    let allocations = city.budget.service_allocations.clone();

    city.budget.reset_last_service_costs();
    let mut revenue = RevenueBreakdown::default();
    let mut costs = ServiceCosts::default();

    for b in city.buildings() {
        let def = b.def();
        let footprint = b.footprint();
        let efficiency = b.last_efficiency;

        if def.residents > 0 {
            revenue.add(
                TaxCategory::Income,
                def.residents as f64 * INCOME_PER_RESIDENT * rates.income as f64 / ticks,
            );
        }

        if def.business_value > 0.0 {
            let boost = city.effects.highest_in(footprint, EffectType::BusinessValue);
            let sales = def.business_value * efficiency * (1.0 + boost).max(0.0);
            revenue.add(TaxCategory::Sales, sales * rates.sales as f64 / ticks);
        }

        let land_value = city.effects.average_in(footprint, EffectType::LandValue);
        let assessed = b.tile_count() as f64 * PROPERTY_BASE_PER_TILE * (1.0 + land_value).max(0.0);
        revenue.add(TaxCategory::Property, assessed * rates.property as f64 / ticks);

        if let Some(service) = def.service {
            costs.add(service, def.upkeep * allocations.get(service) as f64 / ticks);
        }
    }

    city.budget.last_revenue = revenue;
    city.budget.last_service_costs = costs;
    city.budget.accumulate_last_tick();
}

/// Long-tick settlement: moves the rolling balance into the treasury.
pub fn settle_budget(city: &mut City) -> DailyReport {
    city.day += 1;
    let day = city.day;
    let report = city.budget.settle_day(day);
    info!(
        "Day {}: income {:.2}, expenses {:.2}, treasury {:.2}",
        report.day, report.income, report.expenses, report.treasury
    );
    report
}

pub fn update_budget(mut city: ResMut<City>) {
    apply_budget_effects(&mut city);
}

pub fn settle_daily_budget(mut city: ResMut<City>) {
    settle_budget(&mut city);
}
