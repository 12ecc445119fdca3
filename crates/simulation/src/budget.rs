use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::config::STARTING_TREASURY;

/// Number of settled days kept in `Budget::history`.
const HISTORY_DAYS: usize = 30;

pub const MAX_TAX_RATE: f32 = 0.5;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub enum TaxCategory {
    Income,
    Sales,
    Property,
}

impl TaxCategory {
    pub const ALL: [TaxCategory; 3] = [TaxCategory::Income, TaxCategory::Sales, TaxCategory::Property];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub enum ServiceCategory {
    Police,
    Fire,
    Education,
    Health,
    Parks,
    Utilities,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 6] = [
        ServiceCategory::Police,
        ServiceCategory::Fire,
        ServiceCategory::Education,
        ServiceCategory::Health,
        ServiceCategory::Parks,
        ServiceCategory::Utilities,
    ];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub enum ImportResource {
    Power,
    Water,
}

/// Per-category tax rates (0.0 to `MAX_TAX_RATE`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRates {
    pub income: f32,
    pub sales: f32,
    pub property: f32,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            income: 0.10,
            sales: 0.08,
            property: 0.05,
        }
    }
}

impl TaxRates {
    pub fn get(&self, category: TaxCategory) -> f32 {
        match category {
            TaxCategory::Income => self.income,
            TaxCategory::Sales => self.sales,
            TaxCategory::Property => self.property,
        }
    }

    /// Sets a rate, clamped to the legal range. Returns the stored value.
    pub fn set(&mut self, category: TaxCategory, rate: f32) -> f32 {
        let rate = rate.clamp(0.0, MAX_TAX_RATE);
        match category {
            TaxCategory::Income => self.income = rate,
            TaxCategory::Sales => self.sales = rate,
            TaxCategory::Property => self.property = rate,
        }
        rate
    }
}

/// Per-service funding multipliers (0.0 to 1.0, where 1.0 = fully funded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAllocations {
    pub police: f32,
    pub fire: f32,
    pub education: f32,
    pub health: f32,
    pub parks: f32,
    pub utilities: f32,
}

impl Default for ServiceAllocations {
    fn default() -> Self {
        Self {
            police: 1.0,
            fire: 1.0,
            education: 1.0,
            health: 1.0,
            parks: 1.0,
            utilities: 1.0,
        }
    }
}

impl ServiceAllocations {
    pub fn get(&self, service: ServiceCategory) -> f32 {
        match service {
            ServiceCategory::Police => self.police,
            ServiceCategory::Fire => self.fire,
            ServiceCategory::Education => self.education,
            ServiceCategory::Health => self.health,
            ServiceCategory::Parks => self.parks,
            ServiceCategory::Utilities => self.utilities,
        }
    }

    /// Sets an allocation, clamped to 0..=1. Returns the stored value.
    pub fn set(&mut self, service: ServiceCategory, allocation: f32) -> f32 {
        let allocation = allocation.clamp(0.0, 1.0);
        let slot = match service {
            ServiceCategory::Police => &mut self.police,
            ServiceCategory::Fire => &mut self.fire,
            ServiceCategory::Education => &mut self.education,
            ServiceCategory::Health => &mut self.health,
            ServiceCategory::Parks => &mut self.parks,
            ServiceCategory::Utilities => &mut self.utilities,
        };
        *slot = allocation;
        allocation
    }
}

/// Maximum units per short tick the city will buy from outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportLimits {
    pub power: f64,
    pub water: f64,
}

impl Default for ImportLimits {
    fn default() -> Self {
        Self {
            power: 50.0,
            water: 50.0,
        }
    }
}

impl ImportLimits {
    pub fn get(&self, resource: ImportResource) -> f64 {
        match resource {
            ImportResource::Power => self.power,
            ImportResource::Water => self.water,
        }
    }

    pub fn set(&mut self, resource: ImportResource, limit: f64) {
        match resource {
            ImportResource::Power => self.power = limit,
            ImportResource::Water => self.water = limit,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    pub income: f64,
    pub sales: f64,
    pub property: f64,
}

impl RevenueBreakdown {
    pub fn total(&self) -> f64 {
        self.income + self.sales + self.property
    }

    pub fn add(&mut self, category: TaxCategory, amount: f64) {
        match category {
            TaxCategory::Income => self.income += amount,
            TaxCategory::Sales => self.sales += amount,
            TaxCategory::Property => self.property += amount,
        }
    }

    pub fn get(&self, category: TaxCategory) -> f64 {
        match category {
            TaxCategory::Income => self.income,
            TaxCategory::Sales => self.sales,
            TaxCategory::Property => self.property,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceCosts {
    pub police: f64,
    pub fire: f64,
    pub education: f64,
    pub health: f64,
    pub parks: f64,
    pub utilities: f64,
}

impl ServiceCosts {
    pub fn total(&self) -> f64 {
        self.police + self.fire + self.education + self.health + self.parks + self.utilities
    }

    pub fn get(&self, service: ServiceCategory) -> f64 {
        match service {
            ServiceCategory::Police => self.police,
            ServiceCategory::Fire => self.fire,
            ServiceCategory::Education => self.education,
            ServiceCategory::Health => self.health,
            ServiceCategory::Parks => self.parks,
            ServiceCategory::Utilities => self.utilities,
        }
    }

    pub fn add(&mut self, service: ServiceCategory, amount: f64) {
        match service {
            ServiceCategory::Police => self.police += amount,
            ServiceCategory::Fire => self.fire += amount,
            ServiceCategory::Education => self.education += amount,
            ServiceCategory::Health => self.health += amount,
            ServiceCategory::Parks => self.parks += amount,
            ServiceCategory::Utilities => self.utilities += amount,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub services: ServiceCosts,
    pub imports: f64,
}

impl ExpenseBreakdown {
    pub fn total(&self) -> f64 {
        self.services.total() + self.imports
    }
}

/// One settled day, kept for charts and the balance-streak achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub day: u32,
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub treasury: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub treasury: f64,
    pub tax_rates: TaxRates,
    pub service_allocations: ServiceAllocations,
    pub import_limits: ImportLimits,
    /// Rolling totals since the last settlement.
    pub revenue: RevenueBreakdown,
    pub expenses: ExpenseBreakdown,
    /// Snapshot of the most recent short tick.
    pub last_revenue: RevenueBreakdown,
    pub last_service_costs: ServiceCosts,
    pub last_import_costs: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub history: Vec<DailyReport>,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            treasury: STARTING_TREASURY,
            tax_rates: TaxRates::default(),
            service_allocations: ServiceAllocations::default(),
            import_limits: ImportLimits::default(),
            revenue: RevenueBreakdown::default(),
            expenses: ExpenseBreakdown::default(),
            last_revenue: RevenueBreakdown::default(),
            last_service_costs: ServiceCosts::default(),
            last_import_costs: 0.0,
            total_income: 0.0,
            total_expenses: 0.0,
            history: Vec::new(),
        }
    }
}

impl Budget {
    pub fn calculate_balance(&self) -> f64 {
        self.total_income - self.total_expenses
    }

    /// Clears the per-tick revenue and service cost snapshot so a
    /// recomputation starts from zero. Import costs are owned by utilities.
    pub fn reset_last_service_costs(&mut self) {
        self.last_service_costs = ServiceCosts::default();
        self.last_revenue = RevenueBreakdown::default();
    }

    /// Folds the current per-tick snapshot into the rolling totals.
    pub fn accumulate_last_tick(&mut self) {
        self.revenue.income += self.last_revenue.income;
        self.revenue.sales += self.last_revenue.sales;
        self.revenue.property += self.last_revenue.property;
        for service in ServiceCategory::ALL {
            self.expenses
                .services
                .add(service, self.last_service_costs.get(service));
        }
        self.expenses.imports += self.last_import_costs;
        self.total_income = self.revenue.total();
        self.total_expenses = self.expenses.total();
    }

    /// Moves the rolling balance into the treasury and starts a new period.
    pub fn settle_day(&mut self, day: u32) -> DailyReport {
        let balance = self.calculate_balance();
        self.treasury += balance;
        let report = DailyReport {
            day,
            income: self.total_income,
            expenses: self.total_expenses,
            balance,
            treasury: self.treasury,
        };
        if self.history.len() >= HISTORY_DAYS {
            self.history.remove(0);
        }
        self.history.push(report.clone());
        self.revenue = RevenueBreakdown::default();
        self.expenses = ExpenseBreakdown::default();
        self.total_income = 0.0;
        self.total_expenses = 0.0;
        report
    }

    /// Number of most recent settled days in a row with a positive balance.
    pub fn positive_balance_streak(&self) -> usize {
        self.history
            .iter()
            .rev()
            .take_while(|r| r.balance > 0.0)
            .count()
    }
}
