//! Assertion helpers for `TestCity` integration tests.

use crate::effects::EffectType;

use super::TestCity;

impl TestCity {
    /// Assert treasury is above a given amount.
    pub fn assert_budget_above(&self, amount: f64) {
        let treasury = self.budget().treasury;
        assert!(
            treasury > amount,
            "Expected treasury > {amount}, got {treasury}"
        );
    }

    /// Assert treasury is below a given amount.
    pub fn assert_budget_below(&self, amount: f64) {
        let treasury = self.budget().treasury;
        assert!(
            treasury < amount,
            "Expected treasury < {amount}, got {treasury}"
        );
    }

    pub fn assert_has_building(&self, x: usize, y: usize) {
        assert!(
            self.city().building_at(x, y).is_some(),
            "Expected building at ({x}, {y}), found none"
        );
    }

    pub fn assert_no_building(&self, x: usize, y: usize) {
        if let Some(b) = self.city().building_at(x, y) {
            panic!("Expected empty cell at ({x}, {y}), found {} {}", b.kind.name(), b.id);
        }
    }

    pub fn assert_effect(&self, x: usize, y: usize, effect_type: EffectType, expected: f64) {
        let actual = self.effect_at(x, y, effect_type);
        assert!(
            (actual - expected).abs() < 1e-9,
            "Expected {} {expected} at ({x}, {y}), got {actual}",
            effect_type.name()
        );
    }

    pub fn assert_last_action_succeeded(&self) {
        match self.last_result() {
            Some(result) => assert!(result.is_success(), "last action failed: {result:?}"),
            None => panic!("no action has been executed"),
        }
    }
}
