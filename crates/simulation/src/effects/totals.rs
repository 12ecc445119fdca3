use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{Effect, EffectType};
use crate::buildings::BuildingId;
use crate::grid::GridRect;

/// Per-cell running totals for every effect type.
pub type CellTotals = [f64; EffectType::COUNT];

/// One spread of one effect: the amount added and the cells it was added to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedEffect {
    pub effect: Effect,
    pub amount: f64,
    /// Flat grid indices (`y * width + x`) that received `amount`.
    pub cells: Vec<u32>,
}

/// Aggregated effect totals plus the ledger of contributions that produced them.
///
/// Only the propagation engine mutates this; everything else reads.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectTotals {
    width: usize,
    height: usize,
    totals: Vec<CellTotals>,
    applied: BTreeMap<BuildingId, Vec<AppliedEffect>>,
}

impl EffectTotals {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            totals: vec![[0.0; EffectType::COUNT]; width * height],
            applied: BTreeMap::new(),
        }
    }

    /// Rebuilds totals from a saved set of cell totals and the contribution ledger.
    /// Returns `None` when the parts don't fit a `width` x `height` grid.
    pub fn from_saved(
        width: usize,
        height: usize,
        totals: Vec<CellTotals>,
        applied: Vec<AppliedEffect>,
    ) -> Option<Self> {
        let cell_count = width * height;
        if totals.len() != cell_count {
            return None;
        }
        let mut ledger: BTreeMap<BuildingId, Vec<AppliedEffect>> = BTreeMap::new();
        for entry in applied {
            if entry.cells.iter().any(|&c| c as usize >= cell_count) {
                return None;
            }
            ledger.entry(entry.effect.source).or_default().push(entry);
        }
        Some(Self {
            width,
            height,
            totals,
            applied: ledger,
        })
    }

    /// Totals recomputed from the ledger alone, for consistency checks.
    pub fn recomputed_totals(&self) -> Vec<CellTotals> {
        let mut totals = vec![[0.0; EffectType::COUNT]; self.width * self.height];
        for entry in self.applied.values().flatten() {
            let ty = entry.effect.effect_type.index();
            for &cell in &entry.cells {
                totals[cell as usize][ty] += entry.amount;
            }
        }
        totals
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, effect_type: EffectType) -> f64 {
        self.totals[y * self.width + x][effect_type.index()]
    }

    pub fn all_totals(&self) -> &[CellTotals] {
        &self.totals
    }

    /// Highest total of `effect_type` over the rectangle, or 0 for an empty rectangle.
    pub fn highest_in(&self, rect: GridRect, effect_type: EffectType) -> f64 {
        rect.cells()
            .map(|(x, y)| self.get(x, y, effect_type))
            .fold(None, |best: Option<f64>, v| Some(best.map_or(v, |b| b.max(v))))
            .unwrap_or(0.0)
    }

    pub fn average_in(&self, rect: GridRect, effect_type: EffectType) -> f64 {
        let count = rect.cell_count();
        if count == 0 {
            return 0.0;
        }
        rect.cells()
            .map(|(x, y)| self.get(x, y, effect_type))
            .sum::<f64>()
            / count as f64
    }

    pub fn applied_by(&self, source: BuildingId) -> &[AppliedEffect] {
        self.applied.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn applied(&self) -> impl Iterator<Item = &AppliedEffect> {
        self.applied.values().flatten()
    }

    pub(crate) fn add(&mut self, effect: Effect, amount: f64, cells: Vec<u32>) {
        let ty = effect.effect_type.index();
        for &cell in &cells {
            self.totals[cell as usize][ty] += amount;
        }
        self.applied
            .entry(effect.source)
            .or_default()
            .push(AppliedEffect {
                effect,
                amount,
                cells,
            });
    }

    /// Subtracts every contribution `source` made inside `rect`. Contributions
    /// outside the rectangle stay recorded. Returns the number of cell
    /// contributions removed.
    pub(crate) fn remove_within(&mut self, source: BuildingId, rect: GridRect) -> usize {
        let Some(entries) = self.applied.remove(&source) else {
            return 0;
        };
        let width = self.width;
        let mut removed = 0;
        let mut kept = Vec::new();
        for mut entry in entries {
            let ty = entry.effect.effect_type.index();
            let amount = entry.amount;
            let totals = &mut self.totals;
            entry.cells.retain(|&cell| {
                let idx = cell as usize;
                if rect.contains(idx % width, idx / width) {
                    totals[idx][ty] -= amount;
                    removed += 1;
                    false
                } else {
                    true
                }
            });
            if !entry.cells.is_empty() {
                kept.push(entry);
            }
        }
        if !kept.is_empty() {
            self.applied.insert(source, kept);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect(source: u32, effect_type: EffectType) -> Effect {
        Effect {
            effect_type,
            magnitude: 1.0,
            source: BuildingId(source),
            dynamic: None,
        }
    }

    #[test]
    fn test_add_then_remove_restores_zero() {
        let mut totals = EffectTotals::new(4, 4);
        totals.add(effect(0, EffectType::Crime), 2.5, vec![0, 1, 5]);
        assert_eq!(totals.get(1, 1, EffectType::Crime), 2.5);

        let full = GridRect {
            x0: 0,
            y0: 0,
            x1: 4,
            y1: 4,
        };
        assert_eq!(totals.remove_within(BuildingId(0), full), 3);
        assert_eq!(totals.get(1, 1, EffectType::Crime), 0.0);
        assert!(totals.applied_by(BuildingId(0)).is_empty());
    }

    #[test]
    fn test_remove_keeps_contributions_outside_rect() {
        let mut totals = EffectTotals::new(4, 4);
        totals.add(effect(3, EffectType::Noise), 1.0, vec![0, 15]);
        let corner = GridRect {
            x0: 0,
            y0: 0,
            x1: 1,
            y1: 1,
        };
        assert_eq!(totals.remove_within(BuildingId(3), corner), 1);
        assert_eq!(totals.get(0, 0, EffectType::Noise), 0.0);
        assert_eq!(totals.get(3, 3, EffectType::Noise), 1.0);
        assert_eq!(totals.applied_by(BuildingId(3))[0].cells, vec![15]);
    }

    #[test]
    fn test_other_sources_untouched() {
        let mut totals = EffectTotals::new(2, 2);
        totals.add(effect(1, EffectType::Pollution), 1.0, vec![0]);
        totals.add(effect(2, EffectType::Pollution), 4.0, vec![0]);
        let full = GridRect {
            x0: 0,
            y0: 0,
            x1: 2,
            y1: 2,
        };
        totals.remove_within(BuildingId(1), full);
        assert_eq!(totals.get(0, 0, EffectType::Pollution), 4.0);
    }

    #[test]
    fn test_from_saved_rejects_bad_shapes() {
        assert!(EffectTotals::from_saved(2, 2, vec![[0.0; EffectType::COUNT]; 3], vec![]).is_none());
        let stray = AppliedEffect {
            effect: effect(0, EffectType::Crime),
            amount: 1.0,
            cells: vec![99],
        };
        assert!(
            EffectTotals::from_saved(2, 2, vec![[0.0; EffectType::COUNT]; 4], vec![stray])
                .is_none()
        );
    }

    #[test]
    fn test_recomputed_matches_incremental() {
        let mut totals = EffectTotals::new(3, 3);
        totals.add(effect(0, EffectType::LandValue), 0.25, vec![0, 4, 8]);
        totals.add(effect(1, EffectType::LandValue), 0.5, vec![4]);
        let recomputed = totals.recomputed_totals();
        assert_eq!(recomputed.as_slice(), totals.all_totals());
    }

    #[test]
    fn test_highest_and_average() {
        let mut totals = EffectTotals::new(2, 1);
        totals.add(effect(0, EffectType::BusinessValue), 0.2, vec![0]);
        totals.add(effect(1, EffectType::BusinessValue), 0.6, vec![1]);
        let rect = GridRect {
            x0: 0,
            y0: 0,
            x1: 2,
            y1: 1,
        };
        assert!((totals.highest_in(rect, EffectType::BusinessValue) - 0.6).abs() < 1e-12);
        assert!((totals.average_in(rect, EffectType::BusinessValue) - 0.4).abs() < 1e-12);
    }
}
