//! Bounded log of recently executed actions and their results, so callers can
//! inspect outcomes after the executor has drained the queue.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::{ActionResult, GameAction};

const MAX_ENTRIES: usize = 64;

#[derive(Resource, Debug, Clone, Default)]
pub struct ActionResultLog {
    entries: VecDeque<(GameAction, ActionResult)>,
}

impl ActionResultLog {
    /// Records an entry, evicting the oldest once the log is full.
    pub fn push(&mut self, action: GameAction, result: ActionResult) {
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back((action, result));
    }

    /// The last `n` entries, oldest first.
    pub fn last_n(&self, n: usize) -> Vec<&(GameAction, ActionResult)> {
        let start = self.entries.len().saturating_sub(n);
        self.entries.range(start..).collect()
    }

    pub fn latest(&self) -> Option<&(GameAction, ActionResult)> {
        self.entries.back()
    }

    pub fn failures(&self) -> impl Iterator<Item = &(GameAction, ActionResult)> {
        self.entries.iter().filter(|(_, r)| !r.is_success())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
