use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::types::Color;

/// World stock per color. Counters only ever grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScoreTally {
    counts: [u32; Color::ALL.len()],
}

impl ScoreTally {
    pub const fn zero() -> Self {
        Self {
            counts: [0; Color::ALL.len()],
        }
    }

    pub const fn from_counts(counts: [u32; 3]) -> Self {
        Self { counts }
    }

    pub fn add(&mut self, color: Color, amount: u32) {
        let idx = color.index();
        self.counts[idx] = self.counts[idx].saturating_add(amount);
    }

    pub fn get(&self, color: Color) -> u32 {
        self.counts[color.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn counts(&self) -> [u32; Color::ALL.len()] {
        self.counts
    }

    pub fn iter(&self) -> impl Iterator<Item = (Color, u32)> + '_ {
        Color::ALL.into_iter().zip(self.counts.iter().copied())
    }

    /// Colors ordered by score, highest first. Equal scores keep R, B, Y order.
    pub fn ranked(&self) -> Vec<(Color, u32)> {
        self.iter()
            .sorted_by(|(_, left), (_, right)| right.cmp(left))
            .collect()
    }
}

impl fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .iter()
            .map(|(color, amount)| format!("{}={}", color.label(), amount))
            .join(" / ");
        write!(f, "{parts}")
    }
}
