use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use crate::game::game::Game;
use crate::game::twist::TwistSource;
use crate::types::{Color, Ending};

#[derive(Debug, Default, Clone, Serialize)]
pub struct GameStats {
    pub endings: HashMap<Ending, u32>,
    pub score_totals: HashMap<Color, u64>,
    pub twists: u32,
    pub blank_slips: u32,
    pub games: u32,
    #[serde(skip)]
    pub total_duration: Duration,
}

impl GameStats {
    pub fn new() -> Self {
        Self {
            endings: HashMap::new(),
            score_totals: HashMap::new(),
            twists: 0,
            blank_slips: 0,
            games: 0,
            total_duration: Duration::ZERO,
        }
    }

    pub fn record_game<T: TwistSource>(&mut self, game: &Game<T>, duration: Duration) {
        self.games += 1;
        self.total_duration += duration;

        let state = game.engine.state();
        let outcome = game.engine.compute_outcome();
        *self.endings.entry(outcome.ending).or_insert(0) += 1;
        for (color, score) in state.scores.iter() {
            *self.score_totals.entry(color).or_insert(0) += u64::from(score);
        }
        if state.twist_active {
            self.twists += 1;
        }
        self.blank_slips += state
            .history
            .iter()
            .filter(|turn| turn.resonance.is_blank_slip())
            .count() as u32;
    }

    pub fn ending_rate(&self, ending: Ending) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        f64::from(self.endings.get(&ending).copied().unwrap_or(0)) / f64::from(self.games)
    }

    pub fn avg_score(&self, color: Color) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.score_totals.get(&color).copied().unwrap_or(0) as f64 / f64::from(self.games)
    }

    pub fn get_avg_duration(&self) -> Duration {
        if self.games == 0 {
            return Duration::ZERO;
        }
        self.total_duration / self.games
    }
}

pub struct StatisticsAccumulator {
    pub stats: GameStats,
}

impl Default for StatisticsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self {
            stats: GameStats::new(),
        }
    }

    pub fn after<T: TwistSource>(&mut self, game: &Game<T>, duration: Duration) {
        self.stats.record_game(game, duration);
    }
}
