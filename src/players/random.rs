use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::game::action::Move;
use crate::game::config::DEFAULT_LONG_TEXT_LIMIT;
use crate::game::state::GameState;
use crate::players::Participant;
use crate::types::{Color, Faction, TurnKind};

const VOCABULARY: &[&str] = &[
    "water", "salt", "rice", "paper", "trains", "bridges", "temples", "umbrellas", "keys",
    "phones", "tea", "books", "bicycles", "festivals", "maps", "clocks", "soap", "music",
];

const PHRASES: &[&str] = &[
    "we insist",
    "trust us",
    "take a break",
    "for the people",
    "our honor demands this of every citizen",
    "no comment",
    "let us rest a while longer than planned",
];

/// Seeded participant used by the simulator.
#[derive(Debug, Clone)]
pub struct RandomParticipant {
    rng: StdRng,
    long_text_limit: usize,
}

impl RandomParticipant {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            long_text_limit: DEFAULT_LONG_TEXT_LIMIT,
        }
    }

    pub fn with_long_text_limit(mut self, limit: usize) -> Self {
        self.long_text_limit = limit;
        self
    }

    fn is_long(&self, text: &str) -> bool {
        text.chars().count() > self.long_text_limit
    }

    fn pick_color(&mut self) -> Color {
        Color::ALL[self.rng.gen_range(0..Color::ALL.len())]
    }
}

impl Participant for RandomParticipant {
    fn propose_term(&mut self, state: &GameState, _faction: Faction) -> String {
        let unused: Vec<&str> = VOCABULARY
            .iter()
            .copied()
            .filter(|word| !state.seen_terms.contains(*word))
            .collect();
        match unused.choose(&mut self.rng) {
            Some(word) => word.to_string(),
            None => format!("relic-{}", self.rng.gen_range(0..10_000)),
        }
    }

    fn choose_weakness(&mut self, _state: &GameState, _faction: Faction) -> Color {
        self.pick_color()
    }

    fn choose_move(&mut self, state: &GameState, faction: Faction) -> Move {
        let card = match state.turn_kind() {
            TurnKind::Domestic => self.pick_color(),
            TurnKind::Diplomatic => state
                .past(faction.opponent())
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(Color::Yellow),
        };
        let mut text = PHRASES.choose(&mut self.rng).copied().unwrap_or("ok");
        // A long phrase turns the card Yellow, which must also be borrowable.
        let yellow_borrowable = state.past(faction.opponent()).contains(&Color::Yellow);
        if state.turn_kind() == TurnKind::Diplomatic && self.is_long(text) && !yellow_borrowable {
            let limit = self.long_text_limit;
            text = PHRASES
                .iter()
                .copied()
                .filter(|phrase| phrase.chars().count() <= limit)
                .collect::<Vec<_>>()
                .choose(&mut self.rng)
                .copied()
                .unwrap_or("ok");
        }
        Move::new(card, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avoids_seen_terms() {
        let mut state = GameState::new();
        for word in VOCABULARY.iter().skip(1) {
            state.seen_terms.insert(word.to_string());
        }
        let mut participant = RandomParticipant::new(3);
        assert_eq!(participant.propose_term(&state, Faction::A), VOCABULARY[0]);
    }

    #[test]
    fn diplomatic_moves_borrow_from_opponent() {
        let mut state = GameState::new();
        state.turn = 4;
        state.past_b.push(Color::Blue);
        state.past_b.push(Color::Blue);
        state.past_b.push(Color::Blue);
        let mut participant = RandomParticipant::new(11);
        for _ in 0..8 {
            let mv = participant.choose_move(&state, Faction::A);
            assert_eq!(mv.card, Color::Blue);
        }
    }
}
