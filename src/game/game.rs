use tracing::debug;
use uuid::Uuid;

use crate::game::action::{FinalOutcome, TurnOutcome};
use crate::game::config::GameConfig;
use crate::game::engine::NegotiationEngine;
use crate::game::state::{GameError, STAGE_COUNT};
use crate::game::twist::{SeededTwist, TwistSource};
use crate::players::Participant;
use crate::types::Faction;

/// Proposals a participant may have rejected in a row before the game gives up.
const MAX_ATTEMPTS: usize = 32;

pub struct Game<T: TwistSource = SeededTwist> {
    pub seed: u64,
    pub id: Uuid,
    pub engine: NegotiationEngine<T>,
}

impl Game<SeededTwist> {
    pub fn new(config: GameConfig) -> Self {
        Self {
            seed: config.seed,
            id: Uuid::new_v4(),
            engine: NegotiationEngine::new(config),
        }
    }
}

impl<T: TwistSource> Game<T> {
    pub fn with_engine(seed: u64, engine: NegotiationEngine<T>) -> Self {
        Self {
            seed,
            id: Uuid::new_v4(),
            engine,
        }
    }

    /// Runs every remaining phase with the given participants.
    pub fn play<P: Participant>(&mut self, a: &mut P, b: &mut P) -> Result<FinalOutcome, GameError> {
        while self.engine.state().stage_index < STAGE_COUNT {
            self.play_elimination_round(a, b)?;
        }
        if !self.engine.state().weaknesses_chosen {
            self.choose_weaknesses(a, b);
        }
        while !self.engine.is_over() {
            self.play_tick(a, b)?;
        }
        Ok(self.engine.compute_outcome())
    }

    pub fn play_elimination_round<P: Participant>(
        &mut self,
        a: &mut P,
        b: &mut P,
    ) -> Result<usize, GameError> {
        retry(|| {
            let state = self.engine.state();
            let term_a = a.propose_term(state, Faction::A);
            let term_b = b.propose_term(state, Faction::B);
            self.engine.record_elimination(&term_a, &term_b)
        })
    }

    pub fn choose_weaknesses<P: Participant>(&mut self, a: &mut P, b: &mut P) {
        let state = self.engine.state();
        let color_a = a.choose_weakness(state, Faction::A);
        let color_b = b.choose_weakness(state, Faction::B);
        self.engine.set_weaknesses(color_a, color_b);
    }

    pub fn play_tick<P: Participant>(&mut self, a: &mut P, b: &mut P) -> Result<TurnOutcome, GameError> {
        retry(|| {
            let state = self.engine.state();
            let move_a = a.choose_move(state, Faction::A);
            let move_b = b.choose_move(state, Faction::B);
            self.engine
                .play_turn(move_a.card, move_b.card, &move_a.text, &move_b.text)
        })
    }
}

fn retry<R>(mut attempt: impl FnMut() -> Result<R, GameError>) -> Result<R, GameError> {
    let mut last_err = GameError::Validation("participant proposal");
    for tries in 1..=MAX_ATTEMPTS {
        match attempt() {
            Ok(value) => return Ok(value),
            Err(GameError::GameOver) => return Err(GameError::GameOver),
            Err(GameError::EliminationComplete) => return Err(GameError::EliminationComplete),
            Err(err) => {
                debug!(tries, error = %err, "proposal rejected, asking again");
                last_err = err;
            }
        }
    }
    Err(last_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::twist::FixedTwist;
    use crate::players::RandomParticipant;
    use crate::types::GamePhase;

    #[test]
    fn random_participants_finish_a_game() {
        let mut game = Game::new(GameConfig::default());
        let mut a = RandomParticipant::new(1);
        let mut b = RandomParticipant::new(2);
        let outcome = game.play(&mut a, &mut b).unwrap();
        assert_eq!(game.engine.phase(), GamePhase::Completed);
        assert_eq!(game.engine.state().items_a.len(), STAGE_COUNT);
        assert_eq!(game.engine.history().len(), 5);
        assert_eq!(outcome.ranked.len(), 3);
    }

    #[test]
    fn same_seeds_replay_identically() {
        let run = || {
            let engine = NegotiationEngine::with_twist_source(GameConfig::default(), FixedTwist(true));
            let mut game = Game::with_engine(5, engine);
            let mut a = RandomParticipant::new(10);
            let mut b = RandomParticipant::new(20);
            game.play(&mut a, &mut b).unwrap();
            game.engine.state().clone()
        };
        assert_eq!(run(), run());
    }
}
