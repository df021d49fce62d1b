use tracing::{debug, info};

use crate::game::action::{FinalOutcome, Resonance, TurnOutcome};
use crate::game::config::GameConfig;
use crate::game::scores::ScoreTally;
use crate::game::state::{GameError, GameState, STAGE_COUNT, TWIST_DRAW_TURN};
use crate::game::twist::{SeededTwist, TwistSource};
use crate::types::{Color, Ending, Faction, GamePhase, STAGE_LABELS, TurnKind};

/// Rules engine for one game. Every operation either applies all of its
/// effects or returns an error and leaves the state untouched.
#[derive(Debug, Clone)]
pub struct NegotiationEngine<T: TwistSource = SeededTwist> {
    config: GameConfig,
    state: GameState,
    twist: T,
}

impl NegotiationEngine<SeededTwist> {
    pub fn new(config: GameConfig) -> Self {
        let twist = SeededTwist::new(config.seed, config.twist_probability);
        Self::with_twist_source(config, twist)
    }
}

impl<T: TwistSource> NegotiationEngine<T> {
    pub fn with_twist_source(config: GameConfig, twist: T) -> Self {
        Self {
            config,
            state: GameState::new(),
            twist,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn turn_kind(&self) -> TurnKind {
        self.state.turn_kind()
    }

    pub fn history(&self) -> &[TurnOutcome] {
        &self.state.history
    }

    /// Label of the elimination round waiting for input, if any.
    pub fn stage_label(&self) -> Option<&'static str> {
        STAGE_LABELS.get(self.state.stage_index).copied()
    }

    pub fn nation_name(&self, faction: Faction) -> &str {
        match faction {
            Faction::A => &self.config.nation_a,
            Faction::B => &self.config.nation_b,
        }
    }

    pub fn record_elimination(&mut self, term_a: &str, term_b: &str) -> Result<usize, GameError> {
        if self.state.stage_index >= STAGE_COUNT {
            return Err(GameError::EliminationComplete);
        }
        if term_a.is_empty() {
            return Err(GameError::Validation("faction A's term"));
        }
        if term_b.is_empty() {
            return Err(GameError::Validation("faction B's term"));
        }
        for term in [term_a, term_b] {
            if self.state.seen_terms.contains(term) {
                debug!(term, "rejected previously named term");
                return Err(GameError::DuplicateTerm {
                    term: term.to_string(),
                });
            }
        }
        if term_a == term_b {
            debug!(term = term_b, "rejected identical terms in one round");
            return Err(GameError::DuplicateTerm {
                term: term_b.to_string(),
            });
        }

        self.state.seen_terms.insert(term_a.to_string());
        self.state.seen_terms.insert(term_b.to_string());
        self.state.items_a.push(term_a.to_string());
        self.state.items_b.push(term_b.to_string());
        self.state.stage_index += 1;
        debug!(
            stage = self.state.stage_index,
            term_a, term_b, "elimination round recorded"
        );
        Ok(self.state.stage_index)
    }

    pub fn set_weaknesses(&mut self, color_a: Color, color_b: Color) {
        self.state.weakness_a = color_a;
        self.state.weakness_b = color_b;
        self.state.weaknesses_chosen = true;
        debug!(%color_a, %color_b, "weaknesses set");
    }

    /// Picks the faction's most painful lost item by 1-based number, once
    /// every elimination round is recorded. Out-of-range numbers are
    /// clamped to the first or last item.
    pub fn mark_painful_item(&mut self, faction: Faction, number: usize) -> Result<String, GameError> {
        if self.state.stage_index < STAGE_COUNT {
            return Err(GameError::EliminationPending);
        }
        let items = self.state.items(faction);
        let idx = number.clamp(1, items.len()) - 1;
        let item = items[idx].clone();
        *self.state.painful_mut(faction) = Some(item.clone());
        debug!(%faction, item = %item, "painful item marked");
        Ok(item)
    }

    /// `vetoer` replaces its opponent's weakness color. Once per faction,
    /// and only between `set_weaknesses` and the first turn.
    pub fn veto_weakness(&mut self, vetoer: Faction, replacement: Color) -> Result<(), GameError> {
        if self.state.phase() != GamePhase::Negotiation || self.state.turn > 1 {
            return Err(GameError::VetoClosed);
        }
        if *self.state.veto_used_mut(vetoer) {
            return Err(GameError::VetoSpent(vetoer));
        }
        *self.state.veto_used_mut(vetoer) = true;
        *self.state.weakness_mut(vetoer.opponent()) = replacement;
        debug!(%vetoer, %replacement, "weakness vetoed");
        Ok(())
    }

    pub fn play_turn(
        &mut self,
        card_a: Color,
        card_b: Color,
        text_a: &str,
        text_b: &str,
    ) -> Result<TurnOutcome, GameError> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        if text_a.is_empty() {
            return Err(GameError::Validation("faction A's text"));
        }
        if text_b.is_empty() {
            return Err(GameError::Validation("faction B's text"));
        }

        let (card_a, coerced_a) = self.normalize(card_a, text_a);
        let (card_b, coerced_b) = self.normalize(card_b, text_b);
        let turn = self.state.turn;
        let kind = self.state.turn_kind();

        match kind {
            TurnKind::Diplomatic => {
                if !self.state.past_b.contains(&card_a) {
                    debug!(turn, card = %card_a, "faction A card not in B's history");
                    return Err(GameError::InvalidMove {
                        faction: Faction::A,
                        card: card_a,
                    });
                }
                if !self.state.past_a.contains(&card_b) {
                    debug!(turn, card = %card_b, "faction B card not in A's history");
                    return Err(GameError::InvalidMove {
                        faction: Faction::B,
                        card: card_b,
                    });
                }
            }
            TurnKind::Domestic => {
                self.state.past_a.push(card_a);
                self.state.past_b.push(card_b);
            }
        }

        let twist_note = if turn == TWIST_DRAW_TURN && !self.state.twist_resolved {
            let active = self.twist.next_bool();
            self.state.twist_active = active;
            self.state.twist_resolved = true;
            info!(active, "twist drawn");
            Some(active)
        } else {
            None
        };

        let resonance = self.resolve_resonance(card_a, card_b);
        self.state.turn += 1;

        let outcome = TurnOutcome {
            turn,
            kind,
            card_a,
            card_b,
            coerced_a,
            coerced_b,
            text_a: text_a.to_string(),
            text_b: text_b.to_string(),
            twist_note,
            resonance,
            game_over: self.state.is_over(),
        };
        self.state.history.push(outcome.clone());
        debug!(turn, ?resonance, scores = %self.state.scores, "turn resolved");
        if outcome.game_over {
            info!(ending = %self.compute_outcome().ending, "game completed");
        }
        Ok(outcome)
    }

    pub fn compute_outcome(&self) -> FinalOutcome {
        outcome_for(&self.state.scores)
    }

    fn normalize(&self, card: Color, text: &str) -> (Color, bool) {
        if text.chars().count() > self.config.long_text_limit {
            (Color::Yellow, card != Color::Yellow)
        } else {
            (card, false)
        }
    }

    fn resolve_resonance(&mut self, card_a: Color, card_b: Color) -> Resonance {
        if card_a != card_b {
            return Resonance::Dissonant;
        }
        let twisted = self.state.twist_applies();
        let target = if twisted { card_a.successor() } else { card_a };
        let gain = if self.state.is_weakness(target) { 0 } else { 1 };
        self.state.scores.add(target, gain);
        Resonance::Resonant {
            matched: card_a,
            target,
            gain,
            twisted,
        }
    }
}

/// Only the top two ranked colors decide the ending.
pub fn outcome_for(scores: &ScoreTally) -> FinalOutcome {
    let ranked = scores.ranked();
    let ending = match ranked.as_slice() {
        [(leader, top), (_, runner_up), ..] if top != runner_up => Ending::led_by(*leader),
        _ => Ending::BlankAgreement,
    };
    FinalOutcome { ending, ranked }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::twist::FixedTwist;

    fn engine(twist: bool) -> NegotiationEngine<FixedTwist> {
        NegotiationEngine::with_twist_source(GameConfig::default(), FixedTwist(twist))
    }

    fn ready(twist: bool) -> NegotiationEngine<FixedTwist> {
        let mut engine = engine(twist);
        for round in 0..STAGE_COUNT {
            engine
                .record_elimination(&format!("a{round}"), &format!("b{round}"))
                .unwrap();
        }
        engine.set_weaknesses(Color::Red, Color::Blue);
        engine
    }

    #[test]
    fn elimination_rejects_sixth_round() {
        let mut engine = ready(false);
        assert_eq!(
            engine.record_elimination("x", "y"),
            Err(GameError::EliminationComplete)
        );
        assert_eq!(engine.state().stage_index, STAGE_COUNT);
    }

    #[test]
    fn identical_terms_in_one_round_are_duplicates() {
        let mut engine = engine(false);
        let err = engine.record_elimination("salt", "salt").unwrap_err();
        assert_eq!(
            err,
            GameError::DuplicateTerm {
                term: "salt".to_string()
            }
        );
        assert!(engine.state().seen_terms.is_empty());
        assert_eq!(engine.state().stage_index, 0);
    }

    #[test]
    fn terms_are_case_sensitive() {
        let mut engine = engine(false);
        engine.record_elimination("Rice", "tea").unwrap();
        assert_eq!(engine.record_elimination("rice", "Tea"), Ok(2));
    }

    #[test]
    fn empty_term_is_validation_error() {
        let mut engine = engine(false);
        assert!(matches!(
            engine.record_elimination("", "b"),
            Err(GameError::Validation(_))
        ));
        assert!(matches!(
            engine.record_elimination("a", ""),
            Err(GameError::Validation(_))
        ));
    }

    #[test]
    fn long_text_forces_yellow() {
        let mut engine = ready(false);
        let outcome = engine
            .play_turn(Color::Red, Color::Blue, "thirteen chars", "exactly12chr")
            .unwrap();
        assert_eq!(outcome.card_a, Color::Yellow);
        assert!(outcome.coerced_a);
        assert_eq!(outcome.card_b, Color::Blue);
        assert!(!outcome.coerced_b);
    }

    #[test]
    fn long_text_counts_characters_not_bytes() {
        let mut engine = ready(false);
        let outcome = engine
            .play_turn(Color::Red, Color::Red, "世界在庫切れ誇り信頼暇あり", "ok")
            .unwrap();
        assert_eq!(outcome.card_a, Color::Yellow);
        let outcome = engine
            .play_turn(Color::Red, Color::Red, "世界在庫切れ誇り信頼暇あ", "ok")
            .unwrap();
        assert_eq!(outcome.card_a, Color::Red);
    }

    #[test]
    fn weakness_resonance_is_blank_slip() {
        let mut engine = ready(false);
        let outcome = engine.play_turn(Color::Red, Color::Red, "x", "y").unwrap();
        assert!(outcome.resonance.is_blank_slip());
        assert_eq!(outcome.resonance.scored_color(), None);
        assert_eq!(engine.state().scores, ScoreTally::zero());
        assert_eq!(engine.state().turn, 2);
    }

    #[test]
    fn dissonance_scores_nothing() {
        let mut engine = ready(false);
        let outcome = engine.play_turn(Color::Yellow, Color::Red, "x", "y").unwrap();
        assert_eq!(outcome.resonance, Resonance::Dissonant);
        assert_eq!(engine.state().scores.total(), 0);
    }

    #[test]
    fn twist_drawn_once_on_turn_three() {
        let mut engine = ready(true);
        for turn in 1..=2 {
            let outcome = engine.play_turn(Color::Yellow, Color::Yellow, "x", "y").unwrap();
            assert_eq!(outcome.turn, turn);
            assert_eq!(outcome.twist_note, None);
            assert!(!engine.state().twist_resolved);
        }
        let third = engine.play_turn(Color::Yellow, Color::Red, "x", "y").unwrap();
        assert_eq!(third.twist_note, Some(true));
        assert!(engine.state().twist_resolved);
        let fourth = engine.play_turn(Color::Yellow, Color::Yellow, "x", "y").unwrap();
        assert_eq!(fourth.twist_note, None);
    }

    #[test]
    fn twist_shifts_turn_four_to_successor() {
        let mut engine = ready(true);
        engine.play_turn(Color::Yellow, Color::Yellow, "x", "y").unwrap();
        engine.play_turn(Color::Yellow, Color::Yellow, "x", "y").unwrap();
        engine.play_turn(Color::Yellow, Color::Yellow, "x", "y").unwrap();
        assert_eq!(engine.state().scores.get(Color::Yellow), 3);

        // Yellow's successor is Red, which is A's weakness.
        let fourth = engine.play_turn(Color::Yellow, Color::Yellow, "x", "y").unwrap();
        assert_eq!(
            fourth.resonance,
            Resonance::Resonant {
                matched: Color::Yellow,
                target: Color::Red,
                gain: 0,
                twisted: true,
            }
        );
        assert_eq!(engine.state().scores.get(Color::Yellow), 3);

        let fifth = engine.play_turn(Color::Yellow, Color::Yellow, "x", "y").unwrap();
        assert_eq!(fifth.resonance.scored_color(), Some(Color::Yellow));
        assert!(fifth.game_over);
    }

    #[test]
    fn twisted_successor_scores_when_not_weak() {
        let mut engine = ready(true);
        engine.set_weaknesses(Color::Blue, Color::Blue);
        for _ in 0..3 {
            engine.play_turn(Color::Yellow, Color::Yellow, "x", "y").unwrap();
        }
        let fourth = engine.play_turn(Color::Yellow, Color::Yellow, "x", "y").unwrap();
        assert_eq!(fourth.resonance.scored_color(), Some(Color::Red));
        assert_eq!(engine.state().scores.get(Color::Red), 1);
    }

    #[test]
    fn diplomatic_rejection_is_atomic() {
        let mut engine = ready(false);
        for _ in 0..3 {
            engine.play_turn(Color::Yellow, Color::Yellow, "x", "y").unwrap();
        }
        let before = engine.state().clone();
        let err = engine
            .play_turn(Color::Red, Color::Yellow, "x", "y")
            .unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidMove {
                faction: Faction::A,
                card: Color::Red
            }
        );
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn game_over_after_fifth_turn() {
        let mut engine = ready(false);
        for _ in 0..5 {
            engine.play_turn(Color::Yellow, Color::Yellow, "x", "y").unwrap();
        }
        assert!(engine.is_over());
        assert_eq!(engine.phase(), GamePhase::Completed);
        assert_eq!(
            engine.play_turn(Color::Yellow, Color::Yellow, "x", "y"),
            Err(GameError::GameOver)
        );
        assert_eq!(engine.history().len(), 5);
    }

    #[test]
    fn painful_item_is_clamped() {
        let mut engine = ready(false);
        assert_eq!(engine.mark_painful_item(Faction::A, 0).unwrap(), "a0");
        assert_eq!(engine.mark_painful_item(Faction::B, 99).unwrap(), "b4");
        assert_eq!(engine.state().painful_item(Faction::B), Some("b4"));
    }

    #[test]
    fn painful_item_waits_for_elimination() {
        let mut engine = engine(false);
        assert_eq!(
            engine.mark_painful_item(Faction::A, 1),
            Err(GameError::EliminationPending)
        );
        engine.record_elimination("a0", "b0").unwrap();
        let before = engine.state().clone();
        assert_eq!(
            engine.mark_painful_item(Faction::A, 1),
            Err(GameError::EliminationPending)
        );
        assert_eq!(engine.state(), &before);
        for round in 1..STAGE_COUNT {
            engine
                .record_elimination(&format!("a{round}"), &format!("b{round}"))
                .unwrap();
        }
        assert_eq!(engine.mark_painful_item(Faction::A, 3).unwrap(), "a2");
        assert_eq!(engine.state().painful_item(Faction::A), Some("a2"));
    }

    #[test]
    fn veto_before_weaknesses_is_rejected_and_not_spent() {
        let mut engine = engine(false);
        assert_eq!(
            engine.veto_weakness(Faction::B, Color::Yellow),
            Err(GameError::VetoClosed)
        );
        for round in 0..STAGE_COUNT {
            engine
                .record_elimination(&format!("a{round}"), &format!("b{round}"))
                .unwrap();
        }
        assert_eq!(
            engine.veto_weakness(Faction::B, Color::Yellow),
            Err(GameError::VetoClosed)
        );
        assert!(!engine.state().veto_used_b);
        assert_eq!(engine.state().weakness_a, Color::Red);

        engine.set_weaknesses(Color::Red, Color::Blue);
        engine.veto_weakness(Faction::B, Color::Yellow).unwrap();
        assert_eq!(engine.state().weakness_a, Color::Yellow);
        assert!(engine.state().veto_used_b);
        assert!(!engine.state().veto_used_a);
    }

    #[test]
    fn veto_replaces_opponent_weakness_once() {
        let mut engine = ready(false);
        engine.veto_weakness(Faction::B, Color::Yellow).unwrap();
        assert_eq!(engine.state().weakness_a, Color::Yellow);
        assert_eq!(engine.state().weakness_b, Color::Blue);
        assert_eq!(
            engine.veto_weakness(Faction::B, Color::Red),
            Err(GameError::VetoSpent(Faction::B))
        );
        engine.play_turn(Color::Red, Color::Red, "x", "y").unwrap();
        assert_eq!(
            engine.veto_weakness(Faction::A, Color::Red),
            Err(GameError::VetoClosed)
        );
    }

    #[test]
    fn outcome_uses_top_two_only() {
        let draw = outcome_for(&ScoreTally::from_counts([2, 2, 1]));
        assert_eq!(draw.ending, Ending::BlankAgreement);
        assert_eq!(draw.leader(), None);
        let war = outcome_for(&ScoreTally::from_counts([3, 1, 1]));
        assert_eq!(war.ending, Ending::War);
        assert_eq!(war.leader(), Some(Color::Red));
        let alliance = outcome_for(&ScoreTally::from_counts([0, 1, 0]));
        assert_eq!(alliance.ending, Ending::Alliance);
        let collapse = outcome_for(&ScoreTally::from_counts([1, 1, 2]));
        assert_eq!(collapse.ending, Ending::Collapse);
        assert_eq!(
            outcome_for(&ScoreTally::zero()).ending,
            Ending::BlankAgreement
        );
    }
}
