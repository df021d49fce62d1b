//! Full games played through the engine's public operations.

use stockout_rs::game::{
    FixedTwist, GameConfig, GameError, NegotiationEngine, Resonance, SeededTwist, TwistSource,
};
use stockout_rs::types::{Color, Ending, GamePhase};

const TERMS: [(&str, &str); 5] = [
    ("water", "fire"),
    ("trains", "ships"),
    ("temples", "shrines"),
    ("keys", "doors"),
    ("umbrellas", "maps"),
];

fn play_scenario<T: TwistSource>(twist: T) -> NegotiationEngine<T> {
    let mut engine = NegotiationEngine::with_twist_source(GameConfig::default(), twist);
    for (round, (a, b)) in TERMS.iter().enumerate() {
        assert_eq!(engine.phase(), GamePhase::Elimination);
        assert_eq!(engine.record_elimination(a, b), Ok(round + 1));
    }
    assert_eq!(engine.phase(), GamePhase::Inheritance);
    engine.set_weaknesses(Color::Red, Color::Blue);
    assert_eq!(engine.phase(), GamePhase::Negotiation);

    let first = engine.play_turn(Color::Yellow, Color::Yellow, "rest", "nap").unwrap();
    assert_eq!(first.resonance.scored_color(), Some(Color::Yellow));
    let second = engine.play_turn(Color::Yellow, Color::Yellow, "slow", "calm").unwrap();
    assert_eq!(second.resonance.scored_color(), Some(Color::Yellow));
    let third = engine.play_turn(Color::Red, Color::Red, "honor", "rank").unwrap();
    assert!(third.resonance.is_blank_slip());
    assert!(third.twist_note.is_some());
    assert!(engine.state().twist_resolved);

    // Diplomatic turns borrow from the opponent's Y, Y, R history.
    engine.play_turn(Color::Yellow, Color::Yellow, "borrow", "lend").unwrap();
    let last = engine.play_turn(Color::Red, Color::Yellow, "pride", "time").unwrap();
    assert_eq!(last.resonance, Resonance::Dissonant);
    assert!(last.game_over);
    assert_eq!(engine.phase(), GamePhase::Completed);
    engine
}

#[test]
fn scenario_without_twist() {
    let engine = play_scenario(FixedTwist(false));
    let scores = engine.state().scores;
    assert_eq!(scores.get(Color::Yellow), 3);
    assert_eq!(scores.get(Color::Red), 0);
    assert_eq!(scores.get(Color::Blue), 0);
    let outcome = engine.compute_outcome();
    assert_eq!(outcome.ending, Ending::Collapse);
    assert_eq!(outcome.ranked[0], (Color::Yellow, 3));
}

#[test]
fn scenario_with_twist() {
    let engine = play_scenario(FixedTwist(true));
    let fourth = &engine.history()[3];
    assert_eq!(
        fourth.resonance,
        Resonance::Resonant {
            matched: Color::Yellow,
            target: Color::Red,
            gain: 0,
            twisted: true,
        }
    );
    let scores = engine.state().scores;
    assert_eq!(scores.get(Color::Yellow), 2);
    assert_eq!(scores.get(Color::Red), 0);
    assert_eq!(engine.compute_outcome().ending, Ending::Collapse);
}

#[test]
fn scenario_is_reproducible_from_seed() {
    let first = play_scenario(SeededTwist::fair(2024));
    let second = play_scenario(SeededTwist::fair(2024));
    assert_eq!(first.state(), second.state());
    let yellow = first.state().scores.get(Color::Yellow);
    if first.state().twist_active {
        assert_eq!(yellow, 2);
    } else {
        assert_eq!(yellow, 3);
    }
}

#[test]
fn finished_game_rejects_more_turns() {
    let mut engine = play_scenario(FixedTwist(false));
    let before = engine.state().clone();
    assert_eq!(
        engine.play_turn(Color::Yellow, Color::Yellow, "x", "y"),
        Err(GameError::GameOver)
    );
    assert_eq!(engine.state(), &before);
}

#[test]
fn outcome_is_available_mid_game() {
    let mut engine =
        NegotiationEngine::with_twist_source(GameConfig::default(), FixedTwist(false));
    assert_eq!(engine.compute_outcome().ending, Ending::BlankAgreement);
    for (a, b) in TERMS {
        engine.record_elimination(a, b).unwrap();
    }
    engine.set_weaknesses(Color::Yellow, Color::Yellow);
    engine.play_turn(Color::Blue, Color::Blue, "trust", "us").unwrap();
    assert_eq!(engine.compute_outcome().ending, Ending::Alliance);
    engine.play_turn(Color::Red, Color::Red, "war", "now").unwrap();
    engine.play_turn(Color::Red, Color::Red, "war", "now").unwrap();
    assert_eq!(engine.compute_outcome().ending, Ending::War);
}
