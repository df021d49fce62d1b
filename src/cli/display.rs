//! Text rendering of engine state and outcomes.

use itertools::Itertools;

use crate::game::action::{FinalOutcome, Resonance, TurnOutcome};
use crate::game::scores::ScoreTally;
use crate::game::state::{GameState, TURN_COUNT};
use crate::types::{Color, Faction, TurnKind};

pub fn turn_header(state: &GameState) -> String {
    if state.is_over() {
        return "Game over".to_string();
    }
    let kind = match state.turn_kind() {
        TurnKind::Domestic => "domestic",
        TurnKind::Diplomatic => "diplomatic",
    };
    format!("Turn {}/{} ({kind})", state.turn, TURN_COUNT)
}

pub fn score_line(scores: &ScoreTally) -> String {
    format!("Stock: {scores}")
}

pub fn history_line(past: &[Color]) -> String {
    if past.is_empty() {
        "(none)".to_string()
    } else {
        past.iter().map(|color| color.label()).join(" ")
    }
}

fn resonance_line(resonance: &Resonance) -> String {
    match *resonance {
        Resonance::Dissonant => "No resonance: nothing changes".to_string(),
        Resonance::Resonant {
            matched,
            target,
            gain,
            twisted,
        } => {
            let gained = if gain > 0 {
                format!("{} +{gain}", target.label())
            } else {
                format!("{} is a blank slip, +0", target.label())
            };
            if twisted {
                format!("Twist! {} resonance -> {gained}", matched.label())
            } else {
                format!("Resonance: {gained}")
            }
        }
    }
}

pub fn describe_turn(outcome: &TurnOutcome, name_a: &str, name_b: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "{name_a}: {} \"{}\" / {name_b}: {} \"{}\"",
        outcome.card_a.label(),
        outcome.text_a,
        outcome.card_b.label(),
        outcome.text_b
    )];
    for (coerced, name) in [(outcome.coerced_a, name_a), (outcome.coerced_b, name_b)] {
        if coerced {
            lines.push(format!(
                "{name} spoke at length: card treated as {}",
                Color::Yellow.label()
            ));
        }
    }
    match outcome.twist_note {
        Some(true) => lines.push("Incident: twist is ON (turn 4 only)".to_string()),
        Some(false) => lines.push("No incident".to_string()),
        None => {}
    }
    lines.push(resonance_line(&outcome.resonance));
    lines
}

pub fn elimination_log(state: &GameState, name_a: &str, name_b: &str) -> Vec<String> {
    vec![
        format!("{name_a}: {}", state.items(Faction::A).join(", ")),
        format!("{name_b}: {}", state.items(Faction::B).join(", ")),
    ]
}

/// Announcement made when the elimination phase closes.
pub fn vanish_declaration(state: &GameState, name_a: &str, name_b: &str) -> Vec<String> {
    [(Faction::A, name_a), (Faction::B, name_b)]
        .into_iter()
        .map(|(faction, name)| {
            format!(
                "From the empire of {name}, {} ... have vanished!",
                state.items(faction).join(", ")
            )
        })
        .collect()
}

pub fn weakness_hint_lines() -> Vec<String> {
    Color::ALL
        .iter()
        .map(|color| {
            format!(
                "{} {} <- {}",
                color.code(),
                color.label(),
                color.weakness_hints().join(", ")
            )
        })
        .collect()
}

pub fn ending_line(outcome: &FinalOutcome) -> String {
    let ranked = outcome
        .ranked
        .iter()
        .map(|(color, score)| format!("{}={score}", color.label()))
        .join(" > ");
    format!("{} ({ranked})", outcome.ending.title())
}
