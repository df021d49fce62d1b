use serde::{Deserialize, Serialize};

use crate::types::{Color, Ending, TurnKind};

/// One faction's submission for a turn: a card and its accompanying phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub card: Color,
    pub text: String,
}

impl Move {
    pub fn new(card: Color, text: impl Into<String>) -> Self {
        Self {
            card,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resonance {
    Dissonant,
    Resonant {
        matched: Color,
        /// Color the score went to; the successor of `matched` when twisted.
        target: Color,
        /// 0 when `target` is a weakness color (blank slip), otherwise 1.
        gain: u32,
        twisted: bool,
    },
}

impl Resonance {
    pub fn is_resonant(&self) -> bool {
        matches!(self, Resonance::Resonant { .. })
    }

    pub fn scored_color(&self) -> Option<Color> {
        match *self {
            Resonance::Resonant { target, gain, .. } if gain > 0 => Some(target),
            _ => None,
        }
    }

    pub fn gain(&self) -> u32 {
        match *self {
            Resonance::Resonant { gain, .. } => gain,
            Resonance::Dissonant => 0,
        }
    }

    pub fn is_blank_slip(&self) -> bool {
        matches!(self, Resonance::Resonant { gain: 0, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub turn: u8,
    pub kind: TurnKind,
    pub card_a: Color,
    pub card_b: Color,
    pub coerced_a: bool,
    pub coerced_b: bool,
    pub text_a: String,
    pub text_b: String,
    /// `Some(active)` only on the turn that drew the twist.
    pub twist_note: Option<bool>,
    pub resonance: Resonance,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalOutcome {
    pub ending: Ending,
    pub ranked: Vec<(Color, u32)>,
}

impl FinalOutcome {
    pub fn leader(&self) -> Option<Color> {
        match self.ending {
            Ending::BlankAgreement => None,
            _ => self.ranked.first().map(|(color, _)| *color),
        }
    }
}
