use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Card colors. Declaration order is the tie order used when ranking scores.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Color {
    Red,
    Blue,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Blue, Color::Yellow];

    pub const fn code(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
        }
    }

    pub fn from_code(code: char) -> Option<Color> {
        match code.to_ascii_uppercase() {
            'R' => Some(Color::Red),
            'B' => Some(Color::Blue),
            'Y' => Some(Color::Yellow),
            _ => None,
        }
    }

    /// Accepts either the one-letter code or the full name.
    pub fn parse_token(token: &str) -> Option<Color> {
        let token = token.trim();
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Color::from_code(c);
        }
        Color::from_str(token).ok()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Color::Red => "🟥 Pride",
            Color::Blue => "🟦 Trust",
            Color::Yellow => "🟨 Leisure",
        }
    }

    /// Cyclic rotation R -> B -> Y -> R.
    pub const fn successor(self) -> Color {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Yellow,
            Color::Yellow => Color::Red,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
            Color::Yellow => 2,
        }
    }

    /// Guidance words for picking a weakness color from a lost item.
    pub const fn weakness_hints(self) -> &'static [&'static str] {
        match self {
            Color::Red => &[
                "face",
                "rank",
                "authority",
                "intimidation",
                "valor",
                "status",
                "hierarchy",
            ],
            Color::Blue => &[
                "information",
                "exchange",
                "tourism",
                "communication",
                "culture",
                "media",
                "internet",
            ],
            Color::Yellow => &[
                "day and night",
                "time",
                "slack",
                "daily life",
                "stamina",
                "recovery",
                "sleep",
            ],
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
pub enum Faction {
    A,
    B,
}

impl Faction {
    pub const BOTH: [Faction; 2] = [Faction::A, Faction::B];

    pub const fn opponent(self) -> Faction {
        match self {
            Faction::A => Faction::B,
            Faction::B => Faction::A,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Ending {
    BlankAgreement,
    War,
    Alliance,
    Collapse,
}

impl Ending {
    pub const fn title(self) -> &'static str {
        match self {
            Ending::BlankAgreement => "Blank Agreement Ending",
            Ending::War => "War Ending",
            Ending::Alliance => "Alliance Ending",
            Ending::Collapse => "Internal Collapse Ending",
        }
    }

    /// Ending reached when `color` alone holds the highest score.
    pub const fn led_by(color: Color) -> Ending {
        match color {
            Color::Red => Ending::War,
            Color::Blue => Ending::Alliance,
            Color::Yellow => Ending::Collapse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Elimination,
    Inheritance,
    Negotiation,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnKind {
    Domestic,
    Diplomatic,
}

pub const STAGE_LABELS: [&str; 5] = [
    "Needed by humanity",
    "Needed by Japan",
    "Needed by Kyoto",
    "Needed at home",
    "Needed in a bag",
];
