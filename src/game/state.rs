use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::game::action::TurnOutcome;
use crate::game::scores::ScoreTally;
use crate::types::{Color, Faction, GamePhase, TurnKind};

pub const STAGE_COUNT: usize = 5;
pub const TURN_COUNT: u8 = 5;
pub const DOMESTIC_TURNS: u8 = 3;
pub const TWIST_DRAW_TURN: u8 = 3;
pub const TWIST_TURN: u8 = 4;

pub type History = SmallVec<[Color; DOMESTIC_TURNS as usize]>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("{0} must not be empty")]
    Validation(&'static str),
    #[error("\"{term}\" has already been named")]
    DuplicateTerm { term: String },
    #[error(
        "diplomatic turn: faction {faction} played {}, which is not in the opponent's domestic history",
        .card.label()
    )]
    InvalidMove { faction: Faction, card: Color },
    #[error("game already completed")]
    GameOver,
    #[error("elimination phase already complete")]
    EliminationComplete,
    #[error("elimination phase is not finished yet")]
    EliminationPending,
    #[error("faction {0} has already used its veto")]
    VetoSpent(Faction),
    #[error("vetoes are only open after weaknesses are chosen and before the first turn")]
    VetoClosed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub stage_index: usize,
    pub seen_terms: HashSet<String>,
    pub items_a: Vec<String>,
    pub items_b: Vec<String>,
    pub weakness_a: Color,
    pub weakness_b: Color,
    pub weaknesses_chosen: bool,
    pub painful_a: Option<String>,
    pub painful_b: Option<String>,
    pub veto_used_a: bool,
    pub veto_used_b: bool,
    pub turn: u8,
    pub scores: ScoreTally,
    pub past_a: History,
    pub past_b: History,
    pub twist_resolved: bool,
    pub twist_active: bool,
    pub history: Vec<TurnOutcome>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            stage_index: 0,
            seen_terms: HashSet::new(),
            items_a: Vec::new(),
            items_b: Vec::new(),
            weakness_a: Color::Red,
            weakness_b: Color::Blue,
            weaknesses_chosen: false,
            painful_a: None,
            painful_b: None,
            veto_used_a: false,
            veto_used_b: false,
            turn: 1,
            scores: ScoreTally::zero(),
            past_a: History::new(),
            past_b: History::new(),
            twist_resolved: false,
            twist_active: false,
            history: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.stage_index < STAGE_COUNT {
            GamePhase::Elimination
        } else if !self.weaknesses_chosen {
            GamePhase::Inheritance
        } else if !self.is_over() {
            GamePhase::Negotiation
        } else {
            GamePhase::Completed
        }
    }

    pub fn is_over(&self) -> bool {
        self.turn > TURN_COUNT
    }

    pub fn turn_kind(&self) -> TurnKind {
        if self.turn <= DOMESTIC_TURNS {
            TurnKind::Domestic
        } else {
            TurnKind::Diplomatic
        }
    }

    pub fn items(&self, faction: Faction) -> &[String] {
        match faction {
            Faction::A => self.items_a.as_slice(),
            Faction::B => self.items_b.as_slice(),
        }
    }

    pub fn past(&self, faction: Faction) -> &[Color] {
        match faction {
            Faction::A => self.past_a.as_slice(),
            Faction::B => self.past_b.as_slice(),
        }
    }

    pub fn weakness(&self, faction: Faction) -> Color {
        match faction {
            Faction::A => self.weakness_a,
            Faction::B => self.weakness_b,
        }
    }

    pub fn painful_item(&self, faction: Faction) -> Option<&str> {
        match faction {
            Faction::A => self.painful_a.as_deref(),
            Faction::B => self.painful_b.as_deref(),
        }
    }

    pub fn is_weakness(&self, color: Color) -> bool {
        color == self.weakness_a || color == self.weakness_b
    }

    /// Whether a turn-4 resonance is redirected to the successor color.
    pub fn twist_applies(&self) -> bool {
        self.turn == TWIST_TURN && self.twist_resolved && self.twist_active
    }

    pub(crate) fn veto_used_mut(&mut self, faction: Faction) -> &mut bool {
        match faction {
            Faction::A => &mut self.veto_used_a,
            Faction::B => &mut self.veto_used_b,
        }
    }

    pub(crate) fn weakness_mut(&mut self, faction: Faction) -> &mut Color {
        match faction {
            Faction::A => &mut self.weakness_a,
            Faction::B => &mut self.weakness_b,
        }
    }

    pub(crate) fn painful_mut(&mut self, faction: Faction) -> &mut Option<String> {
        match faction {
            Faction::A => &mut self.painful_a,
            Faction::B => &mut self.painful_b,
        }
    }
}
