use crate::game::action::Move;
use crate::game::state::GameState;
use crate::types::{Color, Faction};

/// Decision seam for driving a whole game without a UI.
pub trait Participant {
    fn propose_term(&mut self, state: &GameState, faction: Faction) -> String;
    fn choose_weakness(&mut self, state: &GameState, faction: Faction) -> Color;
    fn choose_move(&mut self, state: &GameState, faction: Faction) -> Move;
}
