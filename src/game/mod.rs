pub mod action;
pub mod config;
pub mod engine;
pub mod game;
pub mod scores;
pub mod state;
pub mod twist;

pub use action::{FinalOutcome, Move, Resonance, TurnOutcome};
pub use config::{ConfigError, GameConfig};
pub use engine::{NegotiationEngine, outcome_for};
pub use game::Game;
pub use scores::ScoreTally;
pub use state::{GameError, GameState, STAGE_COUNT, TURN_COUNT};
pub use twist::{FixedTwist, SeededTwist, TwistSource};
