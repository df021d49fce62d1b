#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod cli;
pub mod game;
pub mod players;
pub mod types;

pub use game::{
    FinalOutcome, Game, GameConfig, GameError, GameState, NegotiationEngine, TurnOutcome,
};
pub use types::{Color, Ending, Faction};
