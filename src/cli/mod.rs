pub mod display;
pub mod logging;
pub mod stats;
pub mod tui;

pub use stats::{GameStats, StatisticsAccumulator};
pub use tui::TuiApp;
