use std::path::PathBuf;

use clap::Parser;
use stockout_rs::cli::TuiApp;
use stockout_rs::cli::display::ending_line;
use stockout_rs::cli::logging::init_file_tracing;
use stockout_rs::game::{GameConfig, NegotiationEngine};

#[derive(Debug, Parser, Clone)]
#[command(name = "stockout-play")]
#[command(about = "Play World, Out of Stock: two nations negotiating at one terminal")]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for the twist draw
    #[arg(long)]
    seed: Option<u64>,

    /// Name of nation A
    #[arg(long)]
    nation_a: Option<String>,

    /// Name of nation B
    #[arg(long)]
    nation_b: Option<String>,

    /// Phrases longer than this many characters turn the card Yellow
    #[arg(long)]
    long_text_limit: Option<usize>,

    /// Append logs to this file (nothing is logged otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn build_config(args: &Args) -> Result<GameConfig, String> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path).map_err(|err| err.to_string())?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(name) = &args.nation_a {
        config.nation_a = name.trim().to_string();
    }
    if let Some(name) = &args.nation_b {
        config.nation_b = name.trim().to_string();
    }
    if let Some(limit) = args.long_text_limit {
        config.long_text_limit = limit;
    }
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

fn main() {
    let args = Args::parse();

    if let Err(err) = init_file_tracing(args.log_file.as_deref()) {
        eprintln!("Error: cannot open log file: {err}");
        std::process::exit(1);
    }

    let config = build_config(&args).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });
    tracing::info!(seed = config.seed, "starting game");

    let mut app = TuiApp::new(NegotiationEngine::new(config));
    if let Err(err) = app.run() {
        eprintln!("Error: terminal failure: {err}");
        std::process::exit(1);
    }

    let engine = app.engine();
    println!("{}", "=".repeat(60));
    for line in app.log() {
        println!("{line}");
    }
    println!("{}", "=".repeat(60));
    if engine.is_over() {
        println!("Result: {}", ending_line(&engine.compute_outcome()));
    } else {
        println!("Game abandoned at {:?}", engine.phase());
    }
}
