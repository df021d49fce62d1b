use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use stockout_rs::cli::StatisticsAccumulator;
use stockout_rs::cli::display::ending_line;
use stockout_rs::cli::logging::init_stderr_tracing;
use stockout_rs::game::{Game, GameConfig};
use stockout_rs::players::RandomParticipant;
use stockout_rs::types::{Color, Ending};
use strum::IntoEnumIterator;

#[derive(Debug, Parser, Clone)]
#[command(name = "stockout-sim")]
#[command(about = "Simulate games between scripted random participants and report ending statistics")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 100)]
    num: u32,

    /// Base random seed; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the statistics as JSON
    #[arg(long)]
    json: bool,

    /// Silence per-game output
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    init_stderr_tracing(args.quiet);

    let base = match &args.config {
        Some(path) => GameConfig::from_json_file(path).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }),
        None => GameConfig::default(),
    };
    let base_seed = args.seed.unwrap_or(base.seed);

    let mut accumulator = StatisticsAccumulator::new();
    for i in 0..args.num {
        let seed = base_seed.wrapping_add(u64::from(i));
        let config = GameConfig {
            seed,
            ..base.clone()
        };
        let limit = config.long_text_limit;
        let mut a = RandomParticipant::new(seed.wrapping_mul(2)).with_long_text_limit(limit);
        let mut b = RandomParticipant::new(seed.wrapping_mul(2).wrapping_add(1))
            .with_long_text_limit(limit);
        let mut game = Game::new(config);

        let start = Instant::now();
        match game.play(&mut a, &mut b) {
            Ok(outcome) => {
                accumulator.after(&game, start.elapsed());
                if !args.quiet && !args.json {
                    println!("game {:>4} (seed {seed}): {}", i + 1, ending_line(&outcome));
                }
            }
            Err(err) => {
                tracing::warn!(seed, game_id = %game.id, error = %err, "game aborted");
            }
        }
    }

    let stats = &accumulator.stats;
    if args.json {
        match serde_json::to_string_pretty(stats) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("\n{}", "=".repeat(60));
    println!("Games: {}", stats.games);
    println!("{:<28} {:>6} {:>8}", "ENDING", "COUNT", "RATE");
    println!("{}", "-".repeat(60));
    for ending in Ending::iter() {
        println!(
            "{:<28} {:>6} {:>7.1}%",
            ending.title(),
            stats.endings.get(&ending).copied().unwrap_or(0),
            stats.ending_rate(ending) * 100.0
        );
    }
    println!("{}", "-".repeat(60));
    for color in Color::ALL {
        println!("Average {:<14} {:.2}", color.label(), stats.avg_score(color));
    }
    println!("Twist active in {} games", stats.twists);
    println!("Blank slips: {}", stats.blank_slips);
    println!("Average duration: {:?}", stats.get_avg_duration());
}
