use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use twenty48_core::engine::{BoardEngine, Move};

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Batch 2048 self-play statistics")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    games: u64,

    /// Base RNG seed; game i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stop each game after this many moves
    #[arg(long)]
    steps: Option<u64>,

    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy)]
struct GameResult {
    score: u64,
    highest_tile: u32,
    moves: u64,
    won: bool,
}

/// Play one seeded game with a fixed direction preference until no direction
/// changes the board (or the step cap is hit).
fn play_game(seed: u64, steps: Option<u64>) -> GameResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = BoardEngine::<4>::new();
    engine.reset(&mut rng);

    let mut moves = 0u64;
    'game: loop {
        if let Some(limit) = steps {
            if moves >= limit {
                break;
            }
        }
        for dir in [Move::Left, Move::Down, Move::Right, Move::Up] {
            let outcome = engine.apply_move(dir, &mut rng);
            if outcome.changed {
                moves += 1;
                if outcome.game_over {
                    break 'game;
                }
                continue 'game;
            }
        }
        break;
    }

    GameResult {
        score: engine.score(),
        highest_tile: engine.highest_tile(),
        moves,
        won: engine.has_won(),
    }
}

fn main() {
    let args = Args::parse();

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(args.games);
        pb.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} games | {elapsed_precise}")
                .expect("static template"),
        );
        pb
    };

    let results: Vec<GameResult> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let result = play_game(args.seed.wrapping_add(i), args.steps);
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_and_clear();

    if results.is_empty() {
        println!("No games played.");
        return;
    }

    let total_score: u64 = results.iter().map(|r| r.score).sum();
    let total_moves: u64 = results.iter().map(|r| r.moves).sum();
    let max_score = results.iter().map(|r| r.score).max().unwrap_or(0);
    let max_tile = results.iter().map(|r| r.highest_tile).max().unwrap_or(0);
    let wins = results.iter().filter(|r| r.won).count();

    println!(
        "Games: {} | Mean score: {:.1} | Max score: {} | Max tile: {} | Wins: {} | Mean moves: {:.1}",
        results.len(),
        total_score as f64 / results.len() as f64,
        max_score,
        max_tile,
        wins,
        total_moves as f64 / results.len() as f64,
    );
}
