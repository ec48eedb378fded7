use twenty48_core::engine::{BoardEngine, Move};

/// Autoplay demo: fixed direction preference, first move that changes the
/// board wins. Prints the board after every move.
fn main() {
    let mut rng = rand::thread_rng();
    let mut engine = BoardEngine::<4>::new();
    engine.reset(&mut rng);
    println!("{}", engine);

    let mut move_count = 0u64;
    'game: loop {
        for dir in [Move::Left, Move::Down, Move::Right, Move::Up] {
            let outcome = engine.apply_move(dir, &mut rng);
            if outcome.changed {
                move_count += 1;
                println!("{}", engine);
                if outcome.game_over {
                    break 'game;
                }
                continue 'game;
            }
        }
        break;
    }

    println!(
        "Moves made: {}, Score: {}, Highest tile: {}",
        move_count,
        engine.score(),
        engine.highest_tile()
    );
}
