//! twenty48-core: a 2048 board-state engine
//!
//! This crate provides:
//! - [`engine::BoardEngine`]: an N x N grid (4 x 4 by default) with the full
//!   rule set: sliding/merging, random tile placement, score accrual, and
//!   game-over detection.
//! - [`engine::MoveOutcome`]: an inert description of one move (merged cells,
//!   new-tile cell, score delta, terminal flag) from which a presentation
//!   layer derives its rendering, audio, and persistence effects.
//!
//! Randomness is always injected, so seeded games replay exactly:
//! ```
//! use twenty48_core::engine::{BoardEngine, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut engine = BoardEngine::<4>::new();
//! engine.reset(&mut rng);
//!
//! let outcome = engine.apply_move(Move::Left, &mut rng);
//! if outcome.changed {
//!     // Re-render from engine.grid(), cue outcome.merged / outcome.new_tile.
//!     assert!(outcome.new_tile.is_some() || engine.count_empty() == 0);
//! }
//! assert_eq!(engine.score(), outcome.score_delta);
//! ```
//!
//! The engine holds no process-wide state; independent games (parallel tests,
//! multi-board UIs) are independent `BoardEngine` values.

pub mod engine;

pub use engine::{BoardEngine, GridError, Move, MoveOutcome, Position};
