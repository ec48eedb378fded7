use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A direction to slide/merge tiles.
///
/// Discriminants are stable and match the `u8` encoding used by callers that
/// record move sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Move {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Move {
    /// All four directions, in discriminant order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Decode a `u8` discriminant back into a `Move`. `None` for values > 3.
    #[inline]
    pub fn from_u8(value: u8) -> Option<Move> {
        match value {
            0 => Some(Move::Up),
            1 => Some(Move::Down),
            2 => Some(Move::Left),
            3 => Some(Move::Right),
            _ => None,
        }
    }

    /// True if tiles compact toward index 0 (Up/Left) rather than index N-1.
    #[inline]
    fn toward_start(self) -> bool {
        matches!(self, Move::Up | Move::Left)
    }
}

/// A cell coordinate: `row` is the outer index, `col` the inner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// Everything a caller needs to know about one `apply_move` call.
///
/// `merged` holds the final coordinates of tiles created by merges this move,
/// and `new_tile` the cell that received the random tile (if one was placed),
/// so a presentation layer can drive its merge/new-tile cues from data alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Whether any cell's value differs from before the move.
    pub changed: bool,
    /// Sum of the values of tiles created by merges this move.
    pub score_delta: u64,
    /// Final positions of tiles created by merges this move.
    pub merged: Vec<Position>,
    /// Where the random tile landed, if the move changed the board and the
    /// grid had room.
    pub new_tile: Option<Position>,
    /// Whether the resulting position has no empty cell and no adjacent
    /// equal pair.
    pub game_over: bool,
}

/// Error for checked construction from caller-supplied cells.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("tile value {value} at ({row}, {col}) is not a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: u32 },
}

/// Tile value that counts as a win when reached.
pub const WINNING_TILE: u32 = 2048;

/// An N x N 2048 board plus its running score.
///
/// All randomness is injected per call, so gameplay is reproducible with a
/// seeded RNG and instances are fully independent (no process-wide state).
///
/// ```
/// use twenty48_core::engine::{BoardEngine, Move};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut engine = BoardEngine::<4>::new();
/// engine.reset(&mut rng);
/// assert_eq!(engine.count_empty(), 14);
///
/// let outcome = engine.apply_move(Move::Left, &mut rng);
/// assert_eq!(engine.score(), outcome.score_delta);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEngine<const N: usize = 4> {
    cells: [[u32; N]; N],
    score: u64,
}

impl<const N: usize> BoardEngine<N> {
    /// Construct an engine in the uninitialized state: empty grid, score 0.
    /// Call [`reset`](Self::reset) to enter the playable state.
    pub fn new() -> Self {
        BoardEngine { cells: [[0; N]; N], score: 0 }
    }

    /// Construct an engine from caller-supplied cells and score, validating
    /// that every non-zero cell holds a power of two >= 2.
    ///
    /// ```
    /// use twenty48_core::engine::{BoardEngine, GridError};
    ///
    /// let ok = BoardEngine::from_parts([[2, 4], [0, 8]], 12);
    /// assert!(ok.is_ok());
    /// let bad = BoardEngine::from_parts([[2, 3], [0, 8]], 0);
    /// assert_eq!(bad, Err(GridError::InvalidTile { row: 0, col: 1, value: 3 }));
    /// ```
    pub fn from_parts(cells: [[u32; N]; N], score: u64) -> Result<Self, GridError> {
        for (row, line) in cells.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value != 0 && !(value >= 2 && value.is_power_of_two()) {
                    return Err(GridError::InvalidTile { row, col, value });
                }
            }
        }
        Ok(BoardEngine { cells, score })
    }

    /// Clear the grid and score, then place two random tiles.
    /// This is the only way to (re)enter the playable state.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cells = [[0; N]; N];
        self.score = 0;
        self.place_random_tile(rng);
        self.place_random_tile(rng);
    }

    /// Convenience: like `reset` but uses the thread-local RNG.
    pub fn reset_thread(&mut self) {
        let mut rng = rand::thread_rng();
        self.reset(&mut rng);
    }

    /// Place a 2 (90%) or 4 (10%) in a uniformly chosen empty cell.
    ///
    /// Returns the chosen position, or `None` when the grid is full. A full
    /// grid is an expected end-of-game condition, not an error.
    pub fn place_random_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Position> {
        let mut available = Vec::with_capacity(N * N);
        for row in 0..N {
            for col in 0..N {
                if self.cells[row][col] == 0 {
                    available.push(Position { row, col });
                }
            }
        }
        if available.is_empty() {
            return None;
        }
        let pos = available[rng.gen_range(0..available.len())];
        self.cells[pos.row][pos.col] = if rng.gen_range(0..10) < 9 { 2 } else { 4 };
        Some(pos)
    }

    /// Slide and merge every line toward `dir`, then place a random tile and
    /// report the result.
    ///
    /// When no cell changes, the call places no tile, adds no score, and
    /// returns `changed == false`; the grid and score are exactly as before.
    pub fn apply_move<R: Rng + ?Sized>(&mut self, dir: Move, rng: &mut R) -> MoveOutcome {
        let (changed, score_delta, merged) = self.shift_in_place(dir);
        if !changed {
            return MoveOutcome {
                changed: false,
                score_delta: 0,
                merged: Vec::new(),
                new_tile: None,
                game_over: self.is_game_over(),
            };
        }
        self.score += score_delta;
        let new_tile = self.place_random_tile(rng);
        MoveOutcome {
            changed,
            score_delta,
            merged,
            new_tile,
            game_over: self.is_game_over(),
        }
    }

    /// Convenience: like `apply_move` but uses the thread-local RNG.
    pub fn apply_move_thread(&mut self, dir: Move) -> MoveOutcome {
        let mut rng = rand::thread_rng();
        self.apply_move(dir, &mut rng)
    }

    /// True iff no cell is empty and no 4-adjacent pair of cells is equal.
    ///
    /// A grid with any empty cell is never game over, even if no merge is
    /// currently possible.
    pub fn is_game_over(&self) -> bool {
        for row in 0..N {
            for col in 0..N {
                let value = self.cells[row][col];
                if value == 0 {
                    return false;
                }
                if row + 1 < N && self.cells[row + 1][col] == value {
                    return false;
                }
                if col + 1 < N && self.cells[row][col + 1] == value {
                    return false;
                }
            }
        }
        true
    }

    /// A copy of the grid. Callers can never alias engine-internal state.
    #[inline]
    pub fn grid(&self) -> [[u32; N]; N] {
        self.cells
    }

    /// The cumulative score for this session.
    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Count the empty cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// The highest tile value on the board (0 for an empty grid).
    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// True once a tile of [`WINNING_TILE`] or higher exists.
    pub fn has_won(&self) -> bool {
        self.highest_tile() >= WINNING_TILE
    }

    /// Compact/merge every line toward `dir`, mutating the grid in place.
    /// Returns (any cell changed, score delta, merged cells in final coords).
    fn shift_in_place(&mut self, dir: Move) -> (bool, u64, Vec<Position>) {
        let mut changed = false;
        let mut score_delta = 0u64;
        let mut merged = Vec::new();
        match dir {
            Move::Left | Move::Right => {
                for row in 0..N {
                    let (line, delta, merged_at) =
                        transform_line(&self.cells[row], dir.toward_start());
                    for col in 0..N {
                        if self.cells[row][col] != line[col] {
                            changed = true;
                            self.cells[row][col] = line[col];
                        }
                    }
                    score_delta += delta;
                    merged.extend(merged_at.into_iter().map(|col| Position { row, col }));
                }
            }
            Move::Up | Move::Down => {
                for col in 0..N {
                    let column: Vec<u32> = (0..N).map(|row| self.cells[row][col]).collect();
                    let (line, delta, merged_at) = transform_line(&column, dir.toward_start());
                    for row in 0..N {
                        if self.cells[row][col] != line[row] {
                            changed = true;
                            self.cells[row][col] = line[row];
                        }
                    }
                    score_delta += delta;
                    merged.extend(merged_at.into_iter().map(|row| Position { row, col }));
                }
            }
        }
        (changed, score_delta, merged)
    }
}

impl<const N: usize> Default for BoardEngine<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Display for BoardEngine<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(N * 8 - 1);
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f, "{}", rule)?;
            }
            let line: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == 0 {
                        " ".repeat(7)
                    } else {
                        format!("{:^7}", v)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

/// Compact and merge one line.
///
/// Non-zero values are extracted in order, then a single left-to-right pass
/// merges each equal adjacent pair into one doubled tile, skipping the
/// consumed neighbor so a tile merges at most once per move. The result is
/// padded with zeros on the trailing side (`toward_start`) or the leading
/// side (`!toward_start`).
///
/// Returns the rebuilt line, the sum of merged-tile values, and the indices
/// (in the rebuilt line) of the merged tiles.
pub(crate) fn transform_line(line: &[u32], toward_start: bool) -> (Vec<u32>, u64, Vec<usize>) {
    let n = line.len();
    let tiles: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();

    let mut compacted = Vec::with_capacity(n);
    let mut merged_at = Vec::new();
    let mut score_delta = 0u64;
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            let doubled = tiles[i] * 2;
            merged_at.push(compacted.len());
            compacted.push(doubled);
            score_delta += u64::from(doubled);
            i += 2;
        } else {
            compacted.push(tiles[i]);
            i += 1;
        }
    }

    let offset = if toward_start { 0 } else { n - compacted.len() };
    let mut rebuilt = vec![0u32; n];
    rebuilt[offset..offset + compacted.len()].copy_from_slice(&compacted);
    for idx in &mut merged_at {
        *idx += offset;
    }
    (rebuilt, score_delta, merged_at)
}
