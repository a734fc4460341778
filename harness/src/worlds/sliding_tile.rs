//! `SlidingTile`: the 3×3 sliding-tile puzzle (8-puzzle).
//!
//! The domain the engine was built for: a learned cost-to-go estimate
//! over puzzle states, corrected to admissibility. A state is the
//! row-major tile layout with 0 as the blank; the goal is the ordered
//! layout `[0, 1, …, 8]`. Every blank move costs 1.

use underbound_search::contract::SearchEnvironmentV1;

/// Board side length.
const SIDE: usize = 3;

/// Tiles on the board, blank included.
const TILES: usize = SIDE * SIDE;

/// Row-major tile layout; `0` is the blank.
pub type TileBoard = [u8; TILES];

/// The solved layout.
pub const GOAL_BOARD: TileBoard = [0, 1, 2, 3, 4, 5, 6, 7, 8];

/// 3×3 sliding-tile world with unit move costs.
pub struct SlidingTile;

impl SlidingTile {
    /// Sum of tile Manhattan distances to their goal cells (blank
    /// excluded). Admissible; the classic lower bound for this world.
    #[must_use]
    pub fn manhattan(board: &TileBoard) -> f64 {
        let mut total = 0usize;
        for (cell, &tile) in board.iter().enumerate() {
            if tile == 0 {
                continue;
            }
            let goal_cell = tile as usize;
            let dr = (cell / SIDE).abs_diff(goal_cell / SIDE);
            let dc = (cell % SIDE).abs_diff(goal_cell % SIDE);
            total += dr + dc;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            total as f64
        }
    }

    /// Deterministically scramble the goal board with `moves` random
    /// walk steps seeded by `seed`.
    ///
    /// The walk never undoes its previous move, so short walks stay
    /// close to (but rarely at) the requested depth.
    #[must_use]
    pub fn scramble(seed: u64, moves: u32) -> TileBoard {
        let mut board = GOAL_BOARD;
        let mut rng = seed.wrapping_mul(0x9e37_79b9_7f4a_7c15).wrapping_add(1);
        let mut previous_blank: Option<usize> = None;

        for _ in 0..moves {
            let blank = blank_cell(&board);
            let neighbors: Vec<usize> = blank_neighbors(blank)
                .into_iter()
                .filter(|&cell| Some(cell) != previous_blank)
                .collect();

            // xorshift step
            rng ^= rng << 13;
            rng ^= rng >> 7;
            rng ^= rng << 17;
            #[allow(clippy::cast_possible_truncation)]
            let pick = (rng as usize) % neighbors.len();

            previous_blank = Some(blank);
            board.swap(blank, neighbors[pick]);
        }
        board
    }
}

/// Cell index of the blank.
fn blank_cell(board: &TileBoard) -> usize {
    board
        .iter()
        .position(|&t| t == 0)
        .expect("every board has a blank")
}

/// Cells the blank can move into, in ascending order.
fn blank_neighbors(blank: usize) -> Vec<usize> {
    let row = blank / SIDE;
    let col = blank % SIDE;
    let mut cells = Vec::with_capacity(4);
    if row > 0 {
        cells.push(blank - SIDE);
    }
    if col > 0 {
        cells.push(blank - 1);
    }
    if col + 1 < SIDE {
        cells.push(blank + 1);
    }
    if row + 1 < SIDE {
        cells.push(blank + SIDE);
    }
    cells
}

impl SearchEnvironmentV1 for SlidingTile {
    type State = TileBoard;

    fn expand(&self, state: &TileBoard) -> Vec<(TileBoard, f64)> {
        let blank = blank_cell(state);
        blank_neighbors(blank)
            .into_iter()
            .map(|cell| {
                let mut child = *state;
                child.swap(blank, cell);
                (child, 1.0)
            })
            .collect()
    }

    fn is_goal(&self, state: &TileBoard) -> bool {
        *state == GOAL_BOARD
    }
}
