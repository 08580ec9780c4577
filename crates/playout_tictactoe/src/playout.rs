//! Random playout simulation.
//!
//! A playout plays one uniformly random legal game from a board snapshot to
//! a terminal outcome. Playouts receive owned snapshots and never see the
//! live board.

use crate::position::Position;
use crate::rules::{self, Outcome};
use crate::types::{Board, Player, Square};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Result of one simulated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayoutResult {
    /// The computer completed a line.
    ComputerWin,
    /// The human completed a line.
    HumanWin,
    /// The board filled with no line.
    Draw,
}

/// Plays one random game to completion.
///
/// `first_move` is applied as the computer's mark, then both sides play
/// uniformly random moves, human first, until the game ends. The square at
/// `first_move` must be empty in the snapshot; seeding a playout on an
/// occupied square is a contract violation, not a runtime condition.
///
/// The board has nine squares, so the loop is bounded at nine plies and the
/// function always terminates.
pub fn playout(mut board: Board, first_move: Position, rng: &mut impl Rng) -> PlayoutResult {
    debug_assert!(
        board.is_empty(first_move),
        "playout seeded on an occupied square"
    );
    board.set(first_move, Square::Occupied(Player::Computer));
    let mut to_move = Player::Human;

    for _ in 0..Board::SIZE {
        match rules::evaluate(&board) {
            Outcome::Winner(Player::Computer) => return PlayoutResult::ComputerWin,
            Outcome::Winner(Player::Human) => return PlayoutResult::HumanWin,
            Outcome::Draw => return PlayoutResult::Draw,
            Outcome::InProgress => {}
        }
        let open = Position::valid_moves(&board);
        let pos = *open
            .choose(rng)
            .expect("in-progress board has an open square");
        board.set(pos, Square::Occupied(to_move));
        to_move = to_move.opponent();
    }

    // The loop marked every open square, so the board is full by now.
    PlayoutResult::Draw
}
