//! Simulation-based move selection.
//!
//! For every open square the evaluator runs a batch of random playouts
//! seeded with that square as the computer's move, scores the batch, and
//! picks the square with the highest blended score.

use crate::playout::{PlayoutResult, playout};
use crate::position::Position;
use crate::types::Board;
use derive_getters::Getters;
use rand::Rng;
use tracing::{debug, instrument};

/// Number of playouts per candidate square unless configured otherwise.
pub const DEFAULT_SIMULATIONS: u32 = 1_000;

/// Weight of the accumulated playout credit in the blended score.
const RAVE_WEIGHT: f64 = 0.2;

/// Aggregate score for one candidate square.
///
/// Rebuilt from scratch every time the computer must move and discarded once
/// a move is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Getters)]
pub struct MoveScore {
    /// The candidate square.
    position: Position,
    /// Playouts recorded so far.
    simulations: u32,
    /// Playouts the computer won outright.
    wins: u32,
    /// Accumulated credit: 1.0 per computer win, 0.5 for anything else.
    rave_score: f64,
}

impl MoveScore {
    fn new(position: Position) -> Self {
        Self {
            position,
            simulations: 0,
            wins: 0,
            rave_score: 0.0,
        }
    }

    fn record(&mut self, result: PlayoutResult) {
        self.simulations += 1;
        if result == PlayoutResult::ComputerWin {
            self.wins += 1;
        }
        // Every outcome that is not a computer win earns the half credit,
        // a human win included.
        self.rave_score += if result == PlayoutResult::ComputerWin {
            1.0
        } else {
            0.5
        };
    }

    /// Blended score: the win rate carries most of the weight, the
    /// accumulated credit the rest.
    pub fn final_score(&self) -> f64 {
        let simulations = self.simulations as f64;
        let win_rate = self.wins as f64 / simulations;
        win_rate * (1.0 - RAVE_WEIGHT) + (self.rave_score / simulations) * RAVE_WEIGHT
    }
}

/// Scores every open square on the board.
///
/// Each candidate is evaluated over `simulations` playouts, every playout on
/// its own snapshot; the live board is only read. Candidates come back in
/// index order.
#[instrument(skip(board, rng))]
pub fn score_moves(board: &Board, simulations: u32, rng: &mut impl Rng) -> Vec<MoveScore> {
    debug_assert!(simulations > 0, "simulation count must be positive");
    let mut scores = Vec::new();
    for position in <Position as strum::IntoEnumIterator>::iter() {
        if !board.is_empty(position) {
            continue;
        }
        let mut score = MoveScore::new(position);
        for _ in 0..simulations {
            score.record(playout(board.snapshot(), position, rng));
        }
        scores.push(score);
    }
    scores
}

/// Picks the open square with the best blended score.
///
/// Candidates are scored in index order and only a strictly higher score
/// replaces the running best, so ties resolve to the lowest index. Returns
/// `None` only when the board has no open square; callers are expected to
/// have checked for a terminal state first, and a full board is a contract
/// violation in debug builds.
#[instrument(skip(board, rng))]
pub fn select_move(board: &Board, simulations: u32, rng: &mut impl Rng) -> Option<Position> {
    debug_assert!(!board.is_full(), "select_move called on a full board");
    let mut best: Option<(Position, f64)> = None;
    for score in score_moves(board, simulations, rng) {
        let value = score.final_score();
        debug!(
            position = %score.position(),
            wins = *score.wins(),
            value,
            "Scored candidate square"
        );
        let replace = match best {
            Some((_, best_value)) => value > best_value,
            None => true,
        };
        if replace {
            best = Some((*score.position(), value));
        }
    }
    best.map(|(position, _)| position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::types::Player;

    fn board_from(human: &[usize], computer: &[usize]) -> Board {
        let mut board = Board::new();
        for &index in human {
            board
                .place(Position::from_index(index).unwrap(), Player::Human)
                .unwrap();
        }
        for &index in computer {
            board
                .place(Position::from_index(index).unwrap(), Player::Computer)
                .unwrap();
        }
        board
    }

    #[test]
    fn score_blends_win_rate_and_credit() {
        let mut score = MoveScore::new(Position::Center);
        score.record(PlayoutResult::ComputerWin);
        score.record(PlayoutResult::Draw);
        score.record(PlayoutResult::HumanWin);
        score.record(PlayoutResult::HumanWin);

        assert_eq!(*score.simulations(), 4);
        assert_eq!(*score.wins(), 1);
        // Credit: 1.0 + 0.5 + 0.5 + 0.5; a human win earns the same half
        // credit as a draw.
        assert!((score.rave_score() - 2.5).abs() < f64::EPSILON);
        let expected = 0.25 * 0.8 + (2.5 / 4.0) * 0.2;
        assert!((score.final_score() - expected).abs() < 1e-12);
    }

    #[test]
    fn all_wins_scores_the_maximum() {
        let mut score = MoveScore::new(Position::Center);
        for _ in 0..10 {
            score.record(PlayoutResult::ComputerWin);
        }
        assert!((score.final_score() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn scores_cover_exactly_the_open_squares() {
        let board = board_from(&[0, 4], &[8]);
        let mut rng = StdRng::seed_from_u64(1);
        let scores = score_moves(&board, 4, &mut rng);
        assert_eq!(scores.len(), 6);
        assert!(scores.iter().all(|s| board.is_empty(*s.position())));
    }

    #[test]
    fn select_move_never_returns_an_occupied_square() {
        let board = board_from(&[0, 4, 7], &[1, 3]);
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let chosen = select_move(&board, 8, &mut rng).unwrap();
            assert!(board.is_empty(chosen));
        }
    }

    #[test]
    fn identical_seeds_pick_identical_moves() {
        let board = board_from(&[4], &[]);
        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);
        assert_eq!(
            select_move(&board, 1, &mut first),
            select_move(&board, 1, &mut second)
        );
    }

    #[test]
    fn sole_open_square_is_forced() {
        // O X O / X O O / X . X - only bottom-center remains.
        let board = board_from(&[1, 3, 6, 8], &[0, 2, 4, 5]);
        for simulations in [1, 2, 50] {
            let mut rng = StdRng::seed_from_u64(5);
            assert_eq!(
                select_move(&board, simulations, &mut rng),
                Some(Position::BottomCenter)
            );
        }
    }

    #[test]
    fn immediate_win_beats_every_other_square() {
        // O O . / X X . / X . . with the computer to move; the top-right
        // square wins every playout outright and must be chosen.
        let board = board_from(&[3, 4, 6], &[0, 1]);
        let mut rng = StdRng::seed_from_u64(1234);
        assert_eq!(
            select_move(&board, 200, &mut rng),
            Some(Position::TopRight)
        );
    }
}
