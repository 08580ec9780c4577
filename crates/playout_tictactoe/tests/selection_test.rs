//! Tests for the public move-selection surface.

use playout_tictactoe::{Board, Player, Position, select_move};
use rand::SeedableRng;
use rand::rngs::StdRng;

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
fn fixed_seed_and_one_simulation_are_deterministic() {
    let board = board_from(&[4], &[]);
    let mut first = StdRng::seed_from_u64(7);
    let mut second = StdRng::seed_from_u64(7);

    let a = select_move(&board, 1, &mut first);
    let b = select_move(&board, 1, &mut second);
    assert_eq!(a, b);
    assert!(a.is_some());
}

#[test]
fn forced_move_is_taken_for_any_simulation_count() {
    // O X O / X O O / X . X - bottom-center is the only open square.
    let board = board_from(&[1, 3, 6, 8], &[0, 2, 4, 5]);
    for simulations in [1, 10, 1000] {
        let mut rng = StdRng::seed_from_u64(simulations as u64);
        assert_eq!(
            select_move(&board, simulations, &mut rng),
            Some(Position::BottomCenter)
        );
    }
}

#[test]
fn chosen_square_is_always_open() {
    let board = board_from(&[0, 4], &[8]);
    for seed in 0..12 {
        let mut rng = StdRng::seed_from_u64(seed);
        let chosen = select_move(&board, 16, &mut rng).expect("open squares remain");
        assert!(board.is_empty(chosen));
    }
}
