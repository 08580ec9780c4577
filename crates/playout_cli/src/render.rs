//! Rendering of session state as text or JSON lines.

use playout_tictactoe::{Board, Outcome, Player, SessionEvent};

/// Prints the board grid.
pub fn print_board(board: &Board) {
    println!("\n{}\n", board.display());
}

/// Renders one session event.
pub fn print_event(event: &SessionEvent, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        SessionEvent::HumanMoved { position, .. } => {
            println!("You mark {}.", position.label());
        }
        SessionEvent::ComputerMoved { position, .. } => {
            println!("Computer marks {}.", position.label());
        }
        SessionEvent::GameOver { outcome } => println!("{}", outcome_message(outcome)),
        SessionEvent::Reset => println!("New game."),
    }
    Ok(())
}

/// Final banner for an outcome.
fn outcome_message(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Winner(Player::Human) => "You win!",
        Outcome::Winner(Player::Computer) => "Computer wins!",
        Outcome::Draw => "It's a tie!",
        Outcome::InProgress => "Game on.",
    }
}
