//! Game session control: turn order, move validation, and events.

use crate::action::{Move, MoveError};
use crate::evaluator::{self, DEFAULT_SIMULATIONS};
use crate::position::Position;
use crate::rules::{self, Outcome};
use crate::types::{Board, Player};
use derive_getters::Getters;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

/// Turn state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human to select a square.
    AwaitingHuman,
    /// The computer owes the next move.
    AwaitingComputer,
    /// The game has ended; only a reset is accepted.
    GameOver(Outcome),
}

/// Session configuration, consumed once at session start.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Which player opens the game.
    #[serde(default = "default_first_mover")]
    first_mover: Player,

    /// Playouts per candidate square when the computer moves.
    #[serde(default = "default_simulations")]
    simulations: u32,

    /// Seed for the playout RNG; drawn from the OS when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_first_mover() -> Player {
    Player::Human
}

fn default_simulations() -> u32 {
    DEFAULT_SIMULATIONS
}

impl SessionConfig {
    /// Creates a configuration with the default settings: human moves first,
    /// 1000 playouts per candidate square, OS-seeded randomness.
    pub fn new() -> Self {
        Self {
            first_mover: default_first_mover(),
            simulations: default_simulations(),
            seed: None,
        }
    }

    /// Sets which player opens the game.
    pub fn with_first_mover(mut self, first_mover: Player) -> Self {
        self.first_mover = first_mover;
        self
    }

    /// Sets the playout count per candidate square, floored at one.
    pub fn with_simulations(mut self, simulations: u32) -> Self {
        self.simulations = simulations.max(1);
        self
    }

    /// Seeds the playout RNG for reproducible games.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn initial_phase(&self) -> Phase {
        match self.first_mover {
            Player::Human => Phase::AwaitingHuman,
            Player::Computer => Phase::AwaitingComputer,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Events the session emits for a display surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The human's mark was applied.
    HumanMoved {
        /// The square the human marked.
        position: Position,
        /// Terminal-state evaluation after the move.
        outcome: Outcome,
    },
    /// The computer chose and applied a move.
    ComputerMoved {
        /// The square the computer marked.
        position: Position,
        /// Terminal-state evaluation after the move.
        outcome: Outcome,
    },
    /// The game ended.
    GameOver {
        /// The final outcome.
        outcome: Outcome,
    },
    /// The session returned to its initial state.
    Reset,
}

/// Orchestrates one game between the human and the computer.
///
/// The session owns the live board; the evaluator and the playout simulator
/// only ever receive snapshots. Exclusive `&mut` access to the session is
/// what keeps a second computer-move resolution from starting while one is
/// in flight.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    phase: Phase,
    config: SessionConfig,
    history: Vec<Move>,
    rng: StdRng,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl GameSession {
    /// Creates a new session from the given configuration.
    #[instrument]
    pub fn new(config: SessionConfig) -> Self {
        info!(?config, "Starting game session");
        if *config.simulations() == 0 {
            warn!("Simulation count of zero is floored to one");
        }
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            board: Board::new(),
            phase: config.initial_phase(),
            config,
            history: Vec::new(),
            rng,
            events: None,
        }
    }

    /// Registers a display surface and returns its event stream.
    ///
    /// Only the most recent subscriber receives events; a dropped receiver
    /// is silently ignored.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    /// Returns the live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current turn state.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the moves of the current game, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// True if the computer owes the next move.
    pub fn computer_to_move(&self) -> bool {
        self.phase == Phase::AwaitingComputer
    }

    /// Applies the human's selected square, given as a raw cell index 0-8.
    ///
    /// Returns the terminal-state evaluation after the move;
    /// [`Outcome::InProgress`] means the computer owes the next move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the index is out of range, the square is
    /// occupied, the game is over, or it is not the human's turn. A rejected
    /// move changes nothing.
    #[instrument(skip(self))]
    pub fn apply_human_move(&mut self, index: usize) -> Result<Outcome, MoveError> {
        let position = Position::from_index(index).ok_or_else(|| {
            warn!(index, "Cell index out of range");
            MoveError::OutOfRange(index)
        })?;
        match self.phase {
            Phase::AwaitingHuman => {}
            Phase::AwaitingComputer => {
                warn!(%position, "Human tried to move on the computer's turn");
                return Err(MoveError::NotYourTurn(Player::Human));
            }
            Phase::GameOver(_) => {
                warn!(%position, "Move after game over");
                return Err(MoveError::GameOver);
            }
        }
        self.board.place(position, Player::Human)?;
        self.history.push(Move::new(Player::Human, position));

        let outcome = rules::evaluate(&self.board);
        info!(%position, %outcome, "Human moved");
        self.emit(SessionEvent::HumanMoved { position, outcome });
        self.finish_turn(outcome, Phase::AwaitingComputer);
        Ok(outcome)
    }

    /// Resolves the computer's move for this turn.
    ///
    /// Runs the evaluator over a snapshot of the live board, applies the
    /// chosen move, and reports it together with the terminal-state
    /// evaluation after the move. The whole call is a synchronous
    /// computation of roughly `simulations x open squares` playouts; drivers
    /// that need a responsive surface run it on a blocking task.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the game is over or it is not the
    /// computer's turn.
    #[instrument(skip(self))]
    pub fn resolve_computer_move(&mut self) -> Result<(Position, Outcome), MoveError> {
        match self.phase {
            Phase::AwaitingComputer => {}
            Phase::AwaitingHuman => {
                warn!("Computer move requested on the human's turn");
                return Err(MoveError::NotYourTurn(Player::Computer));
            }
            Phase::GameOver(_) => {
                warn!("Computer move requested after game over");
                return Err(MoveError::GameOver);
            }
        }
        let simulations = (*self.config.simulations()).max(1);
        let position = evaluator::select_move(&self.board, simulations, &mut self.rng)
            .expect("a session awaiting the computer has an open square");
        self.board.place(position, Player::Computer)?;
        self.history.push(Move::new(Player::Computer, position));

        let outcome = rules::evaluate(&self.board);
        info!(%position, %outcome, "Computer moved");
        self.emit(SessionEvent::ComputerMoved { position, outcome });
        self.finish_turn(outcome, Phase::AwaitingHuman);
        Ok((position, outcome))
    }

    /// Clears the board and returns to the configured starting turn.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting session");
        self.board = Board::new();
        self.history.clear();
        self.phase = self.config.initial_phase();
        self.emit(SessionEvent::Reset);
    }

    fn finish_turn(&mut self, outcome: Outcome, next: Phase) {
        if outcome.is_decided() {
            self.phase = Phase::GameOver(outcome);
            self.emit(SessionEvent::GameOver { outcome });
        } else {
            self.phase = next;
        }
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(tx) = &self.events {
            // A closed channel just means nobody is rendering.
            let _ = tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(config: SessionConfig) -> GameSession {
        GameSession::new(config.with_simulations(16).with_seed(11))
    }

    #[test]
    fn human_first_by_default() {
        let session = session(SessionConfig::new());
        assert_eq!(session.phase(), Phase::AwaitingHuman);
        assert!(!session.computer_to_move());
    }

    #[test]
    fn human_move_hands_the_turn_to_the_computer() {
        let mut session = session(SessionConfig::new());
        let outcome = session.apply_human_move(4).unwrap();
        assert_eq!(outcome, Outcome::InProgress);
        assert_eq!(session.phase(), Phase::AwaitingComputer);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn computer_reply_returns_the_turn() {
        let mut session = session(SessionConfig::new());
        session.apply_human_move(4).unwrap();
        let (position, outcome) = session.resolve_computer_move().unwrap();
        assert_ne!(position, Position::Center);
        assert_eq!(outcome, Outcome::InProgress);
        assert_eq!(session.phase(), Phase::AwaitingHuman);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut session = session(SessionConfig::new());
        assert_eq!(session.apply_human_move(9), Err(MoveError::OutOfRange(9)));
        assert_eq!(session.phase(), Phase::AwaitingHuman);
        assert!(session.history().is_empty());
    }

    #[test]
    fn occupied_square_is_rejected_without_state_change() {
        let mut session = session(SessionConfig::new());
        session.apply_human_move(4).unwrap();
        session.resolve_computer_move().unwrap();

        let before = session.board().clone();
        assert_eq!(
            session.apply_human_move(4),
            Err(MoveError::SquareOccupied(Position::Center))
        );
        assert_eq!(session.board(), &before);
        assert_eq!(session.phase(), Phase::AwaitingHuman);
    }

    #[test]
    fn moves_out_of_turn_are_rejected() {
        let mut session = session(SessionConfig::new());
        assert_eq!(
            session.resolve_computer_move(),
            Err(MoveError::NotYourTurn(Player::Computer))
        );

        session.apply_human_move(4).unwrap();
        assert_eq!(
            session.apply_human_move(0),
            Err(MoveError::NotYourTurn(Player::Human))
        );
    }

    #[test]
    fn computer_first_configuration_opens_the_game() {
        let mut session = session(SessionConfig::new().with_first_mover(Player::Computer));
        assert!(session.computer_to_move());
        assert_eq!(
            session.apply_human_move(0),
            Err(MoveError::NotYourTurn(Player::Human))
        );

        let (_, outcome) = session.resolve_computer_move().unwrap();
        assert_eq!(outcome, Outcome::InProgress);
        assert_eq!(session.phase(), Phase::AwaitingHuman);
    }

    #[test]
    fn reset_returns_to_the_initial_state() {
        let mut session = session(SessionConfig::new().with_first_mover(Player::Computer));
        session.resolve_computer_move().unwrap();
        session.apply_human_move_first_open().unwrap();

        session.reset();
        assert_eq!(session.phase(), Phase::AwaitingComputer);
        assert!(session.history().is_empty());
        assert!(!session.board().is_full());
        assert_eq!(session.board(), &Board::new());
    }

    impl GameSession {
        /// Test helper: apply the human move on the lowest open square.
        fn apply_human_move_first_open(&mut self) -> Result<Outcome, MoveError> {
            let index = (0..Board::SIZE)
                .find(|&i| {
                    Position::from_index(i).is_some_and(|pos| self.board.is_empty(pos))
                })
                .expect("board has an open square");
            self.apply_human_move(index)
        }
    }
}
