//! Tic-tac-toe engine with simulation-based move selection.
//!
//! The engine plays tic-tac-toe against a human, choosing computer moves by
//! scoring batches of random playouts instead of searching the game tree.
//!
//! # Architecture
//!
//! - **Board**: passive 3x3 container; simulation code only ever sees
//!   snapshots of it
//! - **Rules**: one terminal-state evaluation shared by live games and
//!   playouts
//! - **Playout**: a uniformly random game from a snapshot to its outcome
//! - **Evaluator**: playout batches per open square, blended score, arg-max
//! - **Session**: turn state machine driving human and computer moves and
//!   emitting events for a display surface
//!
//! # Example
//!
//! ```
//! use playout_tictactoe::{GameSession, Outcome, SessionConfig};
//!
//! let config = SessionConfig::new().with_simulations(50).with_seed(7);
//! let mut session = GameSession::new(config);
//!
//! let outcome = session.apply_human_move(4)?;
//! assert_eq!(outcome, Outcome::InProgress);
//!
//! let (reply, outcome) = session.resolve_computer_move()?;
//! assert!(!session.board().is_empty(reply));
//! assert_eq!(outcome, Outcome::InProgress);
//! # Ok::<(), playout_tictactoe::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod evaluator;
mod playout;
mod position;
mod rules;
mod session;
mod types;

// Crate-level exports - moves and errors
pub use action::{Move, MoveError};

// Crate-level exports - move evaluation
pub use evaluator::{DEFAULT_SIMULATIONS, MoveScore, score_moves, select_move};

// Crate-level exports - playout simulation
pub use playout::{PlayoutResult, playout};

// Crate-level exports - board positions
pub use position::Position;

// Crate-level exports - terminal-state rules
pub use rules::{Outcome, check_winner, evaluate, has_won, is_draw};

// Crate-level exports - session control
pub use session::{GameSession, Phase, SessionConfig, SessionEvent};

// Crate-level exports - core types
pub use types::{Board, Player, Square};
