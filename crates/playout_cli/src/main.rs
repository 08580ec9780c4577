//! Terminal driver for the playout tic-tac-toe engine.
//!
//! Stands in for the display surface the engine is designed against: it
//! forwards square selections to the session, watches the session's event
//! stream, and renders the board between turns. All game semantics live in
//! the engine crate.

#![warn(missing_docs)]

mod cli;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use playout_tictactoe::{GameSession, Phase, SessionEvent};
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = config::resolve(&cli)?;
    info!(?config, "Starting terminal session");

    let mut session = GameSession::new(config);
    let mut events = session.subscribe();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if !cli.json {
        println!("Tic-tac-toe: you are X, the computer is O.");
        render::print_board(session.board());
    }

    loop {
        match session.phase() {
            Phase::AwaitingComputer => {
                if !cli.json {
                    println!("Computer is thinking...");
                }
                // Move selection runs ~simulations x open-squares playouts;
                // keep it off the async loop.
                let (returned, result) = tokio::task::spawn_blocking(move || {
                    let result = session.resolve_computer_move();
                    (session, result)
                })
                .await?;
                session = returned;
                result?;
                drain_events(&mut events, &cli)?;
                if !cli.json {
                    render::print_board(session.board());
                }
            }
            Phase::AwaitingHuman => {
                let Some(index) = prompt_for_square(&mut lines, &cli).await? else {
                    break;
                };
                match session.apply_human_move(index) {
                    Ok(_) => {
                        drain_events(&mut events, &cli)?;
                        if !cli.json {
                            render::print_board(session.board());
                        }
                    }
                    Err(error) => {
                        debug!(%error, "Rejected move");
                        if !cli.json {
                            println!("{error}. Try again.");
                        }
                    }
                }
            }
            Phase::GameOver(_) => {
                if !play_again(&mut lines, &cli).await? {
                    break;
                }
                session.reset();
                drain_events(&mut events, &cli)?;
                if !cli.json {
                    render::print_board(session.board());
                }
            }
        }
    }

    info!("Session closed");
    Ok(())
}

/// Forwards every pending session event to the renderer.
fn drain_events(events: &mut UnboundedReceiver<SessionEvent>, cli: &Cli) -> Result<()> {
    while let Ok(event) = events.try_recv() {
        render::print_event(&event, cli.json)?;
    }
    Ok(())
}

/// Prompts until the player names a square, returning its 0-based index.
///
/// Returns `None` once stdin closes.
async fn prompt_for_square(
    lines: &mut Lines<BufReader<Stdin>>,
    cli: &Cli,
) -> Result<Option<usize>> {
    loop {
        if !cli.json {
            print!("Your move [1-9]: ");
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.parse::<usize>() {
            Ok(square) if (1..=9).contains(&square) => return Ok(Some(square - 1)),
            _ => {
                if !cli.json {
                    println!("Enter a square number from 1 to 9.");
                }
            }
        }
    }
}

/// Asks whether to start another game.
async fn play_again(lines: &mut Lines<BufReader<Stdin>>, cli: &Cli) -> Result<bool> {
    if !cli.json {
        print!("Play again? [y/N] ");
        std::io::stdout().flush()?;
    }
    let Some(line) = lines.next_line().await? else {
        return Ok(false);
    };
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
