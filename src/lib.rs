//! # Ludo
//!
//! Board, path and turn model for a two-to-four player Ludo game, plus the
//! terminal front end that drives it.
//!
//! - [`game`]: paths, board geometry, tokens, movement rules, turn state machine
//! - [`error`]: why a command was rejected
//! - [`config`]: board, timing and layout constants
//! - [`app`], [`ui`]: crossterm event pump and ratatui drawing

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;

pub use error::{GameError, IllegalMoveReason};
pub use game::{Game, GameEvent, Phase, Player, PlayerColor, Token, TokenState};
