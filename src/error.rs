use crate::config::{MAX_PLAYERS, MIN_PLAYERS};

/// Why a token cannot move with the rolled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    NeedsSix,
    Overshoot { by: usize },
    AlreadyFinished,
    NoSuchToken,
}

impl std::fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMoveReason::NeedsSix => write!(f, "only a six can leave the yard"),
            IllegalMoveReason::Overshoot { by } => {
                write!(f, "would overshoot the home triangle by {by}")
            }
            IllegalMoveReason::AlreadyFinished => write!(f, "token has already finished"),
            IllegalMoveReason::NoSuchToken => write!(f, "no such token"),
        }
    }
}

/// Every way a command against the game can be rejected. None of them change state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {0}")]
    InvalidPlayerCount(usize),

    #[error("player {0} needs a non-empty name")]
    EmptyPlayerName(usize),

    #[error("cannot {command} while {phase}")]
    InvalidCommandForState {
        command: &'static str,
        phase: &'static str,
    },

    #[error("player {player} acted out of turn (current player is {current})")]
    NotYourTurn { player: usize, current: usize },

    #[error("token {token} of player {player} cannot move {die}: {reason}")]
    IllegalMove {
        player: usize,
        token: usize,
        die: u8,
        reason: IllegalMoveReason,
    },
}
