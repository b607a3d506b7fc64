use tracing::{debug, info};

use crate::config::{DIE_FACES, TOKENS_PER_PLAYER};
use crate::error::{GameError, IllegalMoveReason};

use super::board::is_safe;
use super::{Game, GameEvent, TokenState};

/// A move that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moved {
    pub player: usize,
    pub token: usize,
    pub from: TokenState,
    pub to: TokenState,
    pub captured: usize,
}

impl Game {
    /// Where `token` would end up after moving `die` tiles, without touching any state.
    pub(crate) fn destination(
        &self,
        player: usize,
        token: usize,
        die: u8,
    ) -> Result<TokenState, IllegalMoveReason> {
        let len = self.paths.len();
        let current = self
            .tokens
            .get(player, token)
            .ok_or(IllegalMoveReason::NoSuchToken)?;
        match current.state {
            TokenState::AtHome if die == DIE_FACES => Ok(TokenState::OnPath(0)),
            TokenState::AtHome => Err(IllegalMoveReason::NeedsSix),
            TokenState::Finished => Err(IllegalMoveReason::AlreadyFinished),
            TokenState::OnPath(idx) => {
                let next = idx + die as usize;
                if next == len {
                    Ok(TokenState::Finished)
                } else if next < len {
                    Ok(TokenState::OnPath(next))
                } else {
                    Err(IllegalMoveReason::Overshoot { by: next - len })
                }
            }
        }
    }

    pub fn has_any_legal_move(&self, player: usize, die: u8) -> bool {
        (0..TOKENS_PER_PLAYER).any(|token| self.destination(player, token, die).is_ok())
    }

    /// Tokens of `player` that `die` can move.
    pub fn legal_tokens(&self, player: usize, die: u8) -> Vec<usize> {
        (0..TOKENS_PER_PLAYER)
            .filter(|&token| self.destination(player, token, die).is_ok())
            .collect()
    }

    /// Applies a move, capturing opponents and recording a finish or a win. Rejected moves
    /// leave every token where it was, and nothing moves once the game has a winner.
    pub fn attempt_move(&mut self, player: usize, token: usize, die: u8) -> Result<Moved, GameError> {
        if self.winner.is_some() {
            return Err(self.wrong_state("move a token"));
        }
        let to = self
            .destination(player, token, die)
            .map_err(|reason| GameError::IllegalMove {
                player,
                token,
                die,
                reason,
            })?;
        let from = self.tokens.get(player, token).map(|t| t.state).unwrap_or(TokenState::AtHome);
        self.tokens.place(player, token, to, &self.paths);
        debug!(player, token, die, ?from, ?to, "token moved");

        let mut captured = 0;
        match to {
            TokenState::Finished => {
                let text = format!("{} token is home!", self.player_name(player));
                self.notify(GameEvent::TokenFinished { player, token }, text);
                self.check_winner(player);
            }
            TokenState::OnPath(idx) => {
                captured = self.capture_at(player, idx);
            }
            TokenState::AtHome => {}
        }

        Ok(Moved {
            player,
            token,
            from,
            to,
            captured,
        })
    }

    /// Sends every opposing token sharing `player`'s tile at `idx` back to its yard.
    fn capture_at(&mut self, player: usize, idx: usize) -> usize {
        let Some(tile) = self.paths.tile(player, idx) else {
            return 0;
        };
        if is_safe(tile) {
            return 0;
        }
        let victims: Vec<(usize, usize)> = self
            .tokens
            .iter()
            .filter(|t| t.player != player)
            .filter(|t| match t.state {
                TokenState::OnPath(i) => self.paths.tile(t.player, i) == Some(tile),
                _ => false,
            })
            .map(|t| (t.player, t.index))
            .collect();

        for &(victim, token) in &victims {
            self.tokens.place(victim, token, TokenState::AtHome, &self.paths);
            debug!(by = player, victim, token, ?tile, "token captured");
            let text = format!(
                "{} killed {}!",
                self.player_name(player),
                self.player_name(victim)
            );
            self.notify(GameEvent::Captured { by: player, victim, token }, text);
        }
        victims.len()
    }

    fn check_winner(&mut self, player: usize) {
        if self.winner.is_some() || self.tokens.finished_count(player) < TOKENS_PER_PLAYER {
            return;
        }
        self.winner = Some(player);
        info!(player, name = self.player_name(player), "player won");
        let text = format!("{} wins!", self.player_name(player));
        self.notify(GameEvent::PlayerWon { player }, text);
    }
}
