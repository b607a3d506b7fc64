use crate::config::{MAX_PLAYERS, TOKENS_PER_PLAYER};

use super::{Board, Paths};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Parked in the yard, waiting for a six.
    AtHome,
    /// Index along the owner's path.
    OnPath(usize),
    /// Walked the whole path into the home triangle.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub player: usize,
    pub index: usize,
    pub state: TokenState,
    pub display: (u16, u16),
}

impl Token {
    fn at_home(board: &Board, player: usize, index: usize) -> Self {
        Self {
            player,
            index,
            state: TokenState::AtHome,
            display: board.home_slot_to_display(player, index).unwrap_or_default(),
        }
    }
}

/// Every token of every seated player, with display positions kept in step with state.
#[derive(Debug, Clone)]
pub struct Tokens {
    board: Board,
    tokens: Vec<[Token; TOKENS_PER_PLAYER]>,
}

impl Tokens {
    pub fn new(board: Board, num_players: usize) -> Self {
        let mut tokens = Self {
            board,
            tokens: Vec::new(),
        };
        tokens.reset(num_players);
        tokens
    }

    /// Seats at most `MAX_PLAYERS` players, every token in its yard.
    pub fn reset(&mut self, num_players: usize) {
        let board = self.board;
        self.tokens = (0..num_players.min(MAX_PLAYERS))
            .map(|player| std::array::from_fn(|index| Token::at_home(&board, player, index)))
            .collect();
    }

    pub fn num_players(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens_of(&self, player: usize) -> &[Token] {
        self.tokens.get(player).map(|t| t.as_slice()).unwrap_or(&[])
    }

    pub fn get(&self, player: usize, index: usize) -> Option<&Token> {
        self.tokens.get(player)?.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().flatten()
    }

    pub fn finished_count(&self, player: usize) -> usize {
        self.tokens_of(player)
            .iter()
            .filter(|t| t.state == TokenState::Finished)
            .count()
    }

    /// Token of `player` whose display cell contains the point, if any.
    pub fn token_at(&self, player: usize, x: u16, y: u16) -> Option<usize> {
        let tile = self.board.display_to_tile(x, y)?;
        self.tokens_of(player)
            .iter()
            .find(|t| self.board.display_to_tile(t.display.0, t.display.1) == Some(tile))
            .map(|t| t.index)
    }

    pub(crate) fn place(&mut self, player: usize, index: usize, state: TokenState, paths: &Paths) {
        let board = self.board;
        let Some(token) = self.tokens.get_mut(player).and_then(|t| t.get_mut(index)) else {
            return;
        };
        token.state = state;
        let on_path = match state {
            TokenState::OnPath(idx) => paths.tile(player, idx).map(|tile| board.tile_to_display(tile)),
            TokenState::AtHome | TokenState::Finished => None,
        };
        if let Some(display) = on_path.or_else(|| board.home_slot_to_display(player, index)) {
            token.display = display;
        }
    }
}
