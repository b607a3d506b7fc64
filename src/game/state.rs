use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::{CELL_H, CELL_W, DIE_FACES, MAX_PLAYERS, MIN_PLAYERS};
use crate::error::GameError;
use crate::game::{
    Board, Die, GameEvent, Notice, Notices, Paths, Player, PlayerColor, Token, Tokens,
};

use super::movement::Moved;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No players seated yet.
    Setup,
    AwaitingRoll,
    /// A die value is waiting to be spent on a token.
    DieRolled(u8),
    /// Terminal: the player who finished all tokens first.
    Won(usize),
}

impl Phase {
    fn describe(self) -> &'static str {
        match self {
            Phase::Setup => "setting up players",
            Phase::AwaitingRoll => "waiting for a roll",
            Phase::DieRolled(_) => "waiting for a token selection",
            Phase::Won(_) => "the game is over",
        }
    }
}

pub struct Game {
    pub(crate) board: Board,
    pub(crate) paths: Paths,
    pub(crate) tokens: Tokens,
    pub(crate) winner: Option<usize>,
    players: Vec<Player>,
    current: usize,
    phase: Phase,
    last_die: Option<u8>,
    die: Box<dyn Die>,
    notices: Notices,
}

impl Game {
    pub fn new(die: impl Die + 'static) -> Self {
        Self::with_board(Board::new(CELL_W, CELL_H), die)
    }

    pub fn with_board(board: Board, die: impl Die + 'static) -> Self {
        Self {
            board,
            paths: Paths::new(),
            tokens: Tokens::new(board, 0),
            winner: None,
            players: Vec::new(),
            current: 0,
            phase: Phase::Setup,
            last_die: None,
            die: Box::new(die),
            notices: Notices::default(),
        }
    }

    /// Builds a game with the players already seated.
    pub fn with_players(names: &[String], die: impl Die + 'static) -> Result<Self, GameError> {
        let mut game = Self::new(die);
        game.initialize(names.len(), names)?;
        Ok(game)
    }

    pub fn initialize(&mut self, num_players: usize, names: &[String]) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(self.wrong_state("seat players"));
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(GameError::InvalidPlayerCount(num_players));
        }
        if names.len() != num_players {
            return Err(GameError::InvalidPlayerCount(names.len()));
        }
        if let Some(idx) = names.iter().position(|n| n.trim().is_empty()) {
            return Err(GameError::EmptyPlayerName(idx));
        }

        self.players = names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(i, name.trim()))
            .collect();
        self.tokens.reset(num_players);
        self.current = 0;
        self.last_die = None;
        self.winner = None;
        self.phase = Phase::AwaitingRoll;
        info!(num_players, "game initialized");
        Ok(())
    }

    pub fn request_roll(&mut self, player: usize) -> Result<u8, GameError> {
        if self.phase != Phase::AwaitingRoll {
            return Err(self.wrong_state("roll"));
        }
        self.check_turn(player)?;

        let value = self.die.roll();
        debug_assert!(
            (1..=DIE_FACES).contains(&value),
            "die produced {value}, outside 1..={DIE_FACES}"
        );
        self.last_die = Some(value);
        debug!(player, value, "die rolled");

        if self.has_any_legal_move(player, value) {
            self.phase = Phase::DieRolled(value);
        } else {
            debug!(player, value, "no legal move, turn passes");
            let text = format!("{} cannot move with a {}", self.player_name(player), value);
            self.notify(GameEvent::TurnPassed { player, die: value }, text);
            self.end_turn(value);
        }
        Ok(value)
    }

    pub fn select_token(&mut self, player: usize, token: usize) -> Result<Moved, GameError> {
        let Phase::DieRolled(value) = self.phase else {
            return Err(self.wrong_state("move a token"));
        };
        self.check_turn(player)?;
        let moved = self.attempt_move(player, token, value)?;
        self.end_turn(value);
        Ok(moved)
    }

    pub fn add_player(&mut self, name: &str) -> Result<(), GameError> {
        self.check_seating("add a player")?;
        let n = self.players.len();
        if n >= MAX_PLAYERS {
            return Err(GameError::InvalidPlayerCount(n + 1));
        }
        if name.trim().is_empty() {
            return Err(GameError::EmptyPlayerName(n));
        }
        self.players.push(Player::new(n, name.trim()));
        self.reseat();
        info!(num_players = n + 1, name = name.trim(), "player added");
        Ok(())
    }

    /// Removes the highest-indexed player.
    pub fn remove_player(&mut self) -> Result<(), GameError> {
        self.check_seating("remove a player")?;
        let n = self.players.len();
        if n <= MIN_PLAYERS {
            return Err(GameError::InvalidPlayerCount(n.saturating_sub(1)));
        }
        self.players.pop();
        if self.current >= self.players.len() {
            self.current = 0;
        }
        self.reseat();
        info!(num_players = n - 1, "player removed");
        Ok(())
    }

    /// New game with the same players.
    pub fn restart(&mut self) -> Result<(), GameError> {
        if self.phase == Phase::Setup {
            return Err(self.wrong_state("restart"));
        }
        self.tokens.reset(self.players.len());
        self.current = 0;
        self.last_die = None;
        self.winner = None;
        self.phase = Phase::AwaitingRoll;
        self.notices.clear();
        info!(num_players = self.players.len(), "game restarted");
        Ok(())
    }

    /// Back to setup with nobody seated.
    pub fn reset(&mut self) {
        self.players.clear();
        self.tokens.reset(0);
        self.current = 0;
        self.last_die = None;
        self.winner = None;
        self.phase = Phase::Setup;
        self.notices.clear();
        info!("game reset");
    }

    pub fn current_player(&self) -> usize {
        self.current
    }

    pub fn current_die(&self) -> Option<u8> {
        self.last_die
    }

    pub fn is_awaiting_token_selection(&self) -> bool {
        matches!(self.phase, Phase::DieRolled(_))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    pub fn tokens_of(&self, player: usize) -> &[Token] {
        self.tokens.tokens_of(player)
    }

    pub fn token_display_positions(&self) -> BTreeMap<(usize, usize), (u16, u16)> {
        self.tokens
            .iter()
            .map(|t| ((t.player, t.index), t.display))
            .collect()
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn latest_notice(&self) -> Option<&Notice> {
        self.notices.latest()
    }

    pub fn tick_notices(&mut self) {
        self.notices.tick();
    }

    pub(crate) fn player_name(&self, player: usize) -> &str {
        self.players.get(player).map(|p| p.name.as_str()).unwrap_or("?")
    }

    pub(crate) fn notify(&mut self, event: GameEvent, text: String) {
        let color = PlayerColor::for_index(event.player());
        self.notices.push(event, text, color);
    }

    fn end_turn(&mut self, die: u8) {
        if let Some(winner) = self.winner {
            self.phase = Phase::Won(winner);
            return;
        }
        if die != DIE_FACES {
            self.current = (self.current + 1) % self.players.len();
        }
        self.phase = Phase::AwaitingRoll;
    }

    fn reseat(&mut self) {
        self.tokens.reset(self.players.len());
        self.last_die = None;
        self.phase = Phase::AwaitingRoll;
    }

    fn check_turn(&self, player: usize) -> Result<(), GameError> {
        if player != self.current {
            return Err(GameError::NotYourTurn {
                player,
                current: self.current,
            });
        }
        Ok(())
    }

    fn check_seating(&self, command: &'static str) -> Result<(), GameError> {
        match self.phase {
            Phase::Setup | Phase::Won(_) => Err(self.wrong_state(command)),
            _ => Ok(()),
        }
    }

    pub(crate) fn wrong_state(&self, command: &'static str) -> GameError {
        GameError::InvalidCommandForState {
            command,
            phase: self.phase.describe(),
        }
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, player: usize, token: usize, state: super::TokenState) {
        self.tokens.place(player, token, state, &self.paths);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IllegalMoveReason;
    use crate::game::dice::testing::LoadedDie;
    use crate::game::{PATH_LEN, TokenState};

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("P{}", i + 1)).collect()
    }

    fn game(n: usize, faces: &[u8]) -> Game {
        Game::with_players(&names(n), LoadedDie::new(faces)).unwrap()
    }

    #[test]
    fn test_initialize_validation() {
        let mut g = Game::new(LoadedDie::new(&[]));
        assert_eq!(g.phase(), Phase::Setup);
        assert_eq!(g.initialize(1, &names(1)), Err(GameError::InvalidPlayerCount(1)));
        assert_eq!(g.initialize(5, &names(5)), Err(GameError::InvalidPlayerCount(5)));
        assert_eq!(g.initialize(3, &names(2)), Err(GameError::InvalidPlayerCount(2)));
        let blank = vec!["a".to_string(), "  ".to_string()];
        assert_eq!(g.initialize(2, &blank), Err(GameError::EmptyPlayerName(1)));
        assert_eq!(g.phase(), Phase::Setup);

        g.initialize(3, &names(3)).unwrap();
        assert_eq!(g.phase(), Phase::AwaitingRoll);
        assert_eq!(g.num_players(), 3);
        assert_eq!(g.token_display_positions().len(), 12);
        assert!(g.initialize(2, &names(2)).is_err());
    }

    #[test]
    fn test_six_then_three() {
        let mut g = game(2, &[6, 3]);
        assert_eq!(g.request_roll(0), Ok(6));
        assert!(g.is_awaiting_token_selection());
        g.select_token(0, 0).unwrap();
        assert_eq!(g.tokens_of(0)[0].state, TokenState::OnPath(0));
        assert_eq!(
            g.tokens_of(0)[0].display,
            g.board().tile_to_display(g.paths().of(0).unwrap()[0])
        );
        assert_eq!(g.current_player(), 0);

        assert_eq!(g.request_roll(0), Ok(3));
        g.select_token(0, 0).unwrap();
        assert_eq!(g.tokens_of(0)[0].state, TokenState::OnPath(3));
        assert_eq!(g.current_player(), 1);
        assert_eq!(g.current_die(), Some(3));
        assert!(!g.is_awaiting_token_selection());
    }

    #[test]
    fn test_turn_wraps_around() {
        let mut g = game(3, &[6, 1, 6, 2, 6, 4]);
        for expected in [0, 1, 2] {
            assert_eq!(g.current_player(), expected);
            g.request_roll(expected).unwrap();
            g.select_token(expected, 0).unwrap();
            g.request_roll(expected).unwrap();
            g.select_token(expected, 0).unwrap();
        }
        assert_eq!(g.current_player(), 0);
    }

    #[test]
    fn test_forced_pass_advances() {
        let mut g = game(2, &[3]);
        assert_eq!(g.request_roll(0), Ok(3));
        assert_eq!(g.current_player(), 1);
        assert_eq!(g.phase(), Phase::AwaitingRoll);
        assert_eq!(g.current_die(), Some(3));
        assert!(matches!(
            g.latest_notice().map(|n| &n.event),
            Some(GameEvent::TurnPassed { player: 0, die: 3 })
        ));
    }

    #[test]
    fn test_forced_pass_on_six_keeps_player() {
        let mut g = game(2, &[6]);
        for token in 0..3 {
            g.force_state(0, token, TokenState::Finished);
        }
        g.force_state(0, 3, TokenState::OnPath(PATH_LEN - 2));
        g.request_roll(0).unwrap();
        assert_eq!(g.current_player(), 0);
        assert_eq!(g.phase(), Phase::AwaitingRoll);
    }

    #[test]
    fn test_illegal_selection_keeps_die() {
        let mut g = game(2, &[4]);
        g.force_state(0, 0, TokenState::OnPath(10));
        g.force_state(0, 1, TokenState::OnPath(PATH_LEN - 2));
        g.request_roll(0).unwrap();

        let err = g.select_token(0, 1).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalMove { reason: IllegalMoveReason::Overshoot { by: 2 }, .. }
        ));
        assert_eq!(g.phase(), Phase::DieRolled(4));
        assert_eq!(g.tokens_of(0)[1].state, TokenState::OnPath(PATH_LEN - 2));

        let err = g.select_token(0, 2).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalMove { reason: IllegalMoveReason::NeedsSix, .. }
        ));

        g.select_token(0, 0).unwrap();
        assert_eq!(g.tokens_of(0)[0].state, TokenState::OnPath(14));
        assert_eq!(g.current_player(), 1);
    }

    #[test]
    fn test_commands_out_of_order_are_rejected() {
        let mut g = game(2, &[6]);
        assert!(matches!(
            g.select_token(0, 0),
            Err(GameError::InvalidCommandForState { command: "move a token", .. })
        ));
        assert_eq!(
            g.request_roll(1),
            Err(GameError::NotYourTurn { player: 1, current: 0 })
        );
        g.request_roll(0).unwrap();
        assert!(matches!(
            g.request_roll(0),
            Err(GameError::InvalidCommandForState { command: "roll", .. })
        ));
        assert_eq!(
            g.select_token(1, 0).unwrap_err(),
            GameError::NotYourTurn { player: 1, current: 0 }
        );
        assert_eq!(g.phase(), Phase::DieRolled(6));
    }

    #[test]
    fn test_capture_through_turns() {
        let mut g = game(2, &[2]);
        let tile = g.paths().of(0).unwrap()[30];
        let theirs = g.paths().of(1).unwrap().iter().position(|&t| t == tile).unwrap();
        g.force_state(0, 0, TokenState::OnPath(28));
        g.force_state(1, 0, TokenState::OnPath(theirs));

        g.request_roll(0).unwrap();
        let moved = g.select_token(0, 0).unwrap();
        assert_eq!(moved.captured, 1);
        assert_eq!(g.tokens_of(0)[0].state, TokenState::OnPath(30));
        assert_eq!(g.tokens_of(1)[0].state, TokenState::AtHome);
        assert!(g
            .notices()
            .any(|n| matches!(n.event, GameEvent::Captured { by: 0, victim: 1, token: 0 })));
    }

    #[test]
    fn test_win_stops_the_game() {
        let mut g = game(2, &[2]);
        for token in 0..3 {
            g.force_state(0, token, TokenState::Finished);
        }
        g.force_state(0, 3, TokenState::OnPath(PATH_LEN - 2));
        g.force_state(1, 0, TokenState::OnPath(3));
        g.request_roll(0).unwrap();
        g.select_token(0, 3).unwrap();

        assert_eq!(g.winner(), Some(0));
        assert_eq!(g.phase(), Phase::Won(0));
        assert_eq!(
            g.attempt_move(1, 0, 2),
            Err(GameError::InvalidCommandForState {
                command: "move a token",
                phase: "the game is over",
            })
        );
        assert_eq!(g.tokens_of(1)[0].state, TokenState::OnPath(3));
        assert!(g.request_roll(0).is_err());
        assert!(g.request_roll(1).is_err());
        assert!(g.select_token(0, 0).is_err());
        assert!(g.add_player("late").is_err());
        assert_eq!(
            g.notices()
                .filter(|n| matches!(n.event, GameEvent::PlayerWon { player: 0 }))
                .count(),
            1
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside 1..=6")]
    fn test_out_of_range_die_is_caught() {
        let mut g = game(2, &[7]);
        let _ = g.request_roll(0);
    }

    #[test]
    fn test_player_limits() {
        let mut g = game(4, &[]);
        assert_eq!(g.add_player("E"), Err(GameError::InvalidPlayerCount(5)));
        assert_eq!(g.num_players(), 4);

        let mut g = game(2, &[]);
        g.force_state(1, 1, TokenState::OnPath(5));
        assert_eq!(g.remove_player(), Err(GameError::InvalidPlayerCount(1)));
        assert_eq!(g.num_players(), 2);
        assert_eq!(g.tokens_of(1)[1].state, TokenState::OnPath(5));
    }

    #[test]
    fn test_add_and_remove_reseat_tokens() {
        let mut g = game(2, &[6]);
        g.force_state(0, 0, TokenState::OnPath(7));
        g.add_player("Third").unwrap();
        assert_eq!(g.num_players(), 3);
        assert_eq!(g.players()[2].name, "Third");
        assert!(g.tokens().iter().all(|t| t.state == TokenState::AtHome));
        assert_eq!(g.add_player(" "), Err(GameError::EmptyPlayerName(3)));

        g.request_roll(0).unwrap();
        g.remove_player().unwrap();
        assert_eq!(g.num_players(), 2);
        assert_eq!(g.phase(), Phase::AwaitingRoll);
        assert_eq!(g.tokens_of(2).len(), 0);
    }

    #[test]
    fn test_remove_clamps_current_player() {
        let mut g = game(3, &[1, 1]);
        g.request_roll(0).unwrap();
        g.request_roll(1).unwrap();
        assert_eq!(g.current_player(), 2);
        g.remove_player().unwrap();
        assert_eq!(g.current_player(), 0);
    }

    #[test]
    fn test_restart_and_reset() {
        let mut g = game(2, &[2]);
        for token in 0..3 {
            g.force_state(0, token, TokenState::Finished);
        }
        g.force_state(0, 3, TokenState::OnPath(PATH_LEN - 2));
        g.request_roll(0).unwrap();
        g.select_token(0, 3).unwrap();

        g.restart().unwrap();
        assert_eq!(g.winner(), None);
        assert_eq!(g.num_players(), 2);
        assert_eq!(g.phase(), Phase::AwaitingRoll);
        assert!(g.tokens().iter().all(|t| t.state == TokenState::AtHome));
        assert!(g.latest_notice().is_none());

        g.reset();
        assert_eq!(g.phase(), Phase::Setup);
        assert!(g.players().is_empty());
        assert!(g.token_display_positions().is_empty());
        assert!(g.restart().is_err());
        assert!(g.request_roll(0).is_err());
        assert!(g.remove_player().is_err());
    }
}
