use std::io::{stdout, Stdout};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::debug;

use crate::config::{DIE_FACES, FRAME_MS, ROLL_FRAMES};
use crate::error::GameError;
use crate::game::{default_name, Game, Phase};
use crate::ui::draw_game;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Presentation state that the game core does not own.
#[derive(Debug, Default)]
pub struct View {
    /// Frames left in the dice shake; input that needs the die waits for it.
    pub rolling: u8,
    pub shown_face: u8,
    /// Why the last command was rejected.
    pub status: Option<String>,
    pub board_rect: Rect,
}

impl View {
    pub fn is_rolling(&self) -> bool {
        self.rolling > 0
    }

    /// Face to draw: a random one while shaking, the real one after.
    pub fn die_face(&self, game: &Game) -> Option<u8> {
        if self.is_rolling() {
            Some(self.shown_face)
        } else {
            game.current_die()
        }
    }

    fn start_roll(&mut self) {
        self.rolling = ROLL_FRAMES;
        self.shown_face = rand::thread_rng().gen_range(1..=DIE_FACES);
    }

    fn tick(&mut self) {
        if self.rolling > 0 {
            self.rolling -= 1;
            self.shown_face = rand::thread_rng().gen_range(1..=DIE_FACES);
        }
    }

    fn report(&mut self, result: Result<(), GameError>) {
        match result {
            Ok(()) => self.status = None,
            Err(err) => {
                debug!(error = %err, "command rejected");
                self.status = Some(err.to_string());
            }
        }
    }
}

pub fn run(names: Vec<String>, seed: u64) -> anyhow::Result<()> {
    let mut game = Game::new(StdRng::seed_from_u64(seed));
    if !names.is_empty() {
        game.initialize(names.len(), &names)?;
    }
    let mut tui = TuiGuard::new()?;
    run_loop(tui.terminal_mut(), &mut game)
}

fn run_loop(terminal: &mut Term, game: &mut Game) -> anyhow::Result<()> {
    let mut view = View::default();

    loop {
        let mut board_rect = view.board_rect;
        terminal.draw(|frame| board_rect = draw_game(frame, game, &view))?;
        view.board_rect = board_rect;

        if event::poll(Duration::from_millis(FRAME_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        break;
                    }
                    handle_input(key.code, game, &mut view);
                }
                Event::Mouse(mouse) => handle_mouse(mouse, game, &mut view),
                _ => {}
            }
        }

        view.tick();
        game.tick_notices();
    }
    Ok(())
}

struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

pub fn handle_input(code: KeyCode, game: &mut Game, view: &mut View) {
    if game.phase() == Phase::Setup {
        if let KeyCode::Char(c @ '2'..='4') = code {
            let n = c as usize - '0' as usize;
            let names: Vec<String> = (0..n).map(default_name).collect();
            view.report(game.initialize(n, &names));
        }
        return;
    }

    match code {
        KeyCode::Char('r') | KeyCode::Char(' ') => {
            if view.is_rolling() {
                return;
            }
            let player = game.current_player();
            let result = game.request_roll(player).map(|_| view.start_roll());
            view.report(result);
        }
        KeyCode::Char(c @ '1'..='4') => {
            let token = c as usize - '1' as usize;
            select(game, view, token);
        }
        KeyCode::Char('a') => {
            let name = default_name(game.num_players());
            view.report(game.add_player(&name));
        }
        KeyCode::Char('x') => view.report(game.remove_player()),
        KeyCode::Char('n') => view.report(game.restart()),
        KeyCode::Char('R') => {
            game.reset();
            view.status = None;
        }
        _ => {}
    }
}

pub fn handle_mouse(mouse: MouseEvent, game: &mut Game, view: &mut View) {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    let rect = view.board_rect;
    let inside = mouse.column >= rect.x
        && mouse.row >= rect.y
        && mouse.column < rect.x + rect.width
        && mouse.row < rect.y + rect.height;
    if !inside || !game.is_awaiting_token_selection() {
        return;
    }
    let player = game.current_player();
    if let Some(token) = game
        .tokens()
        .token_at(player, mouse.column - rect.x, mouse.row - rect.y)
    {
        select(game, view, token);
    }
}

fn select(game: &mut Game, view: &mut View, token: usize) {
    if view.is_rolling() {
        return;
    }
    let player = game.current_player();
    let result = game.select_token(player, token).map(|_| ());
    view.report(result);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::game::TokenState;

    fn seated(seed: u64) -> Game {
        let names = vec!["Ann".to_string(), "Bo".to_string()];
        Game::with_players(&names, StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn setup_keys_seat_default_players() {
        let mut game = Game::new(StdRng::seed_from_u64(1));
        let mut view = View::default();
        handle_input(KeyCode::Char('r'), &mut game, &mut view);
        assert_eq!(game.phase(), Phase::Setup);
        handle_input(KeyCode::Char('3'), &mut game, &mut view);
        assert_eq!(game.num_players(), 3);
        assert_eq!(game.players()[2].name, "Player 3");
    }

    #[test]
    fn roll_key_starts_animation_and_blocks_reroll() {
        let mut game = seated(9);
        let mut view = View::default();
        handle_input(KeyCode::Char(' '), &mut game, &mut view);
        assert!(view.is_rolling());
        assert!(game.current_die().is_some());
        let before = game.current_die();
        handle_input(KeyCode::Char('r'), &mut game, &mut view);
        assert_eq!(game.current_die(), before);
        for _ in 0..ROLL_FRAMES {
            view.tick();
        }
        assert!(!view.is_rolling());
        assert_eq!(view.die_face(&game), game.current_die());
    }

    #[test]
    fn rejected_commands_set_status() {
        let mut game = seated(3);
        let mut view = View::default();
        handle_input(KeyCode::Char('x'), &mut game, &mut view);
        assert!(view.status.is_some());
        assert_eq!(game.num_players(), 2);
        handle_input(KeyCode::Char('a'), &mut game, &mut view);
        assert!(view.status.is_none());
        assert_eq!(game.players()[2].name, "Player 3");
    }

    #[test]
    fn reset_key_returns_to_setup() {
        let mut game = seated(3);
        let mut view = View::default();
        handle_input(KeyCode::Char('R'), &mut game, &mut view);
        assert_eq!(game.phase(), Phase::Setup);
        assert!(game.players().is_empty());
    }

    #[test]
    fn click_selects_token_under_pointer() {
        // Seed chosen by rolling until a six comes up.
        let mut seed = 0;
        let mut game = loop {
            let mut g = seated(seed);
            if g.request_roll(0) == Ok(6) {
                break g;
            }
            seed += 1;
        };
        let mut view = View {
            board_rect: Rect::new(10, 5, 60, 30),
            ..View::default()
        };
        let (x, y) = game.tokens_of(0)[2].display;
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10 + x,
            row: 5 + y,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(click, &mut game, &mut view);
        assert_eq!(game.tokens_of(0)[2].state, TokenState::OnPath(0));
    }
}
