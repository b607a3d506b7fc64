use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::app::View;
use crate::config::{BOARD_PX_H, BOARD_PX_W, BOARD_TILES, CELL_H, CELL_W, MIN_PANE_WIDTH, SIDEBAR_W};
use crate::game::{is_safe, Game, Phase, PlayerColor, TokenState};

use super::{die_pips, player_color};

const TRACK_LIGHT: Color = Color::Rgb(235, 235, 235);
const TRACK_DARK: Color = Color::Rgb(205, 205, 205);
const CENTER: Color = Color::Rgb(90, 90, 90);

/// Draws the whole screen and returns where the board landed, for mouse hit-testing.
pub fn draw_game(frame: &mut Frame, game: &Game, view: &View) -> Rect {
    let area = frame.size();

    if area.width < MIN_PANE_WIDTH || area.height < BOARD_PX_H + 2 {
        let msg = Paragraph::new(format!(
            "RESIZE PANE (min {}x{})",
            MIN_PANE_WIDTH,
            BOARD_PX_H + 2
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("LUDO"));
        frame.render_widget(msg, area);
        return Rect::default();
    }

    // Outer "cabinet" frame.
    let cabinet = Block::default()
        .title("LUDO")
        .border_type(BorderType::Thick)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Left);
    let cabinet_inner = cabinet.inner(area);
    frame.render_widget(cabinet, area);

    if game.phase() == Phase::Setup {
        draw_setup(frame, cabinet_inner);
        return Rect::default();
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(BOARD_PX_W),
            Constraint::Length(SIDEBAR_W),
        ])
        .split(cabinet_inner);

    // Center the fixed-size board within the left column.
    let v_center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(BOARD_PX_H),
            Constraint::Min(0),
        ])
        .split(cols[0]);
    let board_rect = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(BOARD_PX_W),
            Constraint::Min(0),
        ])
        .split(v_center[1])[1];

    draw_board(frame, game, board_rect);
    draw_sidebar(frame, game, view, cols[1]);
    board_rect
}

fn draw_setup(frame: &mut Frame, area: Rect) {
    let popup = centered(area, 44, 7);
    let text = vec![
        Line::styled(
            "Welcome to Ludo!",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw("Enter number of players (2-4)"),
        Line::raw(""),
        Line::raw("q quit"),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    frame.render_widget(paragraph, popup);
}

fn tile_background(col: u8, row: u8) -> Color {
    let yard_inner = |c0: u8, r0: u8| (c0 + 1..=c0 + 4).contains(&col) && (r0 + 1..=r0 + 4).contains(&row);

    match (col, row) {
        (0..=5, 0..=5) if yard_inner(0, 0) => Color::White,
        (0..=5, 0..=5) => player_color(PlayerColor::Green),
        (9..=14, 0..=5) if yard_inner(9, 0) => Color::White,
        (9..=14, 0..=5) => player_color(PlayerColor::Yellow),
        (0..=5, 9..=14) if yard_inner(0, 9) => Color::White,
        (0..=5, 9..=14) => player_color(PlayerColor::Blue),
        (9..=14, 9..=14) if yard_inner(9, 9) => Color::White,
        (9..=14, 9..=14) => player_color(PlayerColor::Red),
        // Home triangles around the center.
        (7, 7) => CENTER,
        (6..=8, 6) => player_color(PlayerColor::Yellow),
        (6..=8, 8) => player_color(PlayerColor::Blue),
        (6, 7) => player_color(PlayerColor::Green),
        (8, 7) => player_color(PlayerColor::Red),
        (1..=5, 7) | (1, 6) => player_color(PlayerColor::Green),
        (7, 1..=5) | (8, 1) => player_color(PlayerColor::Yellow),
        (7, 9..=13) | (6, 13) => player_color(PlayerColor::Blue),
        (9..=13, 7) | (13, 8) => player_color(PlayerColor::Red),
        _ if (col + row) % 2 == 0 => TRACK_LIGHT,
        _ => TRACK_DARK,
    }
}

fn draw_board(frame: &mut Frame, game: &Game, rect: Rect) {
    let w = BOARD_PX_W as usize;
    let h = BOARD_PX_H as usize;
    let mut grid = vec![vec![(' ', Style::default()); w]; h];

    for row in 0..BOARD_TILES {
        for col in 0..BOARD_TILES {
            let bg = Style::default().bg(tile_background(col, row));
            let x0 = (col as u16 * CELL_W) as usize;
            let y0 = (row as u16 * CELL_H) as usize;
            for y in y0..y0 + CELL_H as usize {
                for x in x0..x0 + CELL_W as usize {
                    grid[y][x] = (' ', bg);
                }
            }
            if is_safe((col, row)) {
                let (cx, cy) = game.board().tile_to_display((col, row));
                let cell = &mut grid[cy as usize][cx as usize + 1];
                *cell = ('*', cell.1.fg(Color::Black));
            }
        }
    }

    let selectable = match game.phase() {
        Phase::DieRolled(die) => game.legal_tokens(game.current_player(), die),
        _ => Vec::new(),
    };

    for token in game.tokens().iter() {
        let (px, py) = token.display;
        let (px, py) = (px as usize, py as usize);
        if py >= h || px >= w || px == 0 {
            continue;
        }
        let fg = player_color(PlayerColor::for_index(token.player));
        let glyph = match token.state {
            TokenState::Finished => '✓',
            _ => '●',
        };
        let mut label = Style::default().fg(Color::Black).add_modifier(Modifier::BOLD);
        if token.player == game.current_player() && selectable.contains(&token.index) {
            label = label.add_modifier(Modifier::REVERSED);
        }
        let dot = &mut grid[py][px];
        *dot = (glyph, dot.1.fg(fg).add_modifier(Modifier::BOLD));
        let digit = char::from_digit(token.index as u32 + 1, 10).unwrap_or('?');
        let tag = &mut grid[py][px - 1];
        *tag = (digit, tag.1.patch(label));
    }

    let lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(ch, style)| Span::styled(ch.to_string(), style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), rect);

    if let Phase::Won(player) = game.phase() {
        let popup = centered(rect, 36, 5);
        let name = game
            .players()
            .get(player)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        let overlay = Paragraph::new(vec![
            Line::styled(
                format!("{name} WINS!"),
                Style::default()
                    .fg(player_color(PlayerColor::for_index(player)))
                    .add_modifier(Modifier::BOLD),
            ),
            Line::raw("n restart · R setup · q quit"),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(Clear, popup);
        frame.render_widget(overlay, popup);
    }
}

fn draw_sidebar(frame: &mut Frame, game: &Game, view: &View, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Min(4),
            Constraint::Length(9),
        ])
        .split(area);

    let players: Vec<Line> = game
        .players()
        .iter()
        .map(|p| {
            let marker = if p.index == game.current_player() { "▶" } else { " " };
            let done = game.tokens().finished_count(p.index);
            Line::from(vec![
                Span::raw(format!("{marker} ")),
                Span::styled(
                    format!("{:<10}", p.name),
                    Style::default().fg(player_color(p.color)).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {:<6}", p.color.name()),
                    Style::default().fg(player_color(p.color)),
                ),
                Span::raw(format!(" {done}/4")),
            ])
        })
        .collect();
    let info = Paragraph::new(players).block(Block::default().title("PLAYERS").borders(Borders::ALL));
    frame.render_widget(info, chunks[0]);

    let turn_color = game
        .players()
        .get(game.current_player())
        .map(|p| player_color(p.color))
        .unwrap_or(Color::White);
    let pips = view.die_face(game).map(die_pips).unwrap_or(["     "; 3]);
    let die_style = Style::default().fg(Color::White).bg(turn_color);
    let die = Paragraph::new(
        pips.iter()
            .map(|row| Line::styled(format!(" {row} "), die_style))
            .collect::<Vec<_>>(),
    )
    .alignment(Alignment::Center)
    .block(Block::default().title("DIE").borders(Borders::ALL));
    frame.render_widget(die, chunks[1]);

    let phase = if view.is_rolling() {
        "ROLLING".to_string()
    } else {
        match game.phase() {
            Phase::Setup => "SETUP".to_string(),
            Phase::AwaitingRoll => "ROLL".to_string(),
            Phase::DieRolled(die) => format!("MOVE {die}"),
            Phase::Won(_) => "OVER".to_string(),
        }
    };
    let mut status = vec![Line::raw(format!("{:<7} {}", "STATUS:", phase))];
    if let Some(notice) = game.latest_notice() {
        status.push(Line::styled(
            notice.text.clone(),
            Style::default().fg(player_color(notice.color)).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(err) = &view.status {
        status.push(Line::styled(err.clone(), Style::default().fg(Color::DarkGray)));
    }
    let status = Paragraph::new(status)
        .block(Block::default().title("INFO").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[2]);

    let controls = Paragraph::new(vec![
        Line::raw("r/space roll"),
        Line::raw("1-4/click move token"),
        Line::raw("a add  x remove"),
        Line::raw("n restart"),
        Line::raw("R setup"),
        Line::raw("q/esc quit"),
    ])
    .block(Block::default().title("CONTROLS").borders(Borders::ALL));
    frame.render_widget(controls, chunks[3]);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
