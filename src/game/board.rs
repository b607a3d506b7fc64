use crate::config::{BOARD_TILES, MAX_PLAYERS, TOKENS_PER_PLAYER};

use super::Tile;

/// Tiles where no capture can happen: the four entry tiles, then the four star tiles.
pub const SAFE_TILES: [Tile; 8] = [
    (1, 6),
    (8, 1),
    (13, 8),
    (6, 13),
    (6, 1),
    (8, 13),
    (13, 6),
    (1, 8),
];

const HOME_SLOTS: [[Tile; TOKENS_PER_PLAYER]; MAX_PLAYERS] = [
    [(1, 1), (1, 3), (3, 1), (3, 3)],
    [(10, 1), (10, 3), (12, 1), (12, 3)],
    [(1, 10), (1, 12), (3, 10), (3, 12)],
    [(10, 10), (10, 12), (12, 10), (12, 12)],
];

pub fn is_safe(tile: Tile) -> bool {
    SAFE_TILES.contains(&tile)
}

/// Yard square of a token; `None` for a seat or token index that does not exist.
pub fn home_slot(player: usize, token: usize) -> Option<Tile> {
    HOME_SLOTS.get(player)?.get(token).copied()
}

/// Maps grid tiles to display coordinates for a given cell size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    pub cell_w: u16,
    pub cell_h: u16,
}

impl Board {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub fn tile_to_display(&self, (col, row): Tile) -> (u16, u16) {
        (
            col as u16 * self.cell_w + self.cell_w / 2,
            row as u16 * self.cell_h + self.cell_h / 2,
        )
    }

    pub fn home_slot_to_display(&self, player: usize, token: usize) -> Option<(u16, u16)> {
        home_slot(player, token).map(|tile| self.tile_to_display(tile))
    }

    pub fn display_to_tile(&self, x: u16, y: u16) -> Option<Tile> {
        let col = x / self.cell_w;
        let row = y / self.cell_h;
        if col < BOARD_TILES as u16 && row < BOARD_TILES as u16 {
            Some((col as u8, row as u8))
        } else {
            None
        }
    }
}
