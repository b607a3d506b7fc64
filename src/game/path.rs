use crate::config::{BOARD_MAX, MAX_PLAYERS};

use super::Tile;

/// Number of tiles a token walks between leaving the yard and reaching the home triangle.
pub const PATH_LEN: usize = 58;

/// Quarter-turn rotations of the board around its center tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Identity,
    Clockwise,
    Half,
    CounterClockwise,
}

impl Rotation {
    /// Rotation that carries player 0's quadrant onto `player`'s.
    pub fn for_player(player: usize) -> Self {
        match player % MAX_PLAYERS {
            0 => Rotation::Identity,
            1 => Rotation::Clockwise,
            2 => Rotation::CounterClockwise,
            _ => Rotation::Half,
        }
    }

    pub fn apply(self, (x, y): Tile) -> Tile {
        match self {
            Rotation::Identity => (x, y),
            Rotation::Clockwise => (BOARD_MAX - y, x),
            Rotation::Half => (BOARD_MAX - x, BOARD_MAX - y),
            Rotation::CounterClockwise => (y, BOARD_MAX - x),
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Rotation::Identity => Rotation::Identity,
            Rotation::Clockwise => Rotation::CounterClockwise,
            Rotation::Half => Rotation::Half,
            Rotation::CounterClockwise => Rotation::Clockwise,
        }
    }
}

/// Player 0's walk: out of the yard, once around the cross, up the home stretch.
fn canonical_path() -> Vec<Tile> {
    let mut path = Vec::with_capacity(PATH_LEN);
    path.extend((1..=5).map(|x| (x, 6)));
    path.extend((0..=5).rev().map(|y| (6, y)));
    path.extend([(7, 0), (8, 0)]);
    path.extend((1..=5).map(|y| (8, y)));
    path.push((9, 6));
    path.extend((10..=14).map(|x| (x, 6)));
    path.extend([(14, 7), (14, 8)]);
    path.extend((9..=13).rev().map(|x| (x, 8)));
    path.push((8, 9));
    path.extend((10..=14).map(|y| (8, y)));
    path.extend([(7, 14), (6, 14)]);
    path.extend((9..=13).rev().map(|y| (6, y)));
    path.push((5, 8));
    path.extend((0..=4).rev().map(|x| (x, 8)));
    path.extend([(0, 7), (0, 6)]);
    path.extend((1..=6).map(|x| (x, 7)));
    path
}

pub fn generate_paths() -> [Vec<Tile>; MAX_PLAYERS] {
    let canonical = canonical_path();
    std::array::from_fn(|player| {
        let rotation = Rotation::for_player(player);
        canonical.iter().map(|&tile| rotation.apply(tile)).collect()
    })
}

/// The four player paths, built once per game.
#[derive(Clone, Debug)]
pub struct Paths {
    paths: [Vec<Tile>; MAX_PLAYERS],
}

impl Paths {
    pub fn new() -> Self {
        Self {
            paths: generate_paths(),
        }
    }

    pub fn len(&self) -> usize {
        self.paths[0].len()
    }

    pub fn of(&self, player: usize) -> Option<&[Tile]> {
        self.paths.get(player).map(Vec::as_slice)
    }

    pub fn tile(&self, player: usize, idx: usize) -> Option<Tile> {
        self.paths.get(player)?.get(idx).copied()
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}
