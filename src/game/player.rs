/// Board colors in seating order; a player's color is fixed by their index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerColor {
    Green,
    Yellow,
    Blue,
    Red,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 4] = [
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Blue,
        PlayerColor::Red,
    ];

    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            PlayerColor::Green => "Green",
            PlayerColor::Yellow => "Yellow",
            PlayerColor::Blue => "Blue",
            PlayerColor::Red => "Red",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            PlayerColor::Green => (0, 180, 0),
            PlayerColor::Yellow => (255, 215, 0),
            PlayerColor::Blue => (30, 144, 255),
            PlayerColor::Red => (220, 20, 60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub index: usize,
    pub name: String,
    pub color: PlayerColor,
}

impl Player {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            color: PlayerColor::for_index(index),
        }
    }
}

pub fn default_name(index: usize) -> String {
    format!("Player {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_follow_seating() {
        assert_eq!(Player::new(0, "a").color, PlayerColor::Green);
        assert_eq!(Player::new(1, "b").color, PlayerColor::Yellow);
        assert_eq!(Player::new(2, "c").color, PlayerColor::Blue);
        assert_eq!(Player::new(3, "d").color, PlayerColor::Red);
    }

    #[test]
    fn test_default_name() {
        assert_eq!(default_name(2), "Player 3");
    }
}
