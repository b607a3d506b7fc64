pub mod board;
pub mod dice;
pub mod movement;
pub mod notice;
pub mod path;
pub mod player;
pub mod state;
pub mod token;

/// A board square as `(col, row)`.
pub type Tile = (u8, u8);

pub use board::{is_safe, Board, SAFE_TILES};
pub use dice::Die;
pub use movement::Moved;
pub use notice::{GameEvent, Notice, Notices};
pub use path::{generate_paths, Paths, Rotation, PATH_LEN};
pub use player::{default_name, Player, PlayerColor};
pub use state::{Game, Phase};
pub use token::{Token, TokenState, Tokens};
