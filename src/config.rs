// Shared game/UI constants.
pub const BOARD_TILES: u8 = 15;
pub const BOARD_MAX: u8 = BOARD_TILES - 1;
pub const TOKENS_PER_PLAYER: usize = 4;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub const DIE_FACES: u8 = 6;
pub const CELL_W: u16 = 4; // each tile is four characters wide
pub const CELL_H: u16 = 2;
pub const BOARD_PX_W: u16 = BOARD_TILES as u16 * CELL_W;
pub const BOARD_PX_H: u16 = BOARD_TILES as u16 * CELL_H;
pub const SIDEBAR_W: u16 = 30;
// Board plus sidebar plus cabinet border.
pub const MIN_PANE_WIDTH: u16 = BOARD_PX_W + SIDEBAR_W + 2;
pub const FRAME_MS: u64 = 33;
pub const ROLL_FRAMES: u8 = 20;
pub const NOTICE_FRAMES: u16 = 60;
pub const WIN_NOTICE_FRAMES: u16 = 180;
