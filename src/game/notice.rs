use std::collections::VecDeque;

use crate::config::{NOTICE_FRAMES, WIN_NOTICE_FRAMES};

use super::PlayerColor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    TokenFinished {
        player: usize,
        token: usize,
    },
    Captured {
        by: usize,
        victim: usize,
        token: usize,
    },
    PlayerWon {
        player: usize,
    },
    TurnPassed {
        player: usize,
        die: u8,
    },
}

impl GameEvent {
    /// Player whose color the notice is shown in.
    pub fn player(&self) -> usize {
        match *self {
            GameEvent::TokenFinished { player, .. } => player,
            GameEvent::Captured { by, .. } => by,
            GameEvent::PlayerWon { player } => player,
            GameEvent::TurnPassed { player, .. } => player,
        }
    }

    fn frames(&self) -> u16 {
        match self {
            GameEvent::PlayerWon { .. } => WIN_NOTICE_FRAMES,
            _ => NOTICE_FRAMES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub event: GameEvent,
    pub text: String,
    pub color: PlayerColor,
    pub frames_left: u16,
}

#[derive(Debug, Clone, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn push(&mut self, event: GameEvent, text: String, color: PlayerColor) {
        let frames_left = event.frames();
        self.queue.push_back(Notice {
            event,
            text,
            color,
            frames_left,
        });
    }

    /// Advances one frame and drops expired notices.
    pub fn tick(&mut self) {
        for notice in self.queue.iter_mut() {
            notice.frames_left = notice.frames_left.saturating_sub(1);
        }
        self.queue.retain(|n| n.frames_left > 0);
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.queue.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
