//! Resize handles

use serde::{Deserialize, Serialize};

/// One of the eight resize handles around a window frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    /// All handles, clockwise from the top
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::NE,
        ResizeHandle::E,
        ResizeHandle::SE,
        ResizeHandle::S,
        ResizeHandle::SW,
        ResizeHandle::W,
        ResizeHandle::NW,
    ];

    /// Parse the direction string used by frame chrome ("n", "se", ...)
    pub fn from_direction(direction: &str) -> Option<Self> {
        let handle = match direction {
            "n" => ResizeHandle::N,
            "s" => ResizeHandle::S,
            "e" => ResizeHandle::E,
            "w" => ResizeHandle::W,
            "ne" => ResizeHandle::NE,
            "nw" => ResizeHandle::NW,
            "se" => ResizeHandle::SE,
            "sw" => ResizeHandle::SW,
            _ => return None,
        };
        Some(handle)
    }

    /// Direction string for this handle
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeHandle::N => "n",
            ResizeHandle::S => "s",
            ResizeHandle::E => "e",
            ResizeHandle::W => "w",
            ResizeHandle::NE => "ne",
            ResizeHandle::NW => "nw",
            ResizeHandle::SE => "se",
            ResizeHandle::SW => "sw",
        }
    }

    /// Handle moves the top edge
    pub fn north(self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW)
    }

    /// Handle moves the bottom edge
    pub fn south(self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::SE | ResizeHandle::SW)
    }

    /// Handle moves the right edge
    pub fn east(self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE)
    }

    /// Handle moves the left edge
    pub fn west(self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }
}

impl std::fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
