//! pointer and keyboard events delivered to wires

use flagset::flags;
use serde::{Deserialize, Serialize};

use crate::transforms::PxPoint;

flags! {
    /// kinds of listener a wire can hold on the surface
    pub enum EventKind: u8 {
        MouseOver,
        MouseLeave,
        KeyDown,
        MouseMove,
    }
}

/// keys as reported by the host event loop
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Char(char),
    Named(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WireEvent {
    MouseOver(PxPoint),
    MouseLeave,
    MouseMove(PxPoint),
    KeyDown(Key),
}

impl WireEvent {
    /// the listener kind that must be live for this event to reach a wire
    pub fn kind(&self) -> EventKind {
        match self {
            WireEvent::MouseOver(_) => EventKind::MouseOver,
            WireEvent::MouseLeave => EventKind::MouseLeave,
            WireEvent::MouseMove(_) => EventKind::MouseMove,
            WireEvent::KeyDown(_) => EventKind::KeyDown,
        }
    }
}

/// whether a wire consumed an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Captured,
    Ignored,
}
