//! Pointer event model
//!
//! Single-pointer input as delivered by the host, plus the internal event
//! types the gesture state machine reacts to.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// The host took the pointer away (e.g. a parent intercepted the gesture)
    pub const POINTER_CANCEL: EventType = 8;

    // Motion lifecycle events (emitted by the widget itself)
    /// Engine-driven motion started (fling or programmatic set)
    pub const ANIMATE: EventType = 90;
    /// Engine-driven motion reached its final offset
    pub const SETTLED: EventType = 91;

    /// Human readable name for logging
    pub fn name(event: EventType) -> &'static str {
        match event {
            POINTER_DOWN => "pointer_down",
            POINTER_UP => "pointer_up",
            POINTER_MOVE => "pointer_move",
            POINTER_CANCEL => "pointer_cancel",
            ANIMATE => "animate",
            SETTLED => "settled",
            _ => "unknown",
        }
    }
}

/// A pointer event in widget-local coordinates
///
/// `timestamp` is in milliseconds on the same clock the host uses to drive
/// animation frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub event_type: EventType,
    pub x: f32,
    pub y: f32,
    pub timestamp: u64,
}

impl PointerEvent {
    pub const fn new(event_type: EventType, x: f32, y: f32, timestamp: u64) -> Self {
        Self {
            event_type,
            x,
            y,
            timestamp,
        }
    }

    pub const fn down(x: f32, y: f32, timestamp: u64) -> Self {
        Self::new(event_types::POINTER_DOWN, x, y, timestamp)
    }

    pub const fn moved(x: f32, y: f32, timestamp: u64) -> Self {
        Self::new(event_types::POINTER_MOVE, x, y, timestamp)
    }

    pub const fn up(x: f32, y: f32, timestamp: u64) -> Self {
        Self::new(event_types::POINTER_UP, x, y, timestamp)
    }

    pub const fn cancel(x: f32, y: f32, timestamp: u64) -> Self {
        Self::new(event_types::POINTER_CANCEL, x, y, timestamp)
    }

    /// Name of this event's type, for logging
    pub fn name(&self) -> &'static str {
        event_types::name(self.event_type)
    }
}
