//! Ruler Core Runtime
//!
//! This crate provides the foundational primitives shared by the ruler
//! picker crates:
//!
//! - **Pointer Events**: Single-pointer press/move/release/cancel input
//! - **State Machines**: Typed finite state machines for gesture states
//! - **Errors**: Configuration error taxonomy
//!
//! # Example
//!
//! ```rust
//! use ruler_core::events::{event_types, PointerEvent};
//! use ruler_core::fsm::{StateMachine, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Press {
//!     Up,
//!     Down,
//! }
//!
//! impl StateTransitions for Press {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Press::Up, event_types::POINTER_DOWN) => Some(Press::Down),
//!             (Press::Down, event_types::POINTER_UP) => Some(Press::Up),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut fsm = StateMachine::new(Press::Up);
//! let event = PointerEvent::down(10.0, 0.0, 0);
//! fsm.send(event.event_type);
//! assert!(fsm.is_in(Press::Down));
//! ```

pub mod error;
pub mod events;
pub mod fsm;

pub use error::{Result, RulerError};
pub use events::{EventType, PointerEvent};
pub use fsm::{StateMachine, StateTransitions};
