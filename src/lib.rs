//! Debounced pushbutton with click, double click and long click detection.
//!
//! The classifier is polled from a cooperative main loop. Every poll reads one
//! raw pin level, compares it with the previous one and runs three timers
//! against the detected edges:
//!
//! - presses shorter than the debounce window are bounce and ignored,
//! - presses longer than the long-click threshold are reported on release,
//! - everything in between is a click that is held back until either the
//!   double-click gap runs out (single click) or a second click arrives.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod button;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod level;
pub mod shared;

pub use button::button::{ButtonState, DebouncedButton};
pub use clock::clock::{elapsed_ms, Clock, Interval, Pulse, SimClock};
pub use config::config::ClickTimings;
pub use error::error::ConfigError;
pub use event::event::{Callbacks, ClickEvent, EventQueue, EventSink};
pub use level::level::{LevelFn, TryLevelFn};
pub use shared::shared::SharedButton;
