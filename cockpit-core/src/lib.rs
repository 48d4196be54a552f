//! PitWall Cockpit Core Library
//!
//! This crate provides the race state model, unit types and the seams
//! (tickers, random sources, announcer, task store) shared by the
//! simulation and the server.

pub mod announcer;
pub mod format;
pub mod model;
pub mod random;
pub mod task;
pub mod ticker;
pub mod units;

pub use announcer::{Announcer, VoiceHint};
pub use model::{FieldMask, RaceSnapshot};
pub use random::TargetSource;
pub use task::{StoreError, TaskStore};
pub use ticker::Ticker;
