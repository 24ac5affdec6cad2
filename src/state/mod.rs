//! State Module - Runtime state of the tag view
//!
//! - **Editing** - Phase machine over the active tag field
//! - **Timers** - Fire-once deadlines (refit debounce, selection pulse)
//! - **Focus** - Which tag field holds input focus
//! - **Input** - crossterm event conversion and routing

mod editing;
mod focus;
pub mod input;
mod timers;

pub use editing::*;
pub use focus::*;
pub use timers::*;
