//! # spark-tags
//!
//! Tag-chip editor engine: flow layout, editing state and host wiring for a
//! wrapping set of short prefixed labels.
//!
//! Observable state is published through
//! [spark-signals](https://github.com/RLabs-Inc/spark-signals).
//!
//! ## Architecture
//!
//! The engine draws nothing. It owns the tags and computes where they go;
//! the host measures text, owns focus and puts things on screen:
//!
//! ```text
//! gesture → EditingController → TagStore text → TagSizer refit
//!         → compute_flow → PlacementSink + signals + delegate
//! ```
//!
//! Every layout pass is total and deterministic. Deferred work (the refit
//! debounce after typing, the selection pulse after a tap) is held as plain
//! deadlines and fired by [`TagView::tick`].
//!
//! ## Modules
//!
//! - [`types`] - Geometry, colors, fonts, tag ids
//! - [`config`] - Construction options
//! - [`engine`] - Tag store
//! - [`layout`] - Text measurement, tag sizing, flow layout
//! - [`state`] - Editing state machine, timers, focus, terminal input
//! - [`host`] - Traits the host implements
//! - [`primitives`] - The [`TagView`] component

pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod layout;
pub mod primitives;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{TagViewConfig, TagViewOption};

pub use engine::{Tag, TagStore};

pub use error::{Result, TagError};

pub use host::{FocusControl, PlacementSink, TagViewDelegate, TextMeasure};

pub use layout::{compute_flow, string_width, ComputedFlow, FlowInput, MonospaceMeasure, TagSizer};

pub use primitives::{CharCounter, TagView, TagViewSignals};

pub use state::{EditPhase, EditOutcome, TimerKind};
