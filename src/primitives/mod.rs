//! Primitives - The tag view component.
//!
//! - [`TagView`] - Tag editor: store, editing, layout and host wiring
//! - [`CharCounter`] - The `count / max` indicator under the focused tag
//! - [`TagViewSignals`] - Reactive view state for hosts built on spark-signals
//!
//! # Reactivity
//!
//! Signals are updated at the end of every layout pass, so a derived value
//! over `layout_pass` re-runs exactly once per pass:
//!
//! ```ignore
//! let signals = view.signals().clone();
//! let height = derived(move || {
//!     signals.layout_pass.get();
//!     signals.container.get().height
//! });
//! ```

mod tag_view;
mod types;

pub use tag_view::TagView;
pub use types::*;
