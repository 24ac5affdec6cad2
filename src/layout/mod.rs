//! Layout Module
//!
//! Geometry for the tag view.
//!
//! # Architecture
//!
//! 1. [`text_measure`] gives display widths and a default monospace measure
//! 2. [`sizer`] turns tag text into a padded box size (prefix policy,
//!    character limits, measurement fallback)
//! 3. [`flow`] packs the boxes into wrapping rows and sizes the container
//!
//! A pass is total: every tag is placed again from scratch on each call.
//!
//! # Example
//!
//! ```
//! use spark_tags::layout::{compute_flow, FlowInput};
//! use spark_tags::types::{Rect, Size};
//!
//! let items = [Size::new(20.0, 10.0), Size::new(30.0, 10.0)];
//! let flow = compute_flow(&FlowInput {
//!     items: &items,
//!     container: Rect::new(0.0, 0.0, 100.0, 40.0),
//!     outer_margin: 5.0,
//!     add_button: None,
//!     auto_grow: true,
//! });
//! assert_eq!(flow.frames[1].x, 30.0);
//! ```

mod types;
pub mod flow;
pub mod sizer;
pub mod text_measure;

pub use types::*;
pub use flow::compute_flow;
pub use sizer::TagSizer;
pub use text_measure::{string_width, MonospaceMeasure};
