//! Tag Engine - Ownership of tag records.
//!
//! The engine holds the one authoritative copy of every tag:
//! - Store: id assignment, capacity, ordered iteration
//!
//! Layout and editing never keep copies of tags. They borrow the store for
//! the length of one pass and otherwise hold ids.

pub mod store;

pub use store::*;
