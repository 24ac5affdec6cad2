//! Tag Store - Identity assignment and ownership of tag records.
//!
//! Tags are kept in a `BTreeMap` keyed by [`TagId`]:
//! - ids come from a monotonic counter and are never reused
//! - iteration is ascending id, which is insertion order
//! - removal leaves a gap; nothing is renumbered
//!
//! The store is the only owner of tag records. Everything else refers to
//! tags by id and tolerates ids that have since been removed.

use std::collections::BTreeMap;

use log::trace;

use crate::error::{Result, TagError};
use crate::types::{Rect, TagId};

// =============================================================================
// Tag
// =============================================================================

/// A single tag chip.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag<D = ()> {
    pub id: TagId,
    /// Always prefixed unless the field was cleared. During an edit the
    /// character limit applies only once the refit debounce fires.
    pub text: String,
    pub user_data: Option<D>,
    /// Container-local frame from the last refit and layout pass.
    pub frame: Rect,
}

// =============================================================================
// Store
// =============================================================================

/// Id-ordered collection of tags with a live-count ceiling.
#[derive(Debug, Clone)]
pub struct TagStore<D = ()> {
    tags: BTreeMap<TagId, Tag<D>>,
    next_id: u64,
    max_count: usize,
}

impl<D> TagStore<D> {
    pub fn new(max_count: usize) -> Self {
        Self {
            tags: BTreeMap::new(),
            next_id: 0,
            max_count,
        }
    }

    /// Add a tag and return its id.
    ///
    /// Fails with [`TagError::CapacityExceeded`] when the live count is
    /// already at the maximum. A refused add does not consume an id.
    pub fn add(&mut self, text: impl Into<String>, user_data: Option<D>) -> Result<TagId> {
        if self.tags.len() >= self.max_count {
            return Err(TagError::CapacityExceeded {
                max: self.max_count,
            });
        }

        let id = TagId(self.next_id);
        self.next_id += 1;
        self.tags.insert(
            id,
            Tag {
                id,
                text: text.into(),
                user_data,
                frame: Rect::default(),
            },
        );
        trace!("store: added {id} ({} live)", self.tags.len());
        Ok(id)
    }

    /// Remove a tag. Absent ids are a no-op.
    pub fn remove(&mut self, id: TagId) -> Option<Tag<D>> {
        let removed = self.tags.remove(&id);
        if removed.is_none() {
            trace!("store: remove of stale {id} ignored");
        }
        removed
    }

    /// Remove every tag. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn get(&self, id: TagId) -> Option<&Tag<D>> {
        self.tags.get(&id)
    }

    pub fn get_mut(&mut self, id: TagId) -> Option<&mut Tag<D>> {
        self.tags.get_mut(&id)
    }

    pub fn contains(&self, id: TagId) -> bool {
        self.tags.contains_key(&id)
    }

    /// Replace a tag's text.
    pub fn set_text(&mut self, id: TagId, text: impl Into<String>) -> Result<()> {
        let tag = self
            .tags
            .get_mut(&id)
            .ok_or(TagError::InvalidReference(id))?;
        tag.text = text.into();
        Ok(())
    }

    /// Replace a tag's frame.
    pub fn set_frame(&mut self, id: TagId, frame: Rect) -> Result<()> {
        let tag = self
            .tags
            .get_mut(&id)
            .ok_or(TagError::InvalidReference(id))?;
        tag.frame = frame;
        Ok(())
    }

    /// Tags in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag<D>> {
        self.tags.values()
    }

    /// Tags in ascending id order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tag<D>> {
        self.tags.values_mut()
    }

    /// Live ids in ascending order.
    pub fn ids(&self) -> Vec<TagId> {
        self.tags.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Change the ceiling. Lowering it below the live count removes nothing;
    /// it only refuses further adds.
    pub fn set_max_count(&mut self, max_count: usize) {
        self.max_count = max_count;
    }

    /// True while another add would succeed.
    pub fn has_capacity(&self) -> bool {
        self.tags.len() < self.max_count
    }
}

impl<D> Default for TagStore<D> {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_TAG_COUNT)
    }
}
