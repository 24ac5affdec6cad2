use thiserror::Error;

use crate::types::TagId;

/// Failures inside the tag engine.
///
/// None of these reach the host as panics: the view logs them and turns the
/// offending operation into a no-op (or a fallback size for measurement).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TagError {
    #[error("tag capacity exceeded ({max} tags)")]
    CapacityExceeded { max: usize },

    #[error("no live tag with id {0}")]
    InvalidReference(TagId),

    #[error("{0} is already being edited")]
    EditInProgress(TagId),

    #[error("text measurement unavailable for {text:?}")]
    MeasurementUnavailable { text: String },
}

pub type Result<T> = std::result::Result<T, TagError>;
