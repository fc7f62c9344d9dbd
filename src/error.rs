//! Error types for element handling and selection.

use thiserror::Error;

use crate::ops::ReflectCloneError;

/// An error produced while reading or writing an element's value.
#[derive(Debug, Error)]
pub enum HandlingError {
    /// The element has no readable access path.
    #[error("element `{element}` of `{container}` cannot be read")]
    Unreadable {
        element: String,
        container: &'static str,
    },

    /// The element has no writable access path, or is marked read-only.
    #[error("element `{element}` of `{container}` cannot be written")]
    Unwritable {
        element: String,
        container: &'static str,
    },

    /// The element cannot hand out references into its container.
    ///
    /// Computed elements, such as properties and result-set columns, fall
    /// into this category.
    #[error("element `{element}` does not project into its container")]
    NotProjectable { element: String },

    /// A value of the wrong type was supplied.
    #[error("expected a value of type `{expected}`, received `{received}`")]
    MismatchedTypes {
        expected: &'static str,
        received: &'static str,
    },

    /// An intermediate or final value was absent.
    #[error("no value present for element `{element}`")]
    MissingValue { element: String },

    /// Cloning a value during traversal failed.
    #[error(transparent)]
    Clone(#[from] ReflectCloneError),

    /// A source-specific failure, such as an exhausted cursor.
    #[error("{0}")]
    Other(String),
}

/// An error produced by the high-level element API.
#[derive(Debug, Error)]
pub enum ElementError {
    /// A value operation was attempted on an element that is not attached
    /// to any target.
    #[error("element `{0}` is not specific to any target")]
    NonSpecific(String),

    /// The underlying read or write failed.
    #[error(transparent)]
    Handling(#[from] HandlingError),
}

/// An error produced while selecting members reflectively.
#[derive(Debug, Error)]
pub enum ReflectionError {
    /// A single-member selection matched more than one candidate.
    #[error("selection in `{container}` matched {count} members, expected at most one")]
    AmbiguousMatch {
        container: &'static str,
        count: usize,
    },

    /// A member invocation failed.
    #[error(transparent)]
    Handling(#[from] HandlingError),
}
