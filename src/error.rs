use thiserror::Error;

/// Navigation errors surfaced synchronously to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Navigation was attempted on a collection with no items.
    #[error("cannot navigate an empty collection")]
    EmptyCollection,

    /// A jump target lies outside the collection.
    #[error("index {index} is out of range for a collection of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}
