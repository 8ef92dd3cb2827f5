use thiserror::Error;

/// Errors reported by a [SkipList](crate::SkipList) and its cursors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipListError {
    #[error("a skip list needs a maximum height of at least 1")]
    ZeroHeight,

    #[error("index {index} is out of range for a skip list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cursor has no value: it is past the end of the skip list")]
    CursorAtEnd,
}

pub type Result<T, E = SkipListError> = core::result::Result<T, E>;
