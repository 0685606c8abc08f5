//! Shared error type for scene-side helpers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown scene node id {0}")]
    UnknownNode(usize),
    #[error("Duplicate scene node name '{0}'")]
    DuplicateName(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
