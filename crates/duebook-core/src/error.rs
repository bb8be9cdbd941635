//! Error types for `duebook-core`.

use thiserror::Error;

use crate::assignment::AssignmentId;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field was missing or malformed. Nothing was changed.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("subject not found: {0:?}")]
  SubjectNotFound(String),

  #[error("assignment not found: {0}")]
  AssignmentNotFound(AssignmentId),

  /// A persistence or blob write failed; the mutation was not committed.
  #[error("storage error: {0}")]
  Storage(String),
}

impl Error {
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::SubjectNotFound(_) | Self::AssignmentNotFound(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
