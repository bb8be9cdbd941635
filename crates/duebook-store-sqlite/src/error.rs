//! Error type for `duebook-store-sqlite`.

use duebook_core::assignment::AssignmentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored column could not be decoded into its domain type.
  #[error("decode error: {0}")]
  Decode(String),

  #[error("subject not found: {0:?}")]
  SubjectNotFound(String),

  #[error("assignment not found: {0}")]
  AssignmentNotFound(AssignmentId),
}

impl From<Error> for duebook_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::SubjectNotFound(name) => Self::SubjectNotFound(name),
      Error::AssignmentNotFound(id) => Self::AssignmentNotFound(id),
      other => Self::Storage(other.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
