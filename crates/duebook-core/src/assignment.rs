//! Assignment types: a single trackable task or exam with a due date.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, subject::normalize_name};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Store-assigned identifier. Strictly increasing, never reused.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AssignmentId(pub u64);

impl fmt::Display for AssignmentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Images ──────────────────────────────────────────────────────────────────

/// An opaque reference to a stored image blob. No binary data lives in the
/// assignment record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ImageRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// A raw uploaded file, before it has been handed to an
/// [`AssetStore`](crate::assets::AssetStore).
#[derive(Debug, Clone)]
pub struct ImageUpload {
  pub filename: String,
  pub bytes:    Vec<u8>,
}

// ─── Assignment ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
  pub id:         AssignmentId,
  pub title:      String,
  /// Name of the owning subject.
  pub subject:    String,
  pub due_date:   NaiveDate,
  pub memo:       String,
  pub images:     Vec<ImageRef>,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// The editable fields of an assignment, as supplied by the input layer to
/// both create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentInput {
  pub title:    String,
  pub subject:  String,
  pub due_date: NaiveDate,
  #[serde(default)]
  pub memo:     String,
}

impl AssignmentInput {
  pub fn new(title: &str, subject: &str, due_date: NaiveDate) -> Self {
    Self {
      title: title.to_owned(),
      subject: subject.to_owned(),
      due_date,
      memo: String::new(),
    }
  }

  pub fn with_memo(mut self, memo: &str) -> Self {
    self.memo = memo.to_owned();
    self
  }

  /// Trim the text fields and reject an empty title or subject.
  ///
  /// Whether the subject actually exists is checked by the store, inside the
  /// same transaction as the write.
  pub fn normalized(self) -> Result<Self> {
    let title = self.title.trim();
    if title.is_empty() {
      return Err(Error::Validation("title must not be empty".into()));
    }
    Ok(Self {
      title:    title.to_owned(),
      subject:  normalize_name(&self.subject)?,
      due_date: self.due_date,
      memo:     self.memo.trim().to_owned(),
    })
  }
}
