//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, due dates as `YYYY-MM-DD`, and
//! image reference lists as compact JSON arrays.

use chrono::{DateTime, NaiveDate, Utc};
use duebook_core::{
  assignment::{Assignment, AssignmentId, ImageRef},
  subject::{Color, Subject},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {s:?}: {e}")))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::Decode(format!("due date {s:?}: {e}")))
}

// ─── AssignmentId ────────────────────────────────────────────────────────────

pub fn encode_id(id: AssignmentId) -> Result<i64> {
  i64::try_from(id.0).map_err(|_| Error::Decode(format!("id {id} out of range")))
}

pub fn decode_id(raw: i64) -> Result<AssignmentId> {
  u64::try_from(raw)
    .map(AssignmentId)
    .map_err(|_| Error::Decode(format!("negative id {raw}")))
}

// ─── Images ──────────────────────────────────────────────────────────────────

pub fn encode_images(images: &[ImageRef]) -> Result<String> {
  Ok(serde_json::to_string(images)?)
}

pub fn decode_images(s: &str) -> Result<Vec<ImageRef>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `assignments` row.
pub struct RawAssignment {
  pub id:         i64,
  pub title:      String,
  pub subject:    String,
  pub due_date:   String,
  pub memo:       String,
  pub images:     String,
  pub created_at: String,
}

/// Column list matching the field order of [`RawAssignment::from_row`].
pub const ASSIGNMENT_COLUMNS: &str =
  "id, title, subject, due_date, memo, images, created_at";

impl RawAssignment {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      title:      row.get(1)?,
      subject:    row.get(2)?,
      due_date:   row.get(3)?,
      memo:       row.get(4)?,
      images:     row.get(5)?,
      created_at: row.get(6)?,
    })
  }

  pub fn into_assignment(self) -> Result<Assignment> {
    Ok(Assignment {
      id:         decode_id(self.id)?,
      title:      self.title,
      subject:    self.subject,
      due_date:   decode_date(&self.due_date)?,
      memo:       self.memo,
      images:     decode_images(&self.images)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `subjects` row.
pub struct RawSubject {
  pub name:  String,
  pub color: String,
}

impl RawSubject {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { name: row.get(0)?, color: row.get(1)? })
  }

  pub fn into_subject(self) -> Result<Subject> {
    let color = Color::parse(&self.color)
      .map_err(|e| Error::Decode(format!("subject {:?}: {e}", self.name)))?;
    Ok(Subject { name: self.name, color })
  }
}
