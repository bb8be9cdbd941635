//! [`SqliteStore`]: the SQLite implementation of [`PlannerStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tracing::debug;

use duebook_core::{
  assignment::{Assignment, AssignmentId, AssignmentInput, ImageRef},
  store::PlannerStore,
  subject::Subject,
};

use crate::{
  encode::{
    ASSIGNMENT_COLUMNS, RawAssignment, RawSubject, decode_id, encode_date, encode_dt,
    encode_id, encode_images,
  },
  schema::{NEXT_ASSIGNMENT_ID, SCHEMA},
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Duebook store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn subject_exists(conn: &rusqlite::Connection, name: &str) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM subjects WHERE name = ?1",
        rusqlite::params![name],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

fn select_assignment(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<RawAssignment>> {
  conn
    .query_row(
      &format!("SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE id = ?1"),
      rusqlite::params![id],
      RawAssignment::from_row,
    )
    .optional()
}

// ─── PlannerStore impl ───────────────────────────────────────────────────────

impl PlannerStore for SqliteStore {
  type Error = Error;

  // ── Subjects ──────────────────────────────────────────────────────────────

  async fn upsert_subject(&self, subject: Subject) -> Result<Subject> {
    let name = subject.name.clone();
    let color = subject.color.to_string();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO subjects (name, color) VALUES (?1, ?2)
           ON CONFLICT (name) DO UPDATE SET color = excluded.color",
          rusqlite::params![name, color],
        )?;
        Ok(())
      })
      .await?;

    Ok(subject)
  }

  async fn get_subject(&self, name: String) -> Result<Option<Subject>> {
    let raw: Option<RawSubject> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT name, color FROM subjects WHERE name = ?1",
              rusqlite::params![name],
              RawSubject::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSubject::into_subject).transpose()
  }

  async fn list_subjects(&self) -> Result<Vec<Subject>> {
    let raws: Vec<RawSubject> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT name, color FROM subjects ORDER BY name")?;
        let rows = stmt
          .query_map([], RawSubject::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubject::into_subject).collect()
  }

  async fn remove_subject(&self, name: String) -> Result<Vec<Assignment>> {
    let raws: Result<Vec<RawAssignment>> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if !subject_exists(&tx, &name)? {
          return Ok(Err(Error::SubjectNotFound(name)));
        }

        let removed = {
          let mut stmt = tx.prepare(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE subject = ?1 ORDER BY id"
          ))?;
          stmt
            .query_map(rusqlite::params![name], RawAssignment::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        tx.execute(
          "DELETE FROM assignments WHERE subject = ?1",
          rusqlite::params![name],
        )?;
        tx.execute("DELETE FROM subjects WHERE name = ?1", rusqlite::params![name])?;
        tx.commit()?;

        Ok(Ok(removed))
      })
      .await?;

    let removed = raws?
      .into_iter()
      .map(RawAssignment::into_assignment)
      .collect::<Result<Vec<_>>>()?;
    debug!(cascaded = removed.len(), "subject row deleted");
    Ok(removed)
  }

  // ── Assignments ───────────────────────────────────────────────────────────

  async fn reserve_assignment_id(&self) -> Result<AssignmentId> {
    let raw: i64 = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let next: i64 = tx.query_row(
          "SELECT value FROM counters WHERE name = ?1",
          rusqlite::params![NEXT_ASSIGNMENT_ID],
          |r| r.get(0),
        )?;
        tx.execute(
          "UPDATE counters SET value = ?2 WHERE name = ?1",
          rusqlite::params![NEXT_ASSIGNMENT_ID, next + 1],
        )?;
        tx.commit()?;
        Ok(next)
      })
      .await?;

    decode_id(raw)
  }

  async fn insert_assignment(&self, assignment: Assignment) -> Result<Assignment> {
    let id         = encode_id(assignment.id)?;
    let title      = assignment.title.clone();
    let subject    = assignment.subject.clone();
    let due_date   = encode_date(assignment.due_date);
    let memo       = assignment.memo.clone();
    let images     = encode_images(&assignment.images)?;
    let created_at = encode_dt(assignment.created_at);

    let outcome: Result<()> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if !subject_exists(&tx, &subject)? {
          return Ok(Err(Error::SubjectNotFound(subject)));
        }

        tx.execute(
          "INSERT INTO assignments (id, title, subject, due_date, memo, images, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![id, title, subject, due_date, memo, images, created_at],
        )?;
        tx.commit()?;
        Ok(Ok(()))
      })
      .await?;

    outcome?;
    Ok(assignment)
  }

  async fn update_assignment(
    &self,
    id: AssignmentId,
    input: AssignmentInput,
    images: Option<Vec<ImageRef>>,
  ) -> Result<(Assignment, Vec<ImageRef>)> {
    let raw_id       = encode_id(id)?;
    let title        = input.title.clone();
    let subject      = input.subject.clone();
    let due_date     = encode_date(input.due_date);
    let memo         = input.memo.clone();
    let images_json  = images.as_deref().map(encode_images).transpose()?;

    let previous: Result<RawAssignment> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let Some(previous) = select_assignment(&tx, raw_id)? else {
          return Ok(Err(Error::AssignmentNotFound(id)));
        };
        if !subject_exists(&tx, &subject)? {
          return Ok(Err(Error::SubjectNotFound(subject)));
        }

        match images_json {
          Some(images_json) => tx.execute(
            "UPDATE assignments
             SET title = ?2, subject = ?3, due_date = ?4, memo = ?5, images = ?6
             WHERE id = ?1",
            rusqlite::params![raw_id, title, subject, due_date, memo, images_json],
          )?,
          None => tx.execute(
            "UPDATE assignments
             SET title = ?2, subject = ?3, due_date = ?4, memo = ?5
             WHERE id = ?1",
            rusqlite::params![raw_id, title, subject, due_date, memo],
          )?,
        };
        tx.commit()?;
        Ok(Ok(previous))
      })
      .await?;

    let previous = previous?.into_assignment()?;
    let (images, replaced) = match images {
      Some(new) => (new, previous.images),
      None => (previous.images, Vec::new()),
    };

    let updated = Assignment {
      id,
      title: input.title,
      subject: input.subject,
      due_date: input.due_date,
      memo: input.memo,
      images,
      created_at: previous.created_at,
    };
    Ok((updated, replaced))
  }

  async fn delete_assignment(&self, id: AssignmentId) -> Result<Assignment> {
    let raw_id = encode_id(id)?;

    let removed: Option<RawAssignment> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let removed = select_assignment(&tx, raw_id)?;
        if removed.is_some() {
          tx.execute("DELETE FROM assignments WHERE id = ?1", rusqlite::params![raw_id])?;
          tx.commit()?;
        }
        Ok(removed)
      })
      .await?;

    removed
      .ok_or(Error::AssignmentNotFound(id))?
      .into_assignment()
  }

  async fn get_assignment(&self, id: AssignmentId) -> Result<Option<Assignment>> {
    let raw_id = encode_id(id)?;

    let raw: Option<RawAssignment> = self
      .conn
      .call(move |conn| Ok(select_assignment(conn, raw_id)?))
      .await?;

    raw.map(RawAssignment::into_assignment).transpose()
  }

  async fn list_assignments(&self) -> Result<Vec<Assignment>> {
    let raws: Vec<RawAssignment> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ASSIGNMENT_COLUMNS} FROM assignments ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], RawAssignment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAssignment::into_assignment).collect()
  }
}
