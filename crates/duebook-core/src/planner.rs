//! [`Planner`]: the subject registry and assignment store operations.
//!
//! The planner validates input, then drives a [`PlannerStore`] for records and
//! an [`AssetStore`] for image blobs. Record writes are atomic in the store;
//! blob writes happen outside of them, so every path that fails after blobs
//! were written releases them again, and blobs belonging to a removed record
//! are released only after the removal has been committed.

use chrono::Utc;
use tracing::{debug, info};

use crate::{
  Error, Result,
  assets::AssetStore,
  assignment::{Assignment, AssignmentId, AssignmentInput, ImageUpload},
  store::PlannerStore,
  subject::{Color, Subject, SubjectColors, normalize_name},
};

pub struct Planner<S, A> {
  store:  S,
  assets: A,
}

impl<S, A> Planner<S, A>
where
  S: PlannerStore,
  A: AssetStore,
{
  pub fn new(store: S, assets: A) -> Self { Self { store, assets } }

  pub fn store(&self) -> &S { &self.store }

  pub fn assets(&self) -> &A { &self.assets }

  // ── Subjects ──────────────────────────────────────────────────────────────

  /// Register a subject, or overwrite the color of an existing one.
  pub async fn add_or_update_subject(&self, name: &str, color: &str) -> Result<Subject> {
    let subject = Subject::new(name, color)?;
    let subject = self.store.upsert_subject(subject).await.map_err(Into::<Error>::into)?;
    info!(subject = %subject.name, color = %subject.color, "subject saved");
    Ok(subject)
  }

  /// Remove a subject and every assignment that references it.
  ///
  /// Returns the removed assignments. Their images are released once the
  /// removal is committed.
  pub async fn remove_subject(&self, name: &str) -> Result<Vec<Assignment>> {
    let name = normalize_name(name)?;
    let removed = self
      .store
      .remove_subject(name.clone())
      .await
      .map_err(Into::<Error>::into)?;

    let images = removed.iter().flat_map(|a| a.images.iter().cloned()).collect();
    self.assets.release(images).await;

    info!(subject = %name, assignments = removed.len(), "subject removed");
    Ok(removed)
  }

  /// The subject's color, or [`Color::FALLBACK`] if it no longer exists.
  pub async fn color_of(&self, name: &str) -> Result<Color> {
    let subject = self
      .store
      .get_subject(name.trim().to_owned())
      .await
      .map_err(Into::<Error>::into)?;
    Ok(subject.map_or_else(Color::fallback, |s| s.color))
  }

  pub async fn subjects(&self) -> Result<Vec<Subject>> {
    self.store.list_subjects().await.map_err(Into::into)
  }

  pub async fn subject_colors(&self) -> Result<SubjectColors> {
    Ok(SubjectColors::from_subjects(&self.subjects().await?))
  }

  // ── Assignments ───────────────────────────────────────────────────────────

  /// Register a new assignment and store its images under the new id.
  pub async fn create(
    &self,
    input: AssignmentInput,
    images: Vec<ImageUpload>,
  ) -> Result<Assignment> {
    let input = input.normalized()?;
    self.require_subject(&input.subject).await?;

    let id = self.store.reserve_assignment_id().await.map_err(Into::<Error>::into)?;
    let image_refs = self.assets.store(id, images).await.map_err(Into::<Error>::into)?;

    let assignment = Assignment {
      id,
      title: input.title,
      subject: input.subject,
      due_date: input.due_date,
      memo: input.memo,
      images: image_refs.clone(),
      created_at: Utc::now(),
    };

    match self.store.insert_assignment(assignment).await {
      Ok(assignment) => {
        info!(
          assignment_id = %assignment.id,
          subject = %assignment.subject,
          due_date = %assignment.due_date,
          images = assignment.images.len(),
          "assignment created",
        );
        Ok(assignment)
      }
      Err(e) => {
        self.assets.release(image_refs).await;
        Err(as_validation(e.into()))
      }
    }
  }

  /// Replace the editable fields of an assignment.
  ///
  /// When `images` is empty the stored images are kept. Otherwise the new
  /// images replace the old ones wholesale and the old blobs are released.
  pub async fn update(
    &self,
    id: AssignmentId,
    input: AssignmentInput,
    images: Vec<ImageUpload>,
  ) -> Result<Assignment> {
    if self.store.get_assignment(id).await.map_err(Into::<Error>::into)?.is_none() {
      return Err(Error::AssignmentNotFound(id));
    }
    let input = input.normalized()?;
    self.require_subject(&input.subject).await?;

    let new_images = if images.is_empty() {
      None
    } else {
      Some(self.assets.store(id, images).await.map_err(Into::<Error>::into)?)
    };

    match self
      .store
      .update_assignment(id, input, new_images.clone())
      .await
    {
      Ok((assignment, replaced)) => {
        debug!(assignment_id = %id, released = replaced.len(), "images replaced");
        self.assets.release(replaced).await;
        info!(assignment_id = %id, "assignment updated");
        Ok(assignment)
      }
      Err(e) => {
        if let Some(refs) = new_images {
          self.assets.release(refs).await;
        }
        Err(as_validation(e.into()))
      }
    }
  }

  /// Remove an assignment and release its images.
  pub async fn delete(&self, id: AssignmentId) -> Result<Assignment> {
    let removed = self.store.delete_assignment(id).await.map_err(Into::<Error>::into)?;
    self.assets.release(removed.images.clone()).await;
    info!(assignment_id = %id, "assignment deleted");
    Ok(removed)
  }

  pub async fn get(&self, id: AssignmentId) -> Result<Assignment> {
    self
      .store
      .get_assignment(id)
      .await
      .map_err(Into::<Error>::into)?
      .ok_or(Error::AssignmentNotFound(id))
  }

  /// Snapshot of every assignment, in insertion order.
  pub async fn all(&self) -> Result<Vec<Assignment>> {
    self.store.list_assignments().await.map_err(Into::into)
  }

  async fn require_subject(&self, name: &str) -> Result<()> {
    match self.store.get_subject(name.to_owned()).await.map_err(Into::<Error>::into)? {
      Some(_) => Ok(()),
      None => Err(unknown_subject(name)),
    }
  }
}

fn unknown_subject(name: &str) -> Error {
  Error::Validation(format!("unknown subject: {name:?}"))
}

/// A subject that vanished between the planner's check and the store's write
/// is still an input error for create and update.
fn as_validation(e: Error) -> Error {
  match e {
    Error::SubjectNotFound(name) => unknown_subject(&name),
    other => other,
  }
}
