//! The `PlannerStore` trait: persistence for subjects and assignments.
//!
//! The trait is implemented by storage backends (e.g. `duebook-store-sqlite`).
//! The [`Planner`](crate::planner::Planner) and everything above it depend on
//! this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  assignment::{Assignment, AssignmentId, AssignmentInput, ImageRef},
  subject::Subject,
};

/// Abstraction over a Duebook storage backend.
///
/// Every mutating method must be atomic and durable: either the whole change
/// is committed before the future resolves `Ok`, or nothing is. Backends do
/// not validate field shapes (the planner does that) but they do enforce the
/// subject foreign key inside the same transaction as the write, so a
/// concurrent subject removal cannot leave a dangling assignment behind.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PlannerStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Subjects ──────────────────────────────────────────────────────────

  /// Insert the subject, or overwrite the color of an existing one.
  fn upsert_subject(
    &self,
    subject: Subject,
  ) -> impl Future<Output = Result<Subject, Self::Error>> + Send + '_;

  /// Retrieve a subject by name. Returns `None` if not found.
  fn get_subject(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Option<Subject>, Self::Error>> + Send + '_;

  /// List all subjects, ordered by name.
  fn list_subjects(
    &self,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;

  /// Delete a subject together with every assignment that references it, in
  /// one transaction. Returns the removed assignments so their images can be
  /// released by the caller.
  fn remove_subject(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Vec<Assignment>, Self::Error>> + Send + '_;

  // ── Assignments ───────────────────────────────────────────────────────

  /// Durably advance the id counter and return the id it pointed at.
  ///
  /// A reserved id is never handed out again, even if the assignment it was
  /// reserved for is never inserted.
  fn reserve_assignment_id(
    &self,
  ) -> impl Future<Output = Result<AssignmentId, Self::Error>> + Send + '_;

  /// Append a fully-built assignment whose id came from
  /// [`reserve_assignment_id`](Self::reserve_assignment_id).
  fn insert_assignment(
    &self,
    assignment: Assignment,
  ) -> impl Future<Output = Result<Assignment, Self::Error>> + Send + '_;

  /// Replace the editable fields of an assignment. When `images` is `Some`,
  /// the image list is swapped and the previous references are returned;
  /// otherwise the stored images are kept and the returned list is empty.
  fn update_assignment(
    &self,
    id: AssignmentId,
    input: AssignmentInput,
    images: Option<Vec<ImageRef>>,
  ) -> impl Future<Output = Result<(Assignment, Vec<ImageRef>), Self::Error>>
  + Send
  + '_;

  /// Remove an assignment and return the removed record.
  fn delete_assignment(
    &self,
    id: AssignmentId,
  ) -> impl Future<Output = Result<Assignment, Self::Error>> + Send + '_;

  /// Retrieve an assignment by id. Returns `None` if not found.
  fn get_assignment(
    &self,
    id: AssignmentId,
  ) -> impl Future<Output = Result<Option<Assignment>, Self::Error>> + Send + '_;

  /// All assignments in insertion order.
  fn list_assignments(
    &self,
  ) -> impl Future<Output = Result<Vec<Assignment>, Self::Error>> + Send + '_;
}
