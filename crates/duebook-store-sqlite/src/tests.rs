//! Integration tests for `SqliteStore` against in-memory and on-disk databases.

use chrono::{NaiveDate, TimeZone, Utc};
use duebook_assets::FsAssetStore;
use duebook_core::{
  assets::AssetStore,
  assignment::{Assignment, AssignmentId, AssignmentInput, ImageRef, ImageUpload},
  planner::Planner,
  store::PlannerStore,
  subject::Subject,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

fn subject(name: &str, color: &str) -> Subject { Subject::new(name, color).unwrap() }

async fn insert(s: &SqliteStore, title: &str, subject: &str, due: &str) -> Assignment {
  let id = s.reserve_assignment_id().await.unwrap();
  s.insert_assignment(Assignment {
    id,
    title: title.into(),
    subject: subject.into(),
    due_date: date(due),
    memo: String::new(),
    images: vec![],
    created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
  })
  .await
  .unwrap()
}

// ─── Subjects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_overwrites_color() {
  let s = store().await;
  s.upsert_subject(subject("Math", "#ff0000")).await.unwrap();
  s.upsert_subject(subject("Math", "#00ff00")).await.unwrap();

  let fetched = s.get_subject("Math".into()).await.unwrap().unwrap();
  assert_eq!(fetched.color.as_str(), "#00FF00");
  assert_eq!(s.list_subjects().await.unwrap().len(), 1);
}

#[tokio::test]
async fn get_subject_missing_returns_none() {
  let s = store().await;
  assert!(s.get_subject("History".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_subjects_ordered_by_name() {
  let s = store().await;
  for name in ["Science", "Art", "Math"] {
    s.upsert_subject(subject(name, "#123456")).await.unwrap();
  }
  let names: Vec<String> = s
    .list_subjects()
    .await
    .unwrap()
    .into_iter()
    .map(|s| s.name)
    .collect();
  assert_eq!(names, ["Art", "Math", "Science"]);
}

#[tokio::test]
async fn remove_subject_cascades_to_its_assignments_only() {
  let s = store().await;
  s.upsert_subject(subject("Math", "#ff0000")).await.unwrap();
  s.upsert_subject(subject("Art", "#00ff00")).await.unwrap();
  insert(&s, "hw1", "Math", "2025-06-10").await;
  insert(&s, "hw2", "Math", "2025-06-11").await;
  insert(&s, "sketch", "Art", "2025-06-12").await;

  let removed = s.remove_subject("Math".into()).await.unwrap();
  let removed_ids: Vec<AssignmentId> = removed.iter().map(|a| a.id).collect();
  assert_eq!(removed_ids, [AssignmentId(1), AssignmentId(2)]);

  let left = s.list_assignments().await.unwrap();
  assert_eq!(left.len(), 1);
  assert_eq!(left[0].id, AssignmentId(3));
  assert!(s.get_subject("Math".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn remove_missing_subject_fails() {
  let s = store().await;
  let err = s.remove_subject("Ghost".into()).await.unwrap_err();
  assert!(matches!(err, Error::SubjectNotFound(ref n) if n == "Ghost"));
}

// ─── Assignments ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_requires_existing_subject() {
  let s = store().await;
  let id = s.reserve_assignment_id().await.unwrap();
  let err = s
    .insert_assignment(Assignment {
      id,
      title: "orphan".into(),
      subject: "Nowhere".into(),
      due_date: date("2025-06-10"),
      memo: String::new(),
      images: vec![],
      created_at: Utc::now(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::SubjectNotFound(_)));
  assert!(s.list_assignments().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_returns_inserted_fields() {
  let s = store().await;
  s.upsert_subject(subject("Science", "#abcdef")).await.unwrap();
  let id = s.reserve_assignment_id().await.unwrap();
  let original = Assignment {
    id,
    title: "Lab report".into(),
    subject: "Science".into(),
    due_date: date("2025-06-10"),
    memo: "bring goggles".into(),
    images: vec![ImageRef("1_x_0_a.png".into()), ImageRef("1_x_1_b.png".into())],
    created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap(),
  };
  s.insert_assignment(original.clone()).await.unwrap();

  let fetched = s.get_assignment(id).await.unwrap().unwrap();
  assert_eq!(fetched, original);
  assert!(s.get_assignment(AssignmentId(99)).await.unwrap().is_none());
}

#[tokio::test]
async fn update_keeps_or_replaces_images() {
  let s = store().await;
  s.upsert_subject(subject("Math", "#ff0000")).await.unwrap();
  s.upsert_subject(subject("Art", "#00ff00")).await.unwrap();
  let id = s.reserve_assignment_id().await.unwrap();
  let old = vec![ImageRef("1_x_0_old.png".into())];
  let created = s
    .insert_assignment(Assignment {
      id,
      title: "hw".into(),
      subject: "Math".into(),
      due_date: date("2025-06-10"),
      memo: String::new(),
      images: old.clone(),
      created_at: Utc::now(),
    })
    .await
    .unwrap();

  let input = AssignmentInput::new("hw v2", "Art", date("2025-06-12")).with_memo("m");
  let (updated, replaced) = s.update_assignment(id, input, None).await.unwrap();
  assert_eq!(updated.title, "hw v2");
  assert_eq!(updated.subject, "Art");
  assert_eq!(updated.memo, "m");
  assert_eq!(updated.images, old);
  assert_eq!(updated.created_at, created.created_at);
  assert!(replaced.is_empty());

  let new = vec![ImageRef("1_y_0_new.png".into())];
  let input = AssignmentInput::new("hw v3", "Art", date("2025-06-12"));
  let (updated, replaced) = s
    .update_assignment(id, input, Some(new.clone()))
    .await
    .unwrap();
  assert_eq!(updated.images, new);
  assert_eq!(replaced, old);

  assert_eq!(s.get_assignment(id).await.unwrap().unwrap(), updated);
}

#[tokio::test]
async fn update_errors_leave_row_untouched() {
  let s = store().await;
  s.upsert_subject(subject("Math", "#ff0000")).await.unwrap();
  let before = insert(&s, "hw", "Math", "2025-06-10").await;

  let err = s
    .update_assignment(
      before.id,
      AssignmentInput::new("hw", "Ghost", date("2025-06-10")),
      None,
    )
    .await
    .unwrap_err();
  assert!(matches!(err, Error::SubjectNotFound(_)));

  let err = s
    .update_assignment(
      AssignmentId(42),
      AssignmentInput::new("hw", "Math", date("2025-06-10")),
      None,
    )
    .await
    .unwrap_err();
  assert!(matches!(err, Error::AssignmentNotFound(AssignmentId(42))));

  assert_eq!(s.get_assignment(before.id).await.unwrap().unwrap(), before);
}

#[tokio::test]
async fn delete_returns_removed_row() {
  let s = store().await;
  s.upsert_subject(subject("Math", "#ff0000")).await.unwrap();
  let a = insert(&s, "hw", "Math", "2025-06-10").await;

  assert_eq!(s.delete_assignment(a.id).await.unwrap(), a);
  let err = s.delete_assignment(a.id).await.unwrap_err();
  assert!(matches!(err, Error::AssignmentNotFound(_)));
}

// ─── Id allocation ───────────────────────────────────────────────────────────

#[tokio::test]
async fn ids_are_never_reused_after_delete() {
  let s = store().await;
  s.upsert_subject(subject("Math", "#ff0000")).await.unwrap();
  let a = insert(&s, "a", "Math", "2025-06-10").await;
  let b = insert(&s, "b", "Math", "2025-06-10").await;
  s.delete_assignment(b.id).await.unwrap();

  let c = insert(&s, "c", "Math", "2025-06-10").await;
  assert_eq!(a.id, AssignmentId(1));
  assert_eq!(c.id, AssignmentId(3));
}

#[tokio::test]
async fn ids_survive_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("duebook.db");

  let first = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.upsert_subject(subject("Math", "#ff0000")).await.unwrap();
    insert(&s, "a", "Math", "2025-06-10").await;
    let b = insert(&s, "b", "Math", "2025-06-11").await;
    // Deleting the highest id must not make it available again.
    s.delete_assignment(b.id).await.unwrap();
    s.list_assignments().await.unwrap()
  };

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.list_assignments().await.unwrap(), first);
  assert_eq!(s.list_subjects().await.unwrap(), vec![subject("Math", "#ff0000")]);

  let c = insert(&s, "c", "Math", "2025-06-12").await;
  assert_eq!(c.id, AssignmentId(3));
}

// ─── With the planner ────────────────────────────────────────────────────────

#[tokio::test]
async fn planner_round_trip_with_files() {
  let dir = tempfile::tempdir().unwrap();
  let assets = FsAssetStore::new(dir.path().join("images"));
  let planner = Planner::new(store().await, assets);

  planner.add_or_update_subject("Math", "#ff0000").await.unwrap();
  let created = planner
    .create(
      AssignmentInput::new("hw", "Math", date("2025-06-10")),
      vec![ImageUpload { filename: "page.png".into(), bytes: b"img".to_vec() }],
    )
    .await
    .unwrap();
  let reference = created.images[0].clone();
  assert_eq!(
    planner.assets().load(reference.clone()).await.unwrap().unwrap(),
    b"img"
  );

  let removed = planner.remove_subject("Math").await.unwrap();
  assert_eq!(removed, vec![created]);
  assert!(planner.assets().load(reference).await.unwrap().is_none());
  assert!(planner.all().await.unwrap().is_empty());
}
