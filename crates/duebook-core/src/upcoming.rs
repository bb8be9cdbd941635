//! The upcoming-deadline list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;

/// Optional narrowing applied on top of the due-today-or-later rule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpcomingFilter {
  /// Keep only assignments whose subject name contains this substring.
  pub subject:     Option<String>,
  /// Keep only assignments due at most this many days after the reference
  /// date.
  pub within_days: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingEntry<'a> {
  #[serde(flatten)]
  pub assignment: &'a Assignment,
  /// Whole days until the due date; 0 means due on the reference date.
  pub days_left:  i64,
}

/// Assignments due on or after `today`, soonest first.
///
/// The sort is stable, so assignments sharing a due date keep the snapshot's
/// insertion order.
pub fn upcoming<'a>(
  assignments: &'a [Assignment],
  today: NaiveDate,
  filter: &UpcomingFilter,
) -> Vec<UpcomingEntry<'a>> {
  let mut entries: Vec<UpcomingEntry<'a>> = assignments
    .iter()
    .filter(|a| a.due_date >= today)
    .filter(|a| {
      filter
        .subject
        .as_deref()
        .is_none_or(|needle| a.subject.contains(needle))
    })
    .map(|a| UpcomingEntry {
      assignment: a,
      days_left:  (a.due_date - today).num_days(),
    })
    .filter(|e| filter.within_days.is_none_or(|max| e.days_left <= max))
    .collect();

  entries.sort_by_key(|e| e.assignment.due_date);
  entries
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::assignment::AssignmentId;

  fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

  fn assignment(id: u64, subject: &str, due: &str) -> Assignment {
    Assignment {
      id:         AssignmentId(id),
      title:      format!("task {id}"),
      subject:    subject.into(),
      due_date:   date(due),
      memo:       String::new(),
      images:     Vec::new(),
      created_at: Utc::now(),
    }
  }

  fn due_dates(entries: &[UpcomingEntry<'_>]) -> Vec<String> {
    entries.iter().map(|e| e.assignment.due_date.to_string()).collect()
  }

  #[test]
  fn past_assignments_are_excluded() {
    let snapshot = vec![
      assignment(1, "Math", "2025-06-15"),
      assignment(2, "Math", "2025-06-09"),
      assignment(3, "Math", "2025-06-10"),
    ];
    let list = upcoming(&snapshot, date("2025-06-10"), &UpcomingFilter::default());
    assert_eq!(due_dates(&list), ["2025-06-10", "2025-06-15"]);
    assert_eq!(list[0].days_left, 0);
    assert_eq!(list[1].days_left, 5);
  }

  #[test]
  fn ties_keep_insertion_order() {
    let snapshot = vec![
      assignment(1, "Art", "2025-07-01"),
      assignment(2, "Math", "2025-06-20"),
      assignment(3, "Math", "2025-07-01"),
      assignment(4, "Art", "2025-06-20"),
    ];
    let list = upcoming(&snapshot, date("2025-06-01"), &UpcomingFilter::default());
    let ids: Vec<_> = list.iter().map(|e| e.assignment.id.0).collect();
    assert_eq!(ids, [2, 4, 1, 3]);
  }

  #[test]
  fn snapshot_is_left_untouched() {
    let snapshot = vec![
      assignment(1, "Art", "2025-07-01"),
      assignment(2, "Math", "2025-06-20"),
    ];
    let before = snapshot.clone();
    let _ = upcoming(&snapshot, date("2025-06-01"), &UpcomingFilter::default());
    assert_eq!(snapshot, before);
  }

  #[test]
  fn subject_and_window_filters_narrow_the_list() {
    let snapshot = vec![
      assignment(1, "Physics", "2025-06-12"),
      assignment(2, "Chemistry", "2025-06-11"),
      assignment(3, "Physics", "2025-06-30"),
    ];
    let today = date("2025-06-10");

    let physics = UpcomingFilter { subject: Some("Phys".into()), within_days: None };
    let list = upcoming(&snapshot, today, &physics);
    assert_eq!(due_dates(&list), ["2025-06-12", "2025-06-30"]);

    let this_week = UpcomingFilter { subject: None, within_days: Some(7) };
    let list = upcoming(&snapshot, today, &this_week);
    assert_eq!(due_dates(&list), ["2025-06-11", "2025-06-12"]);
  }
}
