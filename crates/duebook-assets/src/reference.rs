//! Asset reference synthesis and validation.
//!
//! A reference has the shape `{owner}_{timestamp}_{index}_{filename}` and is
//! always a single plain path component made of `[A-Za-z0-9._-]`.

use chrono::{DateTime, Utc};
use duebook_core::assignment::{AssignmentId, ImageRef};

/// Timestamp layout embedded in references; microsecond resolution.
const STAMP_FORMAT: &str = "%Y%m%d%H%M%S%6f";

/// Longest file-name tail kept in a reference. With the owner, stamp and
/// index prefix a reference stays well under the common 255-byte limit.
const MAX_NAME_LEN: usize = 100;

fn is_allowed(c: char) -> bool { c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') }

/// Reduce an uploaded file name to something safe to embed in a reference:
/// the last path component, with every other character replaced by `_`.
/// Long names keep only their last [`MAX_NAME_LEN`] bytes, so the extension
/// survives.
pub fn sanitize_filename(name: &str) -> String {
  let base = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
  let mut cleaned: String = base
    .chars()
    .map(|c| if is_allowed(c) { c } else { '_' })
    .collect();
  // Only ASCII remains, so any byte offset is a char boundary.
  if cleaned.len() > MAX_NAME_LEN {
    cleaned.drain(..cleaned.len() - MAX_NAME_LEN);
  }
  if cleaned.is_empty() { "image".to_owned() } else { cleaned }
}

pub fn make_reference(
  owner: AssignmentId,
  at: DateTime<Utc>,
  index: usize,
  filename: &str,
) -> ImageRef {
  ImageRef(format!(
    "{owner}_{}_{index}_{}",
    at.format(STAMP_FORMAT),
    sanitize_filename(filename)
  ))
}

/// Whether `reference` is safe to join onto the asset directory.
pub fn is_valid(reference: &ImageRef) -> bool {
  let r = reference.as_str();
  !r.is_empty() && !r.starts_with('.') && r.chars().all(is_allowed)
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn reference_embeds_owner_stamp_index_and_name() {
    let at = Utc.with_ymd_and_hms(2025, 6, 10, 8, 30, 5).unwrap();
    let r = make_reference(AssignmentId(12), at, 3, "lab photo.JPG");
    assert_eq!(r.as_str(), "12_20250610083005000000_3_lab_photo.JPG");
    assert!(is_valid(&r));
  }

  #[test]
  fn sanitize_strips_directories_and_odd_characters() {
    assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
    assert_eq!(sanitize_filename(r"C:\Users\me\수행평가.png"), "____.png");
    assert_eq!(sanitize_filename("   "), "image");
    assert_eq!(sanitize_filename("dir/"), "image");
  }

  #[test]
  fn long_names_are_cut_from_the_front() {
    let name = format!("{}.png", "a".repeat(240));
    let cleaned = sanitize_filename(&name);
    assert_eq!(cleaned.len(), MAX_NAME_LEN);
    assert!(cleaned.ends_with("aaa.png"));

    let at = Utc.with_ymd_and_hms(2025, 6, 10, 8, 30, 5).unwrap();
    let r = make_reference(AssignmentId(u64::MAX), at, 999, &name);
    assert!(r.as_str().len() < 255, "{}", r.as_str().len());
    assert!(is_valid(&r));
  }

  #[test]
  fn traversal_references_are_invalid() {
    for bad in ["", "..", "../x", "a/b", r"a\b", ".hidden"] {
      assert!(!is_valid(&ImageRef(bad.into())), "{bad:?}");
    }
  }
}
