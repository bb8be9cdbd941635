//! Subjects: named categories (school courses) with a display color.
//!
//! Assignments reference a subject by name. Deleting a subject cascades to its
//! assignments, but readers must still cope with a name that no longer
//! resolves, so color lookups fall back to [`Color::FALLBACK`].

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Color ───────────────────────────────────────────────────────────────────

/// A display color in canonical `#RRGGBB` form (always uppercase).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
  /// Neutral gray used for assignments whose subject has been deleted.
  pub const FALLBACK: &'static str = "#666666";

  /// Validate `^#[0-9A-Fa-f]{6}$` and normalise to uppercase.
  pub fn parse(input: &str) -> Result<Self> {
    let input = input.trim();
    let valid = input.len() == 7
      && input.starts_with('#')
      && input[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
      return Err(Error::Validation(format!(
        "color must be in #RRGGBB form, got {input:?}"
      )));
    }
    Ok(Self(input.to_ascii_uppercase()))
  }

  pub fn fallback() -> Self { Self(Self::FALLBACK.to_owned()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl FromStr for Color {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for Color {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::parse(&s) }
}

impl From<Color> for String {
  fn from(c: Color) -> Self { c.0 }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Subject ─────────────────────────────────────────────────────────────────

/// A registered subject. `name` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub name:  String,
  pub color: Color,
}

impl Subject {
  /// Build a subject from raw form input: the name is trimmed and must be
  /// non-empty, the color must be `#RRGGBB`.
  pub fn new(name: &str, color: &str) -> Result<Self> {
    let name = normalize_name(name)?;
    let color = Color::parse(color)?;
    Ok(Self { name, color })
  }
}

/// Trim a subject name and reject it if nothing is left.
pub fn normalize_name(name: &str) -> Result<String> {
  let name = name.trim();
  if name.is_empty() {
    return Err(Error::Validation("subject name must not be empty".into()));
  }
  Ok(name.to_owned())
}

// ─── Color lookup ────────────────────────────────────────────────────────────

/// A read-only snapshot of subject colors, used by the view builders.
#[derive(Debug, Clone, Default)]
pub struct SubjectColors {
  colors: HashMap<String, Color>,
}

impl SubjectColors {
  pub fn from_subjects<'a>(subjects: impl IntoIterator<Item = &'a Subject>) -> Self {
    Self {
      colors: subjects
        .into_iter()
        .map(|s| (s.name.clone(), s.color.clone()))
        .collect(),
    }
  }

  /// The stored color, or [`Color::FALLBACK`] for an unknown subject.
  pub fn color_of(&self, name: &str) -> Color {
    self.colors.get(name).cloned().unwrap_or_else(Color::fallback)
  }
}
