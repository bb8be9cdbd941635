//! Month grid construction and month navigation.
//!
//! A [`MonthGrid`] is a pure projection of an assignment snapshot: complete
//! Monday-first weeks covering one month, with each in-month day carrying the
//! assignments due on it. Days borrowed from the neighbouring months are
//! marked `dimmed` and never carry entries.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::{
  Error, Result,
  assignment::Assignment,
  subject::{Color, SubjectColors},
};

// ─── YearMonth ───────────────────────────────────────────────────────────────

/// A calendar month, represented by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
  /// Fails if `month` is outside 1–12 or `year` is outside the supported
  /// date range.
  pub fn new(year: i32, month: u32) -> Result<Self> {
    NaiveDate::from_ymd_opt(year, month, 1)
      .map(Self)
      .ok_or_else(|| Error::Validation(format!("invalid month: {year}-{month:02}")))
  }

  /// The month that contains `date`.
  pub fn containing(date: NaiveDate) -> Self {
    // Day 1 of an existing date's month always exists.
    Self(date - Days::new(u64::from(date.day0())))
  }

  pub fn year(&self) -> i32 { self.0.year() }

  pub fn month(&self) -> u32 { self.0.month() }

  pub fn first_day(&self) -> NaiveDate { self.0 }

  /// Move by `delta` whole months, rolling over year boundaries in either
  /// direction. `m.shift(a)?.shift(b)? == m.shift(a + b)?` for every `a`, `b`
  /// that stay within the supported date range.
  pub fn shift(self, delta: i64) -> Result<Self> {
    let index = (i64::from(self.month()) - 1)
      .checked_add(delta)
      .ok_or_else(|| Error::Validation(format!("month shift out of range: {delta}")))?;
    let month = index.rem_euclid(12) + 1;
    let year = i64::from(self.year()) + index.div_euclid(12);
    let year = i32::try_from(year)
      .map_err(|_| Error::Validation(format!("year out of range: {year}")))?;
    // `month` is in 1..=12 by construction.
    Self::new(year, month as u32)
  }

  /// Every date of the month, in order.
  pub fn days(self) -> impl Iterator<Item = NaiveDate> {
    let month = self.month();
    self.0.iter_days().take_while(move |d| d.month() == month)
  }
}

// ─── Grid types ──────────────────────────────────────────────────────────────

/// One assignment placed on a day, with its subject color resolved.
#[derive(Debug, Clone, Serialize)]
pub struct DayEntry<'a> {
  pub assignment: &'a Assignment,
  pub color:      Color,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayCell<'a> {
  pub date:    NaiveDate,
  pub day:     u32,
  /// `true` for days that belong to the previous or next month.
  pub dimmed:  bool,
  /// Assignments due on this date, in store insertion order.
  pub entries: Vec<DayEntry<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid<'a> {
  pub year:  i32,
  pub month: u32,
  /// Complete Monday-to-Sunday weeks.
  pub weeks: Vec<Vec<DayCell<'a>>>,
}

impl<'a> MonthGrid<'a> {
  pub fn cells(&self) -> impl Iterator<Item = &DayCell<'a>> {
    self.weeks.iter().flatten()
  }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Lay out `month` as complete Monday-first weeks and bucket `assignments` by
/// exact due date.
pub fn build_month<'a>(
  month: YearMonth,
  assignments: &'a [Assignment],
  colors: &SubjectColors,
) -> MonthGrid<'a> {
  let mut due: HashMap<NaiveDate, Vec<DayEntry<'a>>> = HashMap::new();
  for a in assignments {
    if YearMonth::containing(a.due_date) == month {
      due.entry(a.due_date).or_default().push(DayEntry {
        assignment: a,
        color:      colors.color_of(&a.subject),
      });
    }
  }

  let in_month: Vec<NaiveDate> = month.days().collect();
  let first = month.first_day();
  let last = in_month.last().copied().unwrap_or(first);

  let leading = u64::from(first.weekday().num_days_from_monday());
  let trailing = 6 - u64::from(last.weekday().num_days_from_monday());

  let before = (1..=leading)
    .rev()
    .filter_map(|n| first.checked_sub_days(Days::new(n)));
  let after = (1..=trailing).filter_map(|n| last.checked_add_days(Days::new(n)));

  let cells: Vec<DayCell<'a>> = before
    .map(dimmed_cell)
    .chain(in_month.into_iter().map(|date| DayCell {
      date,
      day: date.day(),
      dimmed: false,
      entries: due.remove(&date).unwrap_or_default(),
    }))
    .chain(after.map(dimmed_cell))
    .collect();

  let mut cells = cells.into_iter();
  let weeks = std::iter::from_fn(|| {
    let week: Vec<_> = cells.by_ref().take(7).collect();
    (!week.is_empty()).then_some(week)
  })
  .collect();

  MonthGrid { year: month.year(), month: month.month(), weeks }
}

fn dimmed_cell<'a>(date: NaiveDate) -> DayCell<'a> {
  DayCell { date, day: date.day(), dimmed: true, entries: Vec::new() }
}
