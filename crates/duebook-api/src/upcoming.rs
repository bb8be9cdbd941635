//! `GET /upcoming[?today=YYYY-MM-DD][&subject=...][&within_days=N]`

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDate};
use duebook_core::{
  assets::AssetStore,
  planner::Planner,
  store::PlannerStore,
  upcoming::{UpcomingFilter, upcoming},
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UpcomingParams {
  /// Reference date. Defaults to the server's local date.
  pub today:       Option<String>,
  pub subject:     Option<String>,
  pub within_days: Option<i64>,
}

pub async fn handler<S, A>(
  State(planner): State<Arc<Planner<S, A>>>,
  Query(params): Query<UpcomingParams>,
) -> Result<Response, ApiError>
where
  S: PlannerStore,
  A: AssetStore,
{
  let today = match params.today.as_deref() {
    Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
      .map_err(|e| ApiError::BadRequest(format!("invalid date {raw:?}: {e}")))?,
    None => Local::now().date_naive(),
  };
  let filter = UpcomingFilter {
    subject:     params.subject.filter(|s| !s.trim().is_empty()),
    within_days: params.within_days,
  };

  let assignments = planner.all().await?;
  let entries = upcoming(&assignments, today, &filter);
  Ok(Json(&entries).into_response())
}
