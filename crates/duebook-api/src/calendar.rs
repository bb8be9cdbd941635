//! `GET /calendar` and `GET /calendar/{year}/{month}`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  response::{IntoResponse, Response},
};
use chrono::Local;
use duebook_core::{
  assets::AssetStore,
  calendar::{YearMonth, build_month},
  planner::Planner,
  store::PlannerStore,
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ShiftParams {
  /// Months to move before rendering; negative goes back.
  #[serde(default)]
  pub shift: i64,
}

/// `GET /calendar[?shift=N]`, starting from the current local month.
pub async fn current<S, A>(
  State(planner): State<Arc<Planner<S, A>>>,
  Query(params): Query<ShiftParams>,
) -> Result<Response, ApiError>
where
  S: PlannerStore,
  A: AssetStore,
{
  let month = YearMonth::containing(Local::now().date_naive());
  render(&planner, month, params.shift).await
}

/// `GET /calendar/{year}/{month}[?shift=N]`
pub async fn month<S, A>(
  State(planner): State<Arc<Planner<S, A>>>,
  Path((year, month)): Path<(i32, u32)>,
  Query(params): Query<ShiftParams>,
) -> Result<Response, ApiError>
where
  S: PlannerStore,
  A: AssetStore,
{
  let month = YearMonth::new(year, month)?;
  render(&planner, month, params.shift).await
}

async fn render<S, A>(
  planner: &Planner<S, A>,
  month: YearMonth,
  shift: i64,
) -> Result<Response, ApiError>
where
  S: PlannerStore,
  A: AssetStore,
{
  let month = month.shift(shift)?;
  let assignments = planner.all().await?;
  let colors = planner.subject_colors().await?;
  let grid = build_month(month, &assignments, &colors);
  Ok(Json(&grid).into_response())
}
