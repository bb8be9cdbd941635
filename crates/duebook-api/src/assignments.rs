//! Handlers for `/assignments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/assignments` | Every assignment, in id order |
//! | `POST`   | `/assignments` | Body: [`AssignmentBody`]; returns 201 + stored assignment |
//! | `GET`    | `/assignments/{id}` | Single assignment |
//! | `PUT`    | `/assignments/{id}` | Body: [`AssignmentBody`]; non-empty `images` replaces the stored set |
//! | `DELETE` | `/assignments/{id}` | Returns 204 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use duebook_core::{
  assets::AssetStore,
  assignment::{Assignment, AssignmentId, AssignmentInput},
  planner::Planner,
  store::PlannerStore,
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  images::{ImageBody, decode_all},
};

/// JSON body accepted by `POST /assignments` and `PUT /assignments/{id}`.
#[derive(Debug, Deserialize)]
pub struct AssignmentBody {
  #[serde(flatten)]
  pub fields: AssignmentInput,
  #[serde(default)]
  pub images: Vec<ImageBody>,
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /assignments`
pub async fn list<S, A>(
  State(planner): State<Arc<Planner<S, A>>>,
) -> Result<Json<Vec<Assignment>>, ApiError>
where
  S: PlannerStore,
  A: AssetStore,
{
  Ok(Json(planner.all().await?))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /assignments/{id}`
pub async fn get_one<S, A>(
  State(planner): State<Arc<Planner<S, A>>>,
  Path(id): Path<u64>,
) -> Result<Json<Assignment>, ApiError>
where
  S: PlannerStore,
  A: AssetStore,
{
  Ok(Json(planner.get(AssignmentId(id)).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /assignments`
pub async fn create<S, A>(
  State(planner): State<Arc<Planner<S, A>>>,
  Json(body): Json<AssignmentBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlannerStore,
  A: AssetStore,
{
  let images = decode_all(body.images)?;
  let assignment = planner.create(body.fields, images).await?;
  Ok((StatusCode::CREATED, Json(assignment)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /assignments/{id}`
pub async fn update_one<S, A>(
  State(planner): State<Arc<Planner<S, A>>>,
  Path(id): Path<u64>,
  Json(body): Json<AssignmentBody>,
) -> Result<Json<Assignment>, ApiError>
where
  S: PlannerStore,
  A: AssetStore,
{
  let images = decode_all(body.images)?;
  Ok(Json(planner.update(AssignmentId(id), body.fields, images).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /assignments/{id}`
pub async fn delete_one<S, A>(
  State(planner): State<Arc<Planner<S, A>>>,
  Path(id): Path<u64>,
) -> Result<StatusCode, ApiError>
where
  S: PlannerStore,
  A: AssetStore,
{
  planner.delete(AssignmentId(id)).await?;
  Ok(StatusCode::NO_CONTENT)
}
