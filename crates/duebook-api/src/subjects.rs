//! Handlers for `/subjects` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/subjects` | Ordered by name |
//! | `PUT`    | `/subjects/{name}` | Body: `{"color":"#RRGGBB"}`; upsert |
//! | `DELETE` | `/subjects/{name}` | Cascades to the subject's assignments |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use duebook_core::{
  assets::AssetStore,
  assignment::AssignmentId,
  planner::Planner,
  store::PlannerStore,
  subject::Subject,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /subjects`
pub async fn list<S, A>(
  State(planner): State<Arc<Planner<S, A>>>,
) -> Result<Json<Vec<Subject>>, ApiError>
where
  S: PlannerStore,
  A: AssetStore,
{
  Ok(Json(planner.subjects().await?))
}

// ─── Upsert ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ColorBody {
  pub color: String,
}

/// `PUT /subjects/{name}` with body `{"color":"#ff8800"}`
pub async fn put_one<S, A>(
  State(planner): State<Arc<Planner<S, A>>>,
  Path(name): Path<String>,
  Json(body): Json<ColorBody>,
) -> Result<Json<Subject>, ApiError>
where
  S: PlannerStore,
  A: AssetStore,
{
  Ok(Json(planner.add_or_update_subject(&name, &body.color).await?))
}

// ─── Remove ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Removed {
  pub subject: String,
  /// Ids of the assignments deleted along with the subject.
  pub removed: Vec<AssignmentId>,
}

/// `DELETE /subjects/{name}`
pub async fn delete_one<S, A>(
  State(planner): State<Arc<Planner<S, A>>>,
  Path(name): Path<String>,
) -> Result<Json<Removed>, ApiError>
where
  S: PlannerStore,
  A: AssetStore,
{
  let removed = planner.remove_subject(&name).await?;
  Ok(Json(Removed {
    subject: name.trim().to_owned(),
    removed: removed.into_iter().map(|a| a.id).collect(),
  }))
}
