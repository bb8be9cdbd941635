//! JSON REST API for Duebook.
//!
//! Exposes an axum [`Router`] backed by a [`Planner`] over any
//! [`PlannerStore`] and [`AssetStore`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", duebook_api::api_router(planner.clone()))
//! ```

pub mod assignments;
pub mod calendar;
pub mod error;
pub mod images;
pub mod subjects;
pub mod upcoming;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use duebook_core::{assets::AssetStore, planner::Planner, store::PlannerStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `planner`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, A>(planner: Arc<Planner<S, A>>) -> Router<()>
where
  S: PlannerStore + 'static,
  A: AssetStore + 'static,
{
  Router::new()
    // Subjects
    .route("/subjects", get(subjects::list::<S, A>))
    .route(
      "/subjects/{name}",
      put(subjects::put_one::<S, A>).delete(subjects::delete_one::<S, A>),
    )
    // Assignments
    .route(
      "/assignments",
      get(assignments::list::<S, A>).post(assignments::create::<S, A>),
    )
    .route(
      "/assignments/{id}",
      get(assignments::get_one::<S, A>)
        .put(assignments::update_one::<S, A>)
        .delete(assignments::delete_one::<S, A>),
    )
    // Views
    .route("/calendar", get(calendar::current::<S, A>))
    .route("/calendar/{year}/{month}", get(calendar::month::<S, A>))
    .route("/upcoming", get(upcoming::handler::<S, A>))
    // Blobs
    .route("/images/{reference}", get(images::get_one::<S, A>))
    .with_state(planner)
}

// ─── Integration tests ────────────────────────────────────────────────────────
