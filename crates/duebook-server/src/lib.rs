//! Wiring for the `duebook` server binary: configuration, backend start-up
//! and the top-level router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use duebook_assets::FsAssetStore;
use duebook_core::planner::Planner;
use duebook_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Deserialised from `config.toml` layered with `DUEBOOK_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  #[serde(default = "default_asset_dir")]
  pub asset_dir:  PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/duebook/duebook.db") }

fn default_asset_dir() -> PathBuf { PathBuf::from("~/.local/share/duebook/images") }

impl ServerConfig {
  /// Read `path` (optional) and overlay `DUEBOOK_*` environment variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("DUEBOOK"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Start-up ─────────────────────────────────────────────────────────────────

pub type AppPlanner = Planner<SqliteStore, FsAssetStore>;

/// Open the SQLite store and the image directory named by `cfg`.
pub async fn open_planner(cfg: &ServerConfig) -> anyhow::Result<AppPlanner> {
  let store_path = expand_tilde(&cfg.store_path);
  let asset_dir = expand_tilde(&cfg.asset_dir);

  if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  tracing::info!(store = ?store_path, assets = ?asset_dir, "planner ready");
  Ok(Planner::new(store, FsAssetStore::new(asset_dir)))
}

/// The API mounted under `/api`, with request tracing.
pub fn app(planner: Arc<AppPlanner>) -> Router {
  Router::new()
    .nest("/api", duebook_api::api_router(planner))
    .layer(TraceLayer::new_for_http())
}
