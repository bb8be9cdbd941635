//! Image payloads: base64 decoding of uploads and `GET /images/{reference}`.

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  http::header,
  response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use duebook_core::{
  assets::AssetStore,
  assignment::{ImageRef, ImageUpload},
  planner::Planner,
  store::PlannerStore,
};
use serde::Deserialize;

use crate::error::ApiError;

/// Extensions accepted for uploads, with the media type they are served as.
const MEDIA_TYPES: &[(&str, &str)] = &[
  ("png", "image/png"),
  ("jpg", "image/jpeg"),
  ("jpeg", "image/jpeg"),
  ("webp", "image/webp"),
  ("heic", "image/heic"),
  ("heif", "image/heif"),
];

fn media_type(name: &str) -> Option<&'static str> {
  let (_, ext) = name.rsplit_once('.')?;
  MEDIA_TYPES
    .iter()
    .find(|(e, _)| e.eq_ignore_ascii_case(ext))
    .map(|(_, mt)| *mt)
}

/// One uploaded image inside a JSON body.
#[derive(Debug, Deserialize)]
pub struct ImageBody {
  pub filename: String,
  /// Standard base64 (with padding).
  pub data:     String,
}

impl ImageBody {
  pub fn decode(self) -> Result<ImageUpload, ApiError> {
    if media_type(&self.filename).is_none() {
      return Err(ApiError::BadRequest(format!(
        "unsupported image type: {:?}",
        self.filename
      )));
    }
    let bytes = B64.decode(self.data.as_bytes()).map_err(|e| {
      ApiError::BadRequest(format!("invalid base64 for {:?}: {e}", self.filename))
    })?;
    Ok(ImageUpload { filename: self.filename, bytes })
  }
}

pub fn decode_all(images: Vec<ImageBody>) -> Result<Vec<ImageUpload>, ApiError> {
  images.into_iter().map(ImageBody::decode).collect()
}

/// `GET /images/{reference}`
pub async fn get_one<S, A>(
  State(planner): State<Arc<Planner<S, A>>>,
  Path(reference): Path<String>,
) -> Result<Response, ApiError>
where
  S: PlannerStore,
  A: AssetStore,
{
  let content_type = media_type(&reference).unwrap_or("application/octet-stream");
  let bytes = planner
    .assets()
    .load(ImageRef(reference.clone()))
    .await
    .map_err(|e| ApiError::from(Into::<duebook_core::Error>::into(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("image {reference} not found")))?;

  Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
