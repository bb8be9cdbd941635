//! The `AssetStore` trait: durable storage for image attachments.
//!
//! Assignments only ever hold [`ImageRef`]s. The bytes live wherever the
//! backend puts them (see `duebook-assets` for the filesystem backend).

use std::future::Future;

use crate::assignment::{AssignmentId, ImageRef, ImageUpload};

pub trait AssetStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Write each upload and return one reference per upload, in input order.
  ///
  /// References incorporate the owner id, a timestamp, the position index and
  /// the original file name. An empty input yields an empty output without
  /// touching storage. If any write fails, blobs already written by this call
  /// are removed before the error is returned.
  fn store(
    &self,
    owner: AssignmentId,
    files: Vec<ImageUpload>,
  ) -> impl Future<Output = Result<Vec<ImageRef>, Self::Error>> + Send + '_;

  /// Best-effort removal of the blobs behind `refs`.
  ///
  /// Missing blobs are ignored. Any other failure is logged and swallowed;
  /// this never fails.
  fn release(&self, refs: Vec<ImageRef>) -> impl Future<Output = ()> + Send + '_;

  /// Read a stored blob. Returns `None` for an unknown reference.
  fn load(
    &self,
    reference: ImageRef,
  ) -> impl Future<Output = Result<Option<Vec<u8>>, Self::Error>> + Send + '_;
}
