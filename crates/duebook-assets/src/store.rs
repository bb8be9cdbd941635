//! [`FsAssetStore`]: the filesystem implementation of [`AssetStore`].

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use chrono::Utc;
use duebook_core::{
  assets::AssetStore,
  assignment::{AssignmentId, ImageRef, ImageUpload},
};
use tokio::io::AsyncWriteExt as _;
use tracing::{debug, warn};

use crate::{
  Error, Result,
  reference::{is_valid, make_reference},
};

/// Stores each image as one file under `root`.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
  root: PathBuf,
}

impl FsAssetStore {
  /// The directory is created lazily on the first write.
  pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

  pub fn root(&self) -> &Path { &self.root }

  fn path_of(&self, reference: &ImageRef) -> Option<PathBuf> {
    is_valid(reference).then(|| self.root.join(reference.as_str()))
  }

  async fn write_new(&self, reference: &ImageRef, bytes: &[u8]) -> Result<()> {
    let io_err = |source| Error::Io { reference: reference.to_string(), source };
    let path = self.root.join(reference.as_str());

    let mut file = tokio::fs::OpenOptions::new()
      .write(true)
      .create_new(true)
      .open(&path)
      .await
      .map_err(io_err)?;
    file.write_all(bytes).await.map_err(io_err)?;
    file.sync_all().await.map_err(io_err)?;
    Ok(())
  }
}

impl AssetStore for FsAssetStore {
  type Error = Error;

  async fn store(
    &self,
    owner: AssignmentId,
    files: Vec<ImageUpload>,
  ) -> Result<Vec<ImageRef>> {
    if files.is_empty() {
      return Ok(Vec::new());
    }

    tokio::fs::create_dir_all(&self.root).await.map_err(Error::CreateDir)?;

    let at = Utc::now();
    let mut written = Vec::with_capacity(files.len());
    for (index, file) in files.iter().enumerate() {
      let reference = make_reference(owner, at, index, &file.filename);
      if let Err(e) = self.write_new(&reference, &file.bytes).await {
        warn!(assignment_id = %owner, %reference, error = %e, "image write failed");
        self.release(written).await;
        return Err(e);
      }
      debug!(assignment_id = %owner, %reference, bytes = file.bytes.len(), "image stored");
      written.push(reference);
    }

    Ok(written)
  }

  async fn release(&self, refs: Vec<ImageRef>) {
    for reference in refs {
      let Some(path) = self.path_of(&reference) else {
        warn!(%reference, "refusing to delete invalid image reference");
        continue;
      };
      match tokio::fs::remove_file(&path).await {
        Ok(()) => debug!(%reference, "image released"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(%reference, error = %e, "failed to delete image"),
      }
    }
  }

  async fn load(&self, reference: ImageRef) -> Result<Option<Vec<u8>>> {
    let Some(path) = self.path_of(&reference) else {
      return Ok(None);
    };
    match tokio::fs::read(&path).await {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(source) => Err(Error::Io { reference: reference.to_string(), source }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn upload(name: &str, bytes: &[u8]) -> ImageUpload {
    ImageUpload { filename: name.into(), bytes: bytes.to_vec() }
  }

  fn assets() -> (tempfile::TempDir, FsAssetStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FsAssetStore::new(dir.path().join("images"));
    (dir, store)
  }

  #[tokio::test]
  async fn empty_input_touches_nothing() {
    let (_dir, store) = assets();
    let refs = store.store(AssignmentId(1), vec![]).await.unwrap();
    assert!(refs.is_empty());
    assert!(!store.root().exists());
  }

  #[tokio::test]
  async fn store_then_load_returns_same_bytes() {
    let (_dir, store) = assets();
    let refs = store
      .store(
        AssignmentId(4),
        vec![upload("front.png", b"front"), upload("back.png", b"back")],
      )
      .await
      .unwrap();

    assert_eq!(refs.len(), 2);
    assert!(refs[0].as_str().starts_with("4_"));
    assert!(refs[0].as_str().ends_with("_0_front.png"));
    assert!(refs[1].as_str().ends_with("_1_back.png"));

    assert_eq!(store.load(refs[0].clone()).await.unwrap().unwrap(), b"front");
    assert_eq!(store.load(refs[1].clone()).await.unwrap().unwrap(), b"back");
  }

  #[tokio::test]
  async fn long_file_name_is_stored() {
    let (_dir, store) = assets();
    let name = format!("{}.png", "a".repeat(240));
    let refs = store.store(AssignmentId(1), vec![upload(&name, b"long")]).await.unwrap();

    assert!(refs[0].as_str().ends_with(".png"));
    assert_eq!(store.load(refs[0].clone()).await.unwrap().unwrap(), b"long");
  }

  #[tokio::test]
  async fn same_name_twice_gets_distinct_references() {
    let (_dir, store) = assets();
    let refs = store
      .store(AssignmentId(1), vec![upload("a.png", b"1"), upload("a.png", b"2")])
      .await
      .unwrap();
    assert_ne!(refs[0], refs[1]);
  }

  #[tokio::test]
  async fn release_is_idempotent() {
    let (_dir, store) = assets();
    let refs = store
      .store(AssignmentId(2), vec![upload("a.png", b"x")])
      .await
      .unwrap();

    store.release(refs.clone()).await;
    assert!(store.load(refs[0].clone()).await.unwrap().is_none());
    // Second release of a missing blob is silently ignored.
    store.release(refs).await;
  }

  #[tokio::test]
  async fn release_skips_invalid_references() {
    let (dir, store) = assets();
    let outside = dir.path().join("keep.txt");
    std::fs::write(&outside, b"keep").unwrap();

    store.release(vec![ImageRef("../keep.txt".into())]).await;
    assert!(outside.exists());
  }

  #[tokio::test]
  async fn unknown_reference_loads_as_none() {
    let (_dir, store) = assets();
    assert!(store.load(ImageRef("9_x_0_none.png".into())).await.unwrap().is_none());
    assert!(store.load(ImageRef("../etc".into())).await.unwrap().is_none());
  }
}
