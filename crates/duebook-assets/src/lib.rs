//! Filesystem backend for Duebook image attachments.
//!
//! Each uploaded image becomes one file directly under the configured asset
//! directory. The file name doubles as the [`ImageRef`] stored on the
//! assignment, so nothing but the directory itself needs to be configured.
//!
//! [`ImageRef`]: duebook_core::assignment::ImageRef

mod reference;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::FsAssetStore;
