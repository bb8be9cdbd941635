//! Error type for `duebook-assets`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error on asset {reference:?}: {source}")]
  Io {
    reference: String,
    #[source]
    source:    std::io::Error,
  },

  #[error("could not create asset directory: {0}")]
  CreateDir(#[source] std::io::Error),
}

impl From<Error> for duebook_core::Error {
  fn from(e: Error) -> Self { Self::Storage(e.to_string()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
