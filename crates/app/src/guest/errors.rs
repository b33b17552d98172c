//! Guest store errors.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuestStoreError {
    #[error("failed to read guest cart from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write guest cart to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to erase guest cart at {path}")]
    Erase {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
