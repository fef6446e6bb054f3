use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("storage file {path} is not a JSON object of strings: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("failed to start worker thread: {0}")]
    Thread(#[from] io::Error),
}

/// A background task panicked instead of producing a value.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("background task panicked: {0}")]
pub struct TaskPanic(pub String);
