use std::path::PathBuf;
use thiserror::Error;

use crate::dressing::DressingId;

/// Errors raised by the asset store when a mutation is not allowed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The default dressing is read-only
    #[error("The default dressing cannot be modified")]
    ImmutableDressing,

    #[error("No dressing with id {id}")]
    UnknownDressing { id: DressingId },

    #[error("Item {index} is out of range (dressing holds {len} items)")]
    ItemOutOfRange { index: usize, len: usize },
}

/// Errors raised by the composition canvas
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CanvasError {
    /// The action needs a selected item and there is none
    #[error("No item is selected")]
    NoSelection,

    #[error("Item {index} is out of range (canvas holds {len} items)")]
    ItemOutOfRange { index: usize, len: usize },
}

/// Errors that can occur during interaction state transitions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// Attempted to transition between incompatible states
    #[error("Cannot transition from {from} to {to}")]
    InvalidStateTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Errors from the durable key/value layer
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to serialize state: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to access storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage quota exceeded while writing {key} (limit {limit} bytes)")]
    QuotaExceeded { key: String, limit: usize },

    #[error("Stored {key} could not be read, refusing to overwrite it")]
    Unreadable { key: String },
}

/// Errors raised while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;
