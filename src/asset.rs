use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to an importable image.
///
/// The string is whatever the renderer knows how to resolve (a file path for the
/// desktop shell). Handles are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetHandle(String);

impl AssetHandle {
    pub fn new(displayable_ref: impl Into<String>) -> Self {
        Self(displayable_ref.into())
    }

    pub fn displayable_ref(&self) -> &str {
        &self.0
    }

    /// Handles with no reference are never placed on the canvas
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetHandle {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AssetHandle {
    fn from(value: String) -> Self {
        Self(value)
    }
}
