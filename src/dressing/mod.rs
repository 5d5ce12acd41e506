//! Dressings: named groups of importable clothing images.
//!
//! There are three kinds of dressing, told apart by [`DressingId`]:
//!
//! * the **default** dressing, always present and read-only,
//! * the **ephemeral** dressing holding the current session's unsaved imports,
//!   which only exists while it has items,
//! * **persisted** dressings created by the user, which are deleted as soon as
//!   their last item is removed and survive across sessions.

mod store;

pub use store::{AssetStore, Removal};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::asset::AssetHandle;

/// Display name of the ephemeral dressing
pub const EPHEMERAL_DRESSING_NAME: &str = "Vêtements du jour";

/// Identifies a dressing and, through its variant, its lifecycle rules
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DressingId {
    Default,
    Ephemeral,
    Persisted(String),
}

impl DressingId {
    pub fn is_default(&self) -> bool {
        matches!(self, DressingId::Default)
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self, DressingId::Ephemeral)
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, DressingId::Persisted(_))
    }
}

impl fmt::Display for DressingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DressingId::Default => f.write_str("basics"),
            DressingId::Ephemeral => f.write_str("today"),
            DressingId::Persisted(id) => f.write_str(id),
        }
    }
}

/// A named, ordered group of assets
#[derive(Debug, Clone, PartialEq)]
pub struct Dressing {
    pub id: DressingId,
    pub name: String,
    pub items: Vec<AssetHandle>,
}

impl Dressing {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// On-disk shape of a persisted dressing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DressingRecord {
    pub id: String,
    pub name: String,
    pub items: Vec<AssetHandle>,
}

impl Dressing {
    /// Only persisted dressings have a record
    pub(crate) fn to_record(&self) -> Option<DressingRecord> {
        match &self.id {
            DressingId::Persisted(id) => Some(DressingRecord {
                id: id.clone(),
                name: self.name.clone(),
                items: self.items.clone(),
            }),
            _ => None,
        }
    }
}

impl From<DressingRecord> for Dressing {
    fn from(record: DressingRecord) -> Self {
        Self {
            id: DressingId::Persisted(record.id),
            name: record.name,
            items: record.items,
        }
    }
}
