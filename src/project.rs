//! Saved outfits ("projects") and the lookbook labels that tag them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::canvas::{Composition, PlacedItem};
use crate::error::StorageResult;
use crate::id_generator::generate_project_id;
use crate::state::persistence::{self, KeyValueStore, LOOKBOOKS_KEY, PROJECTS_KEY};
use crate::util::time;

/// A saved composition. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub items: Vec<PlacedItem>,
    #[serde(rename = "lookbook")]
    pub lookbook_label: String,
    #[serde(rename = "dressing", default, skip_serializing_if = "Option::is_none")]
    pub dressing_label: Option<String>,
}

/// The save dialog's request: which lookbook (and optionally dressing) to tag the outfit with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub lookbook_label: String,
    pub dressing_label: Option<String>,
}

/// Reads and writes the durable project list, newest first
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectStore;

impl ProjectStore {
    /// Snapshot the composition and prepend it to the saved list.
    ///
    /// On failure nothing is written and the composition is untouched, so the
    /// save can be retried. A stored list that cannot be read is not overwritten.
    pub fn save(
        storage: &mut dyn KeyValueStore,
        composition: &Composition,
        request: &SaveRequest,
    ) -> StorageResult<Project> {
        let project = Project {
            id: generate_project_id(),
            created_at: time::now_utc(),
            items: composition.snapshot(),
            lookbook_label: request.lookbook_label.clone(),
            dressing_label: request.dressing_label.clone(),
        };

        let mut projects = Self::list(storage)?;
        projects.insert(0, project.clone());
        persistence::set_json(storage, PROJECTS_KEY, &projects)?;
        storage.flush()?;

        log::info!(
            "Saved project {} with {} item(s) to lookbook '{}'",
            project.id,
            project.items.len(),
            project.lookbook_label
        );
        Ok(project)
    }

    /// Every saved project, newest first
    pub fn list(storage: &dyn KeyValueStore) -> StorageResult<Vec<Project>> {
        Ok(persistence::get_json(storage, PROJECTS_KEY)?.unwrap_or_default())
    }
}

/// Free-text labels used to tag projects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookbooks {
    labels: Vec<String>,
}

impl Lookbooks {
    pub fn new(default_label: &str) -> Self {
        Self {
            labels: vec![default_label.to_owned()],
        }
    }

    /// Stored labels, or just `default_label` when none are stored or they are unreadable
    pub fn load(storage: &dyn KeyValueStore, default_label: &str) -> Self {
        match persistence::get_json::<Vec<String>>(storage, LOOKBOOKS_KEY) {
            Ok(Some(labels)) if !labels.is_empty() => Self { labels },
            Ok(_) => Self::new(default_label),
            Err(err) => {
                log::warn!("Ignoring unreadable lookbook list: {}", err);
                Self::new(default_label)
            }
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The label preselected in the save dialog
    pub fn first(&self) -> &str {
        self.labels.first().map(String::as_str).unwrap_or_default()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Add a label and persist the list. Returns `false` for blank or duplicate labels.
    pub fn add(&mut self, label: &str, storage: &mut dyn KeyValueStore) -> StorageResult<bool> {
        let label = label.trim();
        if label.is_empty() || self.contains(label) {
            return Ok(false);
        }
        self.labels.push(label.to_owned());
        if let Err(err) = persistence::set_json(storage, LOOKBOOKS_KEY, &self.labels) {
            self.labels.pop();
            return Err(err);
        }
        Ok(true)
    }
}
