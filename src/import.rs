use chrono::NaiveDate;
use std::path::Path;

use crate::asset::AssetHandle;
use crate::dressing::{AssetStore, DressingId};
use crate::util::time;

/// A file handed over by the file-open collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub displayable_ref: String,
}

impl RawFile {
    pub fn new(name: impl Into<String>, displayable_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            displayable_ref: displayable_ref.into(),
        }
    }

    /// True when the file name carries an extension the `image` crate recognises
    pub fn is_image(&self) -> bool {
        image::ImageFormat::from_path(Path::new(&self.name)).is_ok()
    }
}

/// Name proposed for a dressing created on the given day
pub fn default_dressing_name_on(date: NaiveDate) -> String {
    format!("Dressing du {}", time::date_label(date))
}

/// Name proposed for a dressing created today
pub fn default_dressing_name() -> String {
    format!("Dressing du {}", time::today_label())
}

/// A staged import waiting for the user's decision
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImport {
    pub files: Vec<(String, AssetHandle)>,
    pub suggested_name: String,
}

impl PendingImport {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn assets(&self) -> impl Iterator<Item = &AssetHandle> {
        self.files.iter().map(|(_, handle)| handle)
    }
}

/// The user's answer to the import dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOptions {
    pub create_dressing: bool,
    /// Blank names fall back to the suggested one
    pub dressing_name: Option<String>,
}

impl ImportOptions {
    pub fn ephemeral() -> Self {
        Self::default()
    }

    pub fn new_dressing(name: impl Into<String>) -> Self {
        Self {
            create_dressing: true,
            dressing_name: Some(name.into()),
        }
    }
}

/// Result of confirming an import, used to pick the confirmation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Nothing was pending; the store is untouched
    Nothing,
    DressingCreated {
        id: DressingId,
        name: String,
        count: usize,
    },
    AddedToEphemeral {
        count: usize,
    },
}

/// Turns raw file selections into assets and routes them into the [`AssetStore`]
#[derive(Debug, Default)]
pub struct ImportPipeline {
    pending: Option<PendingImport>,
}

impl ImportPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a selection with today's suggested dressing name
    pub fn stage_import(&mut self, files: Vec<RawFile>) -> &PendingImport {
        self.stage_with_name(files, default_dressing_name())
    }

    /// Stage a selection, replacing any batch still pending
    pub fn stage_with_name(&mut self, files: Vec<RawFile>, suggested_name: String) -> &PendingImport {
        if let Some(previous) = &self.pending {
            log::debug!("Replacing pending import of {} file(s)", previous.len());
        }
        let files = files
            .into_iter()
            .map(|file| (file.name, AssetHandle::new(file.displayable_ref)))
            .collect();
        self.pending.insert(PendingImport {
            files,
            suggested_name,
        })
    }

    pub fn pending(&self) -> Option<&PendingImport> {
        self.pending.as_ref()
    }

    /// Route the pending batch into the store and clear it
    pub fn confirm_import(&mut self, options: ImportOptions, store: &mut AssetStore) -> ImportOutcome {
        let Some(batch) = self.pending.take() else {
            return ImportOutcome::Nothing;
        };
        if batch.is_empty() {
            return ImportOutcome::Nothing;
        }

        let count = batch.len();
        let assets: Vec<AssetHandle> = batch.files.into_iter().map(|(_, handle)| handle).collect();

        if options.create_dressing {
            let name = options
                .dressing_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .unwrap_or(batch.suggested_name);
            match store.add_persisted(&name, assets) {
                Some(id) => ImportOutcome::DressingCreated { id, name, count },
                None => ImportOutcome::Nothing,
            }
        } else {
            store.append_to_ephemeral(assets);
            ImportOutcome::AddedToEphemeral { count }
        }
    }

    /// Drop the pending batch. The handles are returned so the caller can release them.
    pub fn cancel_import(&mut self) -> Vec<AssetHandle> {
        self.pending
            .take()
            .map(|batch| batch.files.into_iter().map(|(_, handle)| handle).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name_format() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
        assert_eq!(default_dressing_name_on(date), "Dressing du 02.11.2025");
        assert!(default_dressing_name().starts_with("Dressing du "));
    }

    #[test]
    fn test_image_detection() {
        assert!(RawFile::new("coat.PNG", "/tmp/coat.PNG").is_image());
        assert!(RawFile::new("scarf.jpeg", "/tmp/scarf.jpeg").is_image());
        assert!(!RawFile::new("notes.txt", "/tmp/notes.txt").is_image());
        assert!(!RawFile::new("README", "/tmp/README").is_image());
    }

    #[test]
    fn test_staging_does_not_touch_store() {
        let mut pipeline = ImportPipeline::new();
        let store = AssetStore::new("Basics", Vec::new());

        let pending = pipeline.stage_import(vec![RawFile::new("a.png", "/a.png")]);
        assert_eq!(pending.len(), 1);
        assert_eq!(store.catalog().len(), 1);
    }

    #[test]
    fn test_confirm_without_pending() {
        let mut pipeline = ImportPipeline::new();
        let mut store = AssetStore::new("Basics", Vec::new());
        assert_eq!(
            pipeline.confirm_import(ImportOptions::ephemeral(), &mut store),
            ImportOutcome::Nothing
        );
    }
}
