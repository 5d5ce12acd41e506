use std::collections::HashSet;

use super::{Dressing, DressingId, DressingRecord, EPHEMERAL_DRESSING_NAME};
use crate::asset::AssetHandle;
use crate::config::Config;
use crate::error::{StorageError, StorageResult, StoreError};
use crate::id_generator::generate_dressing_id;
use crate::state::persistence::{self, DRESSINGS_KEY, KeyValueStore};

/// What happened when an item was removed from a dressing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The dressing still has items
    ItemRemoved,
    /// A persisted dressing lost its last item and was deleted
    DressingDeleted { name: String },
    /// The ephemeral dressing lost its last item and left the active view
    EphemeralEmptied,
}

/// Holds every dressing and the set of dressings the user chose to display.
///
/// Selection and content are independent: a selected dressing with no items is
/// simply not listed by [`AssetStore::active`].
#[derive(Debug, Clone)]
pub struct AssetStore {
    default: Dressing,
    persisted: Vec<Dressing>,
    ephemeral: Option<Dressing>,
    selected: HashSet<DressingId>,
    // Persisted collection changed since the last successful write
    dirty: bool,
    // The stored collection failed to parse and must not be replaced
    storage_unreadable: bool,
}

impl AssetStore {
    /// A store holding only the default dressing, which starts selected
    pub fn new(default_name: impl Into<String>, default_items: Vec<AssetHandle>) -> Self {
        Self {
            default: Dressing {
                id: DressingId::Default,
                name: default_name.into(),
                items: default_items,
            },
            persisted: Vec::new(),
            ephemeral: None,
            selected: HashSet::from([DressingId::Default]),
            dirty: false,
            storage_unreadable: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.default_dressing_name.clone(),
            config
                .default_dressing_items
                .iter()
                .map(|item| AssetHandle::new(item.as_str()))
                .collect(),
        )
    }

    /// Restore persisted dressings from storage.
    ///
    /// Empty records are dropped. Restored dressings start unselected.
    pub fn load(config: &Config, storage: &dyn KeyValueStore) -> StorageResult<Self> {
        let mut store = Self::from_config(config);
        let records: Vec<DressingRecord> =
            persistence::get_json(storage, DRESSINGS_KEY)?.unwrap_or_default();

        let total = records.len();
        store.persisted = records
            .into_iter()
            .filter(|record| !record.items.is_empty())
            .map(Dressing::from)
            .collect();
        if store.persisted.len() != total {
            log::warn!(
                "Discarded {} empty dressing(s) found in storage",
                total - store.persisted.len()
            );
            store.dirty = true;
        }
        log::info!("Loaded {} persisted dressing(s)", store.persisted.len());
        Ok(store)
    }

    /// Dressings that are selected and have at least one item, in catalog order
    pub fn list_active<'a>(&'a self, selected: &HashSet<DressingId>) -> Vec<&'a Dressing> {
        self.catalog()
            .into_iter()
            .filter(|dressing| selected.contains(&dressing.id) && !dressing.is_empty())
            .collect()
    }

    /// [`Self::list_active`] against the store's own selection
    pub fn active(&self) -> Vec<&Dressing> {
        self.list_active(&self.selected)
    }

    /// Every existing dressing: default, persisted in creation order, then ephemeral
    pub fn catalog(&self) -> Vec<&Dressing> {
        std::iter::once(&self.default)
            .chain(self.persisted.iter())
            .chain(self.ephemeral.iter())
            .collect()
    }

    pub fn get(&self, id: &DressingId) -> Option<&Dressing> {
        match id {
            DressingId::Default => Some(&self.default),
            DressingId::Ephemeral => self.ephemeral.as_ref(),
            DressingId::Persisted(_) => self.persisted.iter().find(|d| &d.id == id),
        }
    }

    /// Create a persisted dressing and select it.
    ///
    /// Returns `None` without touching the store when `assets` is empty.
    pub fn add_persisted(&mut self, name: &str, assets: Vec<AssetHandle>) -> Option<DressingId> {
        if assets.is_empty() {
            log::debug!("Ignoring empty dressing '{}'", name);
            return None;
        }

        let id = DressingId::Persisted(generate_dressing_id());
        log::info!("Created dressing '{}' ({}) with {} item(s)", name, id, assets.len());
        self.persisted.push(Dressing {
            id: id.clone(),
            name: name.to_owned(),
            items: assets,
        });
        self.selected.insert(id.clone());
        self.dirty = true;
        Some(id)
    }

    /// Append to the ephemeral dressing, creating it if needed, and select it
    pub fn append_to_ephemeral(&mut self, assets: Vec<AssetHandle>) {
        if assets.is_empty() {
            return;
        }

        let count = assets.len();
        self.ephemeral
            .get_or_insert_with(|| Dressing {
                id: DressingId::Ephemeral,
                name: EPHEMERAL_DRESSING_NAME.to_owned(),
                items: Vec::new(),
            })
            .items
            .extend(assets);
        self.selected.insert(DressingId::Ephemeral);
        log::info!("Added {} item(s) to '{}'", count, EPHEMERAL_DRESSING_NAME);
    }

    /// Remove one item by position.
    ///
    /// Emptying a persisted dressing deletes it and deselects it. Emptying the
    /// ephemeral dressing drops it and deselects it.
    pub fn remove_item(&mut self, id: &DressingId, index: usize) -> Result<Removal, StoreError> {
        match id {
            DressingId::Default => Err(StoreError::ImmutableDressing),
            DressingId::Ephemeral => {
                let dressing = self
                    .ephemeral
                    .as_mut()
                    .ok_or_else(|| StoreError::UnknownDressing { id: id.clone() })?;
                remove_at(&mut dressing.items, index)?;

                if dressing.items.is_empty() {
                    self.ephemeral = None;
                    self.selected.remove(id);
                    Ok(Removal::EphemeralEmptied)
                } else {
                    Ok(Removal::ItemRemoved)
                }
            }
            DressingId::Persisted(_) => {
                let position = self
                    .persisted
                    .iter()
                    .position(|d| &d.id == id)
                    .ok_or_else(|| StoreError::UnknownDressing { id: id.clone() })?;
                remove_at(&mut self.persisted[position].items, index)?;
                self.dirty = true;

                if self.persisted[position].items.is_empty() {
                    let removed = self.persisted.remove(position);
                    self.selected.remove(id);
                    log::info!("Deleted empty dressing '{}' ({})", removed.name, id);
                    Ok(Removal::DressingDeleted { name: removed.name })
                } else {
                    Ok(Removal::ItemRemoved)
                }
            }
        }
    }

    /// Flip whether a dressing is displayed. Works for empty or missing dressings too.
    pub fn toggle_selection(&mut self, id: &DressingId) {
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
    }

    pub fn select(&mut self, id: DressingId) {
        self.selected.insert(id);
    }

    pub fn is_selected(&self, id: &DressingId) -> bool {
        self.selected.contains(id)
    }

    pub fn selected(&self) -> &HashSet<DressingId> {
        &self.selected
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Keep the stored collection untouched after [`AssetStore::load`] failed on it.
    ///
    /// Every later [`AssetStore::sync`] with pending changes is refused, so the
    /// unreadable value stays in storage for recovery.
    pub fn mark_storage_unreadable(&mut self) {
        self.storage_unreadable = true;
    }

    pub fn is_storage_unreadable(&self) -> bool {
        self.storage_unreadable
    }

    /// Write the persisted dressings if they changed.
    ///
    /// On failure the store stays dirty so a later call retries.
    pub fn sync(&mut self, storage: &mut dyn KeyValueStore) -> StorageResult<()> {
        if !self.dirty {
            return Ok(());
        }
        if self.storage_unreadable {
            return Err(StorageError::Unreadable {
                key: DRESSINGS_KEY.to_owned(),
            });
        }
        let records: Vec<DressingRecord> =
            self.persisted.iter().filter_map(Dressing::to_record).collect();
        persistence::set_json(storage, DRESSINGS_KEY, &records)?;
        self.dirty = false;
        Ok(())
    }
}

fn remove_at(items: &mut Vec<AssetHandle>, index: usize) -> Result<AssetHandle, StoreError> {
    if index >= items.len() {
        return Err(StoreError::ItemOutOfRange {
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::persistence::MemoryStore;

    fn handles(names: &[&str]) -> Vec<AssetHandle> {
        names.iter().map(|n| AssetHandle::new(*n)).collect()
    }

    fn store() -> AssetStore {
        AssetStore::new("Basics", handles(&["b1", "b2"]))
    }

    #[test]
    fn test_catalog_order() {
        let mut store = store();
        store.append_to_ephemeral(handles(&["t1"]));
        let fall = store.add_persisted("Fall", handles(&["f1"])).unwrap();

        let ids: Vec<_> = store.catalog().iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids, vec![DressingId::Default, fall, DressingId::Ephemeral]);
    }

    #[test]
    fn test_selected_empty_dressing_is_not_listed() {
        let mut store = store();
        store.select(DressingId::Ephemeral);
        assert!(store.is_selected(&DressingId::Ephemeral));
        assert_eq!(store.active().len(), 1);
    }

    #[test]
    fn test_unknown_dressing() {
        let mut store = store();
        let id = DressingId::Persisted("dr_missing".to_owned());
        assert_eq!(
            store.remove_item(&id, 0),
            Err(StoreError::UnknownDressing { id: id.clone() })
        );
        assert_eq!(
            store.remove_item(&DressingId::Ephemeral, 0),
            Err(StoreError::UnknownDressing { id: DressingId::Ephemeral })
        );
    }

    #[test]
    fn test_out_of_range_leaves_dressing_intact() {
        let mut store = store();
        let id = store.add_persisted("Fall", handles(&["f1"])).unwrap();
        assert_eq!(
            store.remove_item(&id, 3),
            Err(StoreError::ItemOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(store.get(&id).unwrap().len(), 1);
    }

    #[test]
    fn test_sync_only_writes_when_dirty() {
        let mut storage = MemoryStore::new();
        let mut store = store();

        store.sync(&mut storage).unwrap();
        assert_eq!(storage.get_string(DRESSINGS_KEY).unwrap(), None);

        // Ephemeral content is never persisted
        store.append_to_ephemeral(handles(&["t1"]));
        assert!(!store.is_dirty());

        store.add_persisted("Fall", handles(&["f1"]));
        store.sync(&mut storage).unwrap();
        assert!(!store.is_dirty());
        assert!(storage.get_string(DRESSINGS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_failed_sync_stays_dirty() {
        let mut storage = MemoryStore::with_quota(4);
        let mut store = store();
        store.add_persisted("Fall", handles(&["f1"]));

        assert!(store.sync(&mut storage).is_err());
        assert!(store.is_dirty());

        storage.set_quota(None);
        store.sync(&mut storage).unwrap();
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_unreadable_storage_is_never_overwritten() {
        let mut storage = MemoryStore::new();
        let corrupt = r#"[{"id":"dr_a","name":"Winter","#.to_owned();
        storage.set_string(DRESSINGS_KEY, corrupt.clone()).unwrap();
        assert!(AssetStore::load(&Config::default(), &storage).is_err());

        let mut store = store();
        store.mark_storage_unreadable();
        store.add_persisted("Fall", handles(&["f1"]));

        assert!(matches!(store.sync(&mut storage), Err(StorageError::Unreadable { .. })));
        assert!(store.is_dirty());
        assert_eq!(storage.get_string(DRESSINGS_KEY).unwrap(), Some(corrupt));
        // In-memory work is kept
        assert_eq!(store.persisted.len(), 1);
    }

    #[test]
    fn test_load_discards_empty_records() {
        let mut storage = MemoryStore::new();
        storage
            .set_string(
                DRESSINGS_KEY,
                r#"[{"id":"dr_a","name":"A","items":["a1"]},{"id":"dr_b","name":"B","items":[]}]"#
                    .to_owned(),
            )
            .unwrap();

        let store = AssetStore::load(&Config::default(), &storage).unwrap();
        let names: Vec<_> = store.catalog().iter().map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["Basics".to_owned(), "A".to_owned()]);
        assert!(!store.is_selected(&DressingId::Persisted("dr_a".to_owned())));
        assert!(store.is_dirty());
    }
}
