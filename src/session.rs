use crate::asset::AssetHandle;
use crate::command::{Command, CommandResult};
use crate::config::Config;
use crate::dressing::{AssetStore, DressingId, Removal};
use crate::error::{StorageError, StorageResult, StoreError, TransitionError};
use crate::event::{DressingEvent, EditorEvent, EventBus, EventHandler, NotificationCenter};
use crate::import::{ImportOptions, ImportOutcome, ImportPipeline, PendingImport, RawFile};
use crate::input::{InputEvent, route_event};
use crate::project::{Lookbooks, Project, ProjectStore, SaveRequest};
use crate::state::{EditorContext, KeyValueStore};

/// One editing session: everything the user interface talks to.
///
/// Each method performs a single in-memory mutation, then makes an independent
/// durable write where one is needed. A failed write is reported through the
/// event bus and never rolls back the in-memory change.
pub struct Session {
    config: Config,
    storage: Box<dyn KeyValueStore>,
    pub assets: AssetStore,
    pub import: ImportPipeline,
    pub editor: EditorContext,
    pub lookbooks: Lookbooks,
    notifications: NotificationCenter,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("assets", &self.assets)
            .field("import", &self.import)
            .field("editor", &self.editor)
            .field("lookbooks", &self.lookbooks)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(config: Config, storage: Box<dyn KeyValueStore>) -> Self {
        let notifications = NotificationCenter::new(config.notification_secs);
        Self::with_notifications(config, storage, notifications)
    }

    pub fn with_notifications(
        config: Config,
        storage: Box<dyn KeyValueStore>,
        notifications: NotificationCenter,
    ) -> Self {
        let (assets, load_error) = match AssetStore::load(&config, storage.as_ref()) {
            Ok(assets) => (assets, None),
            Err(err) => {
                let mut assets = AssetStore::from_config(&config);
                assets.mark_storage_unreadable();
                (assets, Some(err))
            }
        };
        let lookbooks = Lookbooks::load(storage.as_ref(), &config.default_lookbook);

        let event_bus = EventBus::new();
        event_bus.subscribe(Box::new(notifications.clone()));

        let session = Self {
            config,
            storage,
            assets,
            import: ImportPipeline::new(),
            editor: EditorContext::with_event_bus(event_bus),
            lookbooks,
            notifications,
        };
        if let Some(err) = load_error {
            log::error!("Stored dressings are unreadable, new dressings will not be saved");
            session.report_storage_failure("dressings", &err);
        }
        session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Register another listener on the session's event bus
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.editor.event_bus.subscribe(handler);
    }

    pub fn stage_import(&mut self, files: Vec<RawFile>) -> &PendingImport {
        log::info!("Staging {} file(s) for import", files.len());
        self.import.stage_import(files)
    }

    pub fn confirm_import(&mut self, options: ImportOptions) -> ImportOutcome {
        let outcome = self.import.confirm_import(options, &mut self.assets);
        match &outcome {
            ImportOutcome::Nothing => {}
            ImportOutcome::DressingCreated { id, name, count } => {
                self.emit(EditorEvent::Dressing(DressingEvent::Created {
                    id: id.clone(),
                    name: name.clone(),
                    count: *count,
                }));
                self.sync_dressings();
            }
            ImportOutcome::AddedToEphemeral { count } => {
                self.emit(EditorEvent::Dressing(DressingEvent::AddedToEphemeral { count: *count }));
            }
        }
        outcome
    }

    pub fn cancel_import(&mut self) -> Vec<AssetHandle> {
        self.import.cancel_import()
    }

    pub fn toggle_dressing(&mut self, id: &DressingId) {
        self.assets.toggle_selection(id);
    }

    pub fn remove_dressing_item(&mut self, id: &DressingId, index: usize) -> Result<Removal, StoreError> {
        let removal = self.assets.remove_item(id, index).inspect_err(|err| {
            log::warn!("Rejected removal from {}: {}", id, err);
        })?;

        self.emit(EditorEvent::Dressing(DressingEvent::ItemRemoved {
            id: id.clone(),
            index,
        }));
        if let Removal::DressingDeleted { name } = &removal {
            self.emit(EditorEvent::Dressing(DressingEvent::Removed {
                id: id.clone(),
                name: name.clone(),
            }));
        }
        if id.is_persisted() {
            self.sync_dressings();
        }
        Ok(removal)
    }

    /// Retry writing the persisted dressings after a failure
    pub fn sync_dressings(&mut self) -> bool {
        match self.assets.sync(self.storage.as_mut()) {
            Ok(()) => true,
            Err(err) => {
                self.report_storage_failure("dressings", &err);
                false
            }
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> Result<(), TransitionError> {
        route_event(event, &mut self.editor)
    }

    pub fn execute(&mut self, command: Command) -> CommandResult {
        command.execute(&mut self.editor).inspect_err(|err| {
            log::debug!("{:?} rejected: {}", command, err);
        })
    }

    /// Save the current composition. It stays on the canvas either way.
    pub fn save_project(&mut self, request: &SaveRequest) -> StorageResult<Project> {
        match ProjectStore::save(self.storage.as_mut(), &self.editor.composition, request) {
            Ok(project) => {
                self.emit(EditorEvent::ProjectSaved {
                    id: project.id,
                    lookbook: project.lookbook_label.clone(),
                });
                Ok(project)
            }
            Err(err) => {
                self.report_storage_failure("project", &err);
                Err(err)
            }
        }
    }

    pub fn projects(&self) -> StorageResult<Vec<Project>> {
        ProjectStore::list(self.storage.as_ref())
    }

    pub fn add_lookbook(&mut self, label: &str) -> StorageResult<bool> {
        self.lookbooks
            .add(label, self.storage.as_mut())
            .inspect_err(|err| self.report_storage_failure("lookbooks", err))
    }

    fn report_storage_failure(&self, operation: &'static str, err: &StorageError) {
        log::error!("Failed to persist {}: {}", operation, err);
        self.emit(EditorEvent::StorageFailed {
            operation,
            message: err.to_string(),
        });
    }

    fn emit(&self, event: EditorEvent) {
        self.editor.event_bus.emit(event);
    }
}
