//! The photoviews controller.
//!
//! Owns the transient UI state (visible panel, selected view) and the view
//! storage. Frontends feed it [`Message`]s and draw its [`Screen`].


use crate::constants::PLACEHOLDER_THUMBNAIL;
use crate::error::StorageError;
use crate::handlers;
use crate::ingest::IngestEvent;
use crate::message::{Command, Message};
use crate::model::ViewId;
use crate::panel::{Panel, Screen};
use crate::storage::{KeyValueStore, ViewStorage};

/// Panel state machine and CRUD dispatcher.
pub struct Controller<S> {
    storage: ViewStorage<S>,
    placeholder_thumbnail: String,
    current_view: Option<ViewId>,
    screen: Screen,
}

impl<S: KeyValueStore> Controller<S> {
    /// Create a controller over `storage`. No panel is visible until
    /// [`start`](Self::start) is called.
    pub fn new(storage: ViewStorage<S>) -> Self {
        Self {
            storage,
            placeholder_thumbnail: PLACEHOLDER_THUMBNAIL.to_string(),
            current_view: None,
            screen: Screen::default(),
        }
    }

    /// Set the thumbnail used for views without photos.
    pub fn with_placeholder_thumbnail(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder_thumbnail = placeholder.into();
        self
    }

    /// Show the main panel.
    pub fn start(&mut self) {
        self.set_panel(Panel::Main);
    }

    /// Visible panel.
    pub fn panel(&self) -> Option<Panel> {
        self.screen.panel
    }

    /// Selected view.
    pub fn current_view(&self) -> Option<ViewId> {
        self.current_view
    }

    /// Current render model.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Underlying view storage.
    pub fn storage(&self) -> &ViewStorage<S> {
        &self.storage
    }

    /// Handle one message. Returns work the frontend must carry out.
    pub fn update(&mut self, message: Message) -> Option<Command> {
        let Some(panel) = self.screen.panel else {
            log::warn!("Ignoring {} before start", message.name());
            return None;
        };

        if !message.accepted_in(panel) {
            log::warn!("Ignoring {} in panel {}", message.name(), panel.name());
            return None;
        }

        log::trace!("Handling {} in panel {}", message.name(), panel.name());
        match message {
            Message::AddView => self.add_view(),
            Message::EditView(id) => {
                self.current_view = Some(id);
                self.set_panel(Panel::EditView);
            }
            Message::ShowView(id) => {
                self.current_view = Some(id);
                self.set_panel(Panel::View);
            }
            Message::RemoveView(id) => self.remove_view(id),
            Message::AddItem => return self.add_item(),
            Message::RemoveItem(index) => self.remove_item(index),
            Message::RenameView(name) => self.rename_view(&name),
            Message::ShowCurrentView => self.set_panel(Panel::View),
            Message::Back => self.set_panel(Panel::Main),
            Message::PhotoIngested(event) => self.photo_ingested(event),
        }
        None
    }

    /// Switch panels. Re-entering the visible panel does nothing.
    fn set_panel(&mut self, panel: Panel) {
        if self.screen.panel == Some(panel) {
            return;
        }

        log::debug!("🔄 Switching to panel: {}", panel.name());
        self.screen.panel = Some(panel);
        match panel {
            Panel::Main => self.refresh_view_list(),
            Panel::EditView => self.refresh_items(),
            // The viewer is not refreshed on entry
            Panel::View => {}
        }
    }

    fn add_view(&mut self) {
        match handlers::add_view(&mut self.storage) {
            Ok(id) => {
                self.current_view = Some(id);
                self.set_panel(Panel::EditView);
            }
            Err(e) => log_storage_error("create view", &e),
        }
    }

    fn remove_view(&mut self, id: ViewId) {
        match handlers::remove_view(&mut self.storage, id) {
            Ok(_) => self.screen.views.retain(|entry| entry.id != id),
            Err(e) => log_storage_error("remove view", &e),
        }
    }

    fn add_item(&self) -> Option<Command> {
        if self.current_view.is_none() {
            log::warn!("No view selected, cannot add items");
            return None;
        }
        Some(Command::PickFiles)
    }

    fn remove_item(&mut self, index: usize) {
        let Some(id) = self.current_view else {
            return;
        };

        match handlers::remove_item(&mut self.storage, id, index) {
            Ok(true) => self.refresh_items(),
            Ok(false) => log::debug!("No item {} in view {}", index, id),
            Err(e) => log_storage_error("remove item", &e),
        }
    }

    fn rename_view(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            log::debug!("Ignoring empty view name");
            return;
        }
        let Some(id) = self.current_view else {
            return;
        };

        match handlers::rename_view(&mut self.storage, id, name) {
            Ok(Some(stored)) => self.screen.view_name = stored,
            Ok(None) => log::warn!("View {} no longer exists", id),
            Err(e) => log_storage_error("rename view", &e),
        }
    }

    /// A finished photo joins the view selected at completion time.
    fn photo_ingested(&mut self, event: IngestEvent) {
        let photo = match event.result {
            Ok(photo) => photo,
            Err(e) => {
                log::warn!("Skipping {}: {}", event.name, e);
                return;
            }
        };
        let Some(id) = self.current_view else {
            log::warn!("No view selected, dropping {}", event.name);
            return;
        };

        match handlers::append_photo(&mut self.storage, id, photo) {
            Ok(true) => {
                log::info!("📷 Added {} to view {}", event.name, id);
                self.refresh_items();
            }
            Ok(false) => log::warn!(
                "View {} was removed before {} finished loading",
                id,
                event.name
            ),
            Err(e) => log_storage_error("add photo", &e),
        }
    }

    /// Rebuild the main panel rows from storage.
    fn refresh_view_list(&mut self) {
        match handlers::view_list_entries(&self.storage, &self.placeholder_thumbnail) {
            Ok(entries) => self.screen.views = entries,
            Err(e) => log_storage_error("load view list", &e),
        }
    }

    /// Rebuild the editor heading and items of the selected view.
    fn refresh_items(&mut self) {
        let Some(id) = self.current_view else {
            return;
        };

        match handlers::view_items(&self.storage, id) {
            Ok(Some((name, items))) => {
                self.screen.view_name = name;
                self.screen.items = items;
            }
            Ok(None) => {
                log::warn!("View {} no longer exists", id);
                self.screen.view_name.clear();
                self.screen.items.clear();
            }
            Err(e) => log_storage_error("load view", &e),
        }
    }
}

fn log_storage_error(action: &str, error: &StorageError) {
    log::error!("Failed to {}: {}", action, error);
}
