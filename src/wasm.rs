use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::AppConfig;
use crate::controller::Controller;
use crate::dom::Dom;
use crate::ingest::{IngestEvent, IngestSettings, ingest_image};
use crate::message::{Command, Message};
use crate::storage::{LocalStore, ViewStorage};
use crate::wasm_file;

/// Browser application: the controller plus the page it draws on.
struct WebApp {
    controller: RefCell<Controller<LocalStore>>,
    dom: Dom,
    ingest: IngestSettings,
}

impl WebApp {
    /// Handle a message, redraw, and carry out any returned command.
    fn dispatch(self: &Rc<Self>, message: Message) {
        let command = self.controller.borrow_mut().update(message);
        self.render();

        if let Some(Command::PickFiles) = command {
            self.pick_files();
        }
    }

    fn render(&self) {
        let controller = self.controller.borrow();
        if let Err(e) = self.dom.render(controller.screen()) {
            log::error!("Failed to render: {:?}", e);
        }
    }

    /// Each picked file is decoded and stored from its own read callback.
    fn pick_files(self: &Rc<Self>) {
        let app = Rc::clone(self);
        wasm_file::pick_files(
            self.dom.file_input(),
            Rc::new(move |name: String, bytes: Vec<u8>| {
                let result = ingest_image(&bytes, &app.ingest);
                app.dispatch(Message::PhotoIngested(IngestEvent { name, result }));
            }),
        );
    }

    fn bind_handlers(self: &Rc<Self>) -> Result<(), JsValue> {
        let button = |id: &str, make: fn() -> Message| -> Result<(), JsValue> {
            let app = Rc::clone(self);
            self.dom.on_click(id, move || app.dispatch(make()))
        };

        button("addview", || Message::AddView)?;
        button("additem", || Message::AddItem)?;
        button("showview", || Message::ShowCurrentView)?;
        button("editview_back", || Message::Back)?;
        button("view_back", || Message::Back)?;

        let app = Rc::clone(self);
        self.dom.on_click("renameview", move || {
            let current = app.dom.view_name();
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Ok(Some(name)) = window.prompt_with_message_and_default("View name", &current) {
                app.dispatch(Message::RenameView(name));
            }
        })?;

        let app = Rc::clone(self);
        self.dom.on_list_action(move |message| app.dispatch(message))
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = AppConfig::load_from_local_storage();
    let prefs = &config.preferences;
    if let Err(e) = console_log::init_with_level(prefs.log_level.to_level()) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
    }
    log::info!("photoviews WASM starting...");

    let store = LocalStore::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let controller = Controller::new(ViewStorage::new(store))
        .with_placeholder_thumbnail(&prefs.placeholder_thumbnail);

    let app = Rc::new(WebApp {
        controller: RefCell::new(controller),
        dom: Dom::new()?,
        ingest: prefs.ingest_settings(),
    });
    app.bind_handlers()?;

    app.controller.borrow_mut().start();
    app.render();
    Ok(())
}
