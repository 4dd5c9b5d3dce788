//! DOM rendering for the browser frontend.
//!
//! The page provides the three panels and their static controls (see
//! `web/index.html`). Rows of the view and item lists are rebuilt from the
//! [`Screen`] and carry `data-action` attributes; clicks on them are handled
//! by one delegated listener per list.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement};

use crate::message::Message;
use crate::panel::{ItemEntry, Panel, Screen, ViewListEntry};

/// Handles to the static page elements.
pub struct Dom {
    document: Document,
    panels: Vec<(Panel, HtmlElement)>,
    views: Element,
    items: Element,
    view_name: Element,
    file_input: HtmlInputElement,
}

fn missing(id: &str) -> JsValue {
    JsValue::from_str(&format!("Missing element #{}", id))
}

impl Dom {
    /// Look up every element the frontend needs.
    pub fn new() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?;

        let by_id = |id: &str| document.get_element_by_id(id).ok_or_else(|| missing(id));

        let panels = Panel::ALL
            .iter()
            .map(|&panel| -> Result<(Panel, HtmlElement), JsValue> {
                Ok((panel, by_id(panel.name())?.dyn_into::<HtmlElement>()?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            views: by_id("views")?,
            items: by_id("items")?,
            view_name: by_id("viewname")?,
            file_input: by_id("newitem")?.dyn_into()?,
            panels,
            document,
        })
    }

    /// The hidden `<input type=file>` used for picking photos.
    pub fn file_input(&self) -> &HtmlInputElement {
        &self.file_input
    }

    /// Current text of the editor heading.
    pub fn view_name(&self) -> String {
        self.view_name.text_content().unwrap_or_default()
    }

    /// Call `handler` whenever the element `id` is clicked.
    pub fn on_click(&self, id: &str, handler: impl FnMut() + 'static) -> Result<(), JsValue> {
        let element = self.document.get_element_by_id(id).ok_or_else(|| missing(id))?;
        let mut handler = handler;
        let closure = Closure::wrap(Box::new(move |_event: Event| handler()) as Box<dyn FnMut(Event)>);
        element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget(); // Lives as long as the page
        Ok(())
    }

    /// Route clicks on list row controls to `dispatch`.
    pub fn on_list_action(&self, dispatch: impl Fn(Message) + 'static) -> Result<(), JsValue> {
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Ok(Some(control)) = target.closest("[data-action]") else {
                return;
            };
            let action = control.get_attribute("data-action").unwrap_or_default();
            let value = control
                .get_attribute("data-id")
                .or_else(|| control.get_attribute("data-index"))
                .unwrap_or_default();

            // Links would otherwise navigate to their #fragment
            event.prevent_default();
            match Message::from_list_action(&action, &value) {
                Some(message) => dispatch(message),
                None => log::warn!("Unknown list action {:?} ({:?})", action, value),
            }
        }) as Box<dyn FnMut(Event)>);

        for list in [&self.views, &self.items] {
            list.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        }
        closure.forget();
        Ok(())
    }

    /// Draw the screen.
    pub fn render(&self, screen: &Screen) -> Result<(), JsValue> {
        for (panel, element) in &self.panels {
            element.set_hidden(!screen.is_visible(*panel));
        }

        self.view_name.set_text_content(Some(&screen.view_name));
        self.render_views(&screen.views)?;
        self.render_items(&screen.items)?;
        Ok(())
    }

    fn render_views(&self, entries: &[ViewListEntry]) -> Result<(), JsValue> {
        self.views.set_text_content(Some(""));

        for entry in entries {
            let id = entry.id.to_string();
            let row = self.create("div", "viewsItem")?;

            let img = self.create("img", "viewsItemImg")?;
            img.set_attribute("src", &entry.thumbnail)?;
            row.append_child(&img)?;

            let link = self.create("a", "viewsItemName")?;
            link.set_attribute("href", &format!("#view-{}", id))?;
            link.set_text_content(Some(&entry.name));
            Self::set_action(&link, "show", "data-id", &id)?;
            row.append_child(&link)?;

            let edit = self.create("button", "")?;
            edit.set_text_content(Some("Edit"));
            Self::set_action(&edit, "edit", "data-id", &id)?;
            row.append_child(&edit)?;

            let remove = self.create("button", "")?;
            remove.set_text_content(Some("Remove"));
            Self::set_action(&remove, "remove", "data-id", &id)?;
            row.append_child(&remove)?;

            self.views.append_child(&row)?;
        }
        Ok(())
    }

    fn render_items(&self, items: &[ItemEntry]) -> Result<(), JsValue> {
        self.items.set_text_content(Some(""));

        for item in items {
            let row = self.create("div", "item")?;
            row.set_attribute("data-orientation", item.orientation.name())?;

            let img = self.create("img", "")?;
            img.set_attribute("src", &item.src)?;
            row.append_child(&img)?;
            row.append_child(&self.document.create_element("span")?)?;

            let remove = self.create("button", "")?;
            remove.set_text_content(Some("Remove"));
            Self::set_action(&remove, "remove-item", "data-index", &item.index.to_string())?;
            row.append_child(&remove)?;

            self.items.append_child(&row)?;
        }
        Ok(())
    }

    fn create(&self, tag: &str, class: &str) -> Result<Element, JsValue> {
        let element = self.document.create_element(tag)?;
        if !class.is_empty() {
            element.set_class_name(class);
        }
        Ok(element)
    }

    fn set_action(element: &Element, action: &str, key: &str, value: &str) -> Result<(), JsValue> {
        element.set_attribute("data-action", action)?;
        element.set_attribute(key, value)
    }
}
