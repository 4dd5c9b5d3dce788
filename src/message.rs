//! Application message types for photoviews.
//!
//! Frontend events are turned into messages and handed to the
//! [`Controller`](crate::Controller) in the Elm architecture style.

use crate::ingest::IngestEvent;
use crate::model::ViewId;
use crate::panel::Panel;

/// Messages that can be sent to update application state.
#[derive(Debug)]
pub enum Message {
    // Main panel
    /// Create a new view and open it in the editor
    AddView,
    /// Open an existing view in the editor
    EditView(ViewId),
    /// Open an existing view in the viewer
    ShowView(ViewId),
    /// Delete a view and its index entry
    RemoveView(ViewId),

    // Editor panel
    /// Ask the frontend to pick image files for the current view
    AddItem,
    /// Remove the photo at this position from the current view
    RemoveItem(usize),
    /// Rename the current view
    RenameView(String),
    /// Switch to the viewer for the current view
    ShowCurrentView,

    // Editor and viewer panels
    /// Return to the view list
    Back,

    // Background
    /// An ingestion task finished
    PhotoIngested(IngestEvent),
}

impl Message {
    /// Dispatch table: whether this message has a handler in `panel`.
    pub fn accepted_in(&self, panel: Panel) -> bool {
        match (panel, self) {
            (_, Message::PhotoIngested(_)) => true,
            (
                Panel::Main,
                Message::AddView
                | Message::EditView(_)
                | Message::ShowView(_)
                | Message::RemoveView(_),
            ) => true,
            (
                Panel::EditView,
                Message::AddItem
                | Message::RemoveItem(_)
                | Message::RenameView(_)
                | Message::ShowCurrentView
                | Message::Back,
            ) => true,
            (Panel::View, Message::Back) => true,
            _ => false,
        }
    }

    /// Message for a click on a list row control.
    ///
    /// List rows carry their action and target as `data-action` plus
    /// `data-id` (a view id) or `data-index` (an item position).
    pub fn from_list_action(action: &str, value: &str) -> Option<Message> {
        match action {
            "show" => value.parse().ok().map(Message::ShowView),
            "edit" => value.parse().ok().map(Message::EditView),
            "remove" => value.parse().ok().map(Message::RemoveView),
            "remove-item" => value.trim().parse().ok().map(Message::RemoveItem),
            _ => None,
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Message::AddView => "AddView",
            Message::EditView(_) => "EditView",
            Message::ShowView(_) => "ShowView",
            Message::RemoveView(_) => "RemoveView",
            Message::AddItem => "AddItem",
            Message::RemoveItem(_) => "RemoveItem",
            Message::RenameView(_) => "RenameView",
            Message::ShowCurrentView => "ShowCurrentView",
            Message::Back => "Back",
            Message::PhotoIngested(_) => "PhotoIngested",
        }
    }
}

/// Work the controller hands back to the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open a file picker; each chosen file is added to whichever view is
    /// selected when it finishes loading
    PickFiles,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_table() {
        assert!(Message::AddView.accepted_in(Panel::Main));
        assert!(!Message::AddView.accepted_in(Panel::EditView));
        assert!(Message::RemoveItem(0).accepted_in(Panel::EditView));
        assert!(!Message::RemoveItem(0).accepted_in(Panel::View));
        assert!(Message::Back.accepted_in(Panel::View));
        assert!(!Message::Back.accepted_in(Panel::Main));
        assert!(!Message::AddItem.accepted_in(Panel::Main));
    }

    #[test]
    fn test_from_list_action() {
        assert!(matches!(
            Message::from_list_action("edit", "17"),
            Some(Message::EditView(ViewId(17)))
        ));
        assert!(matches!(
            Message::from_list_action("remove-item", "2"),
            Some(Message::RemoveItem(2))
        ));
        assert!(Message::from_list_action("remove", "x").is_none());
        assert!(Message::from_list_action("explode", "1").is_none());
    }
}
