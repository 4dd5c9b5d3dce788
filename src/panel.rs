//! Panels and the render model shown by the frontends.

use crate::model::{Orientation, ViewId};

/// The three mutually exclusive UI panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// List of all views
    Main,
    /// Editor for the current view
    EditView,
    /// Viewer for the current view
    View,
}

impl Panel {
    /// All panels, in display order.
    pub const ALL: [Panel; 3] = [Panel::Main, Panel::EditView, Panel::View];

    /// Stable name of the panel, also used as its DOM element id.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Main => "main",
            Panel::EditView => "editview",
            Panel::View => "view",
        }
    }
}

/// One row of the view list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewListEntry {
    /// Id of the listed view
    pub id: ViewId,
    /// Display name
    pub name: String,
    /// First photo's data URL, or the placeholder thumbnail
    pub thumbnail: String,
}

/// One photo in the editor's item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    /// Position in the view's photo sequence
    pub index: usize,
    /// Data URL of the photo
    pub src: String,
    /// Stored orientation
    pub orientation: Orientation,
}

/// What the frontends draw.
///
/// Each section is only rebuilt when its panel is entered or its data is
/// edited, so a section can be stale while another panel is visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    /// Visible panel, `None` before the controller starts
    pub panel: Option<Panel>,
    /// Rows of the main panel
    pub views: Vec<ViewListEntry>,
    /// Heading of the editor panel
    pub view_name: String,
    /// Photos of the editor panel
    pub items: Vec<ItemEntry>,
}

impl Screen {
    /// Check whether `panel` is the visible one.
    pub fn is_visible(&self, panel: Panel) -> bool {
        self.panel == Some(panel)
    }
}
