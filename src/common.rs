//! Common types shared across multiple modules.
//!
//! Both enums are plain values. Whoever owns a gesture decides which cursor is
//! current; there is no process-wide cursor state.

use serde::{Deserialize, Serialize};

/// Pointer cursor requested from the host while hovering or dragging an overlay.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cursor {
    #[default]
    Default,
    Move,
    Grab,
    Grabbing,
    NsResize,
    EwResize,
    NeswResize,
    NwseResize,
}

impl Cursor {
    /// CSS cursor name understood by web map hosts (empty string resets the cursor).
    pub fn css_name(&self) -> &'static str {
        match self {
            Cursor::Default => "",
            Cursor::Move => "move",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
            Cursor::NsResize => "ns-resize",
            Cursor::EwResize => "ew-resize",
            Cursor::NeswResize => "nesw-resize",
            Cursor::NwseResize => "nwse-resize",
        }
    }
}

/// Layout visibility of a map layer.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Visible,
    None,
}
