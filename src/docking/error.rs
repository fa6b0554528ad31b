use crate::anchor::DockAnchor;

use super::panel::PanelId;

/// Why a docking operation was rejected. The layout is unchanged when one is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DockError {
    UnknownPanel(PanelId),

    /// `unpin` on a panel that is already in its own window.
    AlreadyFloating(PanelId),

    /// `redock` on a panel that is already on the grid.
    AlreadyDocked(PanelId),

    /// A panel can't be dropped onto itself.
    SelfDrop(PanelId),

    /// The target doesn't offer this anchor.
    AnchorDisabled { target: Option<PanelId>, anchor: DockAnchor },

    /// The target panel is floating, so it has no grid cell to dock next to.
    NotOnGrid(PanelId),
}

impl std::fmt::Display for DockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPanel(id) => write!(f, "unknown panel {id}"),
            Self::AlreadyFloating(id) => write!(f, "panel {id} is already floating"),
            Self::AlreadyDocked(id) => write!(f, "panel {id} is already docked"),
            Self::SelfDrop(id) => write!(f, "panel {id} can't be dropped onto itself"),
            Self::AnchorDisabled {
                target: Some(id),
                anchor,
            } => write!(f, "panel {id} does not accept drops at {anchor:?}"),
            Self::AnchorDisabled {
                target: None,
                anchor,
            } => write!(f, "container does not accept drops at {anchor:?}"),
            Self::NotOnGrid(id) => write!(f, "panel {id} is not docked in the grid"),
        }
    }
}

impl std::error::Error for DockError {}
