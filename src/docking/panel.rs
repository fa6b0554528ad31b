use crate::anchor::DockAnchor;
use crate::overlay::DockOverlay;

use super::error::DockError;

/// Identifies a panel within its [`super::DockingContainer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PanelId(u64);

impl PanelId {
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a panel currently lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DockState {
    /// Owned by a grid cell of the container.
    #[default]
    Docked,

    /// Shown in its own native window.
    Floating,
}

/// A tabbed holder of content surfaces with its own drop-zone overlay.
///
/// Panels are owned by a [`super::DockingContainer`]; moving one between the grid and a
/// floating window goes through the container (`unpin`, `redock`, `move_panel`).
#[derive(Debug)]
pub struct DockingPanel<Pane> {
    id: PanelId,
    title: String,
    tabs: Vec<Pane>,
    active: usize,
    state: DockState,
    overlay: DockOverlay,
    resizes_x: bool,
    resizes_y: bool,
}

impl<Pane> DockingPanel<Pane> {
    pub(super) fn new(id: PanelId, title: String, tabs: Vec<Pane>, overlay: DockOverlay) -> Self {
        Self {
            id,
            title,
            tabs,
            active: 0,
            state: DockState::Docked,
            overlay,
            resizes_x: true,
            resizes_y: true,
        }
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    // ------------------------------------------------------------------------
    // Tabs

    pub fn tabs(&self) -> &[Pane] {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut [Pane] {
        &mut self.tabs
    }

    pub fn active_tab(&self) -> usize {
        self.active
    }

    /// Returns `false` if `index` is out of range.
    pub fn set_active_tab(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        self.active = index;
        true
    }

    /// Append a tab and make it active. Returns its index.
    pub fn add_tab(&mut self, pane: Pane) -> usize {
        self.tabs.push(pane);
        self.active = self.tabs.len() - 1;
        self.active
    }

    pub fn remove_tab(&mut self, index: usize) -> Option<Pane> {
        if index >= self.tabs.len() {
            return None;
        }
        let pane = self.tabs.remove(index);
        if self.active > index || self.active >= self.tabs.len() {
            self.active = self.active.saturating_sub(1);
        }
        Some(pane)
    }

    /// The surface of the active tab.
    pub fn content(&self) -> Option<&Pane> {
        self.tabs.get(self.active)
    }

    pub fn content_mut(&mut self) -> Option<&mut Pane> {
        self.tabs.get_mut(self.active)
    }

    pub(super) fn take_tabs(&mut self) -> Vec<Pane> {
        self.active = 0;
        std::mem::take(&mut self.tabs)
    }

    /// Append another panel's tabs; the first merged tab becomes active.
    pub(super) fn merge_tabs(&mut self, tabs: Vec<Pane>) {
        if tabs.is_empty() {
            return;
        }
        let first = self.tabs.len();
        self.tabs.extend(tabs);
        self.active = first;
    }

    // ------------------------------------------------------------------------
    // Docking state

    pub fn state(&self) -> DockState {
        self.state
    }

    /// `true` while the panel is shown in its own window.
    pub fn is_windowed(&self) -> bool {
        self.state == DockState::Floating
    }

    pub(super) fn mark_floating(&mut self) -> Result<(), DockError> {
        if self.state == DockState::Floating {
            return Err(DockError::AlreadyFloating(self.id));
        }
        self.state = DockState::Floating;
        self.overlay.pointer_exited();
        Ok(())
    }

    pub(super) fn mark_docked(&mut self) -> Result<(), DockError> {
        if self.state == DockState::Docked {
            return Err(DockError::AlreadyDocked(self.id));
        }
        self.state = DockState::Docked;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Anchors

    pub fn enable_anchor(&mut self, anchor: DockAnchor, enabled: bool) -> bool {
        self.overlay.enable_anchor(anchor, enabled)
    }

    pub fn is_anchor_enabled(&self, anchor: DockAnchor) -> bool {
        self.overlay.is_anchor_enabled(anchor)
    }

    pub fn overlay(&self) -> &DockOverlay {
        &self.overlay
    }

    pub(super) fn overlay_mut(&mut self) -> &mut DockOverlay {
        &mut self.overlay
    }

    // ------------------------------------------------------------------------
    // Resizing

    /// Whether this panel's column takes a share of horizontal container resizes.
    pub fn auto_resizes_x(&self) -> bool {
        self.resizes_x
    }

    /// Whether this panel's row takes a share of vertical container resizes.
    pub fn auto_resizes_y(&self) -> bool {
        self.resizes_y
    }

    pub fn set_auto_resize(&mut self, x: bool, y: bool) {
        self.resizes_x = x;
        self.resizes_y = y;
    }
}
