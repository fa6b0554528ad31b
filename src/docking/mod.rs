use std::collections::BTreeMap;

use egui::{Pos2, Rect};

mod behavior;
mod error;
mod floating;
mod grid;
mod integrity;
mod options;
mod panel;
mod ui;

#[cfg(test)]
mod container_tests;

pub use behavior::PanelBehavior;
pub use error::DockError;
pub use floating::FloatingWindow;
pub use grid::{GridCell, GridRow, PanelGrid};
pub use options::DockingOptions;
pub use panel::{DockState, DockingPanel, PanelId};

use crate::anchor::DockAnchor;
use crate::geometry::Thickness;
use crate::overlay::DockOverlay;
use grid::Side;

/// What a dragged panel is dropped onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropTarget {
    /// The container itself. `pointer` picks the row for Left/Right and the panel for Fill.
    Container { pointer: Pos2 },

    /// A docked panel.
    Panel(PanelId),
}

/// The root docking surface: a grid of docked panels, the floating panels, and the
/// container's own drop-zone overlay.
///
/// All panels are owned here. A panel is either on the grid ([`DockState::Docked`]) or in a
/// floating window ([`DockState::Floating`]), never both.
#[derive(Debug)]
pub struct DockingContainer<Pane> {
    pub options: DockingOptions,

    rect: Rect,
    grid: PanelGrid,
    panels: BTreeMap<PanelId, DockingPanel<Pane>>,
    floating: BTreeMap<PanelId, FloatingWindow>,
    overlay: DockOverlay,
    next_panel_id: u64,
}

impl<Pane> Default for DockingContainer<Pane> {
    fn default() -> Self {
        Self::new(DockingOptions::default())
    }
}

impl<Pane> DockingContainer<Pane> {
    pub fn new(options: DockingOptions) -> Self {
        let overlay = DockOverlay::new()
            .with_geometry(options.container_overlay_thickness, options.overlay_margin);
        Self {
            options,
            rect: Rect::ZERO,
            grid: PanelGrid::default(),
            panels: BTreeMap::new(),
            floating: BTreeMap::new(),
            overlay,
            next_panel_id: 1,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The container rect minus the padding: the area the grid fills.
    pub fn content_rect(&self) -> Rect {
        self.options.container_padding.shrink(self.rect)
    }

    pub fn grid(&self) -> &PanelGrid {
        &self.grid
    }

    pub fn panel(&self, id: PanelId) -> Option<&DockingPanel<Pane>> {
        self.panels.get(&id)
    }

    pub fn panel_mut(&mut self, id: PanelId) -> Option<&mut DockingPanel<Pane>> {
        self.panels.get_mut(&id)
    }

    pub fn panels(&self) -> impl Iterator<Item = &DockingPanel<Pane>> + '_ {
        self.panels.values()
    }

    pub fn floating_windows(&self) -> impl Iterator<Item = (PanelId, &FloatingWindow)> + '_ {
        self.floating.iter().map(|(id, window)| (*id, window))
    }

    pub fn floating_window(&self, id: PanelId) -> Option<&FloatingWindow> {
        self.floating.get(&id)
    }

    pub fn is_windowed(&self, id: PanelId) -> Option<bool> {
        self.panels.get(&id).map(|p| p.is_windowed())
    }

    /// Rect of a docked panel: its grid cell shrunk by the panel margin.
    pub fn panel_rect(&self, id: PanelId) -> Option<Rect> {
        self.grid
            .cell_rect(self.content_rect(), id)
            .map(|cell| self.options.panel_margin.shrink(cell))
    }

    // ------------------------------------------------------------------------
    // Configuration

    pub fn set_container_padding(&mut self, padding: Thickness) {
        self.options.container_padding = padding;
        self.relayout();
    }

    pub fn container_padding(&self) -> Thickness {
        self.options.container_padding
    }

    pub fn set_panel_margin(&mut self, margin: Thickness) {
        self.options.panel_margin = margin;
        self.relayout();
    }

    pub fn panel_margin(&self) -> Thickness {
        self.options.panel_margin
    }

    pub fn enable_anchor(&mut self, anchor: DockAnchor, enabled: bool) -> bool {
        self.overlay.enable_anchor(anchor, enabled)
    }

    pub fn is_anchor_enabled(&self, anchor: DockAnchor) -> bool {
        self.overlay.is_anchor_enabled(anchor)
    }

    pub fn overlay(&self) -> &DockOverlay {
        &self.overlay
    }

    // ------------------------------------------------------------------------
    // Layout

    /// Resize the container. The size change cascades into the grid rows and cells.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.overlay.set_rect(rect);
        self.relayout();
    }

    fn relayout(&mut self) {
        let size = self.content_rect().size();
        let panels = &self.panels;
        self.grid.fit(
            size,
            |id| panels.get(&id).is_none_or(|p| p.auto_resizes_x()),
            |id| panels.get(&id).is_none_or(|p| p.auto_resizes_y()),
        );

        let margin = self.options.panel_margin;
        for (id, cell) in self.grid.layout(self.content_rect()) {
            if let Some(panel) = self.panels.get_mut(&id) {
                panel.overlay_mut().set_rect(margin.shrink(cell));
            }
        }

        #[cfg(debug_assertions)]
        for issue in integrity::container_integrity_issues(self) {
            log::warn!("{issue}");
        }
    }

    // ------------------------------------------------------------------------
    // Panels

    fn create_panel(&mut self, title: String, tabs: Vec<Pane>) -> PanelId {
        let id = PanelId::from_u64(self.next_panel_id);
        self.next_panel_id += 1;
        let overlay = DockOverlay::new()
            .with_geometry(self.options.overlay_thickness, self.options.overlay_margin);
        self.panels
            .insert(id, DockingPanel::new(id, title, tabs, overlay));
        id
    }

    /// Create a panel and dock it as a new row at the bottom of the grid
    /// (or as the only cell of an empty grid).
    pub fn add_panel(&mut self, title: impl Into<String>, tabs: Vec<Pane>) -> PanelId {
        let id = self.create_panel(title.into(), tabs);
        self.append_row(id);
        self.relayout();
        log::debug!("added panel {id}");
        id
    }

    /// Create a panel and dock it relative to `target`.
    ///
    /// With [`DockAnchor::Fill`] on a panel the new tabs are merged into that panel and its
    /// id is returned.
    ///
    /// # Errors
    /// [`DockError::UnknownPanel`], [`DockError::AnchorDisabled`] or [`DockError::NotOnGrid`]
    /// when `target` can't take a panel at `anchor`. Nothing is created then.
    pub fn add_panel_at(
        &mut self,
        title: impl Into<String>,
        tabs: Vec<Pane>,
        target: DropTarget,
        anchor: DockAnchor,
    ) -> Result<PanelId, DockError> {
        self.add_panel_split(title.into(), tabs, target, anchor, 0.5)
    }

    pub(crate) fn add_panel_split(
        &mut self,
        title: String,
        tabs: Vec<Pane>,
        target: DropTarget,
        anchor: DockAnchor,
        fraction: f32,
    ) -> Result<PanelId, DockError> {
        self.validate_drop(None, target, anchor)?;
        let id = self.create_panel(title, tabs);
        let holder = self.insert(id, target, anchor, fraction);
        self.relayout();
        log::debug!("added panel {id} at {target:?} {anchor:?}");
        Ok(holder)
    }

    /// Remove a panel, docked or floating, and hand it back.
    pub fn remove_panel(&mut self, id: PanelId) -> Option<DockingPanel<Pane>> {
        let panel = self.panels.remove(&id)?;
        self.grid.remove(id);
        self.floating.remove(&id);
        self.relayout();
        log::debug!("removed panel {id}");
        Some(panel)
    }

    // ------------------------------------------------------------------------
    // Docking transitions

    /// Take a docked panel out of the grid and show it in its own window.
    ///
    /// # Errors
    /// [`DockError::UnknownPanel`], or [`DockError::AlreadyFloating`] if it is already
    /// in a window.
    pub fn unpin(&mut self, id: PanelId) -> Result<(), DockError> {
        let last_rect = self.panel_rect(id).filter(|r| r.is_positive());
        let panel = self.panels.get_mut(&id).ok_or(DockError::UnknownPanel(id))?;
        panel.mark_floating()?;

        let size = last_rect
            .map(|r| r.size())
            .unwrap_or(self.options.default_floating_size)
            .max(self.options.min_floating_size);
        let window = FloatingWindow::new(id, panel.title(), size, &self.options);

        self.grid.remove(id);
        self.floating.insert(id, window);
        self.relayout();
        log::debug!("unpinned panel {id}");
        Ok(())
    }

    /// Dock a floating panel back into the grid.
    ///
    /// # Errors
    /// [`DockError::AlreadyDocked`] if the panel is on the grid, otherwise as
    /// [`Self::move_panel`].
    pub fn redock(
        &mut self,
        id: PanelId,
        target: DropTarget,
        anchor: DockAnchor,
    ) -> Result<(), DockError> {
        let panel = self.panels.get(&id).ok_or(DockError::UnknownPanel(id))?;
        if !panel.is_windowed() {
            return Err(DockError::AlreadyDocked(id));
        }
        self.move_panel(id, target, anchor)
    }

    /// Move a panel (docked or floating) to `target`.
    ///
    /// With [`DockAnchor::Fill`] the panel's tabs are merged into the target panel and the
    /// moved panel is destroyed.
    ///
    /// # Errors
    /// [`DockError::UnknownPanel`] for an unknown panel or target, [`DockError::SelfDrop`],
    /// [`DockError::AnchorDisabled`] and [`DockError::NotOnGrid`]. The layout is unchanged
    /// then.
    pub fn move_panel(
        &mut self,
        id: PanelId,
        target: DropTarget,
        anchor: DockAnchor,
    ) -> Result<(), DockError> {
        if !self.panels.contains_key(&id) {
            return Err(DockError::UnknownPanel(id));
        }
        self.validate_drop(Some(id), target, anchor)?;

        self.detach(id);
        self.insert(id, target, anchor, 0.5);
        self.relayout();
        log::debug!("moved panel {id} to {target:?} {anchor:?}");
        Ok(())
    }

    /// Dock a floating panel wherever the container accepts it, preferring the bottom.
    fn redock_anywhere(&mut self, id: PanelId) -> Result<(), DockError> {
        let anchor = [
            DockAnchor::Bottom,
            DockAnchor::Right,
            DockAnchor::Left,
            DockAnchor::Top,
        ]
        .into_iter()
        .find(|&a| self.overlay.is_anchor_enabled(a))
        .unwrap_or(DockAnchor::Fill);
        let pointer = self.content_rect().center();
        self.redock(id, DropTarget::Container { pointer }, anchor)
    }

    fn validate_drop(
        &self,
        dragged: Option<PanelId>,
        target: DropTarget,
        anchor: DockAnchor,
    ) -> Result<(), DockError> {
        match target {
            DropTarget::Panel(target_id) => {
                if dragged == Some(target_id) {
                    return Err(DockError::SelfDrop(target_id));
                }
                let panel = self
                    .panels
                    .get(&target_id)
                    .ok_or(DockError::UnknownPanel(target_id))?;
                if !panel.is_anchor_enabled(anchor) {
                    return Err(DockError::AnchorDisabled {
                        target: Some(target_id),
                        anchor,
                    });
                }
                if !self.grid.contains(target_id) {
                    return Err(DockError::NotOnGrid(target_id));
                }
            }
            DropTarget::Container { .. } => {
                if !self.overlay.is_anchor_enabled(anchor) {
                    return Err(DockError::AnchorDisabled {
                        target: None,
                        anchor,
                    });
                }
            }
        }
        Ok(())
    }

    /// Take a panel off the grid or out of its window, leaving it docked-but-unplaced.
    fn detach(&mut self, id: PanelId) {
        if self.grid.remove(id) {
            return;
        }
        if self.floating.remove(&id).is_some() {
            if let Some(panel) = self.panels.get_mut(&id) {
                if let Err(err) = panel.mark_docked() {
                    log::warn!("detaching floating panel: {err}");
                }
            }
        }
    }

    fn append_row(&mut self, id: PanelId) {
        let content = self.content_rect();
        match self.grid.rows().len() {
            0 => self.grid.insert_first(id, content.size()),
            rows => self
                .grid
                .insert_row(rows - 1, Side::After, id, content.width(), 0.5),
        }
    }

    /// Place an unplaced panel. Returns the panel that holds its tabs afterwards.
    fn insert(
        &mut self,
        id: PanelId,
        target: DropTarget,
        anchor: DockAnchor,
        fraction: f32,
    ) -> PanelId {
        let content = self.content_rect();
        match target {
            DropTarget::Panel(target_id) => {
                let Some((row, column)) = self.grid.position(target_id) else {
                    self.append_row(id);
                    return id;
                };
                match anchor {
                    DockAnchor::Left => {
                        self.grid
                            .insert_beside((row, column), Side::Before, id, fraction);
                    }
                    DockAnchor::Right => {
                        self.grid
                            .insert_beside((row, column), Side::After, id, fraction);
                    }
                    DockAnchor::Top => {
                        self.grid
                            .insert_row(row, Side::Before, id, content.width(), fraction);
                    }
                    DockAnchor::Bottom => {
                        self.grid
                            .insert_row(row, Side::After, id, content.width(), fraction);
                    }
                    DockAnchor::Fill => return self.merge_into(id, target_id),
                }
            }
            DropTarget::Container { .. } if self.grid.is_empty() => {
                self.grid.insert_first(id, content.size());
            }
            DropTarget::Container { pointer } => {
                let rows = self.grid.rows().len();
                match anchor {
                    DockAnchor::Top => {
                        self.grid
                            .insert_row(0, Side::Before, id, content.width(), fraction);
                    }
                    DockAnchor::Bottom => {
                        self.grid
                            .insert_row(rows - 1, Side::After, id, content.width(), fraction);
                    }
                    DockAnchor::Left | DockAnchor::Right => {
                        let row = self.grid.row_at(content, pointer.y).unwrap_or(0);
                        let (column, side) = if anchor == DockAnchor::Left {
                            (0, Side::Before)
                        } else {
                            (self.grid.rows()[row].cells.len() - 1, Side::After)
                        };
                        self.grid.insert_beside((row, column), side, id, fraction);
                    }
                    DockAnchor::Fill => match self.grid.panel_at(content, pointer) {
                        Some(target_id) if target_id != id => {
                            return self.merge_into(id, target_id);
                        }
                        _ => self.append_row(id),
                    },
                }
            }
        }
        id
    }

    /// Move all tabs of `id` into `target` and destroy `id`.
    fn merge_into(&mut self, id: PanelId, target: PanelId) -> PanelId {
        let Some(mut panel) = self.panels.remove(&id) else {
            return target;
        };
        self.floating.remove(&id);
        let tabs = panel.take_tabs();
        if let Some(target_panel) = self.panels.get_mut(&target) {
            target_panel.merge_tabs(tabs);
        }
        log::debug!("merged panel {id} into {target}");
        target
    }

    // ------------------------------------------------------------------------
    // Drop targeting

    /// Feed the pointer to all overlays and report where a drop would land.
    ///
    /// The container's edge zones win over the panel under the pointer. The dragged panel
    /// never targets itself.
    pub fn drop_target_at(
        &mut self,
        dragged: Option<PanelId>,
        pointer: Option<Pos2>,
    ) -> Option<(DropTarget, DockAnchor)> {
        self.overlay.update_pointer(pointer);
        let container_hit = self.overlay.current_anchor();

        if let (Some(pointer), Some(anchor)) = (pointer, container_hit) {
            if anchor.is_directional() {
                self.exit_panel_overlays();
                return Some((DropTarget::Container { pointer }, anchor));
            }
        }

        let mut hit = None;
        for id in self.grid.panel_ids().collect::<Vec<_>>() {
            let Some(panel) = self.panels.get_mut(&id) else {
                continue;
            };
            let overlay = panel.overlay_mut();
            overlay.update_pointer(pointer.filter(|_| dragged != Some(id)));
            if let Some(anchor) = overlay.current_anchor() {
                hit = Some((DropTarget::Panel(id), anchor));
            }
        }
        if hit.is_some() {
            self.overlay.pointer_exited();
            return hit;
        }

        if let (Some(pointer), Some(DockAnchor::Fill)) = (pointer, container_hit) {
            if self.grid.is_empty() {
                return Some((DropTarget::Container { pointer }, DockAnchor::Fill));
            }
        }
        self.overlay.pointer_exited();
        None
    }

    fn exit_panel_overlays(&mut self) {
        for panel in self.panels.values_mut() {
            panel.overlay_mut().pointer_exited();
        }
    }

    /// Hide every overlay.
    pub fn clear_drop_overlays(&mut self) {
        self.overlay.pointer_exited();
        self.exit_panel_overlays();
    }

    pub fn paint_drop_overlays(&self, painter: &egui::Painter) {
        let color = self.options.overlay_color;
        for id in self.grid.panel_ids() {
            if let Some(panel) = self.panels.get(&id) {
                panel.overlay().paint(painter, color);
            }
        }
        self.overlay.paint(painter, color);
    }
}
