use egui::Rect;

use crate::anchor::{AnchorSet, DockAnchor};
use crate::docking::{DockError, DockingContainer, DockingOptions, DropTarget, PanelId};

/// Split direction with Dear ImGui `DockBuilder::SplitNode`-like semantics.
///
/// The direction indicates where the *side* panel is placed relative to the *main* panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SplitDirection {
    pub fn anchor(self) -> DockAnchor {
        match self {
            Self::Left => DockAnchor::Left,
            Self::Right => DockAnchor::Right,
            Self::Up => DockAnchor::Top,
            Self::Down => DockAnchor::Bottom,
        }
    }
}

/// Scripted construction of a [`DockingContainer`] layout.
///
/// ```
/// # use egui_dock_panels::{DockBuilder, DockingOptions, SplitDirection};
/// # let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1280.0, 720.0));
/// let mut b = DockBuilder::new(DockingOptions::default(), rect);
/// let viewer = b.panel("Viewer", vec!["viewer"]);
/// let timeline = b.split(viewer, SplitDirection::Down, 0.4, "Timeline", vec!["timeline"])?;
/// b.split(viewer, SplitDirection::Left, 0.25, "Library", vec!["media", "effects"])?;
/// b.auto_resize(timeline, true, false)?;
/// let container = b.finish();
/// # assert_eq!(container.panels().count(), 3);
/// # Ok::<(), egui_dock_panels::DockError>(())
/// ```
///
/// Unlike Dear ImGui, a split only divides the cell (or row) of `main`, not a whole dock node.
pub struct DockBuilder<Pane> {
    container: DockingContainer<Pane>,
}

impl<Pane> DockBuilder<Pane> {
    /// `rect` is the area the container is expected to cover; splits are sized against it.
    pub fn new(options: DockingOptions, rect: Rect) -> Self {
        let mut container = DockingContainer::new(options);
        container.set_rect(rect);
        Self { container }
    }

    /// Dock a panel as a new row at the bottom.
    #[must_use]
    pub fn panel(&mut self, title: impl Into<String>, tabs: Vec<Pane>) -> PanelId {
        self.container.add_panel(title, tabs)
    }

    /// Create a panel next to `main`.
    ///
    /// - `dir`: where to place the new panel relative to `main`
    /// - `side_fraction`: share of `main`'s cell (or row, for `Up`/`Down`) given to the new panel
    ///
    /// # Errors
    /// [`DockError::UnknownPanel`], [`DockError::AnchorDisabled`] or [`DockError::NotOnGrid`]
    /// when `main` can't be split in that direction.
    pub fn split(
        &mut self,
        main: PanelId,
        dir: SplitDirection,
        side_fraction: f32,
        title: impl Into<String>,
        tabs: Vec<Pane>,
    ) -> Result<PanelId, DockError> {
        debug_assert!(
            (0.0..=1.0).contains(&side_fraction),
            "side_fraction must be in 0.0..=1.0"
        );
        self.container.add_panel_split(
            title.into(),
            tabs,
            DropTarget::Panel(main),
            dir.anchor(),
            side_fraction.clamp(0.0, 1.0),
        )
    }

    /// Restrict the drop zones `panel` offers.
    ///
    /// # Errors
    /// [`DockError::UnknownPanel`].
    pub fn anchors(&mut self, panel: PanelId, anchors: AnchorSet) -> Result<(), DockError> {
        let panel = self
            .container
            .panel_mut(panel)
            .ok_or(DockError::UnknownPanel(panel))?;
        for anchor in DockAnchor::DIRECTIONAL {
            panel.enable_anchor(anchor, anchors.contains(anchor));
        }
        Ok(())
    }

    /// Whether `panel` takes a share of container resizes, per axis.
    ///
    /// # Errors
    /// [`DockError::UnknownPanel`].
    pub fn auto_resize(&mut self, panel: PanelId, x: bool, y: bool) -> Result<(), DockError> {
        self.container
            .panel_mut(panel)
            .ok_or(DockError::UnknownPanel(panel))?
            .set_auto_resize(x, y);
        Ok(())
    }

    pub fn finish(self) -> DockingContainer<Pane> {
        self.container
    }
}
