use egui::{Color32, Vec2};

use crate::geometry::Thickness;
use crate::overlay::{DEFAULT_OVERLAY_MARGIN, DEFAULT_OVERLAY_THICKNESS};
use crate::split::{DEFAULT_RESIZER_THICKNESS, Orientation, SplitContainer};

/// Options for [`super::DockingContainer`].
#[derive(Clone, Debug)]
pub struct DockingOptions {
    /// Depth of the edge drop zones of each panel overlay.
    pub overlay_thickness: f32,

    /// Visual gap between painted drop zones. Does not affect hit-testing.
    pub overlay_margin: f32,

    /// Depth of the container's own edge zones.
    ///
    /// These win over the zones of the panel under the pointer, so keep them narrow.
    pub container_overlay_thickness: f32,

    /// Base colour of the drop zones; multiplied by the zone opacity when painted.
    pub overlay_color: Color32,

    /// Space between the container edge and the panel grid.
    pub container_padding: Thickness,

    /// Space around each panel inside its grid cell.
    pub panel_margin: Thickness,

    /// Divider thickness for split containers created by the application.
    pub resizer_thickness: f32,

    /// Height of the tab strip on top of each panel.
    pub tab_bar_height: f32,

    /// Size of a floating window when the panel had no rect yet.
    pub default_floating_size: Vec2,

    /// Smallest size a floating window is opened with.
    pub min_floating_size: Vec2,

    /// Whether floating windows get a native title bar and frame.
    pub floating_decorations: bool,

    /// Tear a panel off into a floating window when its tab is released outside the container.
    pub unpin_on_release_outside: bool,
}

impl Default for DockingOptions {
    fn default() -> Self {
        Self {
            overlay_thickness: DEFAULT_OVERLAY_THICKNESS,
            overlay_margin: DEFAULT_OVERLAY_MARGIN,
            container_overlay_thickness: 24.0,
            overlay_color: Color32::WHITE,
            container_padding: Thickness::default(),
            panel_margin: Thickness::default(),
            resizer_thickness: DEFAULT_RESIZER_THICKNESS,
            tab_bar_height: 24.0,
            default_floating_size: Vec2::new(480.0, 320.0),
            min_floating_size: Vec2::new(200.0, 120.0),
            floating_decorations: true,
            unpin_on_release_outside: true,
        }
    }
}

impl DockingOptions {
    /// An empty split container using [`Self::resizer_thickness`].
    pub fn split_container<Child>(&self, orientation: Orientation) -> SplitContainer<Child> {
        let mut split = SplitContainer::new(orientation);
        split.set_resizer_thickness(self.resizer_thickness);
        split
    }
}
