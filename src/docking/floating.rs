use egui::{Vec2, ViewportBuilder, ViewportId};

use super::options::DockingOptions;
use super::panel::PanelId;

/// A native window hosting one unpinned panel.
#[derive(Clone, Debug)]
pub struct FloatingWindow {
    viewport_id: ViewportId,
    builder: ViewportBuilder,
}

impl FloatingWindow {
    pub(super) fn new(panel: PanelId, title: &str, size: Vec2, options: &DockingOptions) -> Self {
        let builder = ViewportBuilder::default()
            .with_title(title)
            .with_inner_size(size)
            .with_resizable(true)
            .with_decorations(options.floating_decorations);
        Self {
            viewport_id: ViewportId::from_hash_of(("egui_dock_panels_floating", panel)),
            builder,
        }
    }

    pub fn viewport_id(&self) -> ViewportId {
        self.viewport_id
    }

    pub fn builder(&self) -> &ViewportBuilder {
        &self.builder
    }

    pub fn title(&self) -> Option<&str> {
        self.builder.title.as_deref()
    }

    pub fn inner_size(&self) -> Option<Vec2> {
        self.builder.inner_size
    }
}
