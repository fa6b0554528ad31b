//! Docking layout for egui: dockable tabbed panels in a grid, drop-zone overlays for
//! drag-and-drop docking, floating panel windows, and a two-slot split container.
//!
//! The entry point is [`DockingContainer`]. Show it with [`DockingContainer::ui`] and a
//! [`PanelBehavior`] that renders your panes.

#![forbid(unsafe_code)]

pub mod anchor;
pub mod dock_builder;
pub mod docking;
pub mod geometry;
pub mod overlay;
pub mod split;

pub use anchor::{AnchorSet, DockAnchor};
pub use dock_builder::{DockBuilder, SplitDirection};
pub use docking::{
    DockError, DockState, DockingContainer, DockingOptions, DockingPanel, DropTarget,
    FloatingWindow, GridCell, GridRow, PanelBehavior, PanelGrid, PanelId,
};
pub use geometry::Thickness;
pub use overlay::DockOverlay;
pub use split::{InstallError, Orientation, SplitContainer, SplitSlot};
