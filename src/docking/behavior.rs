use egui::{Color32, Visuals, WidgetText};

use super::panel::PanelId;

/// Renders the application's surfaces inside the docking panels.
pub trait PanelBehavior<Pane> {
    /// Title of the tab showing `pane`.
    fn tab_title_for_pane(&mut self, pane: &Pane) -> WidgetText;

    /// The content of the active tab of `panel`.
    fn pane_ui(&mut self, ui: &mut egui::Ui, panel: PanelId, pane: &mut Pane);

    /// Fill behind the panel grid (visible through padding and margins).
    fn container_background(&self, visuals: &Visuals) -> Color32 {
        visuals.extreme_bg_color
    }

    fn panel_background(&self, visuals: &Visuals) -> Color32 {
        visuals.panel_fill
    }
}
