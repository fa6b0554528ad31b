use egui::{
    Align, Context, DragAndDrop, Id, LayerId, Layout, Order, Rect, Sense, UiBuilder, ViewportClass,
};

use super::behavior::PanelBehavior;
use super::panel::{DockingPanel, PanelId};
use super::DockingContainer;

/// Drag-and-drop payload: a panel being dragged by one of its tabs.
#[derive(Clone, Copy, Debug)]
struct PanelDrag {
    panel: PanelId,
}

impl<Pane> DockingContainer<Pane> {
    /// Show the container in the remaining space of `ui`, plus its floating windows.
    pub fn ui(&mut self, ui: &mut egui::Ui, behavior: &mut dyn PanelBehavior<Pane>) {
        let rect = ui.available_rect_before_wrap();
        self.set_rect(rect);
        ui.painter()
            .rect_filled(rect, 0.0, behavior.container_background(ui.visuals()));

        let tab_bar_height = self.options.tab_bar_height;
        let margin = self.options.panel_margin;
        for (id, cell) in self.grid.layout(self.content_rect()) {
            if let Some(panel) = self.panels.get_mut(&id) {
                panel_ui(ui, margin.shrink(cell), panel, behavior, tab_bar_height, true);
            }
        }

        self.drag_ui(ui);
        self.floating_ui(ui.ctx(), behavior);
        ui.advance_cursor_after_rect(rect);
    }

    fn drag_ui(&mut self, ui: &egui::Ui) {
        let ctx = ui.ctx();
        let Some(payload) = DragAndDrop::payload::<PanelDrag>(ctx) else {
            self.clear_drop_overlays();
            return;
        };
        let dragged = payload.panel;
        let pointer = ctx.input(|i| i.pointer.latest_pos());
        let target = self.drop_target_at(Some(dragged), pointer);

        let painter = ctx.layer_painter(LayerId::new(
            Order::Foreground,
            ui.id().with("egui_dock_panels_overlay"),
        ));
        self.paint_drop_overlays(&painter);

        if !ctx.input(|i| i.pointer.any_released()) {
            return;
        }
        DragAndDrop::clear_payload(ctx);
        self.clear_drop_overlays();

        match target {
            Some((target, anchor)) => {
                if let Err(err) = self.move_panel(dragged, target, anchor) {
                    log::warn!("drop rejected: {err}");
                }
            }
            None => {
                let outside = pointer.is_none_or(|p| !self.rect.contains(p));
                if outside && self.options.unpin_on_release_outside && self.grid.contains(dragged) {
                    if let Err(err) = self.unpin(dragged) {
                        log::warn!("tear-off rejected: {err}");
                    }
                }
            }
        }
    }

    fn floating_ui(&mut self, ctx: &Context, behavior: &mut dyn PanelBehavior<Pane>) {
        let windows: Vec<_> = self
            .floating
            .iter()
            .map(|(id, window)| (*id, window.clone()))
            .collect();
        let tab_bar_height = self.options.tab_bar_height;

        let mut closed = Vec::new();
        for (id, window) in windows {
            let Some(panel) = self.panels.get_mut(&id) else {
                continue;
            };

            let viewport_id = window.viewport_id();
            let builder = window.builder().clone();
            let close_requested = ctx.show_viewport_immediate(viewport_id, builder, |ctx, class| {
                if matches!(class, ViewportClass::Embedded) {
                    // The backend can't open native windows: fall back to an egui window.
                    let mut open = true;
                    egui::Window::new(panel.title().to_owned())
                        .id(Id::new(viewport_id))
                        .open(&mut open)
                        .resizable(true)
                        .show(ctx, |ui| {
                            let rect = ui.available_rect_before_wrap();
                            panel_ui(ui, rect, panel, behavior, tab_bar_height, false);
                        });
                    !open
                } else {
                    egui::CentralPanel::default().show(ctx, |ui| {
                        let rect = ui.max_rect();
                        panel_ui(ui, rect, panel, behavior, tab_bar_height, false);
                    });
                    ctx.input(|i| i.viewport().close_requested())
                }
            });
            if close_requested {
                closed.push(id);
            }
        }

        for id in closed {
            if let Err(err) = self.redock_anywhere(id) {
                log::warn!("could not redock closed window of panel {id}: {err}");
            }
        }
    }
}

fn panel_ui<Pane>(
    ui: &mut egui::Ui,
    rect: Rect,
    panel: &mut DockingPanel<Pane>,
    behavior: &mut dyn PanelBehavior<Pane>,
    tab_bar_height: f32,
    allow_drag: bool,
) {
    if !rect.is_positive() {
        return;
    }
    let id = panel.id();
    let mut ui = ui.new_child(
        UiBuilder::new()
            .max_rect(rect)
            .id_salt(("egui_dock_panels_panel", id)),
    );
    ui.set_clip_rect(rect);
    ui.painter()
        .rect_filled(rect, 0.0, behavior.panel_background(ui.visuals()));

    let (tab_rect, content_rect) =
        rect.split_top_bottom_at_y((rect.top() + tab_bar_height).min(rect.bottom()));
    tab_bar_ui(&mut ui, tab_rect, panel, behavior, allow_drag);

    if content_rect.is_positive() {
        let mut content_ui = ui.new_child(UiBuilder::new().max_rect(content_rect.shrink(2.0)));
        if let Some(pane) = panel.content_mut() {
            behavior.pane_ui(&mut content_ui, id, pane);
        }
    }
}

fn tab_bar_ui<Pane>(
    ui: &mut egui::Ui,
    rect: Rect,
    panel: &mut DockingPanel<Pane>,
    behavior: &mut dyn PanelBehavior<Pane>,
    allow_drag: bool,
) {
    let titles: Vec<egui::WidgetText> = panel
        .tabs()
        .iter()
        .map(|pane| behavior.tab_title_for_pane(pane))
        .collect();
    let id = panel.id();

    let mut bar = ui.new_child(
        UiBuilder::new()
            .max_rect(rect)
            .layout(Layout::left_to_right(Align::Center)),
    );
    bar.painter()
        .rect_filled(rect, 0.0, bar.visuals().faint_bg_color);

    let mut clicked = None;
    for (index, title) in titles.into_iter().enumerate() {
        let response = bar.selectable_label(index == panel.active_tab(), title);
        if response.clicked() {
            clicked = Some(index);
        }
        if allow_drag {
            let drag = bar.interact(response.rect, response.id.with("drag"), Sense::drag());
            if drag.drag_started() {
                log::trace!("started dragging panel {id}");
                DragAndDrop::set_payload(bar.ctx(), PanelDrag { panel: id });
            }
        }
    }
    if let Some(index) = clicked {
        panel.set_active_tab(index);
    }
}

#[cfg(test)]
mod tests {
    use egui::{Event, Modifiers, PointerButton, Pos2, RawInput, Vec2, WidgetText, pos2};

    use super::*;

    struct Labels;

    impl PanelBehavior<&'static str> for Labels {
        fn tab_title_for_pane(&mut self, pane: &&'static str) -> WidgetText {
            (*pane).into()
        }

        fn pane_ui(&mut self, ui: &mut egui::Ui, _panel: PanelId, pane: &mut &'static str) {
            ui.label(*pane);
        }
    }

    /// One frame of `container.ui` in an 800x600 screen, optionally with a panel being dragged.
    fn run_pass(
        ctx: &Context,
        container: &mut DockingContainer<&'static str>,
        events: Vec<Event>,
        dragged: Option<PanelId>,
    ) {
        let raw = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
            events,
            ..Default::default()
        };
        ctx.begin_pass(raw);
        if let Some(panel) = dragged {
            DragAndDrop::set_payload(ctx, PanelDrag { panel });
        }
        egui::CentralPanel::default().show(ctx, |ui| container.ui(ui, &mut Labels));
        let _ = ctx.end_pass();
    }

    fn release_at(pos: Pos2) -> Vec<Event> {
        vec![
            Event::PointerMoved(pos),
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: false,
                modifiers: Modifiers::NONE,
            },
        ]
    }

    /// Viewer above library, laid out by a first frame.
    fn editor() -> (Context, DockingContainer<&'static str>, PanelId, PanelId) {
        let ctx = Context::default();
        let mut container = DockingContainer::default();
        let viewer = container.add_panel("Viewer", vec!["viewer"]);
        let library = container.add_panel("Library", vec!["media"]);
        run_pass(&ctx, &mut container, Vec::new(), None);
        (ctx, container, viewer, library)
    }

    fn row_ids(container: &DockingContainer<&'static str>) -> Vec<Vec<PanelId>> {
        container
            .grid()
            .rows()
            .iter()
            .map(|row| row.cells.iter().map(|c| c.panel).collect())
            .collect()
    }

    #[test]
    fn release_over_left_zone_docks_beside_target() {
        let (ctx, mut container, viewer, library) = editor();
        let rect = container.panel_rect(viewer).expect("viewer is docked");
        // Inside the viewer's left zone, clear of the container's own edge zones.
        let pointer = pos2(rect.left() + 40.0, rect.center().y);

        run_pass(&ctx, &mut container, release_at(pointer), Some(library));

        assert_eq!(row_ids(&container), vec![vec![library, viewer]]);
        assert_eq!(container.is_windowed(library), Some(false));
        assert!(!container.overlay().is_visible());
    }

    #[test]
    fn release_outside_tears_panel_off() {
        let (ctx, mut container, viewer, library) = editor();

        run_pass(&ctx, &mut container, release_at(pos2(-20.0, -20.0)), Some(library));

        assert_eq!(container.is_windowed(library), Some(true));
        assert!(container.floating_window(library).is_some());
        assert_eq!(row_ids(&container), vec![vec![viewer]]);
    }

    #[test]
    fn release_outside_keeps_panel_when_tear_off_is_disabled() {
        let (ctx, mut container, viewer, library) = editor();
        container.options.unpin_on_release_outside = false;

        run_pass(&ctx, &mut container, release_at(pos2(-20.0, -20.0)), Some(library));

        assert_eq!(container.is_windowed(library), Some(false));
        assert_eq!(container.floating_windows().count(), 0);
        assert_eq!(row_ids(&container), vec![vec![viewer], vec![library]]);
    }
}
