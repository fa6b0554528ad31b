#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use egui_dock_panels::{
    AnchorSet, DockBuilder, DockError, DockingContainer, DockingOptions, Orientation,
    PanelBehavior, PanelId, SplitContainer, SplitDirection,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pane {
    Media,
    Effects,
    Viewer,
    Timeline,
    Inspector,
}

impl Pane {
    fn title(self) -> &'static str {
        match self {
            Pane::Media => "Media",
            Pane::Effects => "Effects",
            Pane::Viewer => "Viewer",
            Pane::Timeline => "Timeline",
            Pane::Inspector => "Inspector",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Properties,
    Keyframes,
}

struct Behavior {
    inspector: SplitContainer<Section>,
    playhead: f32,
}

impl Behavior {
    fn new(options: &DockingOptions) -> Self {
        let mut inspector = options.split_container(Orientation::Vertical);
        if let Err(err) = inspector.set_top_or_left(Section::Properties) {
            log::error!("{err}");
        }
        if let Err(err) = inspector.set_bottom_or_right(Section::Keyframes) {
            log::error!("{err}");
        }
        Self {
            inspector,
            playhead: 0.0,
        }
    }

    fn inspector_ui(&mut self, ui: &mut egui::Ui) {
        self.inspector.set_rect(ui.available_rect_before_wrap());
        self.inspector.ui(ui, "inspector_split");

        for (rect, section) in [
            (self.inspector.first_rect(), self.inspector.top_or_left()),
            (self.inspector.second_rect(), self.inspector.bottom_or_right()),
        ] {
            let Some(section) = section else { continue };
            let mut child = ui.new_child(egui::UiBuilder::new().max_rect(rect));
            child.set_clip_rect(rect);
            match section {
                Section::Properties => {
                    child.strong("Properties");
                    child.label("Opacity 100%");
                    child.label("Scale 1.00");
                }
                Section::Keyframes => {
                    child.strong("Keyframes");
                    child.label("No keyframes on this clip.");
                }
            }
        }
    }
}

impl PanelBehavior<Pane> for Behavior {
    fn tab_title_for_pane(&mut self, pane: &Pane) -> egui::WidgetText {
        pane.title().into()
    }

    fn pane_ui(&mut self, ui: &mut egui::Ui, _panel: PanelId, pane: &mut Pane) {
        match pane {
            Pane::Viewer => {
                let rect = ui.available_rect_before_wrap();
                ui.painter().rect_filled(rect, 0.0, egui::Color32::BLACK);
                ui.label(format!("Frame {:.0}", self.playhead * 240.0));
            }
            Pane::Timeline => {
                ui.add(egui::Slider::new(&mut self.playhead, 0.0..=1.0).text("Playhead"));
            }
            Pane::Inspector => self.inspector_ui(ui),
            Pane::Media | Pane::Effects => {
                ui.label(format!("{} browser placeholder.", pane.title()));
            }
        }
    }
}

//  +---------+-----------------------+-----------+
//  |  Media  |        Viewer         | Inspector |
//  | Effects |                       |           |
//  +---------+-----------------------+-----------+
//  |                 Timeline                    |
//  +---------------------------------------------+
fn editor_layout(rect: egui::Rect) -> DockingContainer<Pane> {
    let mut b = DockBuilder::new(DockingOptions::default(), rect);
    let viewer = b.panel("Viewer", vec![Pane::Viewer]);
    if let Err(err) = dock_editor_panels(&mut b, viewer) {
        log::error!("building the editor layout: {err}");
    }
    b.finish()
}

fn dock_editor_panels(b: &mut DockBuilder<Pane>, viewer: PanelId) -> Result<(), DockError> {
    let timeline = b.split(viewer, SplitDirection::Down, 0.35, "Timeline", vec![Pane::Timeline])?;
    let library = vec![Pane::Media, Pane::Effects];
    b.split(viewer, SplitDirection::Left, 0.25, "Library", library)?;
    let inspector = vec![Pane::Inspector];
    let inspector = b.split(viewer, SplitDirection::Right, 0.3, "Inspector", inspector)?;

    // The timeline keeps its height when the window grows.
    b.auto_resize(timeline, true, false)?;
    b.anchors(inspector, AnchorSet::FILL_ONLY)
}

struct App {
    docking: DockingContainer<Pane>,
    behavior: Behavior,
}

impl Default for App {
    fn default() -> Self {
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1280.0, 760.0));
        let docking = editor_layout(rect);
        let behavior = Behavior::new(&docking.options);
        Self { docking, behavior }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Reset layout").clicked() {
                    self.docking = editor_layout(self.docking.rect());
                }
                ui.checkbox(
                    &mut self.docking.options.unpin_on_release_outside,
                    "Tear off on release outside",
                );
                ui.checkbox(
                    &mut self.docking.options.floating_decorations,
                    "Floating OS decorations",
                );
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.docking.ui(ui, &mut self.behavior);
        });
    }
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("egui_dock_panels: video editor layout"),
        ..Default::default()
    };
    eframe::run_native(
        "egui_dock_panels: video editor layout",
        options,
        Box::new(|_cc| Ok(Box::new(App::default()))),
    )
}
