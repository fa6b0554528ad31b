use egui::{Pos2, Rect, Vec2, WidgetText, pos2};

use super::integrity;
use super::{DockError, DockingContainer, DropTarget, PanelBehavior, PanelId};
use crate::anchor::DockAnchor;
use crate::geometry::Thickness;

type Container = DockingContainer<&'static str>;

fn container(width: f32, height: f32) -> Container {
    let mut container = Container::default();
    container.set_rect(Rect::from_min_size(Pos2::ZERO, Vec2::new(width, height)));
    container
}

fn assert_ok(container: &Container) {
    let issues = integrity::container_integrity_issues(container);
    assert!(
        issues.is_empty(),
        "container integrity failed:\n{}",
        issues.join("\n")
    );
}

fn row_ids(container: &Container) -> Vec<Vec<PanelId>> {
    container
        .grid()
        .rows()
        .iter()
        .map(|row| row.cells.iter().map(|c| c.panel).collect())
        .collect()
}

fn heights(container: &Container) -> Vec<f32> {
    container.grid().rows().iter().map(|r| r.height).collect()
}

fn widths(container: &Container, row: usize) -> Vec<f32> {
    container.grid().rows()[row]
        .cells
        .iter()
        .map(|c| c.width)
        .collect()
}

#[test]
fn first_panel_fills_content() {
    let mut c = container(406.0, 306.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    assert_eq!(c.content_rect(), Rect::from_min_max(pos2(3.0, 3.0), pos2(403.0, 303.0)));
    assert_eq!(
        c.panel_rect(viewer),
        Some(Rect::from_min_max(pos2(6.0, 6.0), pos2(400.0, 300.0)))
    );
    assert_eq!(c.panel(viewer).map(|p| p.title()), Some("Viewer"));
    assert_ok(&c);
}

#[test]
fn docking_at_panel_sides() {
    let mut c = container(406.0, 306.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    let library = c
        .add_panel_at("Library", vec!["media"], DropTarget::Panel(viewer), DockAnchor::Left)
        .expect("left of viewer");
    let inspector = c
        .add_panel_at("Inspector", vec!["clip"], DropTarget::Panel(viewer), DockAnchor::Right)
        .expect("right of viewer");
    assert_eq!(row_ids(&c), vec![vec![library, viewer, inspector]]);
    assert_eq!(widths(&c, 0), vec![200.0, 100.0, 100.0]);

    let timeline = c
        .add_panel_at("Timeline", vec!["edit"], DropTarget::Panel(viewer), DockAnchor::Bottom)
        .expect("below viewer");
    let transport = c
        .add_panel_at("Transport", vec!["transport"], DropTarget::Panel(timeline), DockAnchor::Top)
        .expect("above timeline");
    assert_eq!(
        row_ids(&c),
        vec![vec![library, viewer, inspector], vec![transport], vec![timeline]]
    );
    assert_eq!(heights(&c), vec![150.0, 75.0, 75.0]);
    assert_eq!(widths(&c, 1), vec![400.0]);
    assert_ok(&c);
}

#[test]
fn fill_merges_tabs_and_destroys_dragged_panel() {
    let mut c = container(406.0, 306.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    let library = c.add_panel("Library", vec!["media", "effects"]);

    c.move_panel(library, DropTarget::Panel(viewer), DockAnchor::Fill)
        .expect("fill is always enabled");
    assert!(c.panel(library).is_none());
    let viewer_panel = c.panel(viewer).expect("target survives");
    assert_eq!(viewer_panel.tabs(), &["viewer", "media", "effects"]);
    assert_eq!(viewer_panel.content(), Some(&"media"));
    assert_eq!(row_ids(&c), vec![vec![viewer]]);
    assert_eq!(heights(&c), vec![300.0]);
    assert_ok(&c);

    let merged_into = c
        .add_panel_at("Scopes", vec!["scopes"], DropTarget::Panel(viewer), DockAnchor::Fill)
        .expect("fill is always enabled");
    assert_eq!(merged_into, viewer);
    assert_eq!(c.panels().count(), 1);
}

#[test]
fn unpin_happens_once() {
    let mut c = container(406.0, 306.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    let library = c.add_panel("Library", vec!["media"]);
    assert_eq!(c.is_windowed(library), Some(false));

    assert_eq!(c.unpin(library), Ok(()));
    assert_eq!(c.is_windowed(library), Some(true));
    assert!(!c.grid().contains(library));
    assert_eq!(heights(&c), vec![300.0]);

    let window = c.floating_window(library).expect("unpinned panel has a window");
    assert_eq!(window.title(), Some("Library"));
    assert_eq!(window.inner_size(), Some(Vec2::new(394.0, 144.0)));

    assert_eq!(c.unpin(library), Err(DockError::AlreadyFloating(library)));
    assert_eq!(c.is_windowed(library), Some(true));
    assert_eq!(c.floating_windows().count(), 1);
    assert_eq!(c.unpin(PanelId::from_u64(99)), Err(DockError::UnknownPanel(PanelId::from_u64(99))));
    assert_ok(&c);

    // The last docked panel can go too; the grid is then empty.
    assert_eq!(c.unpin(viewer), Ok(()));
    assert!(c.grid().is_empty());
    assert_ok(&c);
}

#[test]
fn unpin_without_layout_uses_default_size() {
    let mut c = Container::default();
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    c.unpin(viewer).expect("docked");
    assert_eq!(
        c.floating_window(viewer).and_then(|w| w.inner_size()),
        Some(c.options.default_floating_size)
    );
}

#[test]
fn redock_is_symmetric_to_unpin() {
    let mut c = container(406.0, 306.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    let library = c.add_panel("Library", vec!["media"]);
    c.unpin(library).expect("docked");

    assert_eq!(c.redock(library, DropTarget::Panel(viewer), DockAnchor::Left), Ok(()));
    assert_eq!(c.is_windowed(library), Some(false));
    assert!(c.floating_window(library).is_none());
    assert_eq!(row_ids(&c), vec![vec![library, viewer]]);
    assert_eq!(widths(&c, 0), vec![200.0, 200.0]);

    assert_eq!(
        c.redock(library, DropTarget::Panel(viewer), DockAnchor::Left),
        Err(DockError::AlreadyDocked(library))
    );
    assert_ok(&c);
}

#[test]
fn rejected_drops_leave_layout_untouched() {
    let mut c = container(406.0, 306.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    let library = c.add_panel("Library", vec!["media"]);
    let before = c.grid().clone();

    assert_eq!(
        c.move_panel(viewer, DropTarget::Panel(viewer), DockAnchor::Left),
        Err(DockError::SelfDrop(viewer))
    );

    c.panel_mut(viewer)
        .expect("exists")
        .enable_anchor(DockAnchor::Top, false);
    assert_eq!(
        c.add_panel_at("Scopes", vec!["scopes"], DropTarget::Panel(viewer), DockAnchor::Top),
        Err(DockError::AnchorDisabled {
            target: Some(viewer),
            anchor: DockAnchor::Top
        })
    );
    assert_eq!(c.panels().count(), 2);

    c.enable_anchor(DockAnchor::Left, false);
    assert!(!c.is_anchor_enabled(DockAnchor::Left));
    assert_eq!(
        c.move_panel(
            library,
            DropTarget::Container {
                pointer: pos2(10.0, 10.0)
            },
            DockAnchor::Left
        ),
        Err(DockError::AnchorDisabled {
            target: None,
            anchor: DockAnchor::Left
        })
    );
    assert_eq!(c.grid(), &before);

    c.unpin(library).expect("docked");
    assert_eq!(
        c.move_panel(viewer, DropTarget::Panel(library), DockAnchor::Right),
        Err(DockError::NotOnGrid(library))
    );
    assert_ok(&c);
}

#[test]
fn container_edges() {
    let mut c = container(406.0, 306.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    let library = c.add_panel("Library", vec!["media"]);

    let timeline = c
        .add_panel_at(
            "Timeline",
            vec!["edit"],
            DropTarget::Container {
                pointer: pos2(200.0, 280.0),
            },
            DockAnchor::Left,
        )
        .expect("left edge");
    assert_eq!(row_ids(&c), vec![vec![viewer], vec![timeline, library]]);

    let transport = c
        .add_panel_at(
            "Transport",
            vec!["transport"],
            DropTarget::Container {
                pointer: pos2(200.0, 10.0),
            },
            DockAnchor::Top,
        )
        .expect("top edge");
    assert_eq!(heights(&c), vec![75.0, 75.0, 150.0]);
    assert_eq!(row_ids(&c)[0], vec![transport]);

    let scopes = c
        .add_panel_at(
            "Scopes",
            vec!["scopes"],
            DropTarget::Container {
                pointer: pos2(200.0, 100.0),
            },
            DockAnchor::Right,
        )
        .expect("right edge");
    assert_eq!(row_ids(&c)[1], vec![viewer, scopes]);
    assert_ok(&c);
}

#[test]
fn drop_onto_empty_container_fills_it() {
    let mut c = container(406.0, 306.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    c.unpin(viewer).expect("docked");
    c.redock(
        viewer,
        DropTarget::Container {
            pointer: pos2(200.0, 150.0),
        },
        DockAnchor::Right,
    )
    .expect("container accepts right");
    assert_eq!(row_ids(&c), vec![vec![viewer]]);
    assert_eq!(widths(&c, 0), vec![400.0]);
    assert_ok(&c);
}

#[test]
fn resizing_cascades_through_the_grid() {
    let mut c = container(406.0, 306.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    let library = c
        .add_panel_at("Library", vec!["media"], DropTarget::Panel(viewer), DockAnchor::Left)
        .expect("left");
    c.add_panel("Timeline", vec!["edit"]);

    c.set_rect(Rect::from_min_size(Pos2::ZERO, Vec2::new(506.0, 406.0)));
    assert_eq!(widths(&c, 0), vec![250.0, 250.0]);
    assert_eq!(heights(&c), vec![200.0, 200.0]);
    assert_ok(&c);

    // A fixed-width library keeps its width.
    c.panel_mut(library)
        .expect("exists")
        .set_auto_resize(false, true);
    c.set_rect(Rect::from_min_size(Pos2::ZERO, Vec2::new(606.0, 406.0)));
    assert_eq!(widths(&c, 0), vec![250.0, 350.0]);
    assert_ok(&c);

    // Shrinking to almost nothing never produces negative sizes.
    c.set_rect(Rect::from_min_size(Pos2::ZERO, Vec2::new(20.0, 12.0)));
    assert_ok(&c);
}

#[test]
fn padding_and_margin_shape_panel_rects() {
    let mut c = container(406.0, 306.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    c.set_container_padding(Thickness::same(10.0));
    c.set_panel_margin(Thickness::ZERO);
    assert_eq!(c.container_padding(), Thickness::same(10.0));
    assert_eq!(
        c.panel_rect(viewer),
        Some(Rect::from_min_max(pos2(10.0, 10.0), pos2(396.0, 296.0)))
    );
    assert_ok(&c);
}

#[test]
fn remove_panel_returns_it() {
    let mut c = container(406.0, 306.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    let library = c.add_panel("Library", vec!["media"]);
    c.unpin(library).expect("docked");

    let removed = c.remove_panel(library).expect("exists");
    assert_eq!(removed.tabs(), &["media"]);
    assert_eq!(c.floating_windows().count(), 0);
    assert!(c.remove_panel(library).is_none());

    c.remove_panel(viewer).expect("exists");
    assert!(c.grid().is_empty());
    assert_ok(&c);
}

#[test]
fn drop_targeting_prefers_container_edges() {
    let mut c = container(806.0, 606.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    let library = c.add_panel("Library", vec!["media"]);

    assert_eq!(
        c.drop_target_at(Some(library), Some(pos2(400.0, 150.0))),
        Some((DropTarget::Panel(viewer), DockAnchor::Fill))
    );
    assert!(c.panel(viewer).expect("exists").overlay().is_visible());

    assert_eq!(
        c.drop_target_at(Some(library), Some(pos2(60.0, 150.0))),
        Some((DropTarget::Panel(viewer), DockAnchor::Left))
    );

    let pointer = pos2(10.0, 150.0);
    assert_eq!(
        c.drop_target_at(Some(library), Some(pointer)),
        Some((DropTarget::Container { pointer }, DockAnchor::Left))
    );
    assert!(!c.panel(viewer).expect("exists").overlay().is_visible());

    // Hovering the dragged panel itself offers nothing.
    assert_eq!(c.drop_target_at(Some(viewer), Some(pos2(400.0, 150.0))), None);

    c.clear_drop_overlays();
    assert!(!c.overlay().is_visible());
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed ^ 0xD0C3_D0C3_D0C3_D0C3)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005u64)
            .wrapping_add(1442695040888963407u64);
        self.0 >> 11
    }

    fn next_usize(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        (self.next_u64() as usize) % upper
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        (!items.is_empty()).then(|| items[self.next_usize(items.len())])
    }
}

#[test]
fn random_operation_sequences_keep_layout_consistent() {
    const TABS: [&str; 4] = ["viewer", "media", "edit", "clip"];

    for seed in 0..24 {
        let mut rng = Rng::new(seed);
        let mut c = container(806.0, 606.0);
        c.add_panel("Viewer", vec!["viewer"]);
        let mut applied = 0;

        for _ in 0..60 {
            let docked: Vec<PanelId> = c.grid().panel_ids().collect();
            let all: Vec<PanelId> = c.panels().map(|p| p.id()).collect();
            let floating: Vec<PanelId> = c.floating_windows().map(|(id, _)| id).collect();
            let anchor = DockAnchor::ALL[rng.next_usize(DockAnchor::ALL.len())];
            let pointer = pos2(rng.next_usize(806) as f32, rng.next_usize(606) as f32);
            let target = match rng.pick(&docked) {
                Some(id) if rng.next_usize(3) > 0 => DropTarget::Panel(id),
                _ => DropTarget::Container { pointer },
            };

            let result = match rng.next_usize(6) {
                0 => {
                    let tab = TABS[rng.next_usize(TABS.len())];
                    c.add_panel_at("Panel", vec![tab], target, anchor).map(|_| ())
                }
                1 => match rng.pick(&all) {
                    Some(id) => c.move_panel(id, target, anchor),
                    None => Ok(()),
                },
                2 => match rng.pick(&docked) {
                    Some(id) => c.unpin(id),
                    None => Ok(()),
                },
                3 => match rng.pick(&floating) {
                    Some(id) => c.redock(id, target, anchor),
                    None => Ok(()),
                },
                4 => {
                    if let Some(id) = rng.pick(&all) {
                        c.remove_panel(id);
                    }
                    Ok(())
                }
                _ => {
                    let size = Vec2::new(
                        60.0 + rng.next_usize(900) as f32,
                        60.0 + rng.next_usize(700) as f32,
                    );
                    c.set_rect(Rect::from_min_size(Pos2::ZERO, size));
                    Ok(())
                }
            };
            if result.is_ok() {
                applied += 1;
            }
            assert_ok(&c);
        }
        assert!(applied > 0, "seed {seed}: every operation was rejected");
    }
}

struct LabelBehavior;

impl PanelBehavior<&'static str> for LabelBehavior {
    fn tab_title_for_pane(&mut self, pane: &&'static str) -> WidgetText {
        (*pane).into()
    }

    fn pane_ui(&mut self, ui: &mut egui::Ui, _panel: PanelId, pane: &mut &'static str) {
        ui.label(*pane);
    }
}

#[test]
fn ui_lays_out_into_available_rect() {
    let mut c = Container::default();
    let viewer = c.add_panel("Viewer", vec!["viewer", "scopes"]);
    c.add_panel("Library", vec!["media"]);
    let mut behavior = LabelBehavior;

    let ctx = egui::Context::default();
    let raw = egui::RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
        ..Default::default()
    };
    ctx.begin_pass(raw);
    let mut dock_rect = Rect::NOTHING;
    egui::CentralPanel::default().show(&ctx, |ui| {
        dock_rect = ui.available_rect_before_wrap();
        c.ui(ui, &mut behavior);
    });
    let _ = ctx.end_pass();

    assert_eq!(c.rect(), dock_rect);
    let viewer_rect = c.panel_rect(viewer).expect("docked");
    assert!(viewer_rect.is_positive());
    assert!(dock_rect.contains_rect(viewer_rect));
    assert_ok(&c);
}

#[cfg(feature = "serde")]
#[test]
fn grid_layout_can_be_persisted() {
    let mut c = container(406.0, 306.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    c.add_panel_at("Library", vec!["media"], DropTarget::Panel(viewer), DockAnchor::Left)
        .expect("left");
    c.add_panel("Timeline", vec!["edit"]);

    let json = serde_json::to_string(c.grid()).expect("grid serializes to json");
    let from_json: super::PanelGrid = serde_json::from_str(&json).expect("json parses");
    assert_eq!(&from_json, c.grid());

    let text = ron::to_string(c.grid()).expect("grid serializes to ron");
    let from_ron: super::PanelGrid = ron::from_str(&text).expect("ron parses");
    assert_eq!(&from_ron, c.grid());
}

#[test]
fn closed_window_redocks_at_first_enabled_edge() {
    let mut c = container(406.0, 306.0);
    let viewer = c.add_panel("Viewer", vec!["viewer"]);
    let library = c.add_panel("Library", vec!["media"]);

    c.unpin(library).expect("docked");
    c.redock_anywhere(library).expect("bottom is enabled");
    assert_eq!(row_ids(&c), vec![vec![viewer], vec![library]]);

    c.unpin(library).expect("docked");
    c.enable_anchor(DockAnchor::Bottom, false);
    c.redock_anywhere(library).expect("right is enabled");
    assert_eq!(row_ids(&c), vec![vec![viewer, library]]);
    assert_eq!(widths(&c, 0), vec![200.0, 200.0]);
    assert_ok(&c);

    // With every edge off the window's tabs join the panel in the middle.
    c.unpin(library).expect("docked");
    for anchor in [DockAnchor::Right, DockAnchor::Left, DockAnchor::Top] {
        c.enable_anchor(anchor, false);
    }
    c.redock_anywhere(library).expect("fill is always enabled");
    assert!(c.panel(library).is_none());
    assert_eq!(c.floating_windows().count(), 0);
    assert_eq!(c.panel(viewer).expect("exists").tabs(), &["viewer", "media"]);
    assert_eq!(row_ids(&c), vec![vec![viewer]]);
    assert_ok(&c);
}
