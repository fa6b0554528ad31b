use egui::{Color32, Pos2, Rect, Shape, Stroke, pos2};

use crate::anchor::{AnchorSet, DockAnchor};
use crate::geometry::Quad;

/// Default depth of the edge zones, in points.
pub const DEFAULT_OVERLAY_THICKNESS: f32 = 70.0;

/// Default visual gap between painted zones, in points.
pub const DEFAULT_OVERLAY_MARGIN: f32 = 2.0;

/// Opacity of the zone under the pointer.
pub const HOVERED_ZONE_OPACITY: f32 = 0.3;

/// Opacity of the other enabled zones.
pub const IDLE_ZONE_OPACITY: f32 = 0.1;

/// Hit regions: four edge trapezoids plus the centre rectangle.
///
/// They tile the surface exactly; neighbouring regions only share their boundary.
#[derive(Clone, Copy, Debug)]
struct OverlayZones {
    left: Quad,
    top: Quad,
    right: Quad,
    bottom: Quad,
    fill: Rect,
}

impl OverlayZones {
    fn compute(rect: Rect, thickness: f32) -> Self {
        let (x0, y0, x1, y1) = (rect.min.x, rect.min.y, rect.max.x, rect.max.y);
        let t = thickness;
        Self {
            left: Quad([
                pos2(x0, y0),
                pos2(x0 + t, y0 + t),
                pos2(x0 + t, y1 - t),
                pos2(x0, y1),
            ]),
            top: Quad([
                pos2(x0, y0),
                pos2(x1, y0),
                pos2(x1 - t, y0 + t),
                pos2(x0 + t, y0 + t),
            ]),
            right: Quad([
                pos2(x1, y0),
                pos2(x1, y1),
                pos2(x1 - t, y1 - t),
                pos2(x1 - t, y0 + t),
            ]),
            bottom: Quad([
                pos2(x0, y1),
                pos2(x0 + t, y1 - t),
                pos2(x1 - t, y1 - t),
                pos2(x1, y1),
            ]),
            fill: Rect::from_min_max(pos2(x0 + t, y0 + t), pos2(x1 - t, y1 - t)),
        }
    }

    fn contains(&self, anchor: DockAnchor, p: Pos2) -> bool {
        match anchor {
            DockAnchor::Left => self.left.contains(p),
            DockAnchor::Top => self.top.contains(p),
            DockAnchor::Right => self.right.contains(p),
            DockAnchor::Bottom => self.bottom.contains(p),
            DockAnchor::Fill => self.fill.contains(p),
        }
    }
}

/// Drop-zone overlay laid over a panel or a whole container.
///
/// The overlay is only "live" while the pointer is inside its surface: entering makes it
/// visible, leaving hides it and clears the selection. While hidden it ignores pointer
/// moves and paints nothing.
#[derive(Clone, Debug)]
pub struct DockOverlay {
    anchors: AnchorSet,
    thickness: f32,
    margin: f32,
    rect: Rect,
    zones: OverlayZones,
    current: Option<DockAnchor>,
    last_pointer: Option<Pos2>,
    visible: bool,
}

impl Default for DockOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl DockOverlay {
    pub fn new() -> Self {
        Self::with_anchors(AnchorSet::ALL)
    }

    /// An overlay offering only the given zones (plus fill).
    pub fn with_anchors(anchors: AnchorSet) -> Self {
        let rect = Rect::ZERO;
        Self {
            anchors,
            thickness: DEFAULT_OVERLAY_THICKNESS,
            margin: DEFAULT_OVERLAY_MARGIN,
            rect,
            zones: OverlayZones::compute(rect, 0.0),
            current: None,
            last_pointer: None,
            visible: false,
        }
    }

    /// Change the zone depth and the painted gap. Recomputes the zones.
    #[must_use]
    pub fn with_geometry(mut self, thickness: f32, margin: f32) -> Self {
        self.thickness = thickness.max(0.0);
        self.margin = margin.max(0.0);
        self.recompute();
        self
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Resize. Recomputes the hit regions and re-resolves the selection.
    pub fn set_rect(&mut self, rect: Rect) {
        if self.rect == rect {
            return;
        }
        self.rect = rect;
        self.recompute();
        self.reselect();
    }

    /// The zone depth actually used: never more than half of the smaller side.
    pub fn effective_thickness(&self) -> f32 {
        let half_min = 0.5 * self.rect.width().min(self.rect.height()).max(0.0);
        self.thickness.min(half_min)
    }

    /// The smallest surface on which the configured thickness is used unclamped.
    pub fn minimum_size(&self) -> f32 {
        2.0 * self.thickness + 4.0 * self.margin
    }

    fn recompute(&mut self) {
        self.zones = OverlayZones::compute(self.rect, self.effective_thickness());
    }

    // ------------------------------------------------------------------------
    // Anchors

    /// Returns `true` if the set of offered zones changed (repaint needed).
    pub fn enable_anchor(&mut self, anchor: DockAnchor, enabled: bool) -> bool {
        let changed = self.anchors.set(anchor, enabled);
        if changed {
            self.reselect();
        }
        changed
    }

    pub fn is_anchor_enabled(&self, anchor: DockAnchor) -> bool {
        self.anchors.contains(anchor)
    }

    pub fn anchors(&self) -> AnchorSet {
        self.anchors
    }

    // ------------------------------------------------------------------------
    // Pointer

    /// Which zone `pos` falls in, ignoring visibility.
    ///
    /// Zones are tested in the order Left, Top, Right, Bottom, Fill; the first enabled zone
    /// containing the point wins. Points in a disabled zone fall through to Fill.
    /// Points outside the surface hit nothing.
    pub fn hit_test(&self, pos: Pos2) -> Option<DockAnchor> {
        if !self.rect.contains(pos) {
            return None;
        }
        self.anchors
            .iter()
            .find(|&anchor| self.zones.contains(anchor, pos))
            .or(Some(DockAnchor::Fill))
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn pointer_entered(&mut self) {
        self.visible = true;
    }

    pub fn pointer_exited(&mut self) {
        self.visible = false;
        self.current = None;
        self.last_pointer = None;
    }

    /// Update the selection. Returns `true` only when the selected zone changed.
    pub fn pointer_moved(&mut self, pos: Pos2) -> bool {
        if !self.visible {
            return false;
        }
        self.last_pointer = Some(pos);
        self.select(self.hit_test(pos))
    }

    /// Convenience for immediate-mode callers: enter, move or exit based on where the pointer is.
    ///
    /// Returns `true` if anything visible changed.
    pub fn update_pointer(&mut self, pointer: Option<Pos2>) -> bool {
        match pointer.filter(|&p| self.rect.contains(p)) {
            Some(pos) => {
                let entered = !self.visible;
                if entered {
                    self.pointer_entered();
                }
                self.pointer_moved(pos) || entered
            }
            None => {
                let was_visible = self.visible;
                self.pointer_exited();
                was_visible
            }
        }
    }

    pub fn current_anchor(&self) -> Option<DockAnchor> {
        self.current
    }

    fn select(&mut self, next: Option<DockAnchor>) -> bool {
        if next == self.current {
            return false;
        }
        log::trace!("overlay selection {:?} -> {next:?}", self.current);
        self.current = next;
        true
    }

    fn reselect(&mut self) {
        if let Some(pos) = self.last_pointer.filter(|_| self.visible) {
            self.select(self.hit_test(pos));
        }
    }

    // ------------------------------------------------------------------------
    // Painting

    /// Paint opacity of a zone, or `None` if it is not drawn at all.
    pub fn zone_opacity(&self, anchor: DockAnchor) -> Option<f32> {
        if !self.visible || !self.anchors.contains(anchor) {
            return None;
        }
        Some(if self.current == Some(anchor) {
            HOVERED_ZONE_OPACITY
        } else {
            IDLE_ZONE_OPACITY
        })
    }

    pub fn paint(&self, painter: &egui::Painter, color: Color32) {
        if !self.visible {
            return;
        }

        let (x0, y0, x1, y1) = (self.rect.min.x, self.rect.min.y, self.rect.max.x, self.rect.max.y);
        let t = self.effective_thickness();
        let m = self.margin;

        for anchor in DockAnchor::ALL {
            let Some(opacity) = self.zone_opacity(anchor) else {
                continue;
            };
            let fill = color.gamma_multiply(opacity);
            let quad = match anchor {
                DockAnchor::Left => Quad([
                    pos2(x0, y0 + m),
                    pos2(x0 + t, y0 + t + m),
                    pos2(x0 + t, y1 - t - m),
                    pos2(x0, y1 - m),
                ]),
                DockAnchor::Top => Quad([
                    pos2(x0 + m, y0),
                    pos2(x1 - m, y0),
                    pos2(x1 - t - m, y0 + t),
                    pos2(x0 + t + m, y0 + t),
                ]),
                DockAnchor::Right => Quad([
                    pos2(x1, y0 + m),
                    pos2(x1, y1 - m),
                    pos2(x1 - t, y1 - t - m),
                    pos2(x1 - t, y0 + t + m),
                ]),
                DockAnchor::Bottom => Quad([
                    pos2(x0 + m, y1),
                    pos2(x0 + t + m, y1 - t),
                    pos2(x1 - t - m, y1 - t),
                    pos2(x1 - m, y1),
                ]),
                DockAnchor::Fill => {
                    let centre = self.zones.fill.shrink(2.0 * m);
                    if centre.is_positive() {
                        painter.rect_filled(centre, 0.0, fill);
                    }
                    continue;
                }
            };
            painter.add(Shape::convex_polygon(quad.points(), fill, Stroke::NONE));
        }
    }
}
