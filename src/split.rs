use egui::{CursorIcon, Rect, Sense, pos2};

/// Default divider thickness, in points.
pub const DEFAULT_RESIZER_THICKNESS: f32 = 3.0;

/// Axis along which a [`SplitContainer`] divides its space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Orientation {
    /// Children side by side: left | right.
    #[default]
    Horizontal,

    /// Children stacked: top / bottom.
    Vertical,
}

/// One of the two slots of a [`SplitContainer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitSlot {
    TopOrLeft,
    BottomOrRight,
}

impl SplitSlot {
    pub fn other(self) -> Self {
        match self {
            Self::TopOrLeft => Self::BottomOrRight,
            Self::BottomOrRight => Self::TopOrLeft,
        }
    }
}

/// Why a child could not be installed into a [`SplitContainer`] slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallError {
    /// This exact child already sits in the requested slot. Nothing was changed.
    AlreadyInstalled { slot: SplitSlot },

    /// The slot holds a different child; take it out first.
    SlotOccupied { slot: SplitSlot },

    /// The child already sits in the other slot; a child can't occupy both.
    InOtherSlot { slot: SplitSlot },
}

impl std::fmt::Display for InstallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyInstalled { slot } => write!(f, "child is already installed in {slot:?}"),
            Self::SlotOccupied { slot } => write!(f, "slot {slot:?} is occupied by another child"),
            Self::InOtherSlot { slot } => {
                write!(f, "child already occupies the other slot {slot:?}")
            }
        }
    }
}

impl std::error::Error for InstallError {}

/// Two child slots separated by a draggable divider.
///
/// Children are identified by value (typically a handle such as a panel id), so installing
/// the same handle twice is detected.
///
/// Layout rules:
/// - One slot occupied: the divider is pinned against the far edge so the occupied child gets
///   all of the space.
/// - Second slot filled while the first is occupied: the divider is centred, once.
/// - Both occupied: a resize by `Δ` along the split axis moves the divider by `Δ / 2`, so each
///   child absorbs half of the change.
#[derive(Clone, Debug)]
pub struct SplitContainer<Child> {
    orientation: Orientation,
    rect: Rect,
    prev_extent: f32,

    /// Offset of the divider's leading edge from the container's leading edge.
    divider: f32,
    thickness: f32,

    first: Option<Child>,
    second: Option<Child>,
}

impl<Child> Default for SplitContainer<Child> {
    fn default() -> Self {
        Self::new(Orientation::default())
    }
}

impl<Child> SplitContainer<Child> {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            rect: Rect::ZERO,
            prev_extent: 0.0,
            divider: -DEFAULT_RESIZER_THICKNESS,
            thickness: DEFAULT_RESIZER_THICKNESS,
            first: None,
            second: None,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Size of the container along the split axis.
    pub fn extent(&self) -> f32 {
        self.extent_of(self.rect)
    }

    fn extent_of(&self, rect: Rect) -> f32 {
        match self.orientation {
            Orientation::Horizontal => rect.width(),
            Orientation::Vertical => rect.height(),
        }
    }

    pub fn divider_position(&self) -> f32 {
        self.divider
    }

    pub fn resizer_thickness(&self) -> f32 {
        self.thickness
    }

    pub fn top_or_left(&self) -> Option<&Child> {
        self.first.as_ref()
    }

    pub fn bottom_or_right(&self) -> Option<&Child> {
        self.second.as_ref()
    }

    pub fn slot(&self, slot: SplitSlot) -> Option<&Child> {
        match slot {
            SplitSlot::TopOrLeft => self.first.as_ref(),
            SplitSlot::BottomOrRight => self.second.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: SplitSlot) -> &mut Option<Child> {
        match slot {
            SplitSlot::TopOrLeft => &mut self.first,
            SplitSlot::BottomOrRight => &mut self.second,
        }
    }

    pub fn is_full(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    /// Resize the container.
    pub fn set_rect(&mut self, rect: Rect) {
        let extent = self.extent_of(rect);
        let delta = extent - self.prev_extent;
        self.rect = rect;
        if self.is_full() {
            self.divider += 0.5 * delta;
        } else {
            self.pin_divider();
        }
        self.prev_extent = extent;
    }

    /// Change the divider width; the divider keeps its centre.
    pub fn set_resizer_thickness(&mut self, thickness: f32) {
        let thickness = thickness.max(0.0);
        if self.is_full() {
            self.divider += 0.5 * (self.thickness - thickness);
            self.thickness = thickness;
        } else {
            self.thickness = thickness;
            self.pin_divider();
        }
    }

    /// Move the divider by a user drag. Clamped so both children stay inside the container.
    ///
    /// Returns `true` if the divider moved.
    pub fn drag_divider(&mut self, delta: f32) -> bool {
        if !self.is_full() {
            return false;
        }
        let max = (self.extent() - self.thickness).max(0.0);
        let next = (self.divider + delta).max(0.0).min(max);
        let moved = next != self.divider;
        self.divider = next;
        moved
    }

    /// Empty a slot. The divider is pinned for the remaining child.
    pub fn take(&mut self, slot: SplitSlot) -> Option<Child> {
        let child = self.slot_mut(slot).take();
        if child.is_some() {
            self.pin_divider();
        }
        child
    }

    pub fn take_top_or_left(&mut self) -> Option<Child> {
        self.take(SplitSlot::TopOrLeft)
    }

    pub fn take_bottom_or_right(&mut self) -> Option<Child> {
        self.take(SplitSlot::BottomOrRight)
    }

    fn pin_divider(&mut self) {
        self.divider = if self.first.is_some() && self.second.is_none() {
            self.extent()
        } else {
            -self.thickness
        };
    }

    fn centre_divider(&mut self) {
        self.divider = 0.5 * self.extent() - 0.5 * self.thickness;
    }

    // ------------------------------------------------------------------------
    // Layout

    /// `(first, divider, second)`, clamped to the container.
    fn layout(&self) -> (Rect, Rect, Rect) {
        let r = self.rect;
        match self.orientation {
            Orientation::Horizontal => {
                let a = (r.min.x + self.divider).max(r.min.x).min(r.max.x);
                let b = (r.min.x + self.divider + self.thickness)
                    .max(r.min.x)
                    .min(r.max.x);
                (
                    Rect::from_min_max(r.min, pos2(a, r.max.y)),
                    Rect::from_min_max(pos2(a, r.min.y), pos2(b, r.max.y)),
                    Rect::from_min_max(pos2(b, r.min.y), r.max),
                )
            }
            Orientation::Vertical => {
                let a = (r.min.y + self.divider).max(r.min.y).min(r.max.y);
                let b = (r.min.y + self.divider + self.thickness)
                    .max(r.min.y)
                    .min(r.max.y);
                (
                    Rect::from_min_max(r.min, pos2(r.max.x, a)),
                    Rect::from_min_max(pos2(r.min.x, a), pos2(r.max.x, b)),
                    Rect::from_min_max(pos2(r.min.x, b), r.max),
                )
            }
        }
    }

    pub fn first_rect(&self) -> Rect {
        self.layout().0
    }

    pub fn divider_rect(&self) -> Rect {
        self.layout().1
    }

    pub fn second_rect(&self) -> Rect {
        self.layout().2
    }

    /// Handle divider dragging and paint the divider.
    ///
    /// Call after [`Self::set_rect`]. Returns `true` if the divider moved.
    pub fn ui(&mut self, ui: &egui::Ui, id_salt: impl std::hash::Hash) -> bool {
        let divider = self.divider_rect();
        if !self.is_full() || divider.area() <= 0.0 {
            return false;
        }

        let response = ui.interact(divider.expand(2.0), ui.id().with(id_salt), Sense::drag());
        if response.hovered() || response.dragged() {
            ui.ctx().set_cursor_icon(match self.orientation {
                Orientation::Horizontal => CursorIcon::ResizeHorizontal,
                Orientation::Vertical => CursorIcon::ResizeVertical,
            });
        }

        let delta = response.drag_delta();
        let moved = self.drag_divider(match self.orientation {
            Orientation::Horizontal => delta.x,
            Orientation::Vertical => delta.y,
        });

        let color = if response.dragged() {
            ui.visuals().widgets.active.bg_fill
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke.color
        };
        ui.painter().rect_filled(self.divider_rect(), 0.0, color);
        moved
    }
}

impl<Child: PartialEq> SplitContainer<Child> {
    /// Install `child` into an empty slot.
    ///
    /// Filling the second slot while the other one is occupied centres the divider.
    ///
    /// # Errors
    /// [`InstallError::AlreadyInstalled`] if `child` is already in `slot`,
    /// [`InstallError::InOtherSlot`] if it sits in the other slot, and
    /// [`InstallError::SlotOccupied`] if `slot` holds a different child.
    pub fn install(&mut self, slot: SplitSlot, child: Child) -> Result<(), InstallError> {
        if self.slot(slot) == Some(&child) {
            return Err(InstallError::AlreadyInstalled { slot });
        }
        if self.slot(slot.other()) == Some(&child) {
            return Err(InstallError::InOtherSlot { slot: slot.other() });
        }
        if self.slot(slot).is_some() {
            return Err(InstallError::SlotOccupied { slot });
        }

        *self.slot_mut(slot) = Some(child);
        if self.is_full() {
            self.centre_divider();
        } else {
            self.pin_divider();
        }
        Ok(())
    }

    /// Install `child` into the first slot.
    ///
    /// # Errors
    /// See [`Self::install`].
    pub fn set_top_or_left(&mut self, child: Child) -> Result<(), InstallError> {
        self.install(SplitSlot::TopOrLeft, child)
    }

    /// Install `child` into the second slot.
    ///
    /// # Errors
    /// See [`Self::install`].
    pub fn set_bottom_or_right(&mut self, child: Child) -> Result<(), InstallError> {
        self.install(SplitSlot::BottomOrRight, child)
    }
}

#[cfg(test)]
mod tests {
    use egui::{Pos2, Vec2};

    use super::*;

    fn sized(orientation: Orientation, w: f32, h: f32) -> SplitContainer<u32> {
        let mut split = SplitContainer::new(orientation);
        split.set_rect(Rect::from_min_size(Pos2::ZERO, Vec2::new(w, h)));
        split
    }

    #[derive(Clone)]
    struct Rng(u64);

    impl Rng {
        fn next_delta(&mut self) -> f32 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005u64)
                .wrapping_add(1442695040888963407u64);
            ((self.0 >> 33) % 41) as f32 - 20.0
        }
    }

    #[test]
    fn single_child_claims_everything() {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let mut split = sized(orientation, 300.0, 200.0);
            split.set_top_or_left(1).expect("empty slot");
            assert_eq!(split.divider_position(), split.extent());

            for size in [120.0, 640.0, 333.0] {
                split.set_rect(Rect::from_min_size(Pos2::ZERO, Vec2::splat(size)));
                assert_eq!(split.divider_position(), size);
                assert_eq!(split.first_rect().size(), Vec2::splat(size));
                assert_eq!(split.extent_of(split.second_rect()), 0.0);
            }
        }
    }

    #[test]
    fn only_second_child_claims_everything() {
        let mut split = sized(Orientation::Horizontal, 300.0, 200.0);
        split.set_bottom_or_right(2).expect("empty slot");
        assert_eq!(split.divider_position(), -DEFAULT_RESIZER_THICKNESS);
        assert_eq!(split.first_rect().width(), 0.0);
        assert_eq!(split.second_rect().width(), 300.0);
    }

    #[test]
    fn second_child_centres_divider_once() {
        let mut split = sized(Orientation::Horizontal, 300.0, 200.0);
        split.set_top_or_left(1).expect("empty slot");
        split.set_bottom_or_right(2).expect("empty slot");
        assert_eq!(split.divider_position(), 148.5);

        split.drag_divider(-48.5);
        split.set_rect(Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 200.0)));
        // Not re-centred: moved by half the delta.
        assert_eq!(split.divider_position(), 150.0);
    }

    #[test]
    fn resize_moves_divider_by_half_delta() {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let mut split = sized(orientation, 500.0, 500.0);
            split.set_top_or_left(1).expect("empty slot");
            split.set_bottom_or_right(2).expect("empty slot");
            let start = split.divider_position();

            split.set_rect(Rect::from_min_size(Pos2::ZERO, Vec2::splat(540.0)));
            assert_eq!(split.divider_position(), start + 20.0);
            split.set_rect(Rect::from_min_size(Pos2::ZERO, Vec2::splat(460.0)));
            assert_eq!(split.divider_position(), start - 20.0);

            let first = split.extent_of(split.first_rect());
            let second = split.extent_of(split.second_rect());
            assert_eq!(first + second + split.resizer_thickness(), 460.0);
        }
    }

    #[test]
    fn divider_depends_only_on_cumulative_delta() {
        let mut rng = Rng(7);
        for _ in 0..20 {
            let mut stepped = sized(Orientation::Horizontal, 800.0, 100.0);
            stepped.set_top_or_left(1).expect("empty slot");
            stepped.set_bottom_or_right(2).expect("empty slot");
            let mut direct = stepped.clone();

            let mut width = 800.0;
            for _ in 0..16 {
                width += rng.next_delta();
                stepped.set_rect(Rect::from_min_size(Pos2::ZERO, Vec2::new(width, 100.0)));
            }
            direct.set_rect(Rect::from_min_size(Pos2::ZERO, Vec2::new(width, 100.0)));

            assert_eq!(stepped.divider_position(), direct.divider_position());
        }
    }

    #[test]
    fn reinstalling_same_child_is_a_noop() {
        let mut split = sized(Orientation::Vertical, 300.0, 200.0);
        split.set_top_or_left(1).expect("empty slot");
        split.set_bottom_or_right(2).expect("empty slot");
        split.drag_divider(30.0);
        let before = (split.divider_position(), split.first_rect(), split.second_rect());

        assert_eq!(
            split.set_top_or_left(1),
            Err(InstallError::AlreadyInstalled {
                slot: SplitSlot::TopOrLeft
            })
        );
        assert_eq!(
            before,
            (split.divider_position(), split.first_rect(), split.second_rect())
        );
    }

    #[test]
    fn install_errors_read_differently() {
        let slot = SplitSlot::TopOrLeft;
        let messages = [
            InstallError::AlreadyInstalled { slot },
            InstallError::SlotOccupied { slot },
            InstallError::InOtherSlot { slot },
        ]
        .map(|err| err.to_string());
        assert_eq!(messages[2], "child already occupies the other slot TopOrLeft");
        assert_ne!(messages[0], messages[2]);
        assert_ne!(messages[0], messages[1]);
    }

    #[test]
    fn rejects_double_parenting_and_occupied_slots() {
        let mut split = sized(Orientation::Horizontal, 300.0, 200.0);
        split.set_top_or_left(1).expect("empty slot");
        assert_eq!(
            split.set_bottom_or_right(1),
            Err(InstallError::InOtherSlot {
                slot: SplitSlot::TopOrLeft
            })
        );
        split.set_bottom_or_right(2).expect("empty slot");
        assert_eq!(
            split.set_bottom_or_right(3),
            Err(InstallError::SlotOccupied {
                slot: SplitSlot::BottomOrRight
            })
        );
        assert_eq!(split.take_bottom_or_right(), Some(2));
        assert_eq!(split.divider_position(), 300.0);
        split.set_bottom_or_right(3).expect("slot was emptied");
        assert_eq!(split.divider_position(), 148.5);
    }

    #[test]
    fn thickness_change_keeps_divider_centre() {
        let mut split = sized(Orientation::Horizontal, 300.0, 200.0);
        split.set_top_or_left(1).expect("empty slot");
        split.set_bottom_or_right(2).expect("empty slot");
        let centre = split.divider_rect().center().x;
        split.set_resizer_thickness(9.0);
        assert_eq!(split.divider_rect().width(), 9.0);
        assert_eq!(split.divider_rect().center().x, centre);
    }

    #[test]
    fn drag_is_clamped_to_container() {
        let mut split = sized(Orientation::Horizontal, 300.0, 200.0);
        split.set_top_or_left(1).expect("empty slot");
        assert!(!split.drag_divider(-10.0));
        split.set_bottom_or_right(2).expect("empty slot");
        assert!(split.drag_divider(-1000.0));
        assert_eq!(split.divider_position(), 0.0);
        assert!(split.drag_divider(1000.0));
        assert_eq!(split.divider_position(), 297.0);
        assert!(!split.drag_divider(5.0));
    }
}
