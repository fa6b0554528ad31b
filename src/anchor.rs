/// Where a dragged panel attaches relative to a drop target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DockAnchor {
    Left,
    Top,
    Right,
    Bottom,

    /// Stack as tabs into the target.
    Fill,
}

impl DockAnchor {
    /// All anchors, in hit-test priority order.
    pub const ALL: [Self; 5] = [Self::Left, Self::Top, Self::Right, Self::Bottom, Self::Fill];

    /// The anchors that can be switched off.
    pub const DIRECTIONAL: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];

    pub fn is_directional(self) -> bool {
        !matches!(self, Self::Fill)
    }
}

/// Which drop zones an overlay offers.
///
/// Only the four directional anchors are stored. [`DockAnchor::Fill`] is always enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct AnchorSet {
    left: bool,
    top: bool,
    right: bool,
    bottom: bool,
}

impl AnchorSet {
    /// Every zone enabled.
    pub const ALL: Self = Self {
        left: true,
        top: true,
        right: true,
        bottom: true,
    };

    /// Only the (implicit) fill zone.
    pub const FILL_ONLY: Self = Self {
        left: false,
        top: false,
        right: false,
        bottom: false,
    };

    pub fn contains(self, anchor: DockAnchor) -> bool {
        match anchor {
            DockAnchor::Left => self.left,
            DockAnchor::Top => self.top,
            DockAnchor::Right => self.right,
            DockAnchor::Bottom => self.bottom,
            DockAnchor::Fill => true,
        }
    }

    /// Enable or disable a directional anchor. Returns `true` if the set changed.
    ///
    /// Requests to change [`DockAnchor::Fill`] are ignored.
    pub fn set(&mut self, anchor: DockAnchor, enabled: bool) -> bool {
        let flag = match anchor {
            DockAnchor::Left => &mut self.left,
            DockAnchor::Top => &mut self.top,
            DockAnchor::Right => &mut self.right,
            DockAnchor::Bottom => &mut self.bottom,
            DockAnchor::Fill => {
                log::debug!("fill anchor is always enabled; ignoring set({enabled})");
                return false;
            }
        };
        let changed = *flag != enabled;
        *flag = enabled;
        changed
    }

    /// Enabled anchors in hit-test priority order, always ending with [`DockAnchor::Fill`].
    pub fn iter(self) -> impl Iterator<Item = DockAnchor> {
        DockAnchor::ALL.into_iter().filter(move |&a| self.contains(a))
    }
}

impl Default for AnchorSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl FromIterator<DockAnchor> for AnchorSet {
    /// Enable exactly the listed anchors. Listing `Fill` is allowed and has no effect.
    fn from_iter<I: IntoIterator<Item = DockAnchor>>(iter: I) -> Self {
        let mut set = Self::FILL_ONLY;
        for anchor in iter {
            set.set(anchor, true);
        }
        set
    }
}
