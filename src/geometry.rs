use egui::{Pos2, Rect, Vec2, pos2};
use itertools::Itertools as _;

/// Per-side spacing around a rectangle, used for container padding and panel margins.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Thickness {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Thickness {
    pub const ZERO: Self = Self::same(0.0);

    /// The same thickness on all four sides.
    pub const fn same(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Total horizontal and vertical thickness.
    pub fn sum(self) -> Vec2 {
        Vec2::new(self.left + self.right, self.top + self.bottom)
    }

    /// Shrink `rect` by this thickness.
    ///
    /// A side that would cross its opposite collapses onto it, so the result is never negative.
    pub fn shrink(self, rect: Rect) -> Rect {
        let min = pos2(rect.min.x + self.left, rect.min.y + self.top);
        let max = pos2(rect.max.x - self.right, rect.max.y - self.bottom);
        Rect::from_min_max(min, pos2(max.x.max(min.x), max.y.max(min.y)))
    }
}

impl Default for Thickness {
    fn default() -> Self {
        Self::same(3.0)
    }
}

/// A convex quadrilateral (possibly degenerate), used for the overlay's edge zones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Quad(pub(crate) [Pos2; 4]);

impl Quad {
    /// Closed containment: points on the boundary are inside.
    pub(crate) fn contains(&self, p: Pos2) -> bool {
        if !Rect::from_points(&self.0).contains(p) {
            return false;
        }

        let mut winding: Option<bool> = None;
        for (a, b) in self.0.into_iter().circular_tuple_windows::<(Pos2, Pos2)>() {
            let cross = cross(b - a, p - a);
            if cross == 0.0 {
                continue;
            }
            let positive = cross > 0.0;
            match winding {
                None => winding = Some(positive),
                Some(w) if w != positive => return false,
                Some(_) => {}
            }
        }
        true
    }

    /// Unsigned area (shoelace formula).
    #[cfg(test)]
    pub(crate) fn area(&self) -> f32 {
        let twice: f32 = self
            .0
            .into_iter()
            .circular_tuple_windows::<(Pos2, Pos2)>()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum();
        twice.abs() * 0.5
    }

    pub(crate) fn points(&self) -> Vec<Pos2> {
        self.0.to_vec()
    }
}

fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}
