use egui::{Pos2, Rect, Vec2, pos2};
use itertools::Itertools as _;

use super::panel::PanelId;

/// One grid cell: a docked panel and the width it gets within its row.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct GridCell {
    pub panel: PanelId,
    pub width: f32,
}

/// A full-width band of cells.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct GridRow {
    pub height: f32,
    pub cells: Vec<GridCell>,
}

/// Row-major layout of the docked panels.
///
/// Every row spans the full content width and the rows stack to the full content height.
/// The cells of a row share that row's width. [`Self::fit`] restores both sums after any
/// size change.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PanelGrid {
    rows: Vec<GridRow>,
}

/// Which side of a cell or row to insert at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Side {
    Before,
    After,
}

impl PanelGrid {
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).sum()
    }

    pub fn panel_ids(&self) -> impl Iterator<Item = PanelId> + '_ {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter().map(|cell| cell.panel))
    }

    /// `(row, column)` of a docked panel.
    pub fn position(&self, panel: PanelId) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.cells
                .iter()
                .position(|cell| cell.panel == panel)
                .map(|c| (r, c))
        })
    }

    pub fn contains(&self, panel: PanelId) -> bool {
        self.position(panel).is_some()
    }

    // ------------------------------------------------------------------------
    // Insertion

    /// Make `panel` the only cell, filling `size`.
    pub(super) fn insert_first(&mut self, panel: PanelId, size: Vec2) {
        debug_assert!(self.rows.is_empty(), "grid must be empty");
        self.rows = vec![GridRow {
            height: size.y,
            cells: vec![GridCell {
                panel,
                width: size.x,
            }],
        }];
    }

    /// Insert `panel` next to the cell at `(row, column)` within the same row.
    ///
    /// The new cell takes `fraction` of the neighbour's width.
    pub(super) fn insert_beside(
        &mut self,
        (row, column): (usize, usize),
        side: Side,
        panel: PanelId,
        fraction: f32,
    ) {
        let Some(cells) = self.rows.get_mut(row).map(|r| &mut r.cells) else {
            return;
        };
        let Some(neighbour) = cells.get_mut(column) else {
            return;
        };
        let width = neighbour.width * fraction;
        neighbour.width -= width;
        let index = match side {
            Side::Before => column,
            Side::After => column + 1,
        };
        cells.insert(index, GridCell { panel, width });
    }

    /// Insert a full-width row holding `panel` next to row `row`.
    ///
    /// The new row takes `fraction` of the neighbour's height.
    pub(super) fn insert_row(
        &mut self,
        row: usize,
        side: Side,
        panel: PanelId,
        content_width: f32,
        fraction: f32,
    ) {
        let Some(neighbour) = self.rows.get_mut(row) else {
            return;
        };
        let height = neighbour.height * fraction;
        neighbour.height -= height;
        let index = match side {
            Side::Before => row,
            Side::After => row + 1,
        };
        self.rows.insert(
            index,
            GridRow {
                height,
                cells: vec![GridCell {
                    panel,
                    width: content_width,
                }],
            },
        );
    }

    // ------------------------------------------------------------------------
    // Removal

    /// Remove a panel's cell. The freed space is shared equally by the row's other cells,
    /// or by the other rows when the row empties.
    pub(super) fn remove(&mut self, panel: PanelId) -> bool {
        let Some((r, c)) = self.position(panel) else {
            return false;
        };
        let freed = self.rows[r].cells.remove(c).width;
        if self.rows[r].cells.is_empty() {
            let freed = self.rows.remove(r).height;
            let mut heights: Vec<f32> = self.rows.iter().map(|row| row.height).collect();
            distribute(&mut heights, freed, &[]);
            for (row, height) in self.rows.iter_mut().zip(heights) {
                row.height = height;
            }
        } else {
            let mut widths: Vec<f32> = self.rows[r].cells.iter().map(|c| c.width).collect();
            distribute(&mut widths, freed, &[]);
            for (cell, width) in self.rows[r].cells.iter_mut().zip(widths) {
                cell.width = width;
            }
        }
        true
    }

    // ------------------------------------------------------------------------
    // Sizing

    /// Grow or shrink rows and cells so they exactly fill `size`.
    ///
    /// The difference is shared equally. Cells whose panel passes `resizes_x` (rows
    /// containing a panel that passes `resizes_y`) take the shares; if none does, all do.
    pub(super) fn fit(
        &mut self,
        size: Vec2,
        resizes_x: impl Fn(PanelId) -> bool,
        resizes_y: impl Fn(PanelId) -> bool,
    ) {
        for row in &mut self.rows {
            let current: f32 = row.cells.iter().map(|c| c.width).sum();
            let eligible: Vec<bool> = row.cells.iter().map(|c| resizes_x(c.panel)).collect();
            let mut widths: Vec<f32> = row.cells.iter().map(|c| c.width).collect();
            distribute(&mut widths, size.x - current, &eligible);
            for (cell, width) in row.cells.iter_mut().zip(widths) {
                cell.width = width;
            }
        }

        let current: f32 = self.rows.iter().map(|r| r.height).sum();
        let eligible: Vec<bool> = self
            .rows
            .iter()
            .map(|row| row.cells.iter().any(|c| resizes_y(c.panel)))
            .collect();
        let mut heights: Vec<f32> = self.rows.iter().map(|r| r.height).collect();
        distribute(&mut heights, size.y - current, &eligible);
        for (row, height) in self.rows.iter_mut().zip(heights) {
            row.height = height;
        }
    }

    // ------------------------------------------------------------------------
    // Layout

    /// Cell rects within `content`, row by row.
    pub fn layout(&self, content: Rect) -> Vec<(PanelId, Rect)> {
        let mut out = Vec::with_capacity(self.len());
        let mut y = content.min.y;
        for row in &self.rows {
            let mut x = content.min.x;
            for cell in &row.cells {
                let rect = Rect::from_min_size(pos2(x, y), Vec2::new(cell.width, row.height));
                out.push((cell.panel, rect));
                x += cell.width;
            }
            y += row.height;
        }
        out
    }

    pub fn cell_rect(&self, content: Rect, panel: PanelId) -> Option<Rect> {
        self.layout(content)
            .into_iter()
            .find_map(|(id, rect)| (id == panel).then_some(rect))
    }

    pub fn panel_at(&self, content: Rect, pos: Pos2) -> Option<PanelId> {
        self.layout(content)
            .into_iter()
            .find_map(|(id, rect)| rect.contains(pos).then_some(id))
    }

    /// Index of the row spanning `y`, clamped to the first/last row.
    pub(super) fn row_at(&self, content: Rect, y: f32) -> Option<usize> {
        if self.rows.is_empty() {
            return None;
        }
        let mut bottom = content.min.y;
        for (index, row) in self.rows.iter().enumerate() {
            bottom += row.height;
            if y <= bottom {
                return Some(index);
            }
        }
        Some(self.rows.len() - 1)
    }
}

/// Add `delta` to `sizes` in equal shares without taking any size below zero.
///
/// Only `eligible` entries take shares (all entries when none is eligible or `eligible` is
/// empty). Whatever the eligible entries can't absorb while shrinking is passed on to the
/// rest.
pub(super) fn distribute(sizes: &mut [f32], delta: f32, eligible: &[bool]) {
    if sizes.is_empty() || delta == 0.0 {
        return;
    }

    let mut preferred: Vec<usize> = eligible.iter().positions(|&e| e).collect();
    if preferred.is_empty() {
        preferred = (0..sizes.len()).collect();
    }
    let leftover = share_equally(sizes, &preferred, delta);
    if leftover < 0.0 {
        let all: Vec<usize> = (0..sizes.len()).collect();
        share_equally(sizes, &all, leftover);
    }
}

/// Returns the part of `delta` that couldn't be absorbed (only ever negative).
fn share_equally(sizes: &mut [f32], indices: &[usize], delta: f32) -> f32 {
    let mut active = indices.to_vec();
    let mut remaining = delta;
    while !active.is_empty() {
        let share = remaining / active.len() as f32;
        let (starved, fed): (Vec<usize>, Vec<usize>) =
            active.iter().copied().partition(|&i| sizes[i] + share < 0.0);
        if starved.is_empty() {
            for i in fed {
                sizes[i] += share;
            }
            return 0.0;
        }
        for i in starved {
            remaining += sizes[i];
            sizes[i] = 0.0;
        }
        active = fed;
    }
    remaining
}
