use ahash::HashSet;

use super::DockingContainer;

/// Human-readable list of broken invariants. Empty when the container is consistent.
#[cfg_attr(not(any(debug_assertions, test)), allow(dead_code))]
pub(super) fn container_integrity_issues<Pane>(container: &DockingContainer<Pane>) -> Vec<String> {
    let mut issues: Vec<String> = Vec::new();

    let mut seen: HashSet<_> = HashSet::default();
    for id in container.grid.panel_ids() {
        if !seen.insert(id) {
            issues.push(format!("integrity: panel {id} appears twice in the grid"));
        }
        match container.panels.get(&id) {
            None => issues.push(format!("integrity: grid references missing panel {id}")),
            Some(panel) if panel.is_windowed() => {
                issues.push(format!("integrity: floating panel {id} is on the grid"));
            }
            Some(_) => {}
        }
        if container.floating.contains_key(&id) {
            issues.push(format!("integrity: docked panel {id} has a floating window"));
        }
    }

    for (id, panel) in &container.panels {
        if panel.is_windowed() {
            if !container.floating.contains_key(id) {
                issues.push(format!("integrity: floating panel {id} has no window"));
            }
        } else if !seen.contains(id) {
            issues.push(format!("integrity: docked panel {id} is not on the grid"));
        }
    }
    for id in container.floating.keys() {
        if !container.panels.contains_key(id) {
            issues.push(format!("integrity: window for missing panel {id}"));
        }
    }

    let size = container.content_rect().size();
    let close = |a: f32, b: f32| (a - b).abs() <= 1e-3 * b.abs().max(1.0);
    let rows = container.grid.rows();
    for (r, row) in rows.iter().enumerate() {
        if row.cells.is_empty() {
            issues.push(format!("integrity: row {r} is empty"));
        }
        if row.height < 0.0 {
            issues.push(format!("integrity: row {r} has negative height {}", row.height));
        }
        for cell in &row.cells {
            if cell.width < 0.0 {
                issues.push(format!(
                    "integrity: panel {} has negative width {}",
                    cell.panel, cell.width
                ));
            }
        }
        let width: f32 = row.cells.iter().map(|c| c.width).sum();
        if !close(width, size.x) {
            issues.push(format!(
                "integrity: row {r} is {width} wide, content is {}",
                size.x
            ));
        }
    }
    let height: f32 = rows.iter().map(|r| r.height).sum();
    if !rows.is_empty() && !close(height, size.y) {
        issues.push(format!(
            "integrity: rows are {height} high, content is {}",
            size.y
        ));
    }

    issues
}
