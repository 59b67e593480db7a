// view.rs - Read-only painting of an engine snapshot

use conway::Snapshot;
use egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub background: Color32,
    pub grid_line: Color32,
    /// Live cell the cursor has already passed
    pub live: Color32,
    /// Live cell still waiting for the cursor
    pub pending: Color32,
    pub trail: Color32,
    pub cursor: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(4, 14, 10),
            grid_line: Color32::from_rgba_unmultiplied(16, 185, 129, 20),
            live: Color32::from_rgba_unmultiplied(110, 231, 183, 242),
            pending: Color32::from_rgba_unmultiplied(110, 231, 183, 191),
            trail: Color32::from_rgb(16, 185, 129),
            cursor: Color32::from_rgb(16, 185, 129),
        }
    }
}

/// Screen rectangle of cell `i` for a grid drawn at `origin`.
pub fn cell_rect(origin: Pos2, cell_px: f32, cols: usize, i: usize) -> Rect {
    let (x, y) = (i % cols, i / cols);
    Rect::from_min_size(
        origin + Vec2::new(x as f32 * cell_px, y as f32 * cell_px),
        Vec2::splat(cell_px),
    )
}

pub fn grid_size(cell_px: f32, cols: usize, rows: usize) -> Vec2 {
    Vec2::new(cols as f32 * cell_px, rows as f32 * cell_px)
}

/// Opaque `color` at the given opacity.
fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let [r, g, b, _] = color.to_array();
    Color32::from_rgba_unmultiplied(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

/// Paint cells, trail marks and the cursor.
pub fn paint(painter: &Painter, origin: Pos2, cell_px: f32, snap: &Snapshot, palette: &Palette) {
    let size = grid_size(cell_px, snap.cols, snap.rows);
    painter.rect_filled(Rect::from_min_size(origin, size), 0.0, palette.background);

    // Grid lines only when cells are big enough to read them
    if cell_px >= 6.0 {
        let stroke = Stroke::new(1.0, palette.grid_line);
        for x in 0..=snap.cols {
            let px = origin.x + x as f32 * cell_px;
            painter.line_segment([Pos2::new(px, origin.y), Pos2::new(px, origin.y + size.y)], stroke);
        }
        for y in 0..=snap.rows {
            let py = origin.y + y as f32 * cell_px;
            painter.line_segment([Pos2::new(origin.x, py), Pos2::new(origin.x + size.x, py)], stroke);
        }
    }

    for (i, &alive) in snap.cells.iter().enumerate() {
        if !alive {
            continue;
        }
        let color = if snap.is_processed(i) { palette.live } else { palette.pending };
        painter.rect_filled(cell_rect(origin, cell_px, snap.cols, i).shrink(1.0), 0.0, color);
    }

    for mark in &snap.trail {
        let a = mark.intensity(snap.trail_ttl);
        let rect = cell_rect(origin, cell_px, snap.cols, mark.index);
        painter.rect_filled(rect.shrink(1.0), 0.0, with_alpha(palette.trail, 0.25 * a));
        painter.rect_stroke(rect.shrink(0.5), 0.0, Stroke::new(1.0, with_alpha(palette.trail, 0.7 * a)));
    }

    // Cursor sits on the next cell to be processed
    let cursor = cell_rect(origin, cell_px, snap.cols, snap.cursor % snap.cells.len());
    painter.rect_filled(cursor.shrink(1.5), 0.0, with_alpha(palette.cursor, 0.12));
    painter.rect_stroke(cursor, 0.0, Stroke::new(2.0, with_alpha(palette.cursor, 0.9)));
}

/// One-line summary shown above the grid.
pub fn status_line(snap: &Snapshot, running: bool) -> String {
    format!(
        "STATE: {} · STEP N: {} · PROGRESS: {}% · SPD: {:.2} cells/s (~{:.2}s/step)",
        if running { "RUN" } else { "PAUSE" },
        snap.generation,
        (snap.progress() * 100.0).floor() as u32,
        snap.rate,
        snap.sweep_seconds().max(0.01),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use conway::SweepEngine;
    use egui::pos2;
    use std::time::Instant;

    #[test]
    fn test_cell_rect() {
        let rect = cell_rect(pos2(5.0, 5.0), 8.0, 120, 121);
        assert_eq!(rect.min, pos2(13.0, 13.0));
        assert_eq!(rect.size(), Vec2::splat(8.0));
    }

    #[test]
    fn test_status_line() {
        let mut engine = SweepEngine::with_size(30, 10, 0).unwrap();
        engine.advance(75);
        let snap = engine.snapshot(Instant::now());
        assert_eq!(
            status_line(&snap, true),
            "STATE: RUN · STEP N: 0 · PROGRESS: 25% · SPD: 100.00 cells/s (~3.00s/step)"
        );
        assert!(status_line(&snap, false).starts_with("STATE: PAUSE"));
    }
}
