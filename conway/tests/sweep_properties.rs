// sweep_properties.rs - Incremental sweep checked against a whole-grid reference step

use std::time::{Duration, Instant};

use conway::{Buffer, GridBuffers, SweepEngine};

/// Classic double-buffered step over the whole grid.
fn reference_step(cells: &[bool], cols: usize, rows: usize) -> Vec<bool> {
    let mut next = vec![false; cells.len()];
    for y in 0..rows {
        for x in 0..cols {
            let mut count = 0;
            for dy in [-1i64, 0, 1] {
                for dx in [-1i64, 0, 1] {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = (x as i64 + dx).rem_euclid(cols as i64) as usize;
                    let ny = (y as i64 + dy).rem_euclid(rows as i64) as usize;
                    if cells[ny * cols + nx] {
                        count += 1;
                    }
                }
            }
            let alive = cells[y * cols + x];
            next[y * cols + x] = matches!((alive, count), (true, 2) | (true, 3) | (false, 3));
        }
    }
    next
}

fn seeded(cols: usize, rows: usize, seed: u64) -> SweepEngine {
    let mut engine = SweepEngine::with_size(cols, rows, seed).unwrap();
    engine.seed();
    engine
}

#[test]
fn vertical_blinker_turns_horizontal_and_back() {
    let mut engine = SweepEngine::with_size(7, 7, 0).unwrap();
    engine.clear();
    let center = 3 * 7 + 3;
    for i in [center - 7, center, center + 7] {
        engine.toggle_cell(i).unwrap();
    }

    engine.advance(engine.total());
    let horizontal: Vec<usize> = vec![center - 1, center, center + 1];
    let alive: Vec<usize> = (0..49).filter(|&i| engine.composite_at(i)).collect();
    assert_eq!(alive, horizontal);

    engine.advance(engine.total());
    let alive: Vec<usize> = (0..49).filter(|&i| engine.composite_at(i)).collect();
    assert_eq!(alive, vec![center - 7, center, center + 7]);
    assert_eq!(engine.generation(), 2);
}

#[test]
fn neighbor_count_wraps_from_first_to_last_column() {
    let mut grid = GridBuffers::new(16, 8);
    for y in 0..8 {
        let left = grid.index_of(0, y);
        grid.set_current(left, true);

        let right = grid.index_of(15, (y + 1) % 8);
        grid.set_current(right, true);
        // Each sees the other across the left/right seam, diagonally
        assert_eq!(grid.neighbor_count(0, y, Buffer::Current), 1);
        assert_eq!(grid.neighbor_count(15, (y + 1) % 8, Buffer::Current), 1);

        grid.clear();
    }
}

#[test]
fn advance_zero_never_changes_state() {
    let mut engine = seeded(30, 20, 17);
    engine.advance(333);
    let cursor = engine.cursor();
    let generation = engine.generation();
    let current = engine.grid().current_cells().to_vec();
    let next = engine.grid().next_cells().to_vec();

    for _ in 0..100 {
        engine.advance(0);
    }

    assert_eq!(engine.cursor(), cursor);
    assert_eq!(engine.generation(), generation);
    assert_eq!(engine.grid().current_cells(), current.as_slice());
    assert_eq!(engine.grid().next_cells(), next.as_slice());
}

#[test]
fn oversized_budget_equals_repeated_sweeps() {
    let (cols, rows) = (24, 18);
    let total = cols * rows;

    let mut bulk = seeded(cols, rows, 99);
    let mut stepped = seeded(cols, rows, 99);
    let start = bulk.snapshot_composite();

    bulk.advance(3 * total + 5);

    for _ in 0..3 {
        stepped.advance(total);
    }
    stepped.advance(5);

    assert_eq!(bulk.generation(), 3);
    assert_eq!(bulk.cursor(), 5);
    assert_eq!(bulk.grid().current_cells(), stepped.grid().current_cells());
    assert_eq!(bulk.grid().next_cells(), stepped.grid().next_cells());

    let mut expected = start;
    for _ in 0..3 {
        expected = reference_step(&expected, cols, rows);
    }
    assert_eq!(bulk.grid().current_cells(), expected.as_slice());
}

#[test]
fn sweep_in_odd_chunks_matches_reference() {
    let (cols, rows) = (40, 25);
    let mut engine = seeded(cols, rows, 5);
    let mut expected = engine.snapshot_composite();

    for generation in 1..=6u64 {
        expected = reference_step(&expected, cols, rows);
        // Uneven budgets that straddle the sweep boundary
        while engine.generation() < generation {
            let chunk = 1 + (engine.cursor() * 7 + 13) % 97;
            let left = engine.total() - engine.cursor();
            engine.advance(chunk.min(left));
        }
        assert_eq!(engine.snapshot_composite(), expected, "generation {generation}");
    }
}

#[test]
fn live_edit_mid_sweep_is_visible_and_carried_forward() {
    let (cols, rows) = (32, 20);
    let total = cols * rows;
    let mut engine = seeded(cols, rows, 2024);
    let c = total / 2;
    engine.advance(c);

    let j = c / 3;
    let before = engine.snapshot_composite()[j];
    engine.toggle_cell(j).unwrap();
    let view = engine.snapshot_composite();
    assert_eq!(view[j], !before, "edit must show immediately");

    // Finish the sweep; the edited value is generation 1 at index j
    engine.advance(total - c);
    assert_eq!(engine.generation(), 1);
    assert_eq!(engine.grid().current(j), !before);

    // And generation 2 is computed from the edited state
    let expected = reference_step(&view_after_swap(&engine), cols, rows);
    engine.advance(total);
    assert_eq!(engine.snapshot_composite(), expected);
}

fn view_after_swap(engine: &SweepEngine) -> Vec<bool> {
    assert_eq!(engine.cursor(), 0);
    engine.snapshot_composite()
}

#[test]
fn tick_throughput_tracks_configured_rate() {
    let mut engine = SweepEngine::with_size(50, 50, 8).unwrap();
    // 0.377 cells per ms
    let rate = engine.set_speed(377.0).unwrap();
    let elapsed_ms = 16.7;
    let calls = 5_000;

    let mut processed = 0usize;
    for _ in 0..calls {
        processed += engine.tick(elapsed_ms);
    }

    let expected = rate * elapsed_ms * calls as f64 / 1000.0;
    assert!(
        (processed as f64 - expected).abs() <= 1.0,
        "processed {processed}, expected {expected}"
    );
    let cursor_total = engine.generation() as usize * engine.total() + engine.cursor();
    assert_eq!(cursor_total, processed);
}

#[test]
fn trail_entries_expire_after_ttl() {
    let mut engine = SweepEngine::with_size(10, 10, 1).unwrap();
    let t0 = Instant::now();
    engine.toggle_cell_at(42, t0).unwrap();
    let ttl = engine.trail_ttl();

    assert!(engine.active_trail(t0 + ttl / 2).iter().any(|m| m.index == 42));
    for eps in [Duration::from_nanos(1), Duration::from_millis(1), Duration::from_secs(5)] {
        engine.toggle_cell_at(42, t0).unwrap();
        assert!(engine.active_trail(t0 + ttl + eps).is_empty());
    }
}

#[test]
fn paused_engine_resumes_where_it_stopped() {
    let mut a = seeded(20, 20, 31);
    let mut b = seeded(20, 20, 31);

    a.advance(150);
    // "Pause": no calls at all, then continue
    a.advance(250);

    b.advance(400);
    assert_eq!(a.snapshot_composite(), b.snapshot_composite());
    assert_eq!(a.cursor(), b.cursor());
}
