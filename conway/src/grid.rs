// grid.rs - Double-buffered toroidal grid for Conway's Game of Life

// Default grid size
pub const COLS: usize = 120;                          // Columns of the playing area
pub const ROWS: usize = 60;                           // Rows of the playing area
pub const TOTAL: usize = COLS * ROWS;                 // Linear cell count, index = y * COLS + x

/// Which of the two generation buffers to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Buffer {
    /// Generation N, authoritative for cells not yet processed this sweep.
    Current,
    /// Generation N+1, authoritative for cells already processed this sweep.
    Next,
}

/// Conway's rule: survival on 2 or 3 neighbours, birth on exactly 3.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

/// Two generation buffers sharing one linear index scheme.
///
/// Every value written to `next` is derived from `current` alone, so a sweep
/// that fills `next` one cell at a time over many ticks still reads a single
/// consistent snapshot of generation N.
#[derive(Clone, Debug)]
pub struct GridBuffers {
    cols: usize,
    rows: usize,
    current: Vec<bool>,
    next: Vec<bool>,
}

impl Default for GridBuffers {
    fn default() -> Self {
        Self::new(COLS, ROWS)
    }
}

impl GridBuffers {
    /// Allocate both buffers, all dead. Dimensions must be non-zero.
    pub fn new(cols: usize, rows: usize) -> Self {
        debug_assert!(cols > 0 && rows > 0, "grid dimensions must be non-zero");
        let total = cols * rows;
        Self {
            cols,
            rows,
            current: vec![false; total],
            next: vec![false; total],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn total(&self) -> usize {
        self.current.len()
    }

    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }

    #[inline]
    pub fn coords_of(&self, i: usize) -> (usize, usize) {
        (i % self.cols, i / self.cols)
    }

    /// Live neighbours of `(x, y)` in `buffer`, wrapping at every edge.
    pub fn neighbor_count(&self, x: usize, y: usize, buffer: Buffer) -> u8 {
        let cells = match buffer {
            Buffer::Current => &self.current,
            Buffer::Next => &self.next,
        };

        // Offsets are shifted by one so (x + cols - 1 + d) % cols == (x + d - 1 + cols) % cols
        let mut count = 0;
        for dy in 0..3 {
            for dx in 0..3 {
                if dx == 1 && dy == 1 {
                    continue;
                }
                let nx = (x + self.cols - 1 + dx) % self.cols;
                let ny = (y + self.rows - 1 + dy) % self.rows;
                if cells[ny * self.cols + nx] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Write `next[i]` from the current generation only.
    pub fn compute_next_at(&mut self, i: usize) {
        let (x, y) = self.coords_of(i);
        let alive = self.current[i];
        let neighbors = self.neighbor_count(x, y, Buffer::Current);
        self.next[i] = next_state(alive, neighbors);
    }

    /// Promote `next` to `current` and clear the new `next`.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.clear_next();
    }

    #[inline]
    pub fn current(&self, i: usize) -> bool {
        self.current[i]
    }

    #[inline]
    pub fn next(&self, i: usize) -> bool {
        self.next[i]
    }

    pub fn set_current(&mut self, i: usize, alive: bool) {
        self.current[i] = alive;
    }

    pub fn flip_current(&mut self, i: usize) {
        self.current[i] = !self.current[i];
    }

    pub fn flip_next(&mut self, i: usize) {
        self.next[i] = !self.next[i];
    }

    pub fn clear_next(&mut self) {
        self.next.fill(false);
    }

    pub fn clear(&mut self) {
        self.current.fill(false);
        self.next.fill(false);
    }

    /// Overwrite the current generation cell by cell from `alive`.
    pub fn fill_current(&mut self, mut alive: impl FnMut(usize) -> bool) {
        for (i, cell) in self.current.iter_mut().enumerate() {
            *cell = alive(i);
        }
    }

    /// Live cells in the current generation.
    pub fn population(&self) -> usize {
        self.current.iter().filter(|&&c| c).count()
    }

    pub fn current_cells(&self) -> &[bool] {
        &self.current
    }

    pub fn next_cells(&self) -> &[bool] {
        &self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_blinker() -> GridBuffers {
        let mut grid = GridBuffers::new(5, 5);
        for y in 1..=3 {
            let i = grid.index_of(2, y);
            grid.set_current(i, true);
        }
        grid
    }

    #[test]
    fn test_rule_table() {
        for n in 0..=8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "live cell with {n}");
            assert_eq!(next_state(false, n), n == 3, "dead cell with {n}");
        }
    }

    #[test]
    fn test_blinker_neighbor_counts() {
        let grid = vertical_blinker();
        assert_eq!(grid.neighbor_count(2, 2, Buffer::Current), 2);
        assert_eq!(grid.neighbor_count(1, 2, Buffer::Current), 3);
        assert_eq!(grid.neighbor_count(2, 0, Buffer::Current), 1);
        assert_eq!(grid.neighbor_count(2, 2, Buffer::Next), 0);
    }

    #[test]
    fn test_neighbor_count_wraps_columns() {
        let mut grid = GridBuffers::new(8, 6);
        let edge = grid.index_of(7, 2);
        grid.set_current(edge, true);

        // Column 0 of the rows above, at and below sees the cell at COLS-1
        assert_eq!(grid.neighbor_count(0, 1, Buffer::Current), 1);
        assert_eq!(grid.neighbor_count(0, 2, Buffer::Current), 1);
        assert_eq!(grid.neighbor_count(0, 3, Buffer::Current), 1);
        assert_eq!(grid.neighbor_count(0, 4, Buffer::Current), 0);
    }

    #[test]
    fn test_neighbor_count_wraps_corners() {
        let mut grid = GridBuffers::new(6, 4);
        let corner = grid.index_of(5, 3);
        grid.set_current(corner, true);
        assert_eq!(grid.neighbor_count(0, 0, Buffer::Current), 1);
    }

    #[test]
    fn test_full_grid_has_eight_neighbors_everywhere() {
        let mut grid = GridBuffers::new(4, 3);
        grid.fill_current(|_| true);
        for i in 0..grid.total() {
            let (x, y) = grid.coords_of(i);
            assert_eq!(grid.neighbor_count(x, y, Buffer::Current), 8);
        }
    }

    #[test]
    fn test_compute_next_reads_current_only() {
        let mut grid = vertical_blinker();
        // Poison next with live cells; the result must not depend on it
        for i in 0..grid.total() {
            grid.flip_next(i);
        }
        for i in 0..grid.total() {
            grid.compute_next_at(i);
        }
        let horizontal: Vec<usize> = (1..=3).map(|x| grid.index_of(x, 2)).collect();
        for i in 0..grid.total() {
            assert_eq!(grid.next(i), horizontal.contains(&i), "cell {i}");
        }
    }

    #[test]
    fn test_swap_promotes_and_clears() {
        let mut grid = GridBuffers::new(3, 3);
        grid.flip_next(4);
        grid.swap();
        assert!(grid.current(4));
        assert!(grid.next_cells().iter().all(|&c| !c));
    }

    #[test]
    fn test_index_round_trip_on_default_grid() {
        let grid = GridBuffers::default();
        assert_eq!(grid.total(), TOTAL);
        assert_eq!(grid.index_of(COLS - 1, 0), COLS - 1);
        assert_eq!(grid.coords_of(COLS), (0, 1));
    }
}
