// patterns.rs - Named starting patterns, as (row, col) offsets from the top-left of their bounding box

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    pub fn height(&self) -> usize {
        self.cells.iter().map(|&(row, _)| row + 1).max().unwrap_or(0)
    }

    pub fn width(&self) -> usize {
        self.cells.iter().map(|&(_, col)| col + 1).max().unwrap_or(0)
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top section
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom section (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 1), (1, 2), (0, 2), (2, 1), (2, 0)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

/// Look a pattern up by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Linear indices of `pattern` centred on a `cols` x `rows` torus.
/// Cells that fall past an edge wrap to the opposite side.
pub fn placed_indices(pattern: &Pattern, cols: usize, rows: usize) -> Vec<usize> {
    let top = (rows + rows / 2 - (pattern.height() / 2) % rows) % rows;
    let left = (cols + cols / 2 - (pattern.width() / 2) % cols) % cols;
    pattern
        .cells
        .iter()
        .map(|&(row, col)| {
            let y = (top + row) % rows;
            let x = (left + col) % cols;
            y * cols + x
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_boxes() {
        let glider = find("glider").unwrap();
        assert_eq!((glider.height(), glider.width()), (3, 3));
        let pulsar = find("Pulsar").unwrap();
        assert_eq!((pulsar.height(), pulsar.width()), (13, 13));
        let gun = find("Gosper Glider Gun").unwrap();
        assert_eq!((gun.height(), gun.width()), (9, 36));
        assert!(find("Spaceship").is_none());
    }

    #[test]
    fn test_blinker_is_centred() {
        let blinker = find("Blinker").unwrap();
        let cells = placed_indices(blinker, 5, 5);
        assert_eq!(cells, vec![2 * 5 + 1, 2 * 5 + 2, 2 * 5 + 3]);
    }

    #[test]
    fn test_oversized_pattern_wraps() {
        let gun = find("Gosper Glider Gun").unwrap();
        let cells = placed_indices(gun, 10, 6);
        assert_eq!(cells.len(), gun.cells.len());
        assert!(cells.iter().all(|&i| i < 60));
    }
}
