/// Number of canonical shapes in the catalog.
pub const CATALOG_LEN: usize = 7;

/// The canonical shape matrices: straight, square, T, J, L, S, Z.
const CATALOG: [&str; CATALOG_LEN] = [
    "####",
    "##\n\
     ##",
    "###\n\
     .#.",
    "###\n\
     #..",
    "###\n\
     ..#",
    "##.\n\
     .##",
    ".##\n\
     ##.",
];

/// A piece's occupancy matrix. Shapes are immutable; rotation produces a new
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Returns the catalog shape at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= CATALOG_LEN`. Shape sources draw indices from the
    /// catalog range, so an out-of-range index is a caller bug.
    #[must_use]
    pub fn from_catalog(index: usize) -> Self {
        assert!(index < CATALOG_LEN, "shape catalog index out of range: {index}");
        Self::from_ascii(CATALOG[index])
    }

    fn from_ascii(art: &str) -> Self {
        let rows: Vec<&str> = art.lines().map(str::trim).collect();
        let height = rows.len();
        let width = rows[0].len();
        let mut cells = Vec::with_capacity(width * height);
        for row in &rows {
            debug_assert_eq!(row.len(), width);
            cells.extend(row.chars().map(|ch| ch == '#'));
        }
        Self {
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at `(col, row)` is part of the piece.
    #[must_use]
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        self.cells[row * self.width + col]
    }

    /// Iterates the `(col, row)` offsets of every occupied cell, row by row.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height)
            .flat_map(move |row| (0..self.width).map(move |col| (col, row)))
            .filter(|&(col, row)| self.is_filled(col, row))
    }

    /// Returns this shape rotated 90° clockwise.
    ///
    /// The result is `height × width`; four rotations reproduce the original.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let (width, height) = (self.height, self.width);
        let mut cells = vec![false; width * height];
        for row in 0..height {
            for col in 0..width {
                cells[row * width + col] = self.is_filled(row, self.height - 1 - col);
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }
}

/// Top-left corner of a piece on the board. `y` may be negative while a piece
/// is entering from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn shifted(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub const fn below(self) -> Self {
        self.shifted(0, 1)
    }
}
