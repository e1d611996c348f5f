use derive_more::IsVariant;

use crate::core::shape::{Position, Shape};

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Cell {
    Empty,
    Locked,
}

/// The playfield: a fixed-size grid of cells in row-major order, row 0 at the
/// top. Locked cells change only through [`Board::lock`] and
/// [`Board::clear_full_rows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Builds a board from ASCII art (`#` locked, `.` empty). Test fixture.
    ///
    /// # Panics
    ///
    /// Panics if rows have uneven widths.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let rows: Vec<&str> = art.lines().map(str::trim).filter(|s| !s.is_empty()).collect();
        let height = rows.len();
        let width = rows[0].len();
        let mut cells = Vec::with_capacity(width * height);
        for row in &rows {
            assert_eq!(row.len(), width, "uneven row widths in board art");
            cells.extend(row.chars().map(|ch| {
                if ch == '#' {
                    Cell::Locked
                } else {
                    Cell::Empty
                }
            }));
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

    /// Whether the in-range cell `(x, y)` is locked. Range policy lives in
    /// [`Board::allows`]; callers here must pass valid coordinates.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x].is_locked()
    }

    /// Iterates the rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// The single placement validator. A placement is allowed when every
    /// filled cell of `shape`, offset by `position`, lies within the side and
    /// bottom walls and does not overlap a locked cell. Cells above the top
    /// edge (absolute y < 0) are allowed so pieces can enter the field.
    #[must_use]
    pub fn allows(&self, shape: &Shape, position: Position) -> bool {
        #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let (width, height) = (self.width as i32, self.height as i32);
        shape.filled_cells().all(|(col, row)| {
            #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            let (x, y) = (position.x + col as i32, position.y + row as i32);
            if x < 0 || x >= width || y >= height {
                return false;
            }
            #[expect(clippy::cast_sign_loss)]
            let in_field = y < 0 || !self.is_occupied(x as usize, y as usize);
            in_field
        })
    }

    /// Marks each given cell locked. Out-of-range cells, including the
    /// above-the-top cells of a piece that settled while entering, are
    /// skipped.
    pub fn lock(&mut self, cells: impl IntoIterator<Item = Position>) {
        for cell in cells {
            let (Ok(x), Ok(y)) = (usize::try_from(cell.x), usize::try_from(cell.y)) else {
                continue;
            };
            if x < self.width && y < self.height {
                self.cells[y * self.width + x] = Cell::Locked;
            }
        }
    }

    /// Removes every completely locked row in one bottom-up compaction pass
    /// and refills the top with empty rows. Surviving rows keep their
    /// relative order. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut cleared = 0;
        for y in (0..self.height).rev() {
            let row = y * width..(y + 1) * width;
            if self.cells[row.clone()].iter().all(Cell::is_locked) {
                cleared += 1;
            } else if cleared > 0 {
                self.cells.copy_within(row, (y + cleared) * width);
            }
        }
        self.cells[..cleared * width].fill(Cell::Empty);
        cleared
    }
}
