use super::Cell;

/// A row-major grid of cells, one per terminal position.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Position of `(x, y)` in `cells`, if on the grid.
    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.offset(x, y).map(|at| &self.cells[at])
    }

    /// Writes outside the grid are dropped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(at) = self.offset(x, y) {
            self.cells[at] = cell;
        }
    }

    fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width).max(1))
    }

    /// Cells that differ from `previous`, with their positions. Both buffers
    /// must have the same size.
    pub fn diff<'a>(&'a self, previous: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> + 'a {
        self.rows()
            .zip(previous.rows())
            .zip(0u16..)
            .flat_map(|((now, before), y)| {
                now.iter()
                    .zip(before)
                    .zip(0u16..)
                    .filter(|((cell, old), _)| cell != old)
                    .map(move |((cell, _), x)| (x, y, cell))
            })
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// The characters of row `y` with trailing blanks removed.
    pub fn row_text(&self, y: u16) -> String {
        let Some(row) = self.rows().nth(usize::from(y)) else {
            return String::new();
        };
        let text: String = row
            .iter()
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect();
        text.trim_end().to_string()
    }

    /// All rows as text, trailing empty rows removed.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = (0..self.height).map(|y| self.row_text(y)).collect();
        let used = lines.iter().rposition(|line| !line.is_empty()).map_or(0, |last| last + 1);
        lines.truncate(used);
        lines
    }
}
