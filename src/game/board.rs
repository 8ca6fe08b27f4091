use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

use super::player::Player;

pub const DEFAULT_COLS: usize = 7;
pub const DEFAULT_ROWS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// Symbol used by the serialized board format
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Red => 'X',
            Cell::Yellow => 'O',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            ' ' => Some(Cell::Empty),
            'X' => Some(Cell::Red),
            'O' => Some(Cell::Yellow),
            _ => None,
        }
    }
}

/// Axis steps as (row, col): vertical, horizontal, `/` and `\`.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// A Connect Four grid with a cached fill level per column.
///
/// Row 0 is the bottom row. `fill[col]` is the number of occupied cells in
/// `col`, which is also the row the next disc lands on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
    fill: Vec<usize>,
}

impl Board {
    /// Create an empty board. Zero-sized dimensions are rejected.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }

        Ok(Board {
            width,
            height,
            cells: vec![vec![Cell::Empty; width]; height],
            fill: vec![0; width],
        })
    }

    /// The classic 7x6 board
    pub fn standard() -> Self {
        Board {
            width: DEFAULT_COLS,
            height: DEFAULT_ROWS,
            cells: vec![vec![Cell::Empty; DEFAULT_COLS]; DEFAULT_ROWS],
            fill: vec![0; DEFAULT_COLS],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position
    /// Row 0 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Number of occupied cells in a column (0 for out-of-range columns)
    pub fn fill_level(&self, col: usize) -> usize {
        self.fill.get(col).copied().unwrap_or(0)
    }

    /// Row of the most recently placed disc in `col`
    pub fn top_filled_row(&self, col: usize) -> Option<usize> {
        self.fill.get(col)?.checked_sub(1)
    }

    /// Clear every cell for a rematch
    pub fn reset(&mut self) {
        for row in &mut self.cells {
            row.fill(Cell::Empty);
        }
        self.fill.fill(0);
    }

    /// Legal columns in ascending order
    pub fn valid_moves(&self) -> Vec<usize> {
        (0..self.width).filter(|&col| self.is_valid_move(col)).collect()
    }

    pub fn is_valid_move(&self, col: usize) -> bool {
        col < self.width && self.fill[col] < self.height
    }

    /// Drop a disc in a column
    pub fn make_move(&mut self, col: usize, player: Player) -> Result<(), BoardError> {
        if col >= self.width {
            return Err(BoardError::InvalidColumn {
                column: col,
                width: self.width,
            });
        }

        let row = self.fill[col];
        if row >= self.height {
            return Err(BoardError::ColumnFull(col));
        }

        self.cells[row][col] = player.to_cell();
        self.fill[col] += 1;
        Ok(())
    }

    /// Take back the topmost disc of a column.
    ///
    /// Must mirror the most recent `make_move` on that column. The cleared
    /// cell is not checked, so undoing out of order silently breaks gravity.
    pub fn undo_move(&mut self, col: usize) -> Result<(), BoardError> {
        if col >= self.width {
            return Err(BoardError::InvalidColumn {
                column: col,
                width: self.width,
            });
        }
        if self.fill[col] == 0 {
            return Err(BoardError::EmptyColumn(col));
        }

        self.fill[col] -= 1;
        self.cells[self.fill[col]][col] = Cell::Empty;
        Ok(())
    }

    /// Check whether the disc most recently dropped in `col` made four in a row.
    ///
    /// Only the lines through that disc are scanned.
    pub fn was_winning_move(&self, col: usize) -> bool {
        let Some(row) = self.top_filled_row(col) else {
            return false;
        };
        let cell = self.cells[row][col];
        if cell == Cell::Empty {
            return false;
        }

        for (dr, dc) in DIRECTIONS {
            let mut count = 1;
            for sign in [-1, 1] {
                let mut r = row as isize;
                let mut c = col as isize;
                loop {
                    r += sign * dr;
                    c += sign * dc;
                    if !self.holds(r, c, cell) {
                        break;
                    }
                    count += 1;
                    if count >= 4 {
                        return true;
                    }
                }
            }
        }

        false
    }

    fn holds(&self, row: isize, col: isize, cell: Cell) -> bool {
        row >= 0
            && col >= 0
            && (row as usize) < self.height
            && (col as usize) < self.width
            && self.cells[row as usize][col as usize] == cell
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.fill.iter().all(|&level| level == self.height)
    }

    /// Load cells from `width * height` symbols, top row first.
    ///
    /// Fill levels are recomputed from the highest disc in each column. Gaps
    /// are accepted as given. The board is untouched if the text is rejected.
    pub fn parse_from_str(&mut self, text: &str) -> Result<(), BoardError> {
        let expected = self.width * self.height;
        let actual = text.chars().count();
        if actual != expected {
            return Err(BoardError::MalformedSerialization { expected, actual });
        }

        let mut cells = vec![vec![Cell::Empty; self.width]; self.height];
        let mut fill = vec![0; self.width];
        for (index, symbol) in text.chars().enumerate() {
            let cell =
                Cell::from_symbol(symbol).ok_or(BoardError::UnknownSymbol { symbol, index })?;
            let row = self.height - 1 - index / self.width;
            let col = index % self.width;
            cells[row][col] = cell;
            if cell != Cell::Empty {
                fill[col] = fill[col].max(row + 1);
            }
        }

        self.cells = cells;
        self.fill = fill;
        Ok(())
    }

    /// Inverse of [`Board::parse_from_str`]
    pub fn to_serialized(&self) -> String {
        self.cells
            .iter()
            .rev()
            .flat_map(|row| row.iter().map(|cell| cell.symbol()))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parses a standard 7x6 board.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::standard();
        board.parse_from_str(s)?;
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter().rev() {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "|{line}|")?;
        }
        Ok(())
    }
}
