use std::fmt;
use std::str::FromStr;

use super::player::Player;
use crate::error::{BoardParseError, MoveError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of aligned discs needed to win.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Human,
    Machine,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Human => 'H',
            Cell::Machine => 'M',
        }
    }
}

/// Result of scanning a board. Always recomputed, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    HumanWin,
    MachineWin,
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Run directions as (row step, column step). Row 0 is the top.
const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, 1),  // descending diagonal, top-left to bottom-right
    (1, -1), // ascending diagonal, seen from its top-right end
];

/// A 6×7 Connect Four grid. Row 0 is the top, row 5 is the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// A column is playable when it exists and its top cell is still empty.
    pub fn is_playable(&self, col: usize) -> bool {
        col < COLS && self.cells[0][col] == Cell::Empty
    }

    /// Playable columns in ascending order.
    pub fn playable_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(move |&col| self.is_playable(col))
    }

    /// Number of discs stacked in a column.
    pub fn column_height(&self, col: usize) -> usize {
        (0..ROWS)
            .filter(|&row| self.cells[row][col] != Cell::Empty)
            .count()
    }

    /// Total number of discs on the board.
    pub fn disc_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Drop a disc for `player` in a column, returns the row where it landed.
    ///
    /// The board is left untouched on error.
    pub fn apply_move(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn { column: col });
        }

        // Find the lowest empty row in this column
        let row = (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][col] == Cell::Empty)
            .ok_or(MoveError::ColumnFull { column: col })?;

        self.cells[row][col] = player.to_cell();
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(|&cell| cell != Cell::Empty)
    }

    /// True if `player` owns any horizontal, vertical or diagonal run of four.
    pub fn has_four_in_a_row(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    /// First run of four belonging to `player`, in [`runs`] order.
    pub fn winning_line(&self, player: Player) -> Option<[(usize, usize); CONNECT]> {
        let mark = player.to_cell();
        runs().find(|line| line.iter().all(|&(r, c)| self.cells[r][c] == mark))
    }

    /// Derive the game outcome from the grid.
    ///
    /// Both players holding a four is unreachable through alternating play;
    /// if it happens anyway the human win is reported.
    pub fn outcome(&self) -> Outcome {
        if self.has_four_in_a_row(Player::Human) {
            Outcome::HumanWin
        } else if self.has_four_in_a_row(Player::Machine) {
            Outcome::MachineWin
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_terminal()
    }
}

/// Every line of four cells on the board: 24 horizontal, 21 vertical and 12
/// along each diagonal. Yields rows top-down, columns left to right, then
/// direction.
pub fn runs() -> impl Iterator<Item = [(usize, usize); CONNECT]> {
    (0..ROWS).flat_map(|row| {
        (0..COLS).flat_map(move |col| {
            DIRECTIONS
                .into_iter()
                .filter_map(move |(dr, dc)| run_from(row, col, dr, dc))
        })
    })
}

/// Cells of the run of length four starting at (row, col), if it fits.
fn run_from(row: usize, col: usize, dr: isize, dc: isize) -> Option<[(usize, usize); CONNECT]> {
    let span = CONNECT as isize - 1;
    let end_row = row as isize + span * dr;
    let end_col = col as isize + span * dc;
    if end_row < 0 || end_row >= ROWS as isize || end_col < 0 || end_col >= COLS as isize {
        return None;
    }

    Some(std::array::from_fn(|i| {
        let i = i as isize;
        (
            (row as isize + i * dr) as usize,
            (col as isize + i * dc) as usize,
        )
    }))
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parse the `Display` form: six lines of seven `.`, `H` or `M`, top row
    /// first. Blank lines and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != ROWS {
            return Err(BoardParseError::RowCount {
                expected: ROWS,
                found: lines.len(),
            });
        }

        let mut board = Board::new();
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != COLS {
                return Err(BoardParseError::RowLength {
                    row,
                    expected: COLS,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                board.cells[row][col] = match ch {
                    '.' => Cell::Empty,
                    'H' | 'h' => Cell::Human,
                    'M' | 'm' => Cell::Machine,
                    other => return Err(BoardParseError::UnknownCell { ch: other, row, col }),
                };
            }
        }

        // Gravity: a disc may not sit above an empty cell
        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if board.cells[row][col] != Cell::Empty && board.cells[row + 1][col] == Cell::Empty {
                    return Err(BoardParseError::FloatingDisc { row, col });
                }
            }
        }

        Ok(board)
    }
}
