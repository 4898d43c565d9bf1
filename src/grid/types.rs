use std::fmt;
use serde::{Serialize, Deserialize};

/// A block of cells in a single column, rows `start_row..=end_row` (1-based)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub column: String,
    pub start_row: u32,
    pub end_row: u32,
}

impl CellRange {
    pub fn row_count(&self) -> u32 {
        self.end_row - self.start_row + 1
    }
}

/// Renders as A1 notation, e.g. `B2:B5`
impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}:{}{}", self.column, self.start_row, self.column, self.end_row)
    }
}

/// The cells reserved for one (day, shift) pair of the schedule grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRegion {
    pub day: String,
    pub time: String,
    pub cell_range: CellRange,
}
