// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Spreadsheet-style cell addressing for the export grid.

use std::fmt::Debug;

/// A one-based grid coordinate with a letter label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Row index, 1 ..= 26.
    pub row: u32,
    /// Column index, 1 ..= 26.
    pub col: u32,
}

impl GridCell {
    /// The two-letter cell identifier, row letter first (row 1, col 1 is
    /// "AA"; row 26, col 1 is "ZA").
    pub fn label(&self) -> String {
        let letter = |index: u32| (b'A' + index.saturating_sub(1).min(25) as u8) as char;
        let mut label = String::with_capacity(2);
        label.push(letter(self.row));
        label.push(letter(self.col));
        label
    }
}

/// Strategy mapping a sequential metric index to a grid cell.
///
/// Returning `None` drops the metric from the export; running past the
/// grid is a documented capacity limit, not an error.
pub trait CellAddresser: Send + Sync + Debug {
    /// The cell for the `index`-th metric, or `None` past capacity.
    fn cell(&self, index: usize) -> Option<GridCell>;

    /// Total number of addressable cells.
    fn capacity(&self) -> usize;
}

/// The default letter-addressed grid: cells fill row-major within a
/// column (row wraps back to 1 and the column increments). Both axes are
/// limited to 26 positions by the A-Z labels.
#[derive(Debug, Clone, Copy)]
pub struct LetterGrid {
    rows: u32,
    cols: u32,
}

impl LetterGrid {
    /// A grid with the given dimensions, clamped to 1 ..= 26 per axis.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows: rows.clamp(1, 26),
            cols: cols.clamp(1, 26),
        }
    }
}

impl Default for LetterGrid {
    fn default() -> Self {
        Self::new(26, 26)
    }
}

impl CellAddresser for LetterGrid {
    fn cell(&self, index: usize) -> Option<GridCell> {
        if index >= self.capacity() {
            return None;
        }
        let index = index as u32;
        Some(GridCell {
            row: index % self.rows + 1,
            col: index / self.rows + 1,
        })
    }

    fn capacity(&self) -> usize {
        (self.rows * self.cols) as usize
    }
}
