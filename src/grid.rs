//! Integer grid maps. A level layout is authored as rows of cell codes; `GridMap` validates the
//! codes and the dimensions against `LayoutConfig` before anything is built from it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LayoutConfig;

/// Contents of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellCode {
    Floor = 0,
    Wall = 1,
    /// Item marker. Reserved; nothing consumes it yet.
    Item = 2,
}

impl TryFrom<u8> for CellCode {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Floor),
            1 => Ok(Self::Wall),
            2 => Ok(Self::Item),
            other => Err(other),
        }
    }
}

/// Malformed layout data. These are authoring bugs, so callers treat them as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has {actual} rows, expected {expected}")]
    RowCount { expected: usize, actual: usize },

    #[error("layout row {row} has {actual} columns, expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unknown cell code {code} at row {row}, column {column}")]
    UnknownCell { row: usize, column: usize, code: u8 },
}

/// Row-major grid of cell codes with dimensions fixed by the layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMap {
    rows: usize,
    columns: usize,
    cells: Vec<CellCode>,
}

impl GridMap {
    /// Validates `layout` against the configured dimensions and converts every code.
    pub fn from_rows(config: &LayoutConfig, layout: &[&[u8]]) -> Result<Self, LayoutError> {
        if layout.len() != config.rows {
            return Err(LayoutError::RowCount {
                expected: config.rows,
                actual: layout.len(),
            });
        }

        let mut cells = Vec::with_capacity(config.rows * config.columns);
        for (row, codes) in layout.iter().enumerate() {
            if codes.len() != config.columns {
                return Err(LayoutError::ColumnCount {
                    row,
                    expected: config.columns,
                    actual: codes.len(),
                });
            }

            for (column, &code) in codes.iter().enumerate() {
                let cell = CellCode::try_from(code)
                    .map_err(|code| LayoutError::UnknownCell { row, column, code })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            rows: config.rows,
            columns: config.columns,
            cells,
        })
    }

    /// Iterates `(column, row, code)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, CellCode)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, &code)| (index % self.columns, index / self.columns, code))
    }

    pub fn count(&self, code: CellCode) -> usize {
        self.cells.iter().filter(|&&cell| cell == code).count()
    }
}
