use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cell::Cell;

static EMPTY: Cell = Cell::Empty;

/// A named grid of cells addressed 1-based, the way spreadsheet users count.
///
/// Reads outside the populated area return [`Cell::Empty`]; writes grow the grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    #[serde(default)]
    rows: Vec<Vec<Cell>>,
    /// Background fills keyed by A1 reference.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    fills: BTreeMap<String, String>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            fills: BTreeMap::new(),
        }
    }

    pub fn get(&self, row: u32, column: u32) -> &Cell {
        if row == 0 || column == 0 {
            return &EMPTY;
        }
        self.rows
            .get(row as usize - 1)
            .and_then(|cells| cells.get(column as usize - 1))
            .unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, row: u32, column: u32, value: Cell) {
        debug_assert!(row > 0 && column > 0, "cells are addressed from 1");
        if row == 0 || column == 0 {
            return;
        }
        let (r, c) = (row as usize - 1, column as usize - 1);
        if self.rows.len() <= r {
            self.rows.resize_with(r + 1, Vec::new);
        }
        let cells = &mut self.rows[r];
        if cells.len() <= c {
            cells.resize_with(c + 1, Cell::default);
        }
        cells[c] = value;
    }

    /// Last populated row number, zero for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn max_column(&self) -> u32 {
        self.rows.iter().map(Vec::len).max().unwrap_or(0) as u32
    }

    pub fn fill(&self, row: u32, column: u32) -> Option<&str> {
        self.fills.get(&cell_ref(row, column)).map(String::as_str)
    }

    /// Sets or clears (`None`) the background fill of a cell.
    pub fn set_fill(&mut self, row: u32, column: u32, color: Option<&str>) {
        let key = cell_ref(row, column);
        match color {
            Some(color) => {
                self.fills.insert(key, color.to_string());
            }
            None => {
                self.fills.remove(&key);
            }
        }
    }

    pub fn fills(&self) -> &BTreeMap<String, String> {
        &self.fills
    }
}

/// Spreadsheet column letters for a 1-based column number (`1 -> A`, `27 -> AA`).
pub fn column_letters(column: u32) -> String {
    let mut remaining = column;
    let mut letters = Vec::new();
    while remaining > 0 {
        let rem = (remaining - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        remaining = (remaining - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// A1-style reference such as `N5`.
pub fn cell_ref(row: u32, column: u32) -> String {
    format!("{}{}", column_letters(column), row)
}
