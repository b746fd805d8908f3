use crate::error::{TimesheetError, TimesheetResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

//==============================================================================
// Cell addressing
//==============================================================================

static A1_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?([A-Z]+)\$?([0-9]+)$").expect("Failed to build A1 pattern"));

/// Convert a 0-based column index to its letter form (0→A, 25→Z, 26→AA)
pub fn column_index_to_letter(index: u16) -> String {
    let mut result = String::new();
    let mut idx = index as u32;

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

/// Convert a column letter (A, Z, AA, ...) to its 0-based index
pub fn column_letter_to_index(letters: &str) -> TimesheetResult<u16> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(TimesheetError::InvalidCellRef(format!(
            "'{}' is not a column letter",
            letters
        )));
    }

    let mut index: u32 = 0;
    for c in letters.bytes() {
        index = index * 26 + (c - b'A' + 1) as u32;
        if index > u16::MAX as u32 {
            return Err(TimesheetError::InvalidCellRef(format!(
                "column '{}' out of range",
                letters
            )));
        }
    }

    Ok((index - 1) as u16)
}

/// A single cell position on a sheet, 0-based internally
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Build a reference from a column letter and a 1-based row number
    pub fn from_column(column: &str, row: u32) -> TimesheetResult<Self> {
        if row == 0 {
            return Err(TimesheetError::InvalidCellRef(format!(
                "{}{}: rows start at 1",
                column, row
            )));
        }
        Ok(Self {
            row: row - 1,
            col: column_letter_to_index(column)?,
        })
    }

    /// Parse an A1-style address such as `D49` (absolute `$D$49` accepted)
    pub fn parse(address: &str) -> TimesheetResult<Self> {
        let caps = A1_REF
            .captures(address.trim())
            .ok_or_else(|| TimesheetError::InvalidCellRef(address.to_string()))?;

        let row = caps[2]
            .parse::<u32>()
            .map_err(|_| TimesheetError::InvalidCellRef(address.to_string()))?;

        Self::from_column(&caps[1], row)
    }

    /// Column letter of this reference
    pub fn column_letter(&self) -> String {
        column_index_to_letter(self.col)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letter(), self.row + 1)
    }
}

//==============================================================================
// Cell contents
//==============================================================================

/// Literal value held by a cell (or cached result of its formula)
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    /// Date-formatted number, as an Excel serial day count
    DateTime(f64),
    /// Spreadsheet error literal such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) | CellValue::DateTime(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// A cell: literal/cached value plus an optional formula (stored without `=`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub value: CellValue,
    pub formula: Option<String>,
}

impl Cell {
    pub fn literal(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            formula: None,
        }
    }

    pub fn with_formula(formula: impl Into<String>, cached: CellValue) -> Self {
        let formula = formula.into();
        Self {
            value: cached,
            formula: Some(formula.trim_start_matches('=').to_string()),
        }
    }
}

//==============================================================================
// Sheets and workbooks
//==============================================================================

/// Sparse grid of cells keyed by position.
///
/// Writes through `set_value`, `store_result` and `set_cell` are recorded so
/// a save only has to touch the cells a run changed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    cells: BTreeMap<CellRef, Cell>,
    changed: BTreeSet<CellRef>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            changed: BTreeSet::new(),
        }
    }

    pub fn cell(&self, at: CellRef) -> Option<&Cell> {
        self.cells.get(&at)
    }

    /// Current value (cached result for formula cells); Empty if unset
    pub fn value(&self, at: CellRef) -> CellValue {
        self.cells
            .get(&at)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    pub fn formula(&self, at: CellRef) -> Option<&str> {
        self.cells.get(&at).and_then(|c| c.formula.as_deref())
    }

    /// Write a literal value, discarding any formula in the cell
    pub fn set_value(&mut self, at: CellRef, value: impl Into<CellValue>) {
        self.set_cell(at, Cell::literal(value));
    }

    /// Store an evaluation result as the cell's cached value, keeping its formula
    pub fn store_result(&mut self, at: CellRef, value: CellValue) {
        self.cells.entry(at).or_default().value = value;
        self.changed.insert(at);
    }

    pub fn set_cell(&mut self, at: CellRef, cell: Cell) {
        self.cells.insert(at, cell);
        self.changed.insert(at);
    }

    /// Place a cell as read from a document; not recorded as a change
    pub fn load_cell(&mut self, at: CellRef, cell: Cell) {
        self.cells.insert(at, cell);
    }

    pub fn is_changed(&self, at: CellRef) -> bool {
        self.changed.contains(&at)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&CellRef, &Cell)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// In-memory spreadsheet document: ordered sheets
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Sheet> {
        self.sheets.get_mut(index)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}
