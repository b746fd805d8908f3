//! Excel importer implementation - Excel (.xlsx) → in-memory workbook

use crate::error::{TimesheetError, TimesheetResult};
use crate::types::{Cell, CellRef, CellValue, Sheet, Workbook};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads every sheet of an .xlsx file, keeping values and formulas
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn unreadable(&self, reason: impl ToString) -> TimesheetError {
        TimesheetError::InputUnreadable {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    /// Import the Excel file
    pub fn import(&self) -> TimesheetResult<Workbook> {
        fs::metadata(&self.path).map_err(|e| self.unreadable(e))?;

        let mut excel: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| self.unreadable(format!("failed to open Excel file: {}", e)))?;

        let mut workbook = Workbook::new();
        for sheet_name in excel.sheet_names() {
            let values = excel
                .worksheet_range(&sheet_name)
                .map_err(|e| self.unreadable(format!("sheet '{}': {}", sheet_name, e)))?;
            // Formula parts are optional; a sheet without them is plain data
            let formulas = excel.worksheet_formula(&sheet_name).ok();

            let sheet = Self::build_sheet(&sheet_name, &values, formulas.as_ref());
            debug!(sheet = %sheet_name, cells = sheet.len(), "imported sheet");
            workbook.add_sheet(sheet);
        }

        Ok(workbook)
    }

    /// Merge the value and formula ranges of one worksheet
    fn build_sheet(name: &str, values: &Range<Data>, formulas: Option<&Range<String>>) -> Sheet {
        let mut sheet = Sheet::new(name);

        if let Some((row0, col0)) = values.start() {
            for (row, col, data) in values.used_cells() {
                let at = CellRef::new(row0 + row as u32, (col0 + col as u32) as u16);
                sheet.load_cell(at, Cell::literal(Self::convert_data(data)));
            }
        }

        if let Some(formulas) = formulas {
            if let Some((row0, col0)) = formulas.start() {
                for (row, col, formula) in formulas.used_cells() {
                    if formula.is_empty() {
                        continue;
                    }
                    let at = CellRef::new(row0 + row as u32, (col0 + col as u32) as u16);
                    let cached = sheet.value(at);
                    sheet.load_cell(at, Cell::with_formula(formula.as_str(), cached));
                }
            }
        }

        sheet
    }

    fn convert_data(data: &Data) -> CellValue {
        match data {
            Data::Empty => CellValue::Empty,
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) if dt.is_duration() => CellValue::Number(dt.as_f64()),
            Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Error(e.to_string()),
        }
    }
}
