//! Excel exporter implementation - in-memory workbook → Excel (.xlsx)
//!
//! The output is the source document re-saved with the workbook's cells
//! patched in, so styles, number formats, merged ranges, column widths and
//! print setup of the template carry over untouched.

use crate::error::{TimesheetError, TimesheetResult};
use crate::types::{Cell, CellRef, CellValue, Sheet, Workbook};
use std::path::Path;
use tracing::debug;
use umya_spreadsheet::{reader, writer, Worksheet};

/// Writes a workbook over a copy of the document it was imported from.
///
/// Cells changed in memory are written back, and every formula cell is
/// rewritten with its cached result so readers that do not recalculate
/// still see the computed balances.
pub struct ExcelExporter<'a> {
    workbook: &'a Workbook,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self { workbook }
    }

    /// Save `source` with this workbook's cells applied as `output_path`
    pub fn export(&self, source: &Path, output_path: &Path) -> TimesheetResult<()> {
        let failed = |reason: String| TimesheetError::SaveFailed {
            path: output_path.to_path_buf(),
            reason,
        };

        let mut book = reader::xlsx::read(source)
            .map_err(|e| failed(format!("failed to reopen {}: {}", source.display(), e)))?;

        let mut written = 0;
        for sheet in &self.workbook.sheets {
            let worksheet = book
                .get_sheet_by_name_mut(&sheet.name)
                .ok_or_else(|| failed(format!("sheet '{}' missing from {}", sheet.name, source.display())))?;
            written += Self::export_sheet(worksheet, sheet);
        }

        writer::xlsx::write(&book, output_path)
            .map_err(|e| failed(format!("failed to save Excel file: {}", e)))?;

        debug!(path = %output_path.display(), cells = written, "saved workbook");
        Ok(())
    }

    fn export_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> usize {
        let mut written = 0;
        for (at, cell) in sheet.cells() {
            if cell.formula.is_some() || sheet.is_changed(*at) {
                Self::write_cell(worksheet, *at, cell);
                written += 1;
            }
        }
        written
    }

    fn write_cell(worksheet: &mut Worksheet, at: CellRef, cell: &Cell) {
        // umya coordinates are (column, row), both 1-based
        let target = worksheet.get_cell_mut((at.col as u32 + 1, at.row + 1));

        match &cell.value {
            CellValue::Empty => {
                target.set_value("");
            }
            CellValue::Number(n) | CellValue::DateTime(n) => {
                target.set_value_number(*n);
            }
            CellValue::Text(s) | CellValue::Error(s) => {
                target.set_value_string(s.as_str());
            }
            CellValue::Bool(b) => {
                target.set_value_bool(*b);
            }
        }

        // Set after the value: literal setters drop any formula on the cell
        if let Some(formula) = &cell.formula {
            target.set_formula(formula.as_str());
        }
    }
}
