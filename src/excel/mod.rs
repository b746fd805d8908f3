//! Excel load/save for timesheet templates
//!
//! - Import: Excel (.xlsx) → `Workbook` with values and formulas
//! - Export: source .xlsx + `Workbook` → Excel (.xlsx), formatting kept and
//!   formulas written with cached results

mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::ExcelImporter;
