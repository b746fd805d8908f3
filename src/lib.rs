//! Timesheet filler - monthly leave timesheets from an Excel template
//!
//! This library fills a fixed-layout timesheet template (.xlsx) with a
//! submitter's details for one month, carries the leave balance forward
//! through every month up to the target, and writes a dated copy.
//!
//! # Features
//!
//! - Month column lookup by header label (`Jan` … `Dec`, as text or as dates)
//! - Balance chain recalculation through the template's own formulas
//! - Chaining: last month's output becomes this month's input
//! - Layout overrides from YAML
//! - Output keeps the template's formatting (read-modify-write save)
//!
//! # Example
//!
//! ```no_run
//! use timesheet_filler::config::{RunConfig, Submission, TemplateLayout};
//! use timesheet_filler::core::TimesheetUpdater;
//! use std::path::PathBuf;
//!
//! let config = RunConfig {
//!     template: PathBuf::from("timesheet.xlsx"),
//!     sheet_index: 0,
//!     chain: true,
//!     layout: TemplateLayout::default(),
//!     submission: Submission::new("C. Gurure", "CG", "TD", 2023, 1, 0)?,
//! };
//!
//! let output = TimesheetUpdater::new(config).run()?;
//! println!("Wrote {}", output.display());
//! # Ok::<(), timesheet_filler::error::TimesheetError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use error::{TimesheetError, TimesheetResult};
pub use types::{Cell, CellRef, CellValue, Sheet, Workbook};
