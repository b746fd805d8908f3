use std::path::PathBuf;
use thiserror::Error;

pub type TimesheetResult<T> = Result<T, TimesheetError>;

#[derive(Error, Debug)]
pub enum TimesheetError {
    #[error("input template {} unreadable: {reason}", .path.display())]
    InputUnreadable { path: PathBuf, reason: String },

    #[error("input template {} is the output file; refusing to overwrite it", .path.display())]
    InputIsOutput { path: PathBuf },

    #[error("output dir {} unreadable: {reason}", .path.display())]
    OutputDirUnreadable { path: PathBuf, reason: String },

    #[error("current month col not found: no header labelled '{month}'")]
    ColumnNotFound { month: String },

    #[error("failed to evaluate formula in {cell}: {reason}")]
    FormulaEvaluationFailed { cell: String, reason: String },

    #[error("failed to create updated timesheet {}: {reason}", .path.display())]
    SaveFailed { path: PathBuf, reason: String },

    #[error("invalid cell reference: {0}")]
    InvalidCellRef(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("layout error: {0}")]
    Layout(String),
}
