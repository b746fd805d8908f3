//! Timesheet update engine: month column resolution, balance carry-forward
//! and field writing

pub mod carry_forward;
pub mod dates;
pub mod field_writer;
pub mod formula;
pub mod resolver;
pub mod template;
pub mod updater;

pub use carry_forward::CarryForwardUpdater;
pub use field_writer::FieldWriter;
pub use formula::{FormulaEvaluator, XlFormulaEvaluator};
pub use resolver::ColumnResolver;
pub use updater::{RunStage, TimesheetUpdater};
