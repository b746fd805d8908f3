//! Input template selection and output naming
//!
//! Generated timesheets are named after the last day of their month. When
//! chaining, last month's generated file replaces the base template so the
//! leave balance accumulates run over run. No locking: two runs for the same
//! month race on the output file.

use super::dates::{last_day_of_month, previous_month, GENERATED_FILE_DATE_FORMAT};
use crate::config::RunConfig;
use crate::error::TimesheetResult;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the timesheet generated for a month, e.g. `timesheet-31-Jan-2023.xlsx`
pub fn output_file_name(year: i32, month: u32) -> TimesheetResult<String> {
    let month_end = last_day_of_month(year, month)?;
    Ok(format!(
        "timesheet-{}.xlsx",
        month_end.format(GENERATED_FILE_DATE_FORMAT)
    ))
}

/// Path the timesheet for a month is written to
pub fn output_path(output_dir: &Path, year: i32, month: u32) -> TimesheetResult<PathBuf> {
    Ok(output_dir.join(output_file_name(year, month)?))
}

/// Pick the document to open for this run
pub fn select_input(config: &RunConfig) -> TimesheetResult<PathBuf> {
    if config.chain {
        let (year, month) = previous_month(config.submission.year, config.submission.month);
        let previous = output_path(config.output_dir(), year, month)?;
        if previous.is_file() {
            info!(template = %previous.display(), "using previous month's timesheet");
            return Ok(previous);
        }
        debug!(
            candidate = %previous.display(),
            "no previous timesheet, falling back to base template"
        );
    }

    info!(template = %config.template.display(), "using base template");
    Ok(config.template.clone())
}
