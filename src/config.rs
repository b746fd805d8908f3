//! Template layout and per-run configuration
//!
//! `TemplateLayout` pins every cell the tool touches. The defaults match the
//! standard leave timesheet; a YAML file can override any subset of keys.

use crate::error::{TimesheetError, TimesheetResult};
use crate::types::{column_index_to_letter, column_letter_to_index, CellRef};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed cell addresses and constants of the timesheet template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateLayout {
    pub submitter_name_cell: String,
    pub submission_date_cell: String,
    /// Column letter of the first month column
    pub month_begin_col: String,
    pub months: u16,
    pub month_row: u32,
    pub initials_row: u32,
    pub supervisor_initials_row: u32,
    pub day_of_month_row: u32,
    pub starting_balance_row: u32,
    pub days_earned_row: u32,
    pub leave_days_row: u32,
    pub new_balance_row: u32,
    /// Days of leave earned per month
    pub days_earned: f64,
    pub output_dir: PathBuf,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            submitter_name_cell: "A44".to_string(),
            submission_date_cell: "A45".to_string(),
            month_begin_col: "D".to_string(),
            months: 12,
            month_row: 7,
            initials_row: 42,
            supervisor_initials_row: 43,
            day_of_month_row: 44,
            starting_balance_row: 46,
            days_earned_row: 47,
            leave_days_row: 48,
            new_balance_row: 49,
            days_earned: 2.5,
            output_dir: PathBuf::from("gen"),
        }
    }
}

impl TemplateLayout {
    /// Load a layout override from YAML; missing keys keep their defaults
    pub fn from_yaml_file(path: &Path) -> TimesheetResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TimesheetError::Layout(format!("cannot read {}: {}", path.display(), e))
        })?;
        let layout: TemplateLayout = serde_yaml::from_str(&content).map_err(|e| {
            TimesheetError::Layout(format!("cannot parse {}: {}", path.display(), e))
        })?;
        layout.validate()?;
        Ok(layout)
    }

    /// Check every address in the layout resolves to a real cell
    pub fn validate(&self) -> TimesheetResult<()> {
        if self.months == 0 {
            return Err(TimesheetError::Layout(
                "months must be at least 1".to_string(),
            ));
        }

        self.submitter_name_ref()?;
        self.submission_date_ref()?;
        let base = column_letter_to_index(&self.month_begin_col)
            .map_err(|e| TimesheetError::Layout(e.to_string()))?;
        if base as u32 + self.months as u32 > u16::MAX as u32 {
            return Err(TimesheetError::Layout(format!(
                "{} month columns from {} overflow the sheet",
                self.months, self.month_begin_col
            )));
        }

        for (name, row) in [
            ("month_row", self.month_row),
            ("initials_row", self.initials_row),
            ("supervisor_initials_row", self.supervisor_initials_row),
            ("day_of_month_row", self.day_of_month_row),
            ("starting_balance_row", self.starting_balance_row),
            ("days_earned_row", self.days_earned_row),
            ("leave_days_row", self.leave_days_row),
            ("new_balance_row", self.new_balance_row),
        ] {
            if row == 0 {
                return Err(TimesheetError::Layout(format!("{} must be >= 1", name)));
            }
        }

        Ok(())
    }

    pub fn submitter_name_ref(&self) -> TimesheetResult<CellRef> {
        CellRef::parse(&self.submitter_name_cell)
    }

    pub fn submission_date_ref(&self) -> TimesheetResult<CellRef> {
        CellRef::parse(&self.submission_date_cell)
    }

    /// Column letter of the month column at `offset` from the base column
    pub fn month_col(&self, offset: u16) -> TimesheetResult<String> {
        let base = column_letter_to_index(&self.month_begin_col)?;
        let index = base.checked_add(offset).ok_or_else(|| {
            TimesheetError::InvalidCellRef(format!(
                "{} + {} overflows the column range",
                self.month_begin_col, offset
            ))
        })?;
        Ok(column_index_to_letter(index))
    }
}

/// Submission record for one run; never persisted on its own
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub submitter: String,
    pub initials: String,
    pub supervisor_initials: String,
    /// 1-based month number
    pub month: u32,
    pub year: i32,
    pub leave_days: u32,
    /// Process clock, moved into the target year/month
    pub today: NaiveDate,
}

impl Submission {
    /// Build a submission using the local clock for `today`
    pub fn new(
        submitter: impl Into<String>,
        initials: impl Into<String>,
        supervisor_initials: impl Into<String>,
        year: i32,
        month: u32,
        leave_days: u32,
    ) -> TimesheetResult<Self> {
        let now = Local::now().date_naive();
        Self::at(submitter, initials, supervisor_initials, year, month, leave_days, now)
    }

    /// Build a submission with `now` standing in for the process clock
    pub fn at(
        submitter: impl Into<String>,
        initials: impl Into<String>,
        supervisor_initials: impl Into<String>,
        year: i32,
        month: u32,
        leave_days: u32,
        now: NaiveDate,
    ) -> TimesheetResult<Self> {
        let today = crate::core::dates::today_in(year, month, now)?;
        Ok(Self {
            submitter: submitter.into(),
            initials: initials.into(),
            supervisor_initials: supervisor_initials.into(),
            month,
            year,
            leave_days,
            today,
        })
    }

    /// Date written on the sheet: the last day of `today`'s month
    pub fn submission_date(&self) -> TimesheetResult<NaiveDate> {
        crate::core::dates::last_day_of_month(self.today.year(), self.today.month())
    }

    /// Leave days to write, if any
    pub fn leave(&self) -> Option<u32> {
        (self.leave_days > 0).then_some(self.leave_days)
    }
}

/// Everything a run needs, passed explicitly to each step
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base template, used when no chained output exists
    pub template: PathBuf,
    pub sheet_index: usize,
    /// Use last month's generated output as input when present
    pub chain: bool,
    pub layout: TemplateLayout,
    pub submission: Submission,
}

impl RunConfig {
    pub fn output_dir(&self) -> &Path {
        &self.layout.output_dir
    }
}
