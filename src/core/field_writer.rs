use super::dates::{DATE_FORMAT, DAY_OF_MONTH_FORMAT};
use crate::config::{Submission, TemplateLayout};
use crate::error::TimesheetResult;
use crate::types::{CellRef, Sheet};

/// Writes the submitter's identity and sign-off fields
pub struct FieldWriter<'a> {
    layout: &'a TemplateLayout,
}

impl<'a> FieldWriter<'a> {
    pub fn new(layout: &'a TemplateLayout) -> Self {
        Self { layout }
    }

    /// Name and submission date cells, shared by all months
    pub fn write_submitter(&self, sheet: &mut Sheet, submission: &Submission) -> TimesheetResult<()> {
        let submitted_on = submission.submission_date()?;

        sheet.set_value(
            self.layout.submitter_name_ref()?,
            format!("Name: {}", submission.submitter),
        );
        sheet.set_value(
            self.layout.submission_date_ref()?,
            format!("Date: {}", submitted_on.format(DATE_FORMAT)),
        );
        Ok(())
    }

    /// Initials, supervisor initials and month-end day for the resolved column
    pub fn write_column(
        &self,
        sheet: &mut Sheet,
        column: &str,
        submission: &Submission,
    ) -> TimesheetResult<()> {
        let layout = self.layout;
        let month_end = submission.submission_date()?;

        sheet.set_value(
            CellRef::from_column(column, layout.initials_row)?,
            submission.initials.as_str(),
        );
        sheet.set_value(
            CellRef::from_column(column, layout.supervisor_initials_row)?,
            submission.supervisor_initials.as_str(),
        );
        sheet.set_value(
            CellRef::from_column(column, layout.day_of_month_row)?,
            month_end.format(DAY_OF_MONTH_FORMAT).to_string(),
        );
        Ok(())
    }
}
