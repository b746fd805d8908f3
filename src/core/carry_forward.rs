//! Carry-forward of the monthly leave balance
//!
//! Each month column holds a small ledger: starting balance (a formula over
//! the previous month's new balance), days earned, leave taken and the new
//! balance. Updating a column means resetting the earned days, then
//! re-evaluating the two balance formulas and caching their results.

use super::formula::FormulaEvaluator;
use crate::config::TemplateLayout;
use crate::error::TimesheetResult;
use crate::types::{CellRef, Sheet};
use tracing::debug;

pub struct CarryForwardUpdater<'a> {
    layout: &'a TemplateLayout,
    evaluator: &'a dyn FormulaEvaluator,
}

impl<'a> CarryForwardUpdater<'a> {
    pub fn new(layout: &'a TemplateLayout, evaluator: &'a dyn FormulaEvaluator) -> Self {
        Self { layout, evaluator }
    }

    /// Update the balance chain of one month column.
    ///
    /// `leave` is only passed for the column being filled in; a scan over
    /// earlier months passes `None` and leaves their leave field alone.
    pub fn apply(&self, sheet: &mut Sheet, column: &str, leave: Option<u32>) -> TimesheetResult<()> {
        let layout = self.layout;

        let days_earned = CellRef::from_column(column, layout.days_earned_row)?;
        sheet.set_value(days_earned, layout.days_earned);

        let starting_balance = CellRef::from_column(column, layout.starting_balance_row)?;
        self.recompute(sheet, starting_balance)?;

        if let Some(days) = leave.filter(|&d| d > 0) {
            let leave_days = CellRef::from_column(column, layout.leave_days_row)?;
            sheet.set_value(leave_days, days as f64);
        }

        let new_balance = CellRef::from_column(column, layout.new_balance_row)?;
        self.recompute(sheet, new_balance)?;

        debug!(
            column,
            starting = %sheet.value(starting_balance),
            new_balance = %sheet.value(new_balance),
            "carried balance forward"
        );
        Ok(())
    }

    /// Evaluate the cell and snapshot the result into it
    fn recompute(&self, sheet: &mut Sheet, at: CellRef) -> TimesheetResult<()> {
        let value = self.evaluator.evaluate(sheet, at)?;
        sheet.store_result(at, value);
        Ok(())
    }
}
