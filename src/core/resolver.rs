//! Month column resolution
//!
//! Walks the month columns left to right looking for the target month's
//! header label. Every column visited on the way, the match included, gets
//! its balance chain carried forward so earlier months stay consistent with
//! whatever the template already holds.
//!
//! A header is either text or a date shown as its month (`mmm`); dates are
//! compared through their 3-letter month name.

use super::carry_forward::CarryForwardUpdater;
use super::dates::{from_excel_serial, MONTH_FORMAT};
use crate::config::TemplateLayout;
use crate::error::{TimesheetError, TimesheetResult};
use crate::types::{CellRef, CellValue, Sheet};
use tracing::debug;

/// Text a header cell shows for matching purposes
fn header_text(label: &CellValue) -> Option<String> {
    match label {
        CellValue::Text(s) => Some(s.clone()),
        CellValue::DateTime(serial) => {
            from_excel_serial(*serial).map(|date| date.format(MONTH_FORMAT).to_string())
        }
        _ => None,
    }
}

pub struct ColumnResolver<'a> {
    layout: &'a TemplateLayout,
    carry_forward: &'a CarryForwardUpdater<'a>,
}

impl<'a> ColumnResolver<'a> {
    pub fn new(layout: &'a TemplateLayout, carry_forward: &'a CarryForwardUpdater<'a>) -> Self {
        Self {
            layout,
            carry_forward,
        }
    }

    /// Find the column whose header equals `month_label` exactly.
    ///
    /// Fails with `ColumnNotFound` once all month columns are exhausted;
    /// columns already visited keep their carry-forward updates.
    pub fn resolve(&self, sheet: &mut Sheet, month_label: &str) -> TimesheetResult<String> {
        for offset in 0..self.layout.months {
            let column = self.layout.month_col(offset)?;
            let label = sheet.value(CellRef::from_column(&column, self.layout.month_row)?);

            self.carry_forward.apply(sheet, &column, None)?;

            if header_text(&label).as_deref() == Some(month_label) {
                debug!(column = %column, month = month_label, "resolved month column");
                return Ok(column);
            }
        }

        Err(TimesheetError::ColumnNotFound {
            month: month_label.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formula::XlFormulaEvaluator;

    const LABELS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    fn labelled_sheet(layout: &TemplateLayout, labels: &[&str]) -> Sheet {
        let mut sheet = Sheet::new("Leave");
        for (offset, label) in labels.iter().enumerate() {
            let column = layout.month_col(offset as u16).unwrap();
            sheet.set_value(CellRef::from_column(&column, layout.month_row).unwrap(), *label);
        }
        sheet
    }

    #[test]
    fn test_resolves_every_month_to_its_offset() {
        let layout = TemplateLayout::default();
        let evaluator = XlFormulaEvaluator::new();
        let carry_forward = CarryForwardUpdater::new(&layout, &evaluator);
        let resolver = ColumnResolver::new(&layout, &carry_forward);

        for (i, label) in LABELS.iter().enumerate() {
            let mut sheet = labelled_sheet(&layout, &LABELS);
            let column = resolver.resolve(&mut sheet, label).unwrap();
            assert_eq!(column, layout.month_col(i as u16).unwrap());
        }
    }

    #[test]
    fn test_visits_columns_up_to_and_including_match() {
        let layout = TemplateLayout::default();
        let evaluator = XlFormulaEvaluator::new();
        let carry_forward = CarryForwardUpdater::new(&layout, &evaluator);
        let resolver = ColumnResolver::new(&layout, &carry_forward);

        let mut sheet = labelled_sheet(&layout, &LABELS);
        let column = resolver.resolve(&mut sheet, "Mar").unwrap();
        assert_eq!(column, "F");

        let earned = |col: &str| sheet.value(CellRef::from_column(col, layout.days_earned_row).unwrap());
        assert_eq!(earned("D"), CellValue::Number(2.5));
        assert_eq!(earned("E"), CellValue::Number(2.5));
        assert_eq!(earned("F"), CellValue::Number(2.5));
        assert_eq!(earned("G"), CellValue::Empty);
    }

    #[test]
    fn test_label_match_is_exact() {
        let layout = TemplateLayout::default();
        let evaluator = XlFormulaEvaluator::new();
        let carry_forward = CarryForwardUpdater::new(&layout, &evaluator);
        let resolver = ColumnResolver::new(&layout, &carry_forward);

        let mut sheet = labelled_sheet(&layout, &["jan", "January", " Jan"]);
        let result = resolver.resolve(&mut sheet, "Jan");
        assert!(matches!(
            result,
            Err(TimesheetError::ColumnNotFound { ref month }) if month == "Jan"
        ));
    }

    #[test]
    fn test_date_headers_match_by_month_name() {
        let layout = TemplateLayout::default();
        let evaluator = XlFormulaEvaluator::new();
        let carry_forward = CarryForwardUpdater::new(&layout, &evaluator);
        let resolver = ColumnResolver::new(&layout, &carry_forward);

        // 1 Jan .. 1 Apr 2023 as Excel serials
        let mut sheet = Sheet::new("Leave");
        for (offset, serial) in [44927.0, 44958.0, 44986.0, 45017.0].iter().enumerate() {
            let column = layout.month_col(offset as u16).unwrap();
            sheet.set_value(
                CellRef::from_column(&column, layout.month_row).unwrap(),
                CellValue::DateTime(*serial),
            );
        }

        assert_eq!(resolver.resolve(&mut sheet, "Mar").unwrap(), "F");
        assert_eq!(resolver.resolve(&mut sheet, "Apr").unwrap(), "G");
    }

    #[test]
    fn test_plain_number_header_does_not_match() {
        let layout = TemplateLayout::default();
        let evaluator = XlFormulaEvaluator::new();
        let carry_forward = CarryForwardUpdater::new(&layout, &evaluator);
        let resolver = ColumnResolver::new(&layout, &carry_forward);

        let mut sheet = Sheet::new("Leave");
        sheet.set_value(CellRef::from_column("D", layout.month_row).unwrap(), 44927.0);
        assert!(resolver.resolve(&mut sheet, "Jan").is_err());
    }

    #[test]
    fn test_truncated_header_not_found_after_full_scan() {
        let layout = TemplateLayout::default();
        let evaluator = XlFormulaEvaluator::new();
        let carry_forward = CarryForwardUpdater::new(&layout, &evaluator);
        let resolver = ColumnResolver::new(&layout, &carry_forward);

        let mut sheet = labelled_sheet(&layout, &LABELS[..6]);
        assert!(resolver.resolve(&mut sheet, "Dec").is_err());

        let last = layout.month_col(11).unwrap();
        assert_eq!(
            sheet.value(CellRef::from_column(&last, layout.days_earned_row).unwrap()),
            CellValue::Number(2.5)
        );
    }
}
