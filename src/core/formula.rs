//! Formula evaluation seam
//!
//! The carry-forward step only needs "evaluate the formula stored at this
//! cell". `FormulaEvaluator` is that capability; `XlFormulaEvaluator` backs it
//! with xlformula_engine, resolving cell references against the sheet and
//! recursing into referenced formula cells.

use crate::error::{TimesheetError, TimesheetResult};
use crate::types::{CellRef, CellValue, Sheet};
use xlformula_engine::{calculate, parse_formula, types, NoCustomFunction};

/// Evaluates the formula held in a cell
pub trait FormulaEvaluator {
    /// Compute the value of the cell at `at`.
    ///
    /// A cell without a formula evaluates to its current value.
    fn evaluate(&self, sheet: &Sheet, at: CellRef) -> TimesheetResult<CellValue>;
}

/// Default nesting limit when following references into formula cells
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// xlformula_engine-backed evaluator
#[derive(Debug, Clone)]
pub struct XlFormulaEvaluator {
    max_depth: usize,
}

impl Default for XlFormulaEvaluator {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl XlFormulaEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn eval_formula(&self, sheet: &Sheet, formula: &str, depth: usize) -> types::Value {
        if depth > self.max_depth {
            return types::Value::Error(types::Error::Value);
        }

        let formula_str = format!("={}", formula.trim().trim_start_matches('='));
        let resolver = |reference: String| -> types::Value {
            self.resolve_reference(sheet, &reference, depth + 1)
        };

        let parsed = parse_formula::parse_string_to_formula(&formula_str, None::<NoCustomFunction>);
        calculate::calculate_formula(parsed, Some(&resolver))
    }

    /// Resolve `D49`, `$D$49` or a `D40:D45` range to engine values
    fn resolve_reference(&self, sheet: &Sheet, reference: &str, depth: usize) -> types::Value {
        let reference = reference.replace('$', "");

        if let Some((from, to)) = reference.split_once(':') {
            let (Ok(from), Ok(to)) = (CellRef::parse(from), CellRef::parse(to)) else {
                return types::Value::Error(types::Error::Value);
            };
            let mut values = Vec::new();
            for row in from.row.min(to.row)..=from.row.max(to.row) {
                for col in from.col.min(to.col)..=from.col.max(to.col) {
                    values.push(self.cell_value(sheet, CellRef::new(row, col), depth));
                }
            }
            return types::Value::Iterator(values);
        }

        match CellRef::parse(&reference) {
            Ok(at) => self.cell_value(sheet, at, depth),
            Err(_) => types::Value::Error(types::Error::Value),
        }
    }

    fn cell_value(&self, sheet: &Sheet, at: CellRef, depth: usize) -> types::Value {
        if let Some(formula) = sheet.formula(at) {
            return self.eval_formula(sheet, formula, depth);
        }

        match sheet.value(at) {
            // Blank cells count as zero in the balance arithmetic
            CellValue::Empty => types::Value::Number(0.0),
            CellValue::Number(n) | CellValue::DateTime(n) => types::Value::Number(n as f32),
            CellValue::Text(s) => match s.trim().parse::<f32>() {
                Ok(n) => types::Value::Number(n),
                Err(_) => types::Value::Text(s),
            },
            CellValue::Bool(true) => types::Value::Boolean(types::Boolean::True),
            CellValue::Bool(false) => types::Value::Boolean(types::Boolean::False),
            CellValue::Error(_) => types::Value::Error(types::Error::Value),
        }
    }
}

/// Widen an engine result through its shortest decimal form, so `20.3f32`
/// becomes `20.3` rather than `20.299999237060547`
fn widen_result(n: f32) -> f64 {
    n.to_string().parse::<f64>().unwrap_or(n as f64)
}

impl FormulaEvaluator for XlFormulaEvaluator {
    fn evaluate(&self, sheet: &Sheet, at: CellRef) -> TimesheetResult<CellValue> {
        let Some(formula) = sheet.formula(at) else {
            return Ok(sheet.value(at));
        };

        let failed = |reason: String| TimesheetError::FormulaEvaluationFailed {
            cell: at.to_string(),
            reason,
        };

        match self.eval_formula(sheet, formula, 0) {
            types::Value::Number(n) => Ok(CellValue::Number(widen_result(n))),
            types::Value::Text(s) => Ok(CellValue::Text(s)),
            types::Value::Boolean(b) => Ok(CellValue::Bool(matches!(b, types::Boolean::True))),
            types::Value::Blank => Ok(CellValue::Empty),
            types::Value::Error(e) => Err(failed(format!("formula '={}' returned error: {:?}", formula, e))),
            other => Err(failed(format!(
                "formula '={}' returned unexpected type: {:?}",
                formula, other
            ))),
        }
    }
}
