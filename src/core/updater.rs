//! TimesheetUpdater - one run from template to dated output
//!
//! Stages: locate input template → open document → resolve month column
//! (carrying balances forward on the way) → write fields → evaluate and
//! persist the balance formulas → save. Save is last, so a failure in any
//! earlier stage leaves nothing on disk.

use super::carry_forward::CarryForwardUpdater;
use super::dates::month_label;
use super::field_writer::FieldWriter;
use super::formula::{FormulaEvaluator, XlFormulaEvaluator};
use super::resolver::ColumnResolver;
use super::template;
use crate::config::RunConfig;
use crate::error::{TimesheetError, TimesheetResult};
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::types::Sheet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stage of a run, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LocateInputTemplate,
    OpenDocument,
    ResolveColumn,
    WriteFields,
    EvaluateFormulas,
    SaveOutput,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStage::LocateInputTemplate => "locate-input-template",
            RunStage::OpenDocument => "open-document",
            RunStage::ResolveColumn => "resolve-column",
            RunStage::WriteFields => "write-fields",
            RunStage::EvaluateFormulas => "evaluate-formulas",
            RunStage::SaveOutput => "save-output",
        };
        f.write_str(name)
    }
}

/// Both paths name the same existing file
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn stage<T>(stage: RunStage, result: TimesheetResult<T>) -> TimesheetResult<T> {
    match &result {
        Ok(_) => debug!(%stage, "stage done"),
        Err(e) => debug!(%stage, error = %e, "run failed"),
    }
    result
}

pub struct TimesheetUpdater<E: FormulaEvaluator = XlFormulaEvaluator> {
    config: RunConfig,
    evaluator: E,
}

impl TimesheetUpdater<XlFormulaEvaluator> {
    pub fn new(config: RunConfig) -> Self {
        Self::with_evaluator(config, XlFormulaEvaluator::new())
    }
}

impl<E: FormulaEvaluator> TimesheetUpdater<E> {
    pub fn with_evaluator(config: RunConfig, evaluator: E) -> Self {
        Self { config, evaluator }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run once and return the path of the generated timesheet
    pub fn run(&self) -> TimesheetResult<PathBuf> {
        let config = &self.config;
        let output_dir = config.output_dir();

        let dir_ok = fs::metadata(output_dir).map_err(|e| e.to_string()).and_then(|meta| {
            if meta.is_dir() {
                Ok(())
            } else {
                Err("not a directory".to_string())
            }
        });
        if let Err(reason) = dir_ok {
            return Err(TimesheetError::OutputDirUnreadable {
                path: output_dir.to_path_buf(),
                reason,
            });
        }

        let input = stage(RunStage::LocateInputTemplate, template::select_input(config))?;
        let output = template::output_path(output_dir, config.submission.year, config.submission.month)?;
        if same_file(&input, &output) {
            return stage(
                RunStage::LocateInputTemplate,
                Err(TimesheetError::InputIsOutput { path: input }),
            );
        }

        let mut workbook = stage(RunStage::OpenDocument, ExcelImporter::new(&input).import())?;

        let sheet_count = workbook.sheets.len();
        let sheet = workbook.sheet_mut(config.sheet_index).ok_or_else(|| {
            TimesheetError::InputUnreadable {
                path: input.clone(),
                reason: format!(
                    "sheet index {} out of range ({} sheets)",
                    config.sheet_index, sheet_count
                ),
            }
        })?;
        debug!(sheet = %sheet.name, "selected sheet");

        let column = self.update_sheet(sheet)?;

        stage(
            RunStage::SaveOutput,
            ExcelExporter::new(&workbook).export(&input, &output),
        )?;

        info!(column = %column, output = %output.display(), "timesheet written");
        Ok(output)
    }

    /// Apply the submission to one sheet in memory; returns the resolved column
    pub fn update_sheet(&self, sheet: &mut Sheet) -> TimesheetResult<String> {
        let layout = &self.config.layout;
        let submission = &self.config.submission;

        let carry_forward = CarryForwardUpdater::new(layout, &self.evaluator);
        let resolver = ColumnResolver::new(layout, &carry_forward);
        let writer = FieldWriter::new(layout);

        let label = month_label(submission.year, submission.month)?;
        let column = stage(RunStage::ResolveColumn, resolver.resolve(sheet, &label))?;

        stage(RunStage::WriteFields, {
            writer
                .write_submitter(sheet, submission)
                .and_then(|_| writer.write_column(sheet, &column, submission))
        })?;

        stage(
            RunStage::EvaluateFormulas,
            carry_forward.apply(sheet, &column, submission.leave()),
        )?;

        Ok(column)
    }
}
