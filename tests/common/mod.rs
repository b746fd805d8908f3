//! Shared fixtures: builds a leave timesheet template with rust_xlsxwriter

#![allow(dead_code)]

use rust_xlsxwriter::{ExcelDateTime, Format, Formula, Workbook, Worksheet};
use std::path::{Path, PathBuf};

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Column index of D, the first month column
pub const FIRST_MONTH_COL: u16 = 3;

pub fn col_letter(col: u16) -> String {
    timesheet_filler::types::column_index_to_letter(col)
}

/// Write a template: month labels in row 7 from column D, opening balance
/// 10 in C49, and per month `start = prev new balance`,
/// `new = start + earned - leave` (rows 46..49)
pub fn write_template(path: &Path, labels: &[&str]) -> PathBuf {
    write_template_with(path, labels, |_| None)
}

/// Like `write_template`, but `override_start(col)` may replace the
/// starting-balance formula of a column
pub fn write_template_with(
    path: &Path,
    labels: &[&str],
    override_start: impl Fn(u16) -> Option<&'static str>,
) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Leave").unwrap();

    sheet.write_string(43, 0, "Name:").unwrap();
    sheet.write_string(44, 0, "Date:").unwrap();
    sheet.write_number(48, FIRST_MONTH_COL - 1, 10.0).unwrap();

    for (offset, label) in labels.iter().enumerate() {
        let col = FIRST_MONTH_COL + offset as u16;
        let letter = col_letter(col);
        let prev = col_letter(col - 1);

        sheet.write_string(6, col, *label).unwrap();
        let start = override_start(col)
            .map(str::to_string)
            .unwrap_or_else(|| format!("={}49", prev));
        sheet.write_formula(45, col, Formula::new(start)).unwrap();
        sheet
            .write_formula(
                48,
                col,
                Formula::new(format!("={l}46+{l}47-{l}48", l = letter)),
            )
            .unwrap();
    }

    workbook.save(path).unwrap();
    path.to_path_buf()
}

/// Write a workbook with two sheets; the template lives on the second
pub fn write_two_sheet_template(path: &Path) -> PathBuf {
    let mut workbook = Workbook::new();
    let cover = workbook.add_worksheet();
    cover.set_name("Cover").unwrap();
    cover.write_string(0, 0, "Leave record").unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Leave").unwrap();
    sheet.write_number(48, FIRST_MONTH_COL - 1, 0.0).unwrap();
    for (offset, label) in MONTHS.iter().enumerate() {
        let col = FIRST_MONTH_COL + offset as u16;
        let letter = col_letter(col);
        sheet.write_string(6, col, *label).unwrap();
        sheet
            .write_formula(45, col, Formula::new(format!("={}49", col_letter(col - 1))))
            .unwrap();
        sheet
            .write_formula(
                48,
                col,
                Formula::new(format!("={l}46+{l}47-{l}48", l = letter)),
            )
            .unwrap();
    }

    workbook.save(path).unwrap();
    path.to_path_buf()
}

/// Start/new balance formulas for one month column
fn write_balance_chain(sheet: &mut Worksheet, col: u16) {
    let letter = col_letter(col);
    sheet
        .write_formula(45, col, Formula::new(format!("={}49", col_letter(col - 1))))
        .unwrap();
    sheet
        .write_formula(
            48,
            col,
            Formula::new(format!("={l}46+{l}47-{l}48", l = letter)),
        )
        .unwrap();
}

/// Standard twelve-month template with a custom opening balance in C49
pub fn write_template_with_opening(path: &Path, opening: f64) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Leave").unwrap();
    sheet.write_number(48, FIRST_MONTH_COL - 1, opening).unwrap();
    for (offset, label) in MONTHS.iter().enumerate() {
        let col = FIRST_MONTH_COL + offset as u16;
        sheet.write_string(6, col, *label).unwrap();
        write_balance_chain(sheet, col);
    }

    workbook.save(path).unwrap();
    path.to_path_buf()
}

/// Headers are the 1st of each month of `year` as dates formatted `mmm`
pub fn write_date_header_template(path: &Path, year: u16) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Leave").unwrap();
    let month_format = Format::new().set_num_format("mmm");

    sheet.write_number(48, FIRST_MONTH_COL - 1, 10.0).unwrap();
    for month in 1..=12u8 {
        let col = FIRST_MONTH_COL + month as u16 - 1;
        let first = ExcelDateTime::from_ymd(year, month, 1).unwrap();
        sheet
            .write_datetime_with_format(6, col, &first, &month_format)
            .unwrap();
        write_balance_chain(sheet, col);
    }

    workbook.save(path).unwrap();
    path.to_path_buf()
}

/// Standard template dressed up: a merged bold title over A1:C1, a wide
/// column A, and balances formatted `0.00`
pub fn write_styled_template(path: &Path) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Leave").unwrap();
    let balance_format = Format::new().set_num_format("0.00");

    sheet
        .merge_range(0, 0, 0, 2, "Leave Record", &Format::new().set_bold())
        .unwrap();
    sheet.set_column_width(0, 30).unwrap();
    sheet.write_string(43, 0, "Name:").unwrap();
    sheet.write_string(44, 0, "Date:").unwrap();
    sheet.write_number(48, FIRST_MONTH_COL - 1, 10.0).unwrap();
    for (offset, label) in MONTHS.iter().enumerate() {
        let col = FIRST_MONTH_COL + offset as u16;
        let letter = col_letter(col);
        sheet.write_string(6, col, *label).unwrap();
        sheet
            .write_formula_with_format(
                45,
                col,
                Formula::new(format!("={}49", col_letter(col - 1))),
                &balance_format,
            )
            .unwrap();
        sheet
            .write_formula_with_format(
                48,
                col,
                Formula::new(format!("={l}46+{l}47-{l}48", l = letter)),
                &balance_format,
            )
            .unwrap();
    }

    workbook.save(path).unwrap();
    path.to_path_buf()
}
