use chrono::{Datelike, Local};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use timesheet_filler::cli::{self, FillOptions};

fn current_month() -> u32 {
    Local::now().month()
}

fn current_year() -> i32 {
    Local::now().year()
}

#[derive(Parser)]
#[command(name = "timesheet")]
#[command(about = "Fill in the monthly leave timesheet and write a dated copy")]
#[command(long_about = "Timesheet - fills the monthly leave timesheet template

Finds the target month's column by its header label (Jan..Dec), carries the
leave balance forward through every month up to it, writes the submitter's
name, initials and leave days, and saves the result as
<output-dir>/timesheet-<DD-Mon-YYYY>.xlsx (last day of the month).

CHAINING:
  If last month's generated timesheet exists in the output directory it is
  used as the input instead of --file, so balances accumulate run over run.
  Use --no-chain to always start from --file.

EXAMPLES:
  timesheet --month 1 --year 2023            # gen/timesheet-31-Jan-2023.xlsx
  timesheet --name \"A. Person\" --initials AP --leave 2
  timesheet --layout layout.yaml -o out/")]
#[command(version)]
struct Cli {
    /// Timesheet template file
    #[arg(short, long = "file", visible_alias = "template", default_value = "timesheet.xlsx", env = "TIMESHEET_TEMPLATE")]
    file: PathBuf,

    /// Submitter name
    #[arg(long, default_value = "C. Gurure", env = "TIMESHEET_NAME")]
    name: String,

    /// Submitter initials
    #[arg(long, default_value = "CG", env = "TIMESHEET_INITIALS")]
    initials: String,

    /// Supervisor initials
    #[arg(long, default_value = "TD", env = "TIMESHEET_SINITIALS")]
    sinitials: String,

    /// 0-based sheet index
    #[arg(long, default_value_t = 0)]
    sheet: usize,

    /// 1-based month number
    #[arg(long, default_value_t = current_month(), value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,

    /// Year
    #[arg(long, default_value_t = current_year())]
    year: i32,

    /// Leave days taken this month
    #[arg(long, default_value_t = 0)]
    leave: u32,

    /// Directory generated timesheets are written to (default: gen)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// YAML file overriding the template cell layout
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Always start from --file, ignoring last month's output
    #[arg(long)]
    no_chain: bool,

    /// Show debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    let options = FillOptions {
        template: cli.file,
        name: cli.name,
        initials: cli.initials,
        supervisor_initials: cli.sinitials,
        sheet: cli.sheet,
        month: cli.month,
        year: cli.year,
        leave: cli.leave,
        output_dir: cli.output_dir,
        layout: cli.layout,
        chain: !cli.no_chain,
    };

    match cli::fill(options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
