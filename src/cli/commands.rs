use crate::config::{RunConfig, Submission, TemplateLayout};
use crate::core::TimesheetUpdater;
use anyhow::Context;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Everything the `timesheet` binary collects from its flags
#[derive(Debug, Clone)]
pub struct FillOptions {
    pub template: PathBuf,
    pub name: String,
    pub initials: String,
    pub supervisor_initials: String,
    pub sheet: usize,
    pub month: u32,
    pub year: i32,
    pub leave: u32,
    pub output_dir: Option<PathBuf>,
    pub layout: Option<PathBuf>,
    pub chain: bool,
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins; otherwise only warnings, or debug with `--verbose`, so a
/// successful run prints nothing.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "timesheet_filler=debug"
    } else {
        "timesheet_filler=warn"
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Execute the fill command: update the template and write the dated copy
pub fn fill(options: FillOptions) -> anyhow::Result<PathBuf> {
    let mut layout = match &options.layout {
        Some(path) => TemplateLayout::from_yaml_file(path)
            .with_context(|| format!("failed to load layout {}", path.display()))?,
        None => TemplateLayout::default(),
    };
    if let Some(dir) = options.output_dir {
        layout.output_dir = dir;
    }

    let submission = Submission::new(
        options.name,
        options.initials,
        options.supervisor_initials,
        options.year,
        options.month,
        options.leave,
    )?;
    debug!(?submission, "submission record");

    let config = RunConfig {
        template: options.template,
        sheet_index: options.sheet,
        chain: options.chain,
        layout,
        submission,
    };

    Ok(TimesheetUpdater::new(config).run()?)
}
