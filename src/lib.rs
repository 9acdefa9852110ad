//! Print a table of pairwise similarity scores and chart it as bars.
//!
//! A run is a single pass: the file named on the command line is parsed into
//! a [`data::model::Frame`], reshaped into `(pair, jac)` rows, written to
//! stdout as a grid, then shown in a bar-chart window that blocks until it is
//! closed.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod ui;

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;

use config::ViewerOptions;
use data::model::PairTable;
use error::AppError;

/// Load `path` and build its pair table.
pub fn prepare(path: &Path) -> Result<PairTable, AppError> {
    let frame = data::loader::load_file(path).map_err(AppError::Load)?;
    Ok(data::transform::transform(&frame)?)
}

/// Parse the arguments, print the table, then show the chart.
pub fn run<I, T>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = cli::parse_args(args)?;
    let table = prepare(&cli.path)?;

    let text = report::format_table(&table).map_err(AppError::Report)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{text}")
        .and_then(|()| out.flush())
        .map_err(|e| AppError::Report(e.into()))?;
    drop(out);

    let source = cli
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.path.display().to_string());
    let options = ViewerOptions::default().with_source(&source);
    app::show(table, options, source)
}
