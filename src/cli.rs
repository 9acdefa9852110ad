use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::error::AppError;

/// Print a table of pairwise scores and chart them as bars.
#[derive(Debug, Parser)]
#[command(name = "pairplot", version, about)]
pub struct Cli {
    /// Table with `n1`, `n2` and `jac` columns (.csv, .tsv, .json, .parquet).
    pub path: PathBuf,
}

/// Parse the argument list (program name first). No file is touched here.
pub fn parse_args<I, T>(args: I) -> Result<Cli, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Ok(Cli::try_parse_from(args)?)
}
