use thiserror::Error;

use super::model::{Frame, Pair, PairRow, PairTable, Record, Value};

/// Column holding the first identifier.
pub const N1: &str = "n1";
/// Column holding the second identifier.
pub const N2: &str = "n2";
/// Column holding the score.
pub const JAC: &str = "jac";

/// The loaded table does not have the shape the pair view needs.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("column '{0}' not found (available: {1:?})")]
    MissingColumn(&'static str, Vec<String>),
    #[error("row {row}: score '{value}' in column 'jac' is not numeric")]
    NonNumericScore { row: usize, value: String },
}

/// Select `n1`, `n2` and `jac` from every row, in order.
pub fn records(frame: &Frame) -> Result<Vec<Record>, SchemaError> {
    let column = |name: &'static str| {
        frame
            .column_index(name)
            .ok_or_else(|| SchemaError::MissingColumn(name, frame.columns.clone()))
    };
    let n1_idx = column(N1)?;
    let n2_idx = column(N2)?;
    let jac_idx = column(JAC)?;

    frame
        .rows
        .iter()
        .enumerate()
        .map(|(row, cells)| -> Result<Record, SchemaError> {
            let cell = |idx: usize| cells.get(idx).unwrap_or(&Value::Null);
            let score = cell(jac_idx);
            let jac = score.as_f64().ok_or_else(|| SchemaError::NonNumericScore {
                row,
                value: score.to_string(),
            })?;
            Ok(Record {
                n1: cell(n1_idx).to_string(),
                n2: cell(n2_idx).to_string(),
                jac,
            })
        })
        .collect()
}

/// Build the `(pair, jac)` view. No dedup, no sorting.
pub fn pair_table(records: Vec<Record>) -> PairTable {
    let rows = records
        .into_iter()
        .map(|r| PairRow {
            pair: Pair(r.n1, r.n2),
            jac: r.jac,
        })
        .collect();
    PairTable { rows }
}

/// [`records`] followed by [`pair_table`].
pub fn transform(frame: &Frame) -> Result<PairTable, SchemaError> {
    let table = pair_table(records(frame)?);
    log::debug!("Built {} pair rows", table.len());
    Ok(table)
}
