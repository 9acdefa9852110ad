use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::data::model::PairTable;

// ---------------------------------------------------------------------------
// Stdout table
// ---------------------------------------------------------------------------

/// Build the Arrow batch `(pair: Utf8, jac: Float64)` for a pair table.
pub fn to_record_batch(table: &PairTable) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("pair", DataType::Utf8, false),
        Field::new("jac", DataType::Float64, false),
    ]));
    let pairs = StringArray::from(table.labels());
    let scores = Float64Array::from(table.rows.iter().map(|r| r.jac).collect::<Vec<_>>());
    let columns: Vec<ArrayRef> = vec![Arc::new(pairs), Arc::new(scores)];

    RecordBatch::try_new(schema, columns).context("building pair batch")
}

/// Render the table as a text grid, rows in table order.
pub fn format_table(table: &PairTable) -> Result<String> {
    let batch = to_record_batch(table)?;
    let grid = pretty_format_batches(&[batch]).context("formatting pair table")?;
    Ok(grid.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Pair, PairRow};

    fn table(rows: &[(&str, &str, f64)]) -> PairTable {
        PairTable {
            rows: rows
                .iter()
                .map(|&(a, b, jac)| PairRow {
                    pair: Pair(a.into(), b.into()),
                    jac,
                })
                .collect(),
        }
    }

    #[test]
    fn grid_lists_pairs_and_scores() {
        let text = format_table(&table(&[("A", "B", 0.5), ("C", "D", 0.25)])).unwrap();

        let expected = "\
+--------+------+
| pair   | jac  |
+--------+------+
| (A, B) | 0.5  |
| (C, D) | 0.25 |
+--------+------+";
        assert_eq!(text, expected);
    }

    #[test]
    fn row_order_is_kept() {
        let text = format_table(&table(&[("z", "y", 0.1), ("a", "b", 0.9)])).unwrap();

        let first = text.find("(z, y)").unwrap();
        let second = text.find("(a, b)").unwrap();
        assert!(first < second);
    }

    #[test]
    fn formatting_is_deterministic() {
        let t = table(&[("A", "B", 0.5), ("A", "B", 0.5), ("C", "D", f64::NAN)]);
        assert_eq!(format_table(&t).unwrap(), format_table(&t).unwrap());
    }

    #[test]
    fn empty_table_still_has_a_header() {
        let text = format_table(&PairTable::default()).unwrap();
        assert!(text.contains("pair"));
        assert!(text.contains("jac"));
    }
}
