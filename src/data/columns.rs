//! Numeric column extraction for plotting and analysis.
//!
//! Rows are kept or dropped as a unit: a row contributes to an (x, y) series
//! only when both of its cells are finite numbers, so pairs never shift
//! against each other when gaps sit at different rows in each column.

use super::model::DataTable;

/// All finite numbers of one column, skipping non-numeric cells.
pub fn numeric_values(table: &DataTable, col: usize) -> Vec<f64> {
    table
        .rows
        .iter()
        .filter_map(|row| row.get(col).and_then(|c| c.as_f64()))
        .collect()
}

/// Aligned (x, y) series from two columns.
pub fn paired_values(table: &DataTable, x_col: usize, y_col: usize) -> (Vec<f64>, Vec<f64>) {
    table
        .rows
        .iter()
        .filter_map(|row| {
            let x = row.get(x_col)?.as_f64()?;
            let y = row.get(y_col)?.as_f64()?;
            Some((x, y))
        })
        .unzip()
}

/// Like [`paired_values`], looking columns up by exact name.
pub fn paired_by_name(table: &DataTable, x: &str, y: &str) -> Option<(Vec<f64>, Vec<f64>)> {
    let x_col = table.column_index(x)?;
    let y_col = table.column_index(y)?;
    Some(paired_values(table, x_col, y_col))
}

/// Columns that hold at least one numeric cell, in file order.
pub fn numeric_columns(table: &DataTable) -> Vec<&str> {
    table
        .columns
        .iter()
        .enumerate()
        .filter(|(i, _)| {
            table
                .rows
                .iter()
                .any(|r| r.get(*i).and_then(|c| c.as_f64()).is_some())
        })
        .map(|(_, name)| name.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Cell;

    fn table() -> DataTable {
        DataTable::new(
            vec!["x".into(), "y".into(), "label".into()],
            vec![
                vec![Cell::Number(1.0), Cell::Number(10.0), Cell::Text("a".into())],
                vec![Cell::Text("n/a".into()), Cell::Number(20.0), Cell::Null],
                vec![Cell::Number(3.0), Cell::Null, Cell::Null],
                vec![Cell::Number(4.0), Cell::Number(40.0), Cell::Null],
            ],
        )
    }

    #[test]
    fn pairs_share_a_row_predicate() {
        let (x, y) = paired_values(&table(), 0, 1);
        assert_eq!(x, vec![1.0, 4.0]);
        assert_eq!(y, vec![10.0, 40.0]);
    }

    #[test]
    fn single_column_skips_text() {
        assert_eq!(numeric_values(&table(), 0), vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn text_only_columns_are_not_numeric() {
        assert_eq!(numeric_columns(&table()), vec!["x", "y"]);
    }

    #[test]
    fn short_rows_do_not_panic() {
        let table = DataTable {
            columns: vec!["x".into(), "y".into()],
            rows: vec![vec![Cell::Number(1.0)], vec![]],
        };
        assert_eq!(numeric_columns(&table), vec!["x"]);
    }
}
