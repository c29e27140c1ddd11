//! Tabular input: named numeric columns, loadable from CSV.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// One named column of numeric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// A table of named numeric columns, in insertion order.
///
/// This is the input shape the figure builders and the scatter-matrix builder
/// consume. Values are `f64`; missing or non-numeric entries are NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column; builder-style.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.push_column(name, values);
        self
    }

    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.columns.push(Column {
            name: name.into(),
            values,
        });
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Longest column length.
    pub fn n_rows(&self) -> usize {
        self.columns.iter().map(|c| c.values.len()).max().unwrap_or(0)
    }

    /// Load a table from a CSV file with a header row.
    ///
    /// Header fields become column names. Cells that do not parse as numbers
    /// load as NaN, so one stray cell does not fail the whole file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Table> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("open csv file {}", path.display()))?;
        Self::from_csv_reader(file).with_context(|| format!("parse csv file {}", path.display()))
    }

    /// Load a table from CSV content with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Table> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let headers = rdr.headers().context("read csv header")?.clone();
        let mut table = Table::new();
        for name in headers.iter() {
            table.push_column(name, Vec::new());
        }
        for (row_idx, record) in rdr.records().enumerate() {
            let record = record.with_context(|| format!("read csv record {}", row_idx + 1))?;
            for (col_idx, field) in record.iter().enumerate() {
                if let Some(col) = table.columns.get_mut(col_idx) {
                    col.values.push(field.trim().parse::<f64>().unwrap_or(f64::NAN));
                }
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn column_lookup_by_name() {
        let t = Table::new()
            .with_column("a", vec![1.0, 2.0])
            .with_column("b", vec![3.0]);
        assert_eq!(t.n_columns(), 2);
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.column("b").unwrap().values, vec![3.0]);
        assert!(t.column("c").is_none());
        assert_eq!(t.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn load_csv_with_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "a,b").unwrap();
        writeln!(f, "1,4.5").unwrap();
        writeln!(f, "2,oops").unwrap();
        drop(f);

        let t = Table::from_csv_path(&path).unwrap();
        assert_eq!(t.column_names(), vec!["a", "b"]);
        assert_eq!(t.column("a").unwrap().values, vec![1.0, 2.0]);
        let b = &t.column("b").unwrap().values;
        assert_eq!(b[0], 4.5);
        assert!(b[1].is_nan());
    }

    #[test]
    fn load_csv_from_reader() {
        let t = Table::from_csv_reader("x,y\n1,2\n3,4\n".as_bytes()).unwrap();
        assert_eq!(t.column("x").unwrap().values, vec![1.0, 3.0]);
        assert_eq!(t.column("y").unwrap().values, vec![2.0, 4.0]);
    }
}
