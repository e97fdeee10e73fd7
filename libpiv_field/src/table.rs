use std::io::BufRead;

use fxhash::FxHashMap;

use super::error::TableError;

/// A column-major numeric table parsed from the data rows of a v3d file.
///
/// Columns are stored in header order and addressed by name. Rows are streamed
/// from the reader in a single pass; the table never materializes the raw text
/// a second time.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    columns: Vec<Vec<f64>>,
    column_indices: FxHashMap<String, usize>,
    n_rows: usize,
}

impl DataTable {
    /// Read every remaining line of the reader as a comma-delimited numeric row.
    ///
    /// The reader must be positioned just past the header line. Blank lines are
    /// skipped. A row whose field count disagrees with the header, or with a
    /// field that fails to parse as a float, aborts the read with the 1-based
    /// line number of the offender.
    pub fn read_rows<R: BufRead>(reader: R, headers: &[String]) -> Result<Self, TableError> {
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
        let mut n_rows = 0;

        for (offset, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = offset + 2; // line 1 is the header
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != headers.len() {
                return Err(TableError::FieldCountMismatch {
                    line: line_number,
                    expected: headers.len(),
                    found: fields.len(),
                });
            }

            for (column, field) in columns.iter_mut().zip(fields.iter()) {
                let value: f64 = field.trim().parse().map_err(|_| TableError::BadNumber {
                    line: line_number,
                    field: field.trim().to_string(),
                })?;
                column.push(value);
            }
            n_rows += 1;
        }

        let column_indices = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        Ok(Self {
            columns,
            column_indices,
            n_rows,
        })
    }

    /// Number of data rows read
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Get a column of values by its header name
    pub fn column(&self, name: &str) -> Result<&[f64], TableError> {
        match self.column_indices.get(name) {
            Some(idx) => Ok(&self.columns[*idx]),
            None => Err(TableError::UnknownColumn(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn headers() -> Vec<String> {
        vec!["X mm".to_string(), "Y mm".to_string(), "U m/s".to_string()]
    }

    #[test]
    fn test_read_rows() {
        let data = "0.0, 0.0, 1.5\n1.0, 0.0, -2.5\n";
        let table = DataTable::read_rows(Cursor::new(data), &headers()).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column("X mm").unwrap(), &[0.0, 1.0]);
        assert_eq!(table.column("U m/s").unwrap(), &[1.5, -2.5]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let data = "0.0, 0.0, 1.5\n\n1.0, 0.0, 2.5\n";
        let table = DataTable::read_rows(Cursor::new(data), &headers()).unwrap();
        assert_eq!(table.n_rows(), 2);
    }

    #[test]
    fn test_field_count_mismatch() {
        let data = "0.0, 0.0, 1.5\n1.0, 0.0\n";
        match DataTable::read_rows(Cursor::new(data), &headers()) {
            Err(TableError::FieldCountMismatch {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("Expected FieldCountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_number() {
        let data = "0.0, zero, 1.5\n";
        match DataTable::read_rows(Cursor::new(data), &headers()) {
            Err(TableError::BadNumber { line, field }) => {
                assert_eq!(line, 2);
                assert_eq!(field, "zero");
            }
            other => panic!("Expected BadNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_column() {
        let table = DataTable::read_rows(Cursor::new(""), &headers()).unwrap();
        match table.column("R mm") {
            Err(TableError::UnknownColumn(name)) => assert_eq!(name, "R mm"),
            other => panic!("Expected UnknownColumn, got {other:?}"),
        }
    }
}
