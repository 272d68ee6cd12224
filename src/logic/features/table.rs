//! Raw Table - uploaded flow rows before normalization
//!
//! Cột giữ nguyên tên như trong file upload (kể cả khoảng trắng thừa).
//! Normalizer chịu trách nhiệm trim và đổi tên.

use std::io::Read;

use thiserror::Error;

// ============================================================================
// CELL
// ============================================================================

/// Tokens read as "no value"
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
    "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None",
    "n/a", "nan", "null",
];

const TRUE_TOKENS: &[&str] = &["true", "True", "TRUE"];
const FALSE_TOKENS: &[&str] = &["false", "False", "FALSE"];

/// One raw cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Number(f64),
    Text(String),
}

static MISSING: Cell = Cell::Missing;

impl Cell {
    /// Parse a raw CSV field
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if NA_TOKENS.contains(&trimmed) {
            return Cell::Missing;
        }

        match trimmed.parse::<f64>() {
            Ok(v) if v.is_nan() => Cell::Missing,
            Ok(v) => Cell::Number(v),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    /// Present = not NA. Text counts as present.
    pub fn is_present(&self) -> bool {
        !matches!(self, Cell::Missing)
    }

    /// Numeric view of the cell, `None` when it cannot be coerced
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Missing => None,
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => {
                let s = s.trim();
                if TRUE_TOKENS.contains(&s) {
                    Some(1.0)
                } else if FALSE_TOKENS.contains(&s) {
                    Some(0.0)
                } else {
                    None
                }
            }
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid CSV: no header row")]
    MissingHeader,

    #[error("Invalid CSV: row {row} has {found} fields, header declares {expected}")]
    TooManyFields { row: usize, expected: usize, found: usize },
}

// ============================================================================
// RAW TABLE
// ============================================================================

/// Ordered rows keyed by column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with `Missing`, long rows truncated.
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        cells.resize(self.columns.len(), Cell::Missing);
        self.rows.push(cells);
    }

    /// Parse CSV with a header row
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(TableError::MissingHeader);
        }

        let mut table = RawTable::new(headers.iter());
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > table.columns.len() {
                return Err(TableError::TooManyFields {
                    row: i + 1,
                    expected: table.columns.len(),
                    found: record.len(),
                });
            }
            table.push_row(record.iter().map(Cell::parse).collect());
        }

        Ok(table)
    }

    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, TableError> {
        Self::from_csv(bytes)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column with this exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Trim whitespace around every column name
    pub fn trim_column_names(&mut self) {
        for column in &mut self.columns {
            let trimmed = column.trim();
            if trimmed.len() != column.len() {
                *column = trimmed.to_string();
            }
        }
    }

    /// Rename every column called `from`. Returns true if anything changed.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        let mut renamed = false;
        for column in self.columns.iter_mut().filter(|c| c.as_str() == from) {
            *column = to.to_string();
            renamed = true;
        }
        renamed
    }

    #[cfg(test)]
    pub fn row(&self, index: usize) -> Option<RowView<'_>> {
        self.rows.get(index).map(|cells| RowView { table: self, cells })
    }

    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(move |cells| RowView { table: self, cells })
    }
}

// ============================================================================
// ROW VIEW
// ============================================================================

/// Borrowed view of one row, cells looked up by column name
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a RawTable,
    cells: &'a [Cell],
}

impl<'a> RowView<'a> {
    /// Cell under `column`, `Missing` if the column does not exist
    pub fn get(&self, column: &str) -> &'a Cell {
        self.table
            .column_index(column)
            .and_then(|i| self.cells.get(i))
            .unwrap_or(&MISSING)
    }

    pub fn cells(&self) -> &'a [Cell] {
        self.cells
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_parse() {
        assert_eq!(Cell::parse("80"), Cell::Number(80.0));
        assert_eq!(Cell::parse(" 1.5 "), Cell::Number(1.5));
        assert_eq!(Cell::parse(""), Cell::Missing);
        assert_eq!(Cell::parse("NaN"), Cell::Missing);
        assert_eq!(Cell::parse("null"), Cell::Missing);
        assert_eq!(Cell::parse("GET"), Cell::Text("GET".to_string()));
    }

    #[test]
    fn test_cell_as_number() {
        assert_eq!(Cell::Number(3.0).as_number(), Some(3.0));
        assert_eq!(Cell::Missing.as_number(), None);
        assert_eq!(Cell::parse("True").as_number(), Some(1.0));
        assert_eq!(Cell::parse("false").as_number(), Some(0.0));
        assert_eq!(Cell::parse("POST").as_number(), None);
    }

    #[test]
    fn test_from_csv() {
        let csv = "a, b ,c\n1,2,3\n4,,x\n";
        let table = RawTable::from_csv_bytes(csv.as_bytes()).unwrap();

        assert_eq!(table.columns(), &["a", " b ", "c"]);
        assert_eq!(table.len(), 2);

        let row = table.row(1).unwrap();
        assert_eq!(row.get("a"), &Cell::Number(4.0));
        assert_eq!(row.get(" b "), &Cell::Missing);
        assert_eq!(row.get("c"), &Cell::Text("x".to_string()));
        assert_eq!(row.get("nope"), &Cell::Missing);
    }

    #[test]
    fn test_from_csv_short_row_padded() {
        let table = RawTable::from_csv_bytes(b"a,b,c\n1\n").unwrap();
        let row = table.row(0).unwrap();
        assert_eq!(row.cells().len(), 3);
        assert_eq!(row.get("c"), &Cell::Missing);
    }

    #[test]
    fn test_from_csv_long_row_rejected() {
        let err = RawTable::from_csv_bytes(b"a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(
            err,
            TableError::TooManyFields { row: 1, expected: 2, found: 3 }
        ));
    }

    #[test]
    fn test_from_csv_empty_input() {
        let err = RawTable::from_csv_bytes(b"").unwrap_err();
        assert!(matches!(err, TableError::MissingHeader));
    }

    #[test]
    fn test_trim_and_rename() {
        let mut table = RawTable::new(["  x ", "y"]);
        table.trim_column_names();
        assert_eq!(table.columns(), &["x", "y"]);

        assert!(table.rename_column("x", "z"));
        assert!(!table.rename_column("missing", "w"));
        assert_eq!(table.columns(), &["z", "y"]);
    }

    #[test]
    fn test_duplicate_column_first_wins() {
        let mut table = RawTable::new(["p", "p"]);
        table.push_row(vec![Cell::Number(1.0), Cell::Number(2.0)]);
        assert_eq!(table.row(0).unwrap().get("p"), &Cell::Number(1.0));
    }
}
