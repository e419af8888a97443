//! In-memory tabular data source.
//!
//! The analysis engine consumes data through [`DataTable`], an immutable
//! wrapper over an Arrow [`RecordBatch`] whose columns are normalized to
//! Utf8. The table offers exactly the surface the aggregator depends on:
//! ordered row iteration, column lookup by name, per-cell null tests, and
//! row-subset selection by equality on a named column.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use arrow::array::{Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use thiserror::Error;

mod csv;

pub use csv::{CsvOptions, CsvSource};

/// Errors raised by the data source layer.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The requested column does not exist in the table.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// Arrow-level failure while normalizing or reading data.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// I/O failure while reading an input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Column data could not be normalized to text.
    #[error("failed to normalize column '{0}' to text")]
    Normalization(String),
}

/// Result type for data source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// A single cell value with one canonical null representative.
///
/// Using an explicit variant for absence keeps null usable as a histogram
/// key without ambiguity between empty strings, sentinel text, and missing
/// data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// The value is missing.
    Null,
    /// A present text value.
    Text(String),
}

impl CellValue {
    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Returns true iff this value is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the text content, if present.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) => Some(s),
        }
    }

    /// Length of the value in characters; a missing value has length zero.
    pub fn char_len(&self) -> usize {
        self.as_text().map_or(0, |s| s.chars().count())
    }
}

impl From<Option<&str>> for CellValue {
    fn from(cell: Option<&str>) -> Self {
        match cell {
            None => CellValue::Null,
            Some(s) => CellValue::Text(s.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// An immutable in-memory table with all columns normalized to text.
///
/// Construction casts every column of the input batch to Utf8 (preserving
/// nulls through the Arrow validity bitmap), so the profiling engine sees a
/// uniform value model regardless of the inferred CSV schema.
#[derive(Debug, Clone)]
pub struct DataTable {
    schema: SchemaRef,
    columns: Vec<StringArray>,
    num_rows: usize,
}

impl DataTable {
    /// Builds a table from a record batch, normalizing every column to Utf8.
    pub fn from_record_batch(batch: &RecordBatch) -> SourceResult<Self> {
        let mut fields = Vec::with_capacity(batch.num_columns());
        let mut columns = Vec::with_capacity(batch.num_columns());

        for (field, column) in batch.schema().fields().iter().zip(batch.columns()) {
            let normalized = cast(column, &DataType::Utf8)?;
            let data = normalized
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| SourceError::Normalization(field.name().clone()))?
                .clone();
            fields.push(Field::new(field.name(), DataType::Utf8, true));
            columns.push(data);
        }

        Ok(Self {
            schema: Arc::new(Schema::new(fields)),
            columns,
            num_rows: batch.num_rows(),
        })
    }

    /// Loads a table from a CSV file with default options.
    pub fn from_csv(path: impl AsRef<std::path::Path>) -> SourceResult<Self> {
        CsvSource::new(path).load()
    }

    /// The normalized (all-Utf8) schema of the table.
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Number of rows in the table.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns in the table.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> SourceResult<ColumnView<'_>> {
        let index = self
            .schema
            .index_of(name)
            .map_err(|_| SourceError::UnknownColumn(name.to_string()))?;
        Ok(ColumnView {
            name: self.schema.field(index).name(),
            data: &self.columns[index],
        })
    }
}

/// A borrowed view over a single table column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnView<'a> {
    name: &'a str,
    data: &'a StringArray,
}

impl<'a> ColumnView<'a> {
    /// The column name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Number of rows in the column.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True iff the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of missing values in the column.
    pub fn null_count(&self) -> usize {
        self.data.null_count()
    }

    /// True iff the cell at `row` is missing.
    pub fn is_null(&self, row: usize) -> bool {
        self.data.is_null(row)
    }

    /// Ordered iteration over all cells; `None` marks a missing value.
    pub fn iter(&self) -> impl Iterator<Item = Option<&'a str>> + 'a {
        self.data.iter()
    }

    /// Indexes of all rows whose cell equals `value`.
    ///
    /// This is the back-reference primitive: results refer into the owning
    /// [`DataTable`] by row index rather than copying row data.
    pub fn rows_equal(&self, value: &CellValue) -> Vec<usize> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, cell)| match (value, cell) {
                (CellValue::Null, None) => true,
                (CellValue::Text(t), Some(s)) => t == s,
                _ => false,
            })
            .map(|(row, _)| row)
            .collect()
    }

    /// Builds the value histogram of this column.
    pub fn histogram(&self, dropna: bool) -> ValueHistogram {
        ValueHistogram::from_column(self, dropna)
    }
}

/// Insertion-ordered mapping from distinct value to occurrence count.
///
/// Entries keep first-seen order; [`ValueHistogram::ranked`] yields them by
/// descending count with the first-seen order as a stable tie-break. All
/// indicator and aggregation orderings derive from this structure.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValueHistogram {
    entries: Vec<(CellValue, u64)>,
}

impl ValueHistogram {
    /// Builds the histogram in one pass over a column.
    pub fn from_column(column: &ColumnView<'_>, dropna: bool) -> Self {
        let mut index: HashMap<CellValue, usize> = HashMap::new();
        let mut entries: Vec<(CellValue, u64)> = Vec::new();

        for cell in column.iter() {
            if dropna && cell.is_none() {
                continue;
            }
            let value = CellValue::from(cell);
            match index.get(&value) {
                Some(&at) => entries[at].1 += 1,
                None => {
                    index.insert(value.clone(), entries.len());
                    entries.push((value, 1));
                }
            }
        }

        Self { entries }
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True iff no values were counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &(CellValue, u64)> {
        self.entries.iter()
    }

    /// Entries sorted by descending count; ties keep first-seen order.
    pub fn ranked(&self) -> Vec<(CellValue, u64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        ranked
    }

    /// Occurrence count of a value, if present.
    pub fn count_of(&self, value: &CellValue) -> Option<u64> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, count)| *count)
    }

    /// Sum of all occurrence counts.
    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}
