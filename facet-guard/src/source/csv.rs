//! CSV loading into a [`DataTable`].

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::record_batch::RecordBatch;
use tracing::debug;

use super::{DataTable, SourceResult};

/// Options controlling CSV parsing.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Whether the first row is a header.
    pub has_header: bool,
    /// Maximum number of records to read for schema inference.
    pub schema_inference_records: Option<usize>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            schema_inference_records: Some(1000),
        }
    }
}

impl CsvOptions {
    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the first row is a header.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }
}

/// A CSV file source.
///
/// Reads the file with schema inference, concatenates all record batches,
/// and normalizes the result into a [`DataTable`].
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a source for the given path with default options.
    pub fn new(path: impl AsRef<std::path::Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options: CsvOptions::default(),
        }
    }

    /// Replaces the parsing options.
    pub fn with_options(mut self, options: CsvOptions) -> Self {
        self.options = options;
        self
    }

    /// Loads the file into a table.
    pub fn load(&self) -> SourceResult<DataTable> {
        let format = Format::default()
            .with_header(self.options.has_header)
            .with_delimiter(self.options.delimiter);

        let mut file = File::open(&self.path)?;
        let (schema, _) = format.infer_schema(&mut file, self.options.schema_inference_records)?;
        let schema = Arc::new(schema);

        let file = File::open(&self.path)?;
        let reader = ReaderBuilder::new(schema.clone())
            .with_format(format)
            .build(file)?;
        let batches = reader.collect::<Result<Vec<_>, _>>()?;

        let batch = if batches.is_empty() {
            RecordBatch::new_empty(schema)
        } else {
            arrow::compute::concat_batches(&schema, &batches)?
        };

        debug!(
            path = %self.path.display(),
            rows = batch.num_rows(),
            columns = batch.num_columns(),
            "loaded CSV file"
        );

        DataTable::from_record_batch(&batch)
    }
}
