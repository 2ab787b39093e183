use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ahash::AHashMap;
use csv::ReaderBuilder;

use lv_core::{DataSet, Record, Value};

use crate::DataError;

/// CSV loader producing an indexed record collection.
///
/// Each row becomes one [`Record`] with a sequential index 0..N-1 in source
/// order. Cells that parse as `f64` become numeric values, everything else
/// stays raw text; empty cells are simply absent from the record.
pub struct CsvTable;

impl CsvTable {
    /// Load a CSV file into a dataset.
    pub fn load(path: &Path) -> Result<DataSet, DataError> {
        Ok(Self::load_with_dimensions(path)?.0)
    }

    /// Load a CSV file, also returning the header names in source order.
    /// Record values hash by name, so column order only survives here.
    pub fn load_with_dimensions(path: &Path) -> Result<(DataSet, Vec<String>), DataError> {
        let file = File::open(path)?;
        let loaded = Self::from_reader_with_dimensions(BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            records = loaded.0.len(),
            dimensions = loaded.1.len(),
            "loaded CSV dataset"
        );
        Ok(loaded)
    }

    /// Parse CSV from any reader. Header row names the dimensions.
    pub fn from_reader<R: Read>(reader: R) -> Result<DataSet, DataError> {
        Ok(Self::from_reader_with_dimensions(reader)?.0)
    }

    pub fn from_reader_with_dimensions<R: Read>(
        reader: R,
    ) -> Result<(DataSet, Vec<String>), DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let row = result?;
            let mut values = AHashMap::with_capacity(headers.len());
            for (header, field) in headers.iter().zip(row.iter()) {
                let field = field.trim();
                if field.is_empty() {
                    continue;
                }
                let value = match field.parse::<f64>() {
                    Ok(v) => Value::Number(v),
                    Err(_) => Value::Text(field.to_string()),
                };
                values.insert(header.clone(), value);
            }
            records.push(Record::new(index, values));
        }

        Ok((DataSet::new(records), headers))
    }
}
