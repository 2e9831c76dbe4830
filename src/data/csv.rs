use super::validator::SequenceValidator;
use crate::error::{CandlelabError, Result};
use crate::types::CandleSequence;
use chrono::DateTime;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| CandlelabError::Validation(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load an externally supplied candle CSV, validating required columns
    /// and timestamp ordering before anything downstream runs.
    pub fn load_sequence<P: AsRef<Path>>(path: P) -> Result<CandleSequence> {
        let df = Self::load(path)?;
        SequenceValidator::to_sequence(&df)
    }

    /// Write a labeled dataset frame to CSV.
    pub fn write_dataset<P: AsRef<Path>>(df: &mut DataFrame, path: P) -> Result<()> {
        let mut file = File::create(path.as_ref())
            .map_err(|e| CandlelabError::Validation(format!("Failed to create output: {}", e)))?;
        CsvWriter::new(&mut file).finish(df)?;
        Ok(())
    }

    /// Prepend a human-readable UTC datetime column derived from the
    /// millisecond timestamp column.
    pub fn with_datetime_column(df: &DataFrame) -> Result<DataFrame> {
        let ts = df.column("timestamp")?.cast(&DataType::Int64)?;
        let ts = ts.i64()?;

        let mut rendered = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let value = match ts.get(i).and_then(DateTime::from_timestamp_millis) {
                Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => {
                    return Err(CandlelabError::Validation(format!(
                        "Invalid data at row {}: timestamp out of datetime range",
                        i
                    )));
                }
            };
            rendered.push(value);
        }

        let mut out = df.clone();
        out.insert_column(0, Column::new("datetime".into(), rendered))?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_with_datetime_column() {
        let df = df! {
            "timestamp" => &[1640995200000i64, 1640995260000],
            "close" => &[100.0, 101.0],
        }
        .unwrap();

        let out = CsvConnector::with_datetime_column(&df).unwrap();
        let names = out.get_column_names();
        assert_eq!(names[0].as_str(), "datetime");

        let datetime = out.column("datetime").unwrap().str().unwrap();
        assert_eq!(datetime.get(0).unwrap(), "2022-01-01 00:00:00");
        assert_eq!(datetime.get(1).unwrap(), "2022-01-01 00:01:00");
    }
}
