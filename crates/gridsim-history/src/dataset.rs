//! CSV persistence of historical and derived datasets.
//!
//! Readers and writers are generic over [`io::Read`]/[`io::Write`]; opening files is
//! left to the caller.

use std::io;

use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;

use crate::record::DriverRecord;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("malformed dataset")]
    Csv(csv::Error),
    #[display("row {row}: driver '{driver}' has finish position 0")]
    ZeroFinishPosition { row: usize, driver: String },
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads historical result rows from a CSV stream with a header line.
///
/// Lap-statistic columns are optional. Rows are numbered from 1, header excluded, in
/// error messages.
pub fn read_records<R>(reader: R) -> Result<Vec<DriverRecord>, DatasetError>
where
    R: io::Read,
{
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut records = vec![];
    for (i, row) in reader.deserialize::<DriverRecord>().enumerate() {
        let record = row?;
        if record.finish_position == Some(0) {
            return Err(DatasetError::ZeroFinishPosition {
                row: i + 1,
                driver: record.driver,
            });
        }
        records.push(record);
    }
    tracing::debug!(rows = records.len(), "read historical dataset");
    Ok(records)
}

/// Writes rows as CSV with a header line derived from the row type's field names.
pub fn write_rows<W, T>(writer: W, rows: &[T]) -> Result<(), DatasetError>
where
    W: io::Write,
    T: Serialize,
{
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
