//! Entity-independent bulk ingestion machinery.
//!
//! Every loader follows the same shape: open a delimited source, parse rows
//! strictly, and insert in fixed-size batches. The reader and the batching
//! iterator live here so the per-entity repositories only supply a row
//! parser and the insert itself.

use std::{fs::File, path::Path};

use csv::{ReaderBuilder, StringRecord};

use crate::error::source::SourceError;

/// Rows per INSERT statement.
///
/// Sized so a full postcode batch stays under SQLite's bind-parameter limit
/// while keeping Postgres round trips low.
pub const INSERT_BATCH_SIZE: usize = 500;

/// Streaming reader over a headerless delimited source file.
pub struct RowReader {
    records: csv::StringRecordsIntoIter<File>,
    line: u64,
}

impl RowReader {
    /// Opens `path`, failing with [`SourceError::Missing`] when it does not
    /// exist.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        if !path.is_file() {
            return Err(SourceError::Missing(path.to_path_buf()));
        }

        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        Ok(Self {
            records: reader.into_records(),
            line: 0,
        })
    }
}

impl Iterator for RowReader {
    /// 1-based record number paired with the raw record.
    type Item = Result<(u64, StringRecord), SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.line += 1;
        Some(
            record
                .map(|record| (self.line, record))
                .map_err(SourceError::from),
        )
    }
}

/// Folds parsed rows into batches of at most `size`.
///
/// The parser may filter rows by returning `Ok(None)`. The first parse or
/// read error ends the stream with that error; a partially filled batch in
/// flight at that point is discarded, matching the all-or-nothing ingestion
/// contract.
pub fn batches<R, P>(
    reader: RowReader,
    mut parse: P,
    size: usize,
) -> impl Iterator<Item = Result<Vec<R>, SourceError>>
where
    P: FnMut(u64, &StringRecord) -> Result<Option<R>, SourceError>,
{
    let mut rows = reader;
    let mut done = false;

    std::iter::from_fn(move || {
        if done {
            return None;
        }

        let mut batch = Vec::with_capacity(size);
        for item in rows.by_ref() {
            let (line, record) = match item {
                Ok(pair) => pair,
                Err(e) => {
                    done = true;
                    return Some(Err(e));
                }
            };

            match parse(line, &record) {
                Ok(Some(row)) => {
                    batch.push(row);
                    if batch.len() == size {
                        return Some(Ok(batch));
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    done = true;
                    return Some(Err(e));
                }
            }
        }

        done = true;
        if batch.is_empty() {
            None
        } else {
            Some(Ok(batch))
        }
    })
}
