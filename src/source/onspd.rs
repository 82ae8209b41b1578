//! Row layout of the ONS Postcode Directory CSV.
//!
//! The directory is distributed headerless with a fixed column order. Only
//! the columns this importer stores are named here; the layout guarantees at
//! least [`MIN_COLUMNS`] columns per row.

use csv::StringRecord;

use crate::error::source::SourceError;
use crate::source::{numeric_field, optional_field, required_field};

/// Column positions in the distributed CSV layout.
pub mod column {
    pub const POSTCODE: usize = 2;
    pub const DATE_INTRODUCED: usize = 3;
    pub const DATE_TERMINATED: usize = 4;
    pub const COUNTY: usize = 5;
    pub const DISTRICT: usize = 6;
    pub const WARD: usize = 7;
    pub const USERTYPE: usize = 8;
    pub const EASTINGS: usize = 9;
    pub const NORTHINGS: usize = 10;
    pub const QUALITY: usize = 11;
    pub const COUNTRY: usize = 14;
    pub const REGION: usize = 15;
    pub const CONSTITUENCY: usize = 17;
    pub const NUTS: usize = 22;
    pub const CCG: usize = 23;
    pub const PARISH: usize = 24;
}

/// Minimum number of columns a well-formed row carries.
pub const MIN_COLUMNS: usize = 25;

/// Termination marker parsed from the directory's YYYYMM date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    pub year: i32,
    pub month: i32,
}

/// One parsed row of the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PostcodeRecord {
    pub postcode: String,
    pub pc_compact: String,
    pub outcode: String,
    pub incode: String,
    pub eastings: i32,
    pub northings: i32,
    pub quality: i32,
    pub usertype: Option<i32>,
    pub date_introduced: Option<String>,
    pub termination: Option<Termination>,
    pub county: Option<String>,
    pub district: Option<String>,
    pub ward: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub constituency: Option<String>,
    pub nuts: Option<String>,
    pub ccg: Option<String>,
    pub parish: Option<String>,
}

impl PostcodeRecord {
    /// Parses one CSV record at the given 1-based record number.
    ///
    /// Strict on layout: short rows, non-numeric grid fields, and garbled
    /// termination dates are [`SourceError::MalformedRow`]. A zero grid value
    /// is numeric and accepted. Empty attribute codes become `None`.
    pub fn parse(line: u64, record: &StringRecord) -> Result<Self, SourceError> {
        if record.len() < MIN_COLUMNS {
            return Err(SourceError::MalformedRow {
                line,
                reason: format!(
                    "expected at least {MIN_COLUMNS} columns, found {}",
                    record.len()
                ),
            });
        }

        let postcode = required_field(line, record, column::POSTCODE, "postcode")?;
        let eastings = numeric_field(line, record, column::EASTINGS, "eastings")?;
        let northings = numeric_field(line, record, column::NORTHINGS, "northings")?;
        let quality = numeric_field(line, record, column::QUALITY, "grid quality")?;
        let termination = parse_termination(line, &record[column::DATE_TERMINATED])?;

        let (outcode, incode) = split_postcode(&postcode);
        let pc_compact = postcode.replace(' ', "");

        Ok(Self {
            pc_compact,
            outcode,
            incode,
            postcode,
            eastings,
            northings,
            quality,
            usertype: record[column::USERTYPE].trim().parse().ok(),
            date_introduced: optional_field(record, column::DATE_INTRODUCED),
            termination,
            county: optional_field(record, column::COUNTY),
            district: optional_field(record, column::DISTRICT),
            ward: optional_field(record, column::WARD),
            country: optional_field(record, column::COUNTRY),
            region: optional_field(record, column::REGION),
            constituency: optional_field(record, column::CONSTITUENCY),
            nuts: optional_field(record, column::NUTS),
            ccg: optional_field(record, column::CCG),
            parish: optional_field(record, column::PARISH),
        })
    }

    /// A row is live when the directory carries no termination date for it.
    pub fn is_live(&self) -> bool {
        self.termination.is_none()
    }
}

/// Splits a postcode into its outward and inward codes.
///
/// The spaced form splits at the space; the compact form's inward code is
/// always the final three characters.
fn split_postcode(postcode: &str) -> (String, String) {
    match postcode.split_once(' ') {
        Some((outward, inward)) => (outward.to_string(), inward.trim().to_string()),
        None => {
            let split = postcode.len().saturating_sub(3);
            (postcode[..split].to_string(), postcode[split..].to_string())
        }
    }
}

fn parse_termination(line: u64, raw: &str) -> Result<Option<Termination>, SourceError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let malformed = || SourceError::MalformedRow {
        line,
        reason: format!("bad termination date: {raw:?}"),
    };

    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let year: i32 = raw[..4].parse().map_err(|_| malformed())?;
    let month: i32 = raw[4..].parse().map_err(|_| malformed())?;
    if !(1..=12).contains(&month) {
        return Err(malformed());
    }

    Ok(Some(Termination { year, month }))
}
