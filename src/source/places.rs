//! Row layout of the place gazetteer files.
//!
//! Places ship as a directory of headerless CSV files sharing one fixed
//! layout: identity and naming first, then administrative context, then the
//! grid position and bounding envelope.

use csv::StringRecord;

use crate::error::source::SourceError;
use crate::source::{numeric_field, optional_field, required_field};

/// Column positions in the place file layout.
pub mod column {
    pub const CODE: usize = 0;
    pub const NAME_1: usize = 1;
    pub const NAME_1_LANG: usize = 2;
    pub const NAME_2: usize = 3;
    pub const NAME_2_LANG: usize = 4;
    pub const LOCAL_TYPE: usize = 5;
    pub const OUTCODE: usize = 6;
    pub const COUNTY_UNITARY: usize = 7;
    pub const COUNTY_UNITARY_TYPE: usize = 8;
    pub const DISTRICT_BOROUGH: usize = 9;
    pub const DISTRICT_BOROUGH_TYPE: usize = 10;
    pub const REGION: usize = 11;
    pub const COUNTRY: usize = 12;
    pub const EASTINGS: usize = 13;
    pub const NORTHINGS: usize = 14;
    pub const MIN_EASTINGS: usize = 15;
    pub const MIN_NORTHINGS: usize = 16;
    pub const MAX_EASTINGS: usize = 17;
    pub const MAX_NORTHINGS: usize = 18;
}

/// Number of columns in a well-formed place row.
pub const COLUMNS: usize = 19;

/// One parsed place row.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRecord {
    pub code: String,
    pub name_1: String,
    pub name_1_lang: Option<String>,
    pub name_2: Option<String>,
    pub name_2_lang: Option<String>,
    pub local_type: String,
    pub outcode: String,
    pub county_unitary: Option<String>,
    pub county_unitary_type: Option<String>,
    pub district_borough: Option<String>,
    pub district_borough_type: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub eastings: i32,
    pub northings: i32,
    pub min_eastings: i32,
    pub min_northings: i32,
    pub max_eastings: i32,
    pub max_northings: i32,
}

impl PlaceRecord {
    /// Parses one place row with the same strictness as the postcode layout.
    pub fn parse(line: u64, record: &StringRecord) -> Result<Self, SourceError> {
        if record.len() < COLUMNS {
            return Err(SourceError::MalformedRow {
                line,
                reason: format!("expected {COLUMNS} columns, found {}", record.len()),
            });
        }

        Ok(Self {
            code: required_field(line, record, column::CODE, "place code")?,
            name_1: required_field(line, record, column::NAME_1, "place name")?,
            name_1_lang: optional_field(record, column::NAME_1_LANG),
            name_2: optional_field(record, column::NAME_2),
            name_2_lang: optional_field(record, column::NAME_2_LANG),
            local_type: required_field(line, record, column::LOCAL_TYPE, "local type")?,
            outcode: required_field(line, record, column::OUTCODE, "outcode")?,
            county_unitary: optional_field(record, column::COUNTY_UNITARY),
            county_unitary_type: optional_field(record, column::COUNTY_UNITARY_TYPE),
            district_borough: optional_field(record, column::DISTRICT_BOROUGH),
            district_borough_type: optional_field(record, column::DISTRICT_BOROUGH_TYPE),
            region: optional_field(record, column::REGION),
            country: optional_field(record, column::COUNTRY),
            eastings: numeric_field(line, record, column::EASTINGS, "eastings")?,
            northings: numeric_field(line, record, column::NORTHINGS, "northings")?,
            min_eastings: numeric_field(line, record, column::MIN_EASTINGS, "min eastings")?,
            min_northings: numeric_field(line, record, column::MIN_NORTHINGS, "min northings")?,
            max_eastings: numeric_field(line, record, column::MAX_EASTINGS, "max eastings")?,
            max_northings: numeric_field(line, record, column::MAX_NORTHINGS, "max northings")?,
        })
    }
}
