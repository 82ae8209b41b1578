//! Pipeline stage enumeration.

use std::fmt;

use crate::data::relation::relation_name;

/// The ordered stages of one import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    TeardownPostcodes,
    EnableSpatialExtension,
    SetupSupportTables,
    CreatePostcodeRelation,
    SeedPostcodes,
    PopulateLocation,
    RebuildIndexes,
    BuildOutcodes,
    BuildTerminatedPostcodes,
}

impl Stage {
    /// Every stage in execution order.
    pub const ORDER: [Stage; 9] = [
        Stage::TeardownPostcodes,
        Stage::EnableSpatialExtension,
        Stage::SetupSupportTables,
        Stage::CreatePostcodeRelation,
        Stage::SeedPostcodes,
        Stage::PopulateLocation,
        Stage::RebuildIndexes,
        Stage::BuildOutcodes,
        Stage::BuildTerminatedPostcodes,
    ];

    /// Operator-facing stage name.
    pub fn name(self) -> &'static str {
        match self {
            Stage::TeardownPostcodes => "teardown postcodes",
            Stage::EnableSpatialExtension => "enable spatial extension",
            Stage::SetupSupportTables => "setup support tables",
            Stage::CreatePostcodeRelation => "create postcode relation",
            Stage::SeedPostcodes => "seed postcodes",
            Stage::PopulateLocation => "populate location",
            Stage::RebuildIndexes => "rebuild indexes",
            Stage::BuildOutcodes => "build outcodes",
            Stage::BuildTerminatedPostcodes => "build terminated postcodes",
        }
    }

    /// Relations this stage creates, recorded for rollback.
    pub fn relations_created(self) -> &'static [&'static str] {
        match self {
            Stage::SetupSupportTables => &[
                relation_name::DISTRICTS,
                relation_name::COUNTIES,
                relation_name::CCGS,
                relation_name::WARDS,
                relation_name::NUTS,
                relation_name::PARISHES,
                relation_name::CONSTITUENCIES,
                relation_name::PLACES,
            ],
            Stage::CreatePostcodeRelation => &[relation_name::POSTCODES],
            Stage::BuildOutcodes => &[relation_name::OUTCODES],
            Stage::BuildTerminatedPostcodes => &[relation_name::TERMINATED_POSTCODES],
            _ => &[],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
