//! Bulk importer for the ONS Postcode Directory.
//!
//! One run destructively rebuilds the whole reference store: the primary
//! postcode relation, the support attribute relations, the place gazetteer,
//! and the derived outcode and terminated-postcode relations. The run is
//! staged and fail-fast; see [`import::ImportPipeline`].

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod geo;
pub mod import;
pub mod ingest;
pub mod source;
pub mod startup;
