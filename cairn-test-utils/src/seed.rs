//! Paths into the static seed fixtures bundled under `seed/`.
//!
//! The seed is a miniature but structurally faithful import source: a
//! 25-column ONS Postcode Directory extract, one JSON document per
//! attribute relation, and a single Ordnance Survey place file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

fn seed_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("seed")
}

/// The seed postcode directory extract.
pub fn onspd_csv() -> PathBuf {
    seed_root().join("postcodes.csv")
}

/// Directory holding the seed attribute documents.
pub fn data_dir() -> PathBuf {
    seed_root().join("data")
}

/// Directory holding the seed place files.
pub fn places_dir() -> PathBuf {
    seed_root().join("data").join("places")
}

/// The seed postcode rows as unparsed CSV lines, for tests that corrupt or
/// reorder rows before handing them to a scratch source.
pub fn onspd_rows() -> io::Result<Vec<String>> {
    let contents = fs::read_to_string(onspd_csv())?;

    Ok(contents.lines().map(str::to_string).collect())
}
