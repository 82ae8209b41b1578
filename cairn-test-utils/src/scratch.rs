//! Scratch source files backed by temporary directories.
//!
//! Used by tests that need to mutate source data, most often to inject a
//! malformed row. The returned [`TempDir`] guard must stay alive for the
//! duration of the test.

use std::{fs, io, path::PathBuf};

use tempfile::TempDir;

/// Writes `contents` to `name` inside a fresh temporary directory.
pub fn write_scratch_file(name: &str, contents: &str) -> io::Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join(name);
    fs::write(&path, contents)?;

    Ok((dir, path))
}

/// A complete import source tree in a temporary directory: a postcode CSV,
/// the attribute documents, and the place files.
pub struct ScratchSource {
    pub dir: TempDir,
    pub postcodes: PathBuf,
    pub data_dir: PathBuf,
    pub places_dir: PathBuf,
}

impl ScratchSource {
    /// Builds a tree whose postcode CSV holds exactly `rows`.
    ///
    /// Attribute documents and place files are copied from the static seed,
    /// so the support stages always have their inputs regardless of what the
    /// caller does to the postcode rows.
    pub fn with_postcode_rows(rows: &[String]) -> io::Result<Self> {
        let dir = TempDir::new()?;

        let postcodes = dir.path().join("postcodes.csv");
        let mut contents = rows.join("\n");
        contents.push('\n');
        fs::write(&postcodes, contents)?;

        let data_dir = dir.path().join("data");
        fs::create_dir(&data_dir)?;
        for entry in fs::read_dir(crate::seed::data_dir())? {
            let entry = entry?;
            if entry.path().is_file() {
                fs::copy(entry.path(), data_dir.join(entry.file_name()))?;
            }
        }

        let places_dir = data_dir.join("places");
        fs::create_dir(&places_dir)?;
        for entry in fs::read_dir(crate::seed::places_dir())? {
            let entry = entry?;
            if entry.path().is_file() {
                fs::copy(entry.path(), places_dir.join(entry.file_name()))?;
            }
        }

        Ok(Self {
            dir,
            postcodes,
            data_dir,
            places_dir,
        })
    }
}
