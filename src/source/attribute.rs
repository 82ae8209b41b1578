//! Attribute data documents.
//!
//! Each support entity is seeded from a bundled JSON document mapping GSS
//! codes to display names, one document per entity under the data directory.

use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use crate::error::{source::SourceError, ImportError};

/// Loads a code-to-name document.
///
/// Returned as an ordered map so seeding order is deterministic.
pub fn load_code_map(path: &Path) -> Result<BTreeMap<String, String>, ImportError> {
    if !path.is_file() {
        return Err(SourceError::Missing(path.to_path_buf()).into());
    }

    let file = File::open(path)?;
    let map = serde_json::from_reader(BufReader::new(file)).map_err(|source| SourceError::Data {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(map)
}
