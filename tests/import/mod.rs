pub mod run;

use cairn::source::ImportSource;
use cairn_test_utils::seed;

/// Import source rooted at the bundled seed fixtures.
pub fn seed_source() -> ImportSource {
    ImportSource {
        postcodes: seed::onspd_csv(),
        data_dir: seed::data_dir(),
        places_dir: seed::places_dir(),
    }
}
