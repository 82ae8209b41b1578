//! Counts and codes baked into the static seed fixtures under `seed/`.

/// Live rows in `seed/postcodes.csv`.
pub const SEED_LIVE_POSTCODES: u64 = 10;

/// Terminated rows in `seed/postcodes.csv`.
pub const SEED_TERMINATED_POSTCODES: u64 = 2;

/// Distinct outcodes among the live seed rows.
pub const SEED_OUTCODES: u64 = 3;

/// The outcodes of the live seed rows.
pub const SEED_OUTCODE_NAMES: [&str; 3] = ["AB10", "AB11", "CB4"];

/// Rows in `seed/places/places.csv`.
pub const SEED_PLACES: u64 = 2;

/// Entries in `seed/data/districts.json`.
pub const SEED_DISTRICTS: u64 = 3;
