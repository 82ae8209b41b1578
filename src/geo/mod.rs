//! Geodetic transformations for the national grid.

mod osgb;

pub use osgb::{grid_to_wgs84, LonLat};
