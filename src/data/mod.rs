//! Data repositories for the relations the import manages.
//!
//! Each repository borrows a [`sea_orm::ConnectionTrait`] connection and
//! owns one relation's lifecycle: create, load, index, destroy. The
//! primary postcode relation additionally exposes its lifecycle split into
//! the pipeline's stages (teardown, create, seed, geolocate, index).

pub mod attribute;
pub mod lifecycle;
pub mod outcode;
pub mod place;
pub mod postcode;
pub mod relation;
pub mod terminated_postcode;
