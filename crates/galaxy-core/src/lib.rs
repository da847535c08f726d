//! Shared data model for the galaxy explorer.
//!
//! Everything that crosses a crate or wire boundary lives here: star rows as
//! returned by the query service, query parameters, sky sectors, and the small
//! amount of sky geometry (HEALPix base pixels, proper-motion propagation)
//! needed to produce them.

pub mod constants;
pub mod coordinates;
pub mod query;
pub mod rng;
pub mod star;

#[cfg(test)]
mod tests;

pub use coordinates::{healpix_base_pixel, propagate};
pub use query::{HealpixSector, QueryParams, SectorError, SectorFilter, StarQueryResponse};
pub use star::StarRecord;
