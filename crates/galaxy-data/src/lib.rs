pub mod catalog;
pub mod selection;

pub use catalog::{generate_synthetic_stars, CatalogStar, StarCatalog};
pub use selection::{query_limit, BASE_LIMIT, LIMIT_CAP, SECTOR_LIMIT_FLOOR};
