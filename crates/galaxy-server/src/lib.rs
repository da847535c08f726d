//! Reference star query service.
//!
//! Serves `POST /stars` from an in-memory catalog (CSV or synthetic) and
//! `GET /health`. The viewer talks to it through `galaxy_engine::HttpStarService`.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use config::ServeConfig;
pub use error::ApiError;
pub use routes::router;
pub use server::{load_catalog, run_server, serve};
