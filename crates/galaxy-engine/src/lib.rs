//! Viewer core shared by the windowed front end and tests
//!
//! Nothing here touches the GPU or the window system. The render crate feeds
//! it input events and reads back buffers, camera matrices and overlay text.
//!
//! Data flows one way: `QueryController` emits `QueryParams`, `FetchClient`
//! turns them into a new `StarSet` on `AppState`, and `StarCloud` rebuilds
//! `StarBuffers` from it. Hover goes the other way, from a cursor position
//! through `picking` back to a `StarRecord`.

pub mod buffers;
pub mod camera;
pub mod cloud;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod http_adapter;
pub mod overlay;
pub mod picking;
pub mod state;

pub use buffers::StarBuffers;
pub use camera::OrbitCamera;
pub use cloud::StarCloud;
pub use config::{CameraConfig, ViewerConfig};
pub use controller::{ControlEvent, QueryController, RangeInput};
pub use error::{FetchError, FetchResult};
pub use fetch::{FetchClient, FetchCompletion};
pub use http_adapter::{HttpStarService, StarQueryService};
pub use picking::{pick_nearest, ScreenProjector};
pub use state::{AppState, LoadingState, StarSet};
