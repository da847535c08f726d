//! Application state shared by the viewer: current stars and loading status

use galaxy_core::StarRecord;

use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    /// Count reported by the service
    Loaded(usize),
    Error,
}

impl fmt::Display for LoadingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Loading => f.write_str("Loading..."),
            Self::Loaded(count) => write!(f, "{count} Stars Loaded"),
            Self::Error => f.write_str("Error"),
        }
    }
}

/// Star sequence tagged with a revision that changes on every replacement
#[derive(Clone, Debug, Default)]
pub struct StarSet {
    revision: u64,
    records: Arc<[StarRecord]>,
}

impl StarSet {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Shared handle to the records, for consumers that outlive a borrow
    pub fn shared(&self) -> Arc<[StarRecord]> {
        Arc::clone(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Top-level viewer state.
///
/// Only the fetch client writes to it; everything else reads.
#[derive(Debug, Default)]
pub struct AppState {
    stars: StarSet,
    loading: LoadingState,
    /// Count reported with the current star set
    loaded_count: usize,
    last_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stars(&self) -> &StarSet {
        &self.stars
    }

    pub fn loading(&self) -> LoadingState {
        self.loading
    }

    /// Count the service reported for the star set on screen
    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    /// Message of the most recent failure, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True when a previous set is still shown after a failed query
    pub fn is_stale(&self) -> bool {
        self.loading == LoadingState::Error && !self.stars.is_empty()
    }

    pub(crate) fn mark_loading(&mut self) {
        self.loading = LoadingState::Loading;
    }

    pub(crate) fn replace_stars(&mut self, records: Vec<StarRecord>, count: usize) {
        self.stars = StarSet {
            revision: self.stars.revision + 1,
            records: records.into(),
        };
        self.loading = LoadingState::Loaded(count);
        self.loaded_count = count;
        self.last_error = None;
    }

    pub(crate) fn mark_failed(&mut self, message: String) {
        self.loading = LoadingState::Error;
        self.last_error = Some(message);
    }
}
