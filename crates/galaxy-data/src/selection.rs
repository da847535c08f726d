//! Query selection: which catalog stars answer a `QueryParams`

use crate::catalog::StarCatalog;

use galaxy_core::constants::MAX_DISTANCE_LY;
use galaxy_core::rng::Lcg;
use galaxy_core::{QueryParams, StarRecord};

use rayon::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Row limit for the smallest distance ranges
pub const BASE_LIMIT: usize = 18_000;
/// Row limit once `max_dist` reaches the full selectable range
pub const LIMIT_CAP: usize = 100_000;
/// Lowest limit applied to single-sector queries
pub const SECTOR_LIMIT_FLOOR: usize = 5_000;

/// Maximum number of stars returned for a query.
///
/// Grows linearly with `max_dist` up to the cap; a single sector gets a
/// quarter of that, but never less than the floor.
pub fn query_limit(params: &QueryParams) -> usize {
    let scale = (params.max_dist / MAX_DISTANCE_LY).min(1.0);
    let limit = (BASE_LIMIT as f64 + (LIMIT_CAP - BASE_LIMIT) as f64 * scale) as usize;

    if params.healpix.is_some() {
        (limit / 4).max(SECTOR_LIMIT_FLOOR)
    } else {
        limit
    }
}

impl StarCatalog {
    /// Stars matching `params`, capped by `query_limit`
    pub fn query(&self, params: &QueryParams) -> Vec<StarRecord> {
        self.select(params, query_limit(params))
    }

    /// Stars matching `params`, at most `limit` of them, propagated to `params.year`.
    ///
    /// When more stars match than `limit` allows, a random subset is taken. The
    /// subset is seeded from the query so repeating a query repeats its answer.
    /// Catalog order is preserved.
    pub fn select(&self, params: &QueryParams, limit: usize) -> Vec<StarRecord> {
        let matching: Vec<usize> = self
            .as_slice()
            .par_iter()
            .enumerate()
            .filter(|(_, star)| {
                star.distance_ly >= params.min_dist && star.distance_ly <= params.max_dist
            })
            .filter(|(_, star)| match params.healpix {
                Some(sector) => star.sector() == Some(sector),
                None => true,
            })
            .map(|(i, _)| i)
            .collect();

        let matched = matching.len();
        let chosen = sample_indices(matching, limit, query_seed(params));
        tracing::debug!(matched, returned = chosen.len(), limit, "Selected catalog stars");

        let delta_years = params.epoch_offset_years();
        let stars = self.as_slice();
        chosen
            .into_iter()
            .map(|i| stars[i].to_star_record(delta_years))
            .collect()
    }
}

/// Keep `limit` of `indices` chosen uniformly (partial Fisher-Yates), sorted
fn sample_indices(mut indices: Vec<usize>, limit: usize, seed: u64) -> Vec<usize> {
    if indices.len() <= limit {
        return indices;
    }

    let mut rng = Lcg::new(seed);
    let n = indices.len();
    for i in 0..limit {
        let j = i + rng.next_u32() as usize % (n - i);
        indices.swap(i, j);
    }
    indices.truncate(limit);
    indices.sort_unstable();
    indices
}

fn query_seed(params: &QueryParams) -> u64 {
    let mut hasher = DefaultHasher::new();
    params.min_dist.to_bits().hash(&mut hasher);
    params.max_dist.to_bits().hash(&mut hasher);
    params.healpix.hash(&mut hasher);
    params.year.hash(&mut hasher);
    hasher.finish()
}
