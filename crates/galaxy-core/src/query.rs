//! Query payloads exchanged with the star service

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{HEALPIX_BASE_PIXELS, REFERENCE_EPOCH};
use crate::coordinates::healpix_base_pixel;
use crate::star::StarRecord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectorError {
    #[error("HEALPix sector must be in 1..={max}, got {0}", max = HEALPIX_BASE_PIXELS)]
    OutOfRange(i64),

    #[error("Unrecognised sector: {0:?}")]
    Unparsable(String),
}

/// One of the twelve HEALPix base pixels, numbered 1..=12
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HealpixSector(u8);

impl HealpixSector {
    pub fn new(id: u8) -> Result<Self, SectorError> {
        if (1..=HEALPIX_BASE_PIXELS).contains(&id) {
            Ok(Self(id))
        } else {
            Err(SectorError::OutOfRange(id as i64))
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=HEALPIX_BASE_PIXELS).map(Self)
    }

    pub fn id(self) -> u8 {
        self.0
    }

    /// Zero-based order-0 pixel index
    pub fn base_pixel(self) -> u8 {
        self.0 - 1
    }

    /// Sector containing a direction
    pub fn containing(direction: DVec3) -> Option<Self> {
        healpix_base_pixel(direction).map(|p| Self(p + 1))
    }

    /// Nested pixel ids covered by this sector at a deeper `order`
    pub fn nested_range(self, order: u32) -> RangeInclusive<u64> {
        let per_base = 4u64.pow(order);
        let p0 = self.base_pixel() as u64;
        p0 * per_base..=(p0 + 1) * per_base - 1
    }
}

impl TryFrom<u8> for HealpixSector {
    type Error = SectorError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<HealpixSector> for u8 {
    fn from(sector: HealpixSector) -> Self {
        sector.0
    }
}

impl fmt::Display for HealpixSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sector selection offered to the user: every sector, or exactly one
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SectorFilter {
    #[default]
    All,
    Sector(HealpixSector),
}

impl SectorFilter {
    /// Options in display order: All, 1, 2, ..., 12
    pub fn options() -> impl Iterator<Item = Self> {
        std::iter::once(Self::All).chain(HealpixSector::all().map(Self::Sector))
    }

    pub fn healpix(self) -> Option<HealpixSector> {
        match self {
            Self::All => None,
            Self::Sector(sector) => Some(sector),
        }
    }

    /// Next option, wrapping from 12 back to All
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Sector(HealpixSector(1)),
            Self::Sector(s) if s.0 == HEALPIX_BASE_PIXELS => Self::All,
            Self::Sector(s) => Self::Sector(HealpixSector(s.0 + 1)),
        }
    }
}

impl From<Option<HealpixSector>> for SectorFilter {
    fn from(healpix: Option<HealpixSector>) -> Self {
        healpix.map_or(Self::All, Self::Sector)
    }
}

impl fmt::Display for SectorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Sector(sector) => write!(f, "{sector}"),
        }
    }
}

impl FromStr for SectorFilter {
    type Err = SectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        let id: i64 = s.parse().map_err(|_| SectorError::Unparsable(s.to_string()))?;
        let id = u8::try_from(id).map_err(|_| SectorError::OutOfRange(id))?;
        HealpixSector::new(id).map(Self::Sector)
    }
}

fn default_year() -> i32 {
    REFERENCE_EPOCH
}

/// Filters for one star query
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Inner distance bound (light years)
    pub min_dist: f64,
    /// Outer distance bound (light years)
    pub max_dist: f64,
    /// Sky sector, `null` for the whole sky
    #[serde(default)]
    pub healpix: Option<HealpixSector>,
    /// Epoch positions are propagated to
    #[serde(default = "default_year")]
    pub year: i32,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            min_dist: 10.0,
            max_dist: 400.0,
            healpix: None,
            year: REFERENCE_EPOCH,
        }
    }
}

impl QueryParams {
    pub fn sector_filter(&self) -> SectorFilter {
        self.healpix.into()
    }

    /// Finite bounds with `min_dist <= max_dist`
    pub fn has_valid_range(&self) -> bool {
        self.min_dist.is_finite() && self.max_dist.is_finite() && self.min_dist <= self.max_dist
    }

    /// Years between the reference epoch and the requested one
    pub fn epoch_offset_years(&self) -> f64 {
        self.year as f64 - REFERENCE_EPOCH as f64
    }
}

/// Service reply to a star query
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StarQueryResponse {
    pub count: usize,
    pub stars: Vec<StarRecord>,
}

impl StarQueryResponse {
    pub fn from_stars(stars: Vec<StarRecord>) -> Self {
        Self {
            count: stars.len(),
            stars,
        }
    }
}
