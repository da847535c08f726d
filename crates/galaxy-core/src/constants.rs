/// Reference epoch of catalog positions (Gaia DR3)
pub const REFERENCE_EPOCH: i32 = 2016;

/// Milliarcseconds to radians
pub const MAS_TO_RAD: f64 = (std::f64::consts::PI / 180.0) / 3_600_000.0;

/// Light years in one parsec
pub const LY_PER_PARSEC: f64 = 3.261_563_777;

/// Magnitude assumed for stars without photometry
pub const DEFAULT_MAGNITUDE: f64 = 15.0;

/// HEALPix base pixels at order 0
pub const HEALPIX_BASE_PIXELS: u8 = 12;

/// Selectable distance range (light years)
pub const MIN_DISTANCE_LY: f64 = 10.0;
pub const MAX_DISTANCE_LY: f64 = 17_000.0;
pub const DISTANCE_STEP_LY: f64 = 10.0;

/// Selectable simulated epoch range (years)
pub const MIN_YEAR: i32 = -100_000;
pub const MAX_YEAR: i32 = 100_000;
pub const YEAR_STEP: i32 = 100;
