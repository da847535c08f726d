//! Star catalog in reference-epoch form (Gaia DR3 style rows)

use galaxy_core::constants::LY_PER_PARSEC;
use galaxy_core::rng::Lcg;
use galaxy_core::{propagate, HealpixSector, StarRecord};

use anyhow::{Context, Result};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::path::Path;

/// Source ids handed out to synthetic stars start here
const SYNTHETIC_ID_BASE: u64 = 1_000_000_000_000;

/// Synthetic distance range, log10(light years)
const SYNTHETIC_MIN_LOG_LY: f64 = 0.6; // ~4 ly
const SYNTHETIC_MAX_LOG_LY: f64 = 4.230_448_9; // 17,000 ly

/// One catalog row at the reference epoch.
///
/// Field names double as the CSV header.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogStar {
    pub source_id: u64,
    /// Unit direction vector
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Angular velocity in mas/yr
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    /// G-band apparent magnitude
    pub phot_g_mean_mag: f64,
    pub distance_ly: f64,
}

impl CatalogStar {
    pub fn direction(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn angular_velocity(&self) -> DVec3 {
        DVec3::new(self.vx, self.vy, self.vz)
    }

    pub fn sector(&self) -> Option<HealpixSector> {
        HealpixSector::containing(self.direction())
    }

    /// Position in light years, `delta_years` after the reference epoch
    pub fn position_at(&self, delta_years: f64) -> DVec3 {
        propagate(
            self.direction(),
            self.angular_velocity(),
            self.distance_ly,
            delta_years,
        )
    }

    pub fn to_star_record(&self, delta_years: f64) -> StarRecord {
        let pos = self.position_at(delta_years);
        StarRecord::new(self.source_id.to_string(), pos.x, pos.y, pos.z)
            .with_magnitude(self.phot_g_mean_mag)
            .with_distance(self.distance_ly)
    }
}

/// Star catalog container
pub struct StarCatalog {
    stars: Vec<CatalogStar>,
}

impl StarCatalog {
    /// Load from CSV; rows missing any column are skipped
    pub fn load_csv(path: &Path) -> Result<Self> {
        tracing::info!("Loading star catalog from {:?}", path);

        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to open catalog: {}", path.display()))?;

        let mut stars = Vec::new();
        let mut skipped = 0usize;
        for result in reader.deserialize() {
            let record: CatalogCsvRecord = result
                .with_context(|| format!("failed to parse catalog row in {}", path.display()))?;
            match record.to_catalog_star() {
                Some(star) => stars.push(star),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} incomplete catalog rows", skipped);
        }
        tracing::info!("Loaded {} catalog stars", stars.len());
        Ok(Self { stars })
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("failed to create catalog: {}", path.display()))?;
        for star in &self.stars {
            writer.serialize(star)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn from_records(stars: Vec<CatalogStar>) -> Self {
        Self { stars }
    }

    /// Deterministic synthetic catalog
    pub fn synthetic(count: usize, seed: u64) -> Self {
        Self::from_records(generate_synthetic_stars(count, seed))
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogStar> {
        self.stars.iter()
    }

    pub fn as_slice(&self) -> &[CatalogStar] {
        &self.stars
    }
}

/// CSV row with every column optional
#[derive(Debug, Deserialize)]
struct CatalogCsvRecord {
    source_id: Option<u64>,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    vx: Option<f64>,
    vy: Option<f64>,
    vz: Option<f64>,
    phot_g_mean_mag: Option<f64>,
    distance_ly: Option<f64>,
}

impl CatalogCsvRecord {
    fn to_catalog_star(&self) -> Option<CatalogStar> {
        Some(CatalogStar {
            source_id: self.source_id?,
            x: self.x?,
            y: self.y?,
            z: self.z?,
            vx: self.vx?,
            vy: self.vy?,
            vz: self.vz?,
            phot_g_mean_mag: self.phot_g_mean_mag?,
            distance_ly: self.distance_ly?,
        })
    }
}

/// Generate synthetic catalog stars (deterministic)
pub fn generate_synthetic_stars(count: usize, seed: u64) -> Vec<CatalogStar> {
    let mut rng = Lcg::new(seed);

    (0..count)
        .map(|i| {
            let ra = rng.next_f64() * TAU;
            let dec = rng.next_signed().asin();
            let direction = DVec3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin());

            // Log-uniform distance
            let log_d = SYNTHETIC_MIN_LOG_LY
                + rng.next_f64() * (SYNTHETIC_MAX_LOG_LY - SYNTHETIC_MIN_LOG_LY);
            let distance_ly = 10.0_f64.powf(log_d);

            // Random absolute mag -2 to +12, then apparent
            let dist_pc = distance_ly / LY_PER_PARSEC;
            let abs_mag = -2.0 + rng.next_f64() * 14.0;
            let phot_g_mean_mag = abs_mag + 5.0 * dist_pc.log10() - 5.0;

            // Proper motion is tangential: drop the radial component
            let raw = DVec3::new(rng.next_signed(), rng.next_signed(), rng.next_signed()) * 100.0;
            let velocity = raw - direction * raw.dot(direction);

            CatalogStar {
                source_id: SYNTHETIC_ID_BASE + i as u64,
                x: direction.x,
                y: direction.y,
                z: direction.z,
                vx: velocity.x,
                vy: velocity.y,
                vz: velocity.z,
                phot_g_mean_mag,
                distance_ly,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_synthetic_is_deterministic() {
        let a = generate_synthetic_stars(64, 7);
        let b = generate_synthetic_stars(64, 7);
        let c = generate_synthetic_stars(64, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_synthetic_geometry() {
        for star in generate_synthetic_stars(500, 42) {
            assert_relative_eq!(star.direction().length(), 1.0, epsilon = 1e-9);
            // Tangential velocity
            assert!(star.direction().dot(star.angular_velocity()).abs() < 1e-9);
            assert!(star.distance_ly >= 3.9 && star.distance_ly <= 17_000.5);
            assert!(star.phot_g_mean_mag.is_finite());
            assert!(star.sector().is_some());
        }
    }

    #[test]
    fn test_record_at_reference_epoch() {
        let star = CatalogStar {
            source_id: 99,
            x: 0.0,
            y: 0.0,
            z: 1.0,
            vx: 50.0,
            vy: 0.0,
            vz: 0.0,
            phot_g_mean_mag: 8.25,
            distance_ly: 120.0,
        };
        let record = star.to_star_record(0.0);
        assert_eq!(record.source_id, "99");
        assert_relative_eq!(record.z, 120.0);
        assert_relative_eq!(record.x, 0.0);
        assert_eq!(record.mag, Some(8.25));
        assert_eq!(record.dist, Some(120.0));

        // Drift grows with the epoch offset
        let later = star.to_star_record(10_000.0);
        assert!(later.x > 0.0);
        assert_relative_eq!(later.z, 120.0);
    }

    #[test]
    fn test_csv_round_trip_and_skip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stars.csv");

        let catalog = StarCatalog::synthetic(10, 3);
        catalog.write_csv(&path).unwrap();
        let loaded = StarCatalog::load_csv(&path).unwrap();
        assert_eq!(loaded.as_slice(), catalog.as_slice());

        let partial = dir.path().join("partial.csv");
        std::fs::write(
            &partial,
            "source_id,x,y,z,vx,vy,vz,phot_g_mean_mag,distance_ly\n\
             1,1,0,0,0,0,0,5.0,10\n\
             2,0,1,0,0,0,0,,20\n",
        )
        .unwrap();
        let loaded = StarCatalog::load_csv(&partial).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.as_slice()[0].source_id, 1);
    }
}
