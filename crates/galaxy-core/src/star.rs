//! Star rows as returned by the query service

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::DEFAULT_MAGNITUDE;

/// One star of a query result
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Catalog identifier (Gaia source id)
    #[serde(deserialize_with = "source_id_from_any")]
    pub source_id: String,
    /// Position in light years
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Apparent G magnitude
    #[serde(default)]
    pub mag: Option<f64>,
    /// Distance from the origin in light years (display only)
    #[serde(default)]
    pub dist: Option<f64>,
}

impl StarRecord {
    pub fn new(source_id: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            source_id: source_id.into(),
            x,
            y,
            z,
            mag: None,
            dist: None,
        }
    }

    pub fn with_magnitude(mut self, mag: f64) -> Self {
        self.mag = Some(mag);
        self
    }

    pub fn with_distance(mut self, dist: f64) -> Self {
        self.dist = Some(dist);
        self
    }

    /// Magnitude used for display encoding; missing or NaN reads as 15
    pub fn magnitude_or_default(&self) -> f64 {
        match self.mag {
            Some(mag) if !mag.is_nan() => mag,
            _ => DEFAULT_MAGNITUDE,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SourceId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

fn source_id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match SourceId::deserialize(deserializer)? {
        SourceId::Text(s) => s,
        SourceId::Unsigned(n) => n.to_string(),
        SourceId::Signed(n) => n.to_string(),
    })
}
