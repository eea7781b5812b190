//! Country boundary collection (GeoJSON). Geometry is opaque here: the file is
//! kept verbatim for the browser and only `properties.ISO2` is indexed.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde_json::Value;

pub const DEFAULT_BOUNDARIES_PATH: &str = "data/europe.geojson";
pub const FEATURE_ID_KEY: &str = "properties.ISO2";

#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("failed to read boundary file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse boundary GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("boundary file is not a FeatureCollection")]
    NotFeatureCollection,
}

#[derive(Debug, Clone)]
pub struct BoundaryCollection {
    geojson: Value,
    codes: BTreeSet<String>,
}

impl Default for BoundaryCollection {
    fn default() -> Self {
        BoundaryCollection {
            geojson: serde_json::json!({ "type": "FeatureCollection", "features": [] }),
            codes: BTreeSet::new(),
        }
    }
}

impl BoundaryCollection {
    pub fn from_value(geojson: Value) -> Result<Self, BoundaryError> {
        if geojson.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
            return Err(BoundaryError::NotFeatureCollection);
        }
        let features = geojson
            .get("features")
            .and_then(Value::as_array)
            .ok_or(BoundaryError::NotFeatureCollection)?;
        let codes = features
            .iter()
            .filter_map(|feature| feature.pointer("/properties/ISO2").and_then(Value::as_str))
            .map(str::to_string)
            .collect();
        Ok(BoundaryCollection { geojson, codes })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, BoundaryError> {
        Self::from_value(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BoundaryError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| BoundaryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let collection = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            features = collection.codes.len(),
            "boundaries loaded"
        );
        Ok(collection)
    }

    /// Load the boundary file, falling back to an empty collection. A missing
    /// map layer only removes geometry from the choropleth.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(collection) => collection,
            Err(err) => {
                tracing::warn!(error = %err, "map will render without country geometry");
                Self::default()
            }
        }
    }

    pub fn geojson(&self) -> &Value {
        &self.geojson
    }

    /// ISO2 codes carried by the features, ascending.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn contains(&self, iso2: &str) -> bool {
        self.codes.contains(iso2)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
