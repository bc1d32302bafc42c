//! In-memory provider: a City → District → Neighborhood hierarchy.
//!
//! Backed either by the built-in sample below or by a JSON export in the
//! backend's hierarchical shape: `{ "City": { "District": ["Neighborhood", ...] } }`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::types::{LocationOption, LookupError};
use super::LocationLookup;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("cannot read dataset {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

// ─── Built-in dataset ───────────────────────────────────────────

struct BuiltinDistrict {
    city: &'static str,
    name: &'static str,
    neighborhoods: &'static [&'static str],
}

const BUILTIN_DISTRICTS: &[BuiltinDistrict] = &[
    BuiltinDistrict {
        city: "Istanbul",
        name: "Kadıköy",
        neighborhoods: &["Caferağa", "Fenerbahçe", "Moda", "Suadiye"],
    },
    BuiltinDistrict {
        city: "Istanbul",
        name: "Beşiktaş",
        neighborhoods: &["Arnavutköy", "Bebek", "Levent", "Ortaköy"],
    },
    BuiltinDistrict {
        city: "Istanbul",
        name: "Üsküdar",
        neighborhoods: &["Altunizade", "Beylerbeyi", "Kuzguncuk"],
    },
    BuiltinDistrict {
        city: "Ankara",
        name: "Çankaya",
        neighborhoods: &["Bahçelievler", "Kızılay", "Kavaklıdere"],
    },
    BuiltinDistrict {
        city: "Ankara",
        name: "Keçiören",
        neighborhoods: &["Etlik", "Kalaba"],
    },
    BuiltinDistrict {
        city: "Izmir",
        name: "Bornova",
        neighborhoods: &["Erzene", "Kazımdirik"],
    },
    BuiltinDistrict {
        city: "Izmir",
        name: "Karşıyaka",
        neighborhoods: &["Bostanlı", "Mavişehir"],
    },
    BuiltinDistrict {
        city: "Izmir",
        name: "Foça",
        neighborhoods: &[],
    },
];

type Hierarchy = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Lookup served from memory. District and neighborhood values equal their names.
#[derive(Debug, Clone, Default)]
pub struct DatasetLookup {
    cities: Hierarchy,
}

impl DatasetLookup {
    /// The built-in Turkish sample.
    pub fn builtin() -> Self {
        let mut cities = Hierarchy::new();
        for d in BUILTIN_DISTRICTS {
            let neighborhoods = d.neighborhoods.iter().map(|n| n.to_string()).collect();
            cities
                .entry(d.city.to_string())
                .or_default()
                .insert(d.name.to_string(), neighborhoods);
        }
        Self::from_hierarchy(cities)
    }

    /// Parse a hierarchical JSON export.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let cities: Hierarchy = serde_json::from_str(json)?;
        Ok(Self::from_hierarchy(cities))
    }

    /// Load a hierarchical JSON export from disk.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let data = fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    fn from_hierarchy(raw: Hierarchy) -> Self {
        // Names are whitespace-collapsed and neighborhoods sorted, as the backend stores them.
        // Keys that collapse to the same name share one merged list.
        let mut cities = Hierarchy::new();
        for (city, districts) in raw {
            let merged = cities.entry(collapse_whitespace(&city)).or_default();
            for (district, neighborhoods) in districts {
                merged
                    .entry(collapse_whitespace(&district))
                    .or_default()
                    .extend(neighborhoods.iter().map(|n| collapse_whitespace(n)));
            }
        }
        for neighborhoods in cities.values_mut().flat_map(|d| d.values_mut()) {
            neighborhoods.retain(|n| !n.is_empty());
            neighborhoods.sort();
            neighborhoods.dedup();
        }
        Self { cities }
    }

    /// City names in order.
    pub fn city_names(&self) -> Vec<String> {
        self.cities.keys().cloned().collect()
    }

    fn district_options(&self, city: &str) -> Vec<LocationOption> {
        self.cities
            .get(city)
            .map(|districts| districts.keys().map(LocationOption::named).collect())
            .unwrap_or_default()
    }

    fn neighborhood_options(&self, city: &str, district: &str) -> Vec<LocationOption> {
        self.cities
            .get(city)
            .and_then(|districts| districts.get(district))
            .map(|ns| ns.iter().map(LocationOption::named).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LocationLookup for DatasetLookup {
    async fn districts(&self, city: &str) -> Result<Vec<LocationOption>, LookupError> {
        Ok(self.district_options(city))
    }

    async fn neighborhoods(
        &self,
        city: &str,
        district: &str,
    ) -> Result<Vec<LocationOption>, LookupError> {
        Ok(self.neighborhood_options(city, district))
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
