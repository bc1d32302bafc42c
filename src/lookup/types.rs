//! Core types for the lookup subsystem.

use serde::{Deserialize, Serialize};

/// One selectable child location as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationOption {
    /// Identifier submitted with the form.
    pub value: String,
    /// Display label.
    pub name: String,
}

impl LocationOption {
    pub fn new(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
        }
    }

    /// An option whose identifier is its display name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: name.clone(),
            name,
        }
    }
}

/// Backends answer either with `{value, name}` objects or with bare names.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireOption {
    Pair { value: String, name: String },
    Bare(String),
}

impl<'de> Deserialize<'de> for LocationOption {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match WireOption::deserialize(deserializer)? {
            WireOption::Pair { value, name } => LocationOption { value, name },
            WireOption::Bare(name) => LocationOption::named(name),
        })
    }
}

/// `GET /admin/get-districts/` body.
#[derive(Debug, Deserialize)]
pub struct DistrictsResponse {
    pub districts: Vec<LocationOption>,
}

/// `GET /admin/get-neighborhoods/` body.
#[derive(Debug, Deserialize)]
pub struct NeighborhoodsResponse {
    pub neighborhoods: Vec<LocationOption>,
}

/// Lookup failures. None of these are fatal to the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("network error: {0}")]
    Network(String),
    #[error("lookup endpoint returned HTTP {0}")]
    Status(u16),
    #[error("invalid lookup response: {0}")]
    InvalidResponse(String),
    #[error("lookup worker failed: {0}")]
    Worker(String),
}

/// Result of a child-option fetch, split the way the form treats it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome<T> {
    Found(Vec<T>),
    Empty,
    Failed(LookupError),
}

impl<T> From<Result<Vec<T>, LookupError>> for LookupOutcome<T> {
    fn from(result: Result<Vec<T>, LookupError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => Self::Empty,
            Ok(items) => Self::Found(items),
            Err(e) => Self::Failed(e),
        }
    }
}
