//! Child-location lookup subsystem.
//!
//! The cascade asks a [`LocationLookup`] for the districts of a city and the
//! neighborhoods of a district. Two providers exist: the HTTP endpoints of the
//! admin backend and an in-memory dataset.

pub mod dataset;
pub mod http;
pub mod types;

use async_trait::async_trait;

pub use dataset::{DatasetError, DatasetLookup};
pub use http::HttpLookup;
pub use types::{LocationOption, LookupError, LookupOutcome};

/// Source of valid child options for a parent selection.
#[async_trait]
pub trait LocationLookup: Send + Sync {
    /// Districts of `city`. An empty list means "no matches", not an error.
    async fn districts(&self, city: &str) -> Result<Vec<LocationOption>, LookupError>;

    /// Neighborhoods of `district` within `city`.
    async fn neighborhoods(
        &self,
        city: &str,
        district: &str,
    ) -> Result<Vec<LocationOption>, LookupError>;
}
