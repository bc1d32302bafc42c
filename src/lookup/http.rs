//! HTTP provider: the admin backend's district and neighborhood endpoints.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::types::{DistrictsResponse, LocationOption, LookupError, NeighborhoodsResponse};
use super::LocationLookup;
use crate::config::CascadeConfig;

const USER_AGENT: &str = concat!("LocationCascade/", env!("CARGO_PKG_VERSION"));

/// Lookup against `GET <base>/admin/get-districts/` and
/// `GET <base>/admin/get-neighborhoods/`.
///
/// `ureq` is blocking, so every call runs on tokio's blocking pool and the
/// controller awaits it like any other future.
#[derive(Clone)]
pub struct HttpLookup {
    agent: ureq::Agent,
    districts_url: String,
    neighborhoods_url: String,
}

impl HttpLookup {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self::with_paths(
            base_url,
            "/admin/get-districts/",
            "/admin/get-neighborhoods/",
            timeout,
        )
    }

    pub fn with_paths(
        base_url: &str,
        districts_path: &str,
        neighborhoods_path: &str,
        timeout: Duration,
    ) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            districts_url: join_url(base_url, districts_path),
            neighborhoods_url: join_url(base_url, neighborhoods_path),
        }
    }

    pub fn from_config(config: &CascadeConfig) -> Self {
        Self::with_paths(
            &config.base_url,
            &config.districts_path,
            &config.neighborhoods_path,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn districts_url(&self) -> &str {
        &self.districts_url
    }

    pub fn neighborhoods_url(&self) -> &str {
        &self.neighborhoods_url
    }

    async fn get_json<T>(
        &self,
        url: &str,
        query: Vec<(&'static str, String)>,
    ) -> Result<T, LookupError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let agent = self.agent.clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || fetch_json(&agent, &url, &query))
            .await
            .map_err(|e| LookupError::Worker(e.to_string()))?
    }
}

#[async_trait]
impl LocationLookup for HttpLookup {
    async fn districts(&self, city: &str) -> Result<Vec<LocationOption>, LookupError> {
        let resp: DistrictsResponse = self
            .get_json(&self.districts_url, vec![("city_name", city.to_string())])
            .await?;
        Ok(resp.districts)
    }

    async fn neighborhoods(
        &self,
        city: &str,
        district: &str,
    ) -> Result<Vec<LocationOption>, LookupError> {
        let resp: NeighborhoodsResponse = self
            .get_json(
                &self.neighborhoods_url,
                vec![
                    ("city_name", city.to_string()),
                    ("district_name", district.to_string()),
                ],
            )
            .await?;
        Ok(resp.neighborhoods)
    }
}

fn fetch_json<T: DeserializeOwned>(
    agent: &ureq::Agent,
    url: &str,
    query: &[(&'static str, String)],
) -> Result<T, LookupError> {
    let mut request = agent.get(url);
    for (key, value) in query {
        request = request.query(key, value);
    }

    let response = request.call().map_err(|e| match e {
        ureq::Error::Status(code, _) => LookupError::Status(code),
        ureq::Error::Transport(t) => LookupError::Network(t.to_string()),
    })?;

    response
        .into_json()
        .map_err(|e| LookupError::InvalidResponse(e.to_string()))
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
