use async_trait::async_trait;
use reqwest::Url;

use spooky_core::config::GeocodeConfig;

use crate::error::{GeocodeError, GeocodeResult};
use crate::place::PlaceRecord;
use crate::provider::GeocodeProvider;

/// Client for the `/search` endpoint of a Nominatim instance.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    search_url: Url,
    country_codes: String,
}

impl NominatimClient {
    /// ## Summary
    /// Builds a client for the Nominatim instance at `base_url`.
    ///
    /// Every request carries `user_agent`, as required by the Nominatim usage policy.
    ///
    /// ## Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, user_agent: &str, country_codes: &str) -> GeocodeResult<Self> {
        let search_url = format!("{}/search", base_url.trim_end_matches('/'));
        let search_url =
            Url::parse(&search_url).map_err(|e| GeocodeError::InvalidUrl(format!("{search_url}: {e}")))?;

        let http = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            http,
            search_url,
            country_codes: country_codes.to_string(),
        })
    }

    /// ## Summary
    /// Builds a client from the `geocode` configuration section.
    ///
    /// ## Errors
    /// See [`NominatimClient::new`].
    pub fn from_config(config: &GeocodeConfig) -> GeocodeResult<Self> {
        Self::new(&config.base_url, &config.user_agent, &config.country_codes)
    }

    fn generic_url(&self, query: &str, limit: usize) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("countrycodes", &self.country_codes)
            .append_pair("format", "jsonv2")
            .append_pair("addressdetails", "1")
            .append_pair("extratags", "1")
            .append_pair("limit", &limit.to_string())
            .append_pair("q", query);
        url
    }

    fn structured_url(&self, house_number: &str, street_and_rest: &str, limit: usize) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("street", &format!("{house_number} {street_and_rest}"))
            .append_pair("countrycodes", &self.country_codes)
            .append_pair("format", "jsonv2")
            .append_pair("addressdetails", "1")
            .append_pair("limit", &limit.to_string());
        url
    }

    async fn fetch(&self, url: Url) -> GeocodeResult<Vec<PlaceRecord>> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Geocoding provider returned an error status");
            return Err(GeocodeError::Status {
                status: status.as_u16(),
            });
        }

        let records = response.json::<Vec<PlaceRecord>>().await?;
        tracing::trace!(count = records.len(), "Geocoding provider returned records");
        Ok(records)
    }
}

#[async_trait]
impl GeocodeProvider for NominatimClient {
    #[tracing::instrument(skip(self))]
    async fn generic_search(&self, query: &str, limit: usize) -> GeocodeResult<Vec<PlaceRecord>> {
        self.fetch(self.generic_url(query, limit)).await
    }

    #[tracing::instrument(skip(self))]
    async fn structured_search(
        &self,
        house_number: &str,
        street_and_rest: &str,
        limit: usize,
    ) -> GeocodeResult<Vec<PlaceRecord>> {
        self.fetch(self.structured_url(house_number, street_and_rest, limit))
            .await
    }
}
