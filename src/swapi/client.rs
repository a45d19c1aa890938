use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::types::*;
use crate::config::Config;
use crate::error::{HolocronError, Result};

const USER_AGENT: &str = concat!("holocron/", env!("CARGO_PKG_VERSION"));

/// Remote lookups the search engine depends on
///
/// Both calls are read-only. `NotFound` means the API answered but had no
/// match; any other error is a transport failure.
pub trait CharacterSource {
    /// Find the first character whose name matches `name`
    fn find_character(&self, name: &str) -> Result<Character>;

    /// Fetch the homeworld behind a character's homeworld reference
    fn fetch_homeworld(&self, reference: &str) -> Result<Homeworld>;
}

/// SWAPI client
pub struct SwapiClient {
    client: Client,
    base_url: Url,
}

impl SwapiClient {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.api.base_url, config.timeout())
    }

    /// Create a new client against an explicit base URL
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            HolocronError::Config(format!("Invalid API base URL '{base_url}': {e}"))
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request and decode the JSON body
    fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "GET");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(HolocronError::api(status.as_u16(), message));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(HolocronError::Json)
    }

    /// Base URL as a string without trailing slash
    fn base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Only follow homeworld references that point back at the configured API
    fn validate_homeworld_url(&self, reference: &str) -> Result<Url> {
        let parsed = Url::parse(reference).map_err(|_| {
            HolocronError::InvalidArgument(format!("Invalid homeworld URL: {reference}"))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(HolocronError::InvalidArgument(format!(
                "Homeworld URL has unsupported scheme: {reference}"
            )));
        }

        // http and https are interchangeable; an explicit port must match
        let same_host = parsed.host_str().is_some()
            && parsed.host_str() == self.base_url.host_str()
            && parsed.port() == self.base_url.port();

        if !same_host {
            return Err(HolocronError::InvalidArgument(format!(
                "Homeworld URL from untrusted host: {}",
                parsed.host_str().unwrap_or("<none>")
            )));
        }

        Ok(parsed)
    }
}

impl CharacterSource for SwapiClient {
    fn find_character(&self, name: &str) -> Result<Character> {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("search", name)
            .finish();

        let response: PeopleSearchResponse =
            self.get(&format!("{}/people/?{query}", self.base()))?;

        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| HolocronError::NotFound(format!("no character matches '{name}'")))
    }

    fn fetch_homeworld(&self, reference: &str) -> Result<Homeworld> {
        let url = self.validate_homeworld_url(reference)?;
        self.get(url.as_str())
    }
}
