//! Nominatim (OpenStreetMap) reverse-geocoding resolver.
//!
//! Uses the `/reverse` endpoint with `format=jsonv2`, which returns at most
//! one candidate. Its `display_name` is the formatted address line. A point
//! with no address comes back as `200 OK` with an `error` field in the body,
//! not as an HTTP error — that case maps to `Ok(None)`.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::geo::resolver::{AddressResolver, GeocodeError};
use crate::geo::types::Coordinate;

/// Response body of `/reverse`. Exactly one of `display_name` and `error`
/// is present in practice; both are optional so either shape parses.
#[derive(Deserialize, Debug)]
struct ReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

/// Builds the `/reverse` request URL for a coordinate.
fn reverse_url(base_url: &str, position: Coordinate) -> String {
    format!(
        "{}/reverse?format=jsonv2&lat={}&lon={}&addressdetails=0",
        base_url, position.lat, position.lon
    )
}

/// Reverse-geocoding resolver backed by a Nominatim instance.
pub struct NominatimResolver {
    base_url: String,
    user_agent: String,
    client: reqwest::Client,
}

impl NominatimResolver {
    /// Creates a new Nominatim resolver.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Nominatim instance
    /// * `user_agent` - User-Agent header value; Nominatim's usage policy
    ///   requires an identifying one
    pub fn new(base_url: String, user_agent: String) -> Self {
        Self {
            base_url,
            user_agent,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AddressResolver for NominatimResolver {
    fn name(&self) -> &str {
        "nominatim"
    }

    async fn resolve(&self, position: Coordinate) -> Result<Option<String>, GeocodeError> {
        let url = reverse_url(&self.base_url, position);
        info!("Nominatim reverse lookup: {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        debug!("Nominatim response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Nominatim API error: {} - {}", status, err_body);
            return Err(GeocodeError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodeError::Network(e.to_string()))?;
        let parsed: ReverseResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Parse(e.to_string()))?;

        if let Some(reason) = parsed.error {
            // "Unable to geocode" — the point has no address, not a failure
            debug!("Nominatim returned no address: {}", reason);
            return Ok(None);
        }

        Ok(parsed.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_url_encodes_coordinate() {
        let url = reverse_url("https://nominatim.example", Coordinate::new(10.0, 20.0));
        assert_eq!(
            url,
            "https://nominatim.example/reverse?format=jsonv2&lat=10&lon=20&addressdetails=0"
        );
    }

    #[test]
    fn test_reverse_url_keeps_negative_longitude() {
        let url = reverse_url("http://localhost:8080", Coordinate::new(37.4221, -122.0841));
        assert!(url.contains("lat=37.4221"));
        assert!(url.contains("lon=-122.0841"));
    }

    #[test]
    fn test_reverse_response_parses_display_name() {
        let json = r#"{"place_id":123,"display_name":"123 Main St, Springfield"}"#;
        let parsed: ReverseResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.display_name.as_deref(),
            Some("123 Main St, Springfield")
        );
        assert!(parsed.error.is_none());
    }

    #[test]
    fn test_reverse_response_parses_error_body() {
        let json = r#"{"error":"Unable to geocode"}"#;
        let parsed: ReverseResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.display_name.is_none());
        assert_eq!(parsed.error.as_deref(), Some("Unable to geocode"));
    }
}
