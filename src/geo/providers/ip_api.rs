//! IP-geolocation last-known-position provider.
//!
//! Queries an ip-api.com-style `/json` endpoint for the coarse position of
//! the machine's public IP. This is the terminal analog of a platform's
//! cached last-known fix: cheap, possibly stale, and sometimes absent.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::geo::locate::{LocateError, LocationProvider};
use crate::geo::types::Coordinate;

/// Response body of `/json`. On `status: "fail"` the coordinates are
/// omitted and `message` says why (private range, quota, ...).
#[derive(Deserialize, Debug)]
struct LookupResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

/// Location provider backed by an IP-geolocation HTTP service.
pub struct IpApiLocator {
    base_url: String,
    client: reqwest::Client,
}

impl IpApiLocator {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LocationProvider for IpApiLocator {
    fn name(&self) -> &str {
        "ip"
    }

    async fn last_known(&self) -> Result<Option<Coordinate>, LocateError> {
        let url = format!("{}/json?fields=status,message,lat,lon", self.base_url);
        info!("IP geolocation lookup: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LocateError::Network(e.to_string()))?;

        debug!("IP geolocation response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("IP geolocation API error: {} - {}", status, err_body);
            return Err(LocateError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LocateError::Network(e.to_string()))?;
        let parsed: LookupResponse =
            serde_json::from_str(&body).map_err(|e| LocateError::Parse(e.to_string()))?;

        if parsed.status != "success" {
            // The service answered but has no fix for this IP
            debug!(
                "IP geolocation has no fix: {}",
                parsed.message.as_deref().unwrap_or("no reason given")
            );
            return Ok(None);
        }

        match (parsed.lat, parsed.lon) {
            (Some(lat), Some(lon)) => Ok(Some(Coordinate::new(lat, lon))),
            _ => Err(LocateError::Parse(
                "success response missing lat/lon".to_string(),
            )),
        }
    }
}
