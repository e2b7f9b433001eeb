//! Address geocoding through the HERE geocode API.

use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use stopmatch::prelude::*;
use tracing::{info, warn};

use crate::error::Error;

pub const DEFAULT_GEOCODE_URL: &str = "https://geocode.search.hereapi.com/v1/geocode";

pub trait Geocoder {
    /// Resolves `query` to a coordinate. `Ok(None)` when nothing was found.
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, Error>;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    items: Vec<GeocodeItem>,
}

#[derive(Debug, Deserialize)]
struct GeocodeItem {
    position: Position,
}

#[derive(Debug, Deserialize)]
struct Position {
    lat: f64,
    lng: f64,
}

impl GeocodeResponse {
    fn first_coordinate(&self) -> Option<Coordinate> {
        self.items
            .first()
            .map(|item| Coordinate::new(item.position.lat, item.position.lng))
    }
}

#[derive(Debug, Clone)]
pub struct HereGeocoder {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl HereGeocoder {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, Error> {
        let base_url = Url::parse(base_url).map_err(|err| Error::InvalidUrl {
            url: base_url.to_string(),
            message: err.to_string(),
        })?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    fn request_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("apiKey", &self.api_key);
        url
    }
}

impl Geocoder for HereGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, Error> {
        let response = self.http.get(self.request_url(query)).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Geocode(format!("{status}: {body}")));
        }
        let body: GeocodeResponse = response.json().await?;
        Ok(body.first_coordinate())
    }
}

/// Geocodes `addresses` one at a time, sleeping `delay` after every call to
/// stay under the API rate limit. Addresses that fail or resolve to nothing
/// are logged and dropped.
pub async fn geocode_batch<G: Geocoder>(
    geocoder: &G,
    addresses: &[String],
    suffix: &str,
    delay: Duration,
) -> Vec<QueryPoint> {
    let mut points = Vec::with_capacity(addresses.len());
    for address in addresses {
        let query = format!("{address}{suffix}");
        match geocoder.geocode(&query).await {
            Ok(Some(coordinate)) => {
                info!("{query} -> {coordinate}");
                points.push(QueryPoint::new(address, coordinate));
            }
            Ok(None) => warn!("No result for {query}"),
            Err(err) => warn!("Geocoding {query} failed: {err}"),
        }
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeGeocoder(HashMap<&'static str, Coordinate>);

    impl Geocoder for FakeGeocoder {
        async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, Error> {
            if query.starts_with("boom") {
                return Err(Error::Geocode("503 Service Unavailable".into()));
            }
            Ok(self.0.get(query).copied())
        }
    }

    #[test]
    fn parses_here_response() {
        let body = r#"{
            "items": [
                {
                    "title": "Calle 26, Bogotá, Colombia",
                    "position": { "lat": 4.65715, "lng": -74.09461 },
                    "resultType": "street"
                },
                { "position": { "lat": 1.0, "lng": 2.0 } }
            ]
        }"#;
        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.first_coordinate(),
            Some(Coordinate::new(4.65715, -74.09461))
        );
    }

    #[test]
    fn empty_here_response() {
        let response: GeocodeResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.first_coordinate(), None);
    }

    #[test]
    fn request_url_encodes_query() {
        let geocoder =
            HereGeocoder::new(DEFAULT_GEOCODE_URL, "key", Duration::from_secs(1)).unwrap();
        let url = geocoder.request_url("Calle 26 # 68, Bogotá");
        let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["q"], "Calle 26 # 68, Bogotá");
        assert_eq!(pairs["apiKey"], "key");
        assert_eq!(url.path(), "/v1/geocode");
    }

    #[test]
    fn invalid_url_is_rejected() {
        let result = HereGeocoder::new("not a url", "key", Duration::from_secs(1));
        assert!(matches!(result, Err(Error::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn batch_drops_failures() {
        let geocoder = FakeGeocoder(HashMap::from([
            ("Calle 1, Bogotá", Coordinate::new(4.6, -74.1)),
            ("Calle 3, Bogotá", Coordinate::new(4.7, -74.0)),
        ]));
        let addresses = vec![
            "Calle 1".to_string(),
            "Calle 2".to_string(),
            "boom".to_string(),
            "Calle 3".to_string(),
        ];
        let points = geocode_batch(&geocoder, &addresses, ", Bogotá", Duration::ZERO).await;
        let found: Vec<_> = points
            .iter()
            .map(|point| point.source_address.as_ref())
            .collect();
        assert_eq!(found, ["Calle 1", "Calle 3"]);
        assert_eq!(points[1].position, Coordinate::new(4.7, -74.0));
    }
}
