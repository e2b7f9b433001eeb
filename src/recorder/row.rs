use serde::{Deserialize, Serialize};

use crate::matcher::MatchResult;

/// Flat output record. Field order is the column order of the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub route: Option<String>,
    pub route_label: Option<String>,
    pub stop: Option<String>,
    pub stop_latitude: Option<f64>,
    pub stop_longitude: Option<f64>,
    #[serde(rename = "distance_m")]
    pub distance_meters: Option<f64>,
}

/// Dedup key: address plus the exact bits of the geocoded position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    address: String,
    latitude: u64,
    longitude: u64,
}

impl MatchRow {
    /// Header of the output file, in field order.
    pub const COLUMNS: [&'static str; 9] = [
        "address",
        "latitude",
        "longitude",
        "route",
        "route_label",
        "stop",
        "stop_latitude",
        "stop_longitude",
        "distance_m",
    ];

    pub fn key(&self) -> RowKey {
        RowKey {
            address: self.address.clone(),
            latitude: self.latitude.to_bits(),
            longitude: self.longitude.to_bits(),
        }
    }
}

impl From<&MatchResult> for MatchRow {
    fn from(value: &MatchResult) -> Self {
        Self {
            address: value.query.source_address.to_string(),
            latitude: value.query.position.latitude,
            longitude: value.query.position.longitude,
            route: value.route_id.as_deref().map(str::to_string),
            route_label: value.route_label.as_deref().map(str::to_string),
            stop: value.stop_label.as_deref().map(str::to_string),
            stop_latitude: value.stop_position.map(|position| position.latitude),
            stop_longitude: value.stop_position.map(|position| position.longitude),
            distance_meters: value.distance.map(|distance| distance.as_meters()),
        }
    }
}
