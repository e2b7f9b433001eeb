use std::io;
use stopmatch::{export, recorder, source};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to load geometries: {0}")]
    Source(#[from] source::Error),
    #[error("Failed to record matches: {0}")]
    Recorder(#[from] recorder::Error),
    #[error("Failed to export map: {0}")]
    Export(#[from] export::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid geocoding url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("No column containing \"{0}\" in the input header")]
    MissingAddressColumn(String),
    #[error("Geocoding failed: {0}")]
    Geocode(String),
}
