use std::{fs::File, time::Instant};
use stopmatch::{export, prelude::*, source};
use tracing::{debug, info};

use crate::{
    args::Config,
    error::Error,
    geocode::{self, Geocoder, HereGeocoder},
    input,
};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Summary {
    pub selected: usize,
    pub geocoded: usize,
    pub recorded: usize,
    pub total: usize,
}

pub async fn run(config: Config) -> Result<Summary, Error> {
    let geocoder = HereGeocoder::new(&config.geocode_url, &config.api_key, config.timeout)?;
    run_with(config, &geocoder).await
}

/// One batch: load geometries, geocode new addresses, match, record, save.
/// Geometries are loaded first so a broken route tree fails before any API
/// call is spent.
pub async fn run_with<G: Geocoder>(config: Config, geocoder: &G) -> Result<Summary, Error> {
    let now = Instant::now();
    let geometries = GeometrySource::new(source::Config::default()).load(&config.routes)?;

    let store = CsvStore::open(&config.output)?;
    let addresses = input::read_addresses(File::open(&config.input)?, &config.address_column)?;
    let batch = input::select_batch(&addresses, &store, config.batch_size);
    info!(
        "{} addresses in input, {} already recorded, geocoding {}",
        addresses.len(),
        store.len(),
        batch.len()
    );

    let points =
        geocode::geocode_batch(geocoder, &batch, &config.address_suffix, config.delay).await;
    let results = match_all(&points, &geometries.routes, &geometries.stops);
    for result in &results {
        match (&result.route_label, &result.stop_label, result.distance) {
            (Some(route), Some(stop), Some(distance)) => {
                debug!("{} -> {route} / {stop} ({distance})", result.query.source_address)
            }
            (Some(route), _, _) => {
                debug!("{} -> {route}, no stops on route", result.query.source_address)
            }
            _ => debug!("{} -> no route", result.query.source_address),
        }
    }

    let mut recorder = MatchRecorder::new(store);
    let recorded = results.iter().filter(|result| recorder.record(result)).count();
    let store = recorder.into_store();
    store.save()?;
    info!("Saved {} rows to {}", store.len(), store.path().display());

    if let Some(path) = &config.map_output {
        export::write(path, export::to_feature_collection(&geometries, &results))?;
    }

    debug!("Batch took {:?}", now.elapsed());
    Ok(Summary {
        selected: batch.len(),
        geocoded: points.len(),
        recorded,
        total: store.len(),
    })
}
