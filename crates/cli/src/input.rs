use std::{collections::HashSet, io};
use stopmatch::recorder::MatchStore;

use crate::error::Error;

/// Reads every non-empty, trimmed address from the first column whose header
/// contains `hint` (case-insensitive).
pub fn read_addresses<R: io::Read>(reader: R, hint: &str) -> Result<Vec<String>, Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let hint = hint.to_lowercase();
    let column = reader
        .headers()?
        .iter()
        .position(|header| header.to_lowercase().contains(&hint))
        .ok_or_else(|| Error::MissingAddressColumn(hint.clone()))?;

    let mut addresses = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(address) = record.get(column).map(str::trim).filter(|a| !a.is_empty()) {
            addresses.push(address.to_string());
        }
    }
    Ok(addresses)
}

/// Picks up to `batch_size` addresses the store has not seen, in input order.
pub fn select_batch<S: MatchStore>(
    addresses: &[String],
    store: &S,
    batch_size: usize,
) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    addresses
        .iter()
        .filter(|address| !store.contains_address(address))
        .filter(|address| seen.insert(address.as_str()))
        .take(batch_size)
        .cloned()
        .collect()
}
