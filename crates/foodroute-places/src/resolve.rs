//! Batch resolution.

use foodroute_protocols::{PlaceError, PlaceRecord, PlaceResolver, RatePolicy};
use tracing::{info, warn};

/// Resolve each name in order, one at a time.
///
/// Returns one record per name, index-aligned with `names`. A name the
/// resolver fails on yields [`PlaceRecord::unresolved`]; the batch carries
/// on. `pacing` runs between consecutive names, not after the last one.
pub async fn resolve_places(
    resolver: &dyn PlaceResolver,
    names: &[String],
    pacing: &dyn RatePolicy,
) -> Result<Vec<PlaceRecord>, PlaceError> {
    if names.is_empty() {
        return Err(PlaceError::EmptyInput);
    }

    let mut records = Vec::with_capacity(names.len());

    for (index, name) in names.iter().enumerate() {
        let trimmed = name.trim();
        info!("Searching for: {}", trimmed);

        let record = match resolver.resolve(trimmed).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Could not resolve {} via {}: {}", trimmed, resolver.id(), e);
                PlaceRecord::unresolved(trimmed)
            }
        };
        records.push(record);

        if index + 1 < names.len() {
            pacing.pause().await;
        }
    }

    let resolved = records.iter().filter(|r| r.is_resolved()).count();
    info!("Resolved {} of {} places", resolved, records.len());
    Ok(records)
}
