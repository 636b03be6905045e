//! Distance matrix command.

use std::path::Path;

use tracing::info;

use foodroute_config::Config;
use foodroute_matrix::{build_labels_and_locations, compute_distance_matrix, save_matrix_csv, OrsClient};
use foodroute_protocols::{load_typed, FixedPause, KeyValueStore, PlaceMap};

/// Build the matrix for the places stored under `source_key` and write it to
/// `output`.
pub(crate) async fn matrix(
    config: &Config,
    store: &dyn KeyValueStore,
    source_key: &str,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(places) = load_typed::<PlaceMap>(store, source_key).await? else {
        return Err(format!("No {} in store", source_key).into());
    };

    let set = build_labels_and_locations(&places);
    let client = OrsClient::from_config(&config.routing)?;
    let pacing = FixedPause::from_millis(config.routing.pause_ms);

    let distances =
        compute_distance_matrix(&client, &set.locations, config.routing.tile_size, &pacing).await?;
    save_matrix_csv(output, &set.ids, &distances).await?;

    info!("Matrix built: {}×{}", set.labels.len(), set.labels.len());
    Ok(())
}
