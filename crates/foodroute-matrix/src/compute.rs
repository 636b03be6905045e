//! Tiled distance-matrix computation.

use foodroute_protocols::{Location, MatrixBackend, MatrixError, MatrixRequest, RatePolicy};
use tracing::{debug, info};

use crate::matrix::DistanceMatrix;
use crate::tiles::{plan_tiles, Tile};

/// Compute the full N×N distance matrix for `locations`.
///
/// Issues `ceil(N / tile_size)²` requests, one per tile, in row-major order,
/// each carrying the full location list. `pacing` runs between tiles but not
/// after the last one. Every location must have both coordinates; otherwise
/// this fails before the first request. The first tile whose response has
/// no distances, or distances of the wrong shape, aborts the computation.
pub async fn compute_distance_matrix(
    backend: &dyn MatrixBackend,
    locations: &[Location],
    tile_size: usize,
    pacing: &dyn RatePolicy,
) -> Result<DistanceMatrix, MatrixError> {
    let tiles = plan_tiles(locations.len(), tile_size)?;

    let coordinates = locations
        .iter()
        .enumerate()
        .map(|(index, location)| location.lng_lat().ok_or(MatrixError::MissingCoordinate { index }))
        .collect::<Result<Vec<_>, _>>()?;

    let mut matrix = DistanceMatrix::new(locations.len());
    info!(
        "Computing {n}×{n} matrix in {} tiles via {}",
        tiles.len(),
        backend.id(),
        n = locations.len()
    );

    for (index, tile) in tiles.iter().enumerate() {
        let request = MatrixRequest::distances(coordinates.clone(), tile.sources(), tile.destinations());
        debug!(
            "Tile r={} c={}: sources {:?} destinations {:?}",
            tile.row_block, tile.col_block, tile.rows, tile.cols
        );

        let response = backend.matrix(&request).await?;
        let distances = response.distances.ok_or(MatrixError::MissingDistances {
            row_block: tile.row_block,
            col_block: tile.col_block,
        })?;
        write_tile(&mut matrix, tile, distances)?;

        if index + 1 < tiles.len() {
            pacing.pause().await;
        }
    }

    Ok(matrix)
}

fn write_tile(
    matrix: &mut DistanceMatrix,
    tile: &Tile,
    distances: Vec<Vec<Option<f64>>>,
) -> Result<(), MatrixError> {
    let shape_ok = distances.len() == tile.rows.len()
        && distances.iter().all(|row| row.len() == tile.cols.len());
    if !shape_ok {
        return Err(MatrixError::ShapeMismatch {
            row_block: tile.row_block,
            col_block: tile.col_block,
            expected_rows: tile.rows.len(),
            expected_cols: tile.cols.len(),
        });
    }

    for (i, row) in distances.into_iter().enumerate() {
        for (j, value) in row.into_iter().enumerate() {
            matrix.set(tile.rows.start + i, tile.cols.start + j, value);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "compute_tests.rs"]
mod tests;
