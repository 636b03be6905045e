use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use foodroute_protocols::{MatrixResponse, NoPause};

use super::*;

/// Answers each tile with `fill(source, destination)`, optionally dropping
/// the distances of one tile.
struct EchoBackend {
    requests: Mutex<Vec<MatrixRequest>>,
    fill: fn(usize, usize) -> Option<f64>,
    drop_distances_at_call: Option<usize>,
    short_row_at_call: Option<usize>,
}

impl EchoBackend {
    fn new(fill: fn(usize, usize) -> Option<f64>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fill,
            drop_distances_at_call: None,
            short_row_at_call: None,
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl MatrixBackend for EchoBackend {
    fn id(&self) -> &str {
        "echo"
    }

    async fn matrix(&self, request: &MatrixRequest) -> Result<MatrixResponse, MatrixError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };

        if self.drop_distances_at_call == Some(call) {
            return Ok(MatrixResponse { distances: None });
        }

        let mut distances: Vec<Vec<Option<f64>>> = request
            .sources
            .iter()
            .map(|&s| request.destinations.iter().map(|&d| (self.fill)(s, d)).collect())
            .collect();
        if self.short_row_at_call == Some(call) {
            distances[0].pop();
        }

        Ok(MatrixResponse {
            distances: Some(distances),
        })
    }
}

#[derive(Default)]
struct CountingPause(AtomicUsize);

#[async_trait]
impl RatePolicy for CountingPause {
    async fn pause(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn dublin_grid(n: usize) -> Vec<Location> {
    (0..n)
        .map(|i| Location::new(-6.26 + i as f64 * 0.001, 53.34 + i as f64 * 0.0005))
        .collect()
}

#[tokio::test]
async fn test_120_locations_all_ones_in_9_tiles() {
    let backend = EchoBackend::new(|_, _| Some(1.0));
    let matrix = compute_distance_matrix(&backend, &dublin_grid(120), 50, &NoPause)
        .await
        .unwrap();

    assert_eq!(backend.calls(), 9);
    assert_eq!(matrix.size(), 120);
    assert!(matrix.rows().all(|row| row.iter().all(|&v| v == Some(1.0))));
}

#[tokio::test]
async fn test_every_cell_written_from_its_tile() {
    let backend = EchoBackend::new(|s, d| Some((s * 1000 + d) as f64));
    let matrix = compute_distance_matrix(&backend, &dublin_grid(23), 5, &NoPause)
        .await
        .unwrap();

    assert_eq!(backend.calls(), 25);
    for i in 0..23 {
        for j in 0..23 {
            assert_eq!(matrix.get(i, j), Some((i * 1000 + j) as f64));
        }
    }
}

#[tokio::test]
async fn test_requests_carry_full_locations_in_row_major_order() {
    let backend = EchoBackend::new(|_, _| Some(0.0));
    let locations = dublin_grid(3);
    compute_distance_matrix(&backend, &locations, 2, &NoPause)
        .await
        .unwrap();

    let requests = backend.requests.lock().unwrap();
    let slices: Vec<(Vec<usize>, Vec<usize>)> = requests
        .iter()
        .map(|r| (r.sources.clone(), r.destinations.clone()))
        .collect();
    assert_eq!(
        slices,
        vec![
            (vec![0, 1], vec![0, 1]),
            (vec![0, 1], vec![2]),
            (vec![2], vec![0, 1]),
            (vec![2], vec![2]),
        ]
    );
    for request in requests.iter() {
        assert_eq!(request.locations.len(), 3);
        assert_eq!(request.locations[0], [-6.26, 53.34]);
        assert_eq!(request.metrics, vec!["distance".to_string()]);
    }
}

#[tokio::test]
async fn test_pauses_between_tiles_only() {
    let backend = EchoBackend::new(|_, _| Some(1.0));
    let pause = CountingPause::default();
    compute_distance_matrix(&backend, &dublin_grid(120), 50, &pause)
        .await
        .unwrap();
    assert_eq!(pause.0.load(Ordering::SeqCst), 8);

    let single = CountingPause::default();
    compute_distance_matrix(&backend, &dublin_grid(10), 50, &single)
        .await
        .unwrap();
    assert_eq!(single.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_distances_aborts_remaining_tiles() {
    let mut backend = EchoBackend::new(|_, _| Some(1.0));
    backend.drop_distances_at_call = Some(4);

    let err = compute_distance_matrix(&backend, &dublin_grid(120), 50, &NoPause)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MatrixError::MissingDistances {
            row_block: 1,
            col_block: 1
        }
    ));
    assert_eq!(backend.calls(), 5);
}

#[tokio::test]
async fn test_wrong_shape_is_an_error() {
    let mut backend = EchoBackend::new(|_, _| Some(1.0));
    backend.short_row_at_call = Some(0);

    let err = compute_distance_matrix(&backend, &dublin_grid(4), 2, &NoPause)
        .await
        .unwrap_err();

    match err {
        MatrixError::ShapeMismatch {
            row_block,
            col_block,
            expected_rows,
            expected_cols,
        } => {
            assert_eq!((row_block, col_block), (0, 0));
            assert_eq!((expected_rows, expected_cols), (2, 2));
        }
        other => panic!("Expected ShapeMismatch, got {:?}", other),
    }
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_missing_coordinate_fails_before_any_request() {
    let backend = EchoBackend::new(|_, _| Some(1.0));
    let mut locations = dublin_grid(5);
    locations[3] = Location {
        lng: Some(-6.2),
        lat: None,
    };

    let err = compute_distance_matrix(&backend, &locations, 2, &NoPause)
        .await
        .unwrap_err();

    assert!(matches!(err, MatrixError::MissingCoordinate { index: 3 }));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_null_cells_are_kept() {
    let backend = EchoBackend::new(|s, d| if s == d { None } else { Some(10.0) });
    let matrix = compute_distance_matrix(&backend, &dublin_grid(3), 50, &NoPause)
        .await
        .unwrap();
    assert_eq!(matrix.get(1, 1), None);
    assert_eq!(matrix.get(1, 2), Some(10.0));
}

#[tokio::test]
async fn test_empty_input() {
    let backend = EchoBackend::new(|_, _| Some(1.0));
    let matrix = compute_distance_matrix(&backend, &[], 50, &NoPause).await.unwrap();
    assert_eq!(matrix.size(), 0);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_zero_tile_size() {
    let backend = EchoBackend::new(|_, _| Some(1.0));
    let err = compute_distance_matrix(&backend, &dublin_grid(3), 0, &NoPause)
        .await
        .unwrap_err();
    assert!(matches!(err, MatrixError::InvalidTileSize));
}
