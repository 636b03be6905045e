//! # foodroute matrix
//!
//! Pairwise road distances between resolved places.
//!
//! A keyed place map becomes three aligned sequences
//! ([`build_labels_and_locations`]). The N×N distance matrix is then computed
//! in fixed-size source × destination tiles, one [`MatrixBackend`] call per
//! tile, strictly in row-major order ([`compute_distance_matrix`]), and
//! written out as CSV ([`save_matrix_csv`]).
//!
//! [`MatrixBackend`]: foodroute_protocols::MatrixBackend

mod compute;
mod csv;
mod labels;
mod matrix;
mod ors;
mod tiles;

pub use compute::compute_distance_matrix;
pub use csv::{render_matrix_csv, save_matrix_csv};
pub use labels::{build_labels_and_locations, LabeledLocationSet};
pub use matrix::DistanceMatrix;
pub use ors::OrsClient;
pub use tiles::{plan_tiles, Tile};
