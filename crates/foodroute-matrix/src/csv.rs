//! Matrix CSV export.

use std::fmt::Write as _;
use std::path::Path;

use foodroute_protocols::MatrixError;
use tracing::info;

use crate::matrix::DistanceMatrix;

const HEADER_CORNER: &str = "place_id";

/// Render the matrix with `ids` as both header row and row labels.
///
/// Numeric cells use two decimals, unknown cells are empty. Lines are joined
/// with `\n` and there is no trailing newline.
pub fn render_matrix_csv(ids: &[String], matrix: &DistanceMatrix) -> String {
    let mut lines = Vec::with_capacity(ids.len() + 1);

    let mut header = String::from(HEADER_CORNER);
    for id in ids {
        header.push(',');
        header.push_str(id);
    }
    lines.push(header);

    for (id, row) in ids.iter().zip(matrix.rows()) {
        let mut line = id.clone();
        for cell in row {
            line.push(',');
            if let Some(value) = cell {
                let _ = write!(line, "{:.2}", value);
            }
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Write the CSV to `path`, creating parent directories and replacing any
/// existing file.
pub async fn save_matrix_csv(
    path: &Path,
    ids: &[String],
    matrix: &DistanceMatrix,
) -> Result<(), MatrixError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, render_matrix_csv(ids, matrix)).await?;
    info!("Saved matrix CSV: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_place_output_is_exact() {
        let matrix = DistanceMatrix::from(vec![
            vec![Some(0.0), Some(1500.4)],
            vec![Some(1500.4), Some(0.0)],
        ]);
        assert_eq!(
            render_matrix_csv(&ids(&["p1", "p2"]), &matrix),
            "place_id,p1,p2\np1,0.00,1500.40\np2,1500.40,0.00"
        );
    }

    #[test]
    fn test_unknown_cells_are_empty() {
        let matrix = DistanceMatrix::from(vec![vec![Some(0.0), None], vec![None, Some(0.0)]]);
        assert_eq!(
            render_matrix_csv(&ids(&["a", "b"]), &matrix),
            "place_id,a,b\na,0.00,\nb,,0.00"
        );
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let matrix = DistanceMatrix::from(vec![vec![Some(1234.5678)]]);
        assert_eq!(render_matrix_csv(&ids(&["x"]), &matrix), "place_id,x\nx,1234.57");
    }

    #[test]
    fn test_empty_matrix_is_header_only() {
        assert_eq!(render_matrix_csv(&[], &DistanceMatrix::new(0)), "place_id");
    }

    #[tokio::test]
    async fn test_save_creates_parents_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports/nested/matrix.csv");
        let matrix = DistanceMatrix::from(vec![vec![Some(0.0)]]);

        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "stale content that is much longer").await.unwrap();

        save_matrix_csv(&path, &ids(&["p1"]), &matrix).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "place_id,p1\np1,0.00");
    }

    #[tokio::test]
    async fn test_save_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.csv");
        save_matrix_csv(&path, &[], &DistanceMatrix::new(0)).await.unwrap();
        assert!(path.exists());
    }
}
