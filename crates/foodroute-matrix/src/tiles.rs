//! Tile planning.

use std::ops::Range;

use foodroute_protocols::MatrixError;

/// One source × destination block of the matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub row_block: usize,
    pub col_block: usize,
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl Tile {
    pub fn sources(&self) -> Vec<usize> {
        self.rows.clone().collect()
    }

    pub fn destinations(&self) -> Vec<usize> {
        self.cols.clone().collect()
    }
}

/// Partition `[0, n) × [0, n)` into `ceil(n / tile)²` tiles, row-major.
pub fn plan_tiles(n: usize, tile: usize) -> Result<Vec<Tile>, MatrixError> {
    if tile == 0 {
        return Err(MatrixError::InvalidTileSize);
    }

    let blocks = n.div_ceil(tile);
    let range = |block: usize| {
        let start = block * tile;
        start..(start + tile).min(n)
    };

    let mut tiles = Vec::with_capacity(blocks * blocks);
    for row_block in 0..blocks {
        for col_block in 0..blocks {
            tiles.push(Tile {
                row_block,
                col_block,
                rows: range(row_block),
                cols: range(col_block),
            });
        }
    }
    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_120_by_50() {
        let tiles = plan_tiles(120, 50).unwrap();
        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles[0].rows, 0..50);
        assert_eq!(tiles[2].cols, 100..120);
        assert_eq!((tiles[3].row_block, tiles[3].col_block), (1, 0));
        assert_eq!(tiles[8].rows, 100..120);
    }

    #[test]
    fn test_tiles_cover_every_cell_once() {
        for (n, tile) in [(1, 1), (7, 3), (50, 50), (51, 50), (120, 50), (10, 100)] {
            let mut hits = vec![0u32; n * n];
            for t in plan_tiles(n, tile).unwrap() {
                assert!(t.rows.len() <= tile && t.cols.len() <= tile);
                for i in t.rows.clone() {
                    for j in t.cols.clone() {
                        hits[i * n + j] += 1;
                    }
                }
            }
            assert!(hits.iter().all(|&h| h == 1), "n={} tile={}", n, tile);
        }
    }

    #[test]
    fn test_zero_tile_rejected() {
        assert!(matches!(plan_tiles(10, 0), Err(MatrixError::InvalidTileSize)));
    }

    #[test]
    fn test_empty_input_has_no_tiles() {
        assert!(plan_tiles(0, 50).unwrap().is_empty());
    }

    #[test]
    fn test_index_slices() {
        let tile = &plan_tiles(5, 2).unwrap()[5];
        assert_eq!(tile.sources(), vec![2, 3]);
        assert_eq!(tile.destinations(), vec![4]);
    }
}
