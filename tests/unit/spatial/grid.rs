//! Tests for board storage, piece derivation and board symmetries

#[cfg(test)]
mod tests {
    use edgematch::TilingError;
    use edgematch::spatial::edges::EdgeSet;
    use edgematch::spatial::grid::Grid;
    use edgematch::spatial::piece::Piece;
    use ndarray::{Array2, array};
    use proptest::{prop_assert_eq, proptest};
    use std::sync::Arc;

    fn pairs() -> Arc<EdgeSet> {
        Arc::new(EdgeSet::pairs(2).unwrap())
    }

    // Corner pieces {1,1}, {2,3}, {2,4} and {3,4}
    fn two_by_two() -> Grid {
        let mut grid = Grid::new(2, 2, pairs());
        grid.horizontal_mut()[[0, 1]] = 1;
        grid.horizontal_mut()[[1, 1]] = 4;
        grid.vertical_mut()[[1, 0]] = 1;
        grid.vertical_mut()[[1, 1]] = 3;
        grid
    }

    fn random_grid(rows: usize, cols: usize, labels: &[u8]) -> Grid {
        let mut grid = Grid::new(rows, cols, Arc::new(EdgeSet::standard()));
        let mut next = labels.iter().copied().cycle();
        grid.randomize(|| next.next().unwrap_or(0));
        grid
    }

    // Tests edge array shapes of a new board
    // Verified by allocating square edge arrays
    #[test]
    fn test_new_shapes() {
        let grid = Grid::new(2, 3, pairs());

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.horizontal().dim(), (2, 4));
        assert_eq!(grid.vertical().dim(), (3, 3));
        assert!(grid.horizontal().iter().all(|&edge| edge == 0));
    }

    // Tests pieces read the left and top edges through the opposite label
    // Verified by reading left and top edges unchanged
    #[test]
    fn test_at_derives_pieces() {
        let grid = two_by_two();

        assert_eq!(grid.at(0, 0), Some(Piece::new(1, 0, 0, 1)));
        assert_eq!(grid.at(0, 1), Some(Piece::new(0, 0, 2, 3)));
        assert_eq!(grid.at(1, 0), Some(Piece::new(4, 2, 0, 0)));
        assert_eq!(grid.at(1, 1), Some(Piece::new(0, 4, 3, 0)));
        assert_eq!(grid.at(2, 0), None);
        assert_eq!(grid.at(0, 2), None);
    }

    // Tests validated construction from edge arrays
    // Verified by skipping the vertical shape check
    #[test]
    fn test_from_edges() {
        let grid = two_by_two();
        let rebuilt =
            Grid::from_edges(grid.horizontal().clone(), grid.vertical().clone(), pairs()).unwrap();
        assert_eq!(rebuilt, grid);

        let result = Grid::from_edges(Array2::zeros((2, 3)), Array2::zeros((2, 2)), pairs());
        assert!(matches!(result, Err(TilingError::InvalidShape { .. })));
    }

    // Tests assembling pieces back into the same board
    // Verified by storing west labels without the opposite
    #[test]
    fn test_from_pieces_round_trip() {
        let grid = two_by_two();
        let rebuilt = Grid::from_pieces(&grid.pieces(), pairs()).unwrap();
        assert_eq!(rebuilt, grid);
    }

    // Tests neighbours that do not interlock are rejected
    // Verified by removing the west edge check
    #[test]
    fn test_from_pieces_incompatible() {
        let pieces = array![[Piece::new(1, 0, 0, 0), Piece::new(0, 0, 1, 0)]];
        let result = Grid::from_pieces(&pieces, pairs());

        assert!(matches!(
            result,
            Err(TilingError::Incompatible { row: 0, col: 1, .. })
        ));
    }

    // Tests a piece is checked against the south edge of the piece above
    // Verified by comparing the north edge with the north edge above
    #[test]
    fn test_from_pieces_incompatible_below() {
        let pieces = array![[Piece::new(0, 0, 0, 3)], [Piece::new(0, 3, 0, 0)]];
        let result = Grid::from_pieces(&pieces, pairs());

        let Err(TilingError::Incompatible { row, col, reason }) = result else {
            panic!("expected an incompatible column");
        };
        assert_eq!((row, col), (1, 0));
        assert_eq!(reason, "north edge 3 against 3");

        let pieces = array![[Piece::new(0, 0, 0, 3)], [Piece::new(0, 4, 0, 0)]];
        assert!(Grid::from_pieces(&pieces, pairs()).is_ok());
    }

    // Tests randomisation leaves the perimeter untouched
    // Verified by including column 0 in the horizontal loop
    #[test]
    fn test_randomize_internal_only() {
        let mut grid = Grid::new(2, 3, pairs());
        grid.randomize(|| 1);

        assert_eq!(grid.horizontal()[[0, 0]], 0);
        assert_eq!(grid.horizontal()[[1, 3]], 0);
        assert_eq!(grid.vertical()[[0, 1]], 0);
        assert_eq!(grid.vertical()[[2, 2]], 0);
        assert_eq!(grid.horizontal()[[0, 1]], 1);
        assert_eq!(grid.vertical()[[1, 2]], 1);
        assert_eq!(grid.horizontal().sum() + grid.vertical().sum(), 4 + 3);
    }

    // Tests rotation moves cells clockwise and rotates their pieces
    // Verified by negating the rotated vertical edges
    #[test]
    fn test_rotate_moves_cells() {
        let grid = random_grid(2, 3, &[1, 7, 25, 14, 3, 20, 9]);
        let rotated = grid.rotate();

        assert_eq!((rotated.rows(), rotated.cols()), (3, 2));
        for row in 0..2 {
            for col in 0..3 {
                let piece = grid.at(row, col).unwrap();
                assert_eq!(rotated.at(col, 1 - row), Some(piece.rotate()));
            }
        }
    }

    // Tests reflection transposes cells and flips their pieces
    // Verified by omitting the label flip on horizontal edges
    #[test]
    fn test_flip_transposes_cells() {
        let grid = random_grid(2, 3, &[1, 7, 25, 14, 3, 20, 9]);
        let flipped = grid.flip();
        let edges = grid.edge_set().clone();

        assert_eq!((flipped.rows(), flipped.cols()), (3, 2));
        for row in 0..2 {
            for col in 0..3 {
                let piece = grid.at(row, col).unwrap();
                assert_eq!(flipped.at(col, row), Some(piece.flip(&edges)));
            }
        }
        assert_eq!(flipped.flip(), grid);
    }

    // Tests the orbit contains 8 boards ending back at the start
    // Verified by rotating the flipped board one time too few
    #[test]
    fn test_orbit() {
        let grid = two_by_two();
        let orbit = grid.orbit();

        assert_eq!(orbit.len(), 8);
        assert_eq!(orbit[0], grid);
        assert_eq!(orbit[3].rotate(), grid);
        assert_eq!(orbit[4], grid.flip());
    }

    // Tests every image of a board shares its canonical form
    // Verified by comparing only the first row of pieces
    #[test]
    fn test_canonical_shared_by_images() {
        let grid = random_grid(2, 3, &[1, 7, 25, 14, 3, 20, 9]);
        let canonical = grid.canonical();

        for image in grid.orbit() {
            assert_eq!(image.canonical(), canonical);
        }
        assert_eq!(canonical.canonical(), canonical);
    }

    // Tests duplicate piece shapes are detected up to symmetry
    // Verified by comparing raw pieces instead of canonical forms
    #[test]
    fn test_has_duplicate() {
        assert!(!two_by_two().has_duplicate());
        assert!(Grid::new(1, 2, pairs()).has_duplicate());

        // Opposite corners both carry labels 1 and 2
        let mut grid = Grid::new(2, 2, pairs());
        grid.horizontal_mut()[[0, 1]] = 1;
        grid.vertical_mut()[[1, 0]] = 2;
        grid.horizontal_mut()[[1, 1]] = 1;
        grid.vertical_mut()[[1, 1]] = 2;
        assert_eq!(grid.at(0, 0), Some(Piece::new(1, 0, 0, 2)));
        assert_eq!(grid.at(1, 1), Some(Piece::new(0, 1, 2, 0)));
        assert!(grid.has_duplicate());
    }

    // Tests the census counts canonical shapes
    // Verified by counting raw pieces
    #[test]
    fn test_piece_census() {
        let census = Grid::new(1, 3, pairs()).piece_census();
        assert_eq!(census.get(&Piece::FLAT), Some(&3));

        let census = two_by_two().piece_census();
        assert_eq!(census.len(), 4);
        assert_eq!(census.get(&Piece::new(0, 0, 1, 1)), Some(&1));
    }

    // Tests the definition carries the board's pieces and perimeter
    // Verified by fixing internal edges in the plain definition
    #[test]
    fn test_to_definition() {
        let grid = two_by_two();
        let definition = grid.to_definition();

        assert_eq!((definition.rows(), definition.cols()), (2, 2));
        assert_eq!(definition.piece_count(), 4);
        assert_eq!(definition.pieces().get(&Piece::new(1, 0, 0, 1)), Some(&1));
        assert_eq!(definition.horizontal_constraint(0, 0), Some(0));
        assert_eq!(definition.horizontal_constraint(0, 1), None);
        assert_eq!(definition.vertical_constraint(2, 1), Some(0));
    }

    // Tests the constrained definition fixes every edge
    // Verified by leaving internal edges free
    #[test]
    fn test_to_constrained_definition() {
        let definition = two_by_two().to_constrained_definition();

        assert_eq!(definition.horizontal_constraint(0, 1), Some(1));
        assert_eq!(definition.horizontal_constraint(1, 1), Some(4));
        assert_eq!(definition.vertical_constraint(1, 1), Some(3));
        assert_eq!(definition.vertical_constraint(0, 0), Some(0));
    }

    // Tests display lists rows of pieces
    // Verified by dropping the separator between rows
    #[test]
    fn test_display() {
        assert_eq!(Grid::new(1, 1, pairs()).to_string(), "[[[0, 0, 0, 0]]]");
        assert_eq!(
            two_by_two().to_string(),
            "[[[1, 0, 0, 1], [0, 0, 2, 3]], [[4, 2, 0, 0], [0, 4, 3, 0]]]"
        );
    }

    proptest! {
        // Four quarter turns return the original board
        #[test]
        fn rotation_has_order_four(labels in proptest::collection::vec(0u8..32, 1..20)) {
            let grid = random_grid(3, 2, &labels);
            prop_assert_eq!(grid.rotate().rotate().rotate().rotate(), grid);
        }

        // Reflection is an involution
        #[test]
        fn flip_is_involution(labels in proptest::collection::vec(0u8..32, 1..20)) {
            let grid = random_grid(2, 4, &labels);
            prop_assert_eq!(grid.flip().flip(), grid);
        }

        // Canonical boards are fixed points of canonicalisation
        #[test]
        fn canonical_is_idempotent(labels in proptest::collection::vec(0u8..32, 1..20)) {
            let grid = random_grid(3, 3, &labels);
            let canonical = grid.canonical();
            prop_assert_eq!(canonical.canonical(), canonical.clone());
            prop_assert_eq!(grid.rotate().canonical(), canonical);
        }

        // Each cell of a turned board holds the turned piece
        #[test]
        fn rotation_turns_every_cell(
            rows in 1usize..4,
            cols in 1usize..4,
            labels in proptest::collection::vec(0u8..32, 1..24),
        ) {
            let grid = random_grid(rows, cols, &labels);
            let turned = grid.rotate();
            for (row, col) in (0..rows).flat_map(|row| (0..cols).map(move |col| (row, col))) {
                let piece = grid.at(row, col).unwrap();
                prop_assert_eq!(turned.at(col, rows - 1 - row), Some(piece.rotate()));
            }
        }

        // Each cell of a mirrored board holds the mirrored piece
        #[test]
        fn flip_mirrors_every_cell(
            rows in 1usize..4,
            cols in 1usize..4,
            labels in proptest::collection::vec(0u8..32, 1..24),
        ) {
            let grid = random_grid(rows, cols, &labels);
            let mirrored = grid.flip();
            for (row, col) in (0..rows).flat_map(|row| (0..cols).map(move |col| (row, col))) {
                let piece = grid.at(row, col).unwrap();
                prop_assert_eq!(mirrored.at(col, row), Some(piece.flip(grid.edge_set())));
            }
        }
    }
}
