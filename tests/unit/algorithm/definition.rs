//! Tests for puzzle definitions and edge constraints

#[cfg(test)]
mod tests {
    use edgematch::TilingError;
    use edgematch::algorithm::definition::Definition;
    use edgematch::spatial::edges::EdgeSet;
    use edgematch::spatial::grid::Grid;
    use edgematch::spatial::piece::Piece;
    use ndarray::{Array2, array};
    use std::sync::Arc;

    fn pairs() -> Arc<EdgeSet> {
        Arc::new(EdgeSet::pairs(2).unwrap())
    }

    // Tests a new definition fixes the perimeter and frees internal edges
    // Verified by fixing every horizontal edge to flat
    #[test]
    fn test_new_flat_perimeter() {
        let definition = Definition::new(2, 3, pairs());

        assert_eq!(definition.horizontal_constraints().dim(), (2, 4));
        assert_eq!(definition.vertical_constraints().dim(), (3, 3));
        assert_eq!(definition.horizontal_constraint(1, 0), Some(0));
        assert_eq!(definition.horizontal_constraint(1, 3), Some(0));
        assert_eq!(definition.horizontal_constraint(1, 2), None);
        assert_eq!(definition.vertical_constraint(0, 2), Some(0));
        assert_eq!(definition.vertical_constraint(2, 1), Some(0));
        assert_eq!(definition.vertical_constraint(1, 1), None);
        assert_eq!(definition.piece_count(), 0);
    }

    // Tests pieces accumulate counts per exact label sequence
    // Verified by replacing the count on repeated insertion
    #[test]
    fn test_add_piece() {
        let mut definition = Definition::new(1, 3, pairs());
        definition.add_piece(Piece::new(1, 0, 0, 0), 1);
        definition.add_piece(Piece::new(1, 0, 0, 0), 2);
        definition.add_piece(Piece::new(0, 0, 0, 1), 1);

        assert_eq!(definition.pieces().len(), 2);
        assert_eq!(definition.pieces().get(&Piece::new(1, 0, 0, 0)), Some(&3));
        assert_eq!(definition.piece_count(), 4);
    }

    // Tests signed constraint arrays free negative entries
    // Verified by treating zero as free
    #[test]
    fn test_set_constraints() {
        let mut definition = Definition::new(1, 2, pairs());
        let horizontal = array![[0, -1, 3]];
        let vertical = array![[-1, 0], [2, -5]];
        definition
            .set_constraints(horizontal.view(), vertical.view())
            .unwrap();

        assert_eq!(definition.horizontal_constraint(0, 0), Some(0));
        assert_eq!(definition.horizontal_constraint(0, 1), None);
        assert_eq!(definition.horizontal_constraint(0, 2), Some(3));
        assert_eq!(definition.vertical_constraint(0, 0), None);
        assert_eq!(definition.vertical_constraint(1, 0), Some(2));
        assert_eq!(definition.vertical_constraint(1, 1), None);
    }

    // Tests constraint arrays of the wrong shape are rejected
    // Verified by checking only the row count
    #[test]
    fn test_set_constraints_shape() {
        let mut definition = Definition::new(2, 2, pairs());
        let result = definition.set_constraints(
            Array2::<i16>::zeros((2, 2)).view(),
            Array2::<i16>::zeros((3, 2)).view(),
        );
        assert!(matches!(result, Err(TilingError::InvalidShape { .. })));

        let result = definition.set_constraints(
            Array2::<i16>::zeros((2, 3)).view(),
            Array2::<i16>::zeros((3, 3)).view(),
        );
        assert!(matches!(result, Err(TilingError::InvalidShape { .. })));
    }

    // Tests constraint values beyond the label range are rejected
    // Verified by truncating values to eight bits
    #[test]
    fn test_set_constraints_range() {
        let mut definition = Definition::new(1, 1, pairs());
        let result =
            definition.set_constraints(array![[0, 300]].view(), array![[0], [0]].view());

        assert!(matches!(
            result,
            Err(TilingError::InvalidParameter {
                parameter: "constraint",
                ..
            })
        ));
        assert_eq!(definition.horizontal_constraint(0, 1), Some(0));
    }

    // Tests single constraints can be fixed, freed and bounds checked
    // Verified by ignoring out-of-range writes
    #[test]
    fn test_set_single_constraints() {
        let mut definition = Definition::new(2, 2, pairs());
        definition.set_horizontal_constraint(0, 0, None).unwrap();
        definition.set_vertical_constraint(1, 1, Some(4)).unwrap();

        assert_eq!(definition.horizontal_constraint(0, 0), None);
        assert_eq!(definition.vertical_constraint(1, 1), Some(4));

        let result = definition.set_horizontal_constraint(2, 0, Some(1));
        assert!(matches!(
            result,
            Err(TilingError::IndexOutOfBounds { row: 2, rows: 2, cols: 3, .. })
        ));
        let result = definition.set_vertical_constraint(0, 2, Some(1));
        assert!(matches!(result, Err(TilingError::IndexOutOfBounds { .. })));
    }

    // Tests cell constraints are read from inside the cell
    // Verified by returning stored left and top labels unchanged
    #[test]
    fn test_cell_constraints() {
        let mut definition = Definition::new(1, 1, pairs());
        definition.set_horizontal_constraint(0, 0, Some(1)).unwrap();
        definition.set_horizontal_constraint(0, 1, Some(3)).unwrap();
        definition.set_vertical_constraint(0, 0, Some(4)).unwrap();
        definition.set_vertical_constraint(1, 0, None).unwrap();

        assert_eq!(
            definition.cell_constraints(0, 0),
            [Some(3), Some(3), Some(2), None]
        );
    }

    // Tests constraining from a board copies every edge
    // Verified by copying internal edges only
    #[test]
    fn test_constrain_all_from_grid() {
        let mut grid = Grid::new(1, 2, pairs());
        grid.horizontal_mut()[[0, 1]] = 3;
        let mut definition = Definition::new(1, 2, pairs());
        definition.constrain_all_from_grid(&grid).unwrap();

        assert_eq!(definition.horizontal_constraint(0, 1), Some(3));
        assert_eq!(definition.horizontal_constraint(0, 0), Some(0));
        assert_eq!(definition.vertical_constraint(1, 1), Some(0));

        let result = definition.constrain_all_from_grid(&Grid::new(2, 1, pairs()));
        assert!(matches!(result, Err(TilingError::InvalidShape { .. })));
    }

    // Tests mutable constraint access edits in place
    // Verified by returning a copy of the array
    #[test]
    fn test_constraints_mut() {
        let mut definition = Definition::new(1, 1, pairs());
        definition.horizontal_constraints_mut().fill(None);
        definition.vertical_constraints_mut()[[0, 0]] = Some(2);

        assert_eq!(definition.horizontal_constraint(0, 0), None);
        assert_eq!(definition.vertical_constraint(0, 0), Some(2));
        assert_eq!(definition.edge_set().len(), 5);
    }
}
