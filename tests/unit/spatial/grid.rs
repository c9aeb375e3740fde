//! Tests for binary grid construction, cell access and comparison

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use pixelclimb::EvolutionError;
    use pixelclimb::spatial::BinaryGrid;

    // Tests new grids start dark with the requested shape
    // Verified by filling new grids with true
    #[test]
    fn test_new_grid_is_all_false() {
        let grid = BinaryGrid::new(4, 3);

        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.count_ones(), 0);
        assert!(!grid.is_empty());
    }

    // Tests zero-sized grids report empty
    // Verified by computing len from width only
    #[test]
    fn test_empty_grid() {
        let grid = BinaryGrid::new(0, 5);

        assert!(grid.is_empty());
        assert_eq!(grid.get(0, 0), None);
        assert_eq!(grid.cells().count(), 0);
    }

    // Tests set returns previous value and get sees the write
    // Verified by returning the new value from set
    #[test]
    fn test_set_and_get() {
        let mut grid = BinaryGrid::new(3, 2);

        assert_eq!(grid.set(2, 1, true), Some(false));
        assert_eq!(grid.get(2, 1), Some(true));
        assert_eq!(grid.set(2, 1, false), Some(true));
        assert_eq!(grid.get(2, 1), Some(false));
    }

    // Tests out-of-bounds access is rejected rather than wrapping
    // Verified by indexing with col * width + row
    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = BinaryGrid::new(3, 2);

        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.set(0, 2, true), None);
        assert_eq!(grid.flip(5, 5), None);
        assert_eq!(grid.count_ones(), 0);
    }

    // Tests cells on a non-square grid do not alias each other
    // Verified by swapping the roles of width and height in the index
    #[test]
    fn test_cells_are_distinct_on_non_square_grid() {
        let mut grid = BinaryGrid::new(3, 5);
        assert_eq!(grid.set(2, 0, true), Some(false));

        for col in 0..3 {
            for row in 0..5 {
                assert_eq!(grid.get(col, row), Some(col == 2 && row == 0));
            }
        }
    }

    // Tests flip toggles and reports the new value
    // Verified by returning the old value from flip
    #[test]
    fn test_flip_toggles() {
        let mut grid = BinaryGrid::new(2, 2);

        assert_eq!(grid.flip(1, 0), Some(true));
        assert_eq!(grid.get(1, 0), Some(true));
        assert_eq!(grid.flip(1, 0), Some(false));
        assert_eq!(grid.get(1, 0), Some(false));
    }

    // Tests from_fn visits each (col, row) exactly once
    // Verified by transposing arguments to the closure
    #[test]
    fn test_from_fn_coordinates() {
        let grid = BinaryGrid::from_fn(4, 3, |col, row| col == 3 && row == 1);

        assert_eq!(grid.count_ones(), 1);
        assert_eq!(grid.get(3, 1), Some(true));
        assert_eq!(grid.get(1, 3), None);
    }

    // Tests array conversion preserves [col, row] orientation
    // Verified by building the array with shape (height, width)
    #[test]
    fn test_array_round_trip() {
        let mut array = Array2::from_elem((5, 2), false);
        if let Some(cell) = array.get_mut((4, 1)) {
            *cell = true;
        }
        if let Some(cell) = array.get_mut((0, 0)) {
            *cell = true;
        }

        let grid = BinaryGrid::from_array(&array);
        assert_eq!(grid.dimensions(), (5, 2));
        assert_eq!(grid.get(4, 1), Some(true));
        assert_eq!(grid.get(0, 0), Some(true));
        assert_eq!(grid.count_ones(), 2);
        assert_eq!(grid.to_array(), array);
    }

    // Tests mismatch counting across whole storage words
    // Verified by counting only the first storage word
    #[test]
    fn test_mismatch_count() {
        let a = BinaryGrid::from_fn(20, 10, |col, row| (col + row) % 3 == 0);
        let b = BinaryGrid::from_fn(20, 10, |col, row| (col + row) % 3 == 0 || col == 19);

        let expected = (0..10).filter(|row| (19 + row) % 3 != 0).count();
        assert_eq!(a.mismatch_count(&b).ok(), Some(expected));
        assert_eq!(a.mismatch_count(&a).ok(), Some(0));
    }

    // Tests comparing different shapes fails with both shapes reported
    // Verified by comparing only the total pixel count
    #[test]
    fn test_mismatch_count_shape_error() {
        let a = BinaryGrid::new(2, 3);
        let b = BinaryGrid::new(3, 2);

        match a.mismatch_count(&b) {
            Err(EvolutionError::DimensionMismatch { expected, found }) => {
                assert_eq!(expected, (2, 3));
                assert_eq!(found, (3, 2));
            }
            other => unreachable!("Expected DimensionMismatch, got {other:?}"),
        }
    }

    // Tests copy_from overwrites contents and rejects other shapes
    // Verified by skipping the shape check
    #[test]
    fn test_copy_from() {
        let source = BinaryGrid::from_fn(3, 3, |col, row| col == row);
        let mut destination = BinaryGrid::filled(3, 3, true);

        assert!(destination.copy_from(&source).is_ok());
        assert_eq!(destination, source);

        let mut wrong_shape = BinaryGrid::new(3, 4);
        assert!(wrong_shape.copy_from(&source).is_err());
        assert_eq!(wrong_shape.count_ones(), 0);
    }

    // Tests inversion flips every cell and nothing else
    // Verified by inverting the backing storage beyond the grid length
    #[test]
    fn test_inverted() {
        let grid = BinaryGrid::from_fn(7, 3, |col, _| col % 2 == 0);
        let inverse = grid.inverted();

        assert_eq!(inverse.count_ones(), grid.len() - grid.count_ones());
        assert_eq!(grid.mismatch_count(&inverse).ok(), Some(grid.len()));
        assert_eq!(inverse.inverted(), grid);
    }

    // Tests cell iteration yields column-major coordinates
    // Verified by deriving row from the division instead of the remainder
    #[test]
    fn test_cells_iteration_order() {
        let grid = BinaryGrid::from_fn(2, 3, |col, row| col == 1 && row == 2);
        let cells: Vec<_> = grid.cells().collect();

        assert_eq!(cells.len(), 6);
        assert_eq!(cells.first(), Some(&(0, 0, false)));
        assert_eq!(cells.get(1), Some(&(0, 1, false)));
        assert_eq!(cells.last(), Some(&(1, 2, true)));
    }

    // Tests display renders rows top to bottom
    // Verified by iterating columns in the outer loop
    #[test]
    fn test_display() {
        let grid = BinaryGrid::from_fn(3, 2, |col, row| col == 0 || row == 1);

        assert_eq!(grid.to_string(), "#..\n###\n");
    }
}
