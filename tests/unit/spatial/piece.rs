//! Tests for piece rotation, reflection and canonical forms

#[cfg(test)]
mod tests {
    use edgematch::spatial::edges::EdgeSet;
    use edgematch::spatial::piece::{Piece, Side};
    use proptest::{prop_assert, prop_assert_eq, proptest};

    // Tests rotation moves the north label to the east side
    // Verified by rotating counter-clockwise instead
    #[test]
    fn test_rotate() {
        let piece = Piece::new(1, 2, 3, 4);
        assert_eq!(piece.rotate(), Piece::new(2, 3, 4, 1));
        assert_eq!(piece.rotate().rotate().rotate().rotate(), piece);
    }

    // Tests reflection transposes the piece and mirrors labels
    // Verified by reversing the label order without swapping sides
    #[test]
    fn test_flip() {
        let pairs = EdgeSet::pairs(2).unwrap();
        assert_eq!(Piece::new(1, 2, 3, 4).flip(&pairs), Piece::new(4, 3, 2, 1));

        let standard = EdgeSet::standard();
        assert_eq!(Piece::new(7, 0, 0, 0).flip(&standard), Piece::new(0, 0, 0, 13));
        assert_eq!(Piece::new(0, 25, 0, 0).flip(&standard), Piece::new(0, 0, 26, 0));
    }

    // Tests the canonical form is the smallest orientation
    // Verified by taking the smallest rotation only
    #[test]
    fn test_canonical() {
        let pairs = EdgeSet::pairs(2).unwrap();

        assert_eq!(Piece::new(3, 4, 1, 2).canonical(&pairs), Piece::new(1, 2, 3, 4));
        assert_eq!(Piece::new(4, 3, 2, 1).canonical(&pairs), Piece::new(1, 2, 3, 4));
        assert_eq!(Piece::new(1, 0, 0, 1).canonical(&pairs), Piece::new(0, 0, 1, 1));
        assert!(Piece::new(2, 1, 4, 3).same_shape(Piece::new(1, 2, 3, 4), &pairs));
        assert!(!Piece::new(1, 3, 2, 4).same_shape(Piece::new(1, 2, 3, 4), &pairs));
    }

    // Tests symmetric pieces have fewer distinct orientations
    // Verified by skipping deduplication of the orbit
    #[test]
    fn test_orientations_count() {
        let pairs = EdgeSet::pairs(2).unwrap();

        assert_eq!(Piece::FLAT.orientations(&pairs), vec![Piece::FLAT]);
        assert_eq!(Piece::new(1, 2, 1, 2).orientations(&pairs).len(), 2);
        assert_eq!(Piece::new(1, 0, 0, 1).orientations(&pairs).len(), 4);
        assert_eq!(Piece::new(1, 2, 3, 4).orientations(&pairs).len(), 8);
    }

    // Tests orientations are sorted and start at the canonical form
    // Verified by returning the orbit in generation order
    #[test]
    fn test_orientations_sorted() {
        let pairs = EdgeSet::pairs(2).unwrap();
        let orientations = Piece::new(3, 1, 4, 2).orientations(&pairs);

        assert!(orientations.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(orientations[0], Piece::new(3, 1, 4, 2).canonical(&pairs));
    }

    // Tests the orbit order: rotations first, then reflected rotations
    // Verified by reflecting before rotating in the second half
    #[test]
    fn test_orbit_order() {
        let pairs = EdgeSet::pairs(2).unwrap();
        let piece = Piece::new(1, 2, 3, 4);
        let orbit = piece.orbit(&pairs);

        assert_eq!(orbit[0], piece);
        assert_eq!(orbit[1], piece.rotate());
        assert_eq!(orbit[4], piece.flip(&pairs));
        assert_eq!(orbit[5], piece.flip(&pairs).rotate());
    }

    // Tests side accessors and facing sides
    // Verified by swapping the north and south slots
    #[test]
    fn test_sides() {
        let piece = Piece::new(1, 2, 3, 4);

        assert_eq!(piece.east(), 1);
        assert_eq!(piece.north(), 2);
        assert_eq!(piece.west(), 3);
        assert_eq!(piece.south(), 4);
        assert_eq!(piece.edge(Side::West), 3);
        assert_eq!(Side::East.facing(), Side::West);
        assert_eq!(Side::North.facing(), Side::South);
        assert_eq!(Side::ALL.len(), 4);
    }

    // Tests display format lists labels in storage order
    // Verified by printing labels in reverse
    #[test]
    fn test_display() {
        assert_eq!(Piece::new(1, 2, 3, 4).to_string(), "[1, 2, 3, 4]");
        assert_eq!(Piece::from([0, 0, 0, 5]).to_string(), "[0, 0, 0, 5]");
    }

    proptest! {
        // Canonicalisation is idempotent and shared by the whole orbit
        #[test]
        fn canonical_is_orbit_invariant(labels in proptest::array::uniform4(0u8..32)) {
            let edges = EdgeSet::standard();
            let piece = Piece(labels);
            let canonical = piece.canonical(&edges);

            prop_assert_eq!(canonical.canonical(&edges), canonical);
            for image in piece.orbit(&edges) {
                prop_assert_eq!(image.canonical(&edges), canonical);
            }
        }

        // Rotation has order four and reflection order two
        #[test]
        fn transformations_are_periodic(labels in proptest::array::uniform4(0u8..32)) {
            let edges = EdgeSet::standard();
            let piece = Piece(labels);
            let flipped = piece.flip(&edges);

            prop_assert_eq!(piece.rotate().rotate().rotate().rotate(), piece);
            prop_assert_eq!(flipped.flip(&edges), piece);
            prop_assert_eq!(flipped.rotate().rotate().rotate().rotate(), flipped);
        }

        // The orbit is closed: every image's orientations equal the original's
        #[test]
        fn orbit_is_closed(labels in proptest::array::uniform4(0u8..32)) {
            let edges = EdgeSet::standard();
            let piece = Piece(labels);
            let orientations = piece.orientations(&edges);

            prop_assert!(orientations.len() <= 8);
            for image in &orientations {
                prop_assert_eq!(&image.orientations(&edges), &orientations);
            }
        }
    }
}
