//! Tests for decoding images into grids and encoding grids back to files

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};
    use pixelclimb::EvolutionError;
    use pixelclimb::io::image::{
        Quantization, decode, decode_with, encode, grid_from_luma, grid_to_luma,
    };
    use pixelclimb::spatial::BinaryGrid;

    // Tests a non-square grid survives a PNG round trip unchanged
    // Verified by transposing coordinates in grid_to_luma
    #[test]
    fn test_png_round_trip() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("grid.png");
        let grid = BinaryGrid::from_fn(7, 3, |col, row| (col + row) % 3 == 0 || col == 6);

        encode(&path, &grid).expect("Failed to encode grid");
        let decoded = decode_with(&path, Quantization::Threshold).expect("Failed to decode grid");

        assert_eq!(decoded, grid);
        // Pure black and white are fixed points of dithering
        assert_eq!(decode(&path).expect("Failed to decode grid"), grid);
    }

    // Tests pixel (x, y) maps to cell (col = x, row = y) and lit means white
    // Verified by inverting the lit level in grid_to_luma
    #[test]
    fn test_orientation_and_polarity() {
        let mut grid = BinaryGrid::new(4, 2);
        assert_eq!(grid.set(3, 0, true), Some(false));

        let image = grid_to_luma(&grid).expect("Failed to render grid");

        assert_eq!(image.dimensions(), (4, 2));
        assert_eq!(image.get_pixel(3, 0), &Luma([255]));
        assert_eq!(image.get_pixel(0, 1), &Luma([0]));
    }

    // Tests thresholding cuts at the mid level
    // Verified by using a strict comparison against the threshold
    #[test]
    fn test_threshold_quantization() {
        let image = GrayImage::from_fn(4, 1, |x, _| match x {
            0 => Luma([0]),
            1 => Luma([127]),
            2 => Luma([128]),
            _ => Luma([255]),
        });

        let grid = grid_from_luma(&image, Quantization::Threshold);

        assert_eq!(grid.get(0, 0), Some(false));
        assert_eq!(grid.get(1, 0), Some(false));
        assert_eq!(grid.get(2, 0), Some(true));
        assert_eq!(grid.get(3, 0), Some(true));
    }

    // Tests decoding keeps pixel (x, y) at cell (x, y) on a tall image
    // Verified by building the intermediate array with shape (height, width)
    #[test]
    fn test_luma_to_grid_orientation() {
        let image = GrayImage::from_fn(2, 5, |x, y| {
            if x == 1 && y == 4 { Luma([255]) } else { Luma([0]) }
        });

        let grid = grid_from_luma(&image, Quantization::Threshold);

        assert_eq!(grid.dimensions(), (2, 5));
        assert_eq!(grid.count_ones(), 1);
        assert_eq!(grid.get(1, 4), Some(true));
        assert_eq!(grid_to_luma(&grid).expect("Failed to render grid"), image);
    }

    // Tests dithering mixes lit and dark cells on flat mid gray
    // Verified by skipping the dither pass
    #[test]
    fn test_dither_quantization() {
        let gray = GrayImage::from_pixel(16, 16, Luma([128]));

        let thresholded = grid_from_luma(&gray, Quantization::Threshold);
        let dithered = grid_from_luma(&gray, Quantization::Dither);

        assert_eq!(thresholded.count_ones(), 256);
        let lit = dithered.count_ones();
        assert!((96..=160).contains(&lit), "dithered lit count {lit}");
    }

    // Tests a missing file is reported as not found
    // Verified by mapping every load failure to ImageLoad
    #[test]
    fn test_decode_missing_file() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("absent.png");

        match decode(&path) {
            Err(EvolutionError::FileNotFound { path: reported }) => assert_eq!(reported, path),
            other => unreachable!("Expected FileNotFound, got {other:?}"),
        }
    }

    // Tests undecodable content is rejected without being mistaken for a missing file
    // Verified by returning an empty grid for decoder failures
    #[test]
    fn test_decode_garbage_file() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not a png").expect("Failed to write file");

        let result = decode(&path);

        assert!(matches!(
            result,
            Err(EvolutionError::UnsupportedFormat { .. } | EvolutionError::ImageLoad { .. })
        ));
    }

    // Tests empty grids cannot be encoded
    // Verified by removing the empty grid check
    #[test]
    fn test_encode_empty_grid() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("empty.png");

        let result = encode(&path, &BinaryGrid::new(0, 4));

        assert!(matches!(result, Err(EvolutionError::InvalidParameter { .. })));
        assert!(!path.exists());
    }

    // Tests missing parent directories are created
    // Verified by skipping create_dir_all
    #[test]
    fn test_encode_creates_parent_directory() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("deeper").join("grid.png");

        encode(&path, &BinaryGrid::filled(2, 2, true)).expect("Failed to encode grid");

        assert!(path.exists());
    }
}
