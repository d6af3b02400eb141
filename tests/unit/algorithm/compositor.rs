//! Tests for mosaic composition geometry and verbatim tile placement

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use indicatif::ProgressBar;
    use photomosaic::algorithm::compositor::MosaicCompositor;
    use photomosaic::algorithm::matcher::ColorMatcher;
    use photomosaic::analysis::color::Color;
    use photomosaic::analysis::index::TileIndex;
    use photomosaic::spatial::{SourceImage, Tile};

    // Three 2x2 tiles with asymmetric layouts so flips or transposes show up
    fn patterned_tiles() -> Vec<Tile> {
        let patterns: [[[u8; 3]; 4]; 3] = [
            [[255, 0, 0], [200, 0, 0], [150, 0, 0], [100, 0, 0]],
            [[0, 255, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
            [[0, 0, 40], [0, 0, 80], [0, 0, 120], [0, 0, 160]],
        ];
        patterns
            .iter()
            .map(|pattern| {
                let pixels = RgbImage::from_fn(2, 2, |x, y| {
                    Rgb(pattern.get((y * 2 + x) as usize).copied().unwrap_or_default())
                });
                Tile::from_pixels(pixels).unwrap()
            })
            .collect()
    }

    fn source_of(colors: &[&[Color]]) -> SourceImage {
        let height = colors.len() as u32;
        let width = colors.first().map_or(0, |row| row.len()) as u32;
        let image = RgbImage::from_fn(width, height, |x, y| {
            colors[y as usize][x as usize].to_rgb()
        });
        SourceImage::from_rgb(&image).unwrap()
    }

    fn assert_block_matches(mosaic: &RgbImage, tile: &Tile, x: u32, y: u32) {
        let size = tile.size();
        for ty in 0..size {
            for tx in 0..size {
                assert_eq!(
                    mosaic.get_pixel(x * size + tx, y * size + ty),
                    tile.pixels().get_pixel(tx, ty),
                    "block ({x}, {y}) pixel ({tx}, {ty})"
                );
            }
        }
    }

    // Tests zero part size is rejected
    // Verified by accepting zero part size
    #[test]
    fn test_new_rejects_zero_part_size() {
        assert!(MosaicCompositor::new(0).is_err());
        assert_eq!(MosaicCompositor::new(3).unwrap().part_size(), 3);
    }

    // Tests output is exactly W*P by H*P
    // Verified by swapping width and height scaling
    #[test]
    fn test_output_dimensions() {
        let tiles = patterned_tiles();
        let red = tiles[0].color();
        let source = source_of(&[&[red, red, red], &[red, red, red]]);

        let compositor = MosaicCompositor::new(2).unwrap();
        assert_eq!(compositor.output_dimensions(&source).unwrap(), (6, 4));

        let index: TileIndex = tiles.into_iter().collect();
        let matcher = ColorMatcher::new(&index).unwrap();
        let mosaic = compositor.compose(&source, &matcher).unwrap();
        assert_eq!(mosaic.dimensions(), (6, 4));
    }

    // Tests every block equals the chosen tile pixel for pixel
    // Verified by writing tiles transposed
    #[test]
    fn test_blocks_copy_tiles_verbatim() {
        let tiles = patterned_tiles();
        let [a, b, c] = [tiles[0].color(), tiles[1].color(), tiles[2].color()];
        let layout: [&[Color]; 2] = [&[a, b, c], &[c, a, b]];
        let source = source_of(&layout);

        let index: TileIndex = tiles.iter().cloned().collect();
        let matcher = ColorMatcher::new(&index).unwrap();
        let mosaic = MosaicCompositor::new(2)
            .unwrap()
            .compose(&source, &matcher)
            .unwrap();

        for (y, row) in layout.iter().enumerate() {
            for (x, color) in row.iter().enumerate() {
                let tile = index.get(*color).unwrap();
                assert_block_matches(&mosaic, tile, x as u32, y as u32);
            }
        }
    }

    // Tests non-exact source colors still place their nearest tile
    // Verified by blending the source color into the block
    #[test]
    fn test_nearest_tile_placed_without_blending() {
        let index: TileIndex = [Color::new(255, 0, 0), Color::new(0, 0, 255)]
            .into_iter()
            .map(|color| Tile::solid(color, 2))
            .collect();
        let matcher = ColorMatcher::new(&index).unwrap();
        let source = source_of(&[&[Color::new(200, 10, 10)]]);

        let mosaic = MosaicCompositor::new(2)
            .unwrap()
            .compose(&source, &matcher)
            .unwrap();

        assert_eq!(mosaic.dimensions(), (2, 2));
        assert!(mosaic.pixels().all(|p| *p == Rgb([255, 0, 0])));
    }

    // Tests parallel and sequential composition produce identical buffers
    // Verified by offsetting strips by one row in parallel mode
    #[test]
    fn test_parallel_matches_sequential() {
        let tiles = patterned_tiles();
        let index: TileIndex = tiles.into_iter().collect();
        let image = RgbImage::from_fn(17, 9, |x, y| Rgb([(x * 15) as u8, (y * 28) as u8, 60]));
        let source = SourceImage::from_rgb(&image).unwrap();

        let parallel = {
            let matcher = ColorMatcher::new(&index).unwrap();
            MosaicCompositor::new(2)
                .unwrap()
                .compose(&source, &matcher)
                .unwrap()
        };
        let sequential = {
            let matcher = ColorMatcher::new(&index).unwrap();
            MosaicCompositor::new(2)
                .unwrap()
                .with_parallelism(false)
                .compose(&source, &matcher)
                .unwrap()
        };

        assert_eq!(parallel, sequential);
    }

    // Tests tiles of the wrong size are reported instead of misplaced
    // Verified by removing the tile size check
    #[test]
    fn test_tile_size_mismatch_fails() {
        let index: TileIndex = std::iter::once(Tile::solid(Color::new(1, 2, 3), 3)).collect();
        let matcher = ColorMatcher::new(&index).unwrap();
        let source = source_of(&[&[Color::new(1, 2, 3)]]);

        let result = MosaicCompositor::new(2).unwrap().compose(&source, &matcher);
        assert!(result.is_err());
    }

    // Tests progress advances once per source row
    // Verified by advancing once per source sample
    #[test]
    fn test_progress_counts_rows() {
        let index: TileIndex = std::iter::once(Tile::solid(Color::new(5, 5, 5), 1)).collect();
        let matcher = ColorMatcher::new(&index).unwrap();
        let source = SourceImage::from_rgb(&RgbImage::new(4, 6)).unwrap();
        let progress = ProgressBar::hidden();

        let mosaic = MosaicCompositor::new(1)
            .unwrap()
            .compose_with_progress(&source, &matcher, &progress)
            .unwrap();

        assert_eq!(mosaic.dimensions(), (4, 6));
        assert_eq!(progress.position(), 6);
    }

    // Tests buffer sizing covers every output byte and rejects overflow
    // Verified by multiplying the buffer length unchecked
    #[test]
    fn test_buffer_len() {
        let compositor = MosaicCompositor::new(3).unwrap();

        assert_eq!(compositor.buffer_len(12, 4).unwrap(), 12 * 3 * 3 * 4);
        assert_eq!(compositor.buffer_len(0, 4).unwrap(), 0);
        assert!(compositor.buffer_len(u32::MAX, usize::MAX).is_err());
    }
}
