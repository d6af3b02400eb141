//! Tests for command-line interface parsing and the single-build runner

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::imageops::FilterType;
    use image::{Rgb, RgbImage};
    use photomosaic::io::cli::{Cli, MosaicRunner, ResampleFilter};
    use photomosaic::io::configuration::{
        DEFAULT_OUTPUT_PATH, DEFAULT_PART_SIZE, DEFAULT_SOURCE_PATH, DEFAULT_TILE_DIRECTORY,
        MAX_WORKING_DIMENSION,
    };
    use photomosaic::io::logging::Verbosity;
    use std::fs;
    use std::io::{self, Write};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, PoisonError};
    use tempfile::TempDir;

    // Shared in-memory log sink for a scoped subscriber
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // Tests CLI parsing with no arguments
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["program"]);

        assert_eq!(cli.source, PathBuf::from(DEFAULT_SOURCE_PATH));
        assert_eq!(cli.tiles, PathBuf::from(DEFAULT_TILE_DIRECTORY));
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(cli.part_size, DEFAULT_PART_SIZE);
        assert_eq!(cli.max_dimension, MAX_WORKING_DIMENSION);
        assert_eq!(cli.filter, ResampleFilter::Lanczos3);
        assert!(!cli.sequential);
        assert!(cli.should_show_progress());
        assert_eq!(cli.verbosity(), Verbosity::Normal);
    }

    // Tests CLI parsing with all available arguments
    // Verified by dropping a long flag definition
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "--source",
            "photo.jpg",
            "--tiles",
            "parts",
            "--output",
            "out/mosaic.png",
            "--part-size",
            "8",
            "--max-dimension",
            "120",
            "--filter",
            "catmull-rom",
            "--sequential",
            "--quiet",
        ]);

        assert_eq!(cli.source, PathBuf::from("photo.jpg"));
        assert_eq!(cli.tiles, PathBuf::from("parts"));
        assert_eq!(cli.output, PathBuf::from("out/mosaic.png"));
        assert_eq!(cli.part_size, 8);
        assert_eq!(cli.max_dimension, 120);
        assert_eq!(cli.filter, ResampleFilter::CatmullRom);
        assert!(!cli.should_show_progress());
        assert_eq!(cli.verbosity(), Verbosity::Quiet);

        let config = cli.config();
        assert_eq!(config.part_size, 8);
        assert_eq!(config.max_dimension, 120);
        assert_eq!(config.filter, FilterType::CatmullRom);
        assert!(!config.parallel);
    }

    // Tests short flag parsing
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "program", "-s", "a.png", "-t", "tiles", "-o", "b.png", "-p", "3", "-m", "50", "-f",
            "nearest", "-v",
        ]);

        assert_eq!(cli.source, PathBuf::from("a.png"));
        assert_eq!(cli.part_size, 3);
        assert_eq!(cli.max_dimension, 50);
        assert_eq!(cli.filter, ResampleFilter::Nearest);
        assert_eq!(cli.verbosity(), Verbosity::Verbose);
    }

    // Tests unknown filters are rejected
    // Verified by falling back to the default filter
    #[test]
    fn test_cli_rejects_unknown_filter() {
        assert!(Cli::try_parse_from(["program", "--filter", "bicubic"]).is_err());
    }

    // Tests filter conversion
    // Verified by mapping every filter to Lanczos3
    #[test]
    fn test_filter_conversion() {
        assert_eq!(FilterType::from(ResampleFilter::Nearest), FilterType::Nearest);
        assert_eq!(FilterType::from(ResampleFilter::Triangle), FilterType::Triangle);
        assert_eq!(FilterType::from(ResampleFilter::Gaussian), FilterType::Gaussian);
        assert_eq!(FilterType::from(ResampleFilter::Lanczos3), FilterType::Lanczos3);
    }

    // Tests error handling for missing source files
    // Verified by removing error return for nonexistent files
    #[test]
    fn test_run_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("nonexistent.jpg");
        let output = temp_dir.path().join("res.png");
        let cli = Cli::parse_from([
            "program",
            "--quiet",
            "--source",
            source.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);

        assert!(MosaicRunner::new(cli).run().is_err());
        assert!(!output.exists());
    }

    // Tests a full run writes the output file
    // Verified by disabling the file sink
    #[test]
    fn test_run_writes_output() {
        let temp_dir = TempDir::new().unwrap();
        let tiles = temp_dir.path().join("tiles");
        fs::create_dir_all(&tiles).unwrap();
        RgbImage::from_pixel(4, 4, Rgb([10, 200, 10]))
            .save(tiles.join("green.png"))
            .unwrap();
        let source = temp_dir.path().join("source.png");
        RgbImage::from_pixel(5, 3, Rgb([0, 180, 0]))
            .save(&source)
            .unwrap();
        let output = temp_dir.path().join("out/res.png");

        let cli = Cli::parse_from([
            "program",
            "--quiet",
            "--part-size",
            "2",
            "--source",
            source.to_str().unwrap(),
            "--tiles",
            tiles.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);
        MosaicRunner::new(cli).run().unwrap();

        let written = image::open(&output).unwrap();
        assert_eq!((written.width(), written.height()), (10, 6));
    }

    // Tests a failed build leaves an error line in the log
    // Verified by propagating the error without logging it
    #[test]
    fn test_run_logs_failure() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("missing-source.jpg");
        let cli = Cli::parse_from([
            "program",
            "--quiet",
            "--source",
            source.to_str().unwrap(),
            "--output",
            temp_dir.path().join("res.png").to_str().unwrap(),
        ]);

        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let result =
            tracing::subscriber::with_default(subscriber, || MosaicRunner::new(cli).run());

        assert!(result.is_err());
        let output = log.contents();
        assert!(output.contains("ERROR"), "log was: {output}");
        assert!(output.contains("mosaic build failed"), "log was: {output}");
        assert!(output.contains("missing-source.jpg"), "log was: {output}");
    }
}
