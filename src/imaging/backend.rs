//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the pipeline needs:
//! identify and render. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust plus
//! libwebp, statically linked into the binary.
//!
//! Errors here are local to a single source image. The driver catches them
//! and degrades per its fallback chain; they never abort a run.

use super::params::RenderParams;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },
}

/// Result of an identify operation: viewer-visible dimensions, after the
/// EXIF orientation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Both operations must agree on orientation: `identify` reports the
/// dimensions the pixels will have once `render` has baked the EXIF rotation
/// in, so the driver's portrait/landscape decision matches what gets encoded.
pub trait ImageBackend {
    /// Get viewer-visible image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Render one derivative file as specified.
    fn render(&self, params: &RenderParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::{FitMode, FrameSize, OutputFormat, Quality};
    use std::sync::Mutex;

    /// Mock backend that records operations without doing pixel work.
    ///
    /// On a successful render it writes an empty file at the output path when
    /// the parent directory exists, so presence-based skip logic can be
    /// exercised against real temp trees. Failure injection matches recorded
    /// paths by substring.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: Mutex<Vec<Dimensions>>,
        pub operations: Mutex<Vec<RecordedOp>>,
        fail_outputs: Mutex<Vec<String>>,
        fail_next: Mutex<usize>,
        identify_fails: Mutex<bool>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Render {
            source: String,
            output: String,
            width: u32,
            height: u32,
            fit: FitMode,
            quality: u32,
            blur_sigma: f32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Results are popped from the end, one per identify call.
        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                identify_results: Mutex::new(dims),
                ..Self::default()
            }
        }

        /// Arm render failure for every output path containing `pattern`.
        pub fn fail_outputs_matching(&self, pattern: &str) {
            self.fail_outputs.lock().unwrap().push(pattern.to_string());
        }

        /// Arm failure for the next `n` render calls, whatever their paths.
        /// Lets a test fail a first attempt and let the retry through.
        pub fn fail_next_renders(&self, n: usize) {
            *self.fail_next.lock().unwrap() += n;
        }

        /// Arm failure for all subsequent identify calls.
        pub fn fail_identify(&self) {
            *self.identify_fails.lock().unwrap() = true;
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        pub fn render_count(&self) -> usize {
            self.get_operations()
                .iter()
                .filter(|op| matches!(op, RecordedOp::Render { .. }))
                .count()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            if *self.identify_fails.lock().unwrap() {
                return Err(BackendError::Decode {
                    path: path.to_path_buf(),
                    message: "mock identify failure".to_string(),
                });
            }

            self.identify_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BackendError::Decode {
                    path: path.to_path_buf(),
                    message: "no mock dimensions".to_string(),
                })
        }

        fn render(&self, params: &RenderParams) -> Result<(), BackendError> {
            let output = params.output.to_string_lossy().to_string();
            self.operations.lock().unwrap().push(RecordedOp::Render {
                source: params.source.to_string_lossy().to_string(),
                output: output.clone(),
                width: params.frame.width,
                height: params.frame.height,
                fit: params.fit,
                quality: params.quality.value(),
                blur_sigma: params.blur_sigma,
            });

            {
                let mut fail_next = self.fail_next.lock().unwrap();
                if *fail_next > 0 {
                    *fail_next -= 1;
                    return Err(BackendError::Encode {
                        path: params.output.clone(),
                        message: "mock render failure".to_string(),
                    });
                }
            }

            let armed = self
                .fail_outputs
                .lock()
                .unwrap()
                .iter()
                .any(|pattern| output.contains(pattern));
            if armed {
                return Err(BackendError::Encode {
                    path: params.output.clone(),
                    message: "mock render failure".to_string(),
                });
            }

            // Best-effort: lets presence checks see the output on later runs.
            let _ = std::fs::write(&params.output, b"");
            Ok(())
        }
    }

    fn render_params(output: &str, fit: FitMode) -> RenderParams {
        RenderParams {
            source: "/gallery/wallpapers/anime/gojo.jpg".into(),
            output: output.into(),
            frame: FrameSize::new(1920, 1080),
            fit,
            format: OutputFormat::Webp,
            quality: Quality::new(85),
            blur_sigma: 50.0,
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 3840,
            height: 2160,
        }]);

        let dims = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(dims.width, 3840);
        assert_eq!(dims.height, 2160);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_identify_without_dimensions_errors() {
        let backend = MockBackend::new();
        assert!(backend.identify(Path::new("/test/image.jpg")).is_err());
    }

    #[test]
    fn mock_records_render() {
        let backend = MockBackend::new();
        backend
            .render(&render_params("/test/out/gojo.webp", FitMode::Cover))
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Render {
                width: 1920,
                height: 1080,
                fit: FitMode::Cover,
                quality: 85,
                ..
            }
        ));
    }

    #[test]
    fn mock_failure_injection_matches_by_substring() {
        let backend = MockBackend::new();
        backend.fail_outputs_matching("thumbnails/");

        let full = backend.render(&render_params("/g/optimized/anime/a.webp", FitMode::Cover));
        let thumb = backend.render(&render_params(
            "/g/thumbnails/anime/a.webp",
            FitMode::Cover,
        ));

        assert!(full.is_ok());
        assert!(matches!(thumb, Err(BackendError::Encode { .. })));
        assert_eq!(backend.render_count(), 2);
    }

    #[test]
    fn mock_fail_next_renders_counts_down() {
        let backend = MockBackend::new();
        backend.fail_next_renders(2);

        assert!(backend.render(&render_params("/g/a.webp", FitMode::Cover)).is_err());
        assert!(backend.render(&render_params("/g/b.webp", FitMode::Cover)).is_err());
        assert!(backend.render(&render_params("/g/c.webp", FitMode::Cover)).is_ok());
    }

    #[test]
    fn mock_identify_failure_flag() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 100,
            height: 100,
        }]);
        backend.fail_identify();
        assert!(backend.identify(Path::new("/test/image.jpg")).is_err());
    }
}
