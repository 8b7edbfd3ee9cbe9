//! Parameter types for render operations.
//!
//! These structs describe *what* to produce, not *how* to produce it. They
//! are the interface between the [`process`](crate::process) driver (which
//! decides what derivatives each wallpaper needs) and the
//! [`backend`](super::backend) (which does the actual pixel work). The
//! separation allows swapping backends (e.g. for testing with a mock) without
//! changing pipeline logic.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100). Clamped on construction.
//! - [`FrameSize`] — Exact output dimensions; every derivative matches its
//!   frame pixel-for-pixel.
//! - [`FitMode`] — How source pixels map into the frame.
//! - [`OutputFormat`] — Encoding for derivative files (WebP or JPEG).
//! - [`PortraitProfile`] — Which fit mode portrait sources get.
//! - [`RenderParams`] — Full specification for one render: source, output,
//!   frame, fit, format, quality, backdrop blur.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Gaussian blur sigma for the full-size letterbox backdrop.
pub const FULL_BLUR_SIGMA: f32 = 50.0;

/// Gaussian blur sigma for the thumbnail letterbox backdrop.
pub const THUMB_BLUR_SIGMA: f32 = 20.0;

/// Brightness multiplier applied to the letterbox backdrop so the foreground
/// reads clearly against it.
pub const BACKDROP_BRIGHTNESS: f32 = 0.6;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// Exact pixel dimensions of a derivative.
///
/// Serialized as a two-element array (`[1920, 1080]` in TOML).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl From<(u32, u32)> for FrameSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl From<FrameSize> for (u32, u32) {
    fn from(frame: FrameSize) -> Self {
        (frame.width, frame.height)
    }
}

/// How source pixels map into the output frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    /// Scale to fill the frame, center-cropping the overflow.
    Cover,
    /// Rotate 90° first (forcing landscape), then cover.
    CoverRotate,
    /// Contain the image centered over a blurred, darkened cover render of
    /// itself.
    LetterboxBlur,
    /// Contain the image centered on a black background.
    Contain,
}

/// Derivative file encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Webp,
    Jpeg,
}

impl OutputFormat {
    /// File extension for derivative paths.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Webp => "webp",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Webp
    }
}

/// Treatment for portrait sources (landscape always gets [`FitMode::Cover`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortraitProfile {
    /// Contain over a blurred cover backdrop.
    LetterboxBlur,
    /// Rotate to landscape, then cover.
    CoverRotate,
}

impl PortraitProfile {
    pub fn fit_mode(self) -> FitMode {
        match self {
            PortraitProfile::LetterboxBlur => FitMode::LetterboxBlur,
            PortraitProfile::CoverRotate => FitMode::CoverRotate,
        }
    }

    /// The config spelling, also used when hashing render parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            PortraitProfile::LetterboxBlur => "letterbox-blur",
            PortraitProfile::CoverRotate => "cover-rotate",
        }
    }
}

impl Default for PortraitProfile {
    fn default() -> Self {
        PortraitProfile::LetterboxBlur
    }
}

/// Full specification for rendering one derivative.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub frame: FrameSize,
    pub fit: FitMode,
    pub format: OutputFormat,
    pub quality: Quality,
    /// Backdrop blur sigma. Only [`FitMode::LetterboxBlur`] reads it.
    pub blur_sigma: f32,
}
