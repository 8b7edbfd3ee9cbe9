//! Image transforms — decode, orient, fit, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` + EXIF orientation |
//! | **Fit** | Lanczos3 resize, center crop/overlay |
//! | **Letterbox backdrop** | `fast_blur` + 60% brightness |
//! | **Encode** | libwebp (WebP) / `image` (JPEG) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for frame geometry (unit testable)
//! - **Parameters**: Data structures describing renders
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
pub mod calculations;
pub mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    center_offset, contain_dimensions, cover_dimensions, crop_origin, expected_thumb_height,
    is_portrait, oriented_dimensions, swaps_axes,
};
pub use params::{
    BACKDROP_BRIGHTNESS, FULL_BLUR_SIGMA, FitMode, FrameSize, OutputFormat, PortraitProfile,
    Quality, RenderParams, THUMB_BLUR_SIGMA,
};
pub use rust_backend::RustBackend;
