//! Production image backend — pure Rust decoders plus libwebp for encoding.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP) | `image` crate (pure Rust decoders) |
//! | EXIF orientation | `kamadak-exif` (tag read; rotation baked here) |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Backdrop blur | `image::imageops::fast_blur` |
//! | Compositing | `image::imageops::overlay` on an RGB canvas |
//! | Encode → WebP | `webp` crate (libwebp, lossy quality-tunable) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//!
//! The `image` crate's own WebP encoder is lossless-only, which is why lossy
//! WebP goes through libwebp bindings instead.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{
    center_offset, contain_dimensions, cover_dimensions, crop_origin, oriented_dimensions,
};
use super::params::{BACKDROP_BRIGHTNESS, FitMode, OutputFormat, RenderParams};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageEncoder, ImageReader, RgbImage};
use std::path::Path;

/// Production backend. Stateless; construct once and reuse.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the EXIF orientation tag, returning the neutral value 1 when the
/// file has no EXIF data or it cannot be parsed.
fn read_orientation(path: &Path) -> u32 {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(_) => return 1,
    };
    let mut reader = std::io::BufReader::new(file);
    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(_) => return 1,
    };
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .unwrap_or(1)
}

/// Bake an EXIF orientation into the pixels.
fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

/// Decode a source image and bake its EXIF orientation in.
fn load_oriented(path: &Path) -> Result<DynamicImage, BackendError> {
    let img = ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| BackendError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(apply_orientation(img, read_orientation(path)))
}

/// Scale to fill the frame, then center-crop the overflow.
fn render_cover(img: &RgbImage, frame: (u32, u32)) -> RgbImage {
    let scaled_dims = cover_dimensions((img.width(), img.height()), frame);
    let scaled = imageops::resize(img, scaled_dims.0, scaled_dims.1, FilterType::Lanczos3);
    let (x, y) = crop_origin(scaled_dims, frame);
    imageops::crop_imm(&scaled, x, y, frame.0, frame.1).to_image()
}

/// Scale to fit inside the frame, centered on a black canvas.
fn render_contain(img: &RgbImage, frame: (u32, u32)) -> RgbImage {
    let inner_dims = contain_dimensions((img.width(), img.height()), frame);
    let inner = imageops::resize(img, inner_dims.0, inner_dims.1, FilterType::Lanczos3);
    let mut canvas = RgbImage::new(frame.0, frame.1);
    let (dx, dy) = center_offset(frame, inner_dims);
    imageops::overlay(&mut canvas, &inner, dx, dy);
    canvas
}

/// Contain the image over a blurred, darkened cover render of itself.
fn render_letterbox_blur(img: &RgbImage, frame: (u32, u32), sigma: f32) -> RgbImage {
    let mut backdrop = imageops::fast_blur(&render_cover(img, frame), sigma);
    darken(&mut backdrop, BACKDROP_BRIGHTNESS);

    let inner_dims = contain_dimensions((img.width(), img.height()), frame);
    let inner = imageops::resize(img, inner_dims.0, inner_dims.1, FilterType::Lanczos3);
    let (dx, dy) = center_offset(frame, inner_dims);
    imageops::overlay(&mut backdrop, &inner, dx, dy);
    backdrop
}

/// Multiply every channel by `factor`, clamped to the u8 range.
fn darken(img: &mut RgbImage, factor: f32) {
    for pixel in img.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = (f32::from(*channel) * factor).round().clamp(0.0, 255.0) as u8;
        }
    }
}

fn save_webp(img: &RgbImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let encoder = webp::Encoder::from_rgb(img.as_raw(), img.width(), img.height());
    let encoded = encoder.encode(quality as f32);
    std::fs::write(path, &*encoded).map_err(BackendError::Io)
}

fn save_jpeg(img: &RgbImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality as u8)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| BackendError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) =
            image::image_dimensions(path).map_err(|e| BackendError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let (width, height) = oriented_dimensions(width, height, read_orientation(path));
        Ok(Dimensions { width, height })
    }

    fn render(&self, params: &RenderParams) -> Result<(), BackendError> {
        let rgb = load_oriented(&params.source)?.to_rgb8();
        let frame = params.frame.as_tuple();

        let rendered = match params.fit {
            FitMode::Cover => render_cover(&rgb, frame),
            FitMode::CoverRotate => render_cover(&imageops::rotate90(&rgb), frame),
            FitMode::LetterboxBlur => render_letterbox_blur(&rgb, frame, params.blur_sigma),
            FitMode::Contain => render_contain(&rgb, frame),
        };

        match params.format {
            OutputFormat::Webp => save_webp(&rendered, &params.output, params.quality.value()),
            OutputFormat::Jpeg => save_jpeg(&rendered, &params.output, params.quality.value()),
        }
    }
}
