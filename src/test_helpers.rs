//! Shared test utilities for the wallgen test suite.
//!
//! Synthetic JPEG fixtures, written to disk where a test needs them. The
//! pixel content is a deterministic gradient, so decoded results are stable
//! across runs without binary fixtures in the repo.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::{write_test_jpeg, write_test_jpeg_with_orientation};
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! write_test_jpeg(&tmp.path().join("plain.jpg"), 200, 150);
//!
//! // Stored 120x80, EXIF says rotate 90° — displays as 80x120.
//! write_test_jpeg_with_orientation(&tmp.path().join("rotated.jpg"), 120, 80, 6);
//! ```

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use std::path::Path;

/// Write a gradient JPEG with the given stored dimensions.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, encode_test_jpeg(width, height)).unwrap();
}

/// Write a gradient JPEG carrying an EXIF orientation tag.
///
/// The stored pixel dimensions are `width` x `height`; a reader that honors
/// the tag will display orientations 5 through 8 with the axes swapped.
pub fn write_test_jpeg_with_orientation(path: &Path, width: u32, height: u32, orientation: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }

    let jpeg = encode_test_jpeg(width, height);
    let app1 = exif_orientation_app1(orientation as u16);

    // Splice the APP1 segment right after the SOI marker.
    let mut bytes = Vec::with_capacity(jpeg.len() + app1.len());
    bytes.extend_from_slice(&jpeg[..2]);
    bytes.extend_from_slice(&app1);
    bytes.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, bytes).unwrap();
}

fn encode_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, 90)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    bytes
}

/// Build a minimal EXIF APP1 segment holding one Orientation entry.
///
/// Layout: APP1 marker and length, `Exif\0\0`, then a little-endian TIFF
/// block with a single-entry IFD0. 36 bytes total.
fn exif_orientation_app1(orientation: u16) -> Vec<u8> {
    let mut seg = vec![0xFF, 0xE1, 0x00, 0x22];
    seg.extend_from_slice(b"Exif\0\0");
    // TIFF header: byte order, magic 42, offset of IFD0.
    seg.extend_from_slice(b"II");
    seg.extend_from_slice(&42u16.to_le_bytes());
    seg.extend_from_slice(&8u32.to_le_bytes());
    // IFD0: one entry, tag 0x0112 (Orientation), type SHORT, count 1.
    seg.extend_from_slice(&1u16.to_le_bytes());
    seg.extend_from_slice(&0x0112u16.to_le_bytes());
    seg.extend_from_slice(&3u16.to_le_bytes());
    seg.extend_from_slice(&1u32.to_le_bytes());
    seg.extend_from_slice(&orientation.to_le_bytes());
    seg.extend_from_slice(&[0, 0]);
    // No next IFD.
    seg.extend_from_slice(&0u32.to_le_bytes());
    seg
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_jpeg_has_requested_dimensions() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("img.jpg");
        write_test_jpeg(&path, 64, 48);

        assert_eq!(image::image_dimensions(&path).unwrap(), (64, 48));
    }

    #[test]
    fn app1_segment_length_matches_marker() {
        let seg = exif_orientation_app1(6);
        assert_eq!(seg.len(), 36);
        // Declared length covers everything after the FF E1 marker.
        let declared = u16::from_be_bytes([seg[2], seg[3]]) as usize;
        assert_eq!(declared, seg.len() - 2);
    }

    #[test]
    fn orientation_tag_is_readable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("rotated.jpg");
        write_test_jpeg_with_orientation(&path, 120, 80, 6);

        let file = std::fs::File::open(&path).unwrap();
        let mut reader = std::io::BufReader::new(file);
        let exif = exif::Reader::new().read_from_container(&mut reader).unwrap();
        let field = exif
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .unwrap();
        assert_eq!(field.value.get_uint(0), Some(6));
    }

    #[test]
    fn orientation_does_not_change_stored_dimensions() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("rotated.jpg");
        write_test_jpeg_with_orientation(&path, 120, 80, 8);

        // The raw container stays 120x80; orientation is display metadata.
        assert_eq!(image::image_dimensions(&path).unwrap(), (120, 80));
    }
}
