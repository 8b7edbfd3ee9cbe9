//! Pure calculation functions for frame geometry.
//!
//! All functions here are pure and testable without any I/O or images. The
//! backend and the config validator both build on them.

/// Apply the EXIF orientation to raw stored dimensions.
///
/// Orientations 5–8 involve a 90° rotation, so width and height swap.
/// Orientations 1–4 (and anything out of range) leave them unchanged.
///
/// # Examples
/// ```
/// # use wallgen::imaging::oriented_dimensions;
/// // Orientation 6: stored landscape, displays as portrait
/// assert_eq!(oriented_dimensions(4000, 3000, 6), (3000, 4000));
/// assert_eq!(oriented_dimensions(4000, 3000, 1), (4000, 3000));
/// ```
pub fn oriented_dimensions(width: u32, height: u32, orientation: u32) -> (u32, u32) {
    if swaps_axes(orientation) {
        (height, width)
    } else {
        (width, height)
    }
}

/// Whether an EXIF orientation value transposes the image axes.
pub fn swaps_axes(orientation: u32) -> bool {
    (5..=8).contains(&orientation)
}

/// Orientation class after EXIF is applied. Square counts as landscape, so
/// only strictly-taller images get portrait treatment.
pub fn is_portrait(width: u32, height: u32) -> bool {
    height > width
}

/// Calculate dimensions that completely cover a frame (resize before crop).
///
/// Preserves the source aspect ratio; one dimension matches the frame
/// exactly, the other meets or exceeds it.
///
/// # Arguments
/// * `source` - Source image dimensions (width, height)
/// * `frame` - Target frame dimensions (width, height)
///
/// # Examples
/// ```
/// # use wallgen::imaging::cover_dimensions;
/// // 4:3 source covering a 16:9 frame: width matches, height overflows
/// assert_eq!(cover_dimensions((4000, 3000), (1920, 1080)), (1920, 1440));
/// ```
pub fn cover_dimensions(source: (u32, u32), frame: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (frame_w, frame_h) = frame;

    let src_aspect = src_w as f64 / src_h as f64;
    let frame_aspect = frame_w as f64 / frame_h as f64;

    if src_aspect > frame_aspect {
        // Source is wider: height matches, width overflows
        let h = frame_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w, h)
    } else {
        // Source is taller: width matches, height overflows
        let w = frame_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h)
    }
}

/// Calculate dimensions that fit entirely within a frame.
///
/// Preserves the source aspect ratio; one dimension matches the frame
/// exactly, the other fits inside. Small sources are scaled up.
///
/// # Examples
/// ```
/// # use wallgen::imaging::contain_dimensions;
/// // Portrait source inside a 16:9 frame: height matches, pillarboxed
/// assert_eq!(contain_dimensions((1080, 1920), (1920, 1080)), (608, 1080));
/// ```
pub fn contain_dimensions(source: (u32, u32), frame: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (frame_w, frame_h) = frame;

    let src_aspect = src_w as f64 / src_h as f64;
    let frame_aspect = frame_w as f64 / frame_h as f64;

    if src_aspect > frame_aspect {
        // Source is wider: width matches, height fits inside
        let w = frame_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h.max(1))
    } else {
        // Source is taller: height matches, width fits inside
        let h = frame_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w.max(1), h)
    }
}

/// Top-left corner for center-cropping cover-scaled pixels down to the frame.
///
/// `scaled` must meet or exceed `frame` on both axes (the contract of
/// [`cover_dimensions`]); saturates rather than wrapping if it does not.
pub fn crop_origin(scaled: (u32, u32), frame: (u32, u32)) -> (u32, u32) {
    (
        scaled.0.saturating_sub(frame.0) / 2,
        scaled.1.saturating_sub(frame.1) / 2,
    )
}

/// Offset that centers an inner image on a frame, in the signed coordinates
/// `image::imageops::overlay` expects.
pub fn center_offset(frame: (u32, u32), inner: (u32, u32)) -> (i64, i64) {
    (
        (i64::from(frame.0) - i64::from(inner.0)) / 2,
        (i64::from(frame.1) - i64::from(inner.1)) / 2,
    )
}

/// Thumbnail height that preserves the full frame's aspect ratio at the given
/// thumbnail width. Config validation allows ±1 px around this.
pub fn expected_thumb_height(full: (u32, u32), thumb_width: u32) -> u32 {
    (thumb_width as f64 * full.1 as f64 / full.0 as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // oriented_dimensions / swaps_axes tests
    // =========================================================================

    #[test]
    fn orientations_one_through_four_keep_axes() {
        for orientation in 1..=4 {
            assert_eq!(oriented_dimensions(4000, 3000, orientation), (4000, 3000));
        }
    }

    #[test]
    fn orientations_five_through_eight_swap_axes() {
        for orientation in 5..=8 {
            assert_eq!(oriented_dimensions(4000, 3000, orientation), (3000, 4000));
        }
    }

    #[test]
    fn out_of_range_orientation_keeps_axes() {
        assert_eq!(oriented_dimensions(100, 50, 0), (100, 50));
        assert_eq!(oriented_dimensions(100, 50, 9), (100, 50));
    }

    // =========================================================================
    // is_portrait tests
    // =========================================================================

    #[test]
    fn portrait_classing() {
        assert!(is_portrait(1080, 1920));
        assert!(!is_portrait(1920, 1080));
        // Square counts as landscape
        assert!(!is_portrait(1000, 1000));
    }

    // =========================================================================
    // cover_dimensions tests
    // =========================================================================

    #[test]
    fn cover_taller_source_overflows_height() {
        // 4:3 into 16:9: width matches, height 1920/(4/3) = 1440
        assert_eq!(cover_dimensions((4000, 3000), (1920, 1080)), (1920, 1440));
    }

    #[test]
    fn cover_wider_source_overflows_width() {
        // 21:9 into 16:9: height matches, width 1080*(21/9) = 2520
        assert_eq!(cover_dimensions((2520, 1080), (1920, 1080)), (2520, 1080));
    }

    #[test]
    fn cover_matching_aspect_is_exact() {
        assert_eq!(cover_dimensions((3840, 2160), (1920, 1080)), (1920, 1080));
    }

    #[test]
    fn cover_portrait_source_overflows_hugely() {
        // 9:16 into 16:9: width matches, height balloons
        assert_eq!(cover_dimensions((1080, 1920), (1920, 1080)), (1920, 3413));
    }

    #[test]
    fn cover_scales_small_sources_up() {
        assert_eq!(cover_dimensions((960, 540), (1920, 1080)), (1920, 1080));
    }

    // =========================================================================
    // contain_dimensions tests
    // =========================================================================

    #[test]
    fn contain_taller_source_is_pillarboxed() {
        assert_eq!(contain_dimensions((1080, 1920), (1920, 1080)), (608, 1080));
    }

    #[test]
    fn contain_wider_source_is_letterboxed() {
        // 21:9 into 16:9: width matches, height 1920/(21/9) ≈ 823
        assert_eq!(contain_dimensions((2520, 1080), (1920, 1080)), (1920, 823));
    }

    #[test]
    fn contain_matching_aspect_is_exact() {
        assert_eq!(contain_dimensions((960, 540), (1920, 1080)), (1920, 1080));
    }

    #[test]
    fn contain_extreme_panorama_keeps_one_pixel() {
        assert_eq!(contain_dimensions((10000, 2), (1920, 1080)), (1920, 1));
    }

    // =========================================================================
    // crop_origin / center_offset tests
    // =========================================================================

    #[test]
    fn crop_origin_centers_the_overflow() {
        assert_eq!(crop_origin((1920, 1440), (1920, 1080)), (0, 180));
        assert_eq!(crop_origin((2520, 1080), (1920, 1080)), (300, 0));
    }

    #[test]
    fn crop_origin_saturates_on_undersized_input() {
        assert_eq!(crop_origin((100, 100), (1920, 1080)), (0, 0));
    }

    #[test]
    fn center_offset_centers_the_inner_image() {
        assert_eq!(center_offset((1920, 1080), (608, 1080)), (656, 0));
        assert_eq!(center_offset((600, 338), (190, 338)), (205, 0));
    }

    // =========================================================================
    // expected_thumb_height tests
    // =========================================================================

    #[test]
    fn thumb_height_for_default_frames() {
        // 600 wide at 16:9 rounds to 338, not 337
        assert_eq!(expected_thumb_height((1920, 1080), 600), 338);
        assert_eq!(expected_thumb_height((1920, 1080), 400), 225);
    }
}
