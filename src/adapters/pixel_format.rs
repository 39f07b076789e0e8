//! Pixel format conversion helpers for presentation adapters.

use crate::core::data::framebuffer::{Framebuffer, FramebufferError};

/// Copies RGB pixel data to RGBA format, setting alpha to 255.
///
/// # Panics
/// Panics if buffer sizes don't match (dst.len() must equal src.len() / 3 * 4)
/// or if `src` is not a multiple of 3.
pub fn copy_rgb_to_rgba(src: &[u8], dst: &mut [u8]) {
    assert!(
        src.len() % 3 == 0,
        "src length {} is not a multiple of 3",
        src.len()
    );
    let expected_dst_len = (src.len() / 3) * 4;
    assert_eq!(
        dst.len(),
        expected_dst_len,
        "dst length {} does not match expected {}",
        dst.len(),
        expected_dst_len
    );

    for (src_pixel, dst_pixel) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        dst_pixel[..3].copy_from_slice(src_pixel);
        dst_pixel[3] = 255;
    }
}

/// Writes a rendered frame into an RGBA surface of the same dimensions.
///
/// A surface of the wrong size (e.g. a frame rendered before a window
/// resize) is reported rather than partially drawn.
pub fn copy_framebuffer_to_rgba(
    framebuffer: &Framebuffer,
    dst: &mut [u8],
) -> Result<(), FramebufferError> {
    let expected = framebuffer.width() as usize * framebuffer.height() as usize * 4;

    if dst.len() != expected {
        return Err(FramebufferError::SizeMismatch {
            expected,
            actual: dst.len(),
        });
    }

    copy_rgb_to_rgba(framebuffer.buffer(), dst);

    Ok(())
}
