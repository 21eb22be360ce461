//! Saving captured frames to image files.

use std::path::Path;

use image::{ImageBuffer, Rgba};

/// Error type for screenshot operations.
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Unsupported surface format: {0:?}")]
    UnsupportedSurfaceFormat(wgpu::TextureFormat),

    #[error("Invalid image data")]
    InvalidImageData,

    #[error("GPU buffer mapping failed")]
    BufferMapFailed,
}

/// Returns the file name used for a capture of frame `frame_index`.
///
/// `serial` disambiguates repeated saves of the same frame.
#[must_use]
pub fn capture_file_name(frame_index: usize, serial: u32) -> String {
    if serial == 0 {
        format!("pose_frame_{frame_index:04}.png")
    } else {
        format!("pose_frame_{frame_index:04}_{serial}.png")
    }
}

/// Swaps BGRA pixel data to RGBA in place.
pub fn bgra_to_rgba(data: &mut [u8]) {
    for chunk in data.chunks_exact_mut(4) {
        chunk.swap(0, 2);
    }
}

/// Saves RGBA pixel data as a PNG file.
///
/// # Errors
/// Returns an error if the data does not match the dimensions, the path does
/// not end in `.png`, or the file cannot be written.
pub fn save_image(
    path: impl AsRef<Path>,
    rgba: Vec<u8>,
    width: u32,
    height: u32,
) -> Result<(), ScreenshotError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if extension != "png" {
        return Err(ScreenshotError::UnsupportedFormat(extension));
    }

    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, rgba).ok_or(ScreenshotError::InvalidImageData)?;
    img.save_with_format(path, image::ImageFormat::Png)?;

    log::info!("saved {}x{} capture to {}", width, height, path.display());
    Ok(())
}
