//! Texture atlas handling.
//!
//! The block atlas is a single RGBA image split into a 16x16 grid of tiles. This module
//! turns atlas bytes into normalized `f32` texels and owns the GPU texture they are
//! uploaded to. A missing or broken atlas never stops the engine: it degrades to a
//! zeroed fallback texture.

use std::path::Path;

use crate::engine_state::buffer_state::{BufferState, TextureHandle};
use crate::error::AtlasError;

/// Default atlas edge length in pixels.
pub const DEFAULT_ATLAS_DIMENSION: u32 = 256;

/// CPU-side atlas texels, four normalized channels per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureAtlas {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// RGBA samples in `[0, 1]`, row-major
    pub texels: Vec<f32>,
    /// Whether this atlas is the fallback produced after a load failure
    pub is_fallback: bool,
}

impl TextureAtlas {
    /// Creates the constant fallback atlas: every channel of every pixel is zero.
    pub fn fallback(width: u32, height: u32) -> Self {
        TextureAtlas {
            width,
            height,
            texels: vec![0.0; channel_count(width, height)],
            is_fallback: true,
        }
    }

    /// Normalizes raw RGBA bytes into texels.
    ///
    /// Bytes beyond `width * height * 4` are ignored; missing bytes leave zeroed texels.
    pub fn from_rgba_bytes(bytes: &[u8], width: u32, height: u32) -> Self {
        let mut texels = vec![0.0; channel_count(width, height)];
        for (texel, byte) in texels.iter_mut().zip(bytes) {
            *texel = f32::from(*byte) / 255.0;
        }

        TextureAtlas {
            width,
            height,
            texels,
            is_fallback: false,
        }
    }

    /// Decodes an encoded image (PNG) into texels.
    ///
    /// # Errors
    /// [`AtlasError::Decode`] if the image is unreadable, [`AtlasError::SizeMismatch`] if
    /// it does not have the expected dimensions.
    pub fn decode(encoded: &[u8], width: u32, height: u32) -> Result<Self, AtlasError> {
        let image = image::load_from_memory(encoded)?.to_rgba8();
        if image.width() != width || image.height() != height {
            return Err(AtlasError::SizeMismatch {
                expected_width: width,
                expected_height: height,
                actual_width: image.width(),
                actual_height: image.height(),
            });
        }

        Ok(Self::from_rgba_bytes(image.as_raw(), width, height))
    }

    /// Reads an atlas from disk.
    ///
    /// `.png` files are decoded; anything else is read as raw RGBA bytes.
    ///
    /// # Errors
    /// Any [`AtlasError`] raised while reading or decoding.
    pub fn load(path: &Path, width: u32, height: u32) -> Result<Self, AtlasError> {
        let bytes = std::fs::read(path)?;
        let is_png = path
            .extension()
            .map_or(false, |extension| extension.eq_ignore_ascii_case("png"));

        if is_png {
            Self::decode(&bytes, width, height)
        } else {
            Ok(Self::from_rgba_bytes(&bytes, width, height))
        }
    }

    /// Reads an atlas from disk, falling back to [`TextureAtlas::fallback`] on failure.
    pub fn load_or_fallback(path: &Path, width: u32, height: u32) -> Self {
        match Self::load(path, width, height) {
            Ok(atlas) => {
                log::info!("Loaded texture atlas {}", path.display());
                atlas
            }
            Err(error) => {
                log::warn!(
                    "Failed to load texture atlas {}: {}. Using fallback texture",
                    path.display(),
                    error
                );
                Self::fallback(width, height)
            }
        }
    }

    /// Uploads the atlas as a GPU texture.
    pub fn upload(&self, buffer_state: &mut BufferState) -> AtlasTexture {
        AtlasTexture {
            handle: buffer_state.create_texture(
                "Texture Atlas",
                self.width,
                self.height,
                &self.texels,
            ),
        }
    }
}

/// The GPU copy of the atlas. Must be released with [`AtlasTexture::release`].
#[derive(Debug)]
#[must_use = "the atlas texture must be released through BufferState"]
pub struct AtlasTexture {
    handle: TextureHandle,
}

impl AtlasTexture {
    /// The texture handle to bind when drawing chunks.
    pub fn handle(&self) -> &TextureHandle {
        &self.handle
    }

    /// Releases the texture.
    pub fn release(self, buffer_state: &mut BufferState) {
        buffer_state.release_texture(self.handle);
    }
}

/// Number of RGBA channels in a `width` x `height` atlas.
fn channel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::HeadlessBackend;

    #[test]
    fn raw_bytes_are_normalized() {
        let atlas = TextureAtlas::from_rgba_bytes(&[255, 0, 51, 255], 1, 1);
        assert_eq!(atlas.texels, vec![1.0, 0.0, 0.2, 1.0]);
        assert!(!atlas.is_fallback);
    }

    #[test]
    fn short_input_leaves_zeroed_texels() {
        let atlas = TextureAtlas::from_rgba_bytes(&[255, 255], 2, 1);
        assert_eq!(atlas.texels.len(), 8);
        assert_eq!(&atlas.texels[2..], &[0.0; 6]);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn channel_count_does_not_wrap_at_u32() {
        assert_eq!(channel_count(256, 256), 262_144);
        assert_eq!(channel_count(65_536, 16_384), 1usize << 32);
    }

    #[test]
    fn undecodable_bytes_are_an_error() {
        assert!(matches!(
            TextureAtlas::decode(b"definitely not a png", 256, 256),
            Err(AtlasError::Decode(_))
        ));
    }

    #[test]
    fn missing_file_degrades_to_fallback() {
        let atlas =
            TextureAtlas::load_or_fallback(Path::new("does/not/exist.raw"), 4, 4);
        assert!(atlas.is_fallback);
        assert!(atlas.texels.iter().all(|texel| *texel == 0.0));
    }

    #[test]
    fn uploaded_atlas_is_released_exactly_once() {
        let mut buffer_state = BufferState::new(Box::new(HeadlessBackend::default()));
        let texture = TextureAtlas::fallback(2, 2).upload(&mut buffer_state);
        assert_eq!(buffer_state.live_texture_count(), 1);
        let other = TextureAtlas::fallback(2, 2).upload(&mut buffer_state);
        assert_ne!(texture.handle(), other.handle());
        other.release(&mut buffer_state);

        texture.release(&mut buffer_state);
        assert!(buffer_state.leak_check().is_ok());
    }
}
