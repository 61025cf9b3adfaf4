//! The closed pixel format descriptor.

use alloc::format;

use crate::color::Rgba;
use crate::error::SampleError;
use crate::pixel::PixelLayout;
use crate::quantize::all_ones;

/// A fully resolved pixel format: layout, native depth, and the palette,
/// fill (background) and chroma-key data that go with it.
///
/// Keys and fills are stored at the format's native depth. Sub-byte gray keys
/// occupy the low bits of a `u8`. Indexed fills are palette indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format<'a> {
    /// Palette index, 1 significant bit per byte.
    Indexed1 {
        palette: &'a [Rgba<u8>],
        fill: Option<u8>,
    },
    /// Palette index, 2 significant bits per byte.
    Indexed2 {
        palette: &'a [Rgba<u8>],
        fill: Option<u8>,
    },
    /// Palette index, 4 significant bits per byte.
    Indexed4 {
        palette: &'a [Rgba<u8>],
        fill: Option<u8>,
    },
    /// Palette index, one byte.
    Indexed8 {
        palette: &'a [Rgba<u8>],
        fill: Option<u8>,
    },
    /// Gray, 1 significant bit per byte.
    Gray1 {
        fill: Option<u8>,
        key: Option<u8>,
    },
    /// Gray, 2 significant bits per byte.
    Gray2 {
        fill: Option<u8>,
        key: Option<u8>,
    },
    /// Gray, 4 significant bits per byte.
    Gray4 {
        fill: Option<u8>,
        key: Option<u8>,
    },
    /// Gray, one byte.
    Gray8 {
        fill: Option<u8>,
        key: Option<u8>,
    },
    /// Gray, one big-endian word.
    Gray16 {
        fill: Option<u16>,
        key: Option<u16>,
    },
    /// Gray + alpha, 8-bit.
    GrayAlpha8 {
        fill: Option<u8>,
    },
    /// Gray + alpha, 16-bit big-endian.
    GrayAlpha16 {
        fill: Option<u16>,
    },
    /// 8-bit RGB. The key is compared as `[r, g, b]`.
    Rgb8 {
        fill: Option<[u8; 3]>,
        key: Option<[u8; 3]>,
    },
    /// 16-bit big-endian RGB.
    Rgb16 {
        fill: Option<[u16; 3]>,
        key: Option<[u16; 3]>,
    },
    /// 8-bit BGR. The key is in buffer order, `[b, g, r]`.
    Bgr8 {
        fill: Option<[u8; 3]>,
        key: Option<[u8; 3]>,
    },
    /// 8-bit RGBA.
    Rgba8 {
        fill: Option<[u8; 4]>,
    },
    /// 16-bit big-endian RGBA.
    Rgba16 {
        fill: Option<[u16; 4]>,
    },
    /// 8-bit BGRA.
    Bgra8 {
        fill: Option<[u8; 4]>,
    },
}

impl<'a> Format<'a> {
    /// The buffer layout this format describes.
    pub const fn layout(&self) -> PixelLayout {
        match self {
            Self::Indexed1 { .. } => PixelLayout::Indexed1,
            Self::Indexed2 { .. } => PixelLayout::Indexed2,
            Self::Indexed4 { .. } => PixelLayout::Indexed4,
            Self::Indexed8 { .. } => PixelLayout::Indexed8,
            Self::Gray1 { .. } => PixelLayout::Gray1,
            Self::Gray2 { .. } => PixelLayout::Gray2,
            Self::Gray4 { .. } => PixelLayout::Gray4,
            Self::Gray8 { .. } => PixelLayout::Gray8,
            Self::Gray16 { .. } => PixelLayout::Gray16,
            Self::GrayAlpha8 { .. } => PixelLayout::GrayAlpha8,
            Self::GrayAlpha16 { .. } => PixelLayout::GrayAlpha16,
            Self::Rgb8 { .. } => PixelLayout::Rgb8,
            Self::Rgb16 { .. } => PixelLayout::Rgb16,
            Self::Bgr8 { .. } => PixelLayout::Bgr8,
            Self::Rgba8 { .. } => PixelLayout::Rgba8,
            Self::Rgba16 { .. } => PixelLayout::Rgba16,
            Self::Bgra8 { .. } => PixelLayout::Bgra8,
        }
    }

    /// Significant bits per sample.
    pub const fn depth(&self) -> u32 {
        self.layout().depth()
    }

    /// Bytes per pixel in the sample buffer.
    pub const fn bytes_per_pixel(&self) -> usize {
        self.layout().bytes_per_pixel()
    }

    /// The palette, for indexed formats.
    pub const fn palette(&self) -> Option<&'a [Rgba<u8>]> {
        match *self {
            Self::Indexed1 { palette, .. }
            | Self::Indexed2 { palette, .. }
            | Self::Indexed4 { palette, .. }
            | Self::Indexed8 { palette, .. } => Some(palette),
            _ => None,
        }
    }

    /// Number of whole pixels in a buffer of `len` bytes.
    ///
    /// Returns [`SampleError::BufferLength`] if `len` is not a multiple of
    /// the pixel stride.
    pub fn pixel_count(&self, len: usize) -> Result<usize, SampleError> {
        let stride = self.bytes_per_pixel();
        if len % stride != 0 {
            return Err(SampleError::BufferLength { len, stride });
        }
        Ok(len / stride)
    }

    /// Check that palette size, fill and key fit the format's depth.
    ///
    /// `unpack` and `pack` do not call this. A descriptor built from file
    /// data should be checked here first.
    pub fn validate(&self) -> Result<(), SampleError> {
        let depth = self.depth();
        match *self {
            Self::Indexed1 { palette, fill }
            | Self::Indexed2 { palette, fill }
            | Self::Indexed4 { palette, fill }
            | Self::Indexed8 { palette, fill } => {
                let max = 1usize << depth;
                if palette.is_empty() {
                    return Err(SampleError::InvalidFormat("palette is empty".into()));
                }
                if palette.len() > max {
                    return Err(SampleError::InvalidFormat(format!(
                        "palette has {} entries, {depth}-bit indices address at most {max}",
                        palette.len()
                    )));
                }
                if let Some(fill) = fill {
                    if usize::from(fill) >= palette.len() {
                        return Err(SampleError::InvalidFormat(format!(
                            "fill index {fill} out of range (palette has {} entries)",
                            palette.len()
                        )));
                    }
                }
            }
            Self::Gray1 { fill, key }
            | Self::Gray2 { fill, key }
            | Self::Gray4 { fill, key }
            | Self::Gray8 { fill, key } => {
                let max = all_ones(depth);
                for (what, value) in [("fill", fill), ("key", key)] {
                    if let Some(value) = value {
                        if u64::from(value) > max {
                            return Err(SampleError::InvalidFormat(format!(
                                "{what} {value} does not fit in {depth} bits"
                            )));
                        }
                    }
                }
            }
            // 8- and 16-bit samples cannot exceed their storage type
            Self::Gray16 { .. }
            | Self::GrayAlpha8 { .. }
            | Self::GrayAlpha16 { .. }
            | Self::Rgb8 { .. }
            | Self::Rgb16 { .. }
            | Self::Bgr8 { .. }
            | Self::Rgba8 { .. }
            | Self::Rgba16 { .. }
            | Self::Bgra8 { .. } => {}
        }
        Ok(())
    }
}
