use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::color::Color;
use crate::error::SampleError;
use crate::format::Format;
use crate::limits::Limits;
use crate::quantize::Channel;

/// A decoded rectangular image: the defiltered sample buffer, its dimensions
/// and its format. Samples may be borrowed (zero-copy) or owned.
///
/// Holds no logic of its own; `unpack*` forward to [`Color::unpack`] and
/// [`unpack_values`](crate::unpack_values).
#[derive(Clone, Debug)]
pub struct ImageData<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub format: Format<'a>,
}

impl<'a> ImageData<'a> {
    /// Wrap a sample buffer without copying it.
    ///
    /// The buffer must hold exactly `width * height` pixels, and the format
    /// must pass [`Format::validate`].
    pub fn borrowed(
        data: &'a [u8],
        width: u32,
        height: u32,
        format: Format<'a>,
    ) -> Result<Self, SampleError> {
        Self::new(Cow::Borrowed(data), width, height, format)
    }

    /// Take ownership of a sample buffer. Same checks as [`Self::borrowed`].
    pub fn owned(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: Format<'a>,
    ) -> Result<Self, SampleError> {
        Self::new(Cow::Owned(data), width, height, format)
    }

    fn new(
        pixels: Cow<'a, [u8]>,
        width: u32,
        height: u32,
        format: Format<'a>,
    ) -> Result<Self, SampleError> {
        format.validate()?;
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(format.bytes_per_pixel()))
            .ok_or(SampleError::DimensionsTooLarge { width, height })?;
        if pixels.len() < expected {
            return Err(SampleError::BufferTooSmall {
                needed: expected,
                actual: pixels.len(),
            });
        }
        if pixels.len() > expected {
            return Err(SampleError::BufferLength {
                len: pixels.len(),
                stride: format.bytes_per_pixel(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            format,
        })
    }

    /// Encode `colors` (one per pixel, scan order) into a new image.
    pub fn pack<C: Color>(
        colors: &[C],
        width: u32,
        height: u32,
        format: Format<'a>,
    ) -> Result<Self, SampleError> {
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(SampleError::DimensionsTooLarge { width, height })?;
        if colors.len() != count {
            return Err(SampleError::DimensionMismatch {
                len: colors.len(),
                width,
                height,
            });
        }
        let data = C::pack(colors, &format)?;
        Self::owned(data, width, height, format)
    }

    /// Access the sample buffer.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Whether the sample buffer is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Decode every pixel as `C`.
    pub fn unpack<C: Color>(&self) -> Result<Vec<C>, SampleError> {
        C::unpack(&self.pixels, &self.format)
    }

    /// Decode every pixel as `C`, refusing dimensions or output allocations
    /// beyond `limits`.
    pub fn unpack_with_limits<C: Color>(&self, limits: &Limits) -> Result<Vec<C>, SampleError> {
        limits.check(self.width, self.height)?;
        limits.check_memory(self.pixel_count(), core::mem::size_of::<C>())?;
        self.unpack()
    }

    /// Decode only the value channel of every pixel.
    pub fn unpack_values<T: Channel>(&self) -> Result<Vec<T>, SampleError> {
        crate::unpack::unpack_values(&self.pixels, &self.format)
    }

    /// Decode into an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<C: Color>(&self) -> Result<imgref::ImgVec<C>, SampleError> {
        let pixels = self.unpack()?;
        Ok(imgref::ImgVec::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}
