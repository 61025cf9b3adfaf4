/// Channel layout and native bit depth of a sample buffer, without the
/// palette, key or fill data a [`Format`](crate::Format) carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Palette index, 1 significant bit per byte.
    Indexed1,
    /// Palette index, 2 significant bits per byte.
    Indexed2,
    /// Palette index, 4 significant bits per byte.
    Indexed4,
    /// Palette index, one byte.
    Indexed8,
    /// Gray, 1 significant bit per byte.
    Gray1,
    /// Gray, 2 significant bits per byte.
    Gray2,
    /// Gray, 4 significant bits per byte.
    Gray4,
    /// Gray, one byte.
    Gray8,
    /// Gray, one big-endian word.
    Gray16,
    /// Gray + alpha, 8-bit.
    GrayAlpha8,
    /// Gray + alpha, 16-bit big-endian.
    GrayAlpha16,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 3 channels, 16-bit big-endian RGB.
    Rgb16,
    /// 3 channels, 8-bit BGR.
    Bgr8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 4 channels, 16-bit big-endian RGBA.
    Rgba16,
    /// 4 channels, 8-bit BGRA.
    Bgra8,
}

impl PixelLayout {
    /// Significant bits per sample.
    pub const fn depth(&self) -> u32 {
        match self {
            Self::Indexed1 | Self::Gray1 => 1,
            Self::Indexed2 | Self::Gray2 => 2,
            Self::Indexed4 | Self::Gray4 => 4,
            Self::Indexed8
            | Self::Gray8
            | Self::GrayAlpha8
            | Self::Rgb8
            | Self::Bgr8
            | Self::Rgba8
            | Self::Bgra8 => 8,
            Self::Gray16 | Self::GrayAlpha16 | Self::Rgb16 | Self::Rgba16 => 16,
        }
    }

    /// Number of samples per pixel.
    pub const fn channels(&self) -> usize {
        match self {
            Self::Indexed1
            | Self::Indexed2
            | Self::Indexed4
            | Self::Indexed8
            | Self::Gray1
            | Self::Gray2
            | Self::Gray4
            | Self::Gray8
            | Self::Gray16 => 1,
            Self::GrayAlpha8 | Self::GrayAlpha16 => 2,
            Self::Rgb8 | Self::Rgb16 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Rgba16 | Self::Bgra8 => 4,
        }
    }

    /// Bytes one sample occupies in the buffer: 2 for 16-bit layouts, else 1.
    pub const fn bytes_per_sample(&self) -> usize {
        if self.depth() > 8 { 2 } else { 1 }
    }

    /// Bytes per pixel for this layout.
    pub const fn bytes_per_pixel(&self) -> usize {
        self.channels() * self.bytes_per_sample()
    }

    /// Whether samples are palette indices.
    pub const fn is_indexed(&self) -> bool {
        matches!(
            self,
            Self::Indexed1 | Self::Indexed2 | Self::Indexed4 | Self::Indexed8
        )
    }

    /// Whether the buffer stores an explicit alpha sample per pixel.
    pub const fn has_alpha(&self) -> bool {
        matches!(
            self,
            Self::GrayAlpha8 | Self::GrayAlpha16 | Self::Rgba8 | Self::Rgba16 | Self::Bgra8
        )
    }

    /// Whether the color samples are stored blue first.
    pub const fn is_bgr(&self) -> bool {
        matches!(self, Self::Bgr8 | Self::Bgra8)
    }
}
