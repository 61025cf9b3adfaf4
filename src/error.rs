use alloc::string::String;

/// Errors from sample unpacking and packing.
///
/// Every variant is a caller contract violation detected at the call
/// boundary; the engines themselves never fail once these checks pass.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SampleError {
    #[error("sample buffer length {len} is not a multiple of the {stride}-byte pixel stride")]
    BufferLength { len: usize, stride: usize },

    #[error("palette index {index} at pixel {offset} out of range (palette has {len} entries)")]
    PaletteIndexOutOfRange {
        index: usize,
        offset: usize,
        len: usize,
    },

    #[error("indexer returned {index}, outside palette of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid format descriptor: {0}")]
    InvalidFormat(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("{len} colors do not match dimensions {width}x{height}")]
    DimensionMismatch { len: usize, width: u32, height: u32 },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}
