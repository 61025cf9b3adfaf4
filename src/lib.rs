//! # zensample
//!
//! Interleaved pixel-sample codec: converts between a decoded sample buffer
//! (one byte, or one big-endian word, per channel sample) and typed color
//! records at any integer precision.
//!
//! ## What it does
//!
//! - **Unpack** indexed, gray, gray-alpha, RGB/BGR and RGBA/BGRA buffers at
//!   depths 1/2/4/8/16 into [`Rgba<T>`] or [`Va<T>`] for `T` in
//!   `u8`/`u16`/`u32`/`u64`.
//! - **Pack** records back into a buffer, rescaling to the native depth and
//!   resolving palette indices through an [`Indexer`].
//! - **Rescale** exactly at the boundaries: depth-`d` zero maps to zero and
//!   depth-`d` maximum maps to `T::MAX`.
//! - **Premultiply** alpha with round-half-up at any width, without overflow.
//!
//! Chroma keys are compared against raw samples before any rescaling.
//!
//! ## Non-Goals
//!
//! - Container parsing, checksums, decompression, defiltering
//! - Sub-byte bit unpacking: a depth-1/2/4 sample arrives in its own byte
//! - Interlacing
//!
//! ## Usage
//!
//! ```
//! use zensample::{Color, Format, Rgba, Va};
//!
//! let rgb = Format::Rgb8 { fill: None, key: None };
//! let colors: Vec<Rgba<u16>> = Rgba::unpack(&[10, 20, 30, 40, 50, 60], &rgb)?;
//! assert_eq!(colors[0], Rgba::new(10 * 257, 20 * 257, 30 * 257, u16::MAX));
//!
//! let gray = Format::Gray8 { fill: None, key: Some(5) };
//! let va: Vec<Va<u8>> = Va::unpack(&[5, 7], &gray)?;
//! assert_eq!(va, [Va::new(5, 0), Va::new(7, 255)]);
//!
//! // Back to bytes at the format's native depth.
//! assert_eq!(Rgba::pack(&colors, &rgb)?, [10, 20, 30, 40, 50, 60]);
//! # Ok::<(), zensample::SampleError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod color;
mod error;
mod format;
mod image;
mod limits;
mod pack;
mod pixel;
mod quantize;
mod unpack;

// Re-exports
pub use color::{Color, Rgba, Va};
pub use error::SampleError;
pub use format::Format;
pub use image::ImageData;
pub use limits::Limits;
pub use pack::{ExactMatch, Indexer};
pub use pixel::PixelLayout;
pub use quantize::{Channel, Quantizer, premultiply, quantize_down, quantize_up};
pub use unpack::unpack_values;
