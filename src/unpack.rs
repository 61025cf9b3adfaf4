//! Sample buffer → color records.
//!
//! Every format reduces to one of four shapes: palette lookup, N samples per
//! pixel with a chroma key, N samples per pixel without one, or N samples with
//! explicit alpha. The shapes only decide grouping and channel order; all
//! rescaling goes through a single [`Quantizer`] resolved once per buffer.

use alloc::vec::Vec;
use core::array;

use crate::color::{Rgba, Va};
use crate::error::SampleError;
use crate::format::Format;
use crate::quantize::{Channel, Quantizer, all_ones};

/// Validate `buffer` against `format`, returning the pixel count.
///
/// After this passes the engine cannot fail or index out of bounds.
pub(crate) fn check(buffer: &[u8], format: &Format<'_>) -> Result<usize, SampleError> {
    let count = format.pixel_count(buffer.len())?;
    if let Some(palette) = format.palette() {
        if let Some(offset) = buffer
            .iter()
            .position(|&i| usize::from(i) >= palette.len())
        {
            return Err(SampleError::PaletteIndexOutOfRange {
                index: usize::from(buffer[offset]),
                offset,
                len: palette.len(),
            });
        }
    }
    Ok(count)
}

/// Decode only the value channel of each pixel: palette red for indexed
/// formats, gray for gray formats, red for color formats.
///
/// Alpha and chroma keys are ignored.
pub fn unpack_values<T: Channel>(buffer: &[u8], format: &Format<'_>) -> Result<Vec<T>, SampleError> {
    check(buffer, format)?;
    Ok(dispatch(buffer, format, |c: Rgba<T>| c.r, |c: Va<T>| c.v))
}

/// Decode a checked buffer. Color-bearing formats produce an `Rgba<T>` that
/// `rgba` converts to the output; gray formats produce a `Va<T>` for `va`.
pub(crate) fn dispatch<T, C, R, V>(buffer: &[u8], format: &Format<'_>, rgba: R, va: V) -> Vec<C>
where
    T: Channel,
    C: Send,
    R: Fn(Rgba<T>) -> C + Sync,
    V: Fn(Va<T>) -> C + Sync,
{
    let depth = format.depth();
    match *format {
        Format::Indexed1 { palette, .. }
        | Format::Indexed2 { palette, .. }
        | Format::Indexed4 { palette, .. }
        | Format::Indexed8 { palette, .. } => indexed(buffer, palette, &rgba),

        Format::Gray1 { key, .. }
        | Format::Gray2 { key, .. }
        | Format::Gray4 { key, .. }
        | Format::Gray8 { key, .. } => gray(buffer, depth, key.map(u16::from), &va),
        Format::Gray16 { key, .. } => gray(buffer, depth, key, &va),

        Format::GrayAlpha8 { .. } | Format::GrayAlpha16 { .. } => {
            convolve(buffer, depth, |[v, a]: [T; 2], _: [u16; 2]| va(Va::new(v, a)))
        }

        Format::Rgb8 { key, .. } => rgb(buffer, depth, key.map(|k| k.map(u16::from)), false, &rgba),
        Format::Rgb16 { key, .. } => rgb(buffer, depth, key, false, &rgba),
        Format::Bgr8 { key, .. } => rgb(buffer, depth, key.map(|k| k.map(u16::from)), true, &rgba),

        Format::Rgba8 { .. } | Format::Rgba16 { .. } => {
            convolve(buffer, depth, |[r, g, b, a]: [T; 4], _: [u16; 4]| {
                rgba(Rgba::new(r, g, b, a))
            })
        }
        Format::Bgra8 { .. } => convolve(buffer, depth, |[b, g, r, a]: [T; 4], _: [u16; 4]| {
            rgba(Rgba::new(r, g, b, a))
        }),
    }
}

#[inline(always)]
fn key_alpha<T: Channel>(hit: bool) -> T {
    if hit { T::MIN } else { T::MAX }
}

fn indexed<T, C, R>(buffer: &[u8], palette: &[Rgba<u8>], build: &R) -> Vec<C>
where
    T: Channel,
    C: Send,
    R: Fn(Rgba<T>) -> C + Sync,
{
    // Rescale the palette once instead of every pixel.
    let q = Quantizer::new(8, T::BITS);
    let table: Vec<Rgba<T>> = palette
        .iter()
        .map(|c| c.map(|v| T::truncate(q.apply(u64::from(v)))))
        .collect();
    map_chunks(buffer, 1, |chunk| build(table[usize::from(chunk[0])]))
}

fn gray<T, C, V>(buffer: &[u8], depth: u32, key: Option<u16>, build: &V) -> Vec<C>
where
    T: Channel,
    C: Send,
    V: Fn(Va<T>) -> C + Sync,
{
    match key {
        None => convolve(buffer, depth, |[v]: [T; 1], _: [u16; 1]| build(Va::opaque(v))),
        Some(key) => convolve(buffer, depth, move |[v]: [T; 1], [raw]: [u16; 1]| {
            build(Va::new(v, key_alpha(raw == key)))
        }),
    }
}

/// Three color samples per pixel. `key` is compared against the raw samples
/// in buffer order, so BGR keys are blue first.
fn rgb<T, C, R>(buffer: &[u8], depth: u32, key: Option<[u16; 3]>, bgr: bool, build: &R) -> Vec<C>
where
    T: Channel,
    C: Send,
    R: Fn(Rgba<T>) -> C + Sync,
{
    match (key, bgr) {
        (None, false) => convolve(buffer, depth, |[r, g, b]: [T; 3], _: [u16; 3]| {
            build(Rgba::opaque(r, g, b))
        }),
        (None, true) => convolve(buffer, depth, |[b, g, r]: [T; 3], _: [u16; 3]| {
            build(Rgba::opaque(r, g, b))
        }),
        (Some(key), false) => convolve(buffer, depth, move |[r, g, b]: [T; 3], raw: [u16; 3]| {
            build(Rgba::new(r, g, b, key_alpha(raw == key)))
        }),
        (Some(key), true) => convolve(buffer, depth, move |[b, g, r]: [T; 3], raw: [u16; 3]| {
            build(Rgba::new(r, g, b, key_alpha(raw == key)))
        }),
    }
}

/// Group samples `N` at a time, rescale each from `depth` to `T`, and hand
/// both the rescaled and the raw samples to `kernel`.
fn convolve<const N: usize, T, C, K>(buffer: &[u8], depth: u32, kernel: K) -> Vec<C>
where
    T: Channel,
    C: Send,
    K: Fn([T; N], [u16; N]) -> C + Sync,
{
    match Quantizer::new(depth, T::BITS) {
        Quantizer::Identity => sweep(buffer, depth, &kernel, T::truncate),
        Quantizer::Scale(q) => sweep(buffer, depth, &kernel, move |v| T::truncate(q * v)),
        Quantizer::Shift(s) => sweep(buffer, depth, &kernel, move |v| T::truncate(v >> s)),
    }
}

fn sweep<const N: usize, T, C, K, F>(buffer: &[u8], depth: u32, kernel: &K, transform: F) -> Vec<C>
where
    T: Channel,
    C: Send,
    K: Fn([T; N], [u16; N]) -> C + Sync,
    F: Fn(u64) -> T + Sync,
{
    if depth > 8 {
        map_chunks(buffer, 2 * N, |chunk| {
            let raw: [u16; N] =
                array::from_fn(|i| u16::from_be_bytes([chunk[2 * i], chunk[2 * i + 1]]));
            kernel(raw.map(|v| transform(u64::from(v))), raw)
        })
    } else {
        // only the low `depth` bits of a sub-byte sample are significant
        let mask = all_ones(depth) as u16;
        map_chunks(buffer, N, |chunk| {
            let raw: [u16; N] = array::from_fn(|i| u16::from(chunk[i]) & mask);
            kernel(raw.map(|v| transform(u64::from(v))), raw)
        })
    }
}

/// Map each `stride`-byte group of `buffer`, preserving scan order.
fn map_chunks<C, F>(buffer: &[u8], stride: usize, f: F) -> Vec<C>
where
    C: Send,
    F: Fn(&[u8]) -> C + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        buffer.par_chunks_exact(stride).map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        buffer.chunks_exact(stride).map(f).collect()
    }
}
