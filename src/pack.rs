//! Color records → sample buffer.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use crate::color::Rgba;
use crate::error::SampleError;
use crate::format::Format;
use crate::quantize::{Channel, Quantizer};

/// Resolves a color to a palette index.
///
/// Any `Fn(Rgba<A>) -> usize` closure is an indexer. Returned indices must lie
/// inside the palette; packing fails with [`SampleError::IndexOutOfRange`]
/// otherwise.
pub trait Indexer<A: Channel> {
    /// Palette index for `color`.
    fn index(&self, color: Rgba<A>) -> usize;
}

impl<A: Channel, F: Fn(Rgba<A>) -> usize> Indexer<A> for F {
    #[inline]
    fn index(&self, color: Rgba<A>) -> usize {
        self(color)
    }
}

/// The default indexer: exact (r, g, b, a) match, falling back to index 0.
///
/// No nearest-color search is attempted. With duplicate palette entries the
/// first one wins.
#[derive(Clone, Debug, Default)]
pub struct ExactMatch {
    lookup: BTreeMap<Rgba<u8>, usize>,
}

impl ExactMatch {
    /// Build the lookup table for `palette`.
    pub fn new(palette: &[Rgba<u8>]) -> Self {
        let mut lookup = BTreeMap::new();
        for (i, &color) in palette.iter().enumerate() {
            lookup.entry(color).or_insert(i);
        }
        Self { lookup }
    }
}

impl Indexer<u8> for ExactMatch {
    #[inline]
    fn index(&self, color: Rgba<u8>) -> usize {
        self.lookup.get(&color).copied().unwrap_or(0)
    }
}

/// Encode records. `project` views a record as `Rgba<T>`; gray formats take
/// its red channel, gray-alpha formats red and alpha.
pub(crate) fn dispatch<T, C, A, I, B, P>(
    pixels: &[C],
    format: &Format<'_>,
    build: B,
    project: P,
) -> Result<Vec<u8>, SampleError>
where
    T: Channel,
    C: Sync,
    A: Channel,
    I: Indexer<A>,
    B: FnOnce(&[Rgba<u8>]) -> I,
    P: Fn(&C) -> Rgba<T> + Sync,
{
    let depth = format.depth();
    let out = match *format {
        Format::Indexed1 { palette, .. }
        | Format::Indexed2 { palette, .. }
        | Format::Indexed4 { palette, .. }
        | Format::Indexed8 { palette, .. } => {
            // a palette that fits the index depth keeps every in-range index in a u8
            format.validate()?;
            return indexed(pixels, palette.len(), &build(palette), &project);
        }

        Format::Gray1 { .. }
        | Format::Gray2 { .. }
        | Format::Gray4 { .. }
        | Format::Gray8 { .. }
        | Format::Gray16 { .. } => deconvolve(pixels, depth, |c: &C| [project(c).r]),

        Format::GrayAlpha8 { .. } | Format::GrayAlpha16 { .. } => {
            deconvolve(pixels, depth, |c: &C| {
                let c = project(c);
                [c.r, c.a]
            })
        }

        Format::Rgb8 { .. } | Format::Rgb16 { .. } => deconvolve(pixels, depth, |c: &C| {
            let c = project(c);
            [c.r, c.g, c.b]
        }),
        Format::Bgr8 { .. } => deconvolve(pixels, depth, |c: &C| {
            let c = project(c);
            [c.b, c.g, c.r]
        }),

        Format::Rgba8 { .. } | Format::Rgba16 { .. } => deconvolve(pixels, depth, |c: &C| {
            let c = project(c);
            [c.r, c.g, c.b, c.a]
        }),
        Format::Bgra8 { .. } => deconvolve(pixels, depth, |c: &C| {
            let c = project(c);
            [c.b, c.g, c.r, c.a]
        }),
    };
    Ok(out)
}

fn indexed<T, C, A, I, P>(
    pixels: &[C],
    len: usize,
    indexer: &I,
    project: &P,
) -> Result<Vec<u8>, SampleError>
where
    T: Channel,
    A: Channel,
    I: Indexer<A>,
    P: Fn(&C) -> Rgba<T>,
{
    match Quantizer::new(T::BITS, A::BITS) {
        Quantizer::Identity => lookup(pixels, len, indexer, |c| {
            project(c).map(|v| A::truncate(v.widen()))
        }),
        Quantizer::Scale(q) => lookup(pixels, len, indexer, |c| {
            project(c).map(|v| A::truncate(q * v.widen()))
        }),
        Quantizer::Shift(s) => lookup(pixels, len, indexer, |c| {
            project(c).map(|v| A::truncate(v.widen() >> s))
        }),
    }
}

// Sequential: the indexer is caller-supplied and need not be Sync.
fn lookup<C, A, I, F>(
    pixels: &[C],
    len: usize,
    indexer: &I,
    color: F,
) -> Result<Vec<u8>, SampleError>
where
    A: Channel,
    I: Indexer<A>,
    F: Fn(&C) -> Rgba<A>,
{
    pixels
        .iter()
        .map(|c| {
            let index = indexer.index(color(c));
            match u8::try_from(index) {
                Ok(i) if index < len => Ok(i),
                _ => Err(SampleError::IndexOutOfRange { index, len }),
            }
        })
        .collect()
}

/// Write `N` samples per record, each rescaled from `T` to `depth` bits.
fn deconvolve<const N: usize, T, C, K>(pixels: &[C], depth: u32, kernel: K) -> Vec<u8>
where
    T: Channel,
    C: Sync,
    K: Fn(&C) -> [T; N] + Sync,
{
    match Quantizer::new(T::BITS, depth) {
        Quantizer::Identity => spread(pixels, depth, &kernel, |v| v),
        Quantizer::Scale(q) => spread(pixels, depth, &kernel, move |v| q * v),
        Quantizer::Shift(s) => spread(pixels, depth, &kernel, move |v| v >> s),
    }
}

fn spread<const N: usize, T, C, K, F>(pixels: &[C], depth: u32, kernel: &K, transform: F) -> Vec<u8>
where
    T: Channel,
    C: Sync,
    K: Fn(&C) -> [T; N] + Sync,
    F: Fn(u64) -> u64 + Sync,
{
    if depth > 8 {
        let mut out = vec![0u8; pixels.len() * N * 2];
        fill_chunks(&mut out, N * 2, pixels, |dst, pixel| {
            for (word, sample) in dst.chunks_exact_mut(2).zip(kernel(pixel)) {
                word.copy_from_slice(&(transform(sample.widen()) as u16).to_be_bytes());
            }
        });
        out
    } else {
        let mut out = vec![0u8; pixels.len() * N];
        fill_chunks(&mut out, N, pixels, |dst, pixel| {
            for (byte, sample) in dst.iter_mut().zip(kernel(pixel)) {
                *byte = transform(sample.widen()) as u8;
            }
        });
        out
    }
}

/// Fill each `stride`-byte group of `out` from the matching record.
fn fill_chunks<C, F>(out: &mut [u8], stride: usize, pixels: &[C], f: F)
where
    C: Sync,
    F: Fn(&mut [u8], &C) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.par_chunks_exact_mut(stride)
            .zip(pixels.par_iter())
            .for_each(|(dst, pixel)| f(dst, pixel));
    }
    #[cfg(not(feature = "parallel"))]
    {
        out.chunks_exact_mut(stride)
            .zip(pixels)
            .for_each(|(dst, pixel)| f(dst, pixel));
    }
}
