//! Color records and the [`Color`] capability trait.

use alloc::vec::Vec;

use crate::error::SampleError;
use crate::format::Format;
use crate::pack::{self, ExactMatch, Indexer};
use crate::quantize::{Channel, Quantizer, premultiply};
use crate::unpack;

/// An RGBA color with channels of type `T`.
///
/// Equality, hashing and ordering are component-wise, so an `Rgba<u8>` can
/// key a palette lookup table directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgba<T> {
    /// Red.
    pub r: T,
    /// Green.
    pub g: T,
    /// Blue.
    pub b: T,
    /// Alpha; `T::MAX` is opaque.
    pub a: T,
}

/// A gray value + alpha color with channels of type `T`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Va<T> {
    /// Gray value.
    pub v: T,
    /// Alpha; `T::MAX` is opaque.
    pub a: T,
}

impl<T: Channel> Rgba<T> {
    /// Color from all four channels.
    #[inline]
    pub const fn new(r: T, g: T, b: T, a: T) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color (`a = T::MAX`).
    #[inline]
    pub const fn opaque(r: T, g: T, b: T) -> Self {
        Self::new(r, g, b, T::MAX)
    }

    /// Opaque gray with all color channels set to `v`.
    #[inline]
    pub const fn gray(v: T) -> Self {
        Self::new(v, v, v, T::MAX)
    }

    /// Gray with all color channels set to `v` and the given alpha.
    #[inline]
    pub const fn gray_alpha(v: T, a: T) -> Self {
        Self::new(v, v, v, a)
    }

    /// The red and alpha channels as a gray-alpha color.
    #[inline]
    pub const fn va(self) -> Va<T> {
        Va::new(self.r, self.a)
    }

    /// Apply `f` to all four channels.
    #[inline]
    pub fn map<U: Channel>(self, mut f: impl FnMut(T) -> U) -> Rgba<U> {
        Rgba::new(f(self.r), f(self.g), f(self.b), f(self.a))
    }

    /// Color channels scaled by this color's alpha, at full precision.
    pub fn premultiplied(self) -> Self {
        Self::new(
            premultiply(self.r, self.a),
            premultiply(self.g, self.a),
            premultiply(self.b, self.a),
            self.a,
        )
    }

    /// Premultiply at the precision of `U`, then expand back to `T`.
    ///
    /// Every channel (alpha included) is truncated to `U` first, so the result
    /// matches what a `U`-precision consumer would compute, scaled to `T`.
    ///
    /// # Panics
    ///
    /// If `U` is not strictly narrower than `T`.
    pub fn premultiplied_as<U: Channel>(self) -> Self {
        assert!(
            U::BITS < T::BITS,
            "cannot premultiply in higher precision than the original color ({} >= {} bits)",
            U::BITS,
            T::BITS
        );
        let down = Quantizer::new(T::BITS, U::BITS);
        let up = Quantizer::new(U::BITS, T::BITS);
        let narrow = |c: T| U::truncate(down.apply(c.widen()));
        let widen = |c: U| T::truncate(up.apply(c.widen()));

        let a = narrow(self.a);
        Self::new(
            widen(premultiply(narrow(self.r), a)),
            widen(premultiply(narrow(self.g), a)),
            widen(premultiply(narrow(self.b), a)),
            widen(a),
        )
    }
}

impl<T: Channel> Va<T> {
    /// Gray-alpha color from value and alpha.
    #[inline]
    pub const fn new(v: T, a: T) -> Self {
        Self { v, a }
    }

    /// Opaque gray (`a = T::MAX`).
    #[inline]
    pub const fn opaque(v: T) -> Self {
        Self::new(v, T::MAX)
    }

    /// Value scaled by this color's alpha, at full precision.
    pub fn premultiplied(self) -> Self {
        Self::new(premultiply(self.v, self.a), self.a)
    }

    /// Premultiply at the precision of `U`, then expand back to `T`.
    ///
    /// # Panics
    ///
    /// If `U` is not strictly narrower than `T`.
    pub fn premultiplied_as<U: Channel>(self) -> Self {
        let rgba = Rgba::gray_alpha(self.v, self.a).premultiplied_as::<U>();
        Self::new(rgba.r, rgba.a)
    }
}

impl<T: Channel> From<Va<T>> for Rgba<T> {
    #[inline]
    fn from(va: Va<T>) -> Self {
        Self::gray_alpha(va.v, va.a)
    }
}

/// A color record that can be unpacked from, and packed into, an interleaved
/// sample buffer.
///
/// Implemented for [`Rgba<T>`] and [`Va<T>`] at every [`Channel`] width.
pub trait Color: Copy + Send + Sync + Sized {
    /// Decode one record per pixel, in scan order.
    ///
    /// Fails if `buffer` is not a whole number of pixels, or if an indexed
    /// buffer references an entry past the end of the palette.
    fn unpack(buffer: &[u8], format: &Format<'_>) -> Result<Vec<Self>, SampleError>;

    /// Encode records into a sample buffer.
    ///
    /// Indexed formats resolve colors with [`ExactMatch`]: colors missing from
    /// the palette silently become index 0.
    fn pack(pixels: &[Self], format: &Format<'_>) -> Result<Vec<u8>, SampleError> {
        Self::pack_with::<u8, ExactMatch, _>(pixels, format, ExactMatch::new)
    }

    /// Encode records, resolving palette indices with the indexer `build`
    /// returns for the format's palette.
    ///
    /// Colors are rescaled to `A` before they reach the indexer. `build` is
    /// only called for indexed formats.
    fn pack_with<A, I, B>(
        pixels: &[Self],
        format: &Format<'_>,
        build: B,
    ) -> Result<Vec<u8>, SampleError>
    where
        A: Channel,
        I: Indexer<A>,
        B: FnOnce(&[Rgba<u8>]) -> I;
}

impl<T: Channel> Color for Rgba<T> {
    fn unpack(buffer: &[u8], format: &Format<'_>) -> Result<Vec<Self>, SampleError> {
        unpack::check(buffer, format)?;
        Ok(unpack::dispatch(
            buffer,
            format,
            |c: Rgba<T>| c,
            |c: Va<T>| Rgba::from(c),
        ))
    }

    fn pack_with<A, I, B>(
        pixels: &[Self],
        format: &Format<'_>,
        build: B,
    ) -> Result<Vec<u8>, SampleError>
    where
        A: Channel,
        I: Indexer<A>,
        B: FnOnce(&[Rgba<u8>]) -> I,
    {
        pack::dispatch(pixels, format, build, |c: &Rgba<T>| *c)
    }
}

impl<T: Channel> Color for Va<T> {
    fn unpack(buffer: &[u8], format: &Format<'_>) -> Result<Vec<Self>, SampleError> {
        unpack::check(buffer, format)?;
        Ok(unpack::dispatch(buffer, format, |c: Rgba<T>| c.va(), |c: Va<T>| c))
    }

    fn pack_with<A, I, B>(
        pixels: &[Self],
        format: &Format<'_>,
        build: B,
    ) -> Result<Vec<u8>, SampleError>
    where
        A: Channel,
        I: Indexer<A>,
        B: FnOnce(&[Rgba<u8>]) -> I,
    {
        pack::dispatch(pixels, format, build, |c: &Va<T>| Rgba::from(*c))
    }
}

#[cfg(feature = "rgb")]
impl<T: Channel> From<rgb::Rgba<T>> for Rgba<T> {
    fn from(c: rgb::Rgba<T>) -> Self {
        Self::new(c.r, c.g, c.b, c.a)
    }
}

#[cfg(feature = "rgb")]
impl<T: Channel> From<rgb::Rgb<T>> for Rgba<T> {
    fn from(c: rgb::Rgb<T>) -> Self {
        Self::opaque(c.r, c.g, c.b)
    }
}

#[cfg(feature = "rgb")]
impl<T: Channel> From<Rgba<T>> for rgb::Rgba<T> {
    fn from(c: Rgba<T>) -> Self {
        rgb::Rgba {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}
