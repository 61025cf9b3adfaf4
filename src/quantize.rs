//! Channel rescaling between bit depths and integer widths.
//!
//! Scaling up multiplies by an integer quantum (`0b1111_1111 / 0b1111 = 0x11`),
//! which maps 0 to 0 and the source maximum to the target maximum exactly.
//! Scaling down is plain truncation.

use core::fmt::Debug;
use core::hash::Hash;

mod sealed {
    pub trait Sealed {}
}

/// Unsigned integer type a color channel can be stored in.
///
/// Implemented for `u8`, `u16`, `u32` and `u64`. Sealed.
pub trait Channel:
    sealed::Sealed + Copy + Debug + Default + Eq + Ord + Hash + Send + Sync + 'static
{
    /// Width of the type in bits.
    const BITS: u32;
    /// Fully transparent / black.
    const MIN: Self;
    /// Fully opaque / white.
    const MAX: Self;

    /// Zero-extend to `u64`.
    fn widen(self) -> u64;

    /// Keep the low `Self::BITS` bits of `v`.
    fn truncate(v: u64) -> Self;
}

macro_rules! channel {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl Channel for $t {
            const BITS: u32 = <$t>::BITS;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline(always)]
            fn widen(self) -> u64 {
                self as u64
            }

            #[inline(always)]
            fn truncate(v: u64) -> Self {
                v as $t
            }
        }
    )*};
}

channel!(u8, u16, u32, u64);

/// All-ones bit pattern of the given width (1..=64).
#[inline]
pub(crate) const fn all_ones(bits: u32) -> u64 {
    u64::MAX >> (64 - bits)
}

/// A resolved rescaling from one bit width to another.
///
/// Built once per buffer and applied to every sample, so the three-way
/// width comparison never happens inside a pixel loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantizer {
    /// Same width; values pass through.
    Identity,
    /// Wider target; multiply by the quantum.
    Scale(u64),
    /// Narrower target; shift right.
    Shift(u32),
}

impl Quantizer {
    /// Resolve the rescaling from `source` bits to `target` bits.
    ///
    /// Both widths must lie in `1..=64`. Scaling up is exact only when
    /// `source` divides `target`, which holds for every sample depth against
    /// every [`Channel`] width.
    pub const fn new(source: u32, target: u32) -> Self {
        if source == target {
            Self::Identity
        } else if target > source {
            Self::Scale(all_ones(target) / all_ones(source))
        } else {
            Self::Shift(source - target)
        }
    }

    /// Rescale one value. Bits above the source width wrap instead of
    /// panicking.
    #[inline]
    pub const fn apply(self, v: u64) -> u64 {
        match self {
            Self::Identity => v,
            Self::Scale(q) => q.wrapping_mul(v),
            Self::Shift(s) => v >> s,
        }
    }
}

/// Scale a `source_depth`-bit value up to the full width of `T`.
///
/// `quantize_up(0, d)` is 0 and `quantize_up(2^d - 1, d)` is `T::MAX` for
/// every accepted `d`: the powers of two up to `T::BITS`.
///
/// # Panics
///
/// If `source_depth` is zero, wider than `S` or `T`, or does not divide
/// `T::BITS`; or if `value` does not fit in `source_depth` bits.
pub fn quantize_up<S: Channel, T: Channel>(value: S, source_depth: u32) -> T {
    assert!(
        source_depth >= 1
            && source_depth <= S::BITS
            && source_depth <= T::BITS
            && T::BITS % source_depth == 0,
        "quantize_up: source depth {source_depth} must divide {} and be at most {}",
        T::BITS,
        S::BITS.min(T::BITS)
    );
    assert!(
        value.widen() <= all_ones(source_depth),
        "quantize_up: value {value:?} does not fit in {source_depth} bits"
    );
    T::truncate(Quantizer::new(source_depth, T::BITS).apply(value.widen()))
}

/// Truncate a full-width `S` value down to `target_depth` bits, stored in `T`.
///
/// Does not round.
///
/// # Panics
///
/// If `target_depth` is zero or wider than `S` or `T`.
pub fn quantize_down<S: Channel, T: Channel>(value: S, target_depth: u32) -> T {
    assert!(
        target_depth >= 1 && target_depth <= S::BITS && target_depth <= T::BITS,
        "quantize_down: target depth {target_depth} must be in 1..={}",
        S::BITS.min(T::BITS)
    );
    T::truncate(value.widen() >> (S::BITS - target_depth))
}

/// Scale `color` by `alpha / T::MAX`, rounding half up.
///
/// The product is formed at double width (`u128`) with a `T::MAX >> 1` bias,
/// so no `T` overflows: `premultiply(x, MAX) == x`, `premultiply(x, 0) == 0`.
#[inline]
pub fn premultiply<T: Channel>(color: T, alpha: T) -> T {
    let max = u128::from(T::MAX.widen());
    let product = u128::from(color.widen()) * u128::from(alpha.widen());
    // quotient <= MAX since product <= MAX^2
    T::truncate(((product + (max >> 1)) / max) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundaries<T: Channel>() {
        for d in [1, 2, 4, 8, 16].into_iter().filter(|&d| d <= T::BITS) {
            let top = all_ones(d) as u16;
            assert_eq!(quantize_up::<u16, T>(0, d), T::MIN, "depth {d}");
            assert_eq!(quantize_up::<u16, T>(top, d), T::MAX, "depth {d}");
        }
    }

    #[test]
    fn quantize_up_hits_both_ends() {
        boundaries::<u8>();
        boundaries::<u16>();
        boundaries::<u32>();
        boundaries::<u64>();
        assert_eq!(quantize_up::<u64, u64>(u64::MAX, 64), u64::MAX);
        assert_eq!(quantize_up::<u32, u64>(u32::MAX, 32), u64::MAX);
    }

    #[test]
    fn quantize_up_known_quanta() {
        assert_eq!(Quantizer::new(1, 8), Quantizer::Scale(0xff));
        assert_eq!(Quantizer::new(2, 8), Quantizer::Scale(0x55));
        assert_eq!(Quantizer::new(4, 8), Quantizer::Scale(0x11));
        assert_eq!(Quantizer::new(8, 16), Quantizer::Scale(257));
        assert_eq!(Quantizer::new(16, 64), Quantizer::Scale(0x0001_0001_0001_0001));
        assert_eq!(quantize_up::<u8, u16>(0x80, 8), 0x8080);
        assert_eq!(quantize_up::<u8, u8>(2, 2), 0xaa);
        assert_eq!(quantize_up::<u8, u8>(200, 8), 200);
        assert_eq!(quantize_up::<u8, u8>(1, 2), 0x55);
    }

    #[test]
    fn quantize_down_truncates() {
        assert_eq!(quantize_down::<u16, u8>(0xffff, 8), 0xff);
        assert_eq!(quantize_down::<u16, u8>(0x80ff, 8), 0x80);
        assert_eq!(quantize_down::<u8, u8>(0xff, 1), 1);
        assert_eq!(quantize_down::<u8, u8>(0x7f, 1), 0);
        assert_eq!(quantize_down::<u64, u16>(u64::MAX, 16), u16::MAX);
        assert_eq!(quantize_down::<u32, u32>(12345, 32), 12345);
    }

    #[test]
    fn down_then_up_is_stable_at_ends() {
        for d in [1, 2, 4, 8] {
            let lo: u8 = quantize_down(0u16, d);
            let hi: u8 = quantize_down(u16::MAX, d);
            assert_eq!(quantize_up::<u8, u16>(lo, d), 0);
            assert_eq!(quantize_up::<u8, u16>(hi, d), u16::MAX);
        }
    }

    #[test]
    #[should_panic(expected = "quantize_up")]
    fn quantize_up_rejects_wider_source() {
        let _: u8 = quantize_up(0u16, 16);
    }

    #[test]
    #[should_panic(expected = "must divide 8")]
    fn quantize_up_rejects_inexact_depth() {
        // 255 / 7 has no integer quantum
        let _: u8 = quantize_up(7u8, 3);
    }

    #[test]
    #[should_panic(expected = "does not fit in 1 bits")]
    fn quantize_up_rejects_value_wider_than_depth() {
        let _: u64 = quantize_up(u64::MAX, 1);
    }

    #[test]
    fn apply_wraps_stray_high_bits() {
        assert_eq!(Quantizer::Scale(u64::MAX).apply(2), u64::MAX - 1);
    }

    fn premultiply_identities<T: Channel>(samples: &[u64]) {
        for &x in samples {
            let x = T::truncate(x);
            assert_eq!(premultiply(x, T::MAX), x);
            assert_eq!(premultiply(x, T::MIN), T::MIN);
            assert_eq!(premultiply(T::MIN, x), T::MIN);
        }
        assert_eq!(premultiply(T::MAX, T::MAX), T::MAX);
    }

    #[test]
    fn premultiply_boundaries() {
        let samples = [0, 1, 2, 127, 128, 200, 255, 0x1234, 0xdead_beef, u64::MAX];
        premultiply_identities::<u8>(&samples);
        premultiply_identities::<u16>(&samples);
        premultiply_identities::<u32>(&samples);
        premultiply_identities::<u64>(&samples);
    }

    #[test]
    fn premultiply_rounds_half_up() {
        // 255 * 128 / 255 = 128
        assert_eq!(premultiply(255u8, 128), 128);
        // 1 * 128 / 255 = 0.502 -> 1
        assert_eq!(premultiply(1u8, 128), 1);
        // 1 * 127 / 255 = 0.498 -> 0
        assert_eq!(premultiply(1u8, 127), 0);
        // exhaustive against the obvious formula
        for c in 0..=255u32 {
            for a in 0..=255u32 {
                let expected = ((c * a + 127) / 255) as u8;
                assert_eq!(premultiply(c as u8, a as u8), expected, "{c} * {a}");
            }
        }
    }

    #[test]
    fn premultiply_u64_does_not_overflow() {
        let half = u64::MAX / 2;
        let got = premultiply(u64::MAX, half);
        assert_eq!(got, half);
        assert_eq!(premultiply(u64::MAX - 1, u64::MAX - 1), u64::MAX - 2);
    }
}
