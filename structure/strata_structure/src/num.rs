//! Numeric leaf values.
//!
//! A [`Num`] is an `f64` plus an optional width hint. Hints only steer
//! rendering and downstream encoders; they never take part in equality,
//! ordering, or hashing.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use bitflags::bitflags;

bitflags! {
    /// Integer width hints carried alongside a numeric value.
    ///
    /// `UINT32` and `UINT64` are mutually exclusive.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct NumHint: u8 {
        /// Originated from an unsigned 32-bit integer.
        const UINT32 = 1 << 0;
        /// Originated from an unsigned 64-bit integer.
        const UINT64 = 1 << 1;
    }
}

/// Two to the thirty-second, the modulus of 32-bit wrapping.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// A 64-bit float with an optional integer-width hint.
#[derive(Copy, Clone)]
pub struct Num {
    value: f64,
    hint: NumHint,
}

impl Num {
    pub const ZERO: Num = Num::new(0.0);
    pub const NEGATIVE_ZERO: Num = Num::new(-0.0);
    pub const ONE: Num = Num::new(1.0);
    pub const NEGATIVE_ONE: Num = Num::new(-1.0);
    pub const NAN: Num = Num::new(f64::NAN);

    #[inline]
    pub const fn new(value: f64) -> Self {
        Num {
            value,
            hint: NumHint::empty(),
        }
    }

    pub fn uint32(value: u32) -> Self {
        Num {
            value: f64::from(value),
            hint: NumHint::UINT32,
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "u64 values above 2^53 round like any other float"
    )]
    pub fn uint64(value: u64) -> Self {
        Num {
            value: value as f64,
            hint: NumHint::UINT64,
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.value
    }

    #[inline]
    pub fn hint(self) -> NumHint {
        self.hint
    }

    pub fn is_uint32(self) -> bool {
        self.hint.contains(NumHint::UINT32)
    }

    pub fn is_uint64(self) -> bool {
        self.hint.contains(NumHint::UINT64)
    }

    pub fn is_nan(self) -> bool {
        self.value.is_nan()
    }

    /// True when the value is finite and has no fractional part.
    pub fn is_integral(self) -> bool {
        self.value.is_finite() && self.value.fract() == 0.0
    }

    /// Wrap to a signed 32-bit integer the way bitwise operators see it.
    ///
    /// Non-finite values map to zero; everything else is truncated toward
    /// zero and reduced modulo 2^32.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap,
        reason = "value is reduced into [0, 2^32) before the cast and wraps intentionally"
    )]
    pub fn to_int32(self) -> i32 {
        if !self.value.is_finite() {
            return 0;
        }
        let wrapped = self.value.trunc().rem_euclid(TWO_POW_32);
        (wrapped as u32) as i32
    }

    /// Tolerant equality: within `epsilon`, or both NaN.
    pub fn equivalent_to(self, that: Num, epsilon: f64) -> bool {
        self.value == that.value
            || (self.value.is_nan() && that.value.is_nan())
            || (self.value - that.value).abs() < epsilon
    }

    // Arithmetic

    pub fn plus(self, that: Num) -> Num {
        Num::new(self.value + that.value)
    }

    pub fn minus(self, that: Num) -> Num {
        Num::new(self.value - that.value)
    }

    pub fn times(self, that: Num) -> Num {
        Num::new(self.value * that.value)
    }

    pub fn divide(self, that: Num) -> Num {
        Num::new(self.value / that.value)
    }

    /// Truncated remainder; the sign follows the dividend.
    pub fn modulo(self, that: Num) -> Num {
        Num::new(self.value % that.value)
    }

    pub fn negative(self) -> Num {
        Num::new(-self.value)
    }

    pub fn positive(self) -> Num {
        self
    }

    pub fn inverse(self) -> Num {
        Num::new(1.0 / self.value)
    }

    // Bitwise, over the 32-bit wrapped value

    pub fn bitwise_or(self, that: Num) -> Num {
        Num::from(self.to_int32() | that.to_int32())
    }

    pub fn bitwise_xor(self, that: Num) -> Num {
        Num::from(self.to_int32() ^ that.to_int32())
    }

    pub fn bitwise_and(self, that: Num) -> Num {
        Num::from(self.to_int32() & that.to_int32())
    }

    pub fn bitwise_not(self) -> Num {
        Num::from(!self.to_int32())
    }
}

impl Default for Num {
    fn default() -> Self {
        Num::ZERO
    }
}

impl PartialEq for Num {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value || (self.value.is_nan() && other.value.is_nan())
    }
}

impl Eq for Num {}

impl PartialOrd for Num {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Num {
    /// Numeric order with NaN after every other value.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.value.is_nan(), other.value.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self
                .value
                .partial_cmp(&other.value)
                .unwrap_or(Ordering::Equal),
        }
    }
}

impl Hash for Num {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // -0 == 0 and NaN == NaN, so both must hash alike
        let bits = if self.value == 0.0 {
            0
        } else if self.value.is_nan() {
            f64::NAN.to_bits()
        } else {
            self.value.to_bits()
        };
        bits.hash(state);
    }
}

macro_rules! num_from_lossless {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Num {
                fn from(value: $ty) -> Self {
                    Num::new(f64::from(value))
                }
            }
        )*
    };
}

num_from_lossless!(i8, i16, i32, u8, u16, f32, f64);

impl From<u32> for Num {
    fn from(value: u32) -> Self {
        Num::uint32(value)
    }
}

impl From<u64> for Num {
    fn from(value: u64) -> Self {
        Num::uint64(value)
    }
}

impl From<i64> for Num {
    #[expect(
        clippy::cast_precision_loss,
        reason = "i64 values beyond 2^53 round like any other float"
    )]
    fn from(value: i64) -> Self {
        Num::new(value as f64)
    }
}

impl From<usize> for Num {
    #[expect(
        clippy::cast_precision_loss,
        reason = "record lengths stay far below 2^53"
    )]
    fn from(value: usize) -> Self {
        Num::new(value as f64)
    }
}

#[cfg(test)]
mod tests;
