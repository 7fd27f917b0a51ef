// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use num_traits::ToPrimitive;

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Number of 64-bit limbs in a [`BigFloat`] mantissa.
///
/// Tunable: ~250 significant bits is enough for the determinant expressions
/// the predicates build out of double-precision inputs. The ambiguity corpus
/// in `tests/determinant.rs` validates the chosen value against a
/// big-rational reference.
pub const LIMB_COUNT: usize = 4;

/// Bit position of the binary point inside the mantissa: a value is
/// `(-1)^sign * M * 2^(exponent - BIAS)` with `M` the big-endian limb
/// integer.
const BIAS: i32 = 62 + 64 * (LIMB_COUNT as i32 - 1);

/// Reserved high bits of limb 0: bit 63 doubles as the sign bit during
/// two's-complement addition, bit 62 is carry headroom.
const HEADROOM: i32 = 2;

/// Fixed-width multi-limb floating-point number.
///
/// Carries ~4x the significant bits of an `f64`, enough to keep a bounded
/// chain of sums and products exact. Sign-magnitude representation: limb 0
/// is most significant, and a non-zero value is normalized so that limb 0
/// has exactly two leading zero bits. `mantissa[0] == 0` means zero, with
/// the exponent forced to 0.
///
/// A plain `Copy` value; never touches the heap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BigFloat {
    mantissa: [u64; LIMB_COUNT],
    exponent: i16,
    negative: bool,
}

impl BigFloat {
    pub const ZERO: BigFloat = BigFloat {
        mantissa: [0; LIMB_COUNT],
        exponent: 0,
        negative: false,
    };

    /// Decomposes a finite double into mantissa/exponent form. The 53
    /// significant bits land in the top limb, so the conversion is exact.
    pub fn from_f64(value: f64) -> Self {
        debug_assert!(value.is_finite());
        if value == 0.0 {
            return Self::ZERO;
        }
        let (m, e) = frexp(value.abs());
        let mut mantissa = [0u64; LIMB_COUNT];
        mantissa[0] = (m * (1u64 << 62) as f64) as u64;
        BigFloat {
            mantissa,
            exponent: e as i16,
            negative: value < 0.0,
        }
    }

    /// Collapses back to a double from the top limb and the exponent.
    ///
    /// Lossy by construction; saturates to `±inf` above the double range
    /// and flushes to zero below it.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let m = self.mantissa[0] as f64 / (1u64 << 62) as f64;
        let magnitude = (2.0 * m) * pow2(self.exponent as i32 - 1);
        if self.negative { -magnitude } else { magnitude }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa[0] == 0
    }

    /// Returns -1, 0, or +1. Exact, unlike the sign of `to_f64()`, which
    /// can flush a tiny value to zero.
    #[inline]
    pub fn sign(&self) -> i8 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    #[inline]
    pub fn abs(&self) -> Self {
        let mut out = *self;
        out.negative = false;
        out
    }

    /// Masks off every mantissa bit below binary place 2^0. Truncates
    /// toward zero for negative values.
    pub fn floor(&self) -> Self {
        if self.exponent < 1 {
            // |value| < 1
            return Self::ZERO;
        }
        let fractional_bits = BIAS - self.exponent as i32;
        if fractional_bits <= 0 {
            return *self;
        }
        let mut mantissa = self.mantissa;
        let mut remaining = fractional_bits as usize;
        let mut i = LIMB_COUNT;
        while remaining >= 64 {
            i -= 1;
            mantissa[i] = 0;
            remaining -= 64;
        }
        if remaining > 0 {
            i -= 1;
            mantissa[i] &= !((1u64 << remaining) - 1);
        }
        // The leading bit is an integer bit, so normalization is preserved.
        BigFloat {
            mantissa,
            exponent: self.exponent,
            negative: self.negative,
        }
    }

    /// Mantissa in two's complement, ready for ripple-carry addition.
    fn signed_mantissa(&self) -> [u64; LIMB_COUNT] {
        let mut m = self.mantissa;
        if self.negative {
            negate(&mut m);
        }
        m
    }

    fn make(mantissa: [u64; LIMB_COUNT], exponent: i32, negative: bool) -> Self {
        debug_assert!(exponent >= i16::MIN as i32 && exponent <= i16::MAX as i32);
        BigFloat {
            mantissa,
            exponent: exponent as i16,
            negative,
        }
    }
}

/// Exact power of two, clamped to the double range.
fn pow2(e: i32) -> f64 {
    if e < -1074 {
        0.0
    } else if e > 1023 {
        f64::INFINITY
    } else if e >= -1022 {
        f64::from_bits(((e + 1023) as u64) << 52)
    } else {
        // subnormal
        f64::from_bits(1u64 << (e + 1074))
    }
}

/// `x = m * 2^e` with `m` in `[0.5, 1)`. Input must be positive and finite.
fn frexp(x: f64) -> (f64, i32) {
    let bits = x.to_bits();
    let exp_field = ((bits >> 52) & 0x7ff) as i32;
    if exp_field == 0 {
        // subnormal: renormalize through one scale-up
        let (m, e) = frexp(x * pow2(64));
        (m, e - 64)
    } else {
        let m = f64::from_bits((bits & 0x000f_ffff_ffff_ffff) | (1022u64 << 52));
        (m, exp_field - 1022)
    }
}

/// Two's-complement negation across the limb array.
fn negate(m: &mut [u64]) {
    let mut carry = true;
    for limb in m.iter_mut().rev() {
        let (v, c) = (!*limb).overflowing_add(carry as u64);
        *limb = v;
        carry = c;
    }
}

fn shift_left(m: &mut [u64], bits: usize) {
    let len = m.len();
    if bits >= 64 * len {
        m.fill(0);
        return;
    }
    let limbs = bits / 64;
    let shift = bits % 64;
    if limbs > 0 {
        for i in 0..len - limbs {
            m[i] = m[i + limbs];
        }
        for limb in &mut m[len - limbs..] {
            *limb = 0;
        }
    }
    if shift > 0 {
        for i in 0..len {
            let next = if i + 1 < len { m[i + 1] >> (64 - shift) } else { 0 };
            m[i] = (m[i] << shift) | next;
        }
    }
}

fn shift_right(m: &mut [u64], bits: usize) {
    let len = m.len();
    if bits >= 64 * len {
        m.fill(0);
        return;
    }
    let limbs = bits / 64;
    let shift = bits % 64;
    if limbs > 0 {
        for i in (limbs..len).rev() {
            m[i] = m[i - limbs];
        }
        for limb in &mut m[..limbs] {
            *limb = 0;
        }
    }
    if shift > 0 {
        let mut carry = 0u64;
        for limb in m.iter_mut() {
            let v = *limb;
            *limb = (v >> shift) | (carry << (64 - shift));
            carry = v;
        }
    }
}

/// Arithmetic right shift of a two's-complement limb array, used to align
/// binary points before addition.
fn shift_right_signed(m: &mut [u64], bits: usize) {
    let len = m.len();
    let fill = if (m[0] as i64) < 0 { u64::MAX } else { 0 };
    if bits >= 64 * len {
        m.fill(fill);
        return;
    }
    let limbs = bits / 64;
    let shift = bits % 64;
    if limbs > 0 {
        for i in (limbs..len).rev() {
            m[i] = m[i - limbs];
        }
        for limb in &mut m[..limbs] {
            *limb = fill;
        }
    }
    if shift > 0 {
        let mut carry = fill;
        for limb in m.iter_mut() {
            let v = *limb;
            *limb = (v >> shift) | (carry << (64 - shift));
            carry = v;
        }
    }
}

fn leading_zero_bits(m: &[u64]) -> Option<usize> {
    let first = m.iter().position(|&l| l != 0)?;
    Some(64 * first + m[first].leading_zeros() as usize)
}

/// Shifts the mantissa so that exactly [`HEADROOM`] leading zero bits
/// remain, and returns the exponent adjustment. `None` means all-zero.
fn normalize(m: &mut [u64]) -> Option<i32> {
    let lz = leading_zero_bits(m)? as i32;
    let shift = lz - HEADROOM;
    if shift > 0 {
        shift_left(m, shift as usize);
    } else if shift < 0 {
        shift_right(m, (-shift) as usize);
    }
    Some(-shift)
}

impl<'b> Add<&'b BigFloat> for &BigFloat {
    type Output = BigFloat;

    fn add(self, rhs: &'b BigFloat) -> BigFloat {
        // A zero operand costs nothing.
        if self.is_zero() {
            return *rhs;
        }
        if rhs.is_zero() {
            return *self;
        }

        let mut a = self.signed_mantissa();
        let mut b = rhs.signed_mantissa();
        let exponent = self.exponent.max(rhs.exponent) as i32;
        let diff = self.exponent as i32 - rhs.exponent as i32;
        if diff > 0 {
            shift_right_signed(&mut b, diff as usize);
        } else if diff < 0 {
            shift_right_signed(&mut a, (-diff) as usize);
        }

        let mut sum = [0u64; LIMB_COUNT];
        let mut carry = false;
        for i in (0..LIMB_COUNT).rev() {
            let (s, c1) = a[i].overflowing_add(b[i]);
            let (s, c2) = s.overflowing_add(carry as u64);
            sum[i] = s;
            carry = c1 | c2;
        }

        // Both addends keep two headroom bits, so the top bit of the sum is
        // a genuine sign bit.
        let negative = (sum[0] as i64) < 0;
        if negative {
            negate(&mut sum);
        }
        match normalize(&mut sum) {
            None => BigFloat::ZERO,
            Some(adjust) => BigFloat::make(sum, exponent + adjust, negative),
        }
    }
}

impl<'b> Sub<&'b BigFloat> for &BigFloat {
    type Output = BigFloat;

    fn sub(self, rhs: &'b BigFloat) -> BigFloat {
        self + &(-*rhs)
    }
}

impl<'b> Mul<&'b BigFloat> for &BigFloat {
    type Output = BigFloat;

    fn mul(self, rhs: &'b BigFloat) -> BigFloat {
        if self.is_zero() || rhs.is_zero() {
            return BigFloat::ZERO;
        }

        // Schoolbook multiply into a double-width accumulator. The partial
        // product of limbs i and j lands at position i + j + 1; carries
        // ripple toward the most significant limb.
        let mut acc = [0u64; LIMB_COUNT * 2];
        for i in (0..LIMB_COUNT).rev() {
            let a = self.mantissa[i] as u128;
            if a == 0 {
                continue;
            }
            let mut carry = 0u128;
            for j in (0..LIMB_COUNT).rev() {
                let t = a * rhs.mantissa[j] as u128 + acc[i + j + 1] as u128 + carry;
                acc[i + j + 1] = t as u64;
                carry = t >> 64;
            }
            let mut k = i;
            loop {
                let t = acc[k] as u128 + carry;
                acc[k] = t as u64;
                carry = t >> 64;
                if carry == 0 || k == 0 {
                    break;
                }
                k -= 1;
            }
        }

        match normalize(&mut acc) {
            None => BigFloat::ZERO,
            Some(adjust) => {
                let mut mantissa = [0u64; LIMB_COUNT];
                mantissa.copy_from_slice(&acc[..LIMB_COUNT]);
                let exponent =
                    self.exponent as i32 + rhs.exponent as i32 + adjust + HEADROOM;
                BigFloat::make(mantissa, exponent, self.negative != rhs.negative)
            }
        }
    }
}

impl<'b> Div<&'b BigFloat> for &BigFloat {
    type Output = BigFloat;

    /// Newton–Raphson reciprocal seeded from a double estimate. The seed
    /// carries ~50 correct bits and each step doubles that, so the fixed
    /// iteration cap is far more than enough; the early exit fires once the
    /// iterate stops changing. Division by zero is a precondition violation;
    /// the divisor magnitude must sit inside the double exponent range for
    /// the seed to be usable.
    fn div(self, rhs: &'b BigFloat) -> BigFloat {
        debug_assert!(!rhs.is_zero());
        if self.is_zero() {
            return BigFloat::ZERO;
        }
        let two = BigFloat::from_f64(2.0);
        let mut reciprocal = BigFloat::from_f64(1.0 / rhs.to_f64());
        for _ in 0..2 * LIMB_COUNT {
            let refined = &reciprocal * &(&two - &(rhs * &reciprocal));
            if refined == reciprocal {
                break;
            }
            reciprocal = refined;
        }
        self * &reciprocal
    }
}

impl Neg for BigFloat {
    type Output = BigFloat;

    fn neg(mut self) -> BigFloat {
        if !self.is_zero() {
            self.negative = !self.negative;
        }
        self
    }
}

impl Neg for &BigFloat {
    type Output = BigFloat;

    fn neg(self) -> BigFloat {
        -*self
    }
}

impl Add for BigFloat {
    type Output = BigFloat;
    fn add(self, rhs: BigFloat) -> BigFloat {
        &self + &rhs
    }
}

impl Sub for BigFloat {
    type Output = BigFloat;
    fn sub(self, rhs: BigFloat) -> BigFloat {
        &self - &rhs
    }
}

impl Mul for BigFloat {
    type Output = BigFloat;
    fn mul(self, rhs: BigFloat) -> BigFloat {
        &self * &rhs
    }
}

impl Div for BigFloat {
    type Output = BigFloat;
    fn div(self, rhs: BigFloat) -> BigFloat {
        &self / &rhs
    }
}

impl From<f64> for BigFloat {
    fn from(value: f64) -> Self {
        BigFloat::from_f64(value)
    }
}

impl ToPrimitive for BigFloat {
    fn to_i64(&self) -> Option<i64> {
        Some(self.to_f64() as i64)
    }

    fn to_u64(&self) -> Option<u64> {
        let v = self.to_f64();
        if v < 0.0 { None } else { Some(v as u64) }
    }

    fn to_f64(&self) -> Option<f64> {
        Some(BigFloat::to_f64(self))
    }
}

#[cfg(feature = "trace")]
impl std::fmt::Display for BigFloat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:e} (exp {}, limbs", self.to_f64(), self.exponent)?;
        for limb in &self.mantissa {
            write!(f, " {limb:016x}")?;
        }
        write!(f, ")")
    }
}
