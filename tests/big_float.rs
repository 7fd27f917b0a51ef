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
use robust_kernel::numeric::BigFloat;

#[test]
fn round_trip_is_exact_for_doubles() {
    // every finite double fits in the top limb, so from/to must be lossless
    let values = [
        0.0, 1.0, -1.0, 0.1, -0.1, 1.5, 0.3333333333333333, 12345.6789, 1e-300, -1e-300, 1e300,
        -1e300, f64::MIN_POSITIVE, 5e-324, -5e-324, f64::MAX, f64::MIN,
    ];
    for v in values {
        assert_eq!(BigFloat::from_f64(v).to_f64(), v, "round trip of {v}");
    }
}

#[test]
fn additive_identity() {
    let a = BigFloat::from_f64(3.14159);
    let zero = BigFloat::from_f64(0.0);
    assert_eq!(&a + &zero, a);
    assert_eq!(&zero + &a, a);
}

#[test]
fn self_subtraction_is_exact_zero() {
    for v in [1.0, -2.5, 0.1, 1e-200, 1e200, 123.456] {
        let a = BigFloat::from_f64(v);
        let diff = &a - &a;
        assert!(diff.is_zero(), "{v} - {v} should cancel exactly");
        assert_eq!(diff.sign(), 0);
    }
}

#[test]
fn dyadic_sums_are_exact() {
    let a = BigFloat::from_f64(1.5);
    let b = BigFloat::from_f64(2.25);
    assert_eq!((&a + &b).to_f64(), 3.75);
    assert_eq!((&a - &b).to_f64(), -0.75);
}

#[test]
fn far_apart_exponents_stay_exact_within_the_window() {
    // 2^-100 + 2^-200 are 100 bits apart: both fit in the 256-bit mantissa
    let big = BigFloat::from_f64((-100f64).exp2());
    let small = BigFloat::from_f64((-200f64).exp2());
    let sum = &big + &small;
    assert_ne!(sum, big);
    assert_eq!(&sum - &small, big);
    // the collapse back to a double only sees the top limb
    assert_eq!(sum.to_f64(), (-100f64).exp2());
}

#[test]
fn products_of_doubles_are_exact() {
    let a = BigFloat::from_f64(3.0);
    let b = BigFloat::from_f64(4.0);
    assert_eq!((&a * &b).to_f64(), 12.0);

    // two 53-bit mantissas make a 106-bit product, exact in 256 bits
    let x = BigFloat::from_f64(0.1);
    let y = BigFloat::from_f64(0.2);
    let product = &x * &y;
    assert_eq!((&product / &y).to_f64(), 0.1);

    let tiny = BigFloat::from_f64(1e-30);
    let huge = BigFloat::from_f64(1e30);
    assert!(((&tiny * &huge).to_f64() - 1.0).abs() < 1e-14);
}

#[test]
fn multiplying_by_zero_short_circuits() {
    let a = BigFloat::from_f64(7.25);
    assert!((&a * &BigFloat::ZERO).is_zero());
    assert!((&BigFloat::ZERO * &a).is_zero());
}

#[test]
fn multiplicative_inverse_across_exponent_range() {
    for v in [
        1e-300, 1e-100, 1e-12, 0.5, 1.0, 3.7, 1234.5678, 1e12, 1e100, 1e300, -2.5, -1e250,
    ] {
        let a = BigFloat::from_f64(v);
        let ratio = (&a / &a).to_f64();
        assert!((ratio - 1.0).abs() < 1e-12, "{v}/{v} gave {ratio}");
    }
}

#[test]
fn division_agrees_with_double_division_on_simple_ratios() {
    let a = BigFloat::from_f64(1.0);
    let b = BigFloat::from_f64(3.0);
    assert!(((&a / &b).to_f64() - 1.0 / 3.0).abs() < 1e-15);

    let c = BigFloat::from_f64(10.0);
    let d = BigFloat::from_f64(4.0);
    assert_eq!((&c / &d).to_f64(), 2.5);
}

#[test]
fn floor_masks_fractional_bits() {
    assert_eq!(BigFloat::from_f64(3.75).floor().to_f64(), 3.0);
    assert_eq!(BigFloat::from_f64(12345.0).floor().to_f64(), 12345.0);
    assert_eq!(BigFloat::from_f64(0.99).floor().to_f64(), 0.0);
    assert_eq!(BigFloat::from_f64(1.0).floor().to_f64(), 1.0);
    // truncation toward zero, by construction of the bit mask
    assert_eq!(BigFloat::from_f64(-3.75).floor().to_f64(), -3.0);
    // integer parts of products survive the mask
    let v = &BigFloat::from_f64(1.5) * &BigFloat::from_f64(2.5);
    assert_eq!(v.floor().to_f64(), 3.0);
}

#[test]
fn sign_abs_neg() {
    let a = BigFloat::from_f64(-4.5);
    assert_eq!(a.sign(), -1);
    assert_eq!(a.abs().sign(), 1);
    assert_eq!((-a).to_f64(), 4.5);
    assert_eq!(BigFloat::ZERO.sign(), 0);
    // negating zero keeps it canonical
    assert_eq!(-BigFloat::ZERO, BigFloat::ZERO);
}

#[test]
fn to_primitive_conversions() {
    let a = BigFloat::from_f64(42.9);
    assert_eq!(ToPrimitive::to_f64(&a), Some(42.9));
    assert_eq!(a.to_i64(), Some(42));
    assert_eq!(BigFloat::from_f64(-1.5).to_u64(), None);
}

#[test]
fn long_alternating_sum_cancels_exactly() {
    // exactness over a bounded chain of mixed-magnitude operations
    let terms = [1.0e10, -3.25, 7.5e-8, 123.0, -1.0e10, 3.25, -7.5e-8, -123.0];
    let mut acc = BigFloat::ZERO;
    for t in terms {
        acc = &acc + &BigFloat::from_f64(t);
    }
    assert!(acc.is_zero());
}
