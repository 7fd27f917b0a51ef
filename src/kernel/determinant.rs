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

//! Small fixed-size determinants with conservative error bounds, and their
//! exact [`BigFloat`] counterparts.
//!
//! The fast functions return `(value, bound)` where `bound` is the sum of
//! the absolute values of the intermediate products. That is a gross
//! over-estimate of the true rounding error; the adaptive policy scales it
//! by 2^-24 before comparing, which is still conservative against the
//! 2^-52 machine epsilon of strict double rounding. The dimensions stay at
//! 2/3/4 on purpose: orientation and lifted in-sphere tests never need
//! more, and a generic NxN type would buy nothing here.

use crate::numeric::big_float::BigFloat;

/// Relative threshold under which a fast-path sign cannot be trusted.
const ERROR_SCALE: f64 = 1.0 / 16_777_216.0; // 2^-24

pub fn det2x2(m: &[[f64; 2]; 2]) -> (f64, f64) {
    let a = m[0][0] * m[1][1];
    let b = m[0][1] * m[1][0];
    (a - b, a.abs() + b.abs())
}

/// Cofactor expansion along row 0. The bound accumulates each minor's
/// bound weighted by the magnitude of its coefficient.
pub fn det3x3(m: &[[f64; 3]; 3]) -> (f64, f64) {
    let (d0, e0) = det2x2(&[[m[1][1], m[1][2]], [m[2][1], m[2][2]]]);
    let (d1, e1) = det2x2(&[[m[1][0], m[1][2]], [m[2][0], m[2][2]]]);
    let (d2, e2) = det2x2(&[[m[1][0], m[1][1]], [m[2][0], m[2][1]]]);
    let det = m[0][0] * d0 - m[0][1] * d1 + m[0][2] * d2;
    let error = e0 * m[0][0].abs() + e1 * m[0][1].abs() + e2 * m[0][2].abs();
    (det, error)
}

pub fn det4x4(m: &[[f64; 4]; 4]) -> (f64, f64) {
    let minor = |c0: usize, c1: usize, c2: usize| {
        [
            [m[1][c0], m[1][c1], m[1][c2]],
            [m[2][c0], m[2][c1], m[2][c2]],
            [m[3][c0], m[3][c1], m[3][c2]],
        ]
    };
    let (d0, e0) = det3x3(&minor(1, 2, 3));
    let (d1, e1) = det3x3(&minor(0, 2, 3));
    let (d2, e2) = det3x3(&minor(0, 1, 3));
    let (d3, e3) = det3x3(&minor(0, 1, 2));
    let det = m[0][0] * d0 - m[0][1] * d1 + m[0][2] * d2 - m[0][3] * d3;
    let error = e0 * m[0][0].abs()
        + e1 * m[0][1].abs()
        + e2 * m[0][2].abs()
        + e3 * m[0][3].abs();
    (det, error)
}

pub fn det2x2_exact(m: &[[BigFloat; 2]; 2]) -> BigFloat {
    &(&m[0][0] * &m[1][1]) - &(&m[0][1] * &m[1][0])
}

pub fn det3x3_exact(m: &[[BigFloat; 3]; 3]) -> BigFloat {
    let d0 = det2x2_exact(&[[m[1][1], m[1][2]], [m[2][1], m[2][2]]]);
    let d1 = det2x2_exact(&[[m[1][0], m[1][2]], [m[2][0], m[2][2]]]);
    let d2 = det2x2_exact(&[[m[1][0], m[1][1]], [m[2][0], m[2][1]]]);
    &(&(&m[0][0] * &d0) - &(&m[0][1] * &d1)) + &(&m[0][2] * &d2)
}

pub fn det4x4_exact(m: &[[BigFloat; 4]; 4]) -> BigFloat {
    let minor = |c0: usize, c1: usize, c2: usize| {
        [
            [m[1][c0], m[1][c1], m[1][c2]],
            [m[2][c0], m[2][c1], m[2][c2]],
            [m[3][c0], m[3][c1], m[3][c2]],
        ]
    };
    let d0 = det3x3_exact(&minor(1, 2, 3));
    let d1 = det3x3_exact(&minor(0, 2, 3));
    let d2 = det3x3_exact(&minor(0, 1, 3));
    let d3 = det3x3_exact(&minor(0, 1, 2));
    &(&(&(&m[0][0] * &d0) - &(&m[0][1] * &d1)) + &(&m[0][2] * &d2)) - &(&m[0][3] * &d3)
}

/// Fast determinant when its sign is certain, exact fallback otherwise.
///
/// The exact path promotes the same matrix entries to [`BigFloat`] and
/// decides the sign on the exact value; the returned double is only the
/// collapsed report of that value. Callers must hold strict double
/// rounding (see [`PrecisionModeGuard`]) for the bound to be meaningful.
///
/// [`PrecisionModeGuard`]: crate::numeric::fpu::PrecisionModeGuard
pub fn det3x3_adaptive(m: &[[f64; 3]; 3]) -> f64 {
    let (det, error) = det3x3(m);
    if det.abs() > error * ERROR_SCALE {
        return det;
    }
    det3x3_exact(&promote3(m)).to_f64()
}

/// See [`det3x3_adaptive`]; used by lifted (paraboloid) 4-point tests.
pub fn det4x4_adaptive(m: &[[f64; 4]; 4]) -> f64 {
    let (det, error) = det4x4(m);
    if det.abs() > error * ERROR_SCALE {
        return det;
    }
    det4x4_exact(&promote4(m)).to_f64()
}

fn promote3(m: &[[f64; 3]; 3]) -> [[BigFloat; 3]; 3] {
    m.map(|row| row.map(BigFloat::from_f64))
}

fn promote4(m: &[[f64; 4]; 4]) -> [[BigFloat; 4]; 4] {
    m.map(|row| row.map(BigFloat::from_f64))
}
