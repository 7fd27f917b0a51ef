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

use crate::geometry::point_3::Point3;
use crate::kernel::determinant::det3x3_adaptive;
use crate::numeric::fpu::PrecisionModeGuard;

/// Signed volume of the tetrahedron spanned by the edge vectors from
/// `apex` to the three base points.
///
/// The sign is certified: when the double-precision determinant is too
/// close to zero relative to its error bound, the same entries are
/// re-evaluated exactly. A hull builder working on a paraboloid lifting
/// reads `>= 0` as "face on the upper envelope, discard".
///
/// Pure and allocation-free on the fast path; called once per candidate
/// face per refinement step.
pub fn orientation_sign(
    apex: &Point3<f64>,
    b0: &Point3<f64>,
    b1: &Point3<f64>,
    b2: &Point3<f64>,
) -> f64 {
    let _mode = PrecisionModeGuard::new();
    let edges = [
        [b0.x - apex.x, b0.y - apex.y, b0.z - apex.z],
        [b1.x - apex.x, b1.y - apex.y, b1.z - apex.z],
        [b2.x - apex.x, b2.y - apex.y, b2.z - apex.z],
    ];
    det3x3_adaptive(&edges)
}
