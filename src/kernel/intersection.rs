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
use crate::geometry::vector_3::Vector3;
use crate::numeric::big_float::BigFloat;
use crate::numeric::fpu::PrecisionModeGuard;

/// Exact barycentric intersection of the line through `p0`, `p1` with
/// triangle `(a, b, c)`.
///
/// All five points are promoted to [`BigFloat`] coordinates, and the three
/// signed sub-tetrahedron volumes are evaluated exactly, so the
/// inside/outside decision never suffers round-off. Returns the barycentric
/// weights of the plane intersection (weights of `a`, `b`, `c`, summing to
/// 1) or `None` when the intersection falls outside the triangle, or when
/// the line lies in the triangle's plane.
///
/// The test is directed: it considers the line oriented from `p0` towards
/// `p1` against the triangle's front face, and a reversed segment reports
/// no intersection.
pub fn intersect_line_triangle(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
) -> Option<(f64, f64, f64)> {
    let _mode = PrecisionModeGuard::new();

    let origin: Point3<BigFloat> = p0.cast();
    let end: Point3<BigFloat> = p1.cast();
    let ea: Point3<BigFloat> = a.cast();
    let eb: Point3<BigFloat> = b.cast();
    let ec: Point3<BigFloat> = c.cast();
    let direction = &origin - &end;

    // Each volume is the weight of the vertex opposite the probed edge.
    // Bail out on the first strictly negative one.
    let t0 = face_volume(&eb, &ec, &origin, &direction);
    if t0.sign() < 0 {
        return None;
    }
    let t1 = face_volume(&ec, &ea, &origin, &direction);
    if t1.sign() < 0 {
        return None;
    }
    let t2 = face_volume(&ea, &eb, &origin, &direction);
    if t2.sign() < 0 {
        return None;
    }

    let sum = &(&t0 + &t1) + &t2;
    if sum.is_zero() {
        // line in (or parallel to) the triangle's plane
        return None;
    }

    // Only the sign decisions above needed exactness; the normalized
    // weights are fine in double precision.
    let denominator = sum.to_f64();
    let weights = (
        t0.to_f64() / denominator,
        t1.to_f64() / denominator,
        t2.to_f64() / denominator,
    );
    debug_assert!(reconstruction_is_coplanar(weights, a, b, c));
    Some(weights)
}

/// Signed volume of the tetrahedron `(origin, x, y, origin + direction)`,
/// via an exact cross product followed by an exact dot product.
fn face_volume(
    x: &Point3<BigFloat>,
    y: &Point3<BigFloat>,
    origin: &Point3<BigFloat>,
    direction: &Vector3<BigFloat>,
) -> BigFloat {
    let u = x - origin;
    let v = y - origin;
    u.cross(&v).dot(direction)
}

/// Correctness self-check: the point rebuilt from the weights must lie in
/// the triangle's plane. Debug builds only.
fn reconstruction_is_coplanar(
    weights: (f64, f64, f64),
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
) -> bool {
    let (w0, w1, w2) = weights;
    let q = Point3::new(
        w0 * a.x + w1 * b.x + w2 * c.x,
        w0 * a.y + w1 * b.y + w2 * c.y,
        w0 * a.z + w1 * b.z + w2 * c.z,
    );
    let normal = (b - a).cross(&(c - a));
    let offset = (&q - a).dot(&normal);
    let normal_len = normal.dot(&normal).sqrt();
    let qa = &q - a;
    let qa_len = qa.dot(&qa).sqrt();
    offset.abs() <= 1e-9 * normal_len * qa_len + 1e-12
}
