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

use robust_kernel::geometry::Point3;
use robust_kernel::kernel::orientation_sign;

#[test]
fn unit_tetrahedron_orientations() {
    let apex = Point3::new(0.0, 0.0, 0.0);
    let b0 = Point3::new(1.0, 0.0, 0.0);
    let b1 = Point3::new(0.0, 1.0, 0.0);
    let b2 = Point3::new(0.0, 0.0, 1.0);
    let volume = orientation_sign(&apex, &b0, &b1, &b2);
    assert!(volume > 0.0);
    // swapping two base points flips the face
    assert!(orientation_sign(&apex, &b1, &b0, &b2) < 0.0);
}

#[test]
fn translation_invariance() {
    let offsets = [
        (0.0, 0.0, 0.0),
        (1000.25, -42.5, 77.125),
        (-1e6, 3.5, 0.0625),
        (123456.78, -98765.4, 0.001),
    ];
    let base = [
        (0.1, 0.2, 0.3),
        (1.4, 0.1, -0.2),
        (0.3, 1.7, 0.4),
        (-0.2, 0.4, 1.9),
    ];
    let reference = orientation_sign(
        &Point3::new(base[0].0, base[0].1, base[0].2),
        &Point3::new(base[1].0, base[1].1, base[1].2),
        &Point3::new(base[2].0, base[2].1, base[2].2),
        &Point3::new(base[3].0, base[3].1, base[3].2),
    );
    assert_ne!(reference, 0.0);

    for (dx, dy, dz) in offsets {
        let p: Vec<Point3<f64>> = base
            .iter()
            .map(|&(x, y, z)| Point3::new(x + dx, y + dy, z + dz))
            .collect();
        let volume = orientation_sign(&p[0], &p[1], &p[2], &p[3]);
        assert_eq!(volume.signum(), reference.signum(), "offset {dx},{dy},{dz}");
        assert!(
            (volume - reference).abs() <= 1e-6 * reference.abs(),
            "offset {dx},{dy},{dz}: {volume} vs {reference}"
        );
    }
}

#[test]
fn probe_sign_is_nonzero_and_deterministic() {
    // apex probe strictly below the x+y+z=1 face of the unit tetrahedron
    let apex = Point3::new(0.3, 0.3, 0.3);
    let b0 = Point3::new(1.0, 0.0, 0.0);
    let b1 = Point3::new(0.0, 1.0, 0.0);
    let b2 = Point3::new(0.0, 0.0, 1.0);

    let first = orientation_sign(&apex, &b0, &b1, &b2);
    assert_ne!(first, 0.0);
    for _ in 0..1000 {
        let again = orientation_sign(&apex, &b0, &b1, &b2);
        assert_eq!(again, first);
    }
}

#[test]
fn coplanar_points_give_exact_zero() {
    let apex = Point3::new(0.25, 0.75, 0.0);
    let b0 = Point3::new(1.0, 0.0, 0.0);
    let b1 = Point3::new(0.0, 1.0, 0.0);
    let b2 = Point3::new(-3.5, 2.0, 0.0);
    assert_eq!(orientation_sign(&apex, &b0, &b1, &b2), 0.0);
}

#[test]
fn near_coplanar_apex_sign_follows_the_perturbation() {
    // the apex sits a quarter-ulp-scale height off the base plane: far too
    // small for the fast path to certify, so this exercises the fallback
    let h = (-60f64).exp2();
    let b0 = Point3::new(1.0, 0.0, 0.0);
    let b1 = Point3::new(0.0, 1.0, 0.0);
    let b2 = Point3::new(0.25, 0.25, 0.0);

    let above = Point3::new(0.5, 0.25, h);
    let below = Point3::new(0.5, 0.25, -h);
    let va = orientation_sign(&above, &b0, &b1, &b2);
    let vb = orientation_sign(&below, &b0, &b1, &b2);
    assert_ne!(va, 0.0);
    assert_ne!(vb, 0.0);
    assert_eq!(va.signum(), -vb.signum());
}
