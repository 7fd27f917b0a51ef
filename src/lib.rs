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

//! Adaptive-precision arithmetic for robust geometric predicates.
//!
//! Double-precision round-off can flip the sign of a near-zero determinant
//! and make a hull or triangulation algorithm take an inconsistent
//! topological decision. This crate evaluates such predicates fast in
//! native doubles with a conservative error bound, and escalates to exact
//! fixed-width multi-limb arithmetic ([`numeric::BigFloat`]) only when the
//! bound cannot certify the sign.
//!
//! Entry points for embedding algorithms:
//! - [`kernel::orientation_sign`] — certified tetrahedron volume sign.
//! - [`kernel::intersect_line_triangle`] — exact barycentric line-triangle
//!   intersection.
//!
//! Everything is synchronous, single-threaded, and allocation-free; the
//! only shared resource is the FPU rounding mode, scoped by
//! [`numeric::PrecisionModeGuard`].

pub mod geometry;
pub mod kernel;
pub mod numeric;
pub mod operations;
