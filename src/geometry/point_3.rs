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

use crate::geometry::vector_3::Vector3;
use std::ops::Sub;

/// A position in 3-space, generic over the scalar so that the same geometry
/// works on plain doubles and on exact [`BigFloat`] coordinates.
///
/// [`BigFloat`]: crate::numeric::big_float::BigFloat
#[derive(Clone, Debug, PartialEq)]
pub struct Point3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Point3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Cast the coordinate type, e.g. promote `f64` points to `BigFloat`
    /// for an exact-path computation.
    pub fn cast<U>(&self) -> Point3<U>
    where
        T: Clone,
        U: From<T>,
    {
        Point3 {
            x: U::from(self.x.clone()),
            y: U::from(self.y.clone()),
            z: U::from(self.z.clone()),
        }
    }
}

impl<'b, T> Sub<&'b Point3<T>> for &Point3<T>
where
    for<'a> &'a T: Sub<&'a T, Output = T>,
{
    type Output = Vector3<T>;

    fn sub(self, rhs: &'b Point3<T>) -> Vector3<T> {
        Vector3 {
            x: &self.x - &rhs.x,
            y: &self.y - &rhs.y,
            z: &self.z - &rhs.z,
        }
    }
}
