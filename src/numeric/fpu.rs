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

//! Scoped control of the floating-point unit's precision mode.
//!
//! The determinant error bounds assume every intermediate result is rounded
//! to strict double precision. Legacy x87 hardware evaluates at 80 bits by
//! default, which silently invalidates that assumption, so on 32-bit x86
//! without SSE2 the guard rewrites the x87 control word for the duration of
//! a predicate call. Everywhere else (x86-64, AArch64, anything computing in
//! SSE registers) doubles are already rounded strictly and the guard
//! compiles down to nothing.
//!
//! The control word is a thread-wide resource: a caller embedding the
//! predicates in a multi-threaded program must keep each guarded scope on a
//! single thread.

#[cfg(all(target_arch = "x86", not(target_feature = "sse2")))]
mod x87 {
    use core::arch::asm;

    // Precision-control field of the x87 control word (bits 8-9);
    // 0b10 selects 53-bit (double) rounding.
    pub const PRECISION_MASK: u16 = 0x0300;
    pub const PRECISION_DOUBLE: u16 = 0x0200;

    pub fn read_control_word() -> u16 {
        let mut cw: u16 = 0;
        unsafe {
            asm!("fnstcw [{0}]", in(reg) &mut cw, options(nostack, preserves_flags));
        }
        cw
    }

    pub fn write_control_word(cw: u16) {
        unsafe {
            asm!("fldcw [{0}]", in(reg) &cw, options(nostack, preserves_flags));
        }
    }
}

/// RAII guard that pins the FPU to strict double rounding for its scope.
///
/// Acquired at entry to each top-level predicate; the saved mode is restored
/// on drop. A no-op zero-sized value on targets without the x87 hazard.
pub struct PrecisionModeGuard {
    #[cfg(all(target_arch = "x86", not(target_feature = "sse2")))]
    saved: u16,
}

impl PrecisionModeGuard {
    #[cfg(all(target_arch = "x86", not(target_feature = "sse2")))]
    pub fn new() -> Self {
        let saved = x87::read_control_word();
        x87::write_control_word((saved & !x87::PRECISION_MASK) | x87::PRECISION_DOUBLE);
        PrecisionModeGuard { saved }
    }

    #[cfg(not(all(target_arch = "x86", not(target_feature = "sse2"))))]
    pub fn new() -> Self {
        PrecisionModeGuard {}
    }
}

impl Default for PrecisionModeGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(target_arch = "x86", not(target_feature = "sse2")))]
impl Drop for PrecisionModeGuard {
    fn drop(&mut self) {
        x87::write_control_word(self.saved);
    }
}
