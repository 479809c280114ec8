// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Slide rendering with tiny-skia.
//!
//! The compositor is the only place pixels for a slide are produced. The
//! preview calls it at the preview size, export calls it at the export size.

pub mod background;
pub mod compositor;
pub mod shadow;
pub mod text;

pub use compositor::Compositor;
pub use text::FontBook;
