// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Document model: listing, slides and text overlays.

pub mod color;
pub mod overlay;
pub mod project;
pub mod slide;
