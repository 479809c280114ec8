// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for slide photos and exported images.

pub mod export;
pub mod media;
