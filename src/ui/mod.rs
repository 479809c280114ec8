// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the SneakPeek editor.

pub mod canvas;
pub mod drag;
pub mod properties;
pub mod slides;
pub mod toolbar;
