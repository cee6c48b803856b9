// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Shared helper utilities reused by UI and business logic.

pub mod display;
pub mod sanitize;

/// Render JSON scalars for display.
pub use display::{format_timestamp, value_to_string};
/// Clean user input before it is sent to the API.
pub use sanitize::{sanitize_text, split_list};
