// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Business logic kept free of UI and network concerns.

pub mod payload;
pub mod template_tree;
pub mod validation;
