// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Domain layer: wire-compatible data types shared by the API client, editor logic and UI.

pub mod form_template;
pub mod identity;
pub mod job;
pub mod manager;
pub mod response;

/// Entities the server assigns an id to.
///
/// Collections are reconciled by this id after a confirmed create/update/delete.
pub trait Identified {
    /// Server-assigned id, empty when the entity has not been persisted yet.
    fn id(&self) -> &str;
}
