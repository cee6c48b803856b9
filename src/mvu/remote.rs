// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Load state of server-backed data.

use crate::models::Identified;

#[derive(Clone, Debug, PartialEq)]
pub enum Remote<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Remote<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn resolve(&mut self, result: Result<T, String>) {
        *self = match result {
            Ok(value) => Self::Loaded(value),
            Err(message) => Self::Failed(message),
        };
    }
}

impl<I: Identified> Remote<Vec<I>> {
    pub fn items(&self) -> &[I] {
        self.loaded().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn find(&self, id: &str) -> Option<&I> {
        self.items().iter().find(|item| item.id() == id)
    }

    /// Replace the item with the same id, or append it.
    ///
    /// Only a loaded list changes; the next refresh picks the item up otherwise.
    pub fn upsert(&mut self, item: I) {
        if let Self::Loaded(items) = self {
            match items.iter_mut().find(|i| i.id() == item.id()) {
                Some(existing) => *existing = item,
                None => items.push(item),
            }
        }
    }

    pub fn remove(&mut self, id: &str) {
        if let Self::Loaded(items) = self {
            items.retain(|item| item.id() != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::manager::Manager;

    fn manager(id: &str, name: &str) -> Manager {
        Manager {
            id: id.into(),
            full_name: name.into(),
            ..Manager::default()
        }
    }

    #[test]
    fn upsert_replaces_in_place_or_appends() {
        let mut list = Remote::Loaded(vec![manager("a", "Ann"), manager("b", "Bo")]);
        list.upsert(manager("a", "Anna"));
        list.upsert(manager("c", "Cy"));

        let names: Vec<&str> = list.items().iter().map(|m| m.full_name.as_str()).collect();
        assert_eq!(names, ["Anna", "Bo", "Cy"]);
    }

    #[test]
    fn remove_and_unloaded_views() {
        let mut list = Remote::Loaded(vec![manager("a", "Ann")]);
        list.remove("a");
        assert!(list.items().is_empty());

        let mut pending: Remote<Vec<Manager>> = Remote::Loading;
        assert!(pending.items().is_empty());
        pending.upsert(manager("z", "Zed"));
        assert!(pending.is_loading());
    }

    #[test]
    fn upsert_keeps_load_failure() {
        let mut list: Remote<Vec<Manager>> = Remote::Failed("Failed to load managers.".into());
        list.upsert(manager("z", "Zed"));
        assert_eq!(list.error(), Some("Failed to load managers."));
        assert!(list.find("z").is_none());
    }

    #[test]
    fn resolve_failure_keeps_message() {
        let mut list: Remote<Vec<Manager>> = Remote::Loading;
        list.resolve(Err("Failed to load managers.".into()));
        assert_eq!(list.error(), Some("Failed to load managers."));
    }
}
