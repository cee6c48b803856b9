// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Manager → job → form selection shared by every screen.

/// Snapshot of the selection a fetch or mutation was issued under.
///
/// Components remember the tag they were last reset with and ignore results carrying any
/// other tag, so a slow response for a previous selection never lands in the current one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextTag {
    pub generation: u64,
    pub manager_id: Option<String>,
    pub job_id: Option<String>,
    pub form_id: Option<String>,
}

/// Current selection. Changing a level clears every level below it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    generation: u64,
    manager_id: Option<String>,
    job_id: Option<String>,
    form_id: Option<String>,
}

impl Session {
    pub fn manager_id(&self) -> Option<&str> {
        self.manager_id.as_deref()
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub fn form_id(&self) -> Option<&str> {
        self.form_id.as_deref()
    }

    pub fn select_manager(&mut self, manager_id: Option<String>) -> ContextTag {
        self.manager_id = normalize(manager_id);
        self.job_id = None;
        self.form_id = None;
        self.bump()
    }

    pub fn select_job(&mut self, job_id: Option<String>) -> ContextTag {
        self.job_id = normalize(job_id);
        self.form_id = None;
        self.bump()
    }

    pub fn select_form(&mut self, form_id: Option<String>) -> ContextTag {
        self.form_id = normalize(form_id);
        self.bump()
    }

    pub fn tag(&self) -> ContextTag {
        ContextTag {
            generation: self.generation,
            manager_id: self.manager_id.clone(),
            job_id: self.job_id.clone(),
            form_id: self.form_id.clone(),
        }
    }

    fn bump(&mut self) -> ContextTag {
        self.generation += 1;
        self.tag()
    }
}

fn normalize(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_a_manager_clears_job_and_form() {
        let mut session = Session::default();
        session.select_manager(Some("m-1".into()));
        session.select_job(Some("j-1".into()));
        session.select_form(Some("f-1".into()));

        let tag = session.select_manager(Some("m-2".into()));
        assert_eq!(tag.manager_id.as_deref(), Some("m-2"));
        assert!(tag.job_id.is_none());
        assert!(tag.form_id.is_none());
    }

    #[test]
    fn reselecting_the_same_manager_still_changes_the_tag() {
        let mut session = Session::default();
        let first = session.select_manager(Some("m-1".into()));
        session.select_manager(Some("m-2".into()));
        let again = session.select_manager(Some("m-1".into()));
        assert_ne!(first, again);
        assert_eq!(first.manager_id, again.manager_id);
    }

    #[test]
    fn blank_ids_mean_no_selection() {
        let mut session = Session::default();
        session.select_manager(Some("  ".into()));
        assert!(session.manager_id().is_none());
    }
}
