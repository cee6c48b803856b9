// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Submit-time checks for every editable entity.
//!
//! Each validator returns the first problem found; its `Display` text is shown to the user
//! as-is. Nothing is sent to the API unless the relevant validator passes.

use email_address::EmailAddress;
use thiserror::Error;

use crate::models::form_template::{Field, FormTemplate};
use crate::models::identity::IdentityDraft;
use crate::models::job::JobDraft;
use crate::models::manager::ManagerDraft;
use crate::utils::sanitize_text;

/// Why a draft cannot be submitted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("Invalid email format.")]
    InvalidEmail,
    #[error("Please select a manager.")]
    NoManagerSelected,
    #[error("Group {position} needs a title.")]
    UntitledGroup { position: usize },
    #[error("Group \"{title}\" needs at least one field.")]
    EmptyGroup { title: String },
    #[error("Field {position} in {location} needs a label.")]
    UnlabelledField { location: String, position: usize },
    #[error("Field \"{label}\" needs at least one option.")]
    MissingOptions { label: String },
}

/// Full name, company name and a well-formed email are required.
pub fn validate_manager(draft: &ManagerDraft) -> Result<(), ValidationError> {
    require(&draft.full_name, "Full name")?;
    let email = sanitize_text(&draft.email);
    require(&email, "Email")?;
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    require(&draft.company_name, "Company name")?;
    Ok(())
}

/// Title, description, country, state, city and work mode are required; everything else is
/// optional.
pub fn validate_job(draft: &JobDraft) -> Result<(), ValidationError> {
    require(&draft.title, "Title")?;
    require(&draft.description, "Description")?;
    require(&draft.country, "Country")?;
    require(&draft.state, "State")?;
    require(&draft.city, "City")?;
    require(&draft.work_mode, "Work mode")?;
    Ok(())
}

/// Identity value, type and verification status are all required.
pub fn validate_identity(draft: &IdentityDraft) -> Result<(), ValidationError> {
    require(&draft.identity, "Identity")?;
    require(&draft.identity_type, "Identity type")?;
    match &draft.verification_status {
        Some(status) if !status.as_str().trim().is_empty() => Ok(()),
        _ => Err(ValidationError::Required("Verification status")),
    }
}

/// Title and form type are required.
pub fn validate_template_header(template: &FormTemplate) -> Result<(), ValidationError> {
    require(&template.title, "Title")?;
    require(template.form_type.as_str(), "Form type")?;
    Ok(())
}

/// Header rules plus structure: every group is titled and non-empty, every field is
/// labelled, and choice fields list at least one option.
pub fn validate_template(template: &FormTemplate) -> Result<(), ValidationError> {
    validate_template_header(template)?;

    for (g, group) in template.groups.iter().enumerate() {
        let title = sanitize_text(&group.title);
        if title.is_empty() {
            return Err(ValidationError::UntitledGroup { position: g + 1 });
        }
        if group.fields.is_empty() {
            return Err(ValidationError::EmptyGroup { title });
        }
        validate_fields(&group.fields, &format!("group \"{title}\""))?;
    }
    validate_fields(&template.fields, "ungrouped fields")
}

fn validate_fields(fields: &[Field], location: &str) -> Result<(), ValidationError> {
    for (i, field) in fields.iter().enumerate() {
        let label = sanitize_text(&field.label);
        if label.is_empty() {
            return Err(ValidationError::UnlabelledField {
                location: location.to_string(),
                position: i + 1,
            });
        }
        if field.kind.has_options() && field.options.iter().all(|o| sanitize_text(o).is_empty()) {
            return Err(ValidationError::MissingOptions { label });
        }
    }
    Ok(())
}

/// RFC 5322 address via `email_address`, restricted to a bare `local@domain.tld`: no display
/// text, and a dot inside the domain with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    let Ok(parsed) = EmailAddress::parse_with_options(email, Default::default()) else {
        return false;
    };
    if parsed.email() != email {
        return false;
    }
    let domain = parsed.domain();
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Checked after sanitizing, so a value that is only a script block counts as missing.
fn require(value: &str, name: &'static str) -> Result<(), ValidationError> {
    if sanitize_text(value).is_empty() {
        Err(ValidationError::Required(name))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form_template::{FieldType, FormGroup, FormType};
    use crate::models::identity::VerificationStatus;

    fn manager(full_name: &str, company: &str, email: &str) -> ManagerDraft {
        ManagerDraft {
            full_name: full_name.into(),
            email: email.into(),
            company_name: company.into(),
            company_description: String::new(),
        }
    }

    fn complete_job() -> JobDraft {
        JobDraft {
            title: "Engineer".into(),
            description: "Build things".into(),
            country: "NG".into(),
            state: "Lagos".into(),
            city: "Ikeja".into(),
            work_mode: "remote".into(),
            ..JobDraft::default()
        }
    }

    #[test]
    fn manager_email_must_match_pattern() {
        assert_eq!(
            validate_manager(&manager("A", "B", "bad")),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(validate_manager(&manager("A", "B", "a@b.com")), Ok(()));
    }

    #[test]
    fn manager_requires_names_after_sanitizing() {
        assert_eq!(
            validate_manager(&manager("<script>x</script>  ", "B", "a@b.com")),
            Err(ValidationError::Required("Full name"))
        );
        assert_eq!(
            validate_manager(&manager("A", " ", "a@b.com")),
            Err(ValidationError::Required("Company name"))
        );
        assert_eq!(
            validate_manager(&manager("A", "B", "")),
            Err(ValidationError::Required("Email"))
        );
    }

    #[test]
    fn email_pattern_edges() {
        assert!(is_valid_email("jane@co.com"));
        assert!(is_valid_email("a@b.c.d"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@com."));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("Jane <jane@co.com>"));
    }

    #[test]
    fn job_and_identity_fields_are_checked_after_sanitizing() {
        let job = JobDraft {
            title: "<script>x</script>".into(),
            ..complete_job()
        };
        assert_eq!(validate_job(&job), Err(ValidationError::Required("Title")));

        let job = JobDraft {
            city: " <SCRIPT>alert(1)</script> ".into(),
            ..complete_job()
        };
        assert_eq!(validate_job(&job), Err(ValidationError::Required("City")));

        let draft = IdentityDraft {
            identity: "<script>x</script>".into(),
            identity_type: "email".into(),
            verification_status: Some(VerificationStatus::Unverified),
        };
        assert_eq!(
            validate_identity(&draft),
            Err(ValidationError::Required("Identity"))
        );
    }

    #[test]
    fn template_text_is_checked_after_sanitizing() {
        let valid = || FormTemplate {
            title: "Apply".into(),
            form_type: FormType::Application,
            groups: vec![FormGroup {
                title: "Contact".into(),
                fields: vec![Field {
                    label: "Track".into(),
                    kind: FieldType::Select,
                    options: vec!["A".into()],
                    ..Field::new()
                }],
                ..FormGroup::new()
            }],
            ..FormTemplate::default()
        };
        assert_eq!(validate_template(&valid()), Ok(()));

        let mut template = valid();
        template.title = "<script>x</script>".into();
        assert_eq!(
            validate_template(&template),
            Err(ValidationError::Required("Title"))
        );

        let mut template = valid();
        template.groups[0].title = "<script></script>".into();
        assert_eq!(
            validate_template(&template),
            Err(ValidationError::UntitledGroup { position: 1 })
        );

        let mut template = valid();
        template.groups[0].fields[0].label = "<script>x</script>".into();
        assert!(matches!(
            validate_template(&template),
            Err(ValidationError::UnlabelledField { position: 1, .. })
        ));

        let mut template = valid();
        template.groups[0].fields[0].options = vec!["<script>x</script>".into()];
        assert_eq!(
            validate_template(&template),
            Err(ValidationError::MissingOptions {
                label: "Track".into()
            })
        );
    }

    #[test]
    fn job_needs_all_six_required_fields() {
        assert_eq!(validate_job(&complete_job()), Ok(()));

        let blankers: [fn(&mut JobDraft); 6] = [
            |j| j.title = " ".into(),
            |j| j.description.clear(),
            |j| j.country.clear(),
            |j| j.state = "\t".into(),
            |j| j.city.clear(),
            |j| j.work_mode.clear(),
        ];
        for blank in blankers {
            let mut job = complete_job();
            blank(&mut job);
            assert!(validate_job(&job).is_err());
        }
    }

    #[test]
    fn job_optional_fields_do_not_matter() {
        let job = JobDraft {
            requirements: String::new(),
            roles: String::new(),
            why_join_us: String::new(),
            ..complete_job()
        };
        assert_eq!(validate_job(&job), Ok(()));
    }

    #[test]
    fn identity_requires_status_selection() {
        let mut draft = IdentityDraft {
            identity: "hr@co.com".into(),
            identity_type: "email".into(),
            verification_status: None,
        };
        assert_eq!(
            validate_identity(&draft),
            Err(ValidationError::Required("Verification status"))
        );
        draft.verification_status = Some(VerificationStatus::Unverified);
        assert_eq!(validate_identity(&draft), Ok(()));
    }

    #[test]
    fn template_header_and_structure() {
        let mut template = FormTemplate::blank();
        assert_eq!(
            validate_template(&template),
            Err(ValidationError::Required("Title"))
        );

        template.title = "Apply".into();
        template.form_type = FormType::Custom("  ".into());
        assert_eq!(
            validate_template_header(&template),
            Err(ValidationError::Required("Form type"))
        );

        template.form_type = FormType::Application;
        assert_eq!(validate_template_header(&template), Ok(()));
        assert_eq!(
            validate_template(&template),
            Err(ValidationError::UntitledGroup { position: 1 })
        );

        template.groups[0].title = "Contact".into();
        assert_eq!(
            validate_template(&template),
            Err(ValidationError::EmptyGroup {
                title: "Contact".into()
            })
        );

        template.groups[0].fields.push(Field::new());
        assert!(matches!(
            validate_template(&template),
            Err(ValidationError::UnlabelledField { position: 1, .. })
        ));

        template.groups[0].fields[0].label = "Track".into();
        template.groups[0].fields[0].kind = FieldType::Radio;
        assert_eq!(
            validate_template(&template),
            Err(ValidationError::MissingOptions {
                label: "Track".into()
            })
        );

        template.groups[0].fields[0].options = vec!["A".into()];
        assert_eq!(validate_template(&template), Ok(()));
    }

    #[test]
    fn ungrouped_fields_are_checked_too() {
        let template = FormTemplate {
            title: "Quiz".into(),
            form_type: FormType::Assessment,
            groups: vec![FormGroup {
                title: "Only".into(),
                fields: vec![Field {
                    label: "Q1".into(),
                    ..Field::new()
                }],
                ..FormGroup::new()
            }],
            fields: vec![Field::new()],
            ..FormTemplate::default()
        };
        assert_eq!(
            validate_template(&template).unwrap_err().to_string(),
            "Field 1 in ungrouped fields needs a label."
        );
    }
}
