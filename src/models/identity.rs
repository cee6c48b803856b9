// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Verifiable email/domain claims attached to a manager.

use serde::{Deserialize, Serialize};

use crate::models::Identified;

/// Verification state; a verified identity is read-only in the UI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerificationStatus {
    #[default]
    Unverified,
    Verified,
    Unknown(String),
}

impl VerificationStatus {
    pub const ALL: [VerificationStatus; 2] =
        [VerificationStatus::Unverified, VerificationStatus::Verified];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unverified => "unverified",
            Self::Verified => "verified",
            Self::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Unverified => "Unverified",
            Self::Verified => "Verified",
            Self::Unknown(raw) => raw.as_str(),
        }
    }
}

impl From<String> for VerificationStatus {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "unverified" => Self::Unverified,
            "verified" => Self::Verified,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<VerificationStatus> for String {
    fn from(status: VerificationStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Identity as returned by the API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub identity_type: String,
    #[serde(default)]
    pub identity: String,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Identity {
    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Verified
    }
}

impl Identified for Identity {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Editable buffer behind the identity forms. The status starts unselected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityDraft {
    pub identity: String,
    pub identity_type: String,
    pub verification_status: Option<VerificationStatus>,
}

impl From<&Identity> for IdentityDraft {
    fn from(identity: &Identity) -> Self {
        Self {
            identity: identity.identity.clone(),
            identity_type: identity.identity_type.clone(),
            verification_status: Some(identity.verification_status.clone()),
        }
    }
}
