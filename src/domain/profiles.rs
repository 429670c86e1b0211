//! Profile domain types
//!
//! The profile as the page sees it, the editable draft, and the wire DTOs
//! exchanged with the profile service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User profile entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub user_uuid: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

impl ProfileRecord {
    /// First and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The editable subset of this profile.
    pub fn draft(&self) -> EditDraft {
        EditDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
        }
    }

    /// Merge saved draft values into the record. Email and identity are untouched.
    pub fn apply(&mut self, draft: &EditDraft) {
        self.first_name = draft.first_name.clone();
        self.last_name = draft.last_name.clone();
        self.username = draft.username.clone();
    }
}

/// Working copy of the editable profile fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

impl EditDraft {
    pub fn set(&mut self, field: EditableField, value: impl Into<String>) {
        let slot = match field {
            EditableField::FirstName => &mut self.first_name,
            EditableField::LastName => &mut self.last_name,
            EditableField::Username => &mut self.username,
        };
        *slot = value.into();
    }
}

/// Fields the owner may change. Email is shown but never editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    FirstName,
    LastName,
    Username,
}

impl fmt::Display for EditableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstName => write!(f, "first_name"),
            Self::LastName => write!(f, "last_name"),
            Self::Username => write!(f, "username"),
        }
    }
}

impl FromStr for EditableField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first_name" | "firstname" | "first" => Ok(Self::FirstName),
            "last_name" | "lastname" | "last" => Ok(Self::LastName),
            "username" | "user_name" => Ok(Self::Username),
            other => Err(format!("Unknown or read-only field: {}", other)),
        }
    }
}

/// Response DTO for `GET /profile/{id}`
///
/// Missing name fields are treated as empty strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    pub user_uuid: String,
}

impl From<ProfileResponse> for ProfileRecord {
    fn from(res: ProfileResponse) -> Self {
        Self {
            user_uuid: res.user_uuid,
            first_name: res.first_name.unwrap_or_default(),
            last_name: res.last_name.unwrap_or_default(),
            username: res.user_name.unwrap_or_default(),
            email: res.user_email.unwrap_or_default(),
        }
    }
}

/// Request DTO for `PUT /profile/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

impl From<&EditDraft> for UpdateProfileRequest {
    fn from(draft: &EditDraft) -> Self {
        Self {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            user_name: draft.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_with_null_names_becomes_empty_strings() {
        let res: ProfileResponse = serde_json::from_str(
            r#"{"first_name":null,"user_name":"annl","user_email":"a@x.com","user_uuid":"u-42"}"#,
        )
        .unwrap();
        let record = ProfileRecord::from(res);

        assert_eq!(record.user_uuid, "u-42");
        assert_eq!(record.first_name, "");
        assert_eq!(record.last_name, "");
        assert_eq!(record.username, "annl");
        assert_eq!(record.full_name(), " ");
    }

    #[test]
    fn update_request_never_carries_email() {
        let draft = EditDraft {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            username: "annlee2".to_string(),
        };
        let body = serde_json::to_value(UpdateProfileRequest::from(&draft)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({"first_name": "Ann", "last_name": "Lee", "user_name": "annlee2"})
        );
    }

    #[test]
    fn email_is_not_an_editable_field() {
        assert!("email".parse::<EditableField>().is_err());
        assert_eq!("firstname".parse::<EditableField>(), Ok(EditableField::FirstName));
        assert_eq!("USERNAME".parse::<EditableField>(), Ok(EditableField::Username));
    }

    #[test]
    fn apply_keeps_identity_and_email() {
        let mut record = ProfileRecord {
            user_uuid: "u-42".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            username: "annl".to_string(),
            email: "a@x.com".to_string(),
        };
        let mut draft = record.draft();
        draft.set(EditableField::LastName, "Park");
        record.apply(&draft);

        assert_eq!(record.full_name(), "Ann Park");
        assert_eq!(record.email, "a@x.com");
        assert_eq!(record.user_uuid, "u-42");
    }
}
