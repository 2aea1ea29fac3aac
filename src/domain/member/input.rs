//! Inputs accepted by the member registry and the field validators they
//! share.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::{MemberStatus, MembershipType};

/// Data for registering a new member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub membership_type: MembershipType,
    pub join_date: NaiveDate,
    /// Defaults to one calendar year after `join_date` when absent.
    pub membership_expiry: Option<NaiveDate>,
}

impl MemberInput {
    /// Creates an input on the Basic plan with no phone and default expiry.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        join_date: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: String::new(),
            membership_type: MembershipType::Basic,
            join_date,
            membership_expiry: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_membership_type(mut self, membership_type: MembershipType) -> Self {
        self.membership_type = membership_type;
        self
    }

    pub fn with_expiry(mut self, expiry: NaiveDate) -> Self {
        self.membership_expiry = Some(expiry);
        self
    }
}

/// Partial update for an existing member. Only `Some` fields are applied
/// and validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub membership_type: Option<MembershipType>,
    pub status: Option<MemberStatus>,
    pub join_date: Option<NaiveDate>,
    pub last_visit: Option<NaiveDate>,
    pub membership_expiry: Option<NaiveDate>,
}

impl MemberPatch {
    /// True when applying this patch can change the renewal epoch.
    pub fn touches_expiry(&self) -> bool {
        self.membership_expiry.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Filter for listing members. Empty filter matches everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberFilter {
    /// Case-insensitive substring matched against first name, last name, or email.
    pub query: Option<String>,
    pub status: Option<MemberStatus>,
}

impl MemberFilter {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            status: None,
        }
    }

    pub fn status(status: MemberStatus) -> Self {
        Self {
            query: None,
            status: Some(status),
        }
    }
}

/// Trims a name and rejects it if nothing is left.
pub(crate) fn validate_name(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// Syntactic email check: `local@domain.tld`, no whitespace.
///
/// Returns the trimmed address with its original casing; uniqueness is
/// compared on [`email_key`].
pub(crate) fn validate_email(value: &str) -> Result<String, ValidationError> {
    let email = value.trim();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid_format("email", "must not contain whitespace"));
    }

    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return Err(ValidationError::invalid_format("email", "missing @ symbol")),
    };
    if local.is_empty() {
        return Err(ValidationError::invalid_format("email", "missing local part"));
    }
    if domain.contains('@') {
        return Err(ValidationError::invalid_format("email", "more than one @ symbol"));
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(ValidationError::invalid_format(
            "email",
            "domain must look like example.com",
        ));
    }

    Ok(email.to_string())
}

/// Key used for case-insensitive email comparison.
pub(crate) fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_name_trims() {
        assert_eq!(validate_name("first_name", "  John ").unwrap(), "John");
    }

    #[test]
    fn validate_name_rejects_blank() {
        let err = validate_name("last_name", "   ").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("last_name"));
    }

    #[test]
    fn accepts_ordinary_addresses() {
        for email in ["john@x.com", "a.b+gym@mail.example.org", " JOHN@X.COM "] {
            assert!(validate_email(email).is_ok(), "{}", email);
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in ["", "john", "@x.com", "john@", "john@x", "john@x..com", "jo hn@x.com", "a@b@c.com"] {
            assert!(validate_email(email).is_err(), "{}", email);
        }
    }

    #[test]
    fn email_key_ignores_case_and_padding() {
        assert_eq!(email_key(" John@X.com"), email_key("john@x.COM"));
    }

    #[test]
    fn patch_reports_expiry_changes() {
        assert!(!MemberPatch::default().touches_expiry());
        let patch = MemberPatch {
            membership_expiry: NaiveDate::from_ymd_opt(2025, 1, 1),
            ..Default::default()
        };
        assert!(patch.touches_expiry());
        assert!(!patch.is_empty());
    }
}
