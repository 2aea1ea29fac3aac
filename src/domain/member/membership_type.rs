//! Membership type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Kind of membership a member holds.
///
/// The three standard plans are closed variants; gyms that sell other plans
/// use `Custom` with a non-empty plan name. Serialized as the display name
/// (`"Basic"`, `"VIP"`, or the custom name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MembershipType {
    Basic,
    Premium,
    Vip,
    Custom(String),
}

impl MembershipType {
    /// Creates a custom plan type, rejecting a blank name.
    pub fn custom(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("membership_type"));
        }
        Ok(MembershipType::Custom(trimmed.to_string()))
    }

    pub fn display_name(&self) -> &str {
        match self {
            MembershipType::Basic => "Basic",
            MembershipType::Premium => "Premium",
            MembershipType::Vip => "VIP",
            MembershipType::Custom(name) => name,
        }
    }

    /// Checks a value that may have been built directly, bypassing `custom`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            MembershipType::Custom(name) if name.trim().is_empty() => {
                Err(ValidationError::empty_field("membership_type"))
            }
            _ => Ok(()),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, MembershipType::Custom(_))
    }
}

impl fmt::Display for MembershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MembershipType {
    type Err = ValidationError;

    /// Standard plan names match case-insensitively; anything else becomes
    /// a custom plan.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(MembershipType::Basic),
            "premium" => Ok(MembershipType::Premium),
            "vip" => Ok(MembershipType::Vip),
            _ => MembershipType::custom(s),
        }
    }
}

impl TryFrom<String> for MembershipType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MembershipType> for String {
    fn from(value: MembershipType) -> Self {
        value.display_name().to_string()
    }
}
