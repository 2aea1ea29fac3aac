//! Strongly-typed identifier value objects.
//!
//! Every entity gets its own UUID-backed newtype so a `GoalId` can never be
//! passed where a `MemberId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declares a UUID-backed identifier with the standard constructor,
/// accessor, `Display`, and `FromStr` implementations.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Creates a new random ", stringify!($name), ".")]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[doc = concat!("Creates a ", stringify!($name), " from an existing UUID.")]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a gym member. Never reused after deletion.
    MemberId
);

uuid_id!(
    /// Identifier for a fitness goal, scoped to its owning member.
    GoalId
);

uuid_id!(
    /// Identifier for a workout plan, scoped to its owning member.
    WorkoutPlanId
);

uuid_id!(
    /// Identifier for a progress photo, scoped to its owning member.
    PhotoId
);

uuid_id!(
    /// Unique identifier for a subscription record.
    SubscriptionId
);

uuid_id!(
    /// Unique identifier for a notification.
    NotificationId
);
