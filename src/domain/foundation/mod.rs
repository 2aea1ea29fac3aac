//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the timestamp value object, error types and the
//! state machine trait that form the vocabulary of the gym domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{GoalId, MemberId, NotificationId, PhotoId, SubscriptionId, WorkoutPlanId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
