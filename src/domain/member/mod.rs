//! Member domain module.
//!
//! # Module Structure
//!
//! - `aggregate` - Member aggregate entity
//! - `status` - MemberStatus (unconstrained transitions)
//! - `membership_type` - Basic / Premium / VIP / custom plans
//! - `input` - create, patch and filter inputs plus field validators
//! - `registry` - MemberRegistry, the authoritative collection
//! - `goal_tracker` - GoalTracker, goal mutations scoped to a member
//! - `errors` - MemberError

mod aggregate;
mod errors;
mod goal_tracker;
mod input;
mod membership_type;
mod registry;
mod status;

pub use aggregate::{default_expiry, Member};
pub use errors::MemberError;
pub use goal_tracker::{GoalSummary, GoalTracker};
pub use input::{MemberFilter, MemberInput, MemberPatch};
pub use membership_type::MembershipType;
pub use registry::MemberRegistry;
pub use status::MemberStatus;
