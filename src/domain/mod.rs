//! Domain layer: gym business rules over in-memory state.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors, state machine)
//! - `fitness` - Goals, workout plans and progress photos owned by a member
//! - `member` - Member aggregate, registry and goal tracking
//! - `notification` - Renewal policy, scheduler and notification store
//! - `subscription` - Plan subscriptions and their ledger
//!
//! Nothing here performs I/O.

pub mod fitness;
pub mod foundation;
pub mod member;
pub mod notification;
pub mod subscription;
