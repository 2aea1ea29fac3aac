//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, grouped by
//! the collection they act on.

pub mod goal;
pub mod member;
pub mod notification;
pub mod subscription;
