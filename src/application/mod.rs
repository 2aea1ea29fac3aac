//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers for writes persist a snapshot before returning; queries only read.

pub mod desk;
pub mod handlers;
pub mod state;

pub use desk::GymDesk;
pub use state::{GymContext, GymState, SharedGymState};
