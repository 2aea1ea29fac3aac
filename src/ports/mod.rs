//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Clock` - current instant and date
//! - `GymSnapshotRepository` - load/save of the whole gym state

mod clock;
mod snapshot_repository;

pub use clock::Clock;
pub use snapshot_repository::{GymSnapshot, GymSnapshotRepository, SnapshotError, SNAPSHOT_VERSION};
