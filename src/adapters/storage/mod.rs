//! Storage Adapters
//!
//! Implementations of the GymSnapshotRepository port.
//!
//! ## Available Adapters
//!
//! - **FileSnapshotRepository** - one YAML or JSON file on disk
//! - **InMemorySnapshotRepository** - kept in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSnapshotRepository, InMemorySnapshotRepository};
//!
//! // Production: file-based storage
//! let repo = FileSnapshotRepository::in_dir("./data", "gym.yaml");
//!
//! // Testing: in-memory storage
//! let repo = InMemorySnapshotRepository::new();
//! ```

mod file_snapshot_repository;
mod in_memory_snapshot_repository;

pub use file_snapshot_repository::{FileSnapshotRepository, SnapshotFormat};
pub use in_memory_snapshot_repository::InMemorySnapshotRepository;
