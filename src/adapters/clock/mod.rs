//! Clock Adapters
//!
//! - **SystemClock** - wall-clock UTC time
//! - **FixedClock** - settable time for tests

mod fixed_clock;
mod system_clock;

pub use fixed_clock::FixedClock;
pub use system_clock::SystemClock;
