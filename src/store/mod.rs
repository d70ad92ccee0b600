//! Collaborator interfaces and in-memory implementations.

mod memory;
mod traits;

pub use memory::{InMemoryApprovals, InMemoryPunchStore, InMemoryRoster, InMemoryScheduleSource};
pub use traits::{ApprovalsProvider, PunchStore, RosterProvider, ScheduleSource};
