//! Persistence for timesheet entries and leave requests.
//!
//! The engine never reads storage itself; callers load collections through
//! [`AttendanceRepository`] and pass them in.

mod repository;
mod store;

pub use repository::AttendanceRepository;
pub use store::{InMemoryStore, KeyValueStore};
