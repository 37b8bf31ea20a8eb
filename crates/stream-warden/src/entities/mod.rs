//! SeaORM entity definitions
//!
//! Enum-ish columns (`protocol`, `health_status`) are stored as plain
//! strings and converted at the repository edge.

pub mod prelude;
pub mod stream_events;
pub mod streams;
