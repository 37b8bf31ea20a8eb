pub use super::stream_events::Entity as StreamEvents;
pub use super::streams::Entity as Streams;
