pub mod alerts;
pub mod check_log;
pub mod lifecycle;
pub mod probe;

pub use alerts::{AlertSink, NoopAlertSink, TelegramAlertSink};
pub use check_log::{CheckLogEntry, CheckLogSink, JsonlCheckLog};
pub use lifecycle::LifecycleManager;
pub use probe::{HealthProbe, HttpHealthProbe, ProbeOutcome};
