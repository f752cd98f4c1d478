//! User-facing notice sink
//!
//! Some dispatch outcomes must reach the user directly instead of the
//! caller: transport failures always, and the "login required" message on
//! automatic session invalidation. The sink is a trait object so an
//! embedding UI can show a real dialog while tests collect the messages.

use tracing::warn;

/// Sink for blocking user-facing notices
pub trait Notice: Send + Sync {
    fn alert(&self, message: &str);
}

/// Default sink that surfaces notices through the log
#[derive(Debug, Default)]
pub struct LogNotice;

impl Notice for LogNotice {
    fn alert(&self, message: &str) {
        warn!("{}", message);
    }
}
