//! User-facing notifications (the console's equivalent of toasts)

use tracing::{error, info, warn};

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Prints notifications to the terminal and mirrors them to the log
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        info!(notification = "success", "{}", message);
        println!("✅ {}", message);
    }

    fn warning(&self, message: &str) {
        warn!(notification = "warning", "{}", message);
        println!("⚠️ {}", message);
    }

    fn error(&self, message: &str) {
        error!(notification = "error", "{}", message);
        println!("❌ {}", message);
    }
}
