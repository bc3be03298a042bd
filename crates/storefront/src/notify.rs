//! User-visible notification port.
//!
//! The stores report outcomes ("added to cart", "update failed") through this
//! trait instead of returning rich errors to the UI tree; a web surface binds
//! it to its toast widget, the CLI prints, tests record. Messages are the
//! customer-facing Ukrainian strings.

use tracing::{error, info, warn};

/// Sink for user-visible notifications.
pub trait Notifier: Send + Sync {
    /// A completed action worth confirming ("item added").
    fn success(&self, message: &str);

    /// A failed action the user should re-trigger.
    fn error(&self, message: &str);

    /// A rejected action or a non-blocking caution.
    fn warning(&self, message: &str);

    /// Neutral information ("already in the list").
    fn info(&self, message: &str);
}

/// Notifier that forwards everything to `tracing`.
///
/// The default for headless surfaces; interactive surfaces wrap their own
/// widget instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "sadok::notify", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "sadok::notify", "{message}");
    }

    fn warning(&self, message: &str) {
        warn!(target: "sadok::notify", "{message}");
    }

    fn info(&self, message: &str) {
        info!(target: "sadok::notify", "{message}");
    }
}
