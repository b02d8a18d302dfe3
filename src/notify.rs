//! Out-of-band reporting of recoverable failures.
//!
//! When a transcript cannot be acquired the import still completes (with no
//! messages), so the failure has to reach a human some other way. The
//! pipeline reports it through a [`Notifier`] supplied by the caller: a UI
//! can raise a dialog, a service can log, a test can record.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Mutex;
//! use chatsift::notify::Notifier;
//!
//! let seen = Mutex::new(Vec::new());
//! let notifier = |message: &str, _err: Option<&chatsift::error::AcquisitionError>| {
//!     seen.lock().unwrap().push(message.to_owned());
//! };
//! notifier.notify("No txt files found in archive", None);
//! assert_eq!(seen.lock().unwrap().len(), 1);
//! ```

use tracing::warn;

use crate::error::AcquisitionError;

/// Sink for recoverable failures.
pub trait Notifier: Send + Sync {
    /// Reports `message`, with the underlying error when there is one.
    fn notify(&self, message: &str, error: Option<&AcquisitionError>);
}

impl<F> Notifier for F
where
    F: Fn(&str, Option<&AcquisitionError>) + Send + Sync,
{
    fn notify(&self, message: &str, error: Option<&AcquisitionError>) {
        self(message, error);
    }
}

/// Logs notifications as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, error: Option<&AcquisitionError>) {
        match error {
            Some(err) => warn!(error = %err, "{message}"),
            None => warn!("{message}"),
        }
    }
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _message: &str, _error: Option<&AcquisitionError>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_notifier_receives_error() {
        let seen: Mutex<Vec<(String, bool)>> = Mutex::new(Vec::new());
        let notifier = |message: &str, error: Option<&AcquisitionError>| {
            seen.lock().unwrap().push((message.to_owned(), error.is_some()));
        };

        notifier.notify("plain", None);
        notifier.notify("with error", Some(&AcquisitionError::NoTranscriptFound));

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen, vec![("plain".to_owned(), false), ("with error".to_owned(), true)]);
    }

    #[test]
    fn test_builtin_notifiers_do_not_panic() {
        TracingNotifier.notify("tracing", Some(&AcquisitionError::NoTranscriptFound));
        SilentNotifier.notify("silent", None);
    }
}
