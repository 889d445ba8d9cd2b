//! User-facing notifications.
//!
//! Two channels with different weight:
//! - a single-slot toast that dismisses itself after a fixed duration. Showing
//!   a new toast cancels the pending dismissal of the previous one.
//! - blocking alerts that stay until explicitly acknowledged.

use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;
use tokio::time::Instant;

/// Default time a toast stays on screen
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

/// Severity level for toast notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

/// A transient, non-blocking message
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            shown_at: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error)
    }
}

/// A message that must be acknowledged before the user continues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Default)]
struct ToastSlot {
    current: Option<Toast>,
    /// Bumped on every show so a stale timer never clears a newer toast
    generation: u64,
    dismiss: Option<AbortHandle>,
}

#[derive(Debug, Default)]
struct Inner {
    toast: ToastSlot,
    alerts: VecDeque<Alert>,
    toasts_shown: u64,
}

/// Cloneable handle to the notification state shared by the board
#[derive(Debug, Clone)]
pub struct NotificationChannel {
    inner: Arc<Mutex<Inner>>,
    toast_duration: Duration,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl NotificationChannel {
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            toast_duration,
        }
    }

    pub fn toast_duration(&self) -> Duration {
        self.toast_duration
    }

    /// Replace whatever toast is showing and schedule its dismissal.
    ///
    /// Outside a tokio runtime no timer is spawned; the toast still expires
    /// through [`NotificationChannel::current_toast`].
    pub fn show_toast(&self, toast: Toast) {
        let mut inner = self.inner.lock();
        if let Some(previous) = inner.toast.dismiss.take() {
            previous.abort();
        }
        inner.toast.generation += 1;
        let generation = inner.toast.generation;
        inner.toasts_shown += 1;
        inner.toast.current = Some(toast);

        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let slot = Arc::downgrade(&self.inner);
            let ttl = self.toast_duration;
            let task = runtime.spawn(async move {
                tokio::time::sleep(ttl).await;
                dismiss_if_current(&slot, generation);
            });
            inner.toast.dismiss = Some(task.abort_handle());
        }
    }

    /// The toast currently on screen, if it has not expired
    pub fn current_toast(&self) -> Option<Toast> {
        let inner = self.inner.lock();
        inner
            .toast
            .current
            .as_ref()
            .filter(|t| t.shown_at.elapsed() < self.toast_duration)
            .cloned()
    }

    /// Dismiss the toast immediately
    pub fn clear_toast(&self) {
        let mut inner = self.inner.lock();
        if let Some(handle) = inner.toast.dismiss.take() {
            handle.abort();
        }
        inner.toast.current = None;
    }

    /// How many toasts have been shown through this channel
    pub fn toasts_shown(&self) -> u64 {
        self.inner.lock().toasts_shown
    }

    /// Queue a blocking alert
    pub fn alert(&self, alert: Alert) {
        tracing::debug!(title = %alert.title, "raising blocking alert");
        self.inner.lock().alerts.push_back(alert);
    }

    /// The alert awaiting acknowledgment, if any
    pub fn pending_alert(&self) -> Option<Alert> {
        self.inner.lock().alerts.front().cloned()
    }

    pub fn is_blocked(&self) -> bool {
        !self.inner.lock().alerts.is_empty()
    }

    /// Acknowledge the oldest alert and return it
    pub fn acknowledge(&self) -> Option<Alert> {
        self.inner.lock().alerts.pop_front()
    }
}

fn dismiss_if_current(slot: &Weak<Mutex<Inner>>, generation: u64) {
    // The board may have gone away while the timer was pending
    let Some(inner) = slot.upgrade() else {
        return;
    };
    let mut inner = inner.lock();
    if inner.toast.generation == generation {
        inner.toast.current = None;
        inner.toast.dismiss = None;
    }
}
