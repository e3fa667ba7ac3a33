use crate::surface::Surface;
use crate::view::Notice;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Single-slot, self-expiring notification.
///
/// While a notice is visible, further notices are dropped rather than queued. Each shown
/// notice is dismissed by a timer task after `duration`.
pub struct Notifier<S> {
    surface: Arc<S>,
    duration: Duration,
    visible: Arc<AtomicBool>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<S: Surface> Notifier<S> {
    pub fn new(surface: Arc<S>, duration: Duration) -> Self {
        Self {
            surface,
            duration,
            visible: Arc::new(AtomicBool::new(false)),
            timer: Mutex::new(None),
        }
    }

    /// Show `message` unless a notice is already up. Returns whether it was shown.
    ///
    /// Must be called from within a tokio runtime; the dismissal timer is spawned on it.
    pub fn notify(&self, message: impl Into<String>) -> bool {
        let notice = Notice::new(message);

        if self.visible.swap(true, Ordering::SeqCst) {
            debug!("notice dropped, another one is visible: {:?}", notice.message);
            return false;
        }

        self.surface.show_notice(&notice);
        trace!("notice shown for {:?}: {:?}", self.duration, notice.message);

        let surface = self.surface.clone();
        let visible = self.visible.clone();
        let duration = self.duration;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            surface.dismiss_notice();
            visible.store(false, Ordering::SeqCst);
            trace!("notice dismissed");
        });

        *self.timer.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
        true
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Wait until the current notice (if any) has been dismissed.
    pub async fn settled(&self) {
        let handle = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}
