use crate::models::Notice;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Duration;

pub const DISMISS_AFTER: Duration = Duration::from_secs(3);

struct Inner {
    current: watch::Sender<Option<Notice>>,
    generation: AtomicU64,
}

/// Transient notification channel. Latest-wins with no queuing: a second
/// notice shown before the first dismisses replaces it outright, and the
/// superseded notice's timer must not clear the newer one.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Notifier {
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                current,
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(Notice::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Notice::error(message));
    }

    pub fn show(&self, notice: Notice) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.current.send_replace(Some(notice));

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(DISMISS_AFTER).await;
            // A newer notice owns the slot now; leave it alone.
            if inner.generation.load(Ordering::SeqCst) == generation {
                inner.current.send_replace(None);
            }
        });
    }

    pub fn current(&self) -> Option<Notice> {
        self.inner.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Notice>> {
        self.inner.current.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
