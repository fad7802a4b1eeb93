//! Transient toast messages with timed auto-dismissal.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use tokio::task::JoinHandle;
use uuid::Uuid;

pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
}

struct Entry {
    toast: Toast,
    timer: JoinHandle<()>,
}

type Queue = Mutex<Vec<Entry>>;

/// Visible toasts in arrival order.
///
/// Every push schedules its own removal on the tokio runtime; dismissing a
/// toast early cancels that timer. Dropping the queue cancels all timers.
pub struct Notifications {
    entries: Arc<Queue>,
    lifetime: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_LIFETIME)
    }
}

impl Notifications {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            lifetime,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn push(&self, kind: ToastKind, title: &str, message: &str) -> Uuid {
        let id = Uuid::new_v4();
        let toast = Toast {
            id,
            kind,
            title: title.to_string(),
            message: message.to_string(),
        };

        let queue = Arc::downgrade(&self.entries);
        let lifetime = self.lifetime;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            expire(&queue, id);
        });

        lock(&self.entries).push(Entry { toast, timer });
        id
    }

    pub fn success(&self, title: &str, message: &str) -> Uuid {
        self.push(ToastKind::Success, title, message)
    }

    pub fn error(&self, title: &str, message: &str) -> Uuid {
        self.push(ToastKind::Error, title, message)
    }

    /// Removes a toast before its timer fires. Returns `false` if it was
    /// already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut entries = lock(&self.entries);
        match entries.iter().position(|entry| entry.toast.id == id) {
            Some(index) => {
                let entry = entries.remove(index);
                entry.timer.abort();
                true
            }
            None => false,
        }
    }

    pub fn visible(&self) -> Vec<Toast> {
        lock(&self.entries)
            .iter()
            .map(|entry| entry.toast.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for Notifications {
    fn drop(&mut self) {
        for entry in lock(&self.entries).drain(..) {
            entry.timer.abort();
        }
    }
}

fn expire(queue: &Weak<Queue>, id: Uuid) {
    if let Some(entries) = queue.upgrade() {
        lock(&entries).retain(|entry| entry.toast.id != id);
    }
}

fn lock(queue: &Queue) -> MutexGuard<'_, Vec<Entry>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}
