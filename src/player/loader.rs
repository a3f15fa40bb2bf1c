use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

/// Shared handle on the embed SDK's asynchronous load.
///
/// One loader is shared by every adapter on the page. The script is requested
/// at most once and the ready signal resolves once for all waiters.
pub struct SdkLoader {
    script_src: String,
    script_requested: AtomicBool,
    ready_tx: watch::Sender<bool>,
}

impl SdkLoader {
    pub fn new(script_src: impl Into<String>) -> Self {
        let (ready_tx, _) = watch::channel(false);
        Self {
            script_src: script_src.into(),
            script_requested: AtomicBool::new(false),
            ready_tx,
        }
    }

    pub fn script_src(&self) -> &str {
        &self.script_src
    }

    /// Returns true for the first caller only, who must inject the script
    pub fn request_script(&self) -> bool {
        !self.script_requested.swap(true, Ordering::SeqCst)
    }

    /// Records that the SDK constructor is available. Idempotent.
    pub fn mark_ready(&self) {
        let was_ready = self.ready_tx.send_replace(true);
        if !was_ready {
            tracing::info!(src = %self.script_src, "Embed SDK ready");
        }
    }

    pub fn is_ready(&self) -> bool {
        *self.ready_tx.borrow()
    }

    /// Resolves once the SDK is ready; immediately if it already is
    pub async fn wait_ready(&self) {
        let mut rx = self.ready_tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait
        let _ = rx.wait_for(|ready| *ready).await;
    }
}
