//! Connection tracking for graceful shutdown.
//!
//! Every accepted connection holds a [`ConnectionGuard`] for as long as it is
//! being served. On shutdown the accept loop stops and the server waits for
//! the count to reach zero, up to a timeout.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Tracks active connections for graceful shutdown.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    active: Arc<AtomicUsize>,
}

/// Marks one connection as active until dropped.
#[derive(Debug)]
pub struct ConnectionGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ConnectionTracker {
    /// Create a new connection tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection; it stays counted while the guard lives.
    pub fn track(&self) -> ConnectionGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        ConnectionGuard {
            active: Arc::clone(&self.active),
        }
    }

    /// Get current active connection count.
    pub fn count(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Wait for all connections to finish with timeout.
    /// Returns true if all connections finished, false if timeout reached.
    pub async fn wait_for_shutdown(&self, timeout: Duration) -> bool {
        let start = std::time::Instant::now();

        while self.count() > 0 {
            if start.elapsed() >= timeout {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_tracker_new() {
        let tracker = ConnectionTracker::new();
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn test_guard_counts_until_dropped() {
        let tracker = ConnectionTracker::new();
        let first = tracker.track();
        let second = tracker.track();
        assert_eq!(tracker.count(), 2);

        drop(first);
        assert_eq!(tracker.count(), 1);
        drop(second);
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn test_connection_tracker_clone_shares_state() {
        let tracker1 = ConnectionTracker::new();
        let tracker2 = tracker1.clone();

        let _guard = tracker1.track();
        assert_eq!(tracker2.count(), 1);
    }

    #[tokio::test]
    async fn test_wait_for_shutdown_immediate() {
        let tracker = ConnectionTracker::new();
        assert!(tracker.wait_for_shutdown(Duration::from_millis(100)).await);
    }

    #[tokio::test]
    async fn test_wait_for_shutdown_with_connections() {
        let tracker = ConnectionTracker::new();
        let guard = tracker.track();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            drop(guard);
        });

        assert!(tracker.wait_for_shutdown(Duration::from_millis(500)).await);
        assert_eq!(tracker.count(), 0);
    }

    #[tokio::test]
    async fn test_wait_for_shutdown_timeout() {
        let tracker = ConnectionTracker::new();
        let _guard = tracker.track();

        assert!(!tracker.wait_for_shutdown(Duration::from_millis(50)).await);
        assert_eq!(tracker.count(), 1);
    }
}
