//! Connection ownership and cursor lifecycle.
//!
//! The manager owns the process's single [`Connection`] and hands out one
//! cursor at a time. Cursor use is serialized with an async mutex because
//! the underlying driver is not assumed to support concurrent cursors on
//! one connection; release happens through `Drop`, so it cannot be skipped
//! by an early error return.

use super::driver::{Connection, Cursor};
use crate::error::ServerError;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// Owner of the single long-lived database connection.
pub struct ConnectionManager {
    conn: Arc<dyn Connection>,
    cursor_gate: Arc<Mutex<()>>,
}

impl ConnectionManager {
    /// Create a manager around an established connection.
    pub fn new(conn: Arc<dyn Connection>) -> Self {
        Self {
            conn,
            cursor_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Acquire a cursor for one logical operation.
    ///
    /// The returned guard holds the connection's cursor gate for its whole
    /// lifetime; a second caller waits here until the first guard drops.
    pub async fn acquire(&self) -> Result<CursorGuard, ServerError> {
        let permit = Arc::clone(&self.cursor_gate).lock_owned().await;
        let cursor = self.conn.open_cursor()?;
        debug!("Cursor acquired");
        Ok(CursorGuard {
            cursor,
            _permit: permit,
        })
    }
}

/// RAII guard around a cursor.
///
/// Dropping the guard releases the cursor and then the connection's cursor
/// gate, in that order (field order is load-bearing for `Drop`).
pub struct CursorGuard {
    cursor: Box<dyn Cursor>,
    _permit: OwnedMutexGuard<()>,
}

impl Deref for CursorGuard {
    type Target = dyn Cursor;

    fn deref(&self) -> &Self::Target {
        self.cursor.as_ref()
    }
}

impl DerefMut for CursorGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cursor.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::driver::{SqlParam, SqlValue};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counts {
        opened: AtomicUsize,
        released: AtomicUsize,
    }

    struct CountingConnection {
        counts: Arc<Counts>,
    }

    struct CountingCursor {
        counts: Arc<Counts>,
    }

    impl Connection for CountingConnection {
        fn open_cursor(&self) -> Result<Box<dyn Cursor>, ServerError> {
            self.counts.opened.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CountingCursor {
                counts: Arc::clone(&self.counts),
            }))
        }
    }

    #[async_trait]
    impl Cursor for CountingCursor {
        async fn execute(&mut self, _sql: &str, _params: &[SqlParam]) -> Result<(), ServerError> {
            Ok(())
        }

        async fn fetch_all(&mut self) -> Result<Vec<Vec<SqlValue>>, ServerError> {
            Ok(Vec::new())
        }
    }

    impl Drop for CountingCursor {
        fn drop(&mut self) {
            self.counts.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counting_manager() -> (ConnectionManager, Arc<Counts>) {
        let counts = Arc::new(Counts::default());
        let manager = ConnectionManager::new(Arc::new(CountingConnection {
            counts: Arc::clone(&counts),
        }));
        (manager, counts)
    }

    #[tokio::test]
    async fn test_cursor_released_on_drop() {
        let (manager, counts) = counting_manager();

        {
            let mut guard = manager.acquire().await.unwrap();
            guard.execute("SELECT 1", &[]).await.unwrap();
            assert_eq!(counts.opened.load(Ordering::SeqCst), 1);
            assert_eq!(counts.released.load(Ordering::SeqCst), 0);
        }

        assert_eq!(counts.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cursor_use_is_serialized() {
        let (manager, counts) = counting_manager();

        let first = manager.acquire().await.unwrap();

        // A second acquire must not complete while the first guard lives.
        let manager = Arc::new(manager);
        let contender = {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move {
                let _guard = manager.acquire().await.unwrap();
            })
        };

        tokio::task::yield_now().await;
        assert_eq!(counts.opened.load(Ordering::SeqCst), 1);

        drop(first);
        contender.await.unwrap();
        assert_eq!(counts.opened.load(Ordering::SeqCst), 2);
        assert_eq!(counts.released.load(Ordering::SeqCst), 2);
    }
}
