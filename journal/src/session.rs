//! Request-scoped units of work.
//!
//! A [`Session`] lazily begins a transaction on first use and keeps handing
//! out the same one until it is committed, rolled back or the session is
//! closed. Commits are explicit: anything still pending when a session closes
//! is rolled back.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tracing::{debug, warn};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

pub struct Session {
    id: u64,
    conn: Arc<DatabaseConnection>,
    tx: Option<DatabaseTransaction>,
    closed: bool,
}

impl Session {
    pub(crate) fn new(conn: Arc<DatabaseConnection>) -> Self {
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        debug!(session = id, "session opened");
        Session {
            id,
            conn,
            tx: None,
            closed: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }

    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }

    /// The session's current transaction, begun on first use.
    pub async fn tx(&mut self) -> Result<&DatabaseTransaction, DbErr> {
        if self.closed {
            return Err(DbErr::Custom(format!("session {} is closed", self.id)));
        }
        if self.tx.is_none() {
            let tx = self.conn.begin().await?;
            debug!(session = self.id, "transaction started");
            self.tx = Some(tx);
        }
        match self.tx.as_ref() {
            Some(tx) => Ok(tx),
            None => Err(DbErr::Custom(format!("session {} has no transaction", self.id))),
        }
    }

    pub async fn commit(&mut self) -> Result<(), DbErr> {
        if self.closed {
            return Err(DbErr::Custom(format!("session {} is closed", self.id)));
        }
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
            debug!(session = self.id, "transaction committed");
        }
        Ok(())
    }

    pub async fn rollback(&mut self) -> Result<(), DbErr> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
            debug!(session = self.id, "transaction rolled back");
        }
        Ok(())
    }

    /// Discards uncommitted work and releases the connection. Closing twice
    /// is a no-op.
    pub async fn close(&mut self) -> Result<(), DbErr> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let result = self.rollback().await;
        debug!(session = self.id, "session closed");
        result
    }
}

/// Hands out fresh sessions over one shared connection pool.
#[derive(Clone)]
pub struct SessionFactory {
    conn: Arc<DatabaseConnection>,
}

impl SessionFactory {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        SessionFactory { conn }
    }

    pub fn open(&self) -> Session {
        Session::new(Arc::clone(&self.conn))
    }

    /// Runs `op` with its own session.
    ///
    /// If `op` fails, the session is rolled back and the same error is
    /// returned. The session is closed on every exit path. Committing is up
    /// to `op`.
    pub async fn with_session<F, T, E>(&self, op: F) -> Result<T, E>
    where
        F: for<'s> FnOnce(&'s mut Session) -> BoxFuture<'s, Result<T, E>> + Send,
        T: Send,
        E: std::fmt::Display + Send,
    {
        let mut session = self.open();
        let outcome = op(&mut session).await;

        if let Err(err) = &outcome {
            debug!(session = session.id, error = %err, "operation failed, rolling back");
            if let Err(rollback_err) = session.rollback().await {
                warn!(session = session.id, error = %rollback_err, "rollback failed");
            }
        }

        if let Err(close_err) = session.close().await {
            warn!(session = session.id, error = %close_err, "failed to close session");
        }

        outcome
    }
}
