//! Test doubles shared by the unit tests.

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use irori_shared::time::FixedClock;
use tokio_util::sync::CancellationToken;

use crate::{
    domain::{ClientConnection, ConnectionError, MessageFactory, SessionToken, User, UserId},
    infrastructure::ClientRegistry,
};

pub(crate) const TEST_NOW_MILLIS: i64 = 1_700_000_000_000;

pub(crate) fn test_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::from_millis(TEST_NOW_MILLIS))
}

pub(crate) fn create_test_registry() -> ClientRegistry {
    ClientRegistry::new(test_clock())
}

pub(crate) fn create_test_factory() -> MessageFactory {
    MessageFactory::new(test_clock())
}

pub(crate) fn test_user(id: i64, session_token: &str) -> User {
    User::new(
        UserId::new(id),
        format!("user-{id}"),
        SessionToken::new(session_token.to_string()).unwrap(),
    )
}

/// Connection double that records every write attempt
pub(crate) struct RecordingConnection {
    frames: Mutex<Vec<String>>,
    attempts: AtomicUsize,
    closed: AtomicBool,
    failure: Option<ConnectionError>,
    delay: Option<Duration>,
}

impl RecordingConnection {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::build(None, None))
    }

    /// Every write fails with `failure`
    pub(crate) fn failing(failure: ConnectionError) -> Arc<Self> {
        Arc::new(Self::build(Some(failure), None))
    }

    /// Every write waits `delay` before completing (or until its scope is cancelled)
    pub(crate) fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self::build(None, Some(delay)))
    }

    fn build(failure: Option<ConnectionError>, delay: Option<Duration>) -> Self {
        Self {
            frames: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
            failure,
            delay,
        }
    }

    pub(crate) fn frames(&self) -> Vec<String> {
        self.frames.lock().unwrap().clone()
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClientConnection for RecordingConnection {
    async fn write_text(
        &self,
        scope: &CancellationToken,
        text: &str,
    ) -> Result<(), ConnectionError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::select! {
                _ = scope.cancelled() => return Err(ConnectionError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }

        self.frames.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
