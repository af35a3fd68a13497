/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Injected graph library and its one-shot load.
//!
//! A [`LibraryLoader`] produces a [`GraphLibrary`]. The loader is expensive
//! and may hang, so [`LibraryCache`] runs it at most once per cache, bounded
//! by a timeout, and remembers the outcome. A failure is remembered too:
//! later sessions go straight to the fallback instead of retrying.
//!
//! Exactly one cache is created at startup and shared by every render
//! session. [`LibraryCache::reset`] exists for tests.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, OnceCell};
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::{NetworkView, RenderError};

// ── Capability traits ─────────────────────────────────────────────────────────

/// A loaded rendering capability.
pub trait GraphLibrary: Send + Sync {
    fn name(&self) -> &str;

    /// Draw `view` and return the rendered artifact.
    fn draw(&self, view: &NetworkView) -> Result<String, RenderError>;
}

/// Acquires a [`GraphLibrary`].
#[async_trait]
pub trait LibraryLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn GraphLibrary>, RenderError>;
}

/// Loader for environments without any graph library; every render falls
/// back.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLibrary;

#[async_trait]
impl LibraryLoader for NoLibrary {
    async fn load(&self) -> Result<Arc<dyn GraphLibrary>, RenderError> {
        Err(RenderError::CapabilityUnavailable {
            reason: "no graph library configured".to_string(),
        })
    }
}

// ── LibraryCache ──────────────────────────────────────────────────────────────

type LoadOutcome = Result<Arc<dyn GraphLibrary>, RenderError>;

/// Observable state of the cached load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    NotAttempted,
    Ready { library: String },
    Failed(RenderError),
}

pub struct LibraryCache {
    loader: Arc<dyn LibraryLoader>,
    timeout: Duration,
    outcome: OnceCell<LoadOutcome>,
    /// Load task still running after its waiting caller went away.
    pending: Mutex<Option<JoinHandle<LoadOutcome>>>,
    attempts: AtomicUsize,
}

impl fmt::Debug for LibraryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryCache")
            .field("timeout", &self.timeout)
            .field("status", &self.status())
            .field("attempts", &self.attempts())
            .finish()
    }
}

impl LibraryCache {
    pub fn new(loader: Arc<dyn LibraryLoader>, timeout: Duration) -> Self {
        Self {
            loader,
            timeout,
            outcome: OnceCell::new(),
            pending: Mutex::new(None),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Returns the library, loading it on the first call.
    ///
    /// The bounded load runs in its own task, so a caller that is cancelled
    /// mid-load does not cancel it: the next caller waits on the same task.
    /// Concurrent first callers share that single pending load. Once the
    /// outcome is known, success or failure, it is returned without touching
    /// the loader again.
    pub async fn get_or_load(&self) -> LoadOutcome {
        self.outcome
            .get_or_init(|| async {
                let mut pending = self.pending.lock().await;
                let task = pending.get_or_insert_with(|| self.spawn_load());
                let outcome = match task.await {
                    Ok(outcome) => outcome,
                    Err(e) => Err(RenderError::CapabilityUnavailable {
                        reason: format!("graph library load task failed: {e}"),
                    }),
                };
                pending.take();
                outcome
            })
            .await
            .clone()
    }

    fn spawn_load(&self) -> JoinHandle<LoadOutcome> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let loader = Arc::clone(&self.loader);
        let timeout = self.timeout;
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

        tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, loader.load()).await {
                Ok(result) => result,
                Err(_) => Err(RenderError::LoadTimedOut { timeout_ms }),
            };

            match &outcome {
                Ok(lib) => info!(library = lib.name(), "Graph library loaded"),
                Err(e) => error!(
                    error = %e,
                    "Graph library unavailable; graphs will use the text fallback"
                ),
            }
            outcome
        })
    }

    pub fn status(&self) -> LoadStatus {
        match self.outcome.get() {
            None => LoadStatus::NotAttempted,
            Some(Ok(lib)) => LoadStatus::Ready {
                library: lib.name().to_string(),
            },
            Some(Err(e)) => LoadStatus::Failed(e.clone()),
        }
    }

    /// Number of times the loader has been invoked.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Forget the cached outcome so the next call loads again.
    pub fn reset(&mut self) {
        self.outcome.take();
        if let Some(task) = self.pending.get_mut().take() {
            task.abort();
        }
        self.attempts.store(0, Ordering::SeqCst);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
