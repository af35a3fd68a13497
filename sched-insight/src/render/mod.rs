/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Resilient dependency graph renderer.
//!
//! Every submitted [`GraphPayload`] opens a new render session. A session
//! either produces the interactive view drawn by the injected
//! [`GraphLibrary`], or a [`FallbackView`] built from nodes and edges alone.
//! The caller never sees an error.
//!
//! # Session states
//! ```text
//!        ┌──────────────► FallbackRendering ──► FallbackRendered
//!        │ invalid              ▲        ▲
//!        │                      │ load   │ build/draw
//!        │                      │ failed │ failed
//!      Idle ──► LoadingLibrary ─┴──► Rendering ──► Rendered
//! ```
//!
//! # Ordering
//! Session ids increase monotonically. Only the newest session may publish
//! its outcome to the display channel; an older session that finishes later
//! is dropped.

pub mod dot;
pub mod error;
pub mod fallback;
pub mod library;
pub mod view;

pub use error::RenderError;
pub use fallback::{FallbackEntry, FallbackView};
pub use library::{GraphLibrary, LibraryCache, LibraryLoader, LoadStatus, NoLibrary};
pub use view::{DurationBand, HierarchicalLayout, LayoutDirection, NetworkView, VisualEdge, VisualNode};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::RendererConfig;
use crate::graph::{drift, validate, GraphData, GraphError, GraphPayload};

/// Monotonic render session id; `0` is never issued.
pub type SessionId = u64;

// ── State machine ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    LoadingLibrary,
    Rendering,
    Rendered,
    FallbackRendering,
    FallbackRendered,
}

impl RenderState {
    pub fn can_advance_to(self, next: RenderState) -> bool {
        use RenderState::*;
        matches!(
            (self, next),
            (Idle, LoadingLibrary)
                | (Idle, FallbackRendering)
                | (LoadingLibrary, Rendering)
                | (LoadingLibrary, FallbackRendering)
                | (Rendering, Rendered)
                | (Rendering, FallbackRendering)
                | (FallbackRendering, FallbackRendered)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RenderState::Rendered | RenderState::FallbackRendered)
    }
}

/// Path one session took through [`RenderState`].
#[derive(Debug)]
struct Session {
    id: SessionId,
    transitions: Vec<RenderState>,
}

impl Session {
    fn new(id: SessionId) -> Self {
        Self {
            id,
            transitions: vec![RenderState::Idle],
        }
    }

    fn state(&self) -> RenderState {
        self.transitions
            .last()
            .copied()
            .unwrap_or(RenderState::Idle)
    }

    fn advance(&mut self, next: RenderState) {
        let current = self.state();
        debug_assert!(
            current.can_advance_to(next),
            "illegal render transition {current:?} -> {next:?}"
        );
        debug!(session = self.id, from = ?current, to = ?next, "Render state");
        self.transitions.push(next);
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Why a session ended in the fallback view.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    ValidationFailed(GraphError),
    CapabilityUnavailable(RenderError),
    RenderFailed(RenderError),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::ValidationFailed(e) => write!(f, "validation failed: {e}"),
            FallbackReason::CapabilityUnavailable(e) => {
                write!(f, "interactive view unavailable: {e}")
            }
            FallbackReason::RenderFailed(e) => write!(f, "interactive view failed: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutput {
    Interactive {
        library: String,
        view: NetworkView,
        /// What the library produced for `view`.
        artifact: String,
    },
    Fallback {
        reason: FallbackReason,
        view: FallbackView,
    },
}

impl RenderOutput {
    pub fn is_fallback(&self) -> bool {
        matches!(self, RenderOutput::Fallback { .. })
    }
}

/// Published result of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub session: SessionId,
    /// States visited, starting at [`RenderState::Idle`].
    pub transitions: Vec<RenderState>,
    pub output: RenderOutput,
}

impl RenderOutcome {
    pub fn final_state(&self) -> RenderState {
        self.transitions
            .last()
            .copied()
            .unwrap_or(RenderState::Idle)
    }
}

// ── GraphRenderer ─────────────────────────────────────────────────────────────

pub struct GraphRenderer {
    cache: Arc<LibraryCache>,
    config: RendererConfig,
    latest: AtomicU64,
    display: watch::Sender<Option<Arc<RenderOutcome>>>,
}

impl GraphRenderer {
    pub fn new(cache: Arc<LibraryCache>, config: RendererConfig) -> Self {
        let (display, _) = watch::channel(None);
        Self {
            cache,
            config,
            latest: AtomicU64::new(0),
            display,
        }
    }

    /// Receiver that observes every published outcome.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<RenderOutcome>>> {
        self.display.subscribe()
    }

    /// Outcome currently on display.
    pub fn shown(&self) -> Option<Arc<RenderOutcome>> {
        self.display.borrow().clone()
    }

    pub fn latest_session(&self) -> SessionId {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn cache(&self) -> &LibraryCache {
        &self.cache
    }

    /// Render `payload` in a new session.
    ///
    /// Returns the published outcome, or `None` when a newer session was
    /// submitted before this one finished.
    pub async fn submit(&self, payload: GraphPayload) -> Option<Arc<RenderOutcome>> {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let mut session = Session::new(id);
        info!(
            session = id,
            nodes = payload.graph_data.nodes.len(),
            edges = payload.graph_data.edges.len(),
            "Render requested"
        );

        let output = match validate(&payload) {
            Err(e) => {
                warn!(session = id, error = %e, "Graph payload rejected");
                session.advance(RenderState::FallbackRendering);
                self.fallback(&payload.graph_data, FallbackReason::ValidationFailed(e))
            }
            Ok(()) => {
                if let Some(analysis) = &payload.dependency_analysis {
                    for d in drift(&payload.graph_data, analysis) {
                        warn!(session = id, "Dependency analysis drift: {}", d);
                    }
                }

                session.advance(RenderState::LoadingLibrary);
                let library = self.cache.get_or_load().await;
                if self.is_stale(id) {
                    debug!(session = id, "Superseded while loading, dropping");
                    return None;
                }

                match library {
                    Err(e) => {
                        session.advance(RenderState::FallbackRendering);
                        self.fallback(&payload.graph_data, FallbackReason::CapabilityUnavailable(e))
                    }
                    Ok(library) => {
                        session.advance(RenderState::Rendering);
                        let drawn = NetworkView::build(&payload.graph_data, &self.config)
                            .and_then(|view| library.draw(&view).map(|artifact| (view, artifact)));
                        match drawn {
                            Ok((view, artifact)) => RenderOutput::Interactive {
                                library: library.name().to_string(),
                                view,
                                artifact,
                            },
                            Err(e) => {
                                warn!(session = id, error = %e, "Interactive render failed");
                                session.advance(RenderState::FallbackRendering);
                                self.fallback(&payload.graph_data, FallbackReason::RenderFailed(e))
                            }
                        }
                    }
                }
            }
        };

        session.advance(if output.is_fallback() {
            RenderState::FallbackRendered
        } else {
            RenderState::Rendered
        });

        let outcome = Arc::new(RenderOutcome {
            session: id,
            transitions: session.transitions,
            output,
        });
        self.publish(outcome)
    }

    fn fallback(&self, graph: &GraphData, reason: FallbackReason) -> RenderOutput {
        let view = FallbackView::build(graph).annotated(reason.to_string());
        RenderOutput::Fallback { reason, view }
    }

    fn is_stale(&self, id: SessionId) -> bool {
        self.latest.load(Ordering::SeqCst) != id
    }

    /// Publish `outcome` if its session is still the newest.
    fn publish(&self, outcome: Arc<RenderOutcome>) -> Option<Arc<RenderOutcome>> {
        let id = outcome.session;
        let published = self.display.send_if_modified(|shown| {
            if self.is_stale(id) {
                return false;
            }
            *shown = Some(outcome.clone());
            true
        });

        if published {
            info!(session = id, state = ?outcome.final_state(), "Render published");
            Some(outcome)
        } else {
            debug!(session = id, "Superseded before publishing, dropping");
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
