use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{AnalysisGateway, AnalysisKind, ResolvedAnalysis, ResultResolver};
use crate::workflows::deals::domain::PropertyRecord;

/// Lifecycle of the most recent analysis request in a session.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    Idle,
    Requesting {
        request_id: u64,
        kind: AnalysisKind,
    },
    Succeeded {
        request_id: u64,
        analysis: ResolvedAnalysis,
    },
    Failed {
        request_id: u64,
        kind: AnalysisKind,
        reason: String,
    },
}

impl AnalysisState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AnalysisState::Succeeded { .. } | AnalysisState::Failed { .. }
        )
    }
}

/// What the caller of [`AnalysisSession::analyze`] gets back.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Completed(AnalysisState),
    /// A newer request started while this one was in flight; its result was dropped.
    Superseded { request_id: u64 },
}

struct SessionInner {
    generation: u64,
    state: AnalysisState,
}

/// Re-analysis loop for one property view: last request wins.
pub struct AnalysisSession<G> {
    resolver: Arc<ResultResolver<G>>,
    inner: Mutex<SessionInner>,
}

impl<G> AnalysisSession<G>
where
    G: AnalysisGateway + 'static,
{
    pub fn new(resolver: Arc<ResultResolver<G>>) -> Self {
        Self {
            resolver,
            inner: Mutex::new(SessionInner {
                generation: 0,
                state: AnalysisState::Idle,
            }),
        }
    }

    pub fn state(&self) -> AnalysisState {
        self.lock().state.clone()
    }

    pub async fn analyze(&self, record: &PropertyRecord, kind: AnalysisKind) -> SessionOutcome {
        let request_id = {
            let mut inner = self.lock();
            let request_id = inner.generation + 1;
            inner.generation = request_id;
            inner.state = AnalysisState::Requesting { request_id, kind };
            request_id
        };

        let next = match self.resolver.resolve(record, kind).await {
            Ok(analysis) => AnalysisState::Succeeded {
                request_id,
                analysis,
            },
            Err(err) => AnalysisState::Failed {
                request_id,
                kind,
                reason: err.to_string(),
            },
        };

        let mut inner = self.lock();
        if inner.generation != request_id {
            return SessionOutcome::Superseded { request_id };
        }
        inner.state = next.clone();
        SessionOutcome::Completed(next)
    }

    /// Return to `Idle`, discarding whatever is still in flight.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = AnalysisState::Idle;
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
