//! Remote AI analysis with a deterministic local fallback.
//!
//! Deal analyses always resolve: a failed or malformed remote call yields the local
//! [`DealScorer`](super::scoring::DealScorer) result in the same shape. Text generation
//! kinds have nothing to fall back to and surface the failure instead.

mod gateway;
mod payload;
mod resolver;
pub mod router;
mod session;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::domain::{DealAnalysisResult, PropertyRecord};

pub use gateway::{AnalysisGateway, HttpAnalysisGateway};
pub use resolver::ResultResolver;
pub use router::analysis_router;
pub use session::{AnalysisSession, AnalysisState, SessionOutcome};

/// What the caller asked the remote service to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    DealAnalysis,
    PropertyDescription,
    MarketInsights,
}

impl AnalysisKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            AnalysisKind::DealAnalysis => "deal-analysis",
            AnalysisKind::PropertyDescription => "property-description",
            AnalysisKind::MarketInsights => "market-insights",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body posted to the remote analysis function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub property_data: PropertyRecord,
    pub analysis_type: AnalysisKind,
}

impl AnalysisRequest {
    pub fn new(property_data: PropertyRecord, analysis_type: AnalysisKind) -> Self {
        Self {
            property_data,
            analysis_type,
        }
    }
}

/// Which path produced a deal analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Remote,
    Fallback,
}

/// Final answer for one analysis request, keyed by the requested kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedAnalysis {
    Deal {
        source: AnalysisSource,
        result: DealAnalysisResult,
    },
    Text {
        kind: AnalysisKind,
        content: String,
    },
}

impl ResolvedAnalysis {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            ResolvedAnalysis::Deal { .. } => AnalysisKind::DealAnalysis,
            ResolvedAnalysis::Text { kind, .. } => *kind,
        }
    }

    pub fn deal(&self) -> Option<&DealAnalysisResult> {
        match self {
            ResolvedAnalysis::Deal { result, .. } => Some(result),
            ResolvedAnalysis::Text { .. } => None,
        }
    }
}

/// Failure talking to, or understanding, the remote analysis function.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteAnalysisError {
    #[error("remote analysis endpoint is not configured")]
    NotConfigured,
    #[error("remote analysis request failed: {0}")]
    Transport(String),
    #[error("remote analysis returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("remote analysis timed out after {0:?}")]
    Timeout(Duration),
    #[error("remote analysis payload was malformed: {0}")]
    Malformed(String),
}

/// Surfaced when a text generation kind cannot be fulfilled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} generation failed: {source}")]
pub struct ResolveError {
    pub kind: AnalysisKind,
    #[source]
    pub source: RemoteAnalysisError,
}
