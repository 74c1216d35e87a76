//! Wholesale deal evaluation: deterministic scoring, MAO rules, remote analysis
//! resolution, the deal portfolio and the buyer roster.

pub mod analysis;
pub mod buyers;
pub mod domain;
pub mod import;
pub mod mao;
pub mod portfolio;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use analysis::{
    AnalysisGateway, AnalysisKind, AnalysisRequest, AnalysisSession, AnalysisSource,
    AnalysisState, HttpAnalysisGateway, RemoteAnalysisError, ResolveError, ResolvedAnalysis,
    ResultResolver, SessionOutcome,
};
pub use domain::{
    parse_amount, DealAnalysisResult, DealRating, Factor, FactorImpact, PropertyRecord,
    DEFAULT_HOLDING_COST,
};
pub use import::{import_properties, import_properties_from_path, DealImportError};
pub use mao::{
    compute_mao, estimate_arv, intake_mao, offer_verdict, MaoEstimate, MaoFormula, OfferVerdict,
};
pub use scoring::{DealScorer, ScoringConfig};
