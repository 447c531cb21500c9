use std::sync::Arc;

use crate::analysis::report::ReportGenerator;
use crate::analysis::scoring::MatchScorer;

/// Shared application state injected into all route handlers via Axum
/// extractors. Both collaborators are built once at startup and never
/// mutated afterwards, so cloning per request is just reference counting.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable match scorer. Production: `EmbeddingMatchScorer`.
    pub scorer: Arc<dyn MatchScorer>,
    /// Pluggable report generator. Production: `LlmReportGenerator`.
    pub reporter: Arc<dyn ReportGenerator>,
}
