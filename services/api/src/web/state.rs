//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use legal_assistant_core::ports::{
    DatabaseService, DocumentAnalysisService, LegalResponseService, SpeechToTextService,
    TextExtractionService,
};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Every collaborator is injected, so tests can build a router over fakes.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub config: Arc<Config>,
    pub sst_adapter: Arc<dyn SpeechToTextService>,
    pub legal_adapter: Arc<dyn LegalResponseService>,
    pub document_adapter: Arc<dyn DocumentAnalysisService>,
    pub extractor: Arc<dyn TextExtractionService>,
}
