//! Fake port implementations for integration tests.
//!
//! Each fake either answers deterministically or fails on demand, and records
//! what it was asked so tests can assert on the pipeline's inputs without any
//! network access.

use api_lib::{
    adapters::{DocumentTextExtractor, MemoryDbAdapter},
    config::Config,
    web::{build_router, state::AppState},
};
use async_trait::async_trait;
use axum::Router;
use legal_assistant_core::{
    domain::ChatRequest,
    ports::{
        DocumentAnalysisService, LegalResponseService, PortError, PortResult,
        SpeechToTextService,
    },
};
use std::sync::{Arc, Mutex};

/// Answers every turn with `"Answer: <message>"`, or fails when `failing`.
#[derive(Default)]
pub struct FakeLegalAdapter {
    failing: bool,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeLegalAdapter {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LegalResponseService for FakeLegalAdapter {
    async fn generate_response(&self, request: &ChatRequest) -> PortResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        if self.failing {
            return Err(PortError::Unexpected("model quota exceeded".to_string()));
        }
        Ok(format!("Answer: {}", request.message))
    }
}

/// Returns a fixed transcript; `None` makes every call fail.
pub struct FakeSstAdapter {
    transcript: Option<String>,
}

impl FakeSstAdapter {
    pub fn returning(transcript: &str) -> Self {
        Self {
            transcript: Some(transcript.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { transcript: None }
    }
}

#[async_trait]
impl SpeechToTextService for FakeSstAdapter {
    async fn transcribe_audio(&self, audio_data: &[u8]) -> PortResult<String> {
        assert!(!audio_data.is_empty(), "pipeline must not transcribe empty audio");
        self.transcript
            .clone()
            .ok_or_else(|| PortError::Unexpected("whisper unavailable".to_string()))
    }
}

#[derive(Default)]
pub struct FakeDocumentAdapter {
    failing: bool,
}

impl FakeDocumentAdapter {
    pub fn failing() -> Self {
        Self { failing: true }
    }
}

#[async_trait]
impl DocumentAnalysisService for FakeDocumentAdapter {
    async fn analyze_document(&self, document_text: &str, document_type: &str) -> PortResult<String> {
        if self.failing {
            return Err(PortError::Unexpected("analysis timed out".to_string()));
        }
        Ok(format!(
            "Analysis of {}: {}",
            document_type,
            document_text.trim()
        ))
    }
}

/// A router over an isolated store plus handles on the pieces tests inspect.
pub struct TestApp {
    pub router: Router,
    pub db: MemoryDbAdapter,
    pub legal: Arc<FakeLegalAdapter>,
}

pub struct TestAppBuilder {
    legal: FakeLegalAdapter,
    sst: FakeSstAdapter,
    document: FakeDocumentAdapter,
    seeded: bool,
    vars: Vec<(&'static str, String)>,
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            legal: FakeLegalAdapter::default(),
            sst: FakeSstAdapter::returning("What is the limitation period for a civil suit?"),
            document: FakeDocumentAdapter::default(),
            seeded: true,
            vars: Vec::new(),
        }
    }

    pub async fn new() -> Self {
        Self::builder().build().await
    }
}

impl TestAppBuilder {
    pub fn legal(mut self, legal: FakeLegalAdapter) -> Self {
        self.legal = legal;
        self
    }

    pub fn sst(mut self, sst: FakeSstAdapter) -> Self {
        self.sst = sst;
        self
    }

    pub fn document(mut self, document: FakeDocumentAdapter) -> Self {
        self.document = document;
        self
    }

    pub fn unseeded(mut self) -> Self {
        self.seeded = false;
        self
    }

    pub fn env(mut self, key: &'static str, value: &str) -> Self {
        self.vars.push((key, value.to_string()));
        self
    }

    pub async fn build(self) -> TestApp {
        let vars = self.vars;
        let config = Config::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
        })
        .expect("test config is valid");

        let db = if self.seeded {
            MemoryDbAdapter::with_seed_data().await.expect("seeding succeeds")
        } else {
            MemoryDbAdapter::new()
        };
        let legal = Arc::new(self.legal);

        let state = Arc::new(AppState {
            db: Arc::new(db.clone()),
            config: Arc::new(config),
            sst_adapter: Arc::new(self.sst),
            legal_adapter: legal.clone(),
            document_adapter: Arc::new(self.document),
            extractor: Arc::new(DocumentTextExtractor::new()),
        });

        TestApp {
            router: build_router(state),
            db,
            legal,
        }
    }
}
