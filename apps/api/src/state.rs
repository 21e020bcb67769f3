use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::config::Config;
use crate::interview::ledger::QaStore;
use crate::llm_client::TextGenerator;
use crate::space::repo::SpaceStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Space aggregate store. Production wires `PgSpaceStore`.
    pub spaces: Arc<dyn SpaceStore>,
    /// Question/answer row store. Production wires `PgQaStore`.
    pub questions: Arc<dyn QaStore>,
    /// Object storage for the uploaded resume artifacts.
    pub s3: S3Client,
    /// The text-generation capability. Production wires `LlmClient`; tests
    /// substitute a mock.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}
