//! Shared handler state.

use crate::BollybookConfig;
use bollybook_database::InMemoryJobStore;
use bollybook_error::{BollybookResult, ConfigError};
use bollybook_extract::{YouTubeTranscriptConfig, YouTubeTranscriptSource};
use bollybook_interface::{BollybookDriver, JobStore, TranscriptSource};
use bollybook_models::{OpenAiClient, OpenAiConfig};
use bollybook_narrative::{BookAssembler, GenerationSession};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Everything a request handler needs.
///
/// # Example
///
/// ```rust,ignore
/// let state = AppState::builder()
///     .store(Arc::new(InMemoryJobStore::new()) as Arc<dyn JobStore>)
///     .assembler(Arc::new(assembler))
///     .transcripts(Arc::new(source) as Arc<dyn TranscriptSource>)
///     .upload_dir("uploads")
///     .output_dir("outputs")
///     .build()?;
/// ```
#[derive(Clone, derive_builder::Builder)]
#[builder(setter(into))]
pub struct AppState {
    /// Upload, job, book and chapter persistence
    pub store: Arc<dyn JobStore>,
    /// Book and chapter generation
    pub assembler: Arc<BookAssembler>,
    /// Caption source for YouTube URLs
    pub transcripts: Arc<dyn TranscriptSource>,
    /// Where raw uploads are saved
    pub upload_dir: PathBuf,
    /// Where rendered downloads are written
    pub output_dir: PathBuf,
    /// Request body limit
    #[builder(default = "DEFAULT_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Creates a new state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::default()
    }

    /// Wire the production collaborators described by `config`.
    ///
    /// Creates the storage directories, connects the job store and builds
    /// the LLM driver and transcript source.
    #[tracing::instrument(skip(config))]
    pub async fn from_config(config: &BollybookConfig) -> BollybookResult<Self> {
        for dir in [&config.storage.upload_dir, &config.storage.output_dir] {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                ConfigError::new(format!(
                    "Failed to create directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        let store = connect_store(config).await?;

        let mut openai = OpenAiConfig::builder();
        openai
            .base_url(config.llm.base_url.clone())
            .model(config.llm.model.clone());
        match &config.llm.api_key {
            Some(key) => {
                openai.api_key(key.clone());
            }
            None => tracing::warn!("No LLM credential configured; requests are unauthenticated"),
        }
        let openai = openai
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid LLM configuration: {}", e)))?;
        let driver: Arc<dyn BollybookDriver> = Arc::new(OpenAiClient::new(openai));

        let mut session = GenerationSession::new(driver);
        if let Some(timeout) = config.llm.request_timeout() {
            session = session.with_request_timeout(timeout);
        }
        let mut assembler =
            BookAssembler::new(session).with_chapter_concurrency(config.llm.chapter_concurrency);
        if let Some(timeout) = config.llm.book_timeout() {
            assembler = assembler.with_book_timeout(timeout);
        }

        let transcripts = YouTubeTranscriptConfig::builder()
            .base_url(config.transcript.base_url.clone())
            .language(config.transcript.language.clone())
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid transcript configuration: {}", e)))?;

        let state = Self {
            store,
            assembler: Arc::new(assembler),
            transcripts: Arc::new(YouTubeTranscriptSource::new(transcripts)),
            upload_dir: config.storage.upload_dir.clone(),
            output_dir: config.storage.output_dir.clone(),
            max_upload_bytes: config.server.max_upload_bytes(),
        };
        Ok(state)
    }
}

#[cfg(feature = "database")]
async fn connect_store(config: &BollybookConfig) -> BollybookResult<Arc<dyn JobStore>> {
    use bollybook_database::PostgresJobStore;

    let Some(url) = config.database.connection_url() else {
        tracing::info!("No database configured; using in-memory job store");
        return Ok(Arc::new(InMemoryJobStore::new()));
    };

    let pool_size = config.database.pool_size;
    let store = tokio::task::spawn_blocking(move || PostgresJobStore::connect(&url, pool_size))
        .await
        .map_err(|e| ConfigError::new(format!("Database connection task failed: {}", e)))??;
    store.run_migrations().await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "database"))]
async fn connect_store(config: &BollybookConfig) -> BollybookResult<Arc<dyn JobStore>> {
    if config.database.connection_url().is_some() {
        tracing::warn!(
            "DATABASE_URL is set but PostgreSQL support is not compiled in; using in-memory job store"
        );
    } else {
        tracing::info!("No database configured; using in-memory job store");
    }
    Ok(Arc::new(InMemoryJobStore::new()))
}
