//! HTTP API for the Bollybook e-book generator.
//!
//! Wires the extractor, the book assembler, the renderers and a job store
//! behind an axum router. Every route lives under `/api`; failures are
//! returned as `{"detail": "..."}` with a status derived from the error
//! kind.
//!
//! # Example
//!
//! ```rust,ignore
//! use bollybook_server::{AppState, BollybookConfig, create_router};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BollybookConfig::load()?;
//! let state = AppState::from_config(&config).await?;
//! let app = create_router(state, &config.server.cors_origin_list());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
pub mod handlers;
mod observer;
mod router;
mod state;
mod telemetry;

pub use config::{
    BollybookConfig, DatabaseConfig, LlmConfig, LoggingConfig, ServerConfig, StorageConfig,
    TranscriptConfig,
};
pub use error::{ApiError, status_for};
pub use observer::{JobProgressObserver, percent};
pub use router::{cors_layer, create_router};
pub use state::{AppState, AppStateBuilder, AppStateBuilderError};
pub use telemetry::init_telemetry;
