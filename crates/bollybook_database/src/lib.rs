//! Job store implementations for Bollybook.
//!
//! [`InMemoryJobStore`] keeps everything in process memory and is the
//! default when no database is configured. With the `database` feature,
//! [`PostgresJobStore`] persists uploads, jobs, books and chapters in
//! PostgreSQL through a diesel connection pool.
//!
//! # Example
//!
//! ```rust,ignore
//! use bollybook_database::PostgresJobStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PostgresJobStore::connect("postgres://localhost/bollybook", 10)?;
//! store.run_migrations().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod in_memory;

#[cfg(feature = "database")]
mod models;
#[cfg(feature = "database")]
mod postgres;
#[cfg(feature = "database")]
pub mod schema;

pub use in_memory::InMemoryJobStore;

#[cfg(feature = "database")]
pub use models::{BookRow, ChapterRow, JobRow, UploadRow};
#[cfg(feature = "database")]
pub use postgres::{DEFAULT_POOL_SIZE, PostgresJobStore};
