//! PostgreSQL job store using a diesel r2d2 pool.

use crate::models::{BookRow, ChapterRow, JobRow, UploadRow};
use crate::schema::{books, chapters, generation_jobs, uploads};
use async_trait::async_trait;
use bollybook_core::{BookArtifact, ChapterRecord, GenerationJob, JobStatus, Upload};
use bollybook_error::{BollybookResult, StoreError, StoreErrorKind};
use bollybook_interface::JobStore;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Pool size used when none is configured.
pub const DEFAULT_POOL_SIZE: u32 = 10;

type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Job store persisting to PostgreSQL.
///
/// Every operation checks a connection out of the pool and runs on the
/// blocking thread pool, so diesel never stalls the async runtime.
#[derive(Debug, Clone)]
pub struct PostgresJobStore {
    pool: PgPool,
}

impl PostgresJobStore {
    /// Build a pool for `database_url` and verify one connection can be made.
    ///
    /// # Errors
    ///
    /// Returns a `Connection` store error if the pool cannot be built or
    /// the database is unreachable.
    pub fn connect(database_url: &str, pool_size: u32) -> Result<Self, StoreError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .build(manager)
            .map_err(|e| {
                StoreError::new(StoreErrorKind::Connection(format!(
                    "Failed to create connection pool: {}",
                    e
                )))
            })?;

        // Warm up the pool
        pool.get().map_err(|e| {
            StoreError::new(StoreErrorKind::Connection(format!(
                "Failed to warm up connection pool: {}",
                e
            )))
        })?;

        info!(pool_size, "PostgreSQL job store connected");
        Ok(Self { pool })
    }

    /// Apply any pending embedded migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> BollybookResult<()> {
        self.with_conn(|conn| {
            let applied = conn
                .run_pending_migrations(MIGRATIONS)
                .map_err(|e| StoreError::new(StoreErrorKind::Migration(e.to_string())))?;
            info!(count = applied.len(), "Migrations applied");
            Ok(())
        })
        .await
    }

    async fn with_conn<T, F>(&self, f: F) -> BollybookResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                StoreError::new(StoreErrorKind::Connection(format!(
                    "Failed to get connection from pool: {}",
                    e
                )))
            })?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::new(StoreErrorKind::Query(format!("Task join error: {}", e))))?;
        Ok(result?)
    }
}

fn job_not_found(updated: usize) -> Result<(), StoreError> {
    if updated == 0 {
        Err(StoreError::new(StoreErrorKind::NotFound("Job".to_string())))
    } else {
        Ok(())
    }
}

#[async_trait]
impl JobStore for PostgresJobStore {
    #[instrument(skip(self, upload), fields(upload_id = %upload.id, kind = %upload.kind))]
    async fn save_upload(&self, upload: &Upload) -> BollybookResult<()> {
        let row = UploadRow::from(upload);
        self.with_conn(move |conn| {
            diesel::insert_into(uploads::table)
                .values(&row)
                .on_conflict(uploads::id)
                .do_update()
                .set((
                    uploads::content.eq(&row.content),
                    uploads::file_path.eq(&row.file_path),
                ))
                .execute(conn)?;
            debug!("Upload stored");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_uploads(&self, limit: usize) -> BollybookResult<Vec<Upload>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_conn(move |conn| {
            uploads::table
                .select(UploadRow::as_select())
                .order(uploads::created_at.asc())
                .limit(limit)
                .load::<UploadRow>(conn)?
                .into_iter()
                .map(Upload::try_from)
                .collect()
        })
        .await
    }

    #[instrument(skip(self, job), fields(book_id = %job.book_id))]
    async fn create_job(&self, job: &GenerationJob) -> BollybookResult<()> {
        let row = JobRow::from(job);
        self.with_conn(move |conn| {
            diesel::insert_into(generation_jobs::table)
                .values(&row)
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn update_job_progress(&self, book_id: Uuid, progress: u8) -> BollybookResult<()> {
        let progress = i16::from(progress.min(100));
        self.with_conn(move |conn| {
            let updated = diesel::update(generation_jobs::table.find(book_id))
                .set((
                    generation_jobs::progress.eq(progress),
                    generation_jobs::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;
            job_not_found(updated)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn complete_job(&self, book_id: Uuid) -> BollybookResult<()> {
        self.with_conn(move |conn| {
            let updated = diesel::update(generation_jobs::table.find(book_id))
                .set((
                    generation_jobs::status.eq(JobStatus::Completed.as_ref()),
                    generation_jobs::progress.eq(100i16),
                    generation_jobs::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;
            job_not_found(updated)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn fail_job(&self, book_id: Uuid, message: &str) -> BollybookResult<()> {
        let message = message.to_string();
        self.with_conn(move |conn| {
            let updated = diesel::update(generation_jobs::table.find(book_id))
                .set((
                    generation_jobs::status.eq(JobStatus::Failed.as_ref()),
                    generation_jobs::error_message.eq(Some(message)),
                    generation_jobs::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;
            job_not_found(updated)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_job(&self, book_id: Uuid) -> BollybookResult<Option<GenerationJob>> {
        self.with_conn(move |conn| {
            generation_jobs::table
                .find(book_id)
                .select(JobRow::as_select())
                .first::<JobRow>(conn)
                .optional()?
                .map(GenerationJob::try_from)
                .transpose()
        })
        .await
    }

    #[instrument(skip(self, book), fields(book_id = %book.book_id))]
    async fn save_book(&self, book: &BookArtifact) -> BollybookResult<()> {
        let row = BookRow::try_from(book)?;
        self.with_conn(move |conn| {
            diesel::insert_into(books::table)
                .values(&row)
                .on_conflict(books::book_id)
                .do_update()
                .set(books::artifact.eq(&row.artifact))
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_book(&self, book_id: Uuid) -> BollybookResult<Option<BookArtifact>> {
        self.with_conn(move |conn| {
            books::table
                .find(book_id)
                .select(BookRow::as_select())
                .first::<BookRow>(conn)
                .optional()?
                .map(BookArtifact::try_from)
                .transpose()
        })
        .await
    }

    #[instrument(skip(self, chapter), fields(chapter_id = %chapter.chapter_id))]
    async fn save_chapter(&self, chapter: &ChapterRecord) -> BollybookResult<()> {
        let row = ChapterRow::try_from(chapter)?;
        self.with_conn(move |conn| {
            diesel::insert_into(chapters::table)
                .values(&row)
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_chapter(&self, chapter_id: Uuid) -> BollybookResult<Option<ChapterRecord>> {
        self.with_conn(move |conn| {
            chapters::table
                .find(chapter_id)
                .select(ChapterRow::as_select())
                .first::<ChapterRow>(conn)
                .optional()?
                .map(ChapterRecord::try_from)
                .transpose()
        })
        .await
    }
}
