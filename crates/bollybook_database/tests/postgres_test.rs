//! Tests for the PostgreSQL job store.
//!
//! These need a reachable database in `DATABASE_URL` and are skipped
//! otherwise.

#![cfg(feature = "database")]

use bollybook_core::{GenerationJob, GenerationMode, JobStatus, Upload, UploadKind};
use bollybook_database::PostgresJobStore;
use bollybook_interface::JobStore;
use uuid::Uuid;

async fn store() -> Option<PostgresJobStore> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let store = PostgresJobStore::connect(&url, 2).ok()?;
    store.run_migrations().await.ok()?;
    Some(store)
}

#[tokio::test]
async fn test_job_lifecycle_persists() {
    let Some(store) = store().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };

    let job = GenerationJob::start(Uuid::new_v4(), "kannada", GenerationMode::Full);
    store.create_job(&job).await.unwrap();
    store.update_job_progress(job.book_id, 60).await.unwrap();
    store.fail_job(job.book_id, "timed out").await.unwrap();

    let loaded = store.get_job(job.book_id).await.unwrap().unwrap();
    assert_eq!(loaded.status, JobStatus::Failed);
    assert_eq!(loaded.progress, 60);
    assert_eq!(loaded.error_message.as_deref(), Some("timed out"));
}

#[tokio::test]
async fn test_unknown_job_is_none() {
    let Some(store) = store().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };

    assert!(store.get_job(Uuid::new_v4()).await.unwrap().is_none());
    assert!(store.complete_job(Uuid::new_v4()).await.is_err());
}

#[tokio::test]
async fn test_saved_upload_is_listed() {
    let Some(store) = store().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };

    let upload = Upload::new(UploadKind::Notes, "notes.txt", "Kubernetes", None);
    store.save_upload(&upload).await.unwrap();

    let uploads = store.list_uploads(10_000).await.unwrap();
    assert!(uploads.iter().any(|u| u.id == upload.id));
}
