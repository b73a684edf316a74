//! Router tests over in-memory collaborators.

mod test_utils;

use axum::http::StatusCode;
use axum::http::header::CONTENT_DISPOSITION;
use bollybook_core::{JobStatus, UploadKind};
use bollybook_interface::JobStore;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use test_utils::TestApp;
use test_utils::fakes::UnavailableTranscripts;
use test_utils::mock_driver::{MockDriver, reply_for};
use uuid::Uuid;

#[tokio::test]
async fn test_languages_listed_in_order() {
    let app = TestApp::new(MockDriver::echo());

    let response = app.get("/api/languages").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    let languages = body["languages"].as_array().unwrap();
    assert_eq!(languages.len(), 10);
    assert_eq!(languages[0]["code"], "english");
    assert_eq!(languages[0]["name"], "English");
    assert_eq!(languages[9]["code"], "malayalam");
}

#[tokio::test]
async fn test_root_describes_endpoints() {
    let app = TestApp::new(MockDriver::echo());

    let response = app.get("/api/").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["endpoints"]["generate_book"], "/api/generate/book");
    assert_eq!(body["endpoints"]["languages"], "/api/languages");
}

#[tokio::test]
async fn test_download_rejects_unknown_format_before_lookup() {
    let app = TestApp::new(MockDriver::echo());

    let response = app
        .get(&format!("/api/download/epub/{}", Uuid::new_v4()))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["detail"], "Format must be pdf, docx, or md");
}

#[tokio::test]
async fn test_download_unknown_book_is_not_found() {
    let app = TestApp::new(MockDriver::echo());

    for format in ["pdf", "docx", "md"] {
        for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
            let response = app.get(&format!("/api/download/{}/{}", format, id)).await;
            assert_eq!(response.status, StatusCode::NOT_FOUND, "{} {}", format, id);
            assert_eq!(response.json()["detail"], "Book not found");
        }
    }
}

#[tokio::test]
async fn test_status_of_unknown_job_is_not_found() {
    let app = TestApp::new(MockDriver::echo());

    let response = app
        .get(&format!("/api/generation/status/{}", Uuid::new_v4()))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["detail"], "Generation not found");
}

#[tokio::test]
async fn test_upload_notes_counts_words_and_saves_file() {
    let app = TestApp::new(MockDriver::echo());

    let response = app
        .post_multipart(
            "/api/upload/notes",
            "file",
            Some("lecture.txt"),
            b"Hello Cloud World",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["message"], "Notes uploaded successfully");
    assert_eq!(body["filename"], "lecture.txt");
    assert_eq!(body["word_count"], 3);

    let id = body["id"].as_str().unwrap();
    let saved = app.upload_dir.path().join(format!("{}.txt", id));
    assert_eq!(std::fs::read(saved).unwrap(), b"Hello Cloud World");

    let uploads = app.store.list_uploads(10).await.unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].kind, UploadKind::Notes);
    assert_eq!(uploads[0].content, "Hello Cloud World");
}

#[tokio::test]
async fn test_upload_slides_rejects_text_files() {
    let app = TestApp::new(MockDriver::echo());

    let response = app
        .post_multipart("/api/upload/slides", "file", Some("notes.txt"), b"text")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json()["detail"],
        "Unsupported file format. Use PDF, PPTX, or DOCX."
    );
    assert!(app.store.list_uploads(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let app = TestApp::new(MockDriver::echo());

    let response = app
        .post_multipart("/api/upload/notes", "attachment", Some("a.txt"), b"text")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["detail"], "No file uploaded");
}

#[tokio::test]
async fn test_generate_book_then_download_markdown() {
    let app = TestApp::new(MockDriver::echo());
    app.post_multipart(
        "/api/upload/notes",
        "file",
        Some("notes.txt"),
        b"Elastic load balancing notes",
    )
    .await;

    let response = app
        .post_json(
            "/api/generate/book",
            json!({"language": "english", "use_uploaded_content": true}),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Book generated successfully");
    let book_id = body["book_id"].as_str().unwrap().to_string();

    let toc_prompt = app.driver.prompt_for("toc_english").unwrap();
    assert!(toc_prompt.contains("Elastic load balancing notes"));

    let status = app
        .get(&format!("/api/generation/status/{}", book_id))
        .await
        .json();
    assert_eq!(status["status"], "completed");
    assert_eq!(status["progress"], 100);
    assert_eq!(status["message"], "Generation completed");

    let download = app.get(&format!("/api/download/md/{}", book_id)).await;
    assert_eq!(download.status, StatusCode::OK);
    let filename = format!("bollywood_cloud_book_{}.md", book_id);
    assert_eq!(
        download.headers[CONTENT_DISPOSITION],
        format!("attachment; filename=\"{}\"", filename).as_str()
    );
    let markdown = download.text();
    assert!(markdown.starts_with("# 📚"));
    assert!(markdown.contains(&reply_for("chapter_1_english")));
    assert!(app.output_dir.path().join(filename).exists());
}

#[tokio::test]
async fn test_generated_book_downloads_in_every_format() {
    let app = TestApp::new(MockDriver::echo());
    let book_id = app
        .post_json("/api/generate/book", json!({"language": "english"}))
        .await
        .json()["book_id"]
        .as_str()
        .unwrap()
        .to_string();

    for (format, magic) in [("pdf", &b"%PDF"[..]), ("docx", &b"PK"[..]), ("md", &b"# "[..])] {
        let response = app.get(&format!("/api/download/{}/{}", format, book_id)).await;
        assert_eq!(response.status, StatusCode::OK, "{}", format);
        assert!(response.body.starts_with(magic), "{}", format);

        let filename = format!("bollywood_cloud_book_{}.{}", book_id, format);
        let saved = std::fs::read(app.output_dir.path().join(&filename)).unwrap();
        assert_eq!(saved, response.body);
    }
}

#[tokio::test]
async fn test_job_finishes_after_client_disconnects() {
    let driver = MockDriver::echo().slow_on("chapter_3_english", Duration::from_millis(300));
    let app = TestApp::new(driver);

    let request = app.post_json("/api/generate/book", json!({"language": "english"}));
    assert!(
        tokio::time::timeout(Duration::from_millis(100), request)
            .await
            .is_err()
    );

    let job = app.settled_job().await;
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.progress, 100);
    assert!(app.store.get_book(job.book_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_completion_write_is_retried() {
    let app = TestApp::with_flaky_completion(MockDriver::echo(), 1);

    let response = app
        .post_json("/api/generate/book", json!({"language": "english"}))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let job = app.settled_job().await;
    assert_eq!(job.status, JobStatus::Completed);
}

#[tokio::test]
async fn test_unrecordable_completion_marks_job_failed() {
    let app = TestApp::with_flaky_completion(MockDriver::echo(), 2);

    let response = app
        .post_json("/api/generate/book", json!({"language": "english"}))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let job = app.settled_job().await;
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.error_message.unwrap().contains("connection reset"));
    assert!(app.store.get_book(job.book_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_generate_book_failure_marks_job_failed() {
    let app = TestApp::new(MockDriver::failing_on("toc_english"));

    let response = app
        .post_json("/api/generate/book", json!({"language": "english"}))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = response.json()["detail"].as_str().unwrap().to_string();
    assert!(detail.contains("model overloaded"));

    let jobs = app.store.jobs().await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].status, JobStatus::Failed);
    assert!(
        jobs[0]
            .error_message
            .as_deref()
            .unwrap()
            .contains("model overloaded")
    );
    assert!(
        app.store
            .get_book(jobs[0].book_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_generate_book_accepts_chapter_mode() {
    let app = TestApp::new(MockDriver::echo());

    let response = app
        .post_json(
            "/api/generate/book",
            json!({"language": "hindi", "generation_mode": "chapter"}),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(app.driver.prompt_for("title_hindi").is_some());
}

#[tokio::test]
async fn test_generate_book_rejects_malformed_json() {
    let app = TestApp::new(MockDriver::echo());

    let response = app
        .send(
            axum::http::Request::post("/api/generate/book")
                .header("content-type", "application/json")
                .body(axum::body::Body::from("{not json"))
                .unwrap(),
        )
        .await;

    assert!(response.status.is_client_error());
    assert!(response.json()["detail"].is_string());
    assert!(app.driver.requests().is_empty());
}

#[tokio::test]
async fn test_generate_chapter_is_stored() {
    let app = TestApp::new(MockDriver::echo());

    let response = app
        .post_json(
            "/api/generate/chapter",
            json!({
                "language": "tamil",
                "chapter_number": 3,
                "chapter_title": "Virtualization"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["content"], reply_for("chapter_3_tamil"));
    assert_eq!(body["message"], "Chapter generated successfully");

    let chapter_id = Uuid::parse_str(body["chapter_id"].as_str().unwrap()).unwrap();
    let stored = app.store.get_chapter(chapter_id).await.unwrap().unwrap();
    assert_eq!(stored.chapter_number, 3);
    assert_eq!(stored.chapter_title, "Virtualization");
}

#[tokio::test]
async fn test_youtube_playlist_not_implemented() {
    let app = TestApp::new(MockDriver::echo());

    let response = app
        .post_form(
            "/api/youtube/process",
            "youtube_url=https%3A%2F%2Fwww.youtube.com%2Fplaylist%3Flist%3DPLabc123",
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_IMPLEMENTED);
    assert!(
        response.json()["detail"]
            .as_str()
            .unwrap()
            .contains("Playlist ID: PLabc123")
    );
}

#[tokio::test]
async fn test_youtube_video_from_urlencoded_form() {
    let app = TestApp::new(MockDriver::echo());

    let response = app
        .post_form(
            "/api/youtube/process",
            "youtube_url=https%3A%2F%2Fyoutu.be%2FdQw4w9WgXcQ",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["message"], "YouTube transcript extracted successfully");
    assert_eq!(body["word_count"], 5);

    let uploads = app.store.list_uploads(10).await.unwrap();
    assert_eq!(uploads[0].kind, UploadKind::Youtube);
    assert_eq!(uploads[0].content, "Namaste cloud students scale out");
}

#[tokio::test]
async fn test_youtube_video_from_multipart_form() {
    let app = TestApp::new(MockDriver::echo());

    let response = app
        .post_multipart(
            "/api/youtube/process",
            "youtube_url",
            None,
            b"https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json()["url"],
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
    );
}

#[tokio::test]
async fn test_youtube_invalid_url_is_bad_request() {
    let app = TestApp::new(MockDriver::echo());

    let response = app
        .post_form("/api/youtube/process", "youtube_url=not-a-video")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_book_survives_unavailable_transcript() {
    let app = TestApp::with_transcripts(MockDriver::echo(), Arc::new(UnavailableTranscripts));

    let response = app
        .post_json(
            "/api/generate/book",
            json!({
                "language": "english",
                "youtube_url": "https://youtu.be/dQw4w9WgXcQ"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let toc_prompt = app.driver.prompt_for("toc_english").unwrap();
    assert!(!toc_prompt.contains("Additional context from user materials"));
}

#[tokio::test]
async fn test_book_includes_transcript_reference() {
    let app = TestApp::new(MockDriver::echo());

    app.post_json(
        "/api/generate/book",
        json!({
            "language": "english",
            "youtube_url": "https://youtu.be/dQw4w9WgXcQ"
        }),
    )
    .await;

    let toc_prompt = app.driver.prompt_for("toc_english").unwrap();
    assert!(toc_prompt.contains("Namaste cloud students scale out"));
}
