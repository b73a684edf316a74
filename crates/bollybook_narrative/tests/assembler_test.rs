mod test_utils;

use async_trait::async_trait;
use bollybook_core::{CURRICULUM, Role, resolve};
use bollybook_error::GenerationErrorKind;
use bollybook_interface::{AssemblyObserver, AssemblyStep};
use bollybook_narrative::{BookAssembler, GenerationSession, TOTAL_STEPS};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use test_utils::mock_driver::MockDriver;
use uuid::Uuid;

#[derive(Default)]
struct RecordingObserver {
    steps: Mutex<Vec<(AssemblyStep, usize, usize)>>,
}

#[async_trait]
impl AssemblyObserver for RecordingObserver {
    async fn on_step(&self, step: AssemblyStep, completed: usize, total: usize) {
        self.steps.lock().unwrap().push((step, completed, total));
    }
}

fn assembler(driver: Arc<MockDriver>) -> BookAssembler {
    BookAssembler::new(GenerationSession::new(driver))
}

#[tokio::test]
async fn full_book_has_thirteen_ordered_chapters() {
    let driver = Arc::new(MockDriver::echo());
    let book = assembler(driver.clone())
        .assemble("HINDI", "")
        .await
        .unwrap();

    assert_eq!(book.language, "hindi");
    assert_eq!(book.title_page, "text for title_hindi");
    assert_eq!(book.table_of_contents, "text for toc_hindi");
    assert_eq!(book.chapters.len(), 13);
    for (chapter, plan) in book.chapters.iter().zip(CURRICULUM.iter()) {
        assert_eq!(chapter.number, plan.number);
        assert_eq!(chapter.title, plan.title);
        assert_eq!(chapter.target_pages, plan.target_pages);
        assert_eq!(chapter.content, format!("text for chapter_{}_hindi", plan.number));
    }
    assert!(book.validate().is_ok());
    assert_eq!(driver.call_count(), 15);
}

#[tokio::test]
async fn every_request_carries_persona_then_prompt() {
    let driver = Arc::new(MockDriver::echo());
    assembler(driver.clone()).assemble("tamil", "").await.unwrap();

    let persona = resolve("tamil").persona_instruction;
    for request in driver.requests() {
        let messages = request.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, persona);
        assert_eq!(messages[1].role, Role::User);
    }

    let keys = driver.session_keys();
    assert_eq!(keys[0], "title_tamil");
    assert_eq!(keys[1], "toc_tamil");
    assert_eq!(keys[2], "chapter_1_tamil");
    assert_eq!(keys[14], "chapter_13_tamil");
}

#[tokio::test]
async fn unknown_language_uses_english() {
    let driver = Arc::new(MockDriver::echo());
    let book = assembler(driver.clone()).assemble("klingon", "").await.unwrap();
    assert_eq!(book.language, "english");
    assert_eq!(driver.session_keys()[0], "title_english");
}

#[tokio::test]
async fn reference_excerpts_reach_toc_and_chapters() {
    let driver = Arc::new(MockDriver::echo());
    let reference = "z".repeat(1000);
    assembler(driver.clone())
        .assemble("english", &reference)
        .await
        .unwrap();

    let requests = driver.requests();
    let toc = &requests[1].messages()[1].content;
    assert!(toc.contains(&"z".repeat(500)));
    assert!(!toc.contains(&"z".repeat(501)));
    let chapter = &requests[2].messages()[1].content;
    assert!(chapter.contains(&"z".repeat(300)));
    assert!(!chapter.contains(&"z".repeat(301)));
}

#[tokio::test]
async fn observer_sees_each_step_in_order() {
    let driver = Arc::new(MockDriver::echo());
    let observer = RecordingObserver::default();
    assembler(driver)
        .assemble_with(Uuid::new_v4(), "english", "", &observer)
        .await
        .unwrap();

    let steps = observer.steps.lock().unwrap().clone();
    assert_eq!(steps.len(), TOTAL_STEPS + 2);
    assert_eq!(steps[0], (AssemblyStep::Started, 0, 15));
    assert_eq!(steps[1], (AssemblyStep::TitleGenerated, 1, 15));
    assert_eq!(steps[2], (AssemblyStep::TocGenerated, 2, 15));
    assert_eq!(steps[3], (AssemblyStep::ChapterGenerated(1), 3, 15));
    assert_eq!(steps[15], (AssemblyStep::ChapterGenerated(13), 15, 15));
    assert_eq!(steps[16], (AssemblyStep::Completed, 15, 15));
}

#[tokio::test]
async fn chapter_failure_aborts_assembly() {
    let driver = Arc::new(MockDriver::failing_on("chapter_7_english"));
    let observer = RecordingObserver::default();
    let err = assembler(driver.clone())
        .assemble_with(Uuid::new_v4(), "english", "", &observer)
        .await
        .unwrap_err();

    assert!(matches!(err.kind, GenerationErrorKind::Provider { status: 500, .. }));
    assert_eq!(driver.call_count(), 9);
    let steps = observer.steps.lock().unwrap().clone();
    assert!(!steps.iter().any(|(step, _, _)| *step == AssemblyStep::Completed));
    assert_eq!(steps.last().map(|s| s.0), Some(AssemblyStep::ChapterGenerated(6)));
}

#[tokio::test]
async fn title_failure_stops_before_toc() {
    let driver = Arc::new(MockDriver::failing_on("title_english"));
    assert!(assembler(driver.clone()).assemble("english", "").await.is_err());
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn concurrent_chapters_keep_curriculum_order() {
    // Early chapters answer slowest so completions arrive out of order.
    let driver = Arc::new(MockDriver::echo().delayed(|req| {
        let key = req.session_key();
        let number: u64 = key
            .strip_prefix("chapter_")
            .and_then(|rest| rest.split('_').next())
            .and_then(|n| n.parse().ok())
            .unwrap_or(13);
        Duration::from_millis((14 - number) * 3)
    }));

    let book = assembler(driver)
        .with_chapter_concurrency(4)
        .assemble("english", "")
        .await
        .unwrap();

    let numbers: Vec<u32> = book.chapters.iter().map(|c| c.number).collect();
    assert_eq!(numbers, (1..=13).collect::<Vec<_>>());
}

#[tokio::test]
async fn slow_book_times_out() {
    let driver = Arc::new(MockDriver::echo().delayed(|_| Duration::from_millis(50)));
    let err = assembler(driver)
        .with_book_timeout(Duration::from_millis(20))
        .assemble("english", "")
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        GenerationErrorKind::Timeout { ref scope, .. } if scope == "book"
    ));
}

#[tokio::test]
async fn slow_call_times_out_with_session_scope() {
    let driver = Arc::new(MockDriver::echo().delayed(|_| Duration::from_millis(200)));
    let session = GenerationSession::new(driver).with_request_timeout(Duration::from_millis(10));
    let err = session
        .send("persona", "title_english", "prompt")
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        GenerationErrorKind::Timeout { ref scope, .. } if scope == "title_english"
    ));
}

#[tokio::test]
async fn blank_completion_is_an_error() {
    let driver = Arc::new(MockDriver::with_responder(|_| Ok("   ".to_string())));
    let err = GenerationSession::new(driver)
        .send("persona", "toc_english", "prompt")
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        GenerationErrorKind::EmptyResponse("toc_english".to_string())
    );
}

#[tokio::test]
async fn session_model_override_is_sent() {
    let driver = Arc::new(MockDriver::echo());
    let session = GenerationSession::new(driver.clone()).with_model("gpt-4o-mini");
    assert_eq!(session.model_name(), "gpt-4o-mini");
    session.send("persona", "title_english", "prompt").await.unwrap();
    let requests = driver.requests();
    assert_eq!(requests[0].model().as_deref(), Some("gpt-4o-mini"));
}

#[tokio::test]
async fn single_chapter_uses_chapter_session() {
    let driver = Arc::new(MockDriver::echo());
    let text = assembler(driver.clone())
        .generate_chapter("tamil", 4, "Containers: Docker Ka Jadoo", 6, "")
        .await
        .unwrap();

    assert_eq!(text, "text for chapter_4_tamil");
    let requests = driver.requests();
    let prompt = &requests[0].messages()[1].content;
    assert!(prompt.contains("Generate Chapter 4: Containers: Docker Ka Jadoo"));
    assert!(prompt.contains("approximately 6 pages"));
}

#[tokio::test]
async fn assembly_can_run_on_a_spawned_task() {
    let driver = Arc::new(MockDriver::echo());
    let assembler = Arc::new(assembler(driver.clone()).with_chapter_concurrency(3));
    let observer = Arc::new(RecordingObserver::default());

    let task = {
        let assembler = assembler.clone();
        let observer = observer.clone();
        tokio::spawn(async move {
            let reference = String::from("shared notes");
            assembler
                .assemble_with(Uuid::new_v4(), "english", &reference, observer.as_ref())
                .await
        })
    };

    let book = task.await.unwrap().unwrap();
    assert_eq!(book.chapters.len(), 13);
    assert_eq!(observer.steps.lock().unwrap().len(), TOTAL_STEPS + 2);
}
