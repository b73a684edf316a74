//! Full book assembly.

use crate::GenerationSession;
use crate::prompts::{
    chapter_prompt, chapter_session_key, title_prompt, title_session_key, toc_prompt,
    toc_session_key,
};
use bollybook_core::{BookArtifact, CURRICULUM, Chapter, LanguageProfile, SYLLABUS, resolve};
use bollybook_error::{GenerationError, GenerationErrorKind};
use bollybook_interface::{AssemblyObserver, AssemblyStep, NoopObserver};
use futures::StreamExt;
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

/// Page target used for on-demand chapters when the caller gives none.
pub const DEFAULT_CHAPTER_PAGES: u32 = 5;

/// Steps reported per book: title page, table of contents, each chapter.
pub const TOTAL_STEPS: usize = CURRICULUM.len() + 2;

/// Builds complete books from the fixed curriculum.
///
/// Generation runs title page, then table of contents, then the chapters.
/// Chapters may be generated several at a time but always come back in
/// curriculum order. The first failure aborts the whole book.
#[derive(Debug, Clone)]
pub struct BookAssembler {
    session: GenerationSession,
    chapter_concurrency: usize,
    book_timeout: Option<Duration>,
}

impl BookAssembler {
    /// Create an assembler that generates one chapter at a time.
    pub fn new(session: GenerationSession) -> Self {
        Self {
            session,
            chapter_concurrency: 1,
            book_timeout: None,
        }
    }

    /// Allow up to `limit` chapter calls in flight. Zero is treated as one.
    pub fn with_chapter_concurrency(mut self, limit: usize) -> Self {
        self.chapter_concurrency = limit.max(1);
        self
    }

    /// Abandon the whole book if it takes longer than `timeout`.
    pub fn with_book_timeout(mut self, timeout: Duration) -> Self {
        self.book_timeout = Some(timeout);
        self
    }

    /// The underlying generation session.
    pub fn session(&self) -> &GenerationSession {
        &self.session
    }

    /// Assemble a book under a fresh id without progress reporting.
    pub async fn assemble(
        &self,
        language_code: &str,
        reference_text: &str,
    ) -> Result<BookArtifact, GenerationError> {
        self.assemble_with(Uuid::new_v4(), language_code, reference_text, &NoopObserver)
            .await
    }

    /// Assemble a book under `book_id`, reporting each finished step.
    ///
    /// # Errors
    ///
    /// The first generation failure, a book-level
    /// [`GenerationErrorKind::Timeout`], or an
    /// [`GenerationErrorKind::Assembly`] error if the result fails validation.
    #[instrument(skip(self, reference_text, observer), fields(reference_chars = reference_text.len()))]
    pub async fn assemble_with(
        &self,
        book_id: Uuid,
        language_code: &str,
        reference_text: &str,
        observer: &dyn AssemblyObserver,
    ) -> Result<BookArtifact, GenerationError> {
        let profile = resolve(language_code);
        tracing::info!(language = profile.code, "Starting book assembly");

        let work = self.run(book_id, profile, reference_text, observer);
        let book = match self.book_timeout {
            Some(limit) => tokio::time::timeout(limit, work).await.map_err(|_| {
                tracing::error!(seconds = limit.as_secs(), "Book assembly timed out");
                GenerationError::new(GenerationErrorKind::Timeout {
                    scope: "book".to_string(),
                    seconds: limit.as_secs(),
                })
            })??,
            None => work.await?,
        };

        tracing::info!(chapters = book.chapters.len(), "Book assembly completed");
        Ok(book)
    }

    async fn run(
        &self,
        book_id: Uuid,
        profile: &'static LanguageProfile,
        reference_text: &str,
        observer: &dyn AssemblyObserver,
    ) -> Result<BookArtifact, GenerationError> {
        let persona = profile.persona_instruction;
        let mut completed = 0;
        observer.on_step(AssemblyStep::Started, completed, TOTAL_STEPS).await;

        let title_page = self
            .session
            .send(persona, &title_session_key(profile), &title_prompt(profile))
            .await?;
        completed += 1;
        observer.on_step(AssemblyStep::TitleGenerated, completed, TOTAL_STEPS).await;

        let table_of_contents = self
            .session
            .send(
                persona,
                &toc_session_key(profile),
                &toc_prompt(profile, &SYLLABUS, reference_text),
            )
            .await?;
        completed += 1;
        observer.on_step(AssemblyStep::TocGenerated, completed, TOTAL_STEPS).await;

        // Must be a Vec: a lazily mapped iterator makes the book future !Send
        let chapter_calls: Vec<_> = CURRICULUM
            .iter()
            .map(|plan| async move {
                let content = self
                    .session
                    .send(
                        persona,
                        &chapter_session_key(profile, plan.number),
                        &chapter_prompt(
                            profile,
                            plan.number,
                            plan.title,
                            plan.target_pages,
                            reference_text,
                        ),
                    )
                    .await?;
                Ok::<_, GenerationError>(Chapter {
                    number: plan.number,
                    title: plan.title.to_string(),
                    target_pages: plan.target_pages,
                    content,
                })
            })
            .collect();
        let mut pending =
            std::pin::pin!(futures::stream::iter(chapter_calls).buffered(self.chapter_concurrency));

        let mut chapters = Vec::with_capacity(CURRICULUM.len());
        while let Some(chapter) = pending.next().await {
            let chapter = chapter?;
            completed += 1;
            tracing::debug!(number = chapter.number, "Chapter generated");
            observer
                .on_step(AssemblyStep::ChapterGenerated(chapter.number), completed, TOTAL_STEPS)
                .await;
            chapters.push(chapter);
        }

        let book = BookArtifact {
            book_id,
            language: profile.code.to_string(),
            title_page,
            table_of_contents,
            chapters,
        };
        book.validate()?;
        observer.on_step(AssemblyStep::Completed, completed, TOTAL_STEPS).await;
        Ok(book)
    }

    /// Generate one chapter outside a full book.
    #[instrument(skip(self, reference_text))]
    pub async fn generate_chapter(
        &self,
        language_code: &str,
        number: u32,
        title: &str,
        target_pages: u32,
        reference_text: &str,
    ) -> Result<String, GenerationError> {
        let profile = resolve(language_code);
        self.session
            .send(
                profile.persona_instruction,
                &chapter_session_key(profile, number),
                &chapter_prompt(profile, number, title, target_pages, reference_text),
            )
            .await
    }
}
