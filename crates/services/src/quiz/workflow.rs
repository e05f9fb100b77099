use std::sync::Arc;

use study_core::ContentCatalog;
use study_core::model::QuizAnswer;
use study_core::progress::QuizAttempt;
use tracing::info;

use super::run::{QuestionResult, QuizRun};
use crate::Clock;
use crate::error::QuizError;
use crate::progress_service::ProgressService;

/// Result of answering a single question in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAnswerResult {
    pub result: QuestionResult,
    pub is_complete: bool,
    /// Set on the answer that completed the run, once recorded.
    pub attempt: Option<QuizAttempt>,
}

/// Starts quiz runs from the catalog and records finished attempts.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    catalog: Arc<ContentCatalog>,
    progress: Arc<ProgressService>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<ContentCatalog>, progress: Arc<ProgressService>) -> Self {
        Self {
            clock,
            catalog,
            progress,
        }
    }

    /// # Errors
    ///
    /// Returns `QuizError::Empty` if the module has no questions.
    pub fn start_quiz(&self, module_id: &str) -> Result<QuizRun, QuizError> {
        QuizRun::from_catalog(&self.catalog, module_id, self.clock.now())
    }

    /// Grade the current question; the answer that completes the run also
    /// records the attempt.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` if the run is already finished.
    pub async fn answer_current(
        &self,
        run: &mut QuizRun,
        answer: &QuizAnswer,
    ) -> Result<QuizAnswerResult, QuizError> {
        let result = run.answer_current(answer, self.clock.now())?.clone();
        if !run.is_complete() {
            return Ok(QuizAnswerResult {
                result,
                is_complete: false,
                attempt: None,
            });
        }

        let attempt = run.to_attempt()?;
        info!(
            quiz = %attempt.quiz_id,
            score = attempt.score,
            total = attempt.total_questions,
            "quiz finished"
        );
        self.progress.record_quiz_attempt(attempt.clone()).await;
        Ok(QuizAnswerResult {
            result,
            is_complete: true,
            attempt: Some(attempt),
        })
    }
}
