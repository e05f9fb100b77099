use chrono::{DateTime, Utc};
use study_core::ContentCatalog;
use study_core::model::{ModuleId, QuestionId, QuizAnswer, QuizQuestion};
use study_core::progress::QuizAttempt;

use super::progress::QuizProgress;
use crate::error::QuizError;

/// Outcome of a single graded answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResult {
    pub question_id: QuestionId,
    pub correct: bool,
}

/// In-memory run over one module's questions, in catalog order.
///
/// Grading lives here; the progress store only records the finished attempt.
#[derive(Debug, Clone)]
pub struct QuizRun {
    module_id: ModuleId,
    questions: Vec<QuizQuestion>,
    current: usize,
    results: Vec<QuestionResult>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizRun {
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if there are no questions.
    pub fn new(
        module_id: ModuleId,
        questions: Vec<QuizQuestion>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty(module_id));
        }
        Ok(Self {
            module_id,
            questions,
            current: 0,
            results: Vec::new(),
            started_at,
            completed_at: None,
        })
    }

    /// Start a run over every question the catalog holds for `module_id`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if the module has no questions.
    pub fn from_catalog(
        catalog: &ContentCatalog,
        module_id: &str,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        let questions = catalog
            .get_quiz_questions_for_module(module_id)
            .into_iter()
            .cloned()
            .collect();
        Self::new(ModuleId::new(module_id), questions, started_at)
    }

    #[must_use]
    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    /// Identifier stored on the recorded attempt.
    #[must_use]
    pub fn quiz_id(&self) -> String {
        format!("quiz-{}", self.module_id)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.correct).count()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.questions.len(),
            answered: self.results.len(),
            remaining: self.questions.len().saturating_sub(self.current),
            correct: self.correct_count(),
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Grade `answer` against the current question and advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` if every question was already answered.
    pub fn answer_current(
        &mut self,
        answer: &QuizAnswer,
        answered_at: DateTime<Utc>,
    ) -> Result<&QuestionResult, QuizError> {
        let Some(question) = self.questions.get(self.current) else {
            return Err(QuizError::Completed);
        };
        let result = QuestionResult {
            question_id: question.id.clone(),
            correct: question.is_correct(answer),
        };
        self.results.push(result);

        self.current += 1;
        if self.current >= self.questions.len() {
            self.completed_at = Some(answered_at);
        }

        self.results.last().ok_or(QuizError::Completed)
    }

    /// Build the attempt to record once the run is complete.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Incomplete` while questions remain.
    pub fn to_attempt(&self) -> Result<QuizAttempt, QuizError> {
        let Some(date) = self.completed_at else {
            return Err(QuizError::Incomplete);
        };
        Ok(QuizAttempt {
            quiz_id: self.quiz_id(),
            module_id: self.module_id.clone(),
            date,
            score: to_u32(self.correct_count()),
            total_questions: to_u32(self.questions.len()),
            incorrect_questions: self
                .results
                .iter()
                .filter(|r| !r.correct)
                .map(|r| r.question_id.clone())
                .collect(),
        })
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
