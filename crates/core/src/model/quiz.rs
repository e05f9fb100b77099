use serde::{Deserialize, Serialize};

use crate::model::ids::{ModuleId, QuestionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    Mcq,
    ShortAnswer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// The authored correct answer: an option index for multiple choice, or the
/// expected text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Index(usize),
    Text(String),
}

/// What the learner submitted for a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizAnswer {
    Option(usize),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub module_id: ModuleId,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: CorrectAnswer,
    pub explanation: String,
    pub difficulty: Difficulty,
}

impl QuizQuestion {
    /// Grades a submitted answer.
    ///
    /// Text comparisons ignore surrounding whitespace and letter case. An
    /// option index answered against a text key is compared through the
    /// option's label.
    #[must_use]
    pub fn is_correct(&self, answer: &QuizAnswer) -> bool {
        match (&self.correct_answer, answer) {
            (CorrectAnswer::Index(expected), QuizAnswer::Option(given)) => expected == given,
            (CorrectAnswer::Index(expected), QuizAnswer::Text(given)) => self
                .options
                .get(*expected)
                .is_some_and(|label| same_text(label, given)),
            (CorrectAnswer::Text(expected), QuizAnswer::Text(given)) => same_text(expected, given),
            (CorrectAnswer::Text(expected), QuizAnswer::Option(given)) => self
                .options
                .get(*given)
                .is_some_and(|label| same_text(label, expected)),
        }
    }
}

fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
