//! Module quizzes: stepping through questions and recording the attempt.

mod progress;
mod run;
mod workflow;

pub use progress::QuizProgress;
pub use run::{QuestionResult, QuizRun};
pub use workflow::{QuizAnswerResult, QuizLoopService};
