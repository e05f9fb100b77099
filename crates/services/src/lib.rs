#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_service;
pub mod quiz;

pub use study_core::Clock;

pub use app_services::{AppServices, MEMORY_DB_URL};
pub use error::{AppServicesError, QuizError};
pub use progress_service::ProgressService;
pub use quiz::{QuestionResult, QuizAnswerResult, QuizLoopService, QuizProgress, QuizRun};
