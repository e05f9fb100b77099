//! The learner's progress aggregate and its persisted document format.

mod bookmark;
mod entity;
mod metrics;
mod snapshot;

pub use bookmark::{Bookmark, BookmarkDraft, BookmarkKind};
pub use entity::{FlashcardState, Progress, QuizAttempt};
pub use metrics::{ASSUMED_CARDS_PER_MODULE, TOTAL_MODULE_COUNT, module_percentage, total_percentage};
pub use snapshot::{DecodeReport, decode, encode};

/// Storage slot holding the serialized progress document.
pub const PROGRESS_SLOT_KEY: &str = "overlord-study-progress";
