mod exhibits;
mod flashcard;
mod glossary;
mod ids;
mod module;
mod parse;
mod path;
mod quiz;
mod source;
mod timeline;

pub use ids::{
    EventId, FlashcardId, GlossaryTermId, MapId, ModuleId, MuseumItemId, PathId, QuestionId,
    SiteId, SourceId, StudyCardId, VideoId,
};
pub use parse::ParseKindError;

pub use exhibits::{
    HistoricalMap, MapCategory, MuseumItem, MuseumItemKind, Nation, NormandySite, SiteKind,
    VideoCategory, YouTubeVideo,
};
pub use flashcard::{Confidence, Flashcard, FlashcardCategory};
pub use glossary::GlossaryTerm;
pub use module::{ImageItem, Module, StudyCard, VideoItem};
pub use path::LearningPath;
pub use quiz::{CorrectAnswer, Difficulty, QuestionKind, QuizAnswer, QuizQuestion};
pub use source::{Source, SourceKind};
pub use timeline::{Importance, TimelineCategory, TimelineEvent};
