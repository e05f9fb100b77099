use serde::{Deserialize, Serialize};

use crate::model::ids::{GlossaryTermId, ModuleId, QuestionId, SourceId, StudyCardId};

/// Illustration attached to a module, card or timeline event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageItem {
    pub url: String,
    pub caption: String,
    pub credit: String,
    pub source_link: String,
    pub alt: String,
}

/// External video reference embedded in a module or card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub title: String,
    pub channel: String,
    pub url: String,
    pub relevance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Atomic unit of reading inside a module; the learner marks these as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyCard {
    pub id: StudyCardId,
    pub title: String,
    pub content: String,
    /// Alternate viewpoint shown when the French perspective preference is on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub french_perspective: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourceId>,
    #[serde(default)]
    pub images: Vec<ImageItem>,
    #[serde(default)]
    pub videos: Vec<VideoItem>,
}

/// Ordered lesson unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: ModuleId,
    pub number: u32,
    pub title: String,
    pub subtitle: String,
    pub overview: String,
    #[serde(default)]
    pub key_ideas: Vec<String>,
    #[serde(default)]
    pub cards: Vec<StudyCard>,
    #[serde(default)]
    pub glossary_terms: Vec<GlossaryTermId>,
    #[serde(default)]
    pub images: Vec<ImageItem>,
    #[serde(default)]
    pub videos: Vec<VideoItem>,
    #[serde(default)]
    pub quiz_questions: Vec<QuestionId>,
    pub estimated_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub french_highlights: Option<Vec<String>>,
}

impl Module {
    /// Finds a card of this module by id.
    #[must_use]
    pub fn card(&self, card_id: &str) -> Option<&StudyCard> {
        self.cards.iter().find(|card| card.id == card_id)
    }
}
