//! Read-only index over the study content.
//!
//! The catalog is built once from a [`ContentBundle`] and never changes
//! afterwards. Lookups are fail-soft: an unknown id yields `None` or an empty
//! list, never an error. The only fallible query is
//! [`ContentCatalog::get_timeline_events_by_date_range`], whose bounds are
//! caller input.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    Flashcard, FlashcardCategory, GlossaryTerm, HistoricalMap, LearningPath, MapCategory, Module,
    MuseumItem, MuseumItemKind, Nation, NormandySite, QuizQuestion, SiteKind, Source, SourceKind,
    StudyCard, TimelineCategory, TimelineEvent, VideoCategory, YouTubeVideo,
};
use crate::time::parse_date_or_timestamp;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate {collection} id: {id}")]
    DuplicateId {
        collection: &'static str,
        id: String,
    },

    #[error("duplicate module number: {0}")]
    DuplicateModuleNumber(u32),

    #[error("timeline event {id} has an unreadable date: {date:?}")]
    InvalidTimelineDate { id: String, date: String },

    #[error("invalid {bound} date bound: {raw:?}")]
    InvalidDateBound { bound: &'static str, raw: String },
}

//
// ─── BUNDLE ────────────────────────────────────────────────────────────────────
//

/// Raw content collections as authored, before indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentBundle {
    pub modules: Vec<Module>,
    pub timeline: Vec<TimelineEvent>,
    pub glossary: Vec<GlossaryTerm>,
    pub quiz_bank: Vec<QuizQuestion>,
    pub sources: Vec<Source>,
    pub flashcards: Vec<Flashcard>,
    pub learning_paths: Vec<LearningPath>,
    pub sites: Vec<NormandySite>,
    pub museum_items: Vec<MuseumItem>,
    pub maps: Vec<HistoricalMap>,
    pub videos: Vec<YouTubeVideo>,
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct ContentCatalog {
    bundle: ContentBundle,
    module_index: HashMap<String, usize>,
    glossary_index: HashMap<String, usize>,
    event_index: HashMap<String, usize>,
    source_index: HashMap<String, usize>,
    path_index: HashMap<String, usize>,
    /// Parsed `timeline[i].date`, same order as the timeline.
    event_dates: Vec<DateTime<Utc>>,
}

impl ContentCatalog {
    /// Index a content bundle.
    ///
    /// Modules are kept in ascending `number` order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a collection repeats an id, two modules share
    /// a number, or a timeline event's date cannot be parsed.
    pub fn new(mut bundle: ContentBundle) -> Result<Self, CatalogError> {
        bundle.modules.sort_by_key(|m| m.number);

        let mut numbers = HashSet::new();
        for module in &bundle.modules {
            if !numbers.insert(module.number) {
                return Err(CatalogError::DuplicateModuleNumber(module.number));
            }
        }

        let module_index = index_by("module", &bundle.modules, |m| m.id.as_str())?;
        let glossary_index = index_by("glossary", &bundle.glossary, |g| g.id.as_str())?;
        let event_index = index_by("timeline", &bundle.timeline, |e| e.id.as_str())?;
        let source_index = index_by("source", &bundle.sources, |s| s.id.as_str())?;
        let path_index = index_by("learning path", &bundle.learning_paths, |p| p.id.as_str())?;
        index_by("quiz question", &bundle.quiz_bank, |q| q.id.as_str())?;
        index_by("flashcard", &bundle.flashcards, |f| f.id.as_str())?;

        let event_dates = bundle
            .timeline
            .iter()
            .map(|event| {
                parse_date_or_timestamp(&event.date).ok_or_else(|| {
                    CatalogError::InvalidTimelineDate {
                        id: event.id.to_string(),
                        date: event.date.clone(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            bundle,
            module_index,
            glossary_index,
            event_index,
            source_index,
            path_index,
            event_dates,
        })
    }

    /// Catalog with no content at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bundle: ContentBundle::default(),
            module_index: HashMap::new(),
            glossary_index: HashMap::new(),
            event_index: HashMap::new(),
            source_index: HashMap::new(),
            path_index: HashMap::new(),
            event_dates: Vec::new(),
        }
    }

    // ── collections ──

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.bundle.modules
    }

    #[must_use]
    pub fn timeline(&self) -> &[TimelineEvent] {
        &self.bundle.timeline
    }

    #[must_use]
    pub fn glossary(&self) -> &[GlossaryTerm] {
        &self.bundle.glossary
    }

    #[must_use]
    pub fn quiz_bank(&self) -> &[QuizQuestion] {
        &self.bundle.quiz_bank
    }

    #[must_use]
    pub fn flashcards(&self) -> &[Flashcard] {
        &self.bundle.flashcards
    }

    #[must_use]
    pub fn learning_paths(&self) -> &[LearningPath] {
        &self.bundle.learning_paths
    }

    #[must_use]
    pub fn sources(&self) -> &[Source] {
        &self.bundle.sources
    }

    #[must_use]
    pub fn sites(&self) -> &[NormandySite] {
        &self.bundle.sites
    }

    #[must_use]
    pub fn museum_items(&self) -> &[MuseumItem] {
        &self.bundle.museum_items
    }

    #[must_use]
    pub fn maps(&self) -> &[HistoricalMap] {
        &self.bundle.maps
    }

    #[must_use]
    pub fn videos(&self) -> &[YouTubeVideo] {
        &self.bundle.videos
    }

    // ── modules ──

    #[must_use]
    pub fn get_module_by_id(&self, id: &str) -> Option<&Module> {
        self.module_index.get(id).map(|&i| &self.bundle.modules[i])
    }

    #[must_use]
    pub fn get_module_by_number(&self, number: u32) -> Option<&Module> {
        self.bundle.modules.iter().find(|m| m.number == number)
    }

    #[must_use]
    pub fn get_study_card(&self, module_id: &str, card_id: &str) -> Option<&StudyCard> {
        self.get_module_by_id(module_id)
            .and_then(|module| module.card(card_id))
    }

    /// Resolves the module's glossary term ids, skipping unknown ones.
    #[must_use]
    pub fn get_glossary_terms_for_module(&self, module_id: &str) -> Vec<&GlossaryTerm> {
        self.get_module_by_id(module_id)
            .map(|module| {
                module
                    .glossary_terms
                    .iter()
                    .filter_map(|id| self.get_glossary_term(id.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ── glossary ──

    #[must_use]
    pub fn get_glossary_term(&self, id: &str) -> Option<&GlossaryTerm> {
        self.glossary_index.get(id).map(|&i| &self.bundle.glossary[i])
    }

    /// Case-insensitive exact match on the term text.
    #[must_use]
    pub fn get_glossary_term_by_name(&self, name: &str) -> Option<&GlossaryTerm> {
        let wanted = name.to_lowercase();
        self.bundle
            .glossary
            .iter()
            .find(|g| g.term.to_lowercase() == wanted)
    }

    /// Case-insensitive substring match over term and definition.
    #[must_use]
    pub fn search_glossary(&self, query: &str) -> Vec<&GlossaryTerm> {
        let query = query.to_lowercase();
        self.bundle
            .glossary
            .iter()
            .filter(|g| {
                g.term.to_lowercase().contains(&query)
                    || g.definition.to_lowercase().contains(&query)
            })
            .collect()
    }

    // ── quizzes ──

    /// Questions for a module in catalog order.
    #[must_use]
    pub fn get_quiz_questions_for_module(&self, module_id: &str) -> Vec<&QuizQuestion> {
        self.bundle
            .quiz_bank
            .iter()
            .filter(|q| q.module_id == module_id)
            .collect()
    }

    // ── timeline ──

    #[must_use]
    pub fn get_timeline_event(&self, id: &str) -> Option<&TimelineEvent> {
        self.event_index.get(id).map(|&i| &self.bundle.timeline[i])
    }

    #[must_use]
    pub fn get_timeline_events_by_category(
        &self,
        category: TimelineCategory,
    ) -> Vec<&TimelineEvent> {
        self.bundle
            .timeline
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Events dated within `[start, end]`, oldest first.
    ///
    /// Bounds accept `YYYY-MM-DD` or RFC 3339. Events sharing a date keep
    /// catalog order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidDateBound` if either bound cannot be parsed.
    pub fn get_timeline_events_by_date_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<&TimelineEvent>, CatalogError> {
        let start = parse_bound("start", start)?;
        let end = parse_bound("end", end)?;

        let mut hits: Vec<(DateTime<Utc>, &TimelineEvent)> = self
            .event_dates
            .iter()
            .zip(&self.bundle.timeline)
            .filter(|(date, _)| **date >= start && **date <= end)
            .map(|(date, event)| (*date, event))
            .collect();
        hits.sort_by_key(|(date, _)| *date);

        Ok(hits.into_iter().map(|(_, event)| event).collect())
    }

    /// Case-insensitive substring match over title and description.
    #[must_use]
    pub fn search_timeline(&self, query: &str) -> Vec<&TimelineEvent> {
        let query = query.to_lowercase();
        self.bundle
            .timeline
            .iter()
            .filter(|e| {
                e.title.to_lowercase().contains(&query)
                    || e.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Modules an event points at; dangling ids are dropped.
    #[must_use]
    pub fn get_related_modules_for_event(&self, event_id: &str) -> Vec<&Module> {
        self.get_timeline_event(event_id)
            .map(|event| {
                event
                    .related_modules
                    .iter()
                    .filter_map(|id| self.get_module_by_id(id.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ── sources & paths ──

    #[must_use]
    pub fn get_source_by_id(&self, id: &str) -> Option<&Source> {
        self.source_index.get(id).map(|&i| &self.bundle.sources[i])
    }

    #[must_use]
    pub fn get_learning_path_by_id(&self, id: &str) -> Option<&LearningPath> {
        self.path_index
            .get(id)
            .map(|&i| &self.bundle.learning_paths[i])
    }

    /// Modules of a learning path in path order; dangling ids are dropped.
    #[must_use]
    pub fn get_modules_for_path(&self, path_id: &str) -> Vec<&Module> {
        self.get_learning_path_by_id(path_id)
            .map(|path| {
                path.modules
                    .iter()
                    .filter_map(|id| self.get_module_by_id(id.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sources grouped by kind in display order; empty groups are omitted.
    #[must_use]
    pub fn sources_by_type(&self) -> Vec<(SourceKind, Vec<&Source>)> {
        SourceKind::DISPLAY_ORDER
            .into_iter()
            .map(|kind| {
                let group: Vec<_> = self.bundle.sources.iter().filter(|s| s.kind == kind).collect();
                (kind, group)
            })
            .filter(|(_, group)| !group.is_empty())
            .collect()
    }

    // ── flashcards ──

    #[must_use]
    pub fn get_flashcards_by_category(&self, category: FlashcardCategory) -> Vec<&Flashcard> {
        self.bundle
            .flashcards
            .iter()
            .filter(|f| f.category == category)
            .collect()
    }

    #[must_use]
    pub fn get_flashcards_for_module(&self, module_id: &str) -> Vec<&Flashcard> {
        self.bundle
            .flashcards
            .iter()
            .filter(|f| f.module_id.as_ref().is_some_and(|id| id == module_id))
            .collect()
    }

    // ── exhibits ──

    /// Sites grouped by kind in display order; empty groups are omitted.
    #[must_use]
    pub fn sites_by_type(&self) -> Vec<(SiteKind, Vec<&NormandySite>)> {
        SiteKind::DISPLAY_ORDER
            .into_iter()
            .map(|kind| {
                let group: Vec<_> = self.bundle.sites.iter().filter(|s| s.kind == kind).collect();
                (kind, group)
            })
            .filter(|(_, group)| !group.is_empty())
            .collect()
    }

    /// Museum items matching both filters; `None` matches everything.
    #[must_use]
    pub fn filter_museum_items(
        &self,
        kind: Option<MuseumItemKind>,
        nation: Option<Nation>,
    ) -> Vec<&MuseumItem> {
        self.bundle
            .museum_items
            .iter()
            .filter(|item| kind.is_none_or(|k| item.kind == k))
            .filter(|item| nation.is_none_or(|n| item.nation == n))
            .collect()
    }

    #[must_use]
    pub fn get_maps_by_category(&self, category: Option<MapCategory>) -> Vec<&HistoricalMap> {
        self.bundle
            .maps
            .iter()
            .filter(|map| category.is_none_or(|c| map.category == c))
            .collect()
    }

    #[must_use]
    pub fn filter_videos(
        &self,
        category: Option<VideoCategory>,
        recommended_only: bool,
    ) -> Vec<&YouTubeVideo> {
        self.bundle
            .videos
            .iter()
            .filter(|video| category.is_none_or(|c| video.category == c))
            .filter(|video| !recommended_only || video.recommended)
            .collect()
    }
}

fn parse_bound(bound: &'static str, raw: &str) -> Result<DateTime<Utc>, CatalogError> {
    parse_date_or_timestamp(raw).ok_or_else(|| CatalogError::InvalidDateBound {
        bound,
        raw: raw.to_owned(),
    })
}

fn index_by<T>(
    collection: &'static str,
    items: &[T],
    key: impl Fn(&T) -> &str,
) -> Result<HashMap<String, usize>, CatalogError> {
    let mut index = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let id = key(item);
        if index.insert(id.to_owned(), i).is_some() {
            return Err(CatalogError::DuplicateId {
                collection,
                id: id.to_owned(),
            });
        }
    }
    Ok(index)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CorrectAnswer, Difficulty, EventId, FlashcardId, GlossaryTermId, Importance, MapId,
        ModuleId, MuseumItemId, PathId, QuestionId, QuestionKind, SiteId, SourceId, StudyCardId,
        VideoId,
    };

    fn card(id: &str) -> StudyCard {
        StudyCard {
            id: StudyCardId::new(id),
            title: format!("Card {id}"),
            content: "Body".into(),
            french_perspective: None,
            sources: vec![],
            images: vec![],
            videos: vec![],
        }
    }

    fn module(id: &str, number: u32, glossary: &[&str]) -> Module {
        Module {
            id: ModuleId::new(id),
            number,
            title: format!("Module {number}"),
            subtitle: String::new(),
            overview: String::new(),
            key_ideas: vec![],
            cards: vec![card(&format!("{id}-c1")), card(&format!("{id}-c2"))],
            glossary_terms: glossary.iter().map(|g| GlossaryTermId::new(*g)).collect(),
            images: vec![],
            videos: vec![],
            quiz_questions: vec![],
            estimated_time: "15 min".into(),
            french_highlights: None,
        }
    }

    fn event(id: &str, date: &str, category: TimelineCategory, related: &[&str]) -> TimelineEvent {
        TimelineEvent {
            id: EventId::new(id),
            date: date.into(),
            time: None,
            title: format!("Event {id}"),
            description: format!("What happened at {id}"),
            category,
            location: None,
            related_modules: related.iter().map(|m| ModuleId::new(*m)).collect(),
            images: vec![],
            importance: Importance::Major,
        }
    }

    fn term(id: &str, term: &str, definition: &str) -> GlossaryTerm {
        GlossaryTerm {
            id: GlossaryTermId::new(id),
            term: term.into(),
            definition: definition.into(),
            related_modules: vec![],
        }
    }

    fn question(id: &str, module_id: &str) -> QuizQuestion {
        QuizQuestion {
            id: QuestionId::new(id),
            module_id: ModuleId::new(module_id),
            kind: QuestionKind::Mcq,
            question: "?".into(),
            options: vec!["a".into(), "b".into()],
            correct_answer: CorrectAnswer::Index(0),
            explanation: String::new(),
            difficulty: Difficulty::Medium,
        }
    }

    fn bundle() -> ContentBundle {
        ContentBundle {
            modules: vec![module("m2", 2, &[]), module("m1", 1, &["g-mulberry", "g-gone"])],
            timeline: vec![
                event("e-utah", "1944-06-06", TimelineCategory::Beach, &["m2"]),
                event("e-pegasus", "1944-06-06T00:16:00Z", TimelineCategory::Airborne, &["m1", "m99"]),
                event("e-cherbourg", "1944-06-29", TimelineCategory::Command, &[]),
                event("e-weather", "1944-06-04", TimelineCategory::Command, &["m1"]),
            ],
            glossary: vec![
                term("g-mulberry", "Mulberry", "Temporary portable harbour."),
                term("g-atlantic", "Atlantic Wall", "German coastal fortifications."),
            ],
            quiz_bank: vec![question("q1", "m1"), question("q2", "m2"), question("q3", "m1")],
            sources: vec![
                Source {
                    id: SourceId::new("s-doc"),
                    kind: SourceKind::Documentary,
                    title: "Doc".into(),
                    author: None,
                    publisher: None,
                    year: None,
                    url: None,
                    access_date: None,
                    description: String::new(),
                },
                Source {
                    id: SourceId::new("s-book"),
                    kind: SourceKind::Book,
                    title: "Book".into(),
                    author: Some("Beevor".into()),
                    publisher: None,
                    year: Some("2009".into()),
                    url: None,
                    access_date: None,
                    description: String::new(),
                },
            ],
            flashcards: vec![
                Flashcard {
                    id: FlashcardId::new("f1"),
                    front: "D-Day".into(),
                    back: "6 June 1944".into(),
                    category: FlashcardCategory::Date,
                    module_id: Some(ModuleId::new("m1")),
                },
                Flashcard {
                    id: FlashcardId::new("f2"),
                    front: "Rommel".into(),
                    back: "Army Group B".into(),
                    category: FlashcardCategory::Person,
                    module_id: None,
                },
            ],
            learning_paths: vec![LearningPath {
                id: PathId::new("quick"),
                name: "Quick tour".into(),
                description: String::new(),
                estimated_time: "1 h".into(),
                modules: vec![ModuleId::new("m2"), ModuleId::new("missing"), ModuleId::new("m1")],
                focus_areas: vec![],
            }],
            sites: vec![
                NormandySite {
                    id: SiteId::new("cemetery"),
                    name: "Normandy American Cemetery".into(),
                    kind: SiteKind::Cemetery,
                    location: "Colleville".into(),
                    description: String::new(),
                    what_it_teaches: String::new(),
                    visit_tips: None,
                    website: None,
                },
                NormandySite {
                    id: SiteId::new("omaha"),
                    name: "Omaha Beach".into(),
                    kind: SiteKind::Beach,
                    location: "Vierville".into(),
                    description: String::new(),
                    what_it_teaches: String::new(),
                    visit_tips: None,
                    website: None,
                },
            ],
            museum_items: vec![
                museum_item("sherman", MuseumItemKind::Tank, Nation::Allied),
                museum_item("panzer-iv", MuseumItemKind::Tank, Nation::Axis),
                museum_item("spitfire", MuseumItemKind::Aircraft, Nation::Allied),
            ],
            maps: vec![HistoricalMap {
                id: MapId::new("overview"),
                title: "Overview".into(),
                description: String::new(),
                image: String::new(),
                credit: String::new(),
                category: MapCategory::Overview,
                related_modules: vec![],
            }],
            videos: vec![
                video("v1", VideoCategory::AnimatedOverview, true),
                video("v2", VideoCategory::AnimatedOverview, false),
                video("v3", VideoCategory::Planning, true),
            ],
        }
    }

    fn museum_item(id: &str, kind: MuseumItemKind, nation: Nation) -> MuseumItem {
        MuseumItem {
            id: MuseumItemId::new(id),
            name: id.into(),
            kind,
            nation,
            country: String::new(),
            description: String::new(),
            specifications: Default::default(),
            d_day_role: String::new(),
            image: String::new(),
            image_credit: String::new(),
        }
    }

    fn video(id: &str, category: VideoCategory, recommended: bool) -> YouTubeVideo {
        YouTubeVideo {
            id: VideoId::new(id),
            title: id.into(),
            channel: String::new(),
            url: String::new(),
            thumbnail: String::new(),
            duration: "10:00".into(),
            category,
            description: String::new(),
            related_modules: vec![],
            recommended,
        }
    }

    fn catalog() -> ContentCatalog {
        ContentCatalog::new(bundle()).unwrap()
    }

    #[test]
    fn modules_are_ordered_by_number_and_found_by_id_or_number() {
        let catalog = catalog();
        let ids: Vec<_> = catalog.modules().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["m1", "m2"]);
        assert_eq!(catalog.get_module_by_id("m2").map(|m| m.number), Some(2));
        assert_eq!(catalog.get_module_by_number(1).map(|m| m.id.as_str()), Some("m1"));
        assert!(catalog.get_module_by_id("m9").is_none());
        assert!(catalog.get_module_by_number(9).is_none());
    }

    #[test]
    fn study_card_lookup_goes_through_module() {
        let catalog = catalog();
        assert!(catalog.get_study_card("m1", "m1-c2").is_some());
        assert!(catalog.get_study_card("m1", "m2-c1").is_none());
        assert!(catalog.get_study_card("m9", "m1-c1").is_none());
    }

    #[test]
    fn glossary_lookup_by_name_is_case_insensitive_exact() {
        let catalog = catalog();
        assert_eq!(
            catalog.get_glossary_term_by_name("atlantic WALL").map(|g| g.id.as_str()),
            Some("g-atlantic")
        );
        assert!(catalog.get_glossary_term_by_name("atlantic").is_none());
        assert!(catalog.get_glossary_term("g-mulberry").is_some());
    }

    #[test]
    fn glossary_search_matches_term_or_definition() {
        let catalog = catalog();
        let hits: Vec<_> = catalog.search_glossary("HARBOUR").iter().map(|g| g.id.as_str()).collect();
        assert_eq!(hits, ["g-mulberry"]);
        assert_eq!(catalog.search_glossary("").len(), 2);
        assert!(catalog.search_glossary("panzer").is_empty());
    }

    #[test]
    fn module_glossary_terms_skip_dangling_ids() {
        let catalog = catalog();
        let terms = catalog.get_glossary_terms_for_module("m1");
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].term, "Mulberry");
        assert!(catalog.get_glossary_terms_for_module("m9").is_empty());
    }

    #[test]
    fn quiz_questions_keep_catalog_order() {
        let catalog = catalog();
        let ids: Vec<_> = catalog
            .get_quiz_questions_for_module("m1")
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(ids, ["q1", "q3"]);
        assert!(catalog.get_quiz_questions_for_module("m9").is_empty());
    }

    #[test]
    fn timeline_category_filter_is_exact() {
        let catalog = catalog();
        let ids: Vec<_> = catalog
            .get_timeline_events_by_category(TimelineCategory::Command)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["e-cherbourg", "e-weather"]);
        assert!(catalog
            .get_timeline_events_by_category(TimelineCategory::Naval)
            .is_empty());
    }

    #[test]
    fn date_range_is_inclusive_and_sorted() {
        let catalog = catalog();
        let ids: Vec<_> = catalog
            .get_timeline_events_by_date_range("1944-06-04", "1944-06-06T23:59:59Z")
            .unwrap()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["e-weather", "e-utah", "e-pegasus"]);

        let ids: Vec<_> = catalog
            .get_timeline_events_by_date_range("1944-06-06", "1944-06-06")
            .unwrap()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["e-utah"]);

        assert!(catalog
            .get_timeline_events_by_date_range("1944-07-01", "1944-06-01")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn date_range_rejects_malformed_bounds() {
        let catalog = catalog();
        let err = catalog
            .get_timeline_events_by_date_range("D-Day", "1944-06-30")
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidDateBound {
                bound: "start",
                raw: "D-Day".into()
            }
        );
        let err = catalog
            .get_timeline_events_by_date_range("1944-06-01", "")
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDateBound { bound: "end", .. }));
    }

    #[test]
    fn timeline_search_matches_title_or_description() {
        let catalog = catalog();
        assert_eq!(catalog.search_timeline("event E-UTAH").len(), 1);
        assert_eq!(catalog.search_timeline("what happened").len(), 4);
        assert_eq!(catalog.search_timeline("").len(), 4);
    }

    #[test]
    fn related_modules_drop_dangling_references() {
        let catalog = catalog();
        let ids: Vec<_> = catalog
            .get_related_modules_for_event("e-pegasus")
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, ["m1"]);
        assert!(catalog.get_related_modules_for_event("e-missing").is_empty());
    }

    #[test]
    fn path_modules_resolve_in_path_order() {
        let catalog = catalog();
        let ids: Vec<_> = catalog
            .get_modules_for_path("quick")
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, ["m2", "m1"]);
        assert!(catalog.get_learning_path_by_id("long").is_none());
    }

    #[test]
    fn flashcard_filters() {
        let catalog = catalog();
        assert_eq!(catalog.get_flashcards_by_category(FlashcardCategory::Person).len(), 1);
        let for_m1 = catalog.get_flashcards_for_module("m1");
        assert_eq!(for_m1.len(), 1);
        assert_eq!(for_m1[0].id, "f1");
        assert!(catalog.get_flashcards_for_module("m2").is_empty());
    }

    #[test]
    fn grouped_collections_follow_display_order() {
        let catalog = catalog();
        let site_kinds: Vec<_> = catalog.sites_by_type().iter().map(|(k, _)| *k).collect();
        assert_eq!(site_kinds, [SiteKind::Beach, SiteKind::Cemetery]);

        let source_kinds: Vec<_> = catalog.sources_by_type().iter().map(|(k, _)| *k).collect();
        assert_eq!(source_kinds, [SourceKind::Book, SourceKind::Documentary]);
        assert_eq!(catalog.get_source_by_id("s-book").and_then(|s| s.author.as_deref()), Some("Beevor"));
    }

    #[test]
    fn exhibit_filters_treat_none_as_all() {
        let catalog = catalog();
        assert_eq!(catalog.filter_museum_items(None, None).len(), 3);
        assert_eq!(catalog.filter_museum_items(Some(MuseumItemKind::Tank), None).len(), 2);
        let allied_tanks = catalog.filter_museum_items(Some(MuseumItemKind::Tank), Some(Nation::Allied));
        assert_eq!(allied_tanks.len(), 1);
        assert_eq!(allied_tanks[0].id, "sherman");

        assert_eq!(catalog.get_maps_by_category(None).len(), 1);
        assert!(catalog.get_maps_by_category(Some(MapCategory::Logistics)).is_empty());

        assert_eq!(catalog.filter_videos(None, false).len(), 3);
        assert_eq!(catalog.filter_videos(None, true).len(), 2);
        assert_eq!(
            catalog
                .filter_videos(Some(VideoCategory::AnimatedOverview), true)
                .len(),
            1
        );
    }

    #[test]
    fn construction_rejects_duplicates_and_bad_dates() {
        let mut dup = bundle();
        dup.glossary.push(term("g-mulberry", "Again", "dup"));
        assert_eq!(
            ContentCatalog::new(dup).unwrap_err(),
            CatalogError::DuplicateId {
                collection: "glossary",
                id: "g-mulberry".into()
            }
        );

        let mut dup_q = bundle();
        dup_q.quiz_bank.push(question("q2", "m1"));
        assert!(matches!(
            ContentCatalog::new(dup_q).unwrap_err(),
            CatalogError::DuplicateId { collection: "quiz question", .. }
        ));

        let mut numbers = bundle();
        numbers.modules.push(module("m3", 2, &[]));
        assert_eq!(
            ContentCatalog::new(numbers).unwrap_err(),
            CatalogError::DuplicateModuleNumber(2)
        );

        let mut dates = bundle();
        dates.timeline.push(event("e-bad", "6 June", TimelineCategory::Naval, &[]));
        assert!(matches!(
            ContentCatalog::new(dates).unwrap_err(),
            CatalogError::InvalidTimelineDate { .. }
        ));
    }

    #[test]
    fn empty_catalog_answers_everything_with_nothing() {
        let catalog = ContentCatalog::empty();
        assert!(catalog.get_module_by_id("m1").is_none());
        assert!(catalog.search_glossary("").is_empty());
        assert!(catalog
            .get_timeline_events_by_date_range("1944-01-01", "1945-01-01")
            .unwrap()
            .is_empty());
    }
}
