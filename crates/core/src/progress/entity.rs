use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Confidence, FlashcardId, ModuleId, PathId, QuestionId, StudyCardId};
use crate::progress::bookmark::{Bookmark, BookmarkDraft, BookmarkKind};
use crate::progress::metrics::{module_percentage, total_percentage};
use crate::progress::snapshot::iso8601;
use crate::time::to_stored_precision;

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// One submitted quiz. The caller grades it; the store only appends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub quiz_id: String,
    pub module_id: ModuleId,
    #[serde(with = "iso8601")]
    pub date: DateTime<Utc>,
    pub score: u32,
    pub total_questions: u32,
    pub incorrect_questions: Vec<QuestionId>,
}

/// Latest review of a flashcard, replaced wholesale on every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardState {
    #[serde(with = "iso8601")]
    pub last_reviewed: DateTime<Utc>,
    pub confidence: Confidence,
    pub review_count: u32,
    #[serde(with = "iso8601")]
    pub next_review: DateTime<Utc>,
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Everything recorded about one learner on this device.
///
/// Mutators take the current time and return whether anything changed; a
/// call that changes nothing leaves `last_visited` alone as well. The
/// exception is [`Progress::toggle_french_perspective`], which always changes
/// the flag and returns its new value.
///
/// Every stored timestamp is truncated to whole milliseconds, the precision
/// of the persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub(crate) modules_completed: Vec<ModuleId>,
    pub(crate) cards_read: BTreeMap<ModuleId, Vec<StudyCardId>>,
    pub(crate) quiz_attempts: Vec<QuizAttempt>,
    pub(crate) flashcard_progress: BTreeMap<FlashcardId, FlashcardState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) current_path: Option<PathId>,
    #[serde(with = "iso8601")]
    pub(crate) last_visited: DateTime<Utc>,
    pub(crate) bookmarks: Vec<Bookmark>,
    pub(crate) french_perspective_enabled: bool,
}

impl Progress {
    /// Fresh progress with nothing recorded.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            modules_completed: Vec::new(),
            cards_read: BTreeMap::new(),
            quiz_attempts: Vec::new(),
            flashcard_progress: BTreeMap::new(),
            current_path: None,
            last_visited: to_stored_precision(now),
            bookmarks: Vec::new(),
            french_perspective_enabled: false,
        }
    }

    // ── accessors ──

    #[must_use]
    pub fn modules_completed(&self) -> &[ModuleId] {
        &self.modules_completed
    }

    #[must_use]
    pub fn cards_read(&self) -> &BTreeMap<ModuleId, Vec<StudyCardId>> {
        &self.cards_read
    }

    #[must_use]
    pub fn cards_read_in(&self, module_id: &str) -> &[StudyCardId] {
        self.cards_read
            .get(module_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn quiz_attempts(&self) -> &[QuizAttempt] {
        &self.quiz_attempts
    }

    #[must_use]
    pub fn flashcard_progress(&self) -> &BTreeMap<FlashcardId, FlashcardState> {
        &self.flashcard_progress
    }

    #[must_use]
    pub fn flashcard_state(&self, card_id: &str) -> Option<&FlashcardState> {
        self.flashcard_progress.get(card_id)
    }

    #[must_use]
    pub fn current_path(&self) -> Option<&PathId> {
        self.current_path.as_ref()
    }

    #[must_use]
    pub fn last_visited(&self) -> DateTime<Utc> {
        self.last_visited
    }

    #[must_use]
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    #[must_use]
    pub fn french_perspective_enabled(&self) -> bool {
        self.french_perspective_enabled
    }

    // ── mutations ──

    /// Adds the module to the completed set.
    pub fn mark_module_complete(&mut self, module_id: ModuleId, now: DateTime<Utc>) -> bool {
        if self.modules_completed.contains(&module_id) {
            return false;
        }
        self.modules_completed.push(module_id);
        self.touch(now)
    }

    /// Records a card as read within its module.
    pub fn mark_card_read(
        &mut self,
        module_id: ModuleId,
        card_id: StudyCardId,
        now: DateTime<Utc>,
    ) -> bool {
        let cards = self.cards_read.entry(module_id).or_default();
        if cards.contains(&card_id) {
            return false;
        }
        cards.push(card_id);
        self.touch(now)
    }

    /// Appends an attempt; attempts are never merged or rewritten.
    pub fn record_quiz_attempt(&mut self, mut attempt: QuizAttempt, now: DateTime<Utc>) -> bool {
        attempt.date = to_stored_precision(attempt.date);
        self.quiz_attempts.push(attempt);
        self.touch(now)
    }

    /// Replaces the stored state for a flashcard. `review_count` is taken as
    /// given, not incremented.
    pub fn update_flashcard_progress(
        &mut self,
        card_id: FlashcardId,
        mut state: FlashcardState,
        now: DateTime<Utc>,
    ) -> bool {
        state.last_reviewed = to_stored_precision(state.last_reviewed);
        state.next_review = to_stored_precision(state.next_review);
        self.flashcard_progress.insert(card_id, state);
        self.touch(now)
    }

    pub fn set_current_path(&mut self, path_id: Option<PathId>, now: DateTime<Utc>) -> bool {
        self.current_path = path_id;
        self.touch(now)
    }

    /// Adds a bookmark unless one with the same kind and id exists; an
    /// existing bookmark keeps its original title and date.
    pub fn add_bookmark(&mut self, draft: BookmarkDraft, now: DateTime<Utc>) -> bool {
        if self.is_bookmarked(draft.kind, &draft.id) {
            return false;
        }
        self.bookmarks.push(draft.stamp(to_stored_precision(now)));
        self.touch(now)
    }

    pub fn remove_bookmark(&mut self, kind: BookmarkKind, id: &str, now: DateTime<Utc>) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| !b.is(kind, id));
        if self.bookmarks.len() == before {
            return false;
        }
        self.touch(now)
    }

    /// Flips the French perspective preference and returns the new value.
    pub fn toggle_french_perspective(&mut self, now: DateTime<Utc>) -> bool {
        self.french_perspective_enabled = !self.french_perspective_enabled;
        self.touch(now);
        self.french_perspective_enabled
    }

    fn touch(&mut self, now: DateTime<Utc>) -> bool {
        self.last_visited = to_stored_precision(now);
        true
    }

    // ── derived reads ──

    #[must_use]
    pub fn module_progress(&self, module_id: &str) -> u32 {
        module_percentage(self.cards_read_in(module_id).len())
    }

    #[must_use]
    pub fn total_progress(&self) -> u32 {
        total_percentage(self.modules_completed.len())
    }

    #[must_use]
    pub fn is_module_complete(&self, module_id: &str) -> bool {
        self.modules_completed.iter().any(|id| id == module_id)
    }

    #[must_use]
    pub fn is_card_read(&self, module_id: &str, card_id: &str) -> bool {
        self.cards_read_in(module_id).iter().any(|id| id == card_id)
    }

    #[must_use]
    pub fn is_bookmarked(&self, kind: BookmarkKind, id: &str) -> bool {
        self.bookmarks.iter().any(|b| b.is(kind, id))
    }

    /// Attempts for a module in the order they were recorded.
    pub fn quiz_attempts_for_module<'a>(
        &'a self,
        module_id: &'a str,
    ) -> impl Iterator<Item = &'a QuizAttempt> + 'a {
        self.quiz_attempts
            .iter()
            .filter(move |attempt| attempt.module_id == module_id)
    }

    /// Attempt with the highest score ratio for a module; the latest wins ties.
    #[must_use]
    pub fn best_quiz_attempt(&self, module_id: &str) -> Option<&QuizAttempt> {
        self.quiz_attempts
            .iter()
            .filter(|attempt| attempt.module_id == module_id)
            .max_by(|a, b| compare_ratio(a, b))
    }

    /// Drops repeated entries from the set-like collections, keeping the first
    /// occurrence. Returns how many entries were removed.
    pub(crate) fn dedup(&mut self) -> usize {
        let mut removed = dedup_in_place(&mut self.modules_completed, |a, b| a == b);
        for cards in self.cards_read.values_mut() {
            removed += dedup_in_place(cards, |a, b| a == b);
        }
        removed += dedup_in_place(&mut self.bookmarks, |a, b| a.is(b.kind, &b.id));
        removed
    }
}

/// `a.score / a.total` against `b.score / b.total` without floats; an empty
/// quiz counts as zero.
fn compare_ratio(a: &QuizAttempt, b: &QuizAttempt) -> Ordering {
    let lhs = u64::from(a.score) * u64::from(b.total_questions.max(1));
    let rhs = u64::from(b.score) * u64::from(a.total_questions.max(1));
    let lhs = if a.total_questions == 0 { 0 } else { lhs };
    let rhs = if b.total_questions == 0 { 0 } else { rhs };
    lhs.cmp(&rhs)
}

fn dedup_in_place<T>(items: &mut Vec<T>, same: impl Fn(&T, &T) -> bool) -> usize {
    let before = items.len();
    let mut kept: Vec<T> = Vec::with_capacity(before);
    for item in items.drain(..) {
        if !kept.iter().any(|k| same(k, &item)) {
            kept.push(item);
        }
    }
    *items = kept;
    before - items.len()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn attempt(module: &str, score: u32, total: u32) -> QuizAttempt {
        QuizAttempt {
            quiz_id: format!("quiz-{module}"),
            module_id: ModuleId::new(module),
            date: fixed_now(),
            score,
            total_questions: total,
            incorrect_questions: vec![],
        }
    }

    fn state(confidence: Confidence, reviews: u32) -> FlashcardState {
        FlashcardState {
            last_reviewed: fixed_now(),
            confidence,
            review_count: reviews,
            next_review: fixed_now() + Duration::days(1),
        }
    }

    #[test]
    fn new_progress_is_empty() {
        let p = Progress::new(fixed_now());
        assert!(p.modules_completed().is_empty());
        assert!(p.cards_read().is_empty());
        assert!(p.quiz_attempts().is_empty());
        assert!(p.flashcard_progress().is_empty());
        assert!(p.current_path().is_none());
        assert!(p.bookmarks().is_empty());
        assert!(!p.french_perspective_enabled());
        assert_eq!(p.last_visited(), fixed_now());
    }

    #[test]
    fn marking_a_module_twice_keeps_one_entry() {
        let mut p = Progress::new(fixed_now());
        let later = fixed_now() + Duration::minutes(5);
        assert!(p.mark_module_complete(ModuleId::new("m1"), later));
        for _ in 0..5 {
            assert!(!p.mark_module_complete(ModuleId::new("m1"), later + Duration::hours(1)));
        }
        assert_eq!(p.modules_completed(), [ModuleId::new("m1")]);
        assert_eq!(p.last_visited(), later);
        assert!(p.is_module_complete("m1"));
    }

    #[test]
    fn card_reads_are_per_module_and_idempotent() {
        let mut p = Progress::new(fixed_now());
        p.mark_card_read(ModuleId::new("m2"), StudyCardId::new("c9"), fixed_now());
        assert!(p.mark_card_read(ModuleId::new("m1"), StudyCardId::new("c1"), fixed_now()));
        assert!(!p.mark_card_read(ModuleId::new("m1"), StudyCardId::new("c1"), fixed_now()));
        assert!(p.mark_card_read(ModuleId::new("m1"), StudyCardId::new("c2"), fixed_now()));

        assert_eq!(p.cards_read_in("m1").len(), 2);
        assert_eq!(p.cards_read_in("m2"), [StudyCardId::new("c9")]);
        assert!(p.is_card_read("m1", "c2"));
        assert!(!p.is_card_read("m2", "c1"));
        assert_eq!(p.module_progress("m1"), 25);
    }

    #[test]
    fn quiz_attempts_only_grow() {
        let mut p = Progress::new(fixed_now());
        for _ in 0..3 {
            p.record_quiz_attempt(attempt("m1", 4, 5), fixed_now());
        }
        assert_eq!(p.quiz_attempts().len(), 3);
        assert!(p.quiz_attempts().iter().all(|a| *a == attempt("m1", 4, 5)));
    }

    #[test]
    fn flashcard_update_overwrites_without_merging() {
        let mut p = Progress::new(fixed_now());
        p.update_flashcard_progress(FlashcardId::new("f1"), state(Confidence::Easy, 7), fixed_now());
        p.update_flashcard_progress(FlashcardId::new("f1"), state(Confidence::Again, 1), fixed_now());
        assert_eq!(p.flashcard_state("f1"), Some(&state(Confidence::Again, 1)));
        assert_eq!(p.flashcard_progress().len(), 1);
    }

    #[test]
    fn duplicate_bookmark_keeps_original_title() {
        let mut p = Progress::new(fixed_now());
        let first = fixed_now() + Duration::minutes(1);
        assert!(p.add_bookmark(BookmarkDraft::new(BookmarkKind::Module, "m1", "Planning"), first));
        assert!(!p.add_bookmark(
            BookmarkDraft::new(BookmarkKind::Module, "m1", "Renamed"),
            first + Duration::minutes(1)
        ));
        assert!(p.add_bookmark(BookmarkDraft::new(BookmarkKind::Card, "m1", "Same id, other kind"), first));

        assert_eq!(p.bookmarks().len(), 2);
        assert_eq!(p.bookmarks()[0].title, "Planning");
        assert_eq!(p.bookmarks()[0].date_added, first);
    }

    #[test]
    fn removing_an_absent_bookmark_changes_nothing() {
        let mut p = Progress::new(fixed_now());
        p.add_bookmark(BookmarkDraft::new(BookmarkKind::Glossary, "g1", "Mulberry"), fixed_now());
        let before = p.clone();
        assert!(!p.remove_bookmark(BookmarkKind::Timeline, "g1", fixed_now() + Duration::hours(1)));
        assert_eq!(p, before);
        assert!(p.remove_bookmark(BookmarkKind::Glossary, "g1", fixed_now()));
        assert!(!p.is_bookmarked(BookmarkKind::Glossary, "g1"));
    }

    #[test]
    fn toggle_and_path_overwrite() {
        let mut p = Progress::new(fixed_now());
        assert!(p.toggle_french_perspective(fixed_now()));
        assert!(!p.toggle_french_perspective(fixed_now()));
        p.set_current_path(Some(PathId::new("quick")), fixed_now());
        p.set_current_path(Some(PathId::new("deep")), fixed_now());
        assert_eq!(p.current_path(), Some(&PathId::new("deep")));
        p.set_current_path(None, fixed_now());
        assert!(p.current_path().is_none());
    }

    #[test]
    fn total_progress_counts_completed_modules() {
        let mut p = Progress::new(fixed_now());
        for i in 1..=11 {
            p.mark_module_complete(ModuleId::new(format!("m{i}")), fixed_now());
            if i == 3 {
                assert_eq!(p.total_progress(), 30);
            }
        }
        assert_eq!(p.total_progress(), 110);
    }

    #[test]
    fn best_attempt_compares_ratios() {
        let mut p = Progress::new(fixed_now());
        p.record_quiz_attempt(attempt("m1", 3, 4), fixed_now());
        p.record_quiz_attempt(attempt("m1", 4, 6), fixed_now());
        p.record_quiz_attempt(attempt("m2", 5, 5), fixed_now());
        p.record_quiz_attempt(attempt("m1", 0, 0), fixed_now());

        let best = p.best_quiz_attempt("m1").unwrap();
        assert_eq!((best.score, best.total_questions), (3, 4));
        assert_eq!(p.quiz_attempts_for_module("m1").count(), 3);
        assert!(p.best_quiz_attempt("m3").is_none());
    }

    #[test]
    fn best_attempt_outlives_the_lookup_key() {
        let mut p = Progress::new(fixed_now());
        p.record_quiz_attempt(attempt("m1", 2, 4), fixed_now());

        let best = {
            let key = String::from("m1");
            p.best_quiz_attempt(&key)
        };
        assert_eq!(best.map(|a| a.score), Some(2));
    }

    #[test]
    fn stamps_are_truncated_to_millis() {
        let precise = fixed_now() + Duration::nanoseconds(123_456_789);
        let millis = fixed_now() + Duration::milliseconds(123);

        let mut p = Progress::new(precise);
        assert_eq!(p.last_visited(), millis);

        let mut submitted = attempt("m1", 1, 2);
        submitted.date = precise;
        p.record_quiz_attempt(submitted, precise);
        assert_eq!(p.quiz_attempts()[0].date, millis);

        let mut reviewed = state(Confidence::Good, 1);
        reviewed.last_reviewed = precise;
        reviewed.next_review = precise + Duration::days(1);
        p.update_flashcard_progress(FlashcardId::new("f1"), reviewed, precise);
        let stored = p.flashcard_state("f1").unwrap();
        assert_eq!(stored.last_reviewed, millis);
        assert_eq!(stored.next_review, millis + Duration::days(1));

        p.add_bookmark(BookmarkDraft::new(BookmarkKind::Card, "c1", "Card"), precise);
        assert_eq!(p.bookmarks()[0].date_added, millis);
        assert_eq!(p.last_visited(), millis);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut p = Progress::new(fixed_now());
        p.modules_completed = vec![ModuleId::new("m1"), ModuleId::new("m2"), ModuleId::new("m1")];
        p.cards_read.insert(
            ModuleId::new("m1"),
            vec![StudyCardId::new("c1"), StudyCardId::new("c1")],
        );
        let removed = p.dedup();
        assert_eq!(removed, 2);
        assert_eq!(p.modules_completed(), [ModuleId::new("m1"), ModuleId::new("m2")]);
        assert_eq!(p.cards_read_in("m1").len(), 1);
    }
}
