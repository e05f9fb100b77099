//! The progress store: one learner's `Progress`, kept in memory and flushed
//! to a durable slot after every effective mutation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use storage::repository::ProgressSlotRepository;
use study_core::model::{FlashcardId, ModuleId, PathId, StudyCardId};
use study_core::progress::{
    BookmarkDraft, BookmarkKind, DecodeReport, FlashcardState, PROGRESS_SLOT_KEY, Progress,
    QuizAttempt, decode, encode,
};

use crate::Clock;

/// Owns the progress aggregate and its persisted slot.
///
/// The entity lock is held across the durable write, so concurrent callers
/// are serialized and the stored document always reflects the latest
/// mutation. Storage failures are logged and never returned; the in-memory
/// state stays authoritative for the rest of the session.
pub struct ProgressService {
    clock: Clock,
    slots: Arc<dyn ProgressSlotRepository>,
    state: Mutex<Progress>,
}

impl ProgressService {
    /// Load the stored document, falling back to defaults when it is absent,
    /// unreadable or damaged.
    pub async fn load(clock: Clock, slots: Arc<dyn ProgressSlotRepository>) -> Self {
        let defaults = Progress::new(clock.now());
        let progress = match slots.read_slot(PROGRESS_SLOT_KEY).await {
            Ok(Some(raw)) => {
                let (progress, report) = decode(&raw, defaults);
                log_recovery(&report);
                progress
            }
            Ok(None) => {
                debug!("no stored progress, starting fresh");
                defaults
            }
            Err(err) => {
                warn!(error = %err, "cannot read stored progress, starting fresh");
                defaults
            }
        };

        Self {
            clock,
            slots,
            state: Mutex::new(progress),
        }
    }

    //
    // ─── MUTATIONS ─────────────────────────────────────────────────────────────
    //

    /// Returns `false` when the module was already complete.
    pub async fn mark_module_complete(&self, module_id: impl Into<ModuleId>) -> bool {
        let module_id = module_id.into();
        self.mutate(|progress, now| progress.mark_module_complete(module_id, now))
            .await
    }

    /// Returns `false` when the card was already read.
    pub async fn mark_card_read(
        &self,
        module_id: impl Into<ModuleId>,
        card_id: impl Into<StudyCardId>,
    ) -> bool {
        let (module_id, card_id) = (module_id.into(), card_id.into());
        self.mutate(|progress, now| progress.mark_card_read(module_id, card_id, now))
            .await
    }

    pub async fn record_quiz_attempt(&self, attempt: QuizAttempt) {
        self.mutate(|progress, now| progress.record_quiz_attempt(attempt, now))
            .await;
    }

    pub async fn update_flashcard_progress(
        &self,
        card_id: impl Into<FlashcardId>,
        state: FlashcardState,
    ) {
        let card_id = card_id.into();
        self.mutate(|progress, now| progress.update_flashcard_progress(card_id, state, now))
            .await;
    }

    pub async fn set_current_path(&self, path_id: Option<PathId>) -> bool {
        self.mutate(|progress, now| progress.set_current_path(path_id, now))
            .await
    }

    /// Returns `false` when an entry with the same kind and id exists; the
    /// stored entry keeps its original title.
    pub async fn add_bookmark(&self, draft: BookmarkDraft) -> bool {
        self.mutate(|progress, now| progress.add_bookmark(draft, now))
            .await
    }

    /// Returns `false` when nothing matched.
    pub async fn remove_bookmark(&self, kind: BookmarkKind, id: &str) -> bool {
        self.mutate(|progress, now| progress.remove_bookmark(kind, id, now))
            .await
    }

    /// Flip the preference and return its new value.
    pub async fn toggle_french_perspective(&self) -> bool {
        let mut enabled = false;
        self.mutate(|progress, now| {
            enabled = progress.toggle_french_perspective(now);
            true
        })
        .await;
        enabled
    }

    /// Replace the state with defaults and erase the stored document. When
    /// the slot cannot be erased the default document is written over it.
    pub async fn reset_progress(&self) {
        let mut state = self.state.lock().await;
        *state = Progress::new(self.clock.now());
        if let Err(err) = self.slots.clear_slot(PROGRESS_SLOT_KEY).await {
            warn!(error = %err, "cannot erase stored progress, overwriting with defaults");
            self.persist(&state).await;
        }
        info!("progress reset");
    }

    //
    // ─── READS ─────────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub async fn snapshot(&self) -> Progress {
        self.state.lock().await.clone()
    }

    /// Run `f` against the current state without cloning it.
    pub async fn read<R>(&self, f: impl FnOnce(&Progress) -> R) -> R {
        let state = self.state.lock().await;
        f(&state)
    }

    pub async fn module_progress(&self, module_id: &str) -> u32 {
        self.read(|progress| progress.module_progress(module_id)).await
    }

    pub async fn total_progress(&self) -> u32 {
        self.read(Progress::total_progress).await
    }

    pub async fn is_module_complete(&self, module_id: &str) -> bool {
        self.read(|progress| progress.is_module_complete(module_id))
            .await
    }

    pub async fn is_card_read(&self, module_id: &str, card_id: &str) -> bool {
        self.read(|progress| progress.is_card_read(module_id, card_id))
            .await
    }

    pub async fn is_bookmarked(&self, kind: BookmarkKind, id: &str) -> bool {
        self.read(|progress| progress.is_bookmarked(kind, id)).await
    }

    pub async fn quiz_attempts_for_module(&self, module_id: &str) -> Vec<QuizAttempt> {
        self.read(|progress| progress.quiz_attempts_for_module(module_id).cloned().collect())
            .await
    }

    /// Highest score ratio recorded for the module.
    pub async fn best_quiz_score(&self, module_id: &str) -> Option<QuizAttempt> {
        self.read(|progress| progress.best_quiz_attempt(module_id).cloned())
            .await
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    async fn mutate(&self, apply: impl FnOnce(&mut Progress, DateTime<Utc>) -> bool) -> bool {
        let mut state = self.state.lock().await;
        let changed = apply(&mut state, self.clock.now());
        if changed {
            self.persist(&state).await;
        }
        changed
    }

    async fn persist(&self, progress: &Progress) {
        let raw = match encode(progress) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "cannot serialize progress");
                return;
            }
        };
        if let Err(err) = self.slots.write_slot(PROGRESS_SLOT_KEY, &raw).await {
            warn!(error = %err, "cannot store progress");
        }
    }
}

fn log_recovery(report: &DecodeReport) {
    if let Some(reason) = &report.discarded {
        warn!(%reason, "stored progress is corrupt, starting fresh");
        return;
    }
    if !report.reset_fields.is_empty() {
        warn!(fields = ?report.reset_fields, "stored progress had unreadable fields, reset to defaults");
    }
    if report.duplicates_dropped > 0 {
        info!(count = report.duplicates_dropped, "dropped duplicate entries from stored progress");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use study_core::time::{fixed_clock, fixed_now};

    async fn service(repo: &InMemoryRepository) -> ProgressService {
        ProgressService::load(fixed_clock(), Arc::new(repo.clone())).await
    }

    #[tokio::test]
    async fn noop_mutation_is_not_persisted() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo).await;

        assert!(!svc.remove_bookmark(BookmarkKind::Module, "m1").await);
        assert!(repo.read_slot(PROGRESS_SLOT_KEY).await.unwrap().is_none());

        assert!(svc.mark_module_complete("m1").await);
        assert!(repo.read_slot(PROGRESS_SLOT_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn toggle_returns_new_value() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo).await;
        assert!(svc.toggle_french_perspective().await);
        assert!(!svc.toggle_french_perspective().await);
    }

    #[tokio::test]
    async fn load_uses_clock_for_defaults() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo).await;
        assert_eq!(svc.snapshot().await.last_visited(), fixed_now());
        assert_eq!(svc.total_progress().await, 0);
    }
}
