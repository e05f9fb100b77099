//! Completion percentages.
//!
//! Both figures use fixed denominators rather than the catalog's real sizes:
//! a module is assumed to hold eight cards and the course ten modules. Module
//! progress is capped at 100; total progress is not and exceeds 100 once more
//! than ten modules are completed.

/// Cards per module assumed by [`module_percentage`].
pub const ASSUMED_CARDS_PER_MODULE: u64 = 8;

/// Module count assumed by [`total_percentage`].
pub const TOTAL_MODULE_COUNT: u64 = 10;

/// `round(100 * min(1, cards_read / 8))`.
#[must_use]
pub fn module_percentage(cards_read: usize) -> u32 {
    let read = u64::try_from(cards_read)
        .unwrap_or(u64::MAX)
        .min(ASSUMED_CARDS_PER_MODULE);
    rounded_percent(read, ASSUMED_CARDS_PER_MODULE)
}

/// `round(100 * modules_completed / 10)`, unclamped.
#[must_use]
pub fn total_percentage(modules_completed: usize) -> u32 {
    let completed = u64::try_from(modules_completed).unwrap_or(u64::MAX);
    rounded_percent(completed, TOTAL_MODULE_COUNT)
}

/// Integer `round(100 * part / whole)`, halves rounded up.
fn rounded_percent(part: u64, whole: u64) -> u32 {
    let scaled = part.saturating_mul(100).saturating_add(whole / 2) / whole;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
