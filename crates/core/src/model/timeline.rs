use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::ids::{EventId, ModuleId};
use crate::model::module::ImageItem;
use crate::model::parse::ParseKindError;

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// Which side or arm of the operation a timeline event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineCategory {
    Airborne,
    Beach,
    Command,
    Civilian,
    German,
    Naval,
    Air,
    Resistance,
}

impl TimelineCategory {
    pub const ALL: [TimelineCategory; 8] = [
        TimelineCategory::Airborne,
        TimelineCategory::Beach,
        TimelineCategory::Command,
        TimelineCategory::Civilian,
        TimelineCategory::German,
        TimelineCategory::Naval,
        TimelineCategory::Air,
        TimelineCategory::Resistance,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TimelineCategory::Airborne => "airborne",
            TimelineCategory::Beach => "beach",
            TimelineCategory::Command => "command",
            TimelineCategory::Civilian => "civilian",
            TimelineCategory::German => "german",
            TimelineCategory::Naval => "naval",
            TimelineCategory::Air => "air",
            TimelineCategory::Resistance => "resistance",
        }
    }
}

impl fmt::Display for TimelineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimelineCategory {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseKindError::new("timeline category", s))
    }
}

//
// ─── IMPORTANCE ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Importance {
    Major,
    Significant,
    Minor,
}

//
// ─── EVENT ─────────────────────────────────────────────────────────────────────
//

/// Dated entry on the campaign timeline.
///
/// `date` keeps the authored text (`1944-06-06`); the catalog parses it once
/// at load time and rejects content with dates it cannot read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: EventId,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub title: String,
    pub description: String,
    pub category: TimelineCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub related_modules: Vec<ModuleId>,
    #[serde(default)]
    pub images: Vec<ImageItem>,
    pub importance: Importance,
}
