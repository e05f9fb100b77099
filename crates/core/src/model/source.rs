use serde::{Deserialize, Serialize};

use crate::model::ids::SourceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Book,
    Website,
    Documentary,
    Museum,
    Archive,
    Article,
}

impl SourceKind {
    /// Display order used when sources are grouped by kind.
    pub const DISPLAY_ORDER: [SourceKind; 6] = [
        SourceKind::Book,
        SourceKind::Website,
        SourceKind::Documentary,
        SourceKind::Museum,
        SourceKind::Archive,
        SourceKind::Article,
    ];
}

/// Bibliography entry referenced by study cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: SourceId,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_date: Option<String>,
    pub description: String,
}
