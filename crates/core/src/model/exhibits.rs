//! Reference material outside the module sequence: places to visit, museum
//! pieces, period maps and recommended videos.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::ids::{MapId, MuseumItemId, ModuleId, SiteId, VideoId};

//
// ─── SITES ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteKind {
    Cemetery,
    Museum,
    Beach,
    Memorial,
    Battlefield,
}

impl SiteKind {
    /// Display order used when sites are grouped by kind.
    pub const DISPLAY_ORDER: [SiteKind; 5] = [
        SiteKind::Beach,
        SiteKind::Museum,
        SiteKind::Cemetery,
        SiteKind::Memorial,
        SiteKind::Battlefield,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormandySite {
    pub id: SiteId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SiteKind,
    pub location: String,
    pub description: String,
    pub what_it_teaches: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_tips: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

//
// ─── MUSEUM ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MuseumItemKind {
    Tank,
    Vehicle,
    Aircraft,
    Weapon,
    Artillery,
    Equipment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Nation {
    Allied,
    Axis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuseumItem {
    pub id: MuseumItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MuseumItemKind,
    pub nation: Nation,
    pub country: String,
    pub description: String,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    #[serde(rename = "dDayRole")]
    pub d_day_role: String,
    pub image: String,
    pub image_credit: String,
}

//
// ─── MAPS ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapCategory {
    Overview,
    Beaches,
    Airborne,
    German,
    Campaign,
    Logistics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalMap {
    pub id: MapId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub credit: String,
    pub category: MapCategory,
    #[serde(default)]
    pub related_modules: Vec<ModuleId>,
}

//
// ─── VIDEOS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VideoCategory {
    AnimatedOverview,
    GermanPerspective,
    BeachLandings,
    Airborne,
    Equipment,
    Planning,
    FrenchPerspective,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeVideo {
    pub id: VideoId,
    pub title: String,
    pub channel: String,
    pub url: String,
    pub thumbnail: String,
    pub duration: String,
    pub category: VideoCategory,
    pub description: String,
    #[serde(default)]
    pub related_modules: Vec<ModuleId>,
    #[serde(default)]
    pub recommended: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn museum_item_reads_d_day_role_key() {
        let json = r#"{
            "id": "sherman-m4",
            "name": "M4 Sherman",
            "type": "tank",
            "nation": "allied",
            "country": "USA",
            "description": "Medium tank.",
            "specifications": {"crew": "5"},
            "dDayRole": "Supported the beach assaults.",
            "image": "/img/sherman.jpg",
            "imageCredit": "Public domain"
        }"#;
        let item: MuseumItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, MuseumItemKind::Tank);
        assert_eq!(item.specifications.get("crew").map(String::as_str), Some("5"));
        assert!(item.d_day_role.starts_with("Supported"));
    }

    #[test]
    fn video_category_uses_kebab_case() {
        let cat: VideoCategory = serde_json::from_str("\"animated-overview\"").unwrap();
        assert_eq!(cat, VideoCategory::AnimatedOverview);
    }
}
