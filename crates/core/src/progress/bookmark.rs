use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::ParseKindError;
use crate::progress::snapshot::iso8601;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookmarkKind {
    Module,
    Card,
    Timeline,
    Glossary,
}

impl BookmarkKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BookmarkKind::Module => "module",
            BookmarkKind::Card => "card",
            BookmarkKind::Timeline => "timeline",
            BookmarkKind::Glossary => "glossary",
        }
    }
}

impl fmt::Display for BookmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookmarkKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "module" => Ok(Self::Module),
            "card" => Ok(Self::Card),
            "timeline" => Ok(Self::Timeline),
            "glossary" => Ok(Self::Glossary),
            _ => Err(ParseKindError::new("bookmark kind", s)),
        }
    }
}

/// A saved reference to a piece of content. Unique by `(kind, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[serde(rename = "type")]
    pub kind: BookmarkKind,
    pub id: String,
    pub title: String,
    #[serde(with = "iso8601")]
    pub date_added: DateTime<Utc>,
}

/// Bookmark as submitted by a caller; the store stamps `date_added`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub kind: BookmarkKind,
    pub id: String,
    pub title: String,
}

impl BookmarkDraft {
    #[must_use]
    pub fn new(kind: BookmarkKind, id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            title: title.into(),
        }
    }

    pub(crate) fn stamp(self, now: DateTime<Utc>) -> Bookmark {
        Bookmark {
            kind: self.kind,
            id: self.id,
            title: self.title,
            date_added: now,
        }
    }
}

impl Bookmark {
    #[must_use]
    pub fn is(&self, kind: BookmarkKind, id: &str) -> bool {
        self.kind == kind && self.id == id
    }
}
