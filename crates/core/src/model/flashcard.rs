use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::ids::{FlashcardId, ModuleId};
use crate::model::parse::ParseKindError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlashcardCategory {
    Glossary,
    Fact,
    Date,
    Person,
    Location,
}

impl FromStr for FlashcardCategory {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "glossary" => Ok(Self::Glossary),
            "fact" => Ok(Self::Fact),
            "date" => Ok(Self::Date),
            "person" => Ok(Self::Person),
            "location" => Ok(Self::Location),
            _ => Err(ParseKindError::new("flashcard category", s)),
        }
    }
}

/// Three-level self-assessment recorded after reviewing a flashcard.
///
/// Stored as given; nothing derives a schedule from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Confidence {
    Again,
    Good,
    Easy,
}

impl Confidence {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Again => "again",
            Confidence::Good => "good",
            Confidence::Easy => "easy",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "again" => Ok(Self::Again),
            "good" => Ok(Self::Good),
            "easy" => Ok(Self::Easy),
            _ => Err(ParseKindError::new("confidence", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: FlashcardId,
    pub front: String,
    pub back: String,
    pub category: FlashcardCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<ModuleId>,
}
