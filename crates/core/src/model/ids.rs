use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Declares a string-backed identifier newtype.
///
/// Content ids are authored by hand in the content files (`m1`, `omaha-beach`),
/// so they stay opaque strings rather than numeric keys.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Unique identifier for a study module
    ModuleId
);
string_id!(
    /// Unique identifier for a study card within a module
    StudyCardId
);
string_id!(
    /// Unique identifier for a glossary term
    GlossaryTermId
);
string_id!(
    /// Unique identifier for a quiz question
    QuestionId
);
string_id!(
    /// Unique identifier for a timeline event
    EventId
);
string_id!(
    /// Unique identifier for a flashcard
    FlashcardId
);
string_id!(
    /// Unique identifier for a learning path
    PathId
);
string_id!(
    /// Unique identifier for a bibliography source
    SourceId
);
string_id!(SiteId);
string_id!(MuseumItemId);
string_id!(MapId);
string_id!(VideoId);

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_module_id_display() {
        let id = ModuleId::new("m1");
        assert_eq!(id.to_string(), "m1");
        assert_eq!(format!("{id:?}"), "ModuleId(\"m1\")");
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = StudyCardId::new("m1-c2");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"m1-c2\"");
        let back: StudyCardId = serde_json::from_str("\"m1-c2\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(ModuleId::new("m3"), 3);
        assert_eq!(map.get("m3"), Some(&3));
        assert_eq!(map.get("m4"), None);
    }
}
