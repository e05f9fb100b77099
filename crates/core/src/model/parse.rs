use std::fmt;

/// Error type for parsing a content enumeration from its wire name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError {
    kind: &'static str,
    raw: String,
}

impl ParseKindError {
    pub(crate) fn new(kind: &'static str, raw: &str) -> Self {
        Self {
            kind,
            raw: raw.to_owned(),
        }
    }
}

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.raw)
    }
}

impl std::error::Error for ParseKindError {}
