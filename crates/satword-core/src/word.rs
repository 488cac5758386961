//! Vocabulary word value type and its stable identifier.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Separator fed to the hash between text and definition so that
/// `("ab", "c")` and `("a", "bc")` never collide.
const FIELD_SEPARATOR: u8 = 0x1f;

/// A vocabulary word with its definition.
///
/// Equality is structural: two words with identical text and definition
/// are the same word for known/unknown purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    #[serde(rename = "word")]
    pub text: String,
    pub definition: String,
}

impl Word {
    pub fn new(text: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            definition: definition.into(),
        }
    }

    /// Content-derived identifier used as the key of the known set.
    pub fn id(&self) -> WordId {
        let mut hasher = Sha256::new();
        hasher.update(self.text.as_bytes());
        hasher.update([FIELD_SEPARATOR]);
        hasher.update(self.definition.as_bytes());
        WordId(hex::encode(hasher.finalize()))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.text, self.definition)
    }
}

/// Hex-encoded SHA-256 over a word's text and definition.
///
/// Derived from exactly the fields that define structural equality, so
/// `a == b` iff `a.id() == b.id()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(String);

impl WordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_resource_field_names() {
        let word = Word::new("Laconic", "using few words");
        let json = serde_json::to_value(&word).unwrap();
        assert_eq!(json["word"], "Laconic");
        assert_eq!(json["definition"], "using few words");
    }

    #[test]
    fn id_follows_structural_equality() {
        let a = Word::new("Laconic", "using few words");
        let b = Word::new("Laconic", "using few words");
        let c = Word::new("Laconic", "terse");
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn id_does_not_collide_on_field_boundary() {
        let a = Word::new("ab", "c");
        let b = Word::new("a", "bc");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn id_is_hex_sha256() {
        let id = Word::new("Ebullient", "cheerful and enthusiastic").id();
        assert_eq!(id.as_str().len(), 64);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
