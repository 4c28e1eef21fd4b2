// Core identifier types shared by the pool banks and the song engine.
//
// `SectionId` names a structural segment of a song and keys the template
// bank. `Language` selects between the English and Korean halves of a
// bilingual pool. `Category` names a fragment pool and doubles as the
// placeholder key vocabulary (minus `member`, which the engine resolves from
// the working member pool instead of a fragment bank).
//
// All three serialize as lowercase strings so they read naturally in the
// JSON data files and in serialized songs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A structural segment of a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Intro,
    Verse,
    /// Pre-chorus.
    Pre,
    Chorus,
    Rap,
    Bridge,
    Outro,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        SectionId::Intro,
        SectionId::Verse,
        SectionId::Pre,
        SectionId::Chorus,
        SectionId::Rap,
        SectionId::Bridge,
        SectionId::Outro,
    ];

    /// Lowercase identifier, as used in the data files.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Intro => "intro",
            SectionId::Verse => "verse",
            SectionId::Pre => "pre",
            SectionId::Chorus => "chorus",
            SectionId::Rap => "rap",
            SectionId::Bridge => "bridge",
            SectionId::Outro => "outro",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One half of a bilingual pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Kr,
}

/// Fragment pool category. The string form is the placeholder key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Color,
    Place,
    Emotion,
    Time,
    Adlib,
    Subject,
    Verb,
    Object,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Color,
        Category::Place,
        Category::Emotion,
        Category::Time,
        Category::Adlib,
        Category::Subject,
        Category::Verb,
        Category::Object,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Color => "color",
            Category::Place => "place",
            Category::Emotion => "emotion",
            Category::Time => "time",
            Category::Adlib => "adlib",
            Category::Subject => "subject",
            Category::Verb => "verb",
            Category::Object => "object",
        }
    }

    /// Look up a category by placeholder key. Keys are case-sensitive.
    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Whether this category keeps separate English and Korean pools.
    pub fn is_bilingual(self) -> bool {
        matches!(
            self,
            Category::Adlib | Category::Subject | Category::Verb | Category::Object
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_serializes_lowercase() {
        let json = serde_json::to_string(&SectionId::Pre).unwrap();
        assert_eq!(json, "\"pre\"");
        let back: SectionId = serde_json::from_str("\"bridge\"").unwrap();
        assert_eq!(back, SectionId::Bridge);
    }

    #[test]
    fn test_category_key_roundtrip() {
        for c in Category::ALL {
            assert_eq!(Category::from_key(c.key()), Some(c));
        }
        assert_eq!(Category::from_key("member"), None);
        assert_eq!(Category::from_key("Color"), None);
    }

    #[test]
    fn test_bilingual_categories() {
        let bilingual: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| c.is_bilingual())
            .collect();
        assert_eq!(
            bilingual,
            vec![
                Category::Adlib,
                Category::Subject,
                Category::Verb,
                Category::Object
            ]
        );
    }
}
