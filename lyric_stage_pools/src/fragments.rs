// Fragment bank: candidate filler strings per placeholder category.
//
// Four categories are language-neutral (`color`, `place`, `emotion`,
// `time`); the other four keep an English and a Korean pool side by side.
// The JSON layout mirrors that split:
//
//   { "color": [..], ..., "adlib": { "en": [..], "kr": [..] }, ... }
//
// Every pool must be non-empty. `FragmentBank::from_json` enforces this so
// the resolver can index any pool without a fallback path.

use crate::PoolError;
use crate::types::{Category, Language};
use serde::Deserialize;

/// English and Korean variants of one category.
#[derive(Debug, Clone, Deserialize)]
pub struct Bilingual {
    pub en: Vec<String>,
    pub kr: Vec<String>,
}

impl Bilingual {
    pub fn get(&self, lang: Language) -> &[String] {
        match lang {
            Language::En => &self.en,
            Language::Kr => &self.kr,
        }
    }
}

/// All fragment pools, in data-file order.
#[derive(Debug, Clone, Deserialize)]
pub struct FragmentBank {
    color: Vec<String>,
    place: Vec<String>,
    emotion: Vec<String>,
    time: Vec<String>,
    adlib: Bilingual,
    subject: Bilingual,
    verb: Bilingual,
    object: Bilingual,
}

impl FragmentBank {
    /// Parse and validate a fragment bank.
    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        let bank: FragmentBank = serde_json::from_str(json)?;
        bank.validate()?;
        Ok(bank)
    }

    fn validate(&self) -> Result<(), PoolError> {
        for category in Category::ALL {
            if category.is_bilingual() {
                for lang in [Language::En, Language::Kr] {
                    if self.pool(category, lang).is_empty() {
                        return Err(PoolError::EmptyPool(format!("{category}.{lang:?}")));
                    }
                }
            } else if self.pool(category, Language::En).is_empty() {
                return Err(PoolError::EmptyPool(category.to_string()));
            }
        }
        Ok(())
    }

    /// The pool for `category`. `lang` is ignored for language-neutral
    /// categories.
    pub fn pool(&self, category: Category, lang: Language) -> &[String] {
        match category {
            Category::Color => &self.color,
            Category::Place => &self.place,
            Category::Emotion => &self.emotion,
            Category::Time => &self.time,
            Category::Adlib => self.adlib.get(lang),
            Category::Subject => self.subject.get(lang),
            Category::Verb => self.verb.get(lang),
            Category::Object => self.object.get(lang),
        }
    }
}
