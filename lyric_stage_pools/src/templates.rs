// Template bank: lyric line templates per section and language.
//
// Each section carries an English pool, a Korean pool and an optional mixed
// pool (only the chorus ships one in the default data). Unlike fragment
// pools, template pools may legitimately be empty or missing; the assembler
// substitutes a fallback line when it lands on an empty pool.

use crate::PoolError;
use crate::types::{Language, SectionId};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Templates for one section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionTemplates {
    #[serde(default)]
    pub en: Vec<String>,
    #[serde(default)]
    pub kr: Vec<String>,
    #[serde(default)]
    pub mix: Vec<String>,
}

/// Template pools keyed by section.
#[derive(Debug, Clone, Default)]
pub struct TemplateBank {
    sections: BTreeMap<SectionId, SectionTemplates>,
}

impl TemplateBank {
    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        let sections: BTreeMap<SectionId, SectionTemplates> = serde_json::from_str(json)?;
        Ok(TemplateBank { sections })
    }

    /// English or Korean pool for a section; empty if the section is absent.
    pub fn pool(&self, section: SectionId, lang: Language) -> &[String] {
        match self.sections.get(&section) {
            Some(t) => match lang {
                Language::En => &t.en,
                Language::Kr => &t.kr,
            },
            None => &[],
        }
    }

    /// Mixed-language pool for a section; empty if it has none.
    pub fn mixed(&self, section: SectionId) -> &[String] {
        self.sections
            .get(&section)
            .map(|t| t.mix.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of templates across every pool.
    pub fn len(&self) -> usize {
        self.sections
            .values()
            .map(|t| t.en.len() + t.kr.len() + t.mix.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
