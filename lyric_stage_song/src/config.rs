// Data-driven engine configuration.
//
// Every tunable number in song construction lives in `EngineConfig`: the
// per-section line counts, the minimum song length enforced by the top-up
// step, the chance that a mixed-language line uses the dedicated mixed pool,
// which pool the top-up draws from, and the line used when a template pool
// turns out to be empty. The engine reads these values and never hardcodes
// them.
//
// `EngineConfig::default()` reproduces the stock behavior. A JSON file can
// override any subset of fields (missing fields keep their defaults), loaded
// with `EngineConfig::from_json`, which also validates the result.
// Validation caps every section at `MAX_SECTION_LINES` and the minimum length
// at `MAX_MIN_LINES`, so a validated config cannot overflow the planner.

use lyric_stage_pools::SectionId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chance that a line in `mix` mode uses the section's mixed pool, when it
/// has one. The remaining lines split evenly between English and Korean.
pub const MIXED_TEMPLATE_PROBABILITY: f64 = 0.16;

/// Songs shorter than this are topped up with chorus lines.
pub const DEFAULT_MIN_LINES: usize = 30;

/// Upper bound on `base + jitter` for any section, and on `outro_fallback`.
pub const MAX_SECTION_LINES: usize = 1_000;

/// Upper bound on `min_lines`.
pub const MAX_MIN_LINES: usize = 10_000;

/// Line text used when a template pool is empty.
pub const FALLBACK_LINE: &str = "We shine tonight";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed engine config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("mixed_template_probability must be within [0, 1], got {0}")]
    Probability(f64),
    #[error("min_lines must be at least 1")]
    ZeroMinLines,
    #[error("min_lines must be at most {}, got {0}", MAX_MIN_LINES)]
    MinLinesTooLarge(usize),
    #[error("section '{0}' can exceed {} lines", MAX_SECTION_LINES)]
    SectionTooLong(SectionId),
}

/// Which template pool supplies the chorus lines appended by the top-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopUpPolicy {
    /// Always the English chorus pool.
    EnglishChorus,
    /// Whatever pool the song's language option selects.
    #[default]
    MatchLanguage,
}

/// Line count for one section: `base` plus a uniform draw from `0..=jitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRule {
    pub base: usize,
    pub jitter: usize,
}

impl SectionRule {
    pub const fn new(base: usize, jitter: usize) -> Self {
        SectionRule { base, jitter }
    }

    /// Largest count this rule can produce, `None` on overflow.
    pub fn max_lines(self) -> Option<usize> {
        self.base.checked_add(self.jitter)
    }
}

/// Line-count rules for every section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionRules {
    pub intro: SectionRule,
    pub verse: SectionRule,
    pub pre: SectionRule,
    pub chorus: SectionRule,
    pub rap: SectionRule,
    pub bridge: SectionRule,
    /// Used when the outro extra is requested.
    pub outro: SectionRule,
    /// Fixed outro length when the outro extra is not requested.
    pub outro_fallback: usize,
}

impl SectionRules {
    pub fn rule(&self, section: SectionId) -> SectionRule {
        match section {
            SectionId::Intro => self.intro,
            SectionId::Verse => self.verse,
            SectionId::Pre => self.pre,
            SectionId::Chorus => self.chorus,
            SectionId::Rap => self.rap,
            SectionId::Bridge => self.bridge,
            SectionId::Outro => self.outro,
        }
    }
}

impl Default for SectionRules {
    fn default() -> Self {
        SectionRules {
            intro: SectionRule::new(2, 2),
            verse: SectionRule::new(4, 2),
            pre: SectionRule::new(3, 1),
            chorus: SectionRule::new(5, 2),
            rap: SectionRule::new(5, 2),
            bridge: SectionRule::new(3, 1),
            outro: SectionRule::new(3, 2),
            outro_fallback: 2,
        }
    }
}

/// All tunable engine parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub mixed_template_probability: f64,
    pub min_lines: usize,
    pub top_up_policy: TopUpPolicy,
    pub fallback_line: String,
    pub sections: SectionRules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            mixed_template_probability: MIXED_TEMPLATE_PROBABILITY,
            min_lines: DEFAULT_MIN_LINES,
            top_up_policy: TopUpPolicy::default(),
            fallback_line: FALLBACK_LINE.to_string(),
            sections: SectionRules::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.mixed_template_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Probability(p));
        }
        if self.min_lines == 0 {
            return Err(ConfigError::ZeroMinLines);
        }
        if self.min_lines > MAX_MIN_LINES {
            return Err(ConfigError::MinLinesTooLarge(self.min_lines));
        }
        for section in SectionId::ALL {
            let max = self.sections.rule(section).max_lines();
            if !max.is_some_and(|n| n <= MAX_SECTION_LINES) {
                return Err(ConfigError::SectionTooLong(section));
            }
        }
        if self.sections.outro_fallback > MAX_SECTION_LINES {
            return Err(ConfigError::SectionTooLong(SectionId::Outro));
        }
        Ok(())
    }
}
