// Generation request options.
//
// `GenerationOptions` is the single input to the engine besides the random
// source. It serializes with camelCase field names so saved requests read the
// same way as the result documents, and every field has a default so a
// partial JSON request is accepted.
//
// `Mode` and `LanguageMode` also parse from the short names a user types on
// the command line (`groupA`, `group-a`, `ko`, `korean`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown mode '{0}' (expected all, groupA, groupB, solo or subunit)")]
    UnknownMode(String),
    #[error("unknown language '{0}' (expected en, ko or mix)")]
    UnknownLanguage(String),
}

/// Which performers a song is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Both groups.
    #[default]
    All,
    GroupA,
    GroupB,
    /// A single member, see `GenerationOptions::solo_member`.
    Solo,
    /// A hand-picked subset, see `GenerationOptions::subunit_members`.
    Subunit,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::All => "all",
            Mode::GroupA => "groupA",
            Mode::GroupB => "groupB",
            Mode::Solo => "solo",
            Mode::Subunit => "subunit",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" | "both" => Ok(Mode::All),
            "groupa" | "group-a" | "group_a" => Ok(Mode::GroupA),
            "groupb" | "group-b" | "group_b" => Ok(Mode::GroupB),
            "solo" => Ok(Mode::Solo),
            "subunit" => Ok(Mode::Subunit),
            _ => Err(OptionError::UnknownMode(s.to_string())),
        }
    }
}

/// Language of the template pools a song draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMode {
    En,
    Ko,
    /// Per-line choice between mixed, English and Korean pools.
    #[default]
    Mix,
}

impl LanguageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageMode::En => "en",
            LanguageMode::Ko => "ko",
            LanguageMode::Mix => "mix",
        }
    }
}

impl fmt::Display for LanguageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageMode {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(LanguageMode::En),
            "ko" | "kr" | "korean" => Ok(LanguageMode::Ko),
            "mix" | "mixed" => Ok(LanguageMode::Mix),
            _ => Err(OptionError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Optional sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Extras {
    pub include_rap: bool,
    pub include_bridge: bool,
    pub include_outro: bool,
}

impl Default for Extras {
    fn default() -> Self {
        Extras {
            include_rap: true,
            include_bridge: true,
            include_outro: false,
        }
    }
}

/// Everything a caller can ask of one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    pub mode: Mode,
    pub language: LanguageMode,
    /// Free-form label copied into the song metadata.
    pub mood: String,
    pub extras: Extras,
    /// Only read in `Mode::Solo`.
    pub solo_member: Option<String>,
    /// Only read in `Mode::Subunit`.
    pub subunit_members: Vec<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        GenerationOptions {
            mode: Mode::All,
            language: LanguageMode::Mix,
            mood: "hype".to_string(),
            extras: Extras::default(),
            solo_member: None,
            subunit_members: Vec::new(),
        }
    }
}
