// Pool data for the Lyric Stage generator.
//
// Holds the three static banks the song engine draws from: fragment pools
// (filler words per placeholder category), template pools (lyric line
// templates per section and language) and the member roster. No generation
// logic lives here.
//
// Architecture:
// - `types.rs`: `SectionId`, `Language`, `Category`
// - `fragments.rs`: `FragmentBank`, validated non-empty per category
// - `templates.rs`: `TemplateBank`, keyed by section with en/kr/mix pools
// - `members.rs`: `MemberRoster`, two disjoint groups and their union
// - `lib.rs` (this file): `Pools` bundle, `PoolError`, embedded defaults
//
// The default banks live in `data/*.json` at the workspace root and are
// embedded with `include_str!`. `Pools::from_json` accepts custom banks in
// the same format.

pub mod fragments;
pub mod members;
pub mod templates;
pub mod types;

pub use fragments::FragmentBank;
pub use members::{Group, MemberRoster};
pub use templates::TemplateBank;
pub use types::{Category, Language, SectionId};

use thiserror::Error;

/// Failure to load a pool bank.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("malformed pool data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("pool '{0}' is empty")]
    EmptyPool(String),
    #[error("member '{0}' appears in both groups")]
    OverlappingGroups(String),
}

/// Every bank the engine reads. Immutable once built.
#[derive(Debug, Clone)]
pub struct Pools {
    pub fragments: FragmentBank,
    pub templates: TemplateBank,
    pub members: MemberRoster,
}

impl Pools {
    /// Parse all three banks from JSON strings.
    pub fn from_json(fragments: &str, templates: &str, members: &str) -> Result<Self, PoolError> {
        Ok(Pools {
            fragments: FragmentBank::from_json(fragments)?,
            templates: TemplateBank::from_json(templates)?,
            members: MemberRoster::from_json(members)?,
        })
    }
}

/// Load the pools embedded at compile time.
///
/// Panics if the embedded JSON is malformed, which the tests below rule out.
pub fn default_pools() -> Pools {
    Pools::from_json(
        include_str!("../../data/fragments.json"),
        include_str!("../../data/templates.json"),
        include_str!("../../data/members.json"),
    )
    .expect("embedded pool data is malformed")
}
