// Lyric Stage song-construction engine.
//
// Builds pseudo-song lyrics by filling `${key}` placeholders in section
// templates with fragments drawn from fixed English and Korean pools, then
// lays the lines out in a fixed song form.
//
// Architecture:
// - options.rs: `GenerationOptions` (mode, language, mood, extras, selections)
// - config.rs: `EngineConfig`, every tunable count and probability
// - members.rs: working member pool selection per mode
// - resolve.rs: placeholder resolver
// - plan.rs: section planner (canonical order + per-section line counts)
// - song.rs: `Song`, `Line`, `GeneratedSong`, title synthesis
// - assemble.rs: `SongEngine`, drives the planner and resolver, tops up
// - format.rs: plain-text rendering with section headers
//
// All randomness is injected as `&mut impl RandomSource`; a seeded `SongRng`
// reproduces a song exactly.

pub mod assemble;
pub mod config;
pub mod format;
pub mod members;
pub mod options;
pub mod plan;
pub mod resolve;
pub mod song;

pub use assemble::SongEngine;
pub use config::{ConfigError, EngineConfig, TopUpPolicy};
pub use format::format_song;
pub use options::{Extras, GenerationOptions, LanguageMode, Mode, OptionError};
pub use song::{GeneratedSong, Line, Song, SongMeta};

use lyric_stage_prng::RandomSource;
use std::sync::LazyLock;

static DEFAULT_ENGINE: LazyLock<SongEngine> = LazyLock::new(SongEngine::default);

/// Generate a song with the embedded pools and the stock configuration.
pub fn generate(options: &GenerationOptions, rng: &mut impl RandomSource) -> GeneratedSong {
    DEFAULT_ENGINE.generate(options, rng)
}
