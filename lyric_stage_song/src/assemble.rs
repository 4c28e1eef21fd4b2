// Song assembly: the engine's single entry point.
//
// `SongEngine::generate` runs one linear pass:
// 1. select the working member pool (`members.rs`)
// 2. plan section line counts (`plan.rs`)
// 3. for every planned line: choose a template pool for the section and
//    language, pick a template, resolve its placeholders (`resolve.rs`), then
//    draw the credited member on its own
// 4. top up with chorus lines until the song reaches `min_lines`
// 5. synthesize the title, copy the mood, render the text (`format.rs`)
//
// Nothing in this path fails. An empty template pool yields the configured
// fallback line and a warning; bad solo/subunit selections are repaired
// upstream. The engine holds only immutable pools and config, so one engine
// can serve any number of calls.

use crate::config::{EngineConfig, TopUpPolicy};
use crate::format::format_song;
use crate::members::select_member_pool;
use crate::options::{GenerationOptions, LanguageMode};
use crate::plan::plan_sections;
use crate::resolve::resolve_template;
use crate::song::{GeneratedSong, Line, Song, SongMeta, synthesize_title};
use lyric_stage_pools::{Language, Pools, SectionId, default_pools};
use lyric_stage_prng::RandomSource;
use tracing::{debug, warn};

/// Pools plus configuration.
#[derive(Debug, Clone)]
pub struct SongEngine {
    pools: Pools,
    config: EngineConfig,
}

impl Default for SongEngine {
    /// Embedded pools with the stock configuration.
    fn default() -> Self {
        SongEngine::new(default_pools(), EngineConfig::default())
    }
}

impl SongEngine {
    /// `config` is expected to have passed `EngineConfig::validate`.
    pub fn new(pools: Pools, config: EngineConfig) -> Self {
        if pools.templates.is_empty() {
            warn!("template bank is empty, every line will be the fallback line");
        }
        debug!(
            templates = pools.templates.len(),
            members = pools.members.all().len(),
            min_lines = config.min_lines,
            "song engine ready"
        );
        SongEngine { pools, config }
    }

    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build one song.
    pub fn generate(
        &self,
        options: &GenerationOptions,
        rng: &mut impl RandomSource,
    ) -> GeneratedSong {
        let members = select_member_pool(options, &self.pools.members, rng);
        let plan = plan_sections(&options.extras, &self.config.sections, rng);
        debug!(
            mode = %options.mode,
            language = %options.language,
            members = members.len(),
            planned = plan.total_lines(),
            "planned song"
        );

        let mut lines = Vec::with_capacity(plan.total_lines().max(self.config.min_lines));
        for entry in &plan.entries {
            for _ in 0..entry.count {
                lines.push(self.build_line(entry.section, options.language, &members, rng));
            }
        }

        let shortfall = self.config.min_lines.saturating_sub(lines.len());
        if shortfall > 0 {
            let language = match self.config.top_up_policy {
                TopUpPolicy::EnglishChorus => LanguageMode::En,
                TopUpPolicy::MatchLanguage => options.language,
            };
            debug!(shortfall, %language, "topping up with chorus lines");
            for _ in 0..shortfall {
                lines.push(self.build_line(SectionId::Chorus, language, &members, rng));
            }
        }

        let song = Song {
            meta: SongMeta {
                title: synthesize_title(rng),
                mood: options.mood.clone(),
            },
            lines,
        };
        let formatted = format_song(&song);
        GeneratedSong { song, formatted }
    }

    /// Template pool for one line of `section`.
    pub fn choose_template_pool(
        &self,
        section: SectionId,
        language: LanguageMode,
        rng: &mut impl RandomSource,
    ) -> &[String] {
        let templates = &self.pools.templates;
        match language {
            LanguageMode::En => templates.pool(section, Language::En),
            LanguageMode::Ko => templates.pool(section, Language::Kr),
            LanguageMode::Mix => {
                let mixed = templates.mixed(section);
                if rng.random_bool(self.config.mixed_template_probability) && !mixed.is_empty() {
                    mixed
                } else if rng.coin_flip() {
                    templates.pool(section, Language::En)
                } else {
                    templates.pool(section, Language::Kr)
                }
            }
        }
    }

    fn build_line(
        &self,
        section: SectionId,
        language: LanguageMode,
        members: &[String],
        rng: &mut impl RandomSource,
    ) -> Line {
        let pool = self.choose_template_pool(section, language, rng);
        let template = match rng.pick(pool) {
            Some(t) => t.as_str(),
            None => {
                warn!(%section, %language, "empty template pool, using fallback line");
                self.config.fallback_line.as_str()
            }
        };
        let text = resolve_template(template, &self.pools.fragments, members, rng);
        let member = rng.pick(members).cloned().unwrap_or_default();
        Line {
            section,
            member,
            text,
        }
    }
}
