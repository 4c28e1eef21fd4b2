// Song value types and title synthesis.
//
// A `Song` is built fresh per generation call and never mutated by the
// engine afterwards. `GeneratedSong` pairs it with its formatted text; that
// pair is what callers persist, narrate and export. Both serialize to the
// same JSON shape the stored results use (`{ song: { meta, lines }, formatted }`).

use lyric_stage_pools::SectionId;
use lyric_stage_prng::RandomSource;
use serde::{Deserialize, Serialize};

/// Title first words.
pub const TITLE_ADJECTIVES: [&str; 5] = ["Neon", "Midnight", "Starlight", "Moonlight", "Forever"];
/// Title second words.
pub const TITLE_NOUNS: [&str; 5] = ["Dream", "Fever", "Blaze", "Run", "Heart"];

/// One lyric line. `member` is the credited performer, drawn separately from
/// any name that appears inside `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub section: SectionId,
    pub member: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongMeta {
    pub title: String,
    pub mood: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub meta: SongMeta,
    pub lines: Vec<Line>,
}

impl Song {
    /// Number of lines in `section`.
    pub fn count_section(&self, section: SectionId) -> usize {
        self.lines.iter().filter(|l| l.section == section).count()
    }

    pub fn has_section(&self, section: SectionId) -> bool {
        self.lines.iter().any(|l| l.section == section)
    }
}

/// Engine output: the structured song plus its rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSong {
    pub song: Song,
    pub formatted: String,
}

/// "Adjective Noun" from the two title word lists.
pub fn synthesize_title(rng: &mut impl RandomSource) -> String {
    let adjective = rng.pick(&TITLE_ADJECTIVES).copied().unwrap_or("Neon");
    let noun = rng.pick(&TITLE_NOUNS).copied().unwrap_or("Dream");
    format!("{adjective} {noun}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyric_stage_prng::SongRng;

    #[test]
    fn test_title_words_from_lists() {
        for seed in 0..30 {
            let mut rng = SongRng::new(seed);
            let title = synthesize_title(&mut rng);
            let (adjective, noun) = title.split_once(' ').unwrap();
            assert!(TITLE_ADJECTIVES.contains(&adjective), "{title}");
            assert!(TITLE_NOUNS.contains(&noun), "{title}");
        }
    }

    #[test]
    fn test_song_json_shape() {
        let song = Song {
            meta: SongMeta {
                title: "Neon Run".into(),
                mood: "hype".into(),
            },
            lines: vec![Line {
                section: SectionId::Pre,
                member: "Asa".into(),
                text: "Close your eyes".into(),
            }],
        };
        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(value["meta"]["title"], "Neon Run");
        assert_eq!(value["lines"][0]["section"], "pre");
        assert_eq!(value["lines"][0]["member"], "Asa");
        assert_eq!(song.count_section(SectionId::Pre), 1);
        assert!(!song.has_section(SectionId::Rap));
    }
}
