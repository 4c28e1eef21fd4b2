// Placeholder resolver: fills `${key}` tokens in a template.
//
// A token is `$`, `{`, one or more non-`}` characters, `}`. Each token is
// resolved on its own, so a template that mentions `${member}` twice may name
// two different people.
//
// - `member` draws from the working member pool.
// - `color`, `place`, `emotion`, `time` draw from their single pool.
// - `adlib`, `subject`, `verb`, `object` flip a coin for English or Korean
//   first, then draw from that half.
// - Any other key becomes the empty string. A `${` with no closing brace is
//   not a token and stays in the text as written.

use lyric_stage_pools::{Category, FragmentBank, Language};
use lyric_stage_prng::RandomSource;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::trace;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

/// What a placeholder key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Member,
    Fragment(Category),
    Unknown,
}

impl Placeholder {
    pub fn parse(key: &str) -> Placeholder {
        if key == "member" {
            return Placeholder::Member;
        }
        match Category::from_key(key) {
            Some(category) => Placeholder::Fragment(category),
            None => Placeholder::Unknown,
        }
    }
}

/// Keys of every token in `template`, in order of appearance.
pub fn placeholder_keys(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Replace every token in `template`.
pub fn resolve_template(
    template: &str,
    fragments: &FragmentBank,
    members: &[String],
    rng: &mut impl RandomSource,
) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            resolve_key(&caps[1], fragments, members, &mut *rng)
        })
        .into_owned()
}

fn resolve_key(
    key: &str,
    fragments: &FragmentBank,
    members: &[String],
    rng: &mut impl RandomSource,
) -> String {
    match Placeholder::parse(key) {
        Placeholder::Member => rng.pick(members).cloned().unwrap_or_default(),
        Placeholder::Fragment(category) => {
            let lang = if category.is_bilingual() && !rng.coin_flip() {
                Language::Kr
            } else {
                Language::En
            };
            rng.pick(fragments.pool(category, lang))
                .cloned()
                .unwrap_or_default()
        }
        Placeholder::Unknown => {
            trace!(key, "unrecognized placeholder, substituting nothing");
            String::new()
        }
    }
}
