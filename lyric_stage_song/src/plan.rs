// Section planning: how many lines each part of the song gets.
//
// Songs follow one canonical form:
//
//   intro, verse, pre, chorus, verse, rap, bridge, chorus, outro
//
// Each entry's count is its rule's base plus a uniform jitter. The extras
// toggle three sections, each differently:
// - rap off: the entry stays in the plan with a count of 0
// - bridge off: the entry is dropped from the plan entirely
// - outro off: the entry uses the fixed fallback count, no jitter
//
// The plan only fixes counts. Minimum-length enforcement happens after
// assembly (see `assemble.rs`), since it appends lines rather than
// re-planning.

use crate::config::SectionRules;
use crate::options::Extras;
use lyric_stage_pools::SectionId;
use lyric_stage_prng::RandomSource;

/// Section order every song follows.
pub const CANONICAL_ORDER: [SectionId; 9] = [
    SectionId::Intro,
    SectionId::Verse,
    SectionId::Pre,
    SectionId::Chorus,
    SectionId::Verse,
    SectionId::Rap,
    SectionId::Bridge,
    SectionId::Chorus,
    SectionId::Outro,
];

/// One planned section and its line count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedSection {
    pub section: SectionId,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionPlan {
    pub entries: Vec<PlannedSection>,
}

impl SectionPlan {
    pub fn total_lines(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn contains(&self, section: SectionId) -> bool {
        self.entries.iter().any(|e| e.section == section)
    }
}

/// Build the plan for one song.
pub fn plan_sections(
    extras: &Extras,
    rules: &SectionRules,
    rng: &mut impl RandomSource,
) -> SectionPlan {
    let mut entries = Vec::with_capacity(CANONICAL_ORDER.len());

    for section in CANONICAL_ORDER {
        let count = match section {
            SectionId::Rap if !extras.include_rap => 0,
            SectionId::Bridge if !extras.include_bridge => continue,
            SectionId::Outro if !extras.include_outro => rules.outro_fallback,
            _ => {
                let rule = rules.rule(section);
                rule.base + rng.range_usize_inclusive(0, rule.jitter)
            }
        };
        entries.push(PlannedSection { section, count });
    }

    SectionPlan { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SectionRule;
    use lyric_stage_prng::SongRng;

    fn extras(rap: bool, bridge: bool, outro: bool) -> Extras {
        Extras {
            include_rap: rap,
            include_bridge: bridge,
            include_outro: outro,
        }
    }

    #[test]
    fn test_full_plan_follows_canonical_order() {
        let mut rng = SongRng::new(3);
        let plan = plan_sections(&extras(true, true, true), &SectionRules::default(), &mut rng);
        let order: Vec<SectionId> = plan.entries.iter().map(|e| e.section).collect();
        assert_eq!(order, CANONICAL_ORDER);
    }

    #[test]
    fn test_counts_within_rule_bounds() {
        let rules = SectionRules::default();
        for seed in 0..100 {
            let mut rng = SongRng::new(seed);
            let plan = plan_sections(&extras(true, true, true), &rules, &mut rng);
            for entry in &plan.entries {
                let rule = rules.rule(entry.section);
                assert!(
                    (rule.base..=rule.base + rule.jitter).contains(&entry.count),
                    "{} count {} outside {:?}",
                    entry.section,
                    entry.count,
                    rule
                );
            }
        }
    }

    #[test]
    fn test_rap_disabled_keeps_zero_entry() {
        let mut rng = SongRng::new(11);
        let plan = plan_sections(&extras(false, true, false), &SectionRules::default(), &mut rng);
        let rap = plan
            .entries
            .iter()
            .find(|e| e.section == SectionId::Rap)
            .unwrap();
        assert_eq!(rap.count, 0);
    }

    #[test]
    fn test_bridge_disabled_is_absent() {
        let mut rng = SongRng::new(11);
        let plan = plan_sections(&extras(true, false, false), &SectionRules::default(), &mut rng);
        assert!(!plan.contains(SectionId::Bridge));
        assert_eq!(plan.entries.len(), CANONICAL_ORDER.len() - 1);
    }

    #[test]
    fn test_outro_disabled_uses_fallback() {
        let rules = SectionRules::default();
        for seed in 0..20 {
            let mut rng = SongRng::new(seed);
            let plan = plan_sections(&extras(true, true, false), &rules, &mut rng);
            let outro = plan.entries.last().unwrap();
            assert_eq!(outro.section, SectionId::Outro);
            assert_eq!(outro.count, rules.outro_fallback);
        }
    }

    #[test]
    fn test_zero_jitter_is_exact() {
        let flat = SectionRule::new(1, 0);
        let rules = SectionRules {
            intro: flat,
            verse: flat,
            pre: flat,
            chorus: flat,
            rap: flat,
            bridge: flat,
            outro: flat,
            outro_fallback: 0,
        };
        let mut rng = SongRng::new(0);
        let plan = plan_sections(&extras(true, true, true), &rules, &mut rng);
        assert_eq!(plan.total_lines(), 9);
    }
}
