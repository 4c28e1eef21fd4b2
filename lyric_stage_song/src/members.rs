// Working member pool selection.
//
// Turns the requested `Mode` into the list of performers a song may credit
// or mention. The result is never empty: a solo request without a name gets
// one random member, and a subunit request without names gets three random
// members sampled without replacement. Those repairs are logged, not
// reported as errors.

use crate::options::{GenerationOptions, Mode};
use lyric_stage_pools::MemberRoster;
use lyric_stage_prng::RandomSource;
use tracing::debug;

/// Members drawn for a subunit request that names nobody.
pub const RANDOM_SUBUNIT_SIZE: usize = 3;

/// Compute the working member pool for a request.
pub fn select_member_pool(
    options: &GenerationOptions,
    roster: &MemberRoster,
    rng: &mut impl RandomSource,
) -> Vec<String> {
    match options.mode {
        Mode::All => roster.all().to_vec(),
        Mode::GroupA => roster.group_a().members.clone(),
        Mode::GroupB => roster.group_b().members.clone(),
        Mode::Solo => {
            let named = options
                .solo_member
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty());
            match named {
                Some(name) => vec![name.to_string()],
                None => {
                    let pick: Vec<String> = rng.pick(roster.all()).cloned().into_iter().collect();
                    debug!(member = ?pick, "invalid selection: no solo member, picked one at random");
                    pick
                }
            }
        }
        Mode::Subunit => {
            let mut named: Vec<String> = Vec::new();
            for name in options.subunit_members.iter().map(|n| n.trim()) {
                if !name.is_empty() && !named.iter().any(|n| n == name) {
                    named.push(name.to_string());
                }
            }
            if named.is_empty() {
                named = rng.sample_distinct(roster.all(), RANDOM_SUBUNIT_SIZE);
                debug!(members = ?named, "invalid selection: empty subunit, sampled at random");
            }
            named
        }
    }
}
