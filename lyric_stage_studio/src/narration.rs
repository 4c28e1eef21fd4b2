// Sequential narration of a song.
//
// Narration is split in two:
// - `narration_queue` turns a `Song` into `Utterance`s, one per line
//   ("Member: text"), tagged with a locale chosen from the line's script and
//   given a slightly jittered rate and pitch. Preview mode keeps only the
//   first `PREVIEW_LINES` lines.
// - `Narrator::play` hands the queue to a `Voice` strictly one line at a
//   time, reporting `Started`/`Finished` events around each line and pausing
//   between lines. A `StopHandle` shared with other threads aborts playback
//   at the next check; checks happen before every line and throughout every
//   pause, and voices are expected to poll it while speaking.
//
// Speech synthesis itself is not part of this crate. `ConsoleVoice` is a
// stand-in that writes each line and waits roughly as long as reading it
// aloud would take.

use crate::StudioError;
use lyric_stage_prng::RandomSource;
use lyric_stage_song::Song;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// Lines narrated in preview mode.
pub const PREVIEW_LINES: usize = 6;

/// Pause between consecutive lines.
pub const DEFAULT_LINE_GAP: Duration = Duration::from_millis(220);

/// Granularity of stop checks while waiting.
const STOP_POLL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Locale {
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "ko-KR")]
    KoKr,
}

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::KoKr => "ko-KR",
        }
    }

    /// Korean if `text` contains any Hangul, English otherwise.
    pub fn for_text(text: &str) -> Locale {
        if contains_hangul(text) {
            Locale::KoKr
        } else {
            Locale::EnUs
        }
    }
}

/// Compatibility jamo (ㄱ..ㅣ) or precomposed syllables (가..힣).
pub fn contains_hangul(text: &str) -> bool {
    text.chars()
        .any(|c| ('\u{3131}'..='\u{3163}').contains(&c) || ('\u{AC00}'..='\u{D7A3}').contains(&c))
}

/// One line ready to be spoken.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    /// Index of the line in the song.
    pub index: usize,
    pub text: String,
    pub locale: Locale,
    /// Speaking rate multiplier, around 1.0.
    pub rate: f64,
    /// Pitch multiplier, around 1.0.
    pub pitch: f64,
}

/// Build the utterance queue for a song.
pub fn narration_queue(song: &Song, preview: bool, rng: &mut impl RandomSource) -> Vec<Utterance> {
    let limit = if preview {
        PREVIEW_LINES.min(song.lines.len())
    } else {
        song.lines.len()
    };
    song.lines[..limit]
        .iter()
        .enumerate()
        .map(|(index, line)| Utterance {
            index,
            text: format!("{}: {}", line.member, line.text),
            locale: Locale::for_text(&line.text),
            rate: rng.range_f64(0.96, 1.04),
            pitch: rng.range_f64(0.98, 1.04),
        })
        .collect()
}

/// Shared flag that aborts narration.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear a previous stop so the narrator can be reused.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Sleep for `duration` or until stopped. Returns `false` if stopped.
    /// A duration too long to represent waits until stopped.
    pub fn wait(&self, duration: Duration) -> bool {
        let deadline = Instant::now().checked_add(duration);
        loop {
            if self.is_stopped() {
                return false;
            }
            let nap = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return true;
                    }
                    STOP_POLL.min(deadline - now)
                }
                None => STOP_POLL,
            };
            thread::sleep(nap);
        }
    }
}

/// Something that can speak one utterance, blocking until done or stopped.
pub trait Voice {
    fn speak(&mut self, utterance: &Utterance, stop: &StopHandle) -> Result<(), StudioError>;
}

/// Per-line playback events, for highlighting the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationEvent {
    Started(usize),
    Finished(usize),
}

/// How a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrationOutcome {
    /// Lines that finished; a line cut off by a stop is not counted.
    pub spoken: usize,
    /// Whether the stop flag was raised.
    pub stopped: bool,
}

/// Plays an utterance queue through a voice, one line at a time.
#[derive(Debug, Clone)]
pub struct Narrator {
    line_gap: Duration,
    stop: StopHandle,
}

impl Default for Narrator {
    fn default() -> Self {
        Narrator::new(DEFAULT_LINE_GAP)
    }
}

impl Narrator {
    pub fn new(line_gap: Duration) -> Self {
        Narrator {
            line_gap,
            stop: StopHandle::default(),
        }
    }

    /// Handle for stopping playback from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn play(
        &self,
        queue: &[Utterance],
        voice: &mut impl Voice,
        mut on_event: impl FnMut(NarrationEvent),
    ) -> Result<NarrationOutcome, StudioError> {
        let mut spoken = 0;
        for (i, utterance) in queue.iter().enumerate() {
            if self.stop.is_stopped() {
                break;
            }
            on_event(NarrationEvent::Started(utterance.index));
            voice.speak(utterance, &self.stop)?;
            // Cut off mid-line: not finished, not counted.
            if self.stop.is_stopped() {
                break;
            }
            on_event(NarrationEvent::Finished(utterance.index));
            spoken += 1;
            if i + 1 < queue.len() && !self.stop.wait(self.line_gap) {
                break;
            }
        }
        let stopped = self.stop.is_stopped();
        debug!(spoken, total = queue.len(), stopped, "narration finished");
        Ok(NarrationOutcome { spoken, stopped })
    }
}

/// Writes each utterance to a stream and waits in proportion to its length.
pub struct ConsoleVoice<W: Write> {
    out: W,
    per_char: Duration,
}

impl<W: Write> ConsoleVoice<W> {
    pub fn new(out: W, per_char: Duration) -> Self {
        ConsoleVoice { out, per_char }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Voice for ConsoleVoice<W> {
    fn speak(&mut self, utterance: &Utterance, stop: &StopHandle) -> Result<(), StudioError> {
        writeln!(self.out, "[{}] {}", utterance.locale.tag(), utterance.text)?;
        self.out.flush()?;
        let chars = utterance.text.chars().count() as u32;
        let duration = self.per_char.saturating_mul(chars).div_f64(utterance.rate.max(0.1));
        stop.wait(duration);
        Ok(())
    }
}
