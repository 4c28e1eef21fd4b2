// Lyric Stage studio: everything that happens to a song after generation.
//
// The engine (`lyric_stage_song`) returns a `GeneratedSong` value and keeps no
// state. This crate takes that value and does the I/O around it:
//
// - store.rs: last-result slot and bounded gallery on disk
// - narration.rs: utterance queue, sequential playback with a hard stop
// - export.rs: paginated plain-text lyric sheets
// - main.rs: the `lyric-stage` command-line front end
//
// Operations that need a prior result (narrate, export, save, show) take it
// from the store explicitly and fail with `NoPriorResult` when there is none.

pub mod export;
pub mod narration;
pub mod store;

pub use export::{LyricSheet, sheet_file_name};
pub use narration::{
    ConsoleVoice, Locale, NarrationEvent, NarrationOutcome, Narrator, StopHandle, Utterance, Voice,
    narration_queue,
};
pub use store::{SavedSong, SongStore};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("no song has been generated yet")]
    NoPriorResult,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed stored data: {0}")]
    Json(#[from] serde_json::Error),
}
