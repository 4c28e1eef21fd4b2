// On-disk result store.
//
// A store is a directory with two JSON documents:
// - `last_song.json`: the most recent `GeneratedSong`, overwritten on every
//   generation. Narration, export and saving all read from this slot.
// - `saved_songs.json`: the gallery, a list of `{ title, date, formatted }`
//   summaries, newest first, capped at `GALLERY_CAP` entries (the oldest
//   fall off the end).
//
// The engine never touches the store; callers write to it after generating.
// Reading the last-result slot before anything was generated is reported as
// `StudioError::NoPriorResult`.

use crate::StudioError;
use lyric_stage_song::GeneratedSong;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const LAST_SONG_FILE: &str = "last_song.json";
pub const GALLERY_FILE: &str = "saved_songs.json";
pub const GALLERY_CAP: usize = 80;

/// Gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSong {
    pub title: String,
    pub date: String,
    pub formatted: String,
}

impl SavedSong {
    pub fn new(result: &GeneratedSong, date: impl Into<String>) -> Self {
        SavedSong {
            title: result.song.meta.title.clone(),
            date: date.into(),
            formatted: result.formatted.clone(),
        }
    }
}

/// Directory-backed store.
#[derive(Debug, Clone)]
pub struct SongStore {
    dir: PathBuf,
    gallery_cap: usize,
}

impl SongStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StudioError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(SongStore {
            dir,
            gallery_cap: GALLERY_CAP,
        })
    }

    pub fn with_gallery_cap(mut self, cap: usize) -> Self {
        self.gallery_cap = cap;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Overwrite the last-result slot.
    pub fn store_last(&self, result: &GeneratedSong) -> Result<(), StudioError> {
        let json = serde_json::to_string_pretty(result)?;
        fs::write(self.dir.join(LAST_SONG_FILE), json)?;
        info!(title = %result.song.meta.title, "stored last song");
        Ok(())
    }

    /// The last result, if any.
    pub fn load_last(&self) -> Result<Option<GeneratedSong>, StudioError> {
        let path = self.dir.join(LAST_SONG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// The last result, or `NoPriorResult`.
    pub fn require_last(&self) -> Result<GeneratedSong, StudioError> {
        self.load_last()?.ok_or(StudioError::NoPriorResult)
    }

    /// Gallery entries, newest first. Missing file means an empty gallery.
    pub fn gallery(&self) -> Result<Vec<SavedSong>, StudioError> {
        let path = self.dir.join(GALLERY_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Prepend an entry, evicting the oldest past the cap.
    pub fn push_gallery(&self, entry: SavedSong) -> Result<Vec<SavedSong>, StudioError> {
        let mut saved = self.gallery()?;
        saved.insert(0, entry);
        saved.truncate(self.gallery_cap);
        fs::write(
            self.dir.join(GALLERY_FILE),
            serde_json::to_string_pretty(&saved)?,
        )?;
        Ok(saved)
    }

    /// Save the last result to the gallery, stamped with the local time.
    pub fn save_last_to_gallery(&self) -> Result<SavedSong, StudioError> {
        let last = self.require_last()?;
        let date = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let entry = SavedSong::new(&last, date);
        let saved = self.push_gallery(entry.clone())?;
        info!(title = %entry.title, entries = saved.len(), "saved song to gallery");
        Ok(entry)
    }
}
