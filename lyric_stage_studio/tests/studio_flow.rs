// End-to-end flow through the studio: generate, store, save, export, narrate.

use lyric_stage_prng::SongRng;
use lyric_stage_song::{GenerationOptions, LanguageMode, Mode, generate};
use lyric_stage_studio::{
    Locale, LyricSheet, NarrationEvent, Narrator, SongStore, StopHandle, StudioError, Utterance,
    Voice, narration_queue, sheet_file_name,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

#[derive(Default)]
struct Transcript {
    lines: Vec<(Locale, String)>,
}

impl Voice for Transcript {
    fn speak(&mut self, utterance: &Utterance, _stop: &StopHandle) -> Result<(), StudioError> {
        self.lines.push((utterance.locale, utterance.text.clone()));
        Ok(())
    }
}

#[test]
fn full_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = SongStore::open(dir.path().join("store")).unwrap();

    let options = GenerationOptions {
        mode: Mode::GroupB,
        language: LanguageMode::Ko,
        ..GenerationOptions::default()
    };
    let result = generate(&options, &mut SongRng::new(2024));
    store.store_last(&result).unwrap();

    let last = store.require_last().unwrap();
    assert_eq!(last, result);

    let entry = store.save_last_to_gallery().unwrap();
    assert_eq!(entry.title, result.song.meta.title);
    assert_eq!(store.gallery().unwrap().len(), 1);

    let sheet = LyricSheet::from_result(&last);
    let path = dir.path().join(sheet_file_name(&last.song.meta.title));
    sheet.write_to(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with(&sheet.heading));
    assert!(written.contains(&last.formatted.lines().last().unwrap().to_string()));

    let queue = narration_queue(&last.song, false, &mut SongRng::new(5));
    assert_eq!(queue.len(), last.song.lines.len());
    let mut voice = Transcript::default();
    let mut started = 0;
    let outcome = Narrator::new(Duration::ZERO)
        .play(&queue, &mut voice, |event| {
            if matches!(event, NarrationEvent::Started(_)) {
                started += 1;
            }
        })
        .unwrap();
    assert!(!outcome.stopped);
    assert_eq!(outcome.spoken, queue.len());
    assert_eq!(started, queue.len());
    // Korean-only templates always carry Hangul.
    assert!(voice.lines.iter().any(|(locale, _)| *locale == Locale::KoKr));
}

#[test]
fn operations_without_prior_result() {
    let dir = tempfile::tempdir().unwrap();
    let store = SongStore::open(dir.path()).unwrap();
    assert!(matches!(store.require_last(), Err(StudioError::NoPriorResult)));
    assert!(matches!(
        store.save_last_to_gallery(),
        Err(StudioError::NoPriorResult)
    ));
    assert!(store.gallery().unwrap().is_empty());
}

#[test]
fn preview_narration_is_short() {
    let result = generate(&GenerationOptions::default(), &mut SongRng::new(9));
    let queue = narration_queue(&result.song, true, &mut SongRng::new(9));
    assert_eq!(queue.len(), 6);
    for (i, utterance) in queue.iter().enumerate() {
        assert_eq!(utterance.index, i);
        let line = &result.song.lines[i];
        assert_eq!(utterance.text, format!("{}: {}", line.member, line.text));
    }
}

#[test]
fn stop_before_playback_speaks_nothing() {
    let result = generate(&GenerationOptions::default(), &mut SongRng::new(11));
    let queue = narration_queue(&result.song, false, &mut SongRng::new(11));
    let narrator = Narrator::new(Duration::from_millis(1));
    narrator.stop_handle().stop();
    let mut voice = Transcript::default();
    let outcome = narrator.play(&queue, &mut voice, |_| {}).unwrap();
    assert_eq!(outcome.spoken, 0);
    assert!(outcome.stopped);
    assert!(voice.lines.is_empty());
}
