// Plain-text rendering of a song.
//
// Layout:
//
//   Title: Neon Run
//   Mood: hype
//
//
//   [INTRO]
//   Jisoo: ...
//   Lisa: ...
//
//   [VERSE]
//   ...
//
// A `[SECTION]` header is written whenever a line's section differs from the
// previous line's, so the second verse gets its own header and a top-up
// chorus that follows the final chorus does not. Pure function of the song.

use crate::song::Song;
use std::fmt::Write;

pub fn format_song(song: &Song) -> String {
    let mut out = String::new();
    let _ = write!(out, "Title: {}\nMood: {}\n\n", song.meta.title, song.meta.mood);

    let mut current = None;
    for line in &song.lines {
        if current != Some(line.section) {
            let _ = write!(out, "\n[{}]\n", line.section.as_str().to_uppercase());
            current = Some(line.section);
        }
        let _ = writeln!(out, "{}: {}", line.member, line.text);
    }

    out
}
