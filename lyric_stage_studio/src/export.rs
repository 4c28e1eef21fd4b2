// Paginated lyric sheet export.
//
// Renders a generated song as a printable plain-text document: the heading
// "<title> — <mood>" with an underline at the top of the first page, then the
// formatted lyrics as a monospaced body. Pages hold a fixed number of lines
// (the last two are a blank line and a "Page n of m" footer) and are
// separated by a form feed, which printers and `pr`-style tools treat as a
// page break.

use crate::StudioError;
use lyric_stage_song::GeneratedSong;
use std::fs;
use std::path::Path;

/// Lines per page, footer included. Fits A4 at 10pt monospace.
pub const LINES_PER_PAGE: usize = 60;

const FOOTER_LINES: usize = 2;
const FORM_FEED: char = '\u{000C}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricSheet {
    pub heading: String,
    pages: Vec<Vec<String>>,
}

impl LyricSheet {
    pub fn new(title: &str, mood: &str, formatted: &str) -> Self {
        Self::with_page_length(title, mood, formatted, LINES_PER_PAGE)
    }

    pub fn from_result(result: &GeneratedSong) -> Self {
        Self::new(&result.song.meta.title, &result.song.meta.mood, &result.formatted)
    }

    /// Build a sheet with `lines_per_page` lines per page (at least one body
    /// line is always kept per page).
    pub fn with_page_length(title: &str, mood: &str, formatted: &str, lines_per_page: usize) -> Self {
        let heading = format!("{title} — {mood}");
        let mut body = vec![
            heading.clone(),
            "=".repeat(heading.chars().count()),
            String::new(),
        ];
        body.extend(formatted.lines().map(str::to_string));

        let per_page = lines_per_page.saturating_sub(FOOTER_LINES).max(1);
        let pages = body.chunks(per_page).map(<[String]>::to_vec).collect();
        LyricSheet { heading, pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Body lines of page `n` (zero-based).
    pub fn page(&self, n: usize) -> Option<&[String]> {
        self.pages.get(n).map(Vec::as_slice)
    }

    pub fn render(&self) -> String {
        let total = self.pages.len();
        let mut out = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                out.push(FORM_FEED);
                out.push('\n');
            }
            for line in page {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&format!("Page {} of {}\n", i + 1, total));
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> Result<(), StudioError> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

/// File name for a song's sheet: whitespace runs become `_`.
pub fn sheet_file_name(title: &str) -> String {
    let stem: Vec<&str> = title.split_whitespace().collect();
    let stem = if stem.is_empty() {
        "lyrics".to_string()
    } else {
        stem.join("_")
    };
    format!("{stem}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_page_sheet() {
        let sheet = LyricSheet::new("Neon Heart", "hype", "Title: Neon Heart\nMood: hype\n");
        assert_eq!(sheet.page_count(), 1);
        assert_eq!(
            sheet.render(),
            "Neon Heart — hype\n=================\n\nTitle: Neon Heart\nMood: hype\n\nPage 1 of 1\n"
        );
    }

    #[test]
    fn test_pagination() {
        let formatted: String = (0..20).map(|i| format!("line {i}\n")).collect();
        // 3 heading lines + 20 body lines, 5 per page.
        let sheet = LyricSheet::with_page_length("A", "b", &formatted, 7);
        assert_eq!(sheet.page_count(), 5);
        assert_eq!(sheet.page(0).unwrap()[0], "A — b");
        assert_eq!(sheet.page(4).unwrap(), ["line 17", "line 18", "line 19"]);
        let rendered = sheet.render();
        assert_eq!(rendered.matches(FORM_FEED).count(), 4);
        assert!(rendered.ends_with("Page 5 of 5\n"));
    }

    #[test]
    fn test_tiny_page_length_still_progresses() {
        let sheet = LyricSheet::with_page_length("A", "b", "x\ny", 1);
        assert_eq!(sheet.page_count(), 5);
    }

    #[test]
    fn test_sheet_file_name() {
        assert_eq!(sheet_file_name("Midnight  Fever"), "Midnight_Fever.txt");
        assert_eq!(sheet_file_name("   "), "lyrics.txt");
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.txt");
        let sheet = LyricSheet::new("Neon Run", "calm", "Jisoo: hi\n");
        sheet.write_to(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), sheet.render());
    }
}
