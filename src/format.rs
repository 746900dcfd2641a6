//! Plain-text export of a song sheet, used for copy to clipboard.
//!
//! ```text
//! Wonderwall - Oasis
//! Key: F#/Gb | Capo: 2 | Transposed: +2
//!
//! F#m7  A  D/F#  E
//! ```

use crate::pitch::normalize_offset;
use crate::sheet::Song;
use crate::transpose::{transpose_with_options, TransposeOptions};

/// Signed label for an offset: `+2`, `-3`, `0`
pub fn offset_label(offset: i32) -> String {
    if offset > 0 {
        format!("+{}", offset)
    } else {
        offset.to_string()
    }
}

/// Header line with key, capo and the active transposition
pub fn header_line(song: &Song, offset: i32) -> String {
    let mut line = format!("Key: {}", song.key);
    if let Some(capo) = song.capo {
        line.push_str(&format!(" | Capo: {}", capo));
    }
    if offset != 0 {
        line.push_str(&format!(" | Transposed: {}", offset_label(offset)));
    }
    line
}

/// Full sheet text: title line, header line, blank line, transposed progression.
///
/// The key in the header is the key the song is stored in; the offset label
/// tells the reader how far the body has been moved.
///
/// # Example
/// ```
/// use chordsheet::{sheet_text, Song, SongDraft, SongKey, TransposeOptions};
///
/// let song = Song::from_draft("chord_1", SongDraft {
///     title: "Let It Be".to_string(),
///     artist: "The Beatles".to_string(),
///     key: SongKey::default(),
///     capo: None,
///     progression: "C  G  Am  F".to_string(),
/// })?;
///
/// assert_eq!(
///     sheet_text(&song, -2, &TransposeOptions::default()),
///     "Let It Be - The Beatles\nKey: C | Transposed: -2\n\nA#  F  Gm  D#"
/// );
/// # Ok::<(), chordsheet::SheetError>(())
/// ```
pub fn sheet_text(song: &Song, offset: i32, options: &TransposeOptions) -> String {
    let offset = normalize_offset(offset);
    format!(
        "{} - {}\n{}\n\n{}",
        song.title,
        song.artist,
        header_line(song, offset),
        transpose_with_options(&song.progression, offset, options)
    )
}
