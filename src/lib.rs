pub mod error;
pub mod format;
pub mod library;
pub mod pitch;
pub mod scanner;
pub mod sheet;
pub mod transpose;
pub mod viewer;

pub use error::*;
pub use format::{header_line, offset_label, sheet_text};
pub use library::{parse_library, Library, LibraryFile, SongFilter};
pub use pitch::{normalize_offset, PitchClass, Spelling};
pub use scanner::{ChordScanner, ChordToken, Vocabulary};
pub use sheet::{Song, SongDraft, SongKey};
pub use transpose::{transpose, transpose_with_options, BassNotes, TransposeOptions};
pub use viewer::TransposeControl;

/// Export every song in `library` that matches `filter`, transposed by `offset`.
/// This is the main entry point for printing a songbook.
pub fn export_sheets(
    library: &Library,
    filter: &SongFilter,
    offset: i32,
    options: &TransposeOptions,
) -> Vec<String> {
    library
        .filter(filter)
        .into_iter()
        .map(|song| sheet_text(song, offset, options))
        .collect()
}

/// Parse a library file and export the matching songs using the file's own settings
pub fn export_library(source: &str, filter: &SongFilter, offset: i32) -> Result<Vec<String>, SheetError> {
    let file = parse_library(source)?;
    Ok(export_sheets(&file.library, filter, offset, &file.settings))
}
