//! # Song Library
//!
//! In-memory collection of songs with the operations the song list needs:
//! add, edit, delete, favorite toggling and search.
//!
//! Songs are kept newest first. Saving the collection somewhere is the
//! caller's business; the library only reads its starting state from a YAML
//! library file ([`parse_library`]).
//!
//! ## Library File
//! ```yaml
//! settings:
//!   bass: transpose        # verbatim | transpose
//!   vocabulary: extended   # standard | extended
//!   spelling: sharps       # sharps | flats
//! songs:
//!   - id: wonderwall
//!     title: Wonderwall
//!     artist: Oasis
//!     key: F#/Gb
//!     capo: 2
//!     favorite: true
//!     progression: |
//!       Em7  G  Dsus4  A7sus4
//! ```

use crate::error::SheetError;
use crate::sheet::{RawSong, Song, SongDraft, SongKey};
use crate::transpose::TransposeOptions;
use serde::Deserialize;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::{debug, info};

/// Search criteria for [`Library::filter`]. The default matches every song.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongFilter {
    /// Case-insensitive text matched against title, artist and progression
    pub query: String,
    pub key: Option<SongKey>,
    pub favorites_only: bool,
}

impl SongFilter {
    pub fn matches(&self, song: &Song) -> bool {
        self.matches_lowercased(song, &self.query.to_lowercase())
    }

    /// `matches` with the query already lowercased, so a whole list can share it
    fn matches_lowercased(&self, song: &Song, query: &str) -> bool {
        let matches_query = query.is_empty()
            || song.title.to_lowercase().contains(query)
            || song.artist.to_lowercase().contains(query)
            || song.progression.to_lowercase().contains(query);
        let matches_key = self.key.map_or(true, |key| song.key == key);
        let matches_favorite = !self.favorites_only || song.favorite;

        matches_query && matches_key && matches_favorite
    }
}

#[derive(Debug, Clone, Default)]
pub struct Library {
    songs: Vec<Song>,
    next_id: u64,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == id)
    }

    pub fn favorites_count(&self) -> usize {
        self.songs.iter().filter(|song| song.favorite).count()
    }

    fn position(&self, id: &str) -> Result<usize, SheetError> {
        self.songs
            .iter()
            .position(|song| song.id == id)
            .ok_or_else(|| SheetError::SongNotFound(id.to_string()))
    }

    /// Add a new song at the top of the list
    pub fn add(&mut self, draft: SongDraft) -> Result<&Song, SheetError> {
        let reserved: HashSet<&str> = self.songs.iter().map(|song| song.id.as_str()).collect();
        let id = generate_id(&mut self.next_id, &reserved);
        let song = Song::from_draft(id, draft)?;
        debug!(id = %song.id, title = %song.title, "added song");
        self.songs.insert(0, song);
        Ok(&self.songs[0])
    }

    /// Replace a song's editable fields. The favorite flag is kept.
    pub fn update(&mut self, id: &str, draft: SongDraft) -> Result<&Song, SheetError> {
        let index = self.position(id)?;
        self.songs[index].apply(draft)?;
        debug!(id, "updated song");
        Ok(&self.songs[index])
    }

    pub fn delete(&mut self, id: &str) -> Result<Song, SheetError> {
        let index = self.position(id)?;
        let song = self.songs.remove(index);
        debug!(id, "deleted song");
        Ok(song)
    }

    /// Flip the favorite flag and return the new value
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, SheetError> {
        let index = self.position(id)?;
        let song = &mut self.songs[index];
        song.favorite = !song.favorite;
        debug!(id, favorite = song.favorite, "toggled favorite");
        Ok(song.favorite)
    }

    /// Songs matching `filter`, in library order
    pub fn filter(&self, filter: &SongFilter) -> Vec<&Song> {
        let query = filter.query.to_lowercase();
        self.songs
            .iter()
            .filter(|song| filter.matches_lowercased(song, &query))
            .collect()
    }
}

/// Next `chord_<n>` id not in `reserved`, advancing the counter past it
fn generate_id<S>(next_id: &mut u64, reserved: &HashSet<S>) -> String
where
    S: Borrow<str> + Eq + Hash,
{
    loop {
        *next_id += 1;
        let id = format!("chord_{}", next_id);
        if !reserved.contains(id.as_str()) {
            return id;
        }
    }
}

/// A parsed library file: transposition settings plus the songs
#[derive(Debug, Clone, Default)]
pub struct LibraryFile {
    pub settings: TransposeOptions,
    pub library: Library,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawLibrary {
    #[serde(default)]
    settings: TransposeOptions,
    #[serde(default)]
    songs: Vec<RawSong>,
}

/// Parse a YAML library file.
///
/// Songs keep the order they are listed in. Entries without an `id` get a
/// generated one; duplicate ids are rejected.
///
/// # Example
/// ```
/// use chordsheet::parse_library;
///
/// let file = parse_library(r#"
/// songs:
///   - title: Let It Be
///     artist: The Beatles
///     key: C
///     progression: C  G  Am  F
/// "#)?;
/// assert_eq!(file.library.len(), 1);
/// assert_eq!(file.library.songs()[0].id, "chord_1");
/// # Ok::<(), chordsheet::SheetError>(())
/// ```
pub fn parse_library(source: &str) -> Result<LibraryFile, SheetError> {
    if source.trim().is_empty() {
        return Ok(LibraryFile::default());
    }

    let raw: RawLibrary =
        serde_yaml::from_str(source).map_err(|e| SheetError::MetadataError(e.to_string()))?;

    let mut library = Library::new();
    let mut seen = HashSet::new();
    let mut pending = Vec::new();

    for (index, raw_song) in raw.songs.into_iter().enumerate() {
        let entry = index + 1;
        let (id, favorite, draft) = raw_song.into_parts().map_err(|e| SheetError::InvalidSong {
            entry,
            message: e.to_string(),
        })?;

        if let Some(id) = &id {
            if !seen.insert(id.clone()) {
                return Err(SheetError::InvalidSong {
                    entry,
                    message: format!("duplicate id '{}'", id),
                });
            }
        }
        pending.push((id, favorite, draft));
    }

    // Generated ids must not collide with any id given in the file, so they
    // are handed out only after every explicit id is known
    for (id, favorite, draft) in pending {
        let id = match id {
            Some(id) => id,
            None => generate_id(&mut library.next_id, &seen),
        };
        let mut song = Song::from_draft(id, draft)?;
        song.favorite = favorite;
        library.songs.push(song);
    }

    info!(
        songs = library.len(),
        favorites = library.favorites_count(),
        "loaded song library"
    );
    Ok(LibraryFile {
        settings: raw.settings,
        library,
    })
}
