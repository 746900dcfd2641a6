//! # Song Sheets
//!
//! A song sheet is a title, an artist, the key it is written in, an optional
//! capo fret and the chord progression text. The progression is stored exactly
//! as typed; transposition is always applied on the way out, never saved.
//!
//! Library files describe songs as loose YAML ([`RawSong`]), which is checked
//! and turned into a [`SongDraft`] before it becomes a [`Song`].

use crate::error::SheetError;
use crate::pitch::PitchClass;
use serde::Deserialize;
use std::fmt;

/// Highest capo fret accepted
pub const MAX_CAPO: u8 = 12;

/// Key labels offered by the song form, indexed by pitch class
pub const KEY_LABELS: [&str; 12] = [
    "C", "C#/Db", "D", "D#/Eb", "E", "F", "F#/Gb", "G", "G#/Ab", "A", "A#/Bb", "B",
];

/// The key a song is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SongKey(PitchClass);

impl SongKey {
    pub fn new(pitch: PitchClass) -> Self {
        Self(pitch)
    }

    /// Parse a key label like "G", "F#/Gb", "Bb" or "C#".
    /// Both halves of a dual label have to name the same pitch.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        match trimmed.split_once('/') {
            Some((first, second)) => {
                let pitch = PitchClass::from_spelling(first.trim())?;
                (PitchClass::from_spelling(second.trim())? == pitch).then_some(Self(pitch))
            }
            None => PitchClass::from_spelling(trimmed).map(Self),
        }
    }

    pub fn pitch(self) -> PitchClass {
        self.0
    }
}

impl fmt::Display for SongKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(KEY_LABELS[self.0.value() as usize])
    }
}

/// A stored song
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub key: SongKey,
    /// Capo fret, `None` when played open
    pub capo: Option<u8>,
    pub progression: String,
    pub favorite: bool,
}

/// The editable fields of a song, as submitted by the song form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SongDraft {
    pub title: String,
    pub artist: String,
    pub key: SongKey,
    pub capo: Option<u8>,
    pub progression: String,
}

impl SongDraft {
    /// Check required fields and normalize the capo (fret 0 means no capo)
    pub fn validate(mut self) -> Result<Self, SheetError> {
        require("title", &self.title)?;
        require("artist", &self.artist)?;
        require("progression", &self.progression)?;

        self.capo = match self.capo {
            Some(0) | None => None,
            Some(fret) if fret <= MAX_CAPO => Some(fret),
            Some(fret) => {
                return Err(SheetError::InvalidField {
                    field: "capo",
                    message: format!("must be between 0 and {}, got {}", MAX_CAPO, fret),
                })
            }
        };
        Ok(self)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), SheetError> {
    if value.trim().is_empty() {
        return Err(SheetError::InvalidField {
            field,
            message: "is required".to_string(),
        });
    }
    Ok(())
}

impl Song {
    /// Build a song from a draft. New songs are never favorites.
    pub fn from_draft(id: impl Into<String>, draft: SongDraft) -> Result<Self, SheetError> {
        let draft = draft.validate()?;
        Ok(Self {
            id: id.into(),
            title: draft.title,
            artist: draft.artist,
            key: draft.key,
            capo: draft.capo,
            progression: draft.progression,
            favorite: false,
        })
    }

    /// Replace the editable fields, keeping id and favorite flag
    pub fn apply(&mut self, draft: SongDraft) -> Result<(), SheetError> {
        let draft = draft.validate()?;
        self.title = draft.title;
        self.artist = draft.artist;
        self.key = draft.key;
        self.capo = draft.capo;
        self.progression = draft.progression;
        Ok(())
    }
}

/// Raw song entry as it appears in a library file
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawSong {
    pub id: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub capo: Option<u8>,
    pub progression: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

impl RawSong {
    /// Split into the optional stored id, the favorite flag and a validated draft
    pub fn into_parts(self) -> Result<(Option<String>, bool, SongDraft), SheetError> {
        let key = match &self.key {
            Some(label) => SongKey::parse(label).ok_or_else(|| SheetError::InvalidField {
                field: "key",
                message: format!("'{}' is not one of {}", label, KEY_LABELS.join(", ")),
            })?,
            None => SongKey::default(),
        };

        let draft = SongDraft {
            title: self.title.unwrap_or_default(),
            artist: self.artist.unwrap_or_default(),
            key,
            capo: self.capo,
            progression: self.progression.unwrap_or_default(),
        }
        .validate()?;

        Ok((self.id, self.favorite, draft))
    }
}
