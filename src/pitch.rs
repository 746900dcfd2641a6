//! Pitch classes and the note-name tables used to read and re-spell chord roots.

use serde::Deserialize;
use std::fmt;

/// Canonical sharp spellings, indexed by pitch class (0 = C)
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings, indexed by pitch class (0 = C)
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Which accidental to use when writing a pitch class back out as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

/// One of the twelve equal-tempered semitones, 0 = C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    pub fn new(value: u8) -> Option<Self> {
        (value < 12).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Look up a root spelling such as `"G"`, `"F#"` or `"Bb"`.
    ///
    /// Spellings carrying a flat are read from the flat table, everything else
    /// from the sharp table. Spellings that neither table contains (`E#`, `B#`,
    /// `Cb`, `Fb`) return `None`.
    ///
    /// # Example
    /// ```
    /// use chordsheet::PitchClass;
    ///
    /// assert_eq!(PitchClass::from_spelling("Bb"), PitchClass::new(10));
    /// assert_eq!(PitchClass::from_spelling("A#"), PitchClass::new(10));
    /// assert_eq!(PitchClass::from_spelling("E#"), None);
    /// ```
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        let table = if spelling.contains('b') {
            &FLAT_NAMES
        } else {
            &SHARP_NAMES
        };
        table
            .iter()
            .position(|name| *name == spelling)
            .map(|index| Self(index as u8))
    }

    /// Shift by any number of semitones, wrapping around the octave
    pub fn transpose(self, semitones: i32) -> Self {
        let shift = semitones.rem_euclid(12) as u8;
        Self((self.0 + shift) % 12)
    }

    pub fn name(self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharps => SHARP_NAMES[self.0 as usize],
            Spelling::Flats => FLAT_NAMES[self.0 as usize],
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(Spelling::Sharps))
    }
}

/// Bring an offset into [-11, 11], keeping its direction.
///
/// `n` and `n ± 12` name the same pitch-class shift, so a viewer can store
/// whatever the user dialed in and still show a sensible label.
pub fn normalize_offset(semitones: i32) -> i32 {
    semitones % 12
}
