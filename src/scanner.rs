//! # Chord Scanner
//!
//! Finds chord symbols inside free-form chord-sheet text.
//!
//! A chord is a root letter `A`-`G` with an optional `#` or `b`, followed by any
//! run of quality markers (`m`, `maj`, `dim`, `sus`, `7`, ...) and slash bass
//! notes (`/G`, `/F#`). The scanner never fails: anything that does not fit that
//! shape is skipped over as ordinary text.
//!
//! ## Boundaries
//! - A chord can only start where the previous character is not a word
//!   character (letters, digits, `_`), so the `C` in `ABC` is not a chord.
//! - A chord has to end where the text ends, the next character is not a
//!   word character, or its own last character is not one, so `Capo`,
//!   `Chorus` and `Emma` are not chords while `Em`, `Cmaj7` and the `F#` in
//!   `F#Bm` are.
//! - When several readings end on a boundary the longest one wins, and on a
//!   tie the root keeps its accidental.
//!
//! Single capital letters in lyrics (`A`, `E`) do scan as chords. That is the
//! accepted cost of matching loose text.
//!
//! ## Example
//! ```
//! use chordsheet::{ChordScanner, Vocabulary};
//!
//! let roots: Vec<_> = ChordScanner::new("Verse: Am7  F/C  G", Vocabulary::Standard)
//!     .map(|token| token.root)
//!     .collect();
//! assert_eq!(roots, vec!["A", "F", "G"]);
//! ```

use serde::Deserialize;
use std::ops::Range;

/// Quality markers every chord sheet uses
const STANDARD_MARKERS: &[&str] = &[
    "maj", "min", "m", "dim", "aug", "sus", "add", "11", "13", "7", "9", "M", "°", "ø",
];

/// Extra markers recognized with [`Vocabulary::Extended`]
const EXTENDED_MARKERS: &[&str] = &[
    "#11", "b13", "b5", "#5", "b9", "#9", "2", "4", "5", "6", "+", "-",
];

/// Which quality markers count as part of a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Vocabulary {
    /// `m`, `maj`, `min`, `dim`, `aug`, `sus`, `add`, `7`, `9`, `11`, `13`, `M`, `°`, `ø`
    #[default]
    Standard,
    /// Standard plus `2`, `4`, `5`, `6`, `+`, `-` and altered tones (`b5`, `#9`, ...)
    Extended,
}

impl Vocabulary {
    fn markers(self) -> impl Iterator<Item = &'static str> {
        let extra: &[&str] = match self {
            Vocabulary::Standard => &[],
            Vocabulary::Extended => EXTENDED_MARKERS,
        };
        STANDARD_MARKERS.iter().chain(extra.iter()).copied()
    }
}

/// A chord symbol found in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordToken<'a> {
    /// Byte range of the whole chord in the source
    pub span: Range<usize>,
    pub text: &'a str,
    /// Root spelling, e.g. `"F#"`
    pub root: &'a str,
    /// Everything after the root, e.g. `"m7/E"`
    pub suffix: &'a str,
    /// Byte ranges of slash bass roots, relative to `suffix`
    pub bass: Vec<Range<usize>>,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_root_letter(c: char) -> bool {
    matches!(c, 'A'..='G')
}

fn is_accidental(c: char) -> bool {
    c == '#' || c == 'b'
}

/// How a suffix position was reached
#[derive(Debug, Clone, Copy)]
struct Step {
    from: usize,
    /// Bass root range relative to the suffix start, for `/X` steps
    bass: Option<(usize, usize)>,
}

/// Iterator over the chord symbols in a piece of text, left to right, never overlapping
pub struct ChordScanner<'a> {
    input: &'a str,
    position: usize,
    prev: Option<char>,
    vocabulary: Vocabulary,
}

impl<'a> ChordScanner<'a> {
    pub fn new(input: &'a str, vocabulary: Vocabulary) -> Self {
        Self {
            input,
            position: 0,
            prev: None,
            vocabulary,
        }
    }

    /// A chord can end here if the text ends, the next character is not a
    /// word character, or the chord's last character is not one (`F#` in `F#Bm`)
    fn at_boundary(&self, position: usize) -> bool {
        let Some(next) = self.input[position..].chars().next() else {
            return true;
        };
        let last = self.input[..position].chars().next_back();
        !is_word_char(next) || !last.is_some_and(is_word_char)
    }

    /// Ends of the root spellings starting at `position`, accidental first
    fn root_ends(&self, position: usize) -> Vec<usize> {
        let mut ends = Vec::with_capacity(2);
        let mut chars = self.input[position..].chars();
        match chars.next() {
            Some(c) if is_root_letter(c) => {
                if chars.next().is_some_and(is_accidental) {
                    ends.push(position + 2);
                }
                ends.push(position + 1);
            }
            _ => {}
        }
        ends
    }

    /// Every marker or slash bass that can follow `position`, as (length, bass range)
    fn steps_at(&self, position: usize) -> Vec<(usize, Option<(usize, usize)>)> {
        let rest = &self.input[position..];
        let mut steps: Vec<_> = self
            .vocabulary
            .markers()
            .filter(|marker| rest.starts_with(marker))
            .map(|marker| (marker.len(), None))
            .collect();

        if rest.starts_with('/') {
            for end in self.root_ends(position + 1) {
                steps.push((end - position, Some((1, end - position))));
            }
        }
        steps
    }

    /// Longest run of markers after a root that ends on a boundary.
    ///
    /// Returns the end position and the bass root ranges relative to `start`.
    fn longest_suffix(&self, start: usize) -> Option<(usize, Vec<Range<usize>>)> {
        let mut reached: Vec<Option<Step>> = vec![Some(Step { from: 0, bass: None })];

        let mut offset = 0;
        while offset < reached.len() {
            if reached[offset].is_some() {
                for (len, bass) in self.steps_at(start + offset) {
                    let next = offset + len;
                    if next >= reached.len() {
                        reached.resize(next + 1, None);
                    }
                    if reached[next].is_none() {
                        reached[next] = Some(Step {
                            from: offset,
                            bass: bass.map(|(lo, hi)| (offset + lo, offset + hi)),
                        });
                    }
                }
            }
            offset += 1;
        }

        let end = (0..reached.len())
            .rev()
            .find(|&offset| reached[offset].is_some() && self.at_boundary(start + offset))?;

        let mut bass = Vec::new();
        let mut offset = end;
        while offset > 0 {
            let step = reached[offset]?;
            if let Some((lo, hi)) = step.bass {
                bass.push(lo..hi);
            }
            offset = step.from;
        }
        bass.reverse();
        Some((start + end, bass))
    }

    fn match_chord(&self, start: usize) -> Option<ChordToken<'a>> {
        let mut best: Option<(usize, usize, Vec<Range<usize>>)> = None;
        for root_end in self.root_ends(start) {
            if let Some((end, bass)) = self.longest_suffix(root_end) {
                if best.as_ref().map_or(true, |(_, best_end, _)| end > *best_end) {
                    best = Some((root_end, end, bass));
                }
            }
        }

        let (root_end, end, bass) = best?;
        Some(ChordToken {
            span: start..end,
            text: &self.input[start..end],
            root: &self.input[start..root_end],
            suffix: &self.input[root_end..end],
            bass,
        })
    }
}

impl<'a> Iterator for ChordScanner<'a> {
    type Item = ChordToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(c) = self.input[self.position..].chars().next() {
            if is_root_letter(c) && !self.prev.is_some_and(is_word_char) {
                if let Some(token) = self.match_chord(self.position) {
                    self.position = token.span.end;
                    self.prev = token.text.chars().next_back();
                    return Some(token);
                }
            }
            self.position += c.len_utf8();
            self.prev = Some(c);
        }
        None
    }
}
