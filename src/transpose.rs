use crate::pitch::{PitchClass, Spelling};
use crate::scanner::{ChordScanner, ChordToken, Vocabulary};
use serde::Deserialize;

/// What to do with the bass note of a slash chord such as `C/G`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BassNotes {
    /// Copy the bass note through with the rest of the chord quality
    #[default]
    Verbatim,
    /// Shift the bass note by the same interval as the root
    Transpose,
}

/// Knobs for [`transpose_with_options`]. The default matches [`transpose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TransposeOptions {
    pub bass: BassNotes,
    pub vocabulary: Vocabulary,
    pub spelling: Spelling,
}

/// Transpose every chord root in `text` by `semitones`.
///
/// Roots are re-spelled with sharps (`Bb` up one is `B`, `Bb` up twelve is `A#`)
/// and everything else (qualities, slash bass notes, lyrics, labels,
/// whitespace) is copied through untouched. An offset of exactly 0 returns
/// the text as-is.
///
/// # Example
/// ```
/// use chordsheet::transpose;
///
/// assert_eq!(transpose("G  Em  C  D", 2), "A  F#m  D  E");
/// assert_eq!(transpose("Bb  Eb  Ab", 1), "B  E  A");
/// assert_eq!(transpose("Bb", 0), "Bb");
/// assert_eq!(transpose("Bb", 12), "A#");
/// ```
pub fn transpose(text: &str, semitones: i32) -> String {
    transpose_with_options(text, semitones, &TransposeOptions::default())
}

/// Transpose with a choice of bass-note handling, marker vocabulary and spelling.
///
/// # Example
/// ```
/// use chordsheet::{transpose_with_options, BassNotes, TransposeOptions};
///
/// let options = TransposeOptions {
///     bass: BassNotes::Transpose,
///     ..TransposeOptions::default()
/// };
/// assert_eq!(transpose_with_options("C#/G#", 1, &options), "D/A");
/// ```
pub fn transpose_with_options(text: &str, semitones: i32, options: &TransposeOptions) -> String {
    if semitones == 0 {
        return text.to_string();
    }

    let mut output = String::with_capacity(text.len() + text.len() / 8);
    let mut copied = 0;
    for token in ChordScanner::new(text, options.vocabulary) {
        output.push_str(&text[copied..token.span.start]);
        push_transposed(&mut output, &token, semitones, options);
        copied = token.span.end;
    }
    output.push_str(&text[copied..]);
    output
}

fn push_transposed(output: &mut String, token: &ChordToken<'_>, semitones: i32, options: &TransposeOptions) {
    // Unmapped roots (E#, Cb, ...) leave the whole chord alone
    let Some(root) = PitchClass::from_spelling(token.root) else {
        output.push_str(token.text);
        return;
    };
    output.push_str(root.transpose(semitones).name(options.spelling));

    match options.bass {
        BassNotes::Verbatim => output.push_str(token.suffix),
        BassNotes::Transpose => {
            let mut copied = 0;
            for range in &token.bass {
                output.push_str(&token.suffix[copied..range.start]);
                let bass = &token.suffix[range.clone()];
                match PitchClass::from_spelling(bass) {
                    Some(pitch) => output.push_str(pitch.transpose(semitones).name(options.spelling)),
                    None => output.push_str(bass),
                }
                copied = range.end;
            }
            output.push_str(&token.suffix[copied..]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_progression() {
        assert_eq!(transpose("G  Em  C  D", 2), "A  F#m  D  E");
    }

    #[test]
    fn test_label_text_survives() {
        assert_eq!(
            transpose("Capo 2: Dm7  G7  Cmaj9", -1),
            "Capo 2: C#m7  F#7  Bmaj9"
        );
    }

    #[test]
    fn test_flats_respelled_as_sharps() {
        assert_eq!(transpose("Bb  Eb  Ab", 1), "B  E  A");
        assert_eq!(transpose("Db Gb", 2), "D# G#");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(transpose("", 5), "");
    }

    #[test]
    fn test_zero_is_exact_identity() {
        let text = "Bb  Ebmaj7\nVerse:  Ab/C  E#";
        assert_eq!(transpose(text, 0), text);
    }

    #[test]
    fn test_full_octave_still_respells() {
        assert_eq!(transpose("Bb", 12), "A#");
        assert_eq!(transpose("Bb", -12), "A#");
        assert_eq!(transpose("G", 12), "G");
    }

    #[test]
    fn test_slash_bass_verbatim_by_default() {
        assert_eq!(transpose("F#dim  G#m7  C#/G#", 1), "Gdim  Am7  D/G#");
    }

    #[test]
    fn test_slash_bass_transposed_when_asked() {
        let options = TransposeOptions {
            bass: BassNotes::Transpose,
            ..TransposeOptions::default()
        };
        assert_eq!(
            transpose_with_options("F#dim  G#m7  C#/G#", 1, &options),
            "Gdim  Am7  D/A"
        );
        assert_eq!(transpose_with_options("Am/G/F", 3, &options), "Cm/A#/G#");
        // unmapped bass spelling is kept as written
        assert_eq!(transpose_with_options("C/E#", 2, &options), "D/E#");
    }

    #[test]
    fn test_unmapped_root_passes_through() {
        assert_eq!(transpose("E#  B#m  Cb  Fb7  G", 1), "E#  B#m  Cb  Fb7  G#");
    }

    #[test]
    fn test_sharp_root_followed_by_chord() {
        assert_eq!(transpose("F#Bm", 1), "GCm");
        assert_eq!(transpose("C#Edim", 4), "FG#dim");
    }

    #[test]
    fn test_bare_roots() {
        assert_eq!(transpose("C", 7), "G");
        assert_eq!(transpose("A B C D E F G", -2), "G A A# C D D# F");
    }

    #[test]
    fn test_non_chord_text_preserved() {
        let text = "Intro:\n\tAm  F\n\nChorus (x2):  C - G!  ...\r\nlyrics here";
        assert_eq!(
            transpose(text, 5),
            "Intro:\n\tDm  A#\n\nChorus (x2):  F - C!  ...\r\nlyrics here"
        );
    }

    #[test]
    fn test_large_offsets_wrap() {
        assert_eq!(transpose("C", 14), "D");
        assert_eq!(transpose("C", -25), "B");
        assert_eq!(transpose("C", i32::MIN), "E");
    }

    #[test]
    fn test_flat_spelling_option() {
        let options = TransposeOptions {
            spelling: Spelling::Flats,
            ..TransposeOptions::default()
        };
        assert_eq!(transpose_with_options("C  F#m  G7", 1, &options), "Db  Gm  Ab7");
    }

    #[test]
    fn test_extended_vocabulary_option() {
        assert_eq!(transpose("Dsus4  Am7b5", 2), "Dsus4  Am7b5");

        let options = TransposeOptions {
            vocabulary: Vocabulary::Extended,
            ..TransposeOptions::default()
        };
        assert_eq!(transpose_with_options("Dsus4  Am7b5", 2, &options), "Esus4  Bm7b5");
    }

    #[test]
    fn test_inverse_restores_pitch_classes() {
        let text = "Bb  F/A  Gm7  Ebmaj7";
        let round_trip = transpose(&transpose(text, 5), -5);
        assert_eq!(round_trip, "A#  F/A  Gm7  D#maj7");
    }

    #[test]
    fn test_periodicity() {
        let text = "Verse: Am  Dm7  G7  Cmaj7/E  Bb";
        for n in [1, 5, -3, 11, -11] {
            assert_eq!(transpose(text, n), transpose(text, n + 12));
        }
    }

    #[test]
    fn test_settings_from_yaml() {
        let options: TransposeOptions =
            serde_yaml::from_str("bass: transpose\nspelling: flats\n").unwrap();
        assert_eq!(options.bass, BassNotes::Transpose);
        assert_eq!(options.spelling, Spelling::Flats);
        assert_eq!(options.vocabulary, Vocabulary::Standard);
    }
}
