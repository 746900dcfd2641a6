//! Integration tests for the chord sheet library
//!
//! Tests loading a songbook, searching it and exporting transposed sheets.

use chordsheet::{
    export_library, export_sheets, parse_library, transpose, BassNotes, ChordScanner, Library,
    SongDraft, SongFilter, SongKey, TransposeControl, TransposeOptions, Vocabulary,
};

const SONGBOOK: &str = include_str!("../demos/songbook.yaml");

const FLAT_PROGRESSION: &str = "Bb  Eb/G  Abmaj7\nGm  Cm7  F7  Db";

#[test]
fn test_load_songbook() {
    let file = parse_library(SONGBOOK).unwrap();
    assert_eq!(file.library.len(), 4);
    assert_eq!(file.library.favorites_count(), 1);
    assert_eq!(file.settings, TransposeOptions::default());

    let wonderwall = file.library.get("wonderwall").unwrap();
    assert_eq!(wonderwall.capo, Some(2));
    assert_eq!(wonderwall.key.to_string(), "F#/Gb");
}

#[test]
fn test_export_favorites_transposed() {
    let filter = SongFilter {
        favorites_only: true,
        ..SongFilter::default()
    };
    let sheets = export_library(SONGBOOK, &filter, 2).unwrap();
    assert_eq!(
        sheets,
        vec![
            "Let It Be - The Beatles\nKey: C | Transposed: +2\n\n\
             Verse:\nD  A  Bm  G\nD  A  G  D\n\nChorus:\nBm  A  G  D\n"
                .to_string()
        ]
    );
}

#[test]
fn test_search_and_transpose_down() {
    let filter = SongFilter {
        query: "moon".to_string(),
        ..SongFilter::default()
    };
    let sheets = export_library(SONGBOOK, &filter, -1).unwrap();
    assert_eq!(sheets.len(), 1);
    assert!(sheets[0].starts_with("Fly Me to the Moon - Frank Sinatra\nKey: A#/Bb | Transposed: -1\n\n"));
    assert!(sheets[0].ends_with("G#m7  C#m7  F#7  Bmaj7\nEmaj7  A#ø7  D#7  G#m7  G#7\n"));
}

#[test]
fn test_key_filter() {
    let file = parse_library(SONGBOOK).unwrap();
    let filter = SongFilter {
        key: SongKey::parse("G"),
        ..SongFilter::default()
    };
    let found = file.library.filter(&filter);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Creep");
}

#[test]
fn test_section_labels_are_not_chords() {
    let file = parse_library(SONGBOOK).unwrap();
    let song = file.library.get("let-it-be").unwrap();
    let count = ChordScanner::new(&song.progression, Vocabulary::Standard).count();
    assert_eq!(count, 12);
}

#[test]
fn test_identity_on_every_song() {
    let file = parse_library(SONGBOOK).unwrap();
    for song in file.library.songs() {
        assert_eq!(transpose(&song.progression, 0), song.progression);
    }
    assert_eq!(transpose(FLAT_PROGRESSION, 0), FLAT_PROGRESSION);
}

#[test]
fn test_periodicity_on_every_song() {
    let file = parse_library(SONGBOOK).unwrap();
    let mut texts: Vec<&str> = file.library.songs().iter().map(|s| s.progression.as_str()).collect();
    texts.push(FLAT_PROGRESSION);

    for text in texts {
        for n in -11..=11 {
            if n == 0 {
                continue;
            }
            assert_eq!(transpose(text, n), transpose(text, n + 12), "offset {}", n);
            assert_eq!(transpose(text, n), transpose(text, n - 24), "offset {}", n);
        }
    }
}

#[test]
fn test_inverse_restores_pitch_classes() {
    // Going up and back down gives the canonical sharp spelling of the original,
    // which is what a full-octave transposition produces
    let canonical = transpose(FLAT_PROGRESSION, 12);
    assert_eq!(canonical, "A#  D#/G  G#maj7\nGm  Cm7  F7  C#");

    for n in 1..=11 {
        let there = transpose(FLAT_PROGRESSION, n);
        assert_eq!(transpose(&there, -n), canonical, "offset {}", n);
    }
}

#[test]
fn test_bass_notes_setting_from_file() {
    let source = r#"
settings:
  bass: transpose
songs:
  - title: Slash
    artist: Tester
    progression: "C/E  Am/G  F/A"
"#;
    let file = parse_library(source).unwrap();
    assert_eq!(file.settings.bass, BassNotes::Transpose);

    let sheets = export_library(source, &SongFilter::default(), 2).unwrap();
    assert!(sheets[0].ends_with("D/F#  Bm/A  G/B"));
}

#[test]
fn test_edit_then_export() {
    let mut library = Library::new();
    let id = library
        .add(SongDraft {
            title: "Knockin' on Heaven's Door".to_string(),
            artist: "Bob Dylan".to_string(),
            key: SongKey::parse("G").unwrap(),
            capo: None,
            progression: "G  D  Am\nG  D  C".to_string(),
        })
        .unwrap()
        .id
        .clone();

    library
        .update(
            &id,
            SongDraft {
                title: "Knockin' on Heaven's Door".to_string(),
                artist: "Bob Dylan".to_string(),
                key: SongKey::parse("G").unwrap(),
                capo: Some(3),
                progression: "G  D  Am7\nG  D  C".to_string(),
            },
        )
        .unwrap();
    library.toggle_favorite(&id).unwrap();

    let filter = SongFilter {
        favorites_only: true,
        ..SongFilter::default()
    };
    let sheets = export_sheets(&library, &filter, -2, &TransposeOptions::default());
    assert_eq!(
        sheets,
        vec![
            "Knockin' on Heaven's Door - Bob Dylan\nKey: G | Capo: 3 | Transposed: -2\n\nF  C  Gm7\nF  C  A#"
                .to_string()
        ]
    );

    library.delete(&id).unwrap();
    assert!(export_sheets(&library, &filter, 0, &TransposeOptions::default()).is_empty());
}

#[test]
fn test_viewer_session() {
    let file = parse_library(SONGBOOK).unwrap();
    let song = file.library.get("creep").unwrap();
    let options = TransposeOptions::default();

    let mut control = TransposeControl::new();
    assert_eq!(control.render(&song.progression, &options), song.progression);

    control.nudge_up();
    control.nudge_up();
    assert_eq!(control.render(&song.progression, &options), "A  C#  D  Dm\n");

    control.step(-3);
    assert_eq!(control.offset(), -1);
    assert_eq!(control.render(&song.progression, &options), "F#  A#  B  Bm\n");
}

#[test]
fn test_concurrent_calls() {
    let text = SONGBOOK;
    let expected = transpose(text, 3);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| transpose(text, 3)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
