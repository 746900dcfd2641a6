//! `chordsheet` - print chord sheets from a song library, optionally transposed.
//!
//! ```bash
//! chordsheet songs.yaml
//! chordsheet songs.yaml -t -2 --favorites
//! chordsheet songs.yaml -q beatles --key C --transpose-bass
//! ```

use chordsheet::{
    export_sheets, parse_library, BassNotes, SongFilter, SongKey, Spelling, Vocabulary,
};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Print chord sheets from a YAML song library.
#[derive(Parser)]
#[command(name = "chordsheet", version, about)]
struct Cli {
    /// Song library file (YAML)
    library: PathBuf,

    /// Semitones to transpose every sheet by
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    transpose: i32,

    /// Only songs whose title, artist or chords contain this text
    #[arg(short, long)]
    query: Option<String>,

    /// Only songs in this key (e.g. "G", "F#/Gb", "Bb")
    #[arg(long)]
    key: Option<String>,

    /// Only favorite songs
    #[arg(long)]
    favorites: bool,

    /// Spell transposed roots with flats
    #[arg(long)]
    flats: bool,

    /// Transpose slash-chord bass notes too
    #[arg(long)]
    transpose_bass: bool,

    /// Recognize sus4, 6, b5 and other extended chord markers
    #[arg(long)]
    extended: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let key = match cli.key.as_deref() {
        Some(label) => match SongKey::parse(label) {
            Some(key) => Some(key),
            None => {
                eprintln!("Unknown key '{}'", label);
                process::exit(1);
            }
        },
        None => None,
    };

    // Read library file
    let source = match fs::read_to_string(&cli.library) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", cli.library.display(), e);
            process::exit(1);
        }
    };

    let file = match parse_library(&source) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Library error: {}", e);
            process::exit(1);
        }
    };

    // Flags override the file's settings
    let mut options = file.settings;
    if cli.flats {
        options.spelling = Spelling::Flats;
    }
    if cli.transpose_bass {
        options.bass = BassNotes::Transpose;
    }
    if cli.extended {
        options.vocabulary = Vocabulary::Extended;
    }

    let filter = SongFilter {
        query: cli.query.unwrap_or_default(),
        key,
        favorites_only: cli.favorites,
    };

    let sheets = export_sheets(&file.library, &filter, cli.transpose, &options);
    info!(matched = sheets.len(), total = file.library.len(), "exporting sheets");
    println!("{}", sheets.join("\n\n\n"));
}
