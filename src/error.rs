//! # Error Types
//!
//! Errors raised while loading a song library or editing songs in it.
//!
//! Transposition itself never fails: unrecognized chord text is passed through
//! unchanged, so [`crate::transpose`] returns a plain `String`.
//!
//! ## Error Types
//! - `MetadataError` - the library YAML could not be read
//! - `InvalidField` - a song field failed validation (blank title, bad key, ...)
//! - `InvalidSong` - a song entry in a library file is invalid
//! - `SongNotFound` - no song with the given id
//!
//! ## Usage
//! ```rust
//! use chordsheet::{parse_library, SheetError};
//!
//! let source = "songs:\n  - title: Untitled\n";
//! match parse_library(source) {
//!     Ok(file) => println!("{} songs", file.library.len()),
//!     Err(SheetError::InvalidSong { entry, message }) => {
//!         eprintln!("Song #{} is invalid: {}", entry, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SheetError {
    /// Invalid YAML in a library file.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SheetError;
    /// let err = SheetError::MetadataError("songs: invalid type: string, expected a sequence".to_string());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid metadata: songs: invalid type: string, expected a sequence"
    /// );
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),

    /// A single field of a song failed validation.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SheetError;
    /// let err = SheetError::InvalidField {
    ///     field: "capo",
    ///     message: "must be between 0 and 12, got 14".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid capo: must be between 0 and 12, got 14");
    /// ```
    #[error("Invalid {field}: {message}")]
    InvalidField { field: &'static str, message: String },

    /// A song entry in a library file is invalid. `entry` counts from 1.
    #[error("Invalid song #{entry}: {message}")]
    InvalidSong { entry: usize, message: String },

    #[error("Song not found: {0}")]
    SongNotFound(String),
}
