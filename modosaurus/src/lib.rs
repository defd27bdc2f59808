// Modosaurus: find the scales that contain a set of notes.
//
// Given note names such as `C E G`, reports every scale in the catalog, on
// every one of the twelve tonics, whose notes include all of them. Matching
// works on pitch classes, so octave and enharmonic spelling are ignored
// (C# and Db are the same note).
//
// Architecture:
// - pitch.rs: Pitch classes, note-name parsing and canonical spelling
// - catalog.rs: Named scale degree patterns (built-in or loaded from JSON)
// - engine.rs: Normalisation, the 12-tonic containment search, rendering
// - config.rs: Environment-driven configuration (catalog selection)
// - error.rs: Error types for note parsing and catalog loading
//
// The `modosaurus` binary (main.rs) is a thin command-line wrapper that
// prints one line per match.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod pitch;

pub use catalog::{ScaleCatalog, ScaleDefinition};
pub use engine::{
    Match, MatchReport, NoteInput, ScaleMatch, find_matches, find_matches_with_report, search,
};
pub use pitch::{PitchClass, PitchClassSet};
