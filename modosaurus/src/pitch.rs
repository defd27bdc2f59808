// Pitch classes and note-name spelling.
//
// A pitch class is one of the twelve equal-tempered semitone classes, with
// octave discarded. This module holds the two static tables that convert
// between note-name spellings and pitch classes:
// - `SPELLINGS`: every accepted input spelling (naturals, sharps, flats),
//   matched exactly and case-sensitively.
// - `CANONICAL_NAMES`: the one spelling emitted for each pitch class. Black
//   keys always render as flats, so C# and Db both come back out as "Db",
//   and there is no "Cb" (pitch class 11 is always "B").
//
// `PitchClassSet` is a 12-bit set used by the catalog for scale degree sets
// and by the engine for the normalised input notes.

use crate::error::UnknownNote;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of pitch classes in twelve-tone equal temperament.
pub const PITCH_CLASS_COUNT: u8 = 12;

/// Accepted input spellings and the pitch class each one names.
const SPELLINGS: [(&str, u8); 17] = [
    ("C", 0),
    ("C#", 1),
    ("Db", 1),
    ("D", 2),
    ("D#", 3),
    ("Eb", 3),
    ("E", 4),
    ("F", 5),
    ("F#", 6),
    ("Gb", 6),
    ("G", 7),
    ("G#", 8),
    ("Ab", 8),
    ("A", 9),
    ("A#", 10),
    ("Bb", 10),
    ("B", 11),
];

/// Output spelling for each pitch class, indexed by pitch class.
const CANONICAL_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

// ---------------------------------------------------------------------------
// PitchClass
// ---------------------------------------------------------------------------

/// One of the twelve pitch classes, 0 = C through 11 = B.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Wrap any semitone count into a pitch class.
    pub const fn new(semitones: u8) -> Self {
        PitchClass(semitones % PITCH_CLASS_COUNT)
    }

    /// All twelve pitch classes in ascending order from C.
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..PITCH_CLASS_COUNT).map(PitchClass)
    }

    /// Look up an input spelling. Exact match only: "c", "H" or "E#" are
    /// not recognised.
    pub fn from_name(name: &str) -> Option<Self> {
        SPELLINGS
            .iter()
            .find(|(spelling, _)| *spelling == name)
            .map(|&(_, pc)| PitchClass(pc))
    }

    /// The canonical spelling of this pitch class.
    pub fn name(self) -> &'static str {
        CANONICAL_NAMES[self.0 as usize]
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The pitch class `interval` semitones above this one.
    pub fn transpose_up(self, interval: u8) -> Self {
        PitchClass::new(self.0 + interval % PITCH_CLASS_COUNT)
    }

    /// Semitones from `tonic` up to this pitch class, i.e. the scale degree
    /// this note would occupy if `tonic` were the root: `(self - tonic) mod 12`.
    pub fn interval_above(self, tonic: PitchClass) -> u8 {
        (self.0 + PITCH_CLASS_COUNT - tonic.0) % PITCH_CLASS_COUNT
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = UnknownNote;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PitchClass::from_name(s).ok_or_else(|| UnknownNote(s.to_string()))
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < PITCH_CLASS_COUNT {
            Ok(PitchClass(value))
        } else {
            Err(format!("pitch class {value} out of range 0-11"))
        }
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> u8 {
        pc.0
    }
}

// ---------------------------------------------------------------------------
// PitchClassSet
// ---------------------------------------------------------------------------

/// A set of pitch classes stored as a 12-bit mask (bit n = pitch class n).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PitchClassSet(u16);

impl PitchClassSet {
    pub const fn new() -> Self {
        PitchClassSet(0)
    }

    pub fn insert(&mut self, pc: PitchClass) {
        self.0 |= 1 << pc.0;
    }

    pub fn contains(self, pc: PitchClass) -> bool {
        self.0 & (1 << pc.0) != 0
    }

    /// True if every member of `self` is also in `other`.
    pub fn is_subset(self, other: PitchClassSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in ascending order from C.
    pub fn iter(self) -> impl Iterator<Item = PitchClass> {
        PitchClass::all().filter(move |&pc| self.contains(pc))
    }
}

impl FromIterator<PitchClass> for PitchClassSet {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> Self {
        let mut set = PitchClassSet::new();
        for pc in iter {
            set.insert(pc);
        }
        set
    }
}
