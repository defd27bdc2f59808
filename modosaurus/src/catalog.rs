// Scale catalog: the named scale patterns the engine searches.
//
// Each scale is a name plus its degree offsets in semitones above an
// implicit tonic of pitch class 0, e.g. Dorian = [0, 2, 3, 5, 7, 9, 10].
// Names are free text and may list synonyms ("Major / Ionian").
//
// The built-in catalog holds the 33 scales of the command-line tool, from
// the diatonic modes through pentatonic, blues and synthetic scales. A
// replacement catalog can be loaded from JSON (see `config.rs`); external
// data is validated before use, since a bad degree set would make every
// search silently wrong rather than fail.
//
// Catalog order carries through to output order within one tonic. It has
// no effect on which matches are found.

use crate::error::CatalogError;
use crate::pitch::{PITCH_CLASS_COUNT, PitchClass, PitchClassSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The built-in scales, in output order.
const BUILTIN_SCALES: &[(&str, &[u8])] = &[
    ("Major / Ionian", &[0, 2, 4, 5, 7, 9, 11]),
    ("Melodic Minor", &[0, 2, 3, 5, 7, 9, 11]),
    ("Harmonic Minor", &[0, 2, 3, 5, 6, 9, 11]),
    ("Natural Minor / Aeolian", &[0, 2, 3, 5, 7, 8, 10]),
    ("Harmonic Minor / Mohammedan", &[0, 2, 3, 5, 7, 8, 11]),
    ("Major Pentatonic", &[0, 2, 4, 7, 9]),
    ("Minor Pentatonic", &[0, 3, 5, 7, 10]),
    ("Blues", &[0, 3, 5, 6, 7, 10]),
    ("Minor Blues", &[0, 2, 3, 5, 6, 7, 8, 10]),
    ("Major Blues", &[0, 2, 3, 4, 5, 6, 7, 9, 10]),
    ("Augmented / Whole Tone", &[0, 2, 4, 6, 8, 10]),
    ("Diminished", &[0, 2, 3, 5, 6, 8, 9, 11]),
    ("Half Whole Diminished", &[0, 1, 3, 4, 6, 7, 9, 10]),
    (
        "Phrygian-Dominan / major Phrygian / Spanish-flamenco",
        &[0, 1, 4, 5, 7, 8, 10],
    ),
    ("Dorian", &[0, 2, 3, 5, 7, 9, 10]),
    ("Phrygian", &[0, 1, 3, 5, 7, 8, 10]),
    ("Lydian", &[0, 2, 4, 6, 7, 9, 11]),
    ("Mixolydian", &[0, 2, 4, 5, 7, 9, 10]),
    ("Locrian", &[0, 1, 3, 5, 6, 8, 10]),
    ("Dorian b2", &[0, 1, 3, 5, 7, 9, 10]),
    ("Lydian augmented", &[0, 2, 4, 6, 8, 9, 11]),
    ("Lydian b7 / overture", &[0, 2, 4, 6, 7, 9, 10]),
    ("Mixolydian b13 / Hindu", &[0, 2, 4, 5, 7, 8, 10]),
    ("Locrian #2", &[0, 2, 3, 5, 6, 8, 10]),
    ("Super Locrian / Altered", &[0, 1, 3, 4, 6, 8, 10]),
    ("Enigmatic", &[0, 1, 4, 6, 8, 10, 11]),
    ("Double harmonic / gypsy / Byzantine", &[0, 1, 4, 5, 7, 8, 11]),
    ("Hungarian minor", &[0, 2, 3, 6, 7, 8, 11]),
    ("Persian", &[0, 1, 4, 5, 6, 8, 11]),
    ("Arabian / major Locrian", &[0, 2, 4, 5, 6, 8, 10]),
    ("Japanese", &[0, 1, 5, 7, 8]),
    ("Egyptian", &[0, 2, 5, 7, 10]),
    ("Hirajoshi", &[0, 2, 3, 7, 8]),
];

/// A named scale pattern, rooted on an implicit tonic of pitch class 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleDefinition {
    pub name: String,
    /// Semitone offsets above the tonic, strictly increasing, starting at 0.
    pub degrees: Vec<u8>,
}

impl ScaleDefinition {
    pub fn new(name: impl Into<String>, degrees: Vec<u8>) -> Self {
        ScaleDefinition {
            name: name.into(),
            degrees,
        }
    }

    /// The degree offsets as a set of pitch classes (tonic = C).
    pub fn pitch_classes(&self) -> PitchClassSet {
        self.degrees.iter().map(|&d| PitchClass::new(d)).collect()
    }

    /// Whether `interval` semitones above the tonic is a degree of this scale.
    pub fn contains_degree(&self, interval: u8) -> bool {
        self.degrees.contains(&interval)
    }

    /// Check the degree set: non-empty, every degree in 0-11, first degree 0,
    /// strictly increasing.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let name = || self.name.clone();

        let Some(&first) = self.degrees.first() else {
            return Err(CatalogError::EmptyDegrees { name: name() });
        };
        if let Some(&degree) = self.degrees.iter().find(|&&d| d >= PITCH_CLASS_COUNT) {
            return Err(CatalogError::DegreeOutOfRange {
                name: name(),
                degree,
            });
        }
        if first != 0 {
            return Err(CatalogError::MissingTonic { name: name() });
        }
        if self.degrees.windows(2).any(|w| w[0] >= w[1]) {
            return Err(CatalogError::NotAscending { name: name() });
        }
        Ok(())
    }
}

/// An ordered, read-only collection of scale definitions.
///
/// Only constructed through validating constructors, so it serializes but
/// does not derive `Deserialize`; use `from_json_str` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScaleCatalog {
    scales: Vec<ScaleDefinition>,
}

impl ScaleCatalog {
    /// Build a catalog from external data, validating every scale.
    pub fn new(scales: Vec<ScaleDefinition>) -> Result<Self, CatalogError> {
        let catalog = ScaleCatalog { scales };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        let catalog = ScaleCatalog {
            scales: BUILTIN_SCALES
                .iter()
                .map(|&(name, degrees)| ScaleDefinition::new(name, degrees.to_vec()))
                .collect(),
        };
        debug_assert!(catalog.validate().is_ok(), "built-in scale catalog is invalid");
        catalog
    }

    /// Parse a JSON array of `{"name": ..., "degrees": [...]}` objects.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let scales: Vec<ScaleDefinition> = serde_json::from_str(json)?;
        ScaleCatalog::new(scales)
    }

    /// Load a JSON catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let data = std::fs::read_to_string(path)?;
        ScaleCatalog::from_json_str(&data)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.scales.is_empty() {
            return Err(CatalogError::Empty);
        }
        self.scales.iter().try_for_each(ScaleDefinition::validate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScaleDefinition> {
        self.scales.iter()
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// First scale with exactly this name.
    pub fn get(&self, name: &str) -> Option<&ScaleDefinition> {
        self.scales.iter().find(|s| s.name == name)
    }
}

impl Default for ScaleCatalog {
    fn default() -> Self {
        ScaleCatalog::builtin()
    }
}

impl<'a> IntoIterator for &'a ScaleCatalog {
    type Item = &'a ScaleDefinition;
    type IntoIter = std::slice::Iter<'a, ScaleDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.scales.iter()
    }
}
