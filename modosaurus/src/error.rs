// Error types for note parsing and scale catalog construction.
//
// Neither error ever reaches the matching engine's output: unknown note
// tokens are dropped during normalisation (and reported alongside the
// matches), and catalog errors are raised before a search can begin.

use thiserror::Error;

/// A note token that is not one of the recognised spellings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown note name '{0}'")]
pub struct UnknownNote(pub String);

/// Invalid scale catalog data.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read scale catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scale catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scale catalog contains no scales")]
    Empty,

    #[error("scale '{name}' has no degrees")]
    EmptyDegrees { name: String },

    #[error("scale '{name}' has degree {degree}, outside 0-11")]
    DegreeOutOfRange { name: String, degree: u8 },

    #[error("scale '{name}' does not start on the tonic (degree 0)")]
    MissingTonic { name: String },

    #[error("scale '{name}' degrees are not strictly increasing")]
    NotAscending { name: String },
}
