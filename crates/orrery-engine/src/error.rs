//! Error types for the simulation core.

/// Errors raised while loading bodies or feeding input into the simulation.
///
/// Only catalog errors are fatal: they stop the simulation from starting.
/// Out-of-range input is clamped at the setters and never reaches this type.
#[derive(Debug, thiserror::Error)]
pub enum OrreryError {
    /// A physical size handed to the compression curve was negative or NaN.
    #[error("cannot compress negative size {0}")]
    NegativeSize(f64),

    /// The body catalog was not valid JSON or did not match the descriptor shape.
    #[error("failed to parse body catalog: {0}")]
    CatalogParse(#[source] serde_json::Error),

    /// A body record had neither an English nor a native name.
    #[error("body record has no name")]
    MissingName,

    /// The body catalog contained no bodies.
    #[error("body catalog is empty")]
    EmptyCatalog,

    /// No body with a zero orbital period leads the canonical order.
    #[error("body catalog has no central body (first body `{0}` orbits)")]
    MissingCentralBody(String),

    /// Two descriptors share a name.
    #[error("duplicate body `{0}` in catalog")]
    DuplicateBody(String),

    /// An essential descriptor field is negative, non-finite or empty.
    #[error("body `{name}` has invalid {field}: {value}")]
    InvalidField {
        name: String,
        field: &'static str,
        value: f64,
    },

    /// The external data layer reported that the startup fetch failed.
    #[error("body data fetch failed: {0}")]
    DataFetch(String),

    /// The simulation config JSON was malformed.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[source] serde_json::Error),

    /// A selection named a body that is not in the scene.
    #[error("unknown body `{0}`")]
    UnknownBody(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, OrreryError>;
