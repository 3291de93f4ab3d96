//! Parameter spaces, Latin hypercube designs, and emulator-ready tables.

pub mod design;
pub mod params;
pub mod table;

/// Errors raised while building or rescaling a sampling design.
#[derive(Debug, Clone, PartialEq)]
pub enum DesignError {
    /// More varied dimensions requested than parameters defined.
    NdimExceedsParams { requested: usize, available: usize },
    /// A varied parameter has no prior half width.
    MissingHalfWidth { name: String },
    /// Two parameter definitions share the same name.
    DuplicateParam { name: String },
    /// A fiducial value or half width is NaN or infinite.
    NonFiniteValue { name: String },
    /// Bounds list length does not match the design dimension.
    BoundsMismatch { expected: usize, got: usize },
    /// Rescale called on a design already in physical units.
    AlreadyScaled,
    /// A physical-units consumer was handed a unit-cube design.
    UnscaledDesign,
    /// A design with zero rows or zero columns.
    EmptyDesign,
}

impl std::fmt::Display for DesignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DesignError::NdimExceedsParams {
                requested,
                available,
            } => write!(
                f,
                "requested {requested} varied dimensions but only {available} parameters are defined"
            ),
            DesignError::MissingHalfWidth { name } => {
                write!(f, "varied parameter '{name}' has no prior half width")
            }
            DesignError::DuplicateParam { name } => {
                write!(f, "duplicate parameter name '{name}'")
            }
            DesignError::NonFiniteValue { name } => {
                write!(f, "parameter '{name}' has a non-finite fiducial or half width")
            }
            DesignError::BoundsMismatch { expected, got } => {
                write!(f, "expected {expected} prior bounds, got {got}")
            }
            DesignError::AlreadyScaled => {
                write!(f, "design is already rescaled to physical units")
            }
            DesignError::UnscaledDesign => {
                write!(f, "design is still in unit-cube coordinates")
            }
            DesignError::EmptyDesign => write!(f, "design has no rows or no columns"),
        }
    }
}

impl std::error::Error for DesignError {}
