use thiserror::Error;

/// Result type alias using StallError
pub type Result<T> = std::result::Result<T, StallError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced to a caller falls into one of these kinds. Each kind
/// maps to a stable code that callers and tests can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Bad input: empty name, out-of-range coordinate, bad price, empty product list
    Validation,
    /// The targeted stall does not exist
    NotFound,
    /// The underlying persistence operation failed
    Storage,

    // Integration/IO
    Io,
    Serialization,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Validation => "ERR_VALIDATION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Storage => "ERR_STORAGE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus enough context (operation, stall id, field)
/// for an operator to correct the input and retry.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    stall_id: Option<i64>,
    field: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            stall_id: None,
            field: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add stall ID context
    pub fn with_stall_id(mut self, id: i64) -> Self {
        self.stall_id = Some(id);
        self
    }

    /// Add the name of the offending input field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the stall ID context, if any
    pub fn stall_id(&self) -> Option<i64> {
        self.stall_id
    }

    /// Get the offending field, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ExErrorKind::Validation
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ExErrorKind::NotFound
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(stall_id) = self.stall_id {
            write!(f, " (stall_id: {})", stall_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Axis of a coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub fn name(&self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }

    /// Inclusive bounds for this axis
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Axis::Latitude => (-90.0, 90.0),
            Axis::Longitude => (-180.0, 180.0),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A coordinate outside the valid range for its axis
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{axis} {value} is outside [{min}, {max}]")]
pub struct InvalidCoordinate {
    pub axis: Axis,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// Error taxonomy for stall and product operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StallError {
    // ===== Validation Errors =====
    /// Latitude or longitude out of range
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// Stall name empty or whitespace-only
    #[error("Invalid stall name: {reason}")]
    InvalidName { reason: String },

    /// Registration without any product line
    #[error("A stall must be registered with at least one product")]
    EmptyProductList,

    /// A product line failed validation
    #[error("Invalid product #{index}: {reason}")]
    InvalidProduct { index: usize, reason: String },

    /// Text did not match the `latitude,longitude` exchange format
    #[error("Invalid coordinate pair '{input}': {reason}")]
    InvalidCoordinatePair { input: String, reason: String },

    /// Seed file failed validation
    #[error("Invalid seed: {reason}")]
    InvalidSeed { reason: String },

    // ===== Lookup Errors =====
    /// Stall not found in store
    #[error("Stall not found: {stall_id}")]
    StallNotFound { stall_id: i64 },

    /// Named preset location does not exist
    #[error("Unknown preset location: {name}")]
    UnknownPreset { name: String },

    // ===== Storage Errors =====
    /// Underlying persistence failure
    #[error("Storage error: {message}")]
    Storage { message: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from StallError to ExError
impl From<StallError> for ExError {
    fn from(err: StallError) -> Self {
        match err {
            StallError::InvalidCoordinate(inner) => ExError::new(ExErrorKind::Validation)
                .with_field(inner.axis.name())
                .with_message(inner.to_string()),

            StallError::InvalidName { reason } => ExError::new(ExErrorKind::Validation)
                .with_field("name")
                .with_message(reason),

            StallError::EmptyProductList => ExError::new(ExErrorKind::Validation)
                .with_field("products")
                .with_message("At least one product is required"),

            StallError::InvalidProduct { index, reason } => ExError::new(ExErrorKind::Validation)
                .with_field(format!("products[{}]", index))
                .with_message(reason),

            StallError::InvalidCoordinatePair { input, reason } => {
                ExError::new(ExErrorKind::Validation)
                    .with_field("coordinates")
                    .with_message(format!("'{}': {}", input, reason))
            }

            StallError::InvalidSeed { reason } => ExError::new(ExErrorKind::Validation)
                .with_op("seed_parse")
                .with_message(reason),

            StallError::StallNotFound { stall_id } => ExError::new(ExErrorKind::NotFound)
                .with_stall_id(stall_id)
                .with_message("Stall not found"),

            StallError::UnknownPreset { name } => ExError::new(ExErrorKind::NotFound)
                .with_field("preset")
                .with_message(format!("Unknown preset location: {}", name)),

            StallError::Storage { message } => {
                ExError::new(ExErrorKind::Storage).with_message(message)
            }

            StallError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            StallError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<InvalidCoordinate> for ExError {
    fn from(err: InvalidCoordinate) -> Self {
        StallError::from(err).into()
    }
}

impl From<serde_json::Error> for StallError {
    fn from(err: serde_json::Error) -> Self {
        StallError::Serialization {
            message: err.to_string(),
        }
    }
}
