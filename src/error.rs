use std::fmt;

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Document import failed or produced nothing usable.
    Import(ImportError),
    /// Remote store unreachable or rejected an operation.
    Persistence(PersistenceError),
    /// A form or settings value failed local validation.
    Validation(ValidationError),
    /// Anything else (wraps third-party errors without a better home).
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Import(e) => write!(f, "import error: {}", e),
            AppError::Persistence(e) => write!(f, "persistence error: {}", e),
            AppError::Validation(e) => write!(f, "validation error: {}", e),
            AppError::Other(msg) => write!(f, "error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Import(e) => Some(e),
            AppError::Persistence(e) => Some(e),
            AppError::Validation(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// Errors from the document-to-question-bank importer.
///
/// `NoQuestionsFound` is the empty-result signal; the other variants mean
/// the document itself was structurally broken. Callers show different
/// guidance for the two cases.
#[derive(Debug)]
pub enum ImportError {
    /// The payload is not a readable document archive.
    UnreadableDocument {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The archive is missing a required part.
    MissingDocumentPart { part: String },
    /// The document markup could not be parsed.
    XmlParse {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The document parsed fine but matched no question pattern.
    NoQuestionsFound,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnreadableDocument { source } => {
                write!(f, "document is not readable: {}", source)
            }
            ImportError::MissingDocumentPart { part } => {
                write!(f, "document is missing required part: {}", part)
            }
            ImportError::XmlParse { source } => {
                write!(f, "document markup could not be parsed: {}", source)
            }
            ImportError::NoQuestionsFound => {
                write!(f, "no questions recognized in the document")
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::UnreadableDocument { source } | ImportError::XmlParse { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// Errors from the remote object store.
#[derive(Debug)]
pub enum PersistenceError {
    /// Network request failed before a response arrived.
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The store answered with a non-success status.
    BadStatus { endpoint: String, status: u16 },
    /// An insert was expected to echo the stored record but did not.
    EmptyResponse { endpoint: String },
    /// The response body could not be decoded.
    DecodeFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::RequestFailed { endpoint, source } => {
                write!(f, "request to {} failed: {}", endpoint, source)
            }
            PersistenceError::BadStatus { endpoint, status } => {
                write!(f, "store returned status {} for {}", status, endpoint)
            }
            PersistenceError::EmptyResponse { endpoint } => {
                write!(f, "store returned no record for {}", endpoint)
            }
            PersistenceError::DecodeFailed { source } => {
                write!(f, "store response could not be decoded: {}", source)
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::RequestFailed { source, .. }
            | PersistenceError::DecodeFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// Local form/settings validation failures. Block submission, never reach
/// the remote store.
#[derive(Debug)]
pub enum ValidationError {
    /// A required field was left empty.
    MissingField { field: &'static str },
    /// A numeric setting fell outside its allowed range.
    OutOfRange {
        field: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField { field } => {
                write!(f, "required field '{}' is empty", field)
            }
            ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                if *max == usize::MAX {
                    write!(f, "'{}' = {} must be at least {}", field, value, min)
                } else {
                    write!(
                        f,
                        "'{}' = {} is outside the allowed range [{}, {}]",
                        field, value, min, max
                    )
                }
            }
        }
    }
}

impl std::error::Error for ValidationError {}

// ========== Conversions from common error types ==========

impl From<zip::result::ZipError> for AppError {
    fn from(err: zip::result::ZipError) -> Self {
        AppError::Import(ImportError::UnreadableDocument {
            source: Box::new(err),
        })
    }
}

impl From<quick_xml::Error> for AppError {
    fn from(err: quick_xml::Error) -> Self {
        AppError::Import(ImportError::XmlParse {
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Persistence(PersistenceError::DecodeFailed {
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Other(err.to_string())
    }
}

// ========== Convenience constructors ==========

impl AppError {
    pub fn unreadable_document(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Import(ImportError::UnreadableDocument {
            source: Box::new(source),
        })
    }

    pub fn missing_part(part: impl Into<String>) -> Self {
        AppError::Import(ImportError::MissingDocumentPart { part: part.into() })
    }

    pub fn no_questions_found() -> Self {
        AppError::Import(ImportError::NoQuestionsFound)
    }

    pub fn request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Persistence(PersistenceError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    pub fn missing_field(field: &'static str) -> Self {
        AppError::Validation(ValidationError::MissingField { field })
    }

    /// True when the error is the importer's empty-result signal rather
    /// than a structural failure.
    pub fn is_empty_import(&self) -> bool {
        matches!(self, AppError::Import(ImportError::NoQuestionsFound))
    }
}

// ========== Result type alias ==========

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;
