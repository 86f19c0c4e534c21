use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A uniqueness constraint was violated (duplicate email).
    UniqueViolation,
    /// A referenced row is missing, or a restrict policy blocked a delete.
    ReferenceViolation,
    /// A column or cross-column check failed (rating range, date order).
    CheckViolation,
    NotFound,
    InvalidInput,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }

    pub fn unique(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::UniqueViolation, context.into())
    }

    pub fn reference(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::ReferenceViolation, context.into())
    }

    pub fn check(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::CheckViolation, context.into())
    }

    pub fn not_found(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::NotFound, context.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::InvalidInput,
            context: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
