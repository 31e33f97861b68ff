//! Error-outcome values.

use serde::{Deserialize, Serialize};

/// The closed set of canonical failure categories. Each maps 1:1 to a status
/// code; the enum order is the canonical ordinal used for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KnownKind {
    Validation,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Gone,
    PreconditionFailed,
    PayloadTooLarge,
    UnprocessableEntity,
    TooManyRequests,
    Internal,
    NotImplemented,
    Unavailable,
}

impl KnownKind {
    /// The HTTP status code this kind maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Gone => 410,
            Self::PreconditionFailed => 412,
            Self::PayloadTooLarge => 413,
            Self::UnprocessableEntity => 422,
            Self::TooManyRequests => 429,
            Self::Internal => 500,
            Self::NotImplemented => 501,
            Self::Unavailable => 503,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation => "Validation",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "NotFound",
            Self::Conflict => "Conflict",
            Self::Gone => "Gone",
            Self::PreconditionFailed => "PreconditionFailed",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::UnprocessableEntity => "UnprocessableEntity",
            Self::TooManyRequests => "TooManyRequests",
            Self::Internal => "Internal",
            Self::NotImplemented => "NotImplemented",
            Self::Unavailable => "Unavailable",
        }
    }

    pub fn all() -> &'static [KnownKind] {
        &[
            Self::Validation,
            Self::Unauthorized,
            Self::Forbidden,
            Self::NotFound,
            Self::Conflict,
            Self::Gone,
            Self::PreconditionFailed,
            Self::PayloadTooLarge,
            Self::UnprocessableEntity,
            Self::TooManyRequests,
            Self::Internal,
            Self::NotImplemented,
            Self::Unavailable,
        ]
    }

    /// Match a factory method or attribute kind name, case-insensitively.
    pub fn from_name(name: &str) -> Option<KnownKind> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for KnownKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One statically-known failure result a handler can produce.
///
/// The derived `Ord` gives the canonical total order: known kinds by ordinal
/// first, then customs by (code, identifier).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorOutcome {
    Known(KnownKind),
    Custom { code: u16, identifier: String },
}

impl ErrorOutcome {
    /// The status code carried by this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Known(kind) => kind.status_code(),
            Self::Custom { code, .. } => *code,
        }
    }
}

impl std::fmt::Display for ErrorOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(kind) => write!(f, "{} ({})", kind.name(), kind.status_code()),
            Self::Custom { code, identifier } => write!(f, "{identifier} ({code})"),
        }
    }
}
