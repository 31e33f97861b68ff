//! Error-factory recognition.
//!
//! The runtime's factory type exposes one static member per known kind plus
//! a `Custom(code, identifier)` escape hatch. Inference recognizes calls by
//! the declaring type, then classifies the member name.

use crate::model::types::type_names_match;

use super::types::KnownKind;

/// Classification of a member of the error-factory type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryMember {
    Known(KnownKind),
    Custom,
    /// A member the table does not recognize; reported rather than ignored.
    Unknown,
}

/// Names of the recognized error-factory surface.
#[derive(Debug, Clone)]
pub struct ErrorFactoryTable {
    /// Full name of the factory type.
    pub declaring_type: String,
    /// The custom-outcome member name.
    pub custom_member: String,
}

impl Default for ErrorFactoryTable {
    fn default() -> Self {
        Self {
            declaring_type: "Endpoints.ErrorResults".into(),
            custom_member: "Custom".into(),
        }
    }
}

impl ErrorFactoryTable {
    /// Is `declaring` the factory type?
    pub fn is_factory_type(&self, declaring: &str) -> bool {
        type_names_match(declaring, &self.declaring_type)
    }

    /// Classify one member of the factory type by name.
    pub fn classify(&self, member_name: &str) -> FactoryMember {
        if member_name.eq_ignore_ascii_case(&self.custom_member) {
            return FactoryMember::Custom;
        }
        match KnownKind::from_name(member_name) {
            Some(kind) => FactoryMember::Known(kind),
            None => FactoryMember::Unknown,
        }
    }
}
