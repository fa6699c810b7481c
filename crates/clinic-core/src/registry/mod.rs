//! Ordered in-memory registries for patients and appointments, plus the
//! derived appointment view.
//!
//! Registries enforce only their own uniqueness rules. Cross-registry
//! invariants (patient existence, date validity, cascades) belong to
//! [`crate::book::AddressBook`].

mod appointments;
mod patients;
mod views;

pub use appointments::*;
pub use patients::*;
pub use views::*;

use std::fmt;

use thiserror::Error;

/// Kind of record a registry error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Patient,
    Appointment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Patient => f.write_str("patient"),
            EntityKind::Appointment => f.write_str("appointment"),
        }
    }
}

/// Registry errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate {kind}: {key}")]
    DuplicateEntity { kind: EntityKind, key: String },

    #[error("No such {kind}: {key}")]
    EntityNotFound { kind: EntityKind, key: String },
}

impl RegistryError {
    pub(crate) fn duplicate(kind: EntityKind, key: impl fmt::Display) -> Self {
        RegistryError::DuplicateEntity {
            kind,
            key: key.to_string(),
        }
    }

    pub(crate) fn not_found(kind: EntityKind, key: impl fmt::Display) -> Self {
        RegistryError::EntityNotFound {
            kind,
            key: key.to_string(),
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
