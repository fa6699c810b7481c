//! Patient models.

use std::fmt;

use super::{Address, Date, Email, Name, Nric, Phone};

/// A registered patient.
///
/// Patients are identified by NRIC; the remaining fields are demographics
/// and contact details.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Patient {
    /// Display name
    pub name: Name,
    /// National identification number (identity)
    pub nric: Nric,
    /// Date of birth; no appointment may precede it
    pub dob: Date,
    /// Contact phone number
    pub phone: Phone,
    /// Contact email
    pub email: Email,
    /// Home address
    pub address: Address,
}

impl Patient {
    /// Create a patient from validated fields.
    pub fn new(name: Name, nric: Nric, dob: Date, phone: Phone, email: Email, address: Address) -> Self {
        Self {
            name,
            nric,
            dob,
            phone,
            email,
            address,
        }
    }

    /// Two patients are the same patient iff they share an NRIC.
    pub fn is_same_patient(&self, other: &Patient) -> bool {
        self.nric == other.nric
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; NRIC: {}; DOB: {}; Phone: {}; Email: {}; Address: {}",
            self.name, self.nric, self.dob, self.phone, self.email, self.address
        )
    }
}
