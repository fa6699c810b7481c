//! Domain models for the clinic records system.
//!
//! Every value type validates its input at construction, so a model value
//! that exists is always well-formed.

mod appointment;
mod contact;
mod nric;
mod patient;
mod schedule;

pub use appointment::*;
pub use contact::*;
pub use nric::*;
pub use patient::*;
pub use schedule::*;

use thiserror::Error;

/// Value-object validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid NRIC '{0}': must start with S, T, F, G or M, followed by 7 digits and end with a letter")]
    Nric(String),

    #[error("Invalid name '{0}': names must contain letters or digits, separated by spaces, and may use ' - . /")]
    Name(String),

    #[error("Invalid date '{0}': dates must be valid calendar dates in YYYY-MM-DD format")]
    Date(String),

    #[error("Invalid time '{0}': times must be in 24-hour HH:MM format")]
    Time(String),

    #[error("Invalid time period {start} - {end}: start time must be before end time")]
    TimePeriod { start: String, end: String },

    #[error("Invalid phone number '{0}': phone numbers must contain only digits and be at least 3 digits long")]
    Phone(String),

    #[error("Invalid email '{0}': emails must be of the format local-part@domain")]
    Email(String),

    #[error("Invalid address: addresses can take any value but must not be blank")]
    Address,

    #[error("Invalid appointment type: appointment types can take any value but must not be blank")]
    AppointmentType,
}

pub type ValidationResult<T> = Result<T, ValidationError>;
