//! Appointment models and the patient-joined appointment view.

use std::fmt;

use super::{Date, Name, Nric, TimePeriod, ValidationError, ValidationResult};

/// Free-text category of an appointment (e.g. "Medical Check-up").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppointmentType(String);

impl AppointmentType {
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::AppointmentType);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text note attached to an appointment. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Note(String);

impl Note {
    pub fn new(text: &str) -> Self {
        Self(text.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Completion mark: whether the patient has been seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Mark(bool);

impl Mark {
    pub fn new(seen: bool) -> Self {
        Self(seen)
    }

    pub fn is_marked(&self) -> bool {
        self.0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "seen" } else { "not seen" })
    }
}

/// A scheduled appointment.
///
/// Identity is the tuple (NRIC, date, time period); there is no surrogate
/// key. The NRIC refers to the owning patient by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Appointment {
    /// NRIC of the owning patient
    pub nric: Nric,
    /// Day of the appointment
    pub date: Date,
    /// Time window on that day
    pub period: TimePeriod,
    /// Category of the appointment
    pub appointment_type: AppointmentType,
    /// Free-text note
    pub note: Note,
    /// Whether the appointment has been attended
    pub mark: Mark,
}

impl Appointment {
    /// Create a new, unmarked appointment.
    pub fn new(
        nric: Nric,
        date: Date,
        period: TimePeriod,
        appointment_type: AppointmentType,
        note: Note,
    ) -> Self {
        Self {
            nric,
            date,
            period,
            appointment_type,
            note,
            mark: Mark::default(),
        }
    }

    /// Check whether this appointment has the given identity tuple.
    pub fn has_identity(&self, nric: &Nric, date: &Date, period: &TimePeriod) -> bool {
        &self.nric == nric && &self.date == date && &self.period == period
    }

    /// Two appointments are the same appointment iff their identity tuples match.
    pub fn is_same_appointment(&self, other: &Appointment) -> bool {
        self.has_identity(&other.nric, &other.date, &other.period)
    }

    /// Same patient, same date, intersecting time windows.
    pub fn overlaps(&self, other: &Appointment) -> bool {
        self.nric == other.nric && self.date == other.date && self.period.overlaps(&other.period)
    }

    /// Copy of this appointment with the completion mark replaced.
    pub fn with_mark(&self, seen: bool) -> Self {
        Self {
            mark: Mark::new(seen),
            ..self.clone()
        }
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NRIC: {}; Date: {}; Time: {}; Type: {}; Note: {}; Status: {}",
            self.nric, self.date, self.period, self.appointment_type, self.note, self.mark
        )
    }
}

/// Read-only pairing of an appointment with its patient's current name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentView {
    pub name: Name,
    pub appointment: Appointment,
}

impl AppointmentView {
    pub fn new(name: Name, appointment: Appointment) -> Self {
        Self { name, appointment }
    }
}

impl fmt::Display for AppointmentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; {}", self.name, self.appointment)
    }
}
