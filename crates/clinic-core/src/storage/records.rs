//! On-disk record shapes.
//!
//! Records hold plain strings so a hand-edited file is read field by field
//! and each field goes through the same validation as user input.

use serde::{Deserialize, Serialize};

use super::{StorageError, StorageResult};
use crate::book::{AddressBook, ReadOnlyAddressBook};
use crate::models::{
    Address, Appointment, AppointmentType, Date, Email, Mark, Name, Note, Nric, Patient, Phone,
    TimePeriod, ValidationError,
};

/// Whole-book snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSerializableAddressBook {
    #[serde(default)]
    pub patients: Vec<JsonPatient>,
    #[serde(default)]
    pub appointments: Vec<JsonAppointment>,
}

impl JsonSerializableAddressBook {
    pub fn from_book(book: &impl ReadOnlyAddressBook) -> Self {
        Self {
            patients: book.patients().iter().map(JsonPatient::from).collect(),
            appointments: book.appointments().iter().map(JsonAppointment::from).collect(),
        }
    }

    /// Validate every record, then the book as a whole.
    pub fn to_model(&self) -> StorageResult<AddressBook> {
        let patients = self
            .patients
            .iter()
            .map(JsonPatient::to_model)
            .collect::<StorageResult<Vec<_>>>()?;
        let appointments = self
            .appointments
            .iter()
            .map(JsonAppointment::to_model)
            .collect::<StorageResult<Vec<_>>>()?;
        Ok(AddressBook::from_parts(patients, appointments)?)
    }
}

fn illegal(record: &'static str) -> impl Fn(ValidationError) -> StorageError {
    move |source| StorageError::IllegalValue { record, source }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonPatient {
    pub name: String,
    pub nric: String,
    pub dob: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl From<&Patient> for JsonPatient {
    fn from(patient: &Patient) -> Self {
        Self {
            name: patient.name.to_string(),
            nric: patient.nric.to_string(),
            dob: patient.dob.to_string(),
            phone: patient.phone.to_string(),
            email: patient.email.to_string(),
            address: patient.address.to_string(),
        }
    }
}

impl JsonPatient {
    pub fn to_model(&self) -> StorageResult<Patient> {
        let err = illegal("patient");
        Ok(Patient::new(
            Name::parse(&self.name).map_err(&err)?,
            Nric::parse(&self.nric).map_err(&err)?,
            Date::parse(&self.dob).map_err(&err)?,
            Phone::parse(&self.phone).map_err(&err)?,
            Email::parse(&self.email).map_err(&err)?,
            Address::parse(&self.address).map_err(&err)?,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonAppointment {
    pub nric: String,
    pub date: String,
    pub start: String,
    pub end: String,
    pub appointment_type: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub mark: bool,
}

impl From<&Appointment> for JsonAppointment {
    fn from(appt: &Appointment) -> Self {
        Self {
            nric: appt.nric.to_string(),
            date: appt.date.to_string(),
            start: appt.period.start().to_string(),
            end: appt.period.end().to_string(),
            appointment_type: appt.appointment_type.to_string(),
            note: appt.note.to_string(),
            mark: appt.mark.is_marked(),
        }
    }
}

impl JsonAppointment {
    pub fn to_model(&self) -> StorageResult<Appointment> {
        let err = illegal("appointment");
        let appt = Appointment::new(
            Nric::parse(&self.nric).map_err(&err)?,
            Date::parse(&self.date).map_err(&err)?,
            TimePeriod::parse(&self.start, &self.end).map_err(&err)?,
            AppointmentType::parse(&self.appointment_type).map_err(&err)?,
            Note::new(&self.note),
        );
        Ok(Appointment {
            mark: Mark::new(self.mark),
            ..appt
        })
    }
}
