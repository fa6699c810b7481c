//! The address book: aggregate root over patients, appointments and the
//! derived appointment view.
//!
//! # Invariants
//! - No two patients share an NRIC.
//! - Every appointment references an existing patient.
//! - No appointment is dated before its patient's date of birth.
//! - Appointment identities (NRIC, date, period) are unique.
//! - The appointment view always matches the two registries.
//!
//! Every mutation checks all of its preconditions before changing any
//! registry, so a failed call leaves the book untouched.

use thiserror::Error;
use tracing::debug;

use crate::models::{Appointment, AppointmentView, Date, Nric, Patient, TimePeriod};
use crate::registry::{
    AppointmentRegistry, AppointmentViews, EntityKind, PatientRegistry, RegistryError,
};

/// Address book errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("No patient with NRIC {0}")]
    PatientNotFound(Nric),

    #[error("Appointment date {date} is before the patient's date of birth {dob}")]
    InvalidApptDate { date: Date, dob: Date },

    #[error("Appointment for {nric} on {date} at {period} overlaps another appointment of the same patient")]
    OverlappingAppointment {
        nric: Nric,
        date: Date,
        period: TimePeriod,
    },
}

pub type BookResult<T> = Result<T, BookError>;

/// Read-only access to address book contents, for rendering and storage.
pub trait ReadOnlyAddressBook {
    fn patients(&self) -> &[Patient];
    fn appointments(&self) -> &[Appointment];
    fn appointment_views(&self) -> &[AppointmentView];
}

/// Aggregate root and single mutation entry point.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    patients: PatientRegistry,
    appointments: AppointmentRegistry,
    views: AppointmentViews,
}

impl PartialEq for AddressBook {
    fn eq(&self, other: &Self) -> bool {
        self.patients == other.patients && self.appointments == other.appointments
    }
}

impl Eq for AddressBook {}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from whole collections, validating every invariant.
    ///
    /// Used when restoring a snapshot; any violation rejects the whole input.
    pub fn from_parts(patients: Vec<Patient>, appointments: Vec<Appointment>) -> BookResult<Self> {
        let patients = PatientRegistry::from_patients(patients)?;

        for appt in &appointments {
            let owner = patients
                .find_by_nric(&appt.nric)
                .ok_or_else(|| BookError::PatientNotFound(appt.nric.clone()))?;
            if appt.date.is_before(&owner.dob) {
                return Err(BookError::InvalidApptDate {
                    date: appt.date,
                    dob: owner.dob,
                });
            }
        }

        let appointments = AppointmentRegistry::from_appointments(appointments)?;

        for (i, appt) in appointments.iter().enumerate() {
            if appointments.iter().skip(i + 1).any(|other| appt.overlaps(other)) {
                return Err(BookError::OverlappingAppointment {
                    nric: appt.nric.clone(),
                    date: appt.date,
                    period: appt.period,
                });
            }
        }

        let mut book = Self {
            patients,
            appointments,
            views: AppointmentViews::new(),
        };
        book.refresh_views();
        Ok(book)
    }

    /// Replace all contents with a copy of `other`.
    pub fn reset_data(&mut self, other: &impl ReadOnlyAddressBook) -> BookResult<()> {
        *self = Self::from_parts(other.patients().to_vec(), other.appointments().to_vec())?;
        Ok(())
    }

    /// Remove every patient and appointment.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // =========================================================================
    // Patient operations
    // =========================================================================

    pub fn has_patient_with_nric(&self, nric: &Nric) -> bool {
        self.patients.has_nric(nric)
    }

    pub fn find_patient_with_nric(&self, nric: &Nric) -> Option<&Patient> {
        self.patients.find_by_nric(nric)
    }

    pub fn get_patient_with_nric(&self, nric: &Nric) -> BookResult<&Patient> {
        Ok(self.patients.get_by_nric(nric)?)
    }

    /// Add a patient. The NRIC must be unused.
    pub fn add_patient(&mut self, patient: Patient) -> BookResult<()> {
        self.patients.add(patient)?;
        Ok(())
    }

    /// Replace `target` with `edited` in place.
    ///
    /// If the NRIC changes, the patient's appointments move to the new NRIC.
    /// Rejected when the new date of birth would fall after any of the
    /// patient's existing appointments.
    pub fn set_patient(&mut self, target: &Patient, edited: Patient) -> BookResult<()> {
        if !self.patients.contains(target) {
            return Err(RegistryError::not_found(EntityKind::Patient, &target.nric).into());
        }

        if let Some(early) = self
            .appointments
            .for_nric(&target.nric)
            .find(|a| a.date.is_before(&edited.dob))
        {
            return Err(BookError::InvalidApptDate {
                date: early.date,
                dob: edited.dob,
            });
        }

        let old_nric = target.nric.clone();
        let new_nric = edited.nric.clone();
        self.patients.set_patient(target, edited)?;
        if old_nric != new_nric {
            self.appointments.reassign_nric(&old_nric, &new_nric);
        }
        self.refresh_views();
        Ok(())
    }

    /// Delete a patient and, in the same step, every appointment they own.
    pub fn delete_patient_with_nric(&mut self, nric: &Nric) -> BookResult<Patient> {
        let removed = self.patients.delete_by_nric(nric)?;
        let cascaded = self.appointments.delete_by_nric(nric);
        debug!(%nric, cascaded, "patient deleted with cascade");
        self.refresh_views();
        Ok(removed)
    }

    // =========================================================================
    // Appointment operations
    // =========================================================================

    /// Identity check: type, note and mark are ignored.
    pub fn has_appointment(&self, appointment: &Appointment) -> bool {
        self.appointments.contains(appointment)
    }

    pub fn has_appointment_with_details(&self, nric: &Nric, date: &Date, period: &TimePeriod) -> bool {
        self.appointments.find_by_identity(nric, date, period).is_some()
    }

    pub fn find_appointment(&self, nric: &Nric, date: &Date, period: &TimePeriod) -> Option<&Appointment> {
        self.appointments.find_by_identity(nric, date, period)
    }

    pub fn get_matching_appointment(&self, nric: &Nric, date: &Date, period: &TimePeriod) -> BookResult<&Appointment> {
        Ok(self.appointments.get_matching(nric, date, period)?)
    }

    /// An appointment is valid for its patient when it is not dated before
    /// the patient's birth.
    pub fn is_valid_appt_for_patient(&self, appointment: &Appointment) -> BookResult<bool> {
        let patient = self
            .patients
            .find_by_nric(&appointment.nric)
            .ok_or_else(|| BookError::PatientNotFound(appointment.nric.clone()))?;
        Ok(!appointment.date.is_before(&patient.dob))
    }

    pub fn same_patient_has_overlapping_appointment(&self, appointment: &Appointment) -> bool {
        self.appointments.has_overlap(appointment, None)
    }

    pub fn has_overlapping_appointment_excluding(&self, appointment: &Appointment, excluding: &Appointment) -> bool {
        self.appointments.has_overlap(appointment, Some(excluding))
    }

    /// Add an appointment for an existing patient.
    ///
    /// Overlap with the patient's other appointments is not checked here;
    /// callers query [`Self::same_patient_has_overlapping_appointment`] first.
    pub fn add_appointment(&mut self, appointment: Appointment) -> BookResult<()> {
        self.check_owner(&appointment)?;
        self.appointments.add(appointment)?;
        self.refresh_views();
        Ok(())
    }

    /// Replace `target` with `edited` by identity.
    pub fn set_appointment(&mut self, target: &Appointment, edited: Appointment) -> BookResult<()> {
        if !self.appointments.contains(target) {
            return Err(RegistryError::not_found(
                EntityKind::Appointment,
                format!("{} on {} at {}", target.nric, target.date, target.period),
            )
            .into());
        }
        self.check_owner(&edited)?;
        self.appointments.set_appointment(target, edited)?;
        self.refresh_views();
        Ok(())
    }

    pub fn delete_appointment(&mut self, appointment: &Appointment) -> BookResult<Appointment> {
        let removed = self.appointments.remove(appointment)?;
        self.refresh_views();
        Ok(removed)
    }

    /// Cascade primitive: remove every appointment for this NRIC.
    pub fn delete_appointments_with_nric(&mut self, nric: &Nric) -> usize {
        let removed = self.appointments.delete_by_nric(nric);
        self.refresh_views();
        removed
    }

    /// Build a view entry for one appointment from current patient data.
    pub fn create_appointment_view(&self, appointment: &Appointment) -> BookResult<AppointmentView> {
        let patient = self
            .patients
            .find_by_nric(&appointment.nric)
            .ok_or_else(|| BookError::PatientNotFound(appointment.nric.clone()))?;
        Ok(AppointmentView::new(patient.name.clone(), appointment.clone()))
    }

    /// Owning patient must exist and be born on or before the appointment date.
    fn check_owner(&self, appointment: &Appointment) -> BookResult<()> {
        let patient = self
            .patients
            .find_by_nric(&appointment.nric)
            .ok_or_else(|| BookError::PatientNotFound(appointment.nric.clone()))?;
        if appointment.date.is_before(&patient.dob) {
            return Err(BookError::InvalidApptDate {
                date: appointment.date,
                dob: patient.dob,
            });
        }
        Ok(())
    }

    fn refresh_views(&mut self) {
        self.views.recompute(&self.patients, &self.appointments);
    }
}

impl ReadOnlyAddressBook for AddressBook {
    fn patients(&self) -> &[Patient] {
        self.patients.as_slice()
    }

    fn appointments(&self) -> &[Appointment] {
        self.appointments.as_slice()
    }

    fn appointment_views(&self) -> &[AppointmentView] {
        self.views.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, AppointmentType, Email, Name, Note, Phone};

    fn make_patient(name: &str, nric: &str, dob: &str) -> Patient {
        Patient::new(
            Name::parse(name).unwrap(),
            Nric::parse(nric).unwrap(),
            Date::parse(dob).unwrap(),
            Phone::parse("93121534").unwrap(),
            Email::parse("patient@example.com").unwrap(),
            Address::parse("Blk 47 Tampines Street 20").unwrap(),
        )
    }

    fn make_appointment(nric: &str, date: &str, start: &str, end: &str) -> Appointment {
        Appointment::new(
            Nric::parse(nric).unwrap(),
            Date::parse(date).unwrap(),
            TimePeriod::parse(start, end).unwrap(),
            AppointmentType::parse("Check-up").unwrap(),
            Note::new("fasting"),
        )
    }

    fn setup_book() -> AddressBook {
        let mut book = AddressBook::new();
        book.add_patient(make_patient("Alice", "S1234567A", "1990-01-01"))
            .unwrap();
        book.add_patient(make_patient("Bob", "S2345678B", "2000-06-15"))
            .unwrap();
        book
    }

    #[test]
    fn test_add_appointment_updates_view() {
        let mut book = setup_book();
        let appt = make_appointment("S1234567A", "2024-01-05", "09:00", "09:30");
        book.add_appointment(appt.clone()).unwrap();

        assert!(book.has_appointment(&appt));
        assert_eq!(book.appointment_views().len(), 1);
        assert_eq!(book.appointment_views()[0].name.as_str(), "Alice");
    }

    #[test]
    fn test_add_appointment_unknown_patient() {
        let mut book = setup_book();
        let appt = make_appointment("T0000000Z", "2024-01-05", "09:00", "09:30");
        assert!(matches!(
            book.add_appointment(appt),
            Err(BookError::PatientNotFound(_))
        ));
        assert!(book.appointments().is_empty());
    }

    #[test]
    fn test_add_appointment_before_birth() {
        let mut book = setup_book();
        let appt = make_appointment("S2345678B", "2000-06-14", "09:00", "09:30");
        assert!(matches!(
            book.add_appointment(appt),
            Err(BookError::InvalidApptDate { .. })
        ));

        // On the birthday itself is fine.
        let on_birthday = make_appointment("S2345678B", "2000-06-15", "09:00", "09:30");
        book.add_appointment(on_birthday).unwrap();
    }

    #[test]
    fn test_add_appointment_does_not_check_overlap() {
        let mut book = setup_book();
        book.add_appointment(make_appointment("S1234567A", "2024-01-05", "09:00", "10:00"))
            .unwrap();

        let clash = make_appointment("S1234567A", "2024-01-05", "09:30", "10:30");
        assert!(book.same_patient_has_overlapping_appointment(&clash));
        book.add_appointment(clash).unwrap();
    }

    #[test]
    fn test_delete_patient_cascades() {
        let mut book = setup_book();
        book.add_appointment(make_appointment("S1234567A", "2024-01-05", "09:00", "10:00"))
            .unwrap();
        book.add_appointment(make_appointment("S2345678B", "2024-01-05", "09:00", "10:00"))
            .unwrap();
        book.add_appointment(make_appointment("S1234567A", "2024-01-07", "09:00", "10:00"))
            .unwrap();

        let nric = Nric::parse("S1234567A").unwrap();
        let removed = book.delete_patient_with_nric(&nric).unwrap();

        assert_eq!(removed.name.as_str(), "Alice");
        assert!(!book.has_patient_with_nric(&nric));
        assert_eq!(book.appointments().len(), 1);
        assert_eq!(book.appointments()[0].nric.as_str(), "S2345678B");
        assert_eq!(book.appointment_views().len(), 1);
    }

    #[test]
    fn test_delete_missing_patient() {
        let mut book = setup_book();
        let nric = Nric::parse("T0000000Z").unwrap();
        assert!(matches!(
            book.delete_patient_with_nric(&nric),
            Err(BookError::Registry(RegistryError::EntityNotFound { .. }))
        ));
        assert_eq!(book.patients().len(), 2);
    }

    #[test]
    fn test_rename_patient_refreshes_view() {
        let mut book = setup_book();
        book.add_appointment(make_appointment("S1234567A", "2024-01-05", "09:00", "10:00"))
            .unwrap();
        book.add_appointment(make_appointment("S1234567A", "2024-01-06", "09:00", "10:00"))
            .unwrap();

        let target = book
            .get_patient_with_nric(&Nric::parse("S1234567A").unwrap())
            .unwrap()
            .clone();
        let renamed = Patient {
            name: Name::parse("Alice Tan").unwrap(),
            ..target.clone()
        };
        book.set_patient(&target, renamed).unwrap();

        assert!(book
            .appointment_views()
            .iter()
            .all(|v| v.name.as_str() == "Alice Tan"));
    }

    #[test]
    fn test_set_patient_new_nric_moves_appointments() {
        let mut book = setup_book();
        book.add_appointment(make_appointment("S1234567A", "2024-01-05", "09:00", "10:00"))
            .unwrap();

        let target = book.patients()[0].clone();
        let edited = Patient {
            nric: Nric::parse("F1234567N").unwrap(),
            ..target.clone()
        };
        book.set_patient(&target, edited).unwrap();

        assert_eq!(book.appointments()[0].nric.as_str(), "F1234567N");
        assert_eq!(book.appointment_views()[0].name.as_str(), "Alice");
        assert_eq!(book.patients()[0].nric.as_str(), "F1234567N");
    }

    #[test]
    fn test_set_patient_dob_after_existing_appointment() {
        let mut book = setup_book();
        let appt = make_appointment("S1234567A", "2024-01-05", "09:00", "10:00");
        book.add_appointment(appt).unwrap();

        let target = book.patients()[0].clone();
        let edited = Patient {
            dob: Date::parse("2024-02-01").unwrap(),
            ..target.clone()
        };
        let before = book.clone();
        assert!(matches!(
            book.set_patient(&target, edited),
            Err(BookError::InvalidApptDate { .. })
        ));
        assert_eq!(book, before);
    }

    #[test]
    fn test_set_patient_duplicate_nric() {
        let mut book = setup_book();
        let target = book.patients()[0].clone();
        let edited = Patient {
            nric: Nric::parse("S2345678B").unwrap(),
            ..target.clone()
        };
        assert!(matches!(
            book.set_patient(&target, edited),
            Err(BookError::Registry(RegistryError::DuplicateEntity { .. }))
        ));
    }

    #[test]
    fn test_set_appointment_validates_owner() {
        let mut book = setup_book();
        let appt = make_appointment("S1234567A", "2024-01-05", "09:00", "10:00");
        book.add_appointment(appt.clone()).unwrap();

        let moved_to_stranger = Appointment {
            nric: Nric::parse("T0000000Z").unwrap(),
            ..appt.clone()
        };
        assert!(matches!(
            book.set_appointment(&appt, moved_to_stranger),
            Err(BookError::PatientNotFound(_))
        ));

        let too_early = Appointment {
            date: Date::parse("1989-12-31").unwrap(),
            ..appt.clone()
        };
        assert!(matches!(
            book.set_appointment(&appt, too_early),
            Err(BookError::InvalidApptDate { .. })
        ));
        assert_eq!(book.appointments(), &[appt]);
    }

    #[test]
    fn test_create_appointment_view() {
        let book = setup_book();
        let appt = make_appointment("S2345678B", "2024-01-05", "09:00", "10:00");
        let view = book.create_appointment_view(&appt).unwrap();
        assert_eq!(view.name.as_str(), "Bob");
        assert_eq!(view.appointment, appt);
    }

    #[test]
    fn test_from_parts_validates_references() {
        let patients = vec![make_patient("Alice", "S1234567A", "1990-01-01")];

        let orphan = vec![make_appointment("S2345678B", "2024-01-05", "09:00", "10:00")];
        assert!(matches!(
            AddressBook::from_parts(patients.clone(), orphan),
            Err(BookError::PatientNotFound(_))
        ));

        let overlapping = vec![
            make_appointment("S1234567A", "2024-01-05", "09:00", "10:00"),
            make_appointment("S1234567A", "2024-01-05", "09:30", "10:30"),
        ];
        assert!(matches!(
            AddressBook::from_parts(patients.clone(), overlapping),
            Err(BookError::OverlappingAppointment { .. })
        ));

        let valid = vec![make_appointment("S1234567A", "2024-01-05", "09:00", "10:00")];
        let book = AddressBook::from_parts(patients, valid).unwrap();
        assert_eq!(book.appointment_views().len(), 1);
    }

    #[test]
    fn test_reset_data_and_clear() {
        let mut source = setup_book();
        source
            .add_appointment(make_appointment("S1234567A", "2024-01-05", "09:00", "10:00"))
            .unwrap();

        let mut book = AddressBook::new();
        book.reset_data(&source).unwrap();
        assert_eq!(book, source);
        assert_eq!(book.appointment_views().len(), 1);

        book.clear();
        assert!(book.patients().is_empty());
        assert!(book.appointment_views().is_empty());
    }
}
