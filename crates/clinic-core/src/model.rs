//! Application model: the address book plus the filtered lists shown to the
//! user.
//!
//! Commands execute against [`Model`]. Every successful mutation bumps
//! [`Model::revision`] so a presentation layer can tell when to redraw.

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::book::{AddressBook, BookResult, ReadOnlyAddressBook};
use crate::models::{Appointment, AppointmentView, Date, Nric, Patient, TimePeriod};

/// Minimum blended similarity for a fuzzy keyword match.
const FUZZY_MATCH_THRESHOLD: f64 = 0.85;

/// Keywords shorter than this only match exactly.
const FUZZY_MIN_KEYWORD_LEN: usize = 4;

/// Which patients are currently listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PatientFilter {
    #[default]
    All,
    /// Any keyword matches any word of the name.
    NameKeywords(Vec<String>),
    Nric(Nric),
}

impl PatientFilter {
    pub fn matches(&self, patient: &Patient) -> bool {
        match self {
            PatientFilter::All => true,
            PatientFilter::NameKeywords(keywords) => keywords
                .iter()
                .any(|kw| patient.name.words().any(|word| keyword_matches(kw, word))),
            PatientFilter::Nric(nric) => &patient.nric == nric,
        }
    }
}

/// Which appointment views are currently listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AppointmentFilter {
    #[default]
    All,
    Nric(Nric),
    Date(Date),
    NricAndDate(Nric, Date),
}

impl AppointmentFilter {
    pub fn matches(&self, view: &AppointmentView) -> bool {
        let appt = &view.appointment;
        match self {
            AppointmentFilter::All => true,
            AppointmentFilter::Nric(nric) => &appt.nric == nric,
            AppointmentFilter::Date(date) => &appt.date == date,
            AppointmentFilter::NricAndDate(nric, date) => &appt.nric == nric && &appt.date == date,
        }
    }
}

/// Case-insensitive word match, tolerating small typos in longer keywords.
fn keyword_matches(keyword: &str, word: &str) -> bool {
    let keyword = keyword.to_lowercase();
    let word = word.to_lowercase();
    if keyword == word {
        return true;
    }
    keyword.chars().count() >= FUZZY_MIN_KEYWORD_LEN && fuzzy_match(&keyword, &word) >= FUZZY_MATCH_THRESHOLD
}

/// Blend Jaro-Winkler (typos, shared prefixes) with normalized Levenshtein.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}

/// Address book with list filters and a change counter.
#[derive(Debug, Clone, Default)]
pub struct Model {
    book: AddressBook,
    patient_filter: PatientFilter,
    appointment_filter: AppointmentFilter,
    revision: u64,
}

impl Model {
    pub fn new(book: AddressBook) -> Self {
        Self {
            book,
            ..Self::default()
        }
    }

    pub fn address_book(&self) -> &AddressBook {
        &self.book
    }

    /// Incremented after every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // =========================================================================
    // Filtered lists
    // =========================================================================

    pub fn filtered_patients(&self) -> Vec<&Patient> {
        self.book
            .patients()
            .iter()
            .filter(|p| self.patient_filter.matches(p))
            .collect()
    }

    pub fn filtered_appointment_views(&self) -> Vec<&AppointmentView> {
        self.book
            .appointment_views()
            .iter()
            .filter(|v| self.appointment_filter.matches(v))
            .collect()
    }

    pub fn patient_filter(&self) -> &PatientFilter {
        &self.patient_filter
    }

    pub fn appointment_filter(&self) -> &AppointmentFilter {
        &self.appointment_filter
    }

    pub fn update_patient_filter(&mut self, filter: PatientFilter) {
        self.patient_filter = filter;
    }

    pub fn update_appointment_filter(&mut self, filter: AppointmentFilter) {
        self.appointment_filter = filter;
    }

    /// Show every patient and appointment again.
    pub fn show_all(&mut self) {
        self.patient_filter = PatientFilter::All;
        self.appointment_filter = AppointmentFilter::All;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn has_patient_with_nric(&self, nric: &Nric) -> bool {
        self.book.has_patient_with_nric(nric)
    }

    pub fn find_patient_with_nric(&self, nric: &Nric) -> Option<&Patient> {
        self.book.find_patient_with_nric(nric)
    }

    pub fn has_appointment(&self, appointment: &Appointment) -> bool {
        self.book.has_appointment(appointment)
    }

    pub fn find_appointment(&self, nric: &Nric, date: &Date, period: &TimePeriod) -> Option<&Appointment> {
        self.book.find_appointment(nric, date, period)
    }

    pub fn is_valid_appt_for_patient(&self, appointment: &Appointment) -> BookResult<bool> {
        self.book.is_valid_appt_for_patient(appointment)
    }

    pub fn same_patient_has_overlapping_appointment(&self, appointment: &Appointment) -> bool {
        self.book.same_patient_has_overlapping_appointment(appointment)
    }

    pub fn has_overlapping_appointment_excluding(&self, appointment: &Appointment, excluding: &Appointment) -> bool {
        self.book
            .has_overlapping_appointment_excluding(appointment, excluding)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn add_patient(&mut self, patient: Patient) -> BookResult<()> {
        self.book.add_patient(patient)?;
        self.bump();
        Ok(())
    }

    pub fn set_patient(&mut self, target: &Patient, edited: Patient) -> BookResult<()> {
        self.book.set_patient(target, edited)?;
        self.bump();
        Ok(())
    }

    pub fn delete_patient_with_nric(&mut self, nric: &Nric) -> BookResult<Patient> {
        let removed = self.book.delete_patient_with_nric(nric)?;
        self.bump();
        Ok(removed)
    }

    pub fn add_appointment(&mut self, appointment: Appointment) -> BookResult<()> {
        self.book.add_appointment(appointment)?;
        self.bump();
        Ok(())
    }

    pub fn set_appointment(&mut self, target: &Appointment, edited: Appointment) -> BookResult<()> {
        self.book.set_appointment(target, edited)?;
        self.bump();
        Ok(())
    }

    pub fn delete_appointment(&mut self, appointment: &Appointment) -> BookResult<Appointment> {
        let removed = self.book.delete_appointment(appointment)?;
        self.bump();
        Ok(removed)
    }

    /// Replace the book wholesale, e.g. after loading a snapshot.
    pub fn set_address_book(&mut self, book: AddressBook) {
        self.book = book;
        self.bump();
    }

    pub fn clear(&mut self) {
        self.book.clear();
        self.bump();
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}
