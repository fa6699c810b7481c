//! Appointment registry.

use std::collections::HashSet;

use tracing::debug;

use super::{EntityKind, RegistryError, RegistryResult};
use crate::models::{Appointment, Date, Nric, TimePeriod};

/// Insertion-ordered list of appointments with unique identity tuples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentRegistry {
    appointments: Vec<Appointment>,
}

impl AppointmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list, rejecting duplicate identities.
    pub fn from_appointments(appointments: Vec<Appointment>) -> RegistryResult<Self> {
        let mut seen = HashSet::with_capacity(appointments.len());
        for appt in &appointments {
            if !seen.insert((&appt.nric, appt.date, appt.period)) {
                return Err(RegistryError::duplicate(EntityKind::Appointment, describe(appt)));
            }
        }
        Ok(Self { appointments })
    }

    /// Check for an appointment with the same identity (type, note and mark ignored).
    pub fn contains(&self, appointment: &Appointment) -> bool {
        self.position_of(appointment).is_some()
    }

    /// Direct identity lookup.
    pub fn find_by_identity(&self, nric: &Nric, date: &Date, period: &TimePeriod) -> Option<&Appointment> {
        self.appointments
            .iter()
            .find(|a| a.has_identity(nric, date, period))
    }

    pub fn get_matching(&self, nric: &Nric, date: &Date, period: &TimePeriod) -> RegistryResult<&Appointment> {
        self.find_by_identity(nric, date, period).ok_or_else(|| {
            RegistryError::not_found(EntityKind::Appointment, format!("{nric} on {date} at {period}"))
        })
    }

    /// Appointments owned by the patient with this NRIC, in registry order.
    pub fn for_nric<'a>(&'a self, nric: &'a Nric) -> impl Iterator<Item = &'a Appointment> + 'a {
        self.appointments.iter().filter(move |a| &a.nric == nric)
    }

    /// Whether `candidate` intersects any stored appointment of the same
    /// patient on the same date, ignoring the stored appointment with the
    /// identity of `excluding`.
    pub fn has_overlap(&self, candidate: &Appointment, excluding: Option<&Appointment>) -> bool {
        self.appointments
            .iter()
            .filter(|a| excluding.map_or(true, |ex| !a.is_same_appointment(ex)))
            .any(|a| a.overlaps(candidate))
    }

    /// Append an appointment.
    pub fn add(&mut self, appointment: Appointment) -> RegistryResult<()> {
        if self.contains(&appointment) {
            return Err(RegistryError::duplicate(EntityKind::Appointment, describe(&appointment)));
        }
        debug!(nric = %appointment.nric, date = %appointment.date, period = %appointment.period, "appointment added");
        self.appointments.push(appointment);
        Ok(())
    }

    /// Replace `target` with `edited` at the same position.
    pub fn set_appointment(&mut self, target: &Appointment, edited: Appointment) -> RegistryResult<()> {
        let index = self
            .position_of(target)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Appointment, describe(target)))?;

        if !target.is_same_appointment(&edited) && self.contains(&edited) {
            return Err(RegistryError::duplicate(EntityKind::Appointment, describe(&edited)));
        }

        debug!(nric = %edited.nric, date = %edited.date, period = %edited.period, "appointment replaced");
        self.appointments[index] = edited;
        Ok(())
    }

    /// Remove one appointment by identity.
    pub fn remove(&mut self, appointment: &Appointment) -> RegistryResult<Appointment> {
        let index = self
            .position_of(appointment)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Appointment, describe(appointment)))?;
        debug!(nric = %appointment.nric, date = %appointment.date, "appointment removed");
        Ok(self.appointments.remove(index))
    }

    /// Remove every appointment for this NRIC. Returns how many were removed.
    pub fn delete_by_nric(&mut self, nric: &Nric) -> usize {
        let before = self.appointments.len();
        self.appointments.retain(|a| &a.nric != nric);
        let removed = before - self.appointments.len();
        debug!(%nric, removed, "appointments removed for patient");
        removed
    }

    /// Move every appointment of `from` over to `to`, keeping positions.
    pub fn reassign_nric(&mut self, from: &Nric, to: &Nric) {
        for appt in self.appointments.iter_mut().filter(|a| &a.nric == from) {
            appt.nric = to.clone();
        }
    }

    pub fn as_slice(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    fn position_of(&self, appointment: &Appointment) -> Option<usize> {
        self.appointments
            .iter()
            .position(|a| a.is_same_appointment(appointment))
    }
}

fn describe(appointment: &Appointment) -> String {
    format!(
        "{} on {} at {}",
        appointment.nric, appointment.date, appointment.period
    )
}
