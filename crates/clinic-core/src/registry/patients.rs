//! Patient registry.

use std::collections::HashSet;

use tracing::debug;

use super::{EntityKind, RegistryError, RegistryResult};
use crate::models::{Nric, Patient};

/// Insertion-ordered list of patients with unique NRICs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientRegistry {
    patients: Vec<Patient>,
}

impl PatientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list, rejecting duplicate NRICs.
    pub fn from_patients(patients: Vec<Patient>) -> RegistryResult<Self> {
        let mut seen = HashSet::with_capacity(patients.len());
        for patient in &patients {
            if !seen.insert(&patient.nric) {
                return Err(RegistryError::duplicate(EntityKind::Patient, &patient.nric));
            }
        }
        Ok(Self { patients })
    }

    pub fn has_nric(&self, nric: &Nric) -> bool {
        self.position_of(nric).is_some()
    }

    pub fn contains(&self, patient: &Patient) -> bool {
        self.has_nric(&patient.nric)
    }

    pub fn find_by_nric(&self, nric: &Nric) -> Option<&Patient> {
        self.patients.iter().find(|p| &p.nric == nric)
    }

    pub fn get_by_nric(&self, nric: &Nric) -> RegistryResult<&Patient> {
        self.find_by_nric(nric)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Patient, nric))
    }

    /// Append a patient.
    pub fn add(&mut self, patient: Patient) -> RegistryResult<()> {
        if self.contains(&patient) {
            return Err(RegistryError::duplicate(EntityKind::Patient, &patient.nric));
        }
        debug!(nric = %patient.nric, "patient added");
        self.patients.push(patient);
        Ok(())
    }

    /// Replace `target` with `edited` at the same position.
    ///
    /// `edited` may keep the target's NRIC, or take one no other patient uses.
    pub fn set_patient(&mut self, target: &Patient, edited: Patient) -> RegistryResult<()> {
        let index = self
            .position_of(&target.nric)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Patient, &target.nric))?;

        if !target.is_same_patient(&edited) && self.contains(&edited) {
            return Err(RegistryError::duplicate(EntityKind::Patient, &edited.nric));
        }

        debug!(from = %target.nric, to = %edited.nric, "patient replaced");
        self.patients[index] = edited;
        Ok(())
    }

    /// Remove the patient with this NRIC, returning it.
    pub fn delete_by_nric(&mut self, nric: &Nric) -> RegistryResult<Patient> {
        let index = self
            .position_of(nric)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Patient, nric))?;
        debug!(%nric, "patient removed");
        Ok(self.patients.remove(index))
    }

    pub fn as_slice(&self) -> &[Patient] {
        &self.patients
    }

    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.patients.iter()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    fn position_of(&self, nric: &Nric) -> Option<usize> {
        self.patients.iter().position(|p| &p.nric == nric)
    }
}
