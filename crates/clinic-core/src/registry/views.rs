//! Derived appointment view: every appointment joined with its patient's name.

use std::collections::HashMap;

use tracing::warn;

use super::{AppointmentRegistry, PatientRegistry};
use crate::models::{AppointmentView, Name, Nric};

/// Materialized join of appointments with patient names.
///
/// # Invariants
/// - One entry per appointment, in appointment registry order.
/// - Only rebuilt through [`AppointmentViews::recompute`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentViews {
    views: Vec<AppointmentView>,
}

impl AppointmentViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from scratch.
    pub fn recompute(&mut self, patients: &PatientRegistry, appointments: &AppointmentRegistry) {
        let names: HashMap<&Nric, &Name> = patients.iter().map(|p| (&p.nric, &p.name)).collect();

        self.views = appointments
            .iter()
            .filter_map(|appt| match names.get(&appt.nric) {
                Some(name) => Some(AppointmentView::new((*name).clone(), appt.clone())),
                None => {
                    warn!(nric = %appt.nric, "appointment has no owning patient; left out of view");
                    None
                }
            })
            .collect();
    }

    pub fn as_slice(&self) -> &[AppointmentView] {
        &self.views
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppointmentView> {
        self.views.iter()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
