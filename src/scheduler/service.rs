use super::{
    model::{Appointment, AppointmentId},
    transition::{plan_creation, plan_removal, plan_subtype_transition},
    validate::{next_id, validate, ScheduleClock},
};
use crate::{
    error::{ScheduleError, ScheduleResult},
    gateway::AppointmentGateway,
};

/// Validates appointments against a customer's bookings and writes accepted
/// ones through the gateway.
///
/// Nothing serializes two calls for the same customer: both can pass the
/// overlap check before either one writes.
pub struct Scheduler<'g, G> {
    gateway: &'g G,
    clock: ScheduleClock,
}

impl<'g, G: AppointmentGateway> Scheduler<'g, G> {
    pub fn new(gateway: &'g G, clock: ScheduleClock) -> Self {
        Self { gateway, clock }
    }

    /// Checks a candidate against the stored appointments of its customer.
    /// Never writes.
    pub fn validate(&self, candidate: Appointment, is_new: bool) -> ScheduleResult<Appointment> {
        candidate.check_fields()?;

        let existing = self
            .gateway
            .fetch_appointments_for_customer(candidate.customer_id)?;
        if let Err(rejection) = validate(&candidate, &existing, is_new, &self.clock) {
            tracing::warn!(
                id = candidate.id,
                customer_id = candidate.customer_id,
                reason = rejection.code(),
                "appointment rejected"
            );
            return Err(rejection.into());
        }

        Ok(candidate)
    }

    /// Gives `draft` the next free id, validates it as a new appointment and
    /// stores the base row together with its subtype row.
    pub fn create(&self, mut draft: Appointment, author: &str) -> ScheduleResult<Appointment> {
        draft.id = next_id(self.gateway.current_max_appointment_id()?);
        let accepted = self.validate(draft, true)?;

        self.gateway.atomically(|| {
            self.gateway.insert_base_appointment(&accepted, author)?;
            self.gateway
                .apply(&plan_creation(accepted.id, &accepted.detail))
        })?;

        tracing::info!(
            id = accepted.id,
            customer_id = accepted.customer_id,
            category = accepted.category().as_str(),
            "appointment created"
        );
        Ok(accepted)
    }

    /// Re-validates an existing appointment (past dates allowed) and swaps its
    /// subtype row for one matching the new category.
    pub fn edit(&self, candidate: Appointment, author: &str) -> ScheduleResult<Appointment> {
        let previous = self
            .gateway
            .fetch_appointment(candidate.id)?
            .ok_or(ScheduleError::NotFound(candidate.id))?;
        let accepted = self.validate(candidate, false)?;

        let plan = plan_subtype_transition(previous.category(), accepted.id, &accepted.detail);
        self.gateway.atomically(|| {
            self.gateway
                .update_base_appointment(accepted.id, &accepted, author)?;
            self.gateway.apply(&plan)
        })?;

        tracing::info!(
            id = accepted.id,
            from = previous.category().as_str(),
            to = accepted.category().as_str(),
            "appointment updated"
        );
        Ok(accepted)
    }

    /// Removes the subtype row and the base row. Returns what was deleted.
    pub fn delete(&self, id: AppointmentId) -> ScheduleResult<Appointment> {
        let stored = self
            .gateway
            .fetch_appointment(id)?
            .ok_or(ScheduleError::NotFound(id))?;

        self.gateway.atomically(|| {
            self.gateway.apply(&plan_removal(stored.category(), id))?;
            self.gateway.delete_base_appointment(id)
        })?;

        tracing::info!(id, category = stored.category().as_str(), "appointment deleted");
        Ok(stored)
    }
}
