#[cfg(test)]
pub mod memory;
pub mod mysql;

use crate::scheduler::{Appointment, AppointmentDetail, AppointmentId, Category, SubtypeAction};

/// Blocking access to the appointment tables: the base table plus one
/// subtype table per category, all keyed by appointment id.
pub trait AppointmentGateway {
    /// All appointments of a customer, ordered by start time.
    fn fetch_appointments_for_customer(&self, customer_id: u64) -> anyhow::Result<Vec<Appointment>>;

    fn fetch_appointment(&self, id: AppointmentId) -> anyhow::Result<Option<Appointment>>;

    /// Highest stored id, 0 when there are no appointments.
    fn current_max_appointment_id(&self) -> anyhow::Result<AppointmentId>;

    fn insert_base_appointment(&self, appointment: &Appointment, author: &str) -> anyhow::Result<()>;

    fn update_base_appointment(
        &self,
        id: AppointmentId,
        appointment: &Appointment,
        author: &str,
    ) -> anyhow::Result<()>;

    fn delete_base_appointment(&self, id: AppointmentId) -> anyhow::Result<()>;

    fn insert_subtype_row(&self, id: AppointmentId, detail: &AppointmentDetail) -> anyhow::Result<()>;

    fn delete_subtype_row(&self, category: Category, id: AppointmentId) -> anyhow::Result<()>;

    /// Runs `f` as one unit of work: either every write in it lands or none does.
    fn atomically<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce() -> anyhow::Result<T>;

    fn apply(&self, actions: &[SubtypeAction]) -> anyhow::Result<()> {
        for action in actions {
            tracing::debug!(category = %action.category(), "subtype write");
            match action {
                SubtypeAction::Delete { category, id } => self.delete_subtype_row(*category, *id)?,
                SubtypeAction::Insert { id, detail } => self.insert_subtype_row(*id, detail)?,
            }
        }
        Ok(())
    }
}
