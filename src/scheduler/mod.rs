//! Appointment scheduling rules: the appointment model, the validator that
//! accepts or rejects a candidate, and the subtype-table bookkeeping done when
//! an appointment is created, edited or removed.

mod model;
mod service;
mod transition;
mod validate;

#[cfg(test)]
pub mod testing;

pub use self::{
    model::{
        Appointment, AppointmentDetail, AppointmentId, Category, FinancingOption, SalesDetail,
        ServiceDetail, SERVICE_TYPES,
    },
    service::Scheduler,
    transition::SubtypeAction,
    validate::ScheduleClock,
};
