use thiserror::Error;

use crate::scheduler::AppointmentId;

/// Why a candidate appointment was refused. Every variant is correctable by
/// the person filling in the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("End time cannot be before start time")]
    InvalidTimeOrder,

    #[error("An appointment cannot share start and end times")]
    ZeroDurationWindow,

    #[error("Appointments cannot be scheduled for dates before the current date")]
    PastDate,

    #[error("This appointment overlaps with existing appointment {conflicting_id} of this customer")]
    ScheduleConflict { conflicting_id: AppointmentId },

    #[error("Appointments can only be scheduled between 8AM and 10PM EST")]
    OutsideBusinessHours,
}

impl Rejection {
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::InvalidTimeOrder => "InvalidTimeOrder",
            Rejection::ZeroDurationWindow => "ZeroDurationWindow",
            Rejection::PastDate => "PastDate",
            Rejection::ScheduleConflict { .. } => "ScheduleConflict",
            Rejection::OutsideBusinessHours => "OutsideBusinessHours",
        }
    }

    pub fn conflicting_id(&self) -> Option<AppointmentId> {
        match self {
            Rejection::ScheduleConflict { conflicting_id } => Some(*conflicting_id),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("No appointment with ID {0}")]
    NotFound(AppointmentId),

    #[error("Persistence failure: {0:#}")]
    Persistence(#[from] anyhow::Error),
}

impl ScheduleError {
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ScheduleError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_codes_are_stable() {
        assert_eq!(Rejection::InvalidTimeOrder.code(), "InvalidTimeOrder");
        assert_eq!(Rejection::PastDate.code(), "PastDate");
        let conflict = Rejection::ScheduleConflict { conflicting_id: 4 };
        assert_eq!(conflict.code(), "ScheduleConflict");
        assert_eq!(conflict.conflicting_id(), Some(4));
        assert_eq!(Rejection::OutsideBusinessHours.conflicting_id(), None);
    }

    #[test]
    fn persistence_errors_keep_their_context() {
        let err: ScheduleError = anyhow::anyhow!("connection refused").into();
        assert!(err.rejection().is_none());
        assert_eq!(err.to_string(), "Persistence failure: connection refused");

        let err: ScheduleError = Rejection::PastDate.into();
        assert_eq!(err.rejection(), Some(&Rejection::PastDate));
        assert_eq!(err.to_string(), Rejection::PastDate.to_string());
    }
}
