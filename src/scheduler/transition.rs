use super::model::{AppointmentDetail, AppointmentId, Category};

/// A write against one of the subtype tables.
#[derive(Debug, Clone, PartialEq)]
pub enum SubtypeAction {
    Delete {
        category: Category,
        id: AppointmentId,
    },
    Insert {
        id: AppointmentId,
        detail: AppointmentDetail,
    },
}

impl SubtypeAction {
    pub fn category(&self) -> Category {
        match self {
            SubtypeAction::Delete { category, .. } => *category,
            SubtypeAction::Insert { detail, .. } => detail.category(),
        }
    }
}

/// Subtype writes for an edit. The row stored under the previous category is
/// always removed before the new one goes in, so an id never ends up with two
/// subtype rows or none, whether or not the category changed.
pub fn plan_subtype_transition(
    previous: Category,
    id: AppointmentId,
    next: &AppointmentDetail,
) -> Vec<SubtypeAction> {
    vec![
        SubtypeAction::Delete {
            category: previous,
            id,
        },
        SubtypeAction::Insert {
            id,
            detail: next.clone(),
        },
    ]
}

pub fn plan_creation(id: AppointmentId, detail: &AppointmentDetail) -> Vec<SubtypeAction> {
    vec![SubtypeAction::Insert {
        id,
        detail: detail.clone(),
    }]
}

pub fn plan_removal(category: Category, id: AppointmentId) -> Vec<SubtypeAction> {
    vec![SubtypeAction::Delete { category, id }]
}
