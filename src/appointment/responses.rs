use serde::Serialize;

use crate::{
    error::Rejection,
    scheduler::{Appointment, AppointmentDetail},
    utils::format_time_str,
};

#[derive(Default, Serialize)]
pub struct AppointmentItem {
    pub appointment_id: u64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub start: String,
    pub end: String,
    pub customer_id: u64,
    pub user_id: u64,
    pub contact_id: u64,
    pub vehicle: Option<String>,
    pub financing_option: Option<String>,
    pub service_cost: Option<f64>,
    pub service_type: Option<String>,
}

impl From<&Appointment> for AppointmentItem {
    fn from(appointment: &Appointment) -> Self {
        let mut item = AppointmentItem {
            appointment_id: appointment.id,
            title: appointment.title.clone(),
            description: appointment.description.clone(),
            location: appointment.location.clone(),
            category: appointment.category().to_string(),
            start: format_time_str(&appointment.start),
            end: format_time_str(&appointment.end),
            customer_id: appointment.customer_id,
            user_id: appointment.user_id,
            contact_id: appointment.contact_id,
            ..Default::default()
        };
        match &appointment.detail {
            AppointmentDetail::Sales(sales) => {
                item.vehicle = Some(sales.vehicle.clone());
                item.financing_option = Some(sales.financing.as_str().to_string());
            }
            AppointmentDetail::Service(service) => {
                item.service_cost = Some(service.cost);
                item.service_type = Some(service.service_type.clone());
            }
        }
        item
    }
}

/// Reply to add and edit. A refused candidate carries the rejection code in
/// `reason` and, for overlaps, the id it collided with.
#[derive(Default, Serialize)]
pub struct AppointResponse {
    pub success: bool,
    pub err: String,
    pub reason: String,
    pub conflicting_id: Option<u64>,
    pub appointment_id: u64,
}

impl AppointResponse {
    pub fn ok(appointment_id: u64) -> Self {
        Self {
            success: true,
            appointment_id,
            ..Default::default()
        }
    }

    pub fn rejected(rejection: &Rejection) -> Self {
        Self {
            success: false,
            err: rejection.to_string(),
            reason: rejection.code().to_string(),
            conflicting_id: rejection.conflicting_id(),
            ..Default::default()
        }
    }
}

#[derive(Default, Serialize)]
pub struct DeleteAppointResponse {
    pub success: bool,
    pub err: String,
    pub appointment_id: u64,
    pub category: String,
}

#[derive(Default, Serialize)]
pub struct SearchAppointResponse {
    pub success: bool,
    pub err: String,
    pub appointments: Vec<AppointmentItem>,
}

#[derive(Default, Serialize)]
pub struct OptionsResponse {
    pub success: bool,
    pub err: String,
    pub categories: Vec<String>,
    pub financing_options: Vec<String>,
    pub service_types: Vec<String>,
}

crate::impl_err_response! {
    AppointResponse,
    DeleteAppointResponse,
    SearchAppointResponse,
    OptionsResponse,
}
