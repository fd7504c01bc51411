use crate::{
    scheduler::{Appointment, AppointmentDetail},
    schema::{appointments, sales_appointments, service_appointments},
};
use chrono::NaiveDateTime;

#[derive(Queryable)]
pub struct AppointmentData {
    pub appointment_id: u64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub create_date: NaiveDateTime,
    pub created_by: String,
    pub last_update: NaiveDateTime,
    pub last_updated_by: String,
    pub customer_id: u64,
    pub user_id: u64,
    pub contact_id: u64,
}

impl AppointmentData {
    pub fn into_appointment(self, detail: AppointmentDetail) -> Appointment {
        Appointment {
            id: self.appointment_id,
            title: self.title,
            description: self.description,
            location: self.location,
            start: self.start_time,
            end: self.end_time,
            customer_id: self.customer_id,
            user_id: self.user_id,
            contact_id: self.contact_id,
            detail,
        }
    }
}

#[derive(Insertable)]
#[table_name = "appointments"]
pub struct NewAppointment<'a> {
    pub appointment_id: u64,
    pub title: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub category: &'a str,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub create_date: NaiveDateTime,
    pub created_by: &'a str,
    pub last_update: NaiveDateTime,
    pub last_updated_by: &'a str,
    pub customer_id: u64,
    pub user_id: u64,
    pub contact_id: u64,
}

impl<'a> NewAppointment<'a> {
    pub fn new(appointment: &'a Appointment, author: &'a str, now: NaiveDateTime) -> Self {
        Self {
            appointment_id: appointment.id,
            title: &appointment.title,
            description: &appointment.description,
            location: &appointment.location,
            category: appointment.category().as_str(),
            start_time: appointment.start,
            end_time: appointment.end,
            create_date: now,
            created_by: author,
            last_update: now,
            last_updated_by: author,
            customer_id: appointment.customer_id,
            user_id: appointment.user_id,
            contact_id: appointment.contact_id,
        }
    }
}

#[derive(AsChangeset)]
#[table_name = "appointments"]
pub struct UpdateAppointment<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub category: &'a str,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub last_update: NaiveDateTime,
    pub last_updated_by: &'a str,
    pub customer_id: u64,
    pub user_id: u64,
    pub contact_id: u64,
}

impl<'a> UpdateAppointment<'a> {
    pub fn new(appointment: &'a Appointment, author: &'a str, now: NaiveDateTime) -> Self {
        Self {
            title: &appointment.title,
            description: &appointment.description,
            location: &appointment.location,
            category: appointment.category().as_str(),
            start_time: appointment.start,
            end_time: appointment.end,
            last_update: now,
            last_updated_by: author,
            customer_id: appointment.customer_id,
            user_id: appointment.user_id,
            contact_id: appointment.contact_id,
        }
    }
}

#[derive(Queryable, Insertable)]
#[table_name = "sales_appointments"]
pub struct SalesData {
    pub appointment_id: u64,
    pub vehicle: String,
    pub financing_option: String,
}

#[derive(Queryable, Insertable)]
#[table_name = "service_appointments"]
pub struct ServiceData {
    pub appointment_id: u64,
    pub service_cost: f64,
    pub service_type: String,
}
