use std::collections::HashMap;

use anyhow::{anyhow, Context};
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use super::AppointmentGateway;
use crate::{
    database::DbConn,
    models::appointments::{
        AppointmentData, NewAppointment, SalesData, ServiceData, UpdateAppointment,
    },
    scheduler::{
        Appointment, AppointmentDetail, AppointmentId, Category, SalesDetail, ServiceDetail,
    },
};

/// Appointment tables in MySQL, one pooled connection per gateway.
pub struct MysqlGateway {
    conn: DbConn,
}

impl MysqlGateway {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &DbConn {
        &self.conn
    }

    /// Appointments whose title contains `title_pattern` (a LIKE pattern),
    /// optionally restricted to those starting in `[from, to)`.
    pub fn search(
        &self,
        title_pattern: &str,
        range: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> anyhow::Result<Vec<Appointment>> {
        use crate::schema::appointments;

        let mut query = appointments::table
            .filter(appointments::title.like(title_pattern))
            .into_boxed();
        if let Some((from, to)) = range {
            query = query
                .filter(appointments::start_time.ge(from))
                .filter(appointments::start_time.lt(to));
        }
        let rows = query
            .order(appointments::start_time.asc())
            .load::<AppointmentData>(&self.conn)
            .context("DB error")?;

        self.assemble(rows)
    }

    pub fn by_contact(&self, contact_name: &str) -> anyhow::Result<Vec<Appointment>> {
        use crate::schema::{appointments, contacts};

        let rows = appointments::table
            .inner_join(contacts::table)
            .filter(contacts::contact_name.eq(contact_name))
            .select(appointments::all_columns)
            .order(appointments::start_time.asc())
            .load::<AppointmentData>(&self.conn)
            .context("DB error")?;

        self.assemble(rows)
    }

    pub fn starting_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> anyhow::Result<Vec<Appointment>> {
        use crate::schema::appointments;

        let rows = appointments::table
            .filter(appointments::start_time.ge(from))
            .filter(appointments::start_time.lt(to))
            .order(appointments::start_time.asc())
            .load::<AppointmentData>(&self.conn)
            .context("DB error")?;

        self.assemble(rows)
    }

    pub fn customer_has_appointments(&self, customer_id: u64) -> anyhow::Result<bool> {
        use crate::schema::appointments;

        let count = appointments::table
            .filter(appointments::customer_id.eq(customer_id))
            .count()
            .get_result::<i64>(&self.conn)
            .context("DB error")?;

        Ok(count > 0)
    }

    /// Pairs base rows with their subtype rows. The category column decides
    /// which subtype table a row must have an entry in.
    fn assemble(&self, rows: Vec<AppointmentData>) -> anyhow::Result<Vec<Appointment>> {
        use crate::schema::{sales_appointments, service_appointments};

        let ids: Vec<u64> = rows.iter().map(|row| row.appointment_id).collect();
        let mut sales: HashMap<u64, SalesData> = sales_appointments::table
            .filter(sales_appointments::appointment_id.eq_any(ids.clone()))
            .load::<SalesData>(&self.conn)
            .context("DB error")?
            .into_iter()
            .map(|row| (row.appointment_id, row))
            .collect();
        let mut services: HashMap<u64, ServiceData> = service_appointments::table
            .filter(service_appointments::appointment_id.eq_any(ids))
            .load::<ServiceData>(&self.conn)
            .context("DB error")?
            .into_iter()
            .map(|row| (row.appointment_id, row))
            .collect();

        rows.into_iter()
            .map(|row| -> anyhow::Result<Appointment> {
                let id = row.appointment_id;
                let category: Category = row.category.parse()?;
                let detail = match category {
                    Category::Sales => match sales.remove(&id) {
                        Some(data) => Some(AppointmentDetail::Sales(SalesDetail {
                            vehicle: data.vehicle,
                            financing: data.financing_option.parse()?,
                        })),
                        None => None,
                    },
                    Category::Service => services.remove(&id).map(|data| {
                        AppointmentDetail::Service(ServiceDetail {
                            cost: data.service_cost,
                            service_type: data.service_type,
                        })
                    }),
                }
                .ok_or_else(|| anyhow!("appointment {} has no {} row", id, category))?;

                Ok(row.into_appointment(detail))
            })
            .collect()
    }
}

impl AppointmentGateway for MysqlGateway {
    fn fetch_appointments_for_customer(&self, customer_id: u64) -> anyhow::Result<Vec<Appointment>> {
        use crate::schema::appointments;

        let rows = appointments::table
            .filter(appointments::customer_id.eq(customer_id))
            .order(appointments::start_time.asc())
            .load::<AppointmentData>(&self.conn)
            .context("DB error")?;

        self.assemble(rows)
    }

    fn fetch_appointment(&self, id: AppointmentId) -> anyhow::Result<Option<Appointment>> {
        use crate::schema::appointments;

        let row = appointments::table
            .find(id)
            .first::<AppointmentData>(&self.conn)
            .optional()
            .context("DB error")?;

        match row {
            Some(row) => Ok(self.assemble(vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn current_max_appointment_id(&self) -> anyhow::Result<AppointmentId> {
        use crate::schema::appointments;

        let max = appointments::table
            .select(diesel::dsl::max(appointments::appointment_id))
            .first::<Option<u64>>(&self.conn)
            .context("DB error")?;

        Ok(max.unwrap_or(0))
    }

    fn insert_base_appointment(&self, appointment: &Appointment, author: &str) -> anyhow::Result<()> {
        use crate::schema::appointments;

        let data = NewAppointment::new(appointment, author, Utc::now().naive_utc());
        diesel::insert_into(appointments::table)
            .values(&data)
            .execute(&self.conn)
            .context("DB error")?;

        Ok(())
    }

    fn update_base_appointment(
        &self,
        id: AppointmentId,
        appointment: &Appointment,
        author: &str,
    ) -> anyhow::Result<()> {
        use crate::schema::appointments;

        let data = UpdateAppointment::new(appointment, author, Utc::now().naive_utc());
        diesel::update(appointments::table.find(id))
            .set(&data)
            .execute(&self.conn)
            .context("DB error")?;

        Ok(())
    }

    fn delete_base_appointment(&self, id: AppointmentId) -> anyhow::Result<()> {
        use crate::schema::appointments;

        diesel::delete(appointments::table.find(id))
            .execute(&self.conn)
            .context("DB error")?;

        Ok(())
    }

    fn insert_subtype_row(&self, id: AppointmentId, detail: &AppointmentDetail) -> anyhow::Result<()> {
        use crate::schema::{sales_appointments, service_appointments};

        match detail {
            AppointmentDetail::Sales(sales) => {
                let data = SalesData {
                    appointment_id: id,
                    vehicle: sales.vehicle.clone(),
                    financing_option: sales.financing.as_str().to_string(),
                };
                diesel::insert_into(sales_appointments::table)
                    .values(&data)
                    .execute(&self.conn)
            }
            AppointmentDetail::Service(service) => {
                let data = ServiceData {
                    appointment_id: id,
                    service_cost: service.cost,
                    service_type: service.service_type.clone(),
                };
                diesel::insert_into(service_appointments::table)
                    .values(&data)
                    .execute(&self.conn)
            }
        }
        .context("DB error")?;

        Ok(())
    }

    fn delete_subtype_row(&self, category: Category, id: AppointmentId) -> anyhow::Result<()> {
        use crate::schema::{sales_appointments, service_appointments};

        match category {
            Category::Sales => {
                diesel::delete(sales_appointments::table.find(id)).execute(&self.conn)
            }
            Category::Service => {
                diesel::delete(service_appointments::table.find(id)).execute(&self.conn)
            }
        }
        .context("DB error")?;

        Ok(())
    }

    fn atomically<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce() -> anyhow::Result<T>,
    {
        self.conn.transaction(f)
    }
}
