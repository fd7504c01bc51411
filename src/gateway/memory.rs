use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

use anyhow::{anyhow, bail};

use super::AppointmentGateway;
use crate::scheduler::{
    Appointment, AppointmentDetail, AppointmentId, Category, SalesDetail, ServiceDetail,
};

#[derive(Default, Clone)]
struct Tables {
    base: BTreeMap<AppointmentId, Appointment>,
    sales: BTreeMap<AppointmentId, SalesDetail>,
    service: BTreeMap<AppointmentId, ServiceDetail>,
}

/// Gateway over in-process tables, with the same row semantics as the MySQL
/// one. Used by the scheduling tests.
#[derive(Default)]
pub struct MemoryGateway {
    tables: RefCell<Tables>,
    operations: RefCell<Vec<String>>,
    fail_on: Cell<Option<&'static str>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an appointment directly, bypassing validation.
    pub fn seed(&self, appointment: Appointment) {
        let mut tables = self.tables.borrow_mut();
        match &appointment.detail {
            AppointmentDetail::Sales(sales) => {
                tables.sales.insert(appointment.id, sales.clone());
            }
            AppointmentDetail::Service(service) => {
                tables.service.insert(appointment.id, service.clone());
            }
        }
        tables.base.insert(appointment.id, appointment);
    }

    /// Makes the named gateway operation fail from now on.
    pub fn fail_on(&self, operation: &'static str) {
        self.fail_on.set(Some(operation));
    }

    pub fn operations(&self) -> Vec<String> {
        self.operations.borrow().clone()
    }

    pub fn clear_operations(&self) {
        self.operations.borrow_mut().clear();
    }

    pub fn base_ids(&self) -> Vec<AppointmentId> {
        self.tables.borrow().base.keys().copied().collect()
    }

    /// Categories whose subtype table holds a row for `id`.
    pub fn subtype_rows(&self, id: AppointmentId) -> Vec<Category> {
        let tables = self.tables.borrow();
        let mut rows = Vec::new();
        if tables.sales.contains_key(&id) {
            rows.push(Category::Sales);
        }
        if tables.service.contains_key(&id) {
            rows.push(Category::Service);
        }
        rows
    }

    fn record(&self, operation: &'static str, detail: String) -> anyhow::Result<()> {
        if self.fail_on.get() == Some(operation) {
            bail!("{} failed: connection lost", operation);
        }
        self.operations
            .borrow_mut()
            .push(format!("{}({})", operation, detail));
        Ok(())
    }

    fn assemble(tables: &Tables, base: &Appointment) -> anyhow::Result<Appointment> {
        let detail = match base.category() {
            Category::Sales => tables.sales.get(&base.id).cloned().map(AppointmentDetail::Sales),
            Category::Service => tables
                .service
                .get(&base.id)
                .cloned()
                .map(AppointmentDetail::Service),
        }
        .ok_or_else(|| anyhow!("appointment {} has no {} row", base.id, base.category()))?;

        Ok(Appointment {
            detail,
            ..base.clone()
        })
    }
}

impl AppointmentGateway for MemoryGateway {
    fn fetch_appointments_for_customer(&self, customer_id: u64) -> anyhow::Result<Vec<Appointment>> {
        self.record("fetch_appointments_for_customer", customer_id.to_string())?;
        let tables = self.tables.borrow();
        let mut appointments = tables
            .base
            .values()
            .filter(|appointment| appointment.customer_id == customer_id)
            .map(|appointment| Self::assemble(&tables, appointment))
            .collect::<anyhow::Result<Vec<_>>>()?;
        appointments.sort_by_key(|appointment| appointment.start);
        Ok(appointments)
    }

    fn fetch_appointment(&self, id: AppointmentId) -> anyhow::Result<Option<Appointment>> {
        self.record("fetch_appointment", id.to_string())?;
        let tables = self.tables.borrow();
        tables
            .base
            .get(&id)
            .map(|appointment| Self::assemble(&tables, appointment))
            .transpose()
    }

    fn current_max_appointment_id(&self) -> anyhow::Result<AppointmentId> {
        self.record("current_max_appointment_id", String::new())?;
        Ok(self.tables.borrow().base.keys().last().copied().unwrap_or(0))
    }

    fn insert_base_appointment(&self, appointment: &Appointment, _author: &str) -> anyhow::Result<()> {
        self.record("insert_base_appointment", appointment.id.to_string())?;
        let mut tables = self.tables.borrow_mut();
        if tables.base.contains_key(&appointment.id) {
            bail!("duplicate appointment id {}", appointment.id);
        }
        tables.base.insert(appointment.id, appointment.clone());
        Ok(())
    }

    fn update_base_appointment(
        &self,
        id: AppointmentId,
        appointment: &Appointment,
        _author: &str,
    ) -> anyhow::Result<()> {
        self.record("update_base_appointment", id.to_string())?;
        let mut tables = self.tables.borrow_mut();
        if let Some(stored) = tables.base.get_mut(&id) {
            *stored = Appointment {
                id,
                ..appointment.clone()
            };
        }
        Ok(())
    }

    fn delete_base_appointment(&self, id: AppointmentId) -> anyhow::Result<()> {
        self.record("delete_base_appointment", id.to_string())?;
        self.tables.borrow_mut().base.remove(&id);
        Ok(())
    }

    fn insert_subtype_row(&self, id: AppointmentId, detail: &AppointmentDetail) -> anyhow::Result<()> {
        self.record(
            "insert_subtype_row",
            format!("{:?}, {}", detail.category(), id),
        )?;
        let mut tables = self.tables.borrow_mut();
        let duplicate = match detail.category() {
            Category::Sales => tables.sales.contains_key(&id),
            Category::Service => tables.service.contains_key(&id),
        };
        if duplicate {
            bail!("duplicate {} row for appointment {}", detail.category(), id);
        }
        match detail {
            AppointmentDetail::Sales(sales) => {
                tables.sales.insert(id, sales.clone());
            }
            AppointmentDetail::Service(service) => {
                tables.service.insert(id, service.clone());
            }
        }
        Ok(())
    }

    fn delete_subtype_row(&self, category: Category, id: AppointmentId) -> anyhow::Result<()> {
        self.record("delete_subtype_row", format!("{:?}, {}", category, id))?;
        let mut tables = self.tables.borrow_mut();
        match category {
            Category::Sales => {
                tables.sales.remove(&id);
            }
            Category::Service => {
                tables.service.remove(&id);
            }
        }
        Ok(())
    }

    fn atomically<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce() -> anyhow::Result<T>,
    {
        let snapshot = self.tables.borrow().clone();
        let result = f();
        if result.is_err() {
            *self.tables.borrow_mut() = snapshot;
        }
        result
    }
}
