use anyhow::{bail, Context};

use super::requests::AppointmentForm;
use crate::scheduler::{
    Appointment, AppointmentDetail, AppointmentId, Category, SalesDetail, ServiceDetail,
};

/// Ids the form's display names resolved to.
pub struct ResolvedNames {
    pub customer_id: u64,
    pub user_id: u64,
    pub contact_id: u64,
}

pub fn build_detail(form: &AppointmentForm) -> anyhow::Result<AppointmentDetail> {
    let category: Category = form.category.parse()?;
    let detail = match category {
        Category::Sales => {
            let vehicle = match form.vehicle.as_deref() {
                Some(vehicle) if !vehicle.trim().is_empty() => vehicle.to_string(),
                _ => bail!("Please input a vehicle"),
            };
            let financing = form
                .financing_option
                .as_deref()
                .context("Please select a financing option")?
                .parse()?;
            AppointmentDetail::Sales(SalesDetail { vehicle, financing })
        }
        Category::Service => {
            let cost = form.service_cost.context("Please input a valid price")?;
            let service_type = match form.service_type.as_deref() {
                Some(service_type) if !service_type.trim().is_empty() => service_type.to_string(),
                _ => bail!("Please select a service type"),
            };
            AppointmentDetail::Service(ServiceDetail { cost, service_type })
        }
    };
    Ok(detail)
}

pub fn draft_from_form(
    id: AppointmentId,
    form: &AppointmentForm,
    names: &ResolvedNames,
) -> anyhow::Result<Appointment> {
    let start = crate::utils::parse_date_time(&form.date, &form.start_time)?;
    let end = crate::utils::parse_date_time(&form.date, &form.end_time)?;

    Ok(Appointment {
        id,
        title: form.title.clone(),
        description: form.description.clone(),
        location: form.location.clone(),
        start,
        end,
        customer_id: names.customer_id,
        user_id: names.user_id,
        contact_id: names.contact_id,
        detail: build_detail(form)?,
    })
}
