use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;

use crate::error::ScheduleError;

pub type AppointmentId = u64;

pub const CATEGORY_SALES: &str = "Sales Appointment";
pub const CATEGORY_SERVICE: &str = "Service Appointment";

/// Service types offered by the edit form. Other values are kept as free text.
pub const SERVICE_TYPES: [&str; 3] = ["Oil Change", "Tire Rotation", "Alignment"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Sales,
    Service,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sales => CATEGORY_SALES,
            Category::Service => CATEGORY_SERVICE,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CATEGORY_SALES | "Sales" => Ok(Category::Sales),
            CATEGORY_SERVICE | "Service" => Ok(Category::Service),
            _ => Err(ScheduleError::InvalidField(format!("unknown category '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinancingOption {
    Cash,
    Lease,
    Loan,
}

impl FinancingOption {
    pub const ALL: [FinancingOption; 3] = [
        FinancingOption::Cash,
        FinancingOption::Lease,
        FinancingOption::Loan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FinancingOption::Cash => "Cash",
            FinancingOption::Lease => "Lease",
            FinancingOption::Loan => "Loan",
        }
    }
}

impl FromStr for FinancingOption {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cash" => Ok(FinancingOption::Cash),
            "Lease" => Ok(FinancingOption::Lease),
            "Loan" => Ok(FinancingOption::Loan),
            _ => Err(ScheduleError::InvalidField(format!(
                "unknown financing option '{}'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesDetail {
    pub vehicle: String,
    pub financing: FinancingOption,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDetail {
    pub cost: f64,
    pub service_type: String,
}

/// Category-specific part of an appointment, stored in the subtype table of
/// its category.
#[derive(Debug, Clone, PartialEq)]
pub enum AppointmentDetail {
    Sales(SalesDetail),
    Service(ServiceDetail),
}

impl AppointmentDetail {
    pub fn category(&self) -> Category {
        match self {
            AppointmentDetail::Sales(_) => Category::Sales,
            AppointmentDetail::Service(_) => Category::Service,
        }
    }

    pub fn check(&self) -> Result<(), ScheduleError> {
        match self {
            AppointmentDetail::Sales(sales) => {
                if sales.vehicle.trim().is_empty() {
                    return Err(ScheduleError::InvalidField("vehicle is empty".to_string()));
                }
            }
            AppointmentDetail::Service(service) => {
                if !service.cost.is_finite() || service.cost < 0.0 {
                    return Err(ScheduleError::InvalidField(
                        "Please input a valid price".to_string(),
                    ));
                }
                if service.service_type.trim().is_empty() {
                    return Err(ScheduleError::InvalidField(
                        "service type is empty".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub customer_id: u64,
    pub user_id: u64,
    pub contact_id: u64,
    pub detail: AppointmentDetail,
}

impl Appointment {
    pub fn category(&self) -> Category {
        self.detail.category()
    }

    /// Half-open interval intersection of `[start, end)`.
    pub fn overlaps(&self, other: &Appointment) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Required-field check done before the scheduling rules run.
    pub fn check_fields(&self) -> Result<(), ScheduleError> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
        ];
        for (name, value) in required.iter() {
            if value.trim().is_empty() {
                return Err(ScheduleError::InvalidField(format!("{} is empty", name)));
            }
        }
        self.detail.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::{appointment, at};

    #[test]
    fn category_parses_stored_and_short_names() {
        assert_eq!("Sales Appointment".parse::<Category>().unwrap(), Category::Sales);
        assert_eq!("Service".parse::<Category>().unwrap(), Category::Service);
        assert!("Repair".parse::<Category>().is_err());
        assert_eq!(Category::Service.to_string(), CATEGORY_SERVICE);
    }

    #[test]
    fn financing_options_are_closed() {
        assert_eq!("Lease".parse::<FinancingOption>().unwrap(), FinancingOption::Lease);
        assert!("Barter".parse::<FinancingOption>().is_err());
    }

    #[test]
    fn overlap_is_half_open() {
        let a = appointment(1, 3, at("2025-03-10 09:00"), at("2025-03-10 10:00"));
        let touching = appointment(2, 3, at("2025-03-10 10:00"), at("2025-03-10 11:00"));
        let inside = appointment(3, 3, at("2025-03-10 09:15"), at("2025-03-10 09:45"));
        assert!(!a.overlaps(&touching));
        assert!(!touching.overlaps(&a));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn field_check_rejects_blank_text_and_bad_detail() {
        let mut candidate = appointment(1, 3, at("2025-03-10 09:00"), at("2025-03-10 10:00"));
        assert!(candidate.check_fields().is_ok());

        candidate.location = "  ".to_string();
        assert!(matches!(
            candidate.check_fields(),
            Err(ScheduleError::InvalidField(msg)) if msg == "location is empty"
        ));

        candidate.location = "Showroom".to_string();
        candidate.detail = AppointmentDetail::Service(ServiceDetail {
            cost: -5.0,
            service_type: SERVICE_TYPES[0].to_string(),
        });
        assert!(candidate.check_fields().is_err());
    }
}
