use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use super::{Appointment, AppointmentDetail, AppointmentId, FinancingOption, SalesDetail, ScheduleClock};

pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn clock(local_tz: Tz, today: &str) -> ScheduleClock {
    ScheduleClock {
        local_tz,
        today: date(today),
    }
}

/// A sales appointment for `customer_id` over `[start, end)`.
pub fn appointment(
    id: AppointmentId,
    customer_id: u64,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Appointment {
    Appointment {
        id,
        title: "Test drive".to_string(),
        description: "Drive the new model".to_string(),
        location: "Showroom".to_string(),
        start,
        end,
        customer_id,
        user_id: 1,
        contact_id: 2,
        detail: AppointmentDetail::Sales(SalesDetail {
            vehicle: "Civic".to_string(),
            financing: FinancingOption::Cash,
        }),
    }
}
