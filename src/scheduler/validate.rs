use chrono::{Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use super::model::{Appointment, AppointmentId};
use crate::error::Rejection;

/// Zone the 08:00-22:00 service window is defined in, whatever the local zone is.
pub const BUSINESS_TZ: Tz = chrono_tz::America::New_York;

const OPEN_SECS: u32 = 8 * 3600;
const CLOSE_SECS: u32 = 22 * 3600;

/// The "now" scheduling rules are evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleClock {
    pub local_tz: Tz,
    pub today: NaiveDate,
}

impl ScheduleClock {
    pub fn now(local_tz: Tz) -> Self {
        let today = Utc::now().with_timezone(&local_tz).naive_local().date();
        Self { local_tz, today }
    }
}

/// Runs the scheduling rules in order and stops at the first one that fails.
///
/// `existing` is the customer's other appointments; an entry with the
/// candidate's own id is skipped so that an edit does not collide with the
/// version of itself that is already stored.
pub fn validate(
    candidate: &Appointment,
    existing: &[Appointment],
    is_new: bool,
    clock: &ScheduleClock,
) -> Result<(), Rejection> {
    if candidate.end < candidate.start {
        return Err(Rejection::InvalidTimeOrder);
    }
    if candidate.end == candidate.start {
        return Err(Rejection::ZeroDurationWindow);
    }

    // edits may keep or move to a past date
    if is_new && candidate.start.date() < clock.today {
        return Err(Rejection::PastDate);
    }

    if let Some(conflict) = existing
        .iter()
        .filter(|other| other.id != candidate.id && other.customer_id == candidate.customer_id)
        .find(|other| other.overlaps(candidate))
    {
        return Err(Rejection::ScheduleConflict {
            conflicting_id: conflict.id,
        });
    }

    if !within_business_hours(candidate.start, candidate.end, clock.local_tz) {
        return Err(Rejection::OutsideBusinessHours);
    }

    Ok(())
}

pub fn within_business_hours(start: NaiveDateTime, end: NaiveDateTime, local_tz: Tz) -> bool {
    let (start, end) = match (to_business_tz(start, local_tz), to_business_tz(end, local_tz)) {
        (Some(start), Some(end)) => (start, end),
        _ => return false,
    };

    start.time().num_seconds_from_midnight() >= OPEN_SECS
        && end.date() == start.date()
        && end.time().num_seconds_from_midnight() <= CLOSE_SECS
}

/// Converts a local wall-clock time to Eastern wall-clock time. Times inside a
/// DST gap are moved forward by the gap before conversion.
pub fn to_business_tz(local: NaiveDateTime, local_tz: Tz) -> Option<NaiveDateTime> {
    local_tz
        .from_local_datetime(&local)
        .earliest()
        .or_else(|| {
            local_tz
                .from_local_datetime(&(local + Duration::hours(1)))
                .earliest()
        })
        .map(|zoned| zoned.with_timezone(&BUSINESS_TZ).naive_local())
}

/// Provisional id for a new appointment. Two concurrent callers reading the
/// same maximum get the same id.
pub fn next_id(current_max: AppointmentId) -> AppointmentId {
    current_max + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::{appointment, at, clock, date};

    #[test]
    fn next_id_adds_one() {
        assert_eq!(next_id(5), 6);
        assert_eq!(next_id(0), 1);
    }

    #[test]
    fn inverted_and_empty_windows_fail_before_anything_else() {
        let clock = clock(BUSINESS_TZ, "2025-03-11");
        let existing = vec![appointment(1, 3, at("2025-03-10 05:00"), at("2025-03-10 23:00"))];

        // past date, conflicting and outside business hours as well
        let inverted = appointment(9, 3, at("2025-03-10 07:00"), at("2025-03-10 06:00"));
        assert_eq!(
            validate(&inverted, &existing, true, &clock),
            Err(Rejection::InvalidTimeOrder)
        );

        let empty = appointment(9, 3, at("2025-03-10 07:00"), at("2025-03-10 07:00"));
        assert_eq!(
            validate(&empty, &existing, true, &clock),
            Err(Rejection::ZeroDurationWindow)
        );
    }

    #[test]
    fn overlapping_appointment_is_reported_by_id() {
        let clock = clock(BUSINESS_TZ, "2025-03-01");
        let candidate = appointment(2, 3, at("2025-03-10 09:00"), at("2025-03-10 10:00"));
        let existing = vec![appointment(1, 3, at("2025-03-10 09:30"), at("2025-03-10 10:30"))];

        assert_eq!(
            validate(&candidate, &existing, true, &clock),
            Err(Rejection::ScheduleConflict { conflicting_id: 1 })
        );
        assert_eq!(validate(&candidate, &[], true, &clock), Ok(()));
    }

    #[test]
    fn first_conflict_in_order_wins() {
        let clock = clock(BUSINESS_TZ, "2025-03-01");
        let candidate = appointment(9, 3, at("2025-03-10 09:00"), at("2025-03-10 12:00"));
        let existing = vec![
            appointment(4, 3, at("2025-03-10 08:00"), at("2025-03-10 09:00")),
            appointment(5, 3, at("2025-03-10 11:00"), at("2025-03-10 11:30")),
            appointment(6, 3, at("2025-03-10 09:30"), at("2025-03-10 10:00")),
        ];
        assert_eq!(
            validate(&candidate, &existing, true, &clock),
            Err(Rejection::ScheduleConflict { conflicting_id: 5 })
        );
    }

    #[test]
    fn edits_do_not_collide_with_themselves() {
        let clock = clock(BUSINESS_TZ, "2025-03-01");
        let stored = appointment(7, 3, at("2025-03-10 09:00"), at("2025-03-10 10:00"));
        let moved = appointment(7, 3, at("2025-03-10 09:30"), at("2025-03-10 10:30"));
        assert_eq!(validate(&moved, &[stored], false, &clock), Ok(()));
    }

    #[test]
    fn other_customers_do_not_conflict() {
        let clock = clock(BUSINESS_TZ, "2025-03-01");
        let candidate = appointment(2, 3, at("2025-03-10 09:00"), at("2025-03-10 10:00"));
        let existing = vec![appointment(1, 4, at("2025-03-10 09:00"), at("2025-03-10 10:00"))];
        assert_eq!(validate(&candidate, &existing, true, &clock), Ok(()));
    }

    #[test]
    fn past_dates_are_only_refused_for_new_appointments() {
        let clock = clock(BUSINESS_TZ, "2025-03-11");
        let yesterday = appointment(2, 3, at("2025-03-10 09:00"), at("2025-03-10 10:00"));
        assert_eq!(
            validate(&yesterday, &[], true, &clock),
            Err(Rejection::PastDate)
        );
        assert_eq!(validate(&yesterday, &[], false, &clock), Ok(()));

        // same day is fine whatever the hour
        let today = appointment(2, 3, at("2025-03-11 08:00"), at("2025-03-11 08:30"));
        assert_eq!(validate(&today, &[], true, &clock), Ok(()));
    }

    #[test]
    fn business_hours_are_enforced_in_eastern_time() {
        let clock = clock(BUSINESS_TZ, "2025-03-01");
        let check = |start: &str, end: &str| {
            validate(&appointment(1, 3, at(start), at(end)), &[], true, &clock)
        };

        assert_eq!(
            check("2025-03-10 07:59", "2025-03-10 09:00"),
            Err(Rejection::OutsideBusinessHours)
        );
        assert_eq!(check("2025-03-10 08:00", "2025-03-10 22:00"), Ok(()));
        assert_eq!(
            check("2025-03-10 21:00", "2025-03-10 22:01"),
            Err(Rejection::OutsideBusinessHours)
        );
        assert_eq!(
            check("2025-03-10 23:00", "2025-03-11 00:30"),
            Err(Rejection::OutsideBusinessHours)
        );
        assert_eq!(
            check("2025-03-10 09:00", "2025-03-11 10:00"),
            Err(Rejection::OutsideBusinessHours)
        );
    }

    #[test]
    fn local_times_are_converted_before_the_hours_check() {
        let pacific = clock(chrono_tz::America::Los_Angeles, "2025-03-01");
        let early = appointment(1, 3, at("2025-03-10 05:00"), at("2025-03-10 06:00"));
        assert_eq!(validate(&early, &[], true, &pacific), Ok(()));
        let too_early = appointment(1, 3, at("2025-03-10 04:30"), at("2025-03-10 06:00"));
        assert_eq!(
            validate(&too_early, &[], true, &pacific),
            Err(Rejection::OutsideBusinessHours)
        );

        let utc = clock(chrono_tz::UTC, "2025-03-01");
        let noon = appointment(1, 3, at("2025-03-10 12:00"), at("2025-03-10 13:00"));
        assert_eq!(validate(&noon, &[], true, &utc), Ok(()));
        let late = appointment(1, 3, at("2025-03-11 01:00"), at("2025-03-11 02:30"));
        assert_eq!(
            validate(&late, &[], true, &utc),
            Err(Rejection::OutsideBusinessHours)
        );
    }

    #[test]
    fn gap_times_move_forward() {
        assert_eq!(
            to_business_tz(at("2025-03-09 02:30"), BUSINESS_TZ),
            Some(at("2025-03-09 03:30"))
        );
        assert_eq!(
            to_business_tz(at("2025-07-01 12:00"), chrono_tz::UTC),
            Some(at("2025-07-01 08:00"))
        );
    }

    #[test]
    fn clock_reports_a_local_date() {
        let clock = ScheduleClock::now(BUSINESS_TZ);
        assert!(clock.today > date("2020-01-01"));
    }
}
