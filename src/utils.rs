#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    config: web::Data<Config>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](pool, config, info).await {
                        Ok(response) => response,
                        Err(err) => {
                            tracing::warn!(endpoint = $url, "{:#}", err);
                            $response::err(err)
                        }
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

use actix_web::{error::BlockingError, web};
use anyhow::{anyhow, Context};
use blake2::{Blake2b, Digest};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ScheduleError, ScheduleResult};

const DATE_FMT: &str = "%Y-%m-%d";
const SLOT_FMT: &str = "%H:%M";

/// Runs scheduling work on the blocking pool without flattening its error.
pub async fn run_blocking<F, T>(f: F) -> ScheduleResult<T>
where
    F: FnOnce() -> ScheduleResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(f).await.map_err(|err| match err {
        BlockingError::Error(err) => err,
        BlockingError::Canceled => ScheduleError::Persistence(anyhow!("Thread pool is gone")),
    })
}

pub fn parse_date<S: AsRef<str>>(s: S) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.as_ref(), DATE_FMT).context("Invalid date format")
}

/// Combines a `YYYY-MM-DD` date with an `HH:MM` time picked from the form.
pub fn parse_date_time<S1: AsRef<str>, S2: AsRef<str>>(
    date: S1,
    time: S2,
) -> anyhow::Result<NaiveDateTime> {
    let date = parse_date(date)?;
    let time = NaiveTime::parse_from_str(time.as_ref(), SLOT_FMT).context("Invalid time format")?;
    Ok(date.and_time(time))
}

pub fn format_time_str(time: &NaiveDateTime) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

pub fn get_str_pattern<S: AsRef<str>>(s: S) -> String {
    format!("%{}%", s.as_ref())
}

pub fn get_str_pattern_opt<S: AsRef<str>>(s: Option<S>) -> String {
    match s {
        Some(s) => get_str_pattern(s),
        None => "%".to_string(),
    }
}

/// The calendar month containing `today`, as `[first day, first day of next month)`.
pub fn month_range(today: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let first = NaiveDate::from_ymd(today.year(), today.month(), 1);
    let next = if today.month() == 12 {
        NaiveDate::from_ymd(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd(today.year(), today.month() + 1, 1)
    };
    (first.and_hms(0, 0, 0), next.and_hms(0, 0, 0))
}

/// From `today` up to, not including, the next Sunday. On a Sunday this
/// covers the following seven days rather than only that Sunday.
pub fn week_range(today: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let days = match today.weekday().num_days_from_sunday() {
        0 => 7,
        n => 7 - n,
    };
    let sunday = today + Duration::days(i64::from(days));
    (today.and_hms(0, 0, 0), sunday.and_hms(0, 0, 0))
}

/// Start times offered by the appointment forms: 00:00 to 23:30 in 30 minute steps.
pub fn half_hour_slots() -> Vec<String> {
    (0..48)
        .map(|i| format!("{:02}:{:02}", i / 2, (i % 2) * 30))
        .collect()
}

pub fn hash_password<S: AsRef<str>>(password: S) -> String {
    format!("{:x}", Blake2b::digest(password.as_ref().as_bytes()))
}

pub fn generate_login_token(user_name: &str, now: NaiveDateTime) -> String {
    let seed = format!(
        "{}@{}.{}",
        user_name,
        now.timestamp(),
        now.timestamp_subsec_nanos()
    );
    format!("{:x}", Blake2b::digest(seed.as_bytes()))
}
