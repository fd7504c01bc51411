mod requests;
mod responses;
mod session;
pub mod utils;

use crate::{
    appointment::AppointmentItem,
    config::Config,
    database::get_db_conn,
    gateway::mysql::MysqlGateway,
    models::{
        contacts::ContactData, login_activity::NewLoginAttempt, user_logins::UserLoginData,
    },
    protocol::{NamesResponse, SimpleResponse},
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{self, Context};
use chrono::{Duration, Utc};
use diesel::prelude::*;

use self::{
    requests::*,
    responses::*,
    session::{LoginContext, LoginOutcome},
    utils::get_user_from_token,
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(login)
        .service(logout)
        .service(list_users)
        .service(list_contacts);
}

crate::post_funcs! {
    (login, "/login", LoginRequest, LoginResponse),
    (logout, "/logout", LogoutRequest, SimpleResponse),
    (list_users, "/list_users", ListRequest, NamesResponse),
    (list_contacts, "/list_contacts", ListRequest, ListContactsResponse),
}

async fn login_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<LoginRequest>,
) -> anyhow::Result<LoginResponse> {
    use crate::schema::{login_activity, user_logins, users};

    let info = info.into_inner();
    let max_attempts = config.max_login_attempts;

    let conn = get_db_conn(&pool)?;
    let (outcome, attempts_left, login_token) = web::block(move || {
        conn.transaction(|| {
            let now = Utc::now().naive_utc();
            let history = login_activity::table
                .filter(login_activity::user_name.eq(&info.user_name))
                .filter(login_activity::attempt_time.ge(LoginContext::window_start(now)))
                .order(login_activity::attempt_time.desc())
                .select(login_activity::success)
                .load::<bool>(&conn)
                .context("DB error")?;
            let mut ctx = LoginContext::from_history(history, max_attempts);
            if ctx.is_exhausted() {
                tracing::warn!(
                    target: "login_activity",
                    user_name = %info.user_name,
                    "login refused after too many failed attempts"
                );
                return Ok((LoginOutcome::Exhausted, 0, String::new()));
            }

            let hashed_password = crate::utils::hash_password(&info.password);
            let res = users::table
                .filter(users::user_name.eq(&info.user_name))
                .filter(users::password.eq(&hashed_password))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            let outcome = ctx.record(res == 1);
            let success = outcome == LoginOutcome::Accepted;

            diesel::insert_into(login_activity::table)
                .values(NewLoginAttempt {
                    user_name: info.user_name.clone(),
                    attempt_time: now,
                    success,
                })
                .execute(&conn)
                .context("DB error")?;
            tracing::info!(
                target: "login_activity",
                user_name = %info.user_name,
                success,
                "login attempt"
            );

            if !success {
                return Ok((outcome, ctx.attempts_left(), String::new()));
            }

            let login_token = crate::utils::generate_login_token(&info.user_name, now);
            diesel::insert_into(user_logins::table)
                .values(UserLoginData {
                    token: login_token.clone(),
                    user_name: info.user_name,
                    login_time: now,
                })
                .execute(&conn)
                .context("DB error")?;

            Ok::<_, anyhow::Error>((outcome, ctx.attempts_left(), login_token))
        })
    })
    .await?;

    if outcome != LoginOutcome::Accepted {
        return Ok(LoginResponse {
            success: false,
            err: outcome.message(),
            attempts_left,
            ..Default::default()
        });
    }

    // appointment times are stored as local wall-clock times
    let now = Utc::now()
        .with_timezone(&config.local_timezone)
        .naive_local();
    let window_end = now + Duration::minutes(config.upcoming_window_minutes);
    let conn = get_db_conn(&pool)?;
    let upcoming = web::block(move || MysqlGateway::new(conn).starting_between(now, window_end))
        .await?;

    Ok(LoginResponse {
        success: true,
        err: "".to_string(),
        login_token,
        attempts_left,
        upcoming: upcoming.iter().map(AppointmentItem::from).collect(),
    })
}

async fn logout_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<LogoutRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::user_logins;

    let info = info.into_inner();
    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::delete(user_logins::table.filter(user_logins::token.eq(info.login_token)))
            .execute(&conn)
    })
    .await
    .context("DB error")?;

    Ok(SimpleResponse::ok())
}

async fn list_users_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<ListRequest>,
) -> anyhow::Result<NamesResponse> {
    use crate::schema::users;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &pool).await?;

    let conn = get_db_conn(&pool)?;
    let names = web::block(move || {
        users::table
            .select(users::user_name)
            .order(users::user_id.asc())
            .load::<String>(&conn)
    })
    .await
    .context("DB error")?;

    Ok(NamesResponse::ok(names))
}

async fn list_contacts_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<ListRequest>,
) -> anyhow::Result<ListContactsResponse> {
    use crate::schema::contacts;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &pool).await?;

    let conn = get_db_conn(&pool)?;
    let contacts = web::block(move || {
        contacts::table
            .order(contacts::contact_id.asc())
            .load::<ContactData>(&conn)
    })
    .await
    .context("DB error")?;

    Ok(ListContactsResponse {
        success: true,
        err: "".to_string(),
        contacts: contacts
            .into_iter()
            .map(|data| ContactItem {
                contact_id: data.contact_id,
                contact_name: data.contact_name,
                email: data.email,
            })
            .collect(),
    })
}
