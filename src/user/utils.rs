use actix_web::web;
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;

use super::session::token_is_fresh;
use crate::{database::get_db_conn, models::user_logins::UserLoginData, DbPool};

/// Name of the user holding `token`. Fails when the token is unknown or its
/// newest login has expired.
pub async fn get_user_from_token(token: String, pool: &web::Data<DbPool>) -> anyhow::Result<String> {
    use crate::schema::user_logins;

    let conn = get_db_conn(pool)?;
    let latest = web::block(move || {
        user_logins::table
            .filter(user_logins::token.eq(token))
            .order(user_logins::login_time.desc())
            .first::<UserLoginData>(&conn)
            .optional()
    })
    .await
    .context("DB error")?;

    match latest {
        Some(login) if token_is_fresh(login.login_time, Utc::now().naive_utc()) => {
            Ok(login.user_name)
        }
        Some(_) => bail!("Login expired"),
        None => bail!("Not logged in"),
    }
}
