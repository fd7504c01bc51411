use actix_web::web;
use anyhow::{bail, Context};
use diesel::prelude::*;

use crate::{database::get_db_conn, DbPool};

pub async fn assert_customer(pool: &web::Data<DbPool>, customer_id: u64) -> anyhow::Result<()> {
    use crate::schema::customers;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        customers::table
            .filter(customers::customer_id.eq(customer_id))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such customer");
    }

    Ok(())
}

pub async fn assert_division(pool: &web::Data<DbPool>, division_id: u64) -> anyhow::Result<()> {
    use crate::schema::first_level_divisions;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        first_level_divisions::table
            .filter(first_level_divisions::division_id.eq(division_id))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such division");
    }

    Ok(())
}

pub async fn customer_id_by_name(pool: &web::Data<DbPool>, name: String) -> anyhow::Result<u64> {
    use crate::schema::customers;

    let conn = get_db_conn(pool)?;
    let lookup = name.clone();
    let res = web::block(move || {
        customers::table
            .filter(customers::customer_name.eq(lookup))
            .select(customers::customer_id)
            .first::<u64>(&conn)
            .optional()
    })
    .await
    .context("DB error")?;

    match res {
        Some(id) => Ok(id),
        None => bail!("{} not found", name),
    }
}

pub async fn user_id_by_name(pool: &web::Data<DbPool>, name: String) -> anyhow::Result<u64> {
    use crate::schema::users;

    let conn = get_db_conn(pool)?;
    let lookup = name.clone();
    let res = web::block(move || {
        users::table
            .filter(users::user_name.eq(lookup))
            .select(users::user_id)
            .first::<u64>(&conn)
            .optional()
    })
    .await
    .context("DB error")?;

    match res {
        Some(id) => Ok(id),
        None => bail!("{} not found", name),
    }
}

pub async fn contact_id_by_name(pool: &web::Data<DbPool>, name: String) -> anyhow::Result<u64> {
    use crate::schema::contacts;

    let conn = get_db_conn(pool)?;
    let lookup = name.clone();
    let res = web::block(move || {
        contacts::table
            .filter(contacts::contact_name.eq(lookup))
            .select(contacts::contact_id)
            .first::<u64>(&conn)
            .optional()
    })
    .await
    .context("DB error")?;

    match res {
        Some(id) => Ok(id),
        None => bail!("{} not found", name),
    }
}
