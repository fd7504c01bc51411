mod requests;
mod responses;
mod utils;

use crate::{
    config::Config,
    database::{assert, get_db_conn},
    gateway::{mysql::MysqlGateway, AppointmentGateway},
    models::{
        customers::{CustomerData, NewCustomer, UpdateCustomer},
        divisions::{CountryData, DivisionData},
    },
    protocol::SimpleResponse,
    user::utils::get_user_from_token,
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{self, bail, Context};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*, utils::check_form};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add)
        .service(edit)
        .service(delete)
        .service(search)
        .service(list_divisions)
        .service(list_countries);
}

crate::post_funcs! {
    (add, "/add", CustomerForm, AddCustomerResponse),
    (edit, "/edit", EditCustomerRequest, SimpleResponse),
    (delete, "/delete", DeleteCustomerRequest, SimpleResponse),
    (search, "/search", SearchCustomerRequest, SearchCustomerResponse),
    (list_divisions, "/list_divisions", ListDivisionsRequest, ListDivisionsResponse),
    (list_countries, "/list_countries", ListCountriesRequest, ListCountriesResponse),
}

async fn add_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<CustomerForm>,
) -> anyhow::Result<AddCustomerResponse> {
    use crate::schema::customers;

    let info = info.into_inner();
    let author = get_user_from_token(info.login_token.clone(), &pool).await?;
    let division_id = check_form(&info)?;
    assert::assert_division(&pool, division_id).await?;

    let conn = get_db_conn(&pool)?;
    let customer_id = web::block(move || {
        conn.transaction(|| {
            let max = customers::table
                .select(diesel::dsl::max(customers::customer_id))
                .first::<Option<u64>>(&conn)
                .context("DB error")?;
            let customer_id = max.unwrap_or(0) + 1;

            let now = Utc::now().naive_utc();
            let data = NewCustomer {
                customer_id,
                customer_name: info.customer_name,
                address: info.address,
                postal_code: info.postal_code,
                phone: info.phone,
                create_date: now,
                created_by: author.clone(),
                last_update: now,
                last_updated_by: author,
                division_id,
            };
            diesel::insert_into(customers::table)
                .values(data)
                .execute(&conn)
                .context("DB error")?;

            Ok::<_, anyhow::Error>(customer_id)
        })
    })
    .await?;

    tracing::info!(customer_id, "customer added");
    Ok(AddCustomerResponse {
        success: true,
        err: "".to_string(),
        customer_id,
    })
}

async fn edit_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<EditCustomerRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::customers;

    let info = info.into_inner();
    let author = get_user_from_token(info.form.login_token.clone(), &pool).await?;
    let division_id = check_form(&info.form)?;
    assert::assert_customer(&pool, info.customer_id).await?;
    assert::assert_division(&pool, division_id).await?;

    let customer_id = info.customer_id;
    let data = UpdateCustomer {
        customer_name: info.form.customer_name,
        address: info.form.address,
        postal_code: info.form.postal_code,
        phone: info.form.phone,
        last_update: Utc::now().naive_utc(),
        last_updated_by: author,
        division_id,
    };

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::update(customers::table.find(customer_id))
            .set(&data)
            .execute(&conn)
    })
    .await
    .context("DB error")?;

    tracing::info!(customer_id, "customer updated");
    Ok(SimpleResponse::ok())
}

async fn delete_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<DeleteCustomerRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::customers;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &pool).await?;
    assert::assert_customer(&pool, info.customer_id).await?;

    let customer_id = info.customer_id;
    let conn = get_db_conn(&pool)?;
    web::block(move || {
        let gateway = MysqlGateway::new(conn);
        gateway.atomically(|| {
            if gateway.customer_has_appointments(customer_id)? {
                bail!("Customer cannot be deleted because there are appointments associated with this customer");
            }
            diesel::delete(customers::table.find(customer_id))
                .execute(gateway.connection())
                .context("DB error")?;
            Ok(())
        })
    })
    .await?;

    tracing::info!(customer_id, "customer deleted");
    Ok(SimpleResponse::ok())
}

async fn search_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<SearchCustomerRequest>,
) -> anyhow::Result<SearchCustomerResponse> {
    use crate::schema::{countries, customers, first_level_divisions};

    let info = info.into_inner();
    get_user_from_token(info.login_token, &pool).await?;

    let name_pattern = crate::utils::get_str_pattern_opt(info.customer_name);
    let conn = get_db_conn(&pool)?;
    let rows = web::block(move || {
        customers::table
            .inner_join(first_level_divisions::table.inner_join(countries::table))
            .filter(customers::customer_name.like(name_pattern))
            .order(customers::customer_id.asc())
            .load::<(CustomerData, (DivisionData, CountryData))>(&conn)
    })
    .await
    .context("DB error")?;

    let customers = rows
        .into_iter()
        .map(|(customer, (division, country))| SearchCustomerItem {
            customer_id: customer.customer_id,
            customer_name: customer.customer_name,
            address: customer.address,
            postal_code: customer.postal_code,
            phone: customer.phone,
            division_id: division.division_id,
            division: division.division,
            country: country.country,
        })
        .collect();

    Ok(SearchCustomerResponse {
        success: true,
        err: "".to_string(),
        customers,
    })
}

async fn list_divisions_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<ListDivisionsRequest>,
) -> anyhow::Result<ListDivisionsResponse> {
    use crate::schema::first_level_divisions;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &pool).await?;

    let country_id = info.country_id;
    let conn = get_db_conn(&pool)?;
    let divisions = web::block(move || {
        first_level_divisions::table
            .filter(first_level_divisions::country_id.eq(country_id))
            .order(first_level_divisions::division_id.asc())
            .load::<DivisionData>(&conn)
    })
    .await
    .context("DB error")?;

    Ok(ListDivisionsResponse {
        success: true,
        err: "".to_string(),
        divisions: divisions
            .into_iter()
            .map(|data| DivisionItem {
                division_id: data.division_id,
                division: data.division,
            })
            .collect(),
    })
}

async fn list_countries_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<ListCountriesRequest>,
) -> anyhow::Result<ListCountriesResponse> {
    use crate::schema::countries;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &pool).await?;

    let conn = get_db_conn(&pool)?;
    let countries = web::block(move || {
        countries::table
            .order(countries::country_id.asc())
            .load::<CountryData>(&conn)
    })
    .await
    .context("DB error")?;

    Ok(ListCountriesResponse {
        success: true,
        err: "".to_string(),
        countries: countries
            .into_iter()
            .map(|data| CountryItem {
                country_id: data.country_id,
                country: data.country,
            })
            .collect(),
    })
}
