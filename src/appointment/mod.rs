mod requests;
mod responses;
mod utils;

use crate::{
    config::Config,
    database::{assert, get_db_conn},
    error::ScheduleError,
    gateway::mysql::MysqlGateway,
    protocol::NamesResponse,
    scheduler::{Category, FinancingOption, ScheduleClock, Scheduler, SERVICE_TYPES},
    user::utils::get_user_from_token,
    utils::run_blocking,
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{self, Context};

pub use self::responses::AppointmentItem;
use self::{
    requests::*,
    responses::*,
    utils::{draft_from_form, ResolvedNames},
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add)
        .service(edit)
        .service(delete)
        .service(search)
        .service(by_contact)
        .service(time_slots)
        .service(options);
}

crate::post_funcs! {
    (add, "/add", AppointmentForm, AppointResponse),
    (edit, "/edit", EditAppointmentRequest, AppointResponse),
    (delete, "/delete", DeleteAppointmentRequest, DeleteAppointResponse),
    (search, "/search", SearchAppointRequest, SearchAppointResponse),
    (by_contact, "/by_contact", ByContactRequest, SearchAppointResponse),
    (time_slots, "/time_slots", TokenRequest, NamesResponse),
    (options, "/options", TokenRequest, OptionsResponse),
}

async fn resolve_names(
    pool: &web::Data<DbPool>,
    form: &AppointmentForm,
) -> anyhow::Result<ResolvedNames> {
    Ok(ResolvedNames {
        customer_id: assert::customer_id_by_name(pool, form.customer_name.clone()).await?,
        user_id: assert::user_id_by_name(pool, form.user_name.clone()).await?,
        contact_id: assert::contact_id_by_name(pool, form.contact_name.clone()).await?,
    })
}

fn render(result: Result<u64, ScheduleError>) -> anyhow::Result<AppointResponse> {
    match result {
        Ok(id) => Ok(AppointResponse::ok(id)),
        Err(ScheduleError::Rejected(rejection)) => Ok(AppointResponse::rejected(&rejection)),
        Err(err) => Err(err.into()),
    }
}

async fn add_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<AppointmentForm>,
) -> anyhow::Result<AppointResponse> {
    let form = info.into_inner();
    let author = get_user_from_token(form.login_token.clone(), &pool).await?;
    let names = resolve_names(&pool, &form).await?;
    let draft = draft_from_form(0, &form, &names)?;

    let clock = ScheduleClock::now(config.local_timezone);
    let conn = get_db_conn(&pool)?;
    let result = run_blocking(move || {
        let gateway = MysqlGateway::new(conn);
        Scheduler::new(&gateway, clock)
            .create(draft, &author)
            .map(|created| created.id)
    })
    .await;

    render(result)
}

async fn edit_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<EditAppointmentRequest>,
) -> anyhow::Result<AppointResponse> {
    let info = info.into_inner();
    let author = get_user_from_token(info.form.login_token.clone(), &pool).await?;
    let names = resolve_names(&pool, &info.form).await?;
    let candidate = draft_from_form(info.appointment_id, &info.form, &names)?;

    let clock = ScheduleClock::now(config.local_timezone);
    let conn = get_db_conn(&pool)?;
    let result = run_blocking(move || {
        let gateway = MysqlGateway::new(conn);
        Scheduler::new(&gateway, clock)
            .edit(candidate, &author)
            .map(|edited| edited.id)
    })
    .await;

    render(result)
}

async fn delete_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<DeleteAppointmentRequest>,
) -> anyhow::Result<DeleteAppointResponse> {
    let info = info.into_inner();
    get_user_from_token(info.login_token, &pool).await?;

    let clock = ScheduleClock::now(config.local_timezone);
    let id = info.appointment_id;
    let conn = get_db_conn(&pool)?;
    let deleted = run_blocking(move || {
        let gateway = MysqlGateway::new(conn);
        Scheduler::new(&gateway, clock).delete(id)
    })
    .await?;

    Ok(DeleteAppointResponse {
        success: true,
        err: "".to_string(),
        appointment_id: deleted.id,
        category: deleted.category().to_string(),
    })
}

async fn search_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<SearchAppointRequest>,
) -> anyhow::Result<SearchAppointResponse> {
    let info = info.into_inner();
    get_user_from_token(info.login_token, &pool).await?;

    let today = ScheduleClock::now(config.local_timezone).today;
    let range = match info.period {
        Period::All => None,
        Period::Month => Some(crate::utils::month_range(today)),
        Period::Week => Some(crate::utils::week_range(today)),
    };
    let title_pattern = crate::utils::get_str_pattern_opt(info.title);

    let conn = get_db_conn(&pool)?;
    let appointments =
        web::block(move || MysqlGateway::new(conn).search(&title_pattern, range)).await?;

    Ok(SearchAppointResponse {
        success: true,
        err: "".to_string(),
        appointments: appointments.iter().map(AppointmentItem::from).collect(),
    })
}

async fn by_contact_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<ByContactRequest>,
) -> anyhow::Result<SearchAppointResponse> {
    let info = info.into_inner();
    get_user_from_token(info.login_token, &pool).await?;
    let contact_name = info.contact_name;
    assert::contact_id_by_name(&pool, contact_name.clone()).await?;

    let conn = get_db_conn(&pool)?;
    let appointments = web::block(move || MysqlGateway::new(conn).by_contact(&contact_name))
        .await
        .context("DB error")?;

    Ok(SearchAppointResponse {
        success: true,
        err: "".to_string(),
        appointments: appointments.iter().map(AppointmentItem::from).collect(),
    })
}

async fn time_slots_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<TokenRequest>,
) -> anyhow::Result<NamesResponse> {
    get_user_from_token(info.into_inner().login_token, &pool).await?;

    Ok(NamesResponse::ok(crate::utils::half_hour_slots()))
}

async fn options_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<TokenRequest>,
) -> anyhow::Result<OptionsResponse> {
    get_user_from_token(info.into_inner().login_token, &pool).await?;

    Ok(OptionsResponse {
        success: true,
        err: "".to_string(),
        categories: [Category::Sales, Category::Service]
            .iter()
            .map(|category| category.to_string())
            .collect(),
        financing_options: FinancingOption::ALL
            .iter()
            .map(|option| option.as_str().to_string())
            .collect(),
        service_types: SERVICE_TYPES.iter().map(|s| s.to_string()).collect(),
    })
}
