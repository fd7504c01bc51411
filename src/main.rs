#[macro_use]
extern crate diesel;

mod appointment;
mod config;
mod customer;
mod database;
mod error;
mod gateway;
mod models;
mod protocol;
mod scheduler;
mod schema;
mod user;
mod utils;

use actix_web::{middleware, web, App, HttpServer};
use diesel::{r2d2::ConnectionManager, MysqlConnection};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().map_err(|err| {
        tracing::error!("{}", err);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
    })?;

    let manager = ConnectionManager::<MysqlConnection>::new(config.database_url.clone());
    let pool = r2d2::Pool::builder().build(manager).map_err(|err| {
        tracing::error!("Failed to create pool: {}", err);
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    })?;

    let bind = config.bind_addr.clone();
    tracing::info!(
        bind = %bind,
        local_timezone = %config.local_timezone,
        "starting scheduling server"
    );

    HttpServer::new(move || {
        let app = App::new()
            .wrap(middleware::Logger::default())
            .data(pool.clone())
            .data(config.clone())
            // user
            .service(web::scope("/user").configure(user::config))
            // customer
            .service(web::scope("/customer").configure(customer::config))
            // appointment
            .service(web::scope("/appointment").configure(appointment::config));

        match &config.static_dir {
            Some(dir) => app.service(actix_files::Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind(bind)?
    .run()
    .await
}
