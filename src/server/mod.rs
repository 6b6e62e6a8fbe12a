//! main file for the server

mod controller;
mod database;
pub(crate) mod model;
mod repository;
mod state;
mod util;

use std::io;
use std::time::Duration;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use tokio_postgres::Client;
use crate::server::database::pool::{Init, Pool};
use crate::server::model::config::ServerConfig;
use crate::server::state::AppState;
use crate::server::util::credential::TokenIssuer;

/// deadline applied to every single database operation
pub(crate) const DB_TIMEOUT_SECONDS: u64 = 5;
/// how long a request waits for a free pooled connection
const POOL_ACQUIRE_TIMEOUT_SECONDS: u64 = 3;

async fn init_pool(name: &str, conn_str: String, size: usize) -> io::Result<Pool<Client>> {
    let mut pool = Pool::<Client>::new(name);
    if let Err(e) = pool.init(conn_str, size).await {
        error!("pool={} failed to initialize, {:#}", name, e);
        return Err(io::Error::other(e.to_string()));
    }
    Ok(pool)
}

/// Run the server
pub(crate) async fn run(config: ServerConfig) -> io::Result<()> {
    let ServerConfig {
        addr,
        db_read_conn_str,
        db_write_conn_str,
        pool_size,
        secret_key,
    } = config;
    let state = AppState::new(
        init_pool("read", db_read_conn_str, pool_size).await?,
        init_pool("write", db_write_conn_str, pool_size).await?,
        TokenIssuer::new(&secret_key),
        Duration::from_secs(POOL_ACQUIRE_TIMEOUT_SECONDS),
    );
    info!("listening on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .configure(controller::configure)
    })
        .bind(addr)?
        .run()
        .await
}
