use std::time::Duration;
use tokio_postgres::Client;
use crate::server::controller::error::CustomError;
use crate::server::database::connection::Connection;
use crate::server::database::pool::Pool;
use crate::server::util::credential::TokenIssuer;

#[derive(Clone)]
pub(crate) struct AppState {
    db_read_pool: Pool<Client>,
    db_write_pool: Pool<Client>,
    token_issuer: TokenIssuer,
    /// how long a request waits for a pooled connection
    acquire_timeout: Duration,
}

impl AppState {
    pub fn new(
        db_read_pool: Pool<Client>,
        db_write_pool: Pool<Client>,
        token_issuer: TokenIssuer,
        acquire_timeout: Duration,
    ) -> Self {
        Self {
            db_read_pool,
            db_write_pool,
            token_issuer,
            acquire_timeout,
        }
    }

    pub async fn read_conn(&self) -> Result<Connection<Client>, CustomError> {
        self.db_read_pool
            .acquire(self.acquire_timeout)
            .await
            .ok_or(CustomError::ServerIsBusy)
    }

    pub async fn write_conn(&self) -> Result<Connection<Client>, CustomError> {
        self.db_write_pool
            .acquire(self.acquire_timeout)
            .await
            .ok_or(CustomError::ServerIsBusy)
    }

    pub fn token_issuer(&self) -> &TokenIssuer {
        &self.token_issuer
    }
}
