//! database access layer
//!
//! Repositories are written against [`DbClient`] so the same code runs on a pooled
//! `tokio_postgres::Client` and, under test, on the scripted [`mock::MockClient`].

pub(crate) mod connection;
#[cfg(test)]
pub(crate) mod mock;
pub(crate) mod pool;

use std::future::Future;
use std::time::Duration;
use anyhow::Error;
use log::warn;
use tokio::time;
use tokio_postgres::types::{FromSql, ToSql};
use crate::server::controller::error::CustomError;
use crate::server::DB_TIMEOUT_SECONDS;

pub(crate) type Params<'a> = [&'a (dyn ToSql + Sync)];

pub(crate) trait DbClient {
    type Row: GenericRow;
    type Transaction<'a>: GenericTransaction
    where
        Self: 'a;

    async fn query(&self, statement: &str, params: &Params<'_>) -> Result<Vec<Self::Row>, Error>;

    async fn query_opt(&self, statement: &str, params: &Params<'_>) -> Result<Option<Self::Row>, Error> {
        Ok(self.query(statement, params).await?.into_iter().next())
    }

    async fn execute(&self, statement: &str, params: &Params<'_>) -> Result<u64, Error>;

    async fn transaction(&mut self) -> Result<Self::Transaction<'_>, Error>;
}

pub(crate) trait GenericTransaction {
    type Row: GenericRow;
    type Statement;

    async fn query_one(&self, statement: &str, params: &Params<'_>) -> Result<Self::Row, Error>;

    async fn prepare(&self, statement: &str) -> Result<Self::Statement, Error>;

    async fn execute(&self, statement: &Self::Statement, params: &Params<'_>) -> Result<u64, Error>;

    async fn commit(self) -> Result<(), Error>;

    async fn rollback(self) -> Result<(), Error>;
}

pub(crate) trait GenericRow {
    fn try_get<'a, T>(&'a self, column: &str) -> Result<T, Error>
    where
        T: FromSql<'a>;
}

/// Decodes one result row into a model.
pub(crate) trait FromRow: Sized {
    fn from_row<R: GenericRow>(row: &R) -> Result<Self, Error>;
}

pub(crate) fn rows_into<T: FromRow, R: GenericRow>(rows: &[R]) -> Result<Vec<T>, CustomError> {
    rows.iter()
        .map(T::from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(CustomError::from_db)
}

pub(crate) fn row_into<T: FromRow, R: GenericRow>(row: &R) -> Result<T, CustomError> {
    T::from_row(row).map_err(CustomError::from_db)
}

/// Run one database operation under the fixed deadline, classifying its failure.
pub(crate) async fn with_deadline<T, F>(fut: F) -> Result<T, CustomError>
where
    F: Future<Output = Result<T, Error>>,
{
    match time::timeout(Duration::from_secs(DB_TIMEOUT_SECONDS), fut).await {
        Ok(result) => result.map_err(CustomError::from_db),
        Err(_) => {
            warn!("database operation exceeded {}s deadline", DB_TIMEOUT_SECONDS);
            Err(CustomError::Timeout)
        }
    }
}
