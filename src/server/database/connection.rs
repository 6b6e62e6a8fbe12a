use std::ops::{Deref, DerefMut};
use anyhow::Error;
use tokio_postgres::types::FromSql;
use tokio_postgres::{Client, Row, Statement, Transaction};
use crate::server::database::pool::Pool;
use crate::server::database::{DbClient, GenericRow, GenericTransaction, Params};

/// A client checked out of a [`Pool`], handed back when dropped.
pub(crate) struct Connection<M> {
    pub(crate) client: Option<M>,
    pub(crate) pool: Pool<M>,
}

impl DbClient for Client {
    type Row = Row;
    type Transaction<'a> = Transaction<'a>
    where
        Self: 'a;

    async fn query(&self, statement: &str, params: &Params<'_>) -> Result<Vec<Row>, Error> {
        Client::query(self, statement, params).await.map_err(Error::from)
    }

    async fn query_opt(&self, statement: &str, params: &Params<'_>) -> Result<Option<Row>, Error> {
        Client::query_opt(self, statement, params).await.map_err(Error::from)
    }

    async fn execute(&self, statement: &str, params: &Params<'_>) -> Result<u64, Error> {
        Client::execute(self, statement, params).await.map_err(Error::from)
    }

    async fn transaction(&mut self) -> Result<Transaction<'_>, Error> {
        Client::transaction(self).await.map_err(Error::from)
    }
}

impl GenericTransaction for Transaction<'_> {
    type Row = Row;
    type Statement = Statement;

    async fn query_one(&self, statement: &str, params: &Params<'_>) -> Result<Row, Error> {
        Transaction::query_one(self, statement, params).await.map_err(Error::from)
    }

    async fn prepare(&self, statement: &str) -> Result<Statement, Error> {
        Transaction::prepare(self, statement).await.map_err(Error::from)
    }

    async fn execute(&self, statement: &Statement, params: &Params<'_>) -> Result<u64, Error> {
        Transaction::execute(self, statement, params).await.map_err(Error::from)
    }

    async fn commit(self) -> Result<(), Error> {
        Transaction::commit(self).await.map_err(Error::from)
    }

    async fn rollback(self) -> Result<(), Error> {
        Transaction::rollback(self).await.map_err(Error::from)
    }
}

impl GenericRow for Row {
    fn try_get<'a, T>(&'a self, column: &str) -> Result<T, Error>
    where
        T: FromSql<'a>,
    {
        Row::try_get(self, column).map_err(Error::from)
    }
}

impl<M> Connection<M> {
    pub fn new(client: M, pool: Pool<M>) -> Self {
        Self { client: Some(client), pool }
    }
}

impl<M> Deref for Connection<M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.client.as_ref().expect("client is only taken on drop")
    }
}

impl<M> DerefMut for Connection<M> {
    fn deref_mut(&mut self) -> &mut M {
        self.client.as_mut().expect("client is only taken on drop")
    }
}

impl<M> Drop for Connection<M> {
    fn drop(&mut self) {
        if let Some(client) = self.client.take() {
            self.pool.release(client);
        }
    }
}
