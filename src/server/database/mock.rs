//! Scripted stand-in for PostgreSQL used by unit tests.
//!
//! Every `query`/`execute` pops the next [`MockReply`]; every statement, plus
//! BEGIN/PREPARE/COMMIT/ROLLBACK markers, lands in a journal tests can inspect.

use std::collections::VecDeque;
use std::sync::Mutex;
use anyhow::{anyhow, Error};
use bytes::BytesMut;
use tokio_postgres::types::{FromSql, IsNull, ToSql, Type};
use crate::server::database::{DbClient, GenericRow, GenericTransaction, Params};

pub(crate) enum MockReply {
    Rows(Vec<MockRow>),
    Affected(u64),
    Fail(&'static str),
}

#[derive(Debug, Default, Clone)]
pub(crate) struct MockRow {
    columns: Vec<(&'static str, Type, Option<Vec<u8>>)>,
}

impl MockRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// append a column, encoded the way the server would send it
    pub fn col<T: ToSql>(mut self, name: &'static str, ty: Type, value: T) -> Self {
        let mut buf = BytesMut::new();
        let raw = match value.to_sql(&ty, &mut buf).expect("encodable mock value") {
            IsNull::Yes => None,
            IsNull::No => Some(buf.to_vec()),
        };
        self.columns.push((name, ty, raw));
        self
    }
}

impl GenericRow for MockRow {
    fn try_get<'a, T>(&'a self, column: &str) -> Result<T, Error>
    where
        T: FromSql<'a>,
    {
        let (_, ty, raw) = self
            .columns
            .iter()
            .find(|(name, _, _)| *name == column)
            .ok_or_else(|| anyhow!("no column named {}", column))?;
        T::from_sql_nullable(ty, raw.as_deref()).map_err(|e| anyhow!(e))
    }
}

#[derive(Default)]
pub(crate) struct MockClient {
    replies: Mutex<VecDeque<MockReply>>,
    journal: Mutex<Vec<String>>,
    bound: Mutex<Vec<Vec<String>>>,
}

impl MockClient {
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            journal: Mutex::new(vec![]),
            bound: Mutex::new(vec![]),
        }
    }

    /// statements seen so far, whitespace collapsed
    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    /// debug renderings of the parameters bound to each query or execute
    pub fn bound(&self) -> Vec<Vec<String>> {
        self.bound.lock().unwrap().clone()
    }

    fn bind(&self, params: &Params<'_>) {
        let rendered = params.iter().map(|p| format!("{:?}", p)).collect();
        self.bound.lock().unwrap().push(rendered);
    }

    fn record(&self, statement: &str) {
        let flat = statement.split_whitespace().collect::<Vec<_>>().join(" ");
        self.journal.lock().unwrap().push(flat);
    }

    fn next_reply(&self, statement: &str) -> MockReply {
        self.record(statement);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MockReply::Fail("no scripted reply left"))
    }

    fn rows(&self, statement: &str) -> Result<Vec<MockRow>, Error> {
        match self.next_reply(statement) {
            MockReply::Rows(rows) => Ok(rows),
            MockReply::Affected(_) => Err(anyhow!("expected rows, scripted affected count")),
            MockReply::Fail(msg) => Err(anyhow!(msg)),
        }
    }

    fn affected(&self, statement: &str) -> Result<u64, Error> {
        match self.next_reply(statement) {
            MockReply::Affected(n) => Ok(n),
            MockReply::Rows(rows) => Ok(rows.len() as u64),
            MockReply::Fail(msg) => Err(anyhow!(msg)),
        }
    }
}

impl DbClient for MockClient {
    type Row = MockRow;
    type Transaction<'a> = MockTransaction<'a>
    where
        Self: 'a;

    async fn query(&self, statement: &str, params: &Params<'_>) -> Result<Vec<MockRow>, Error> {
        self.bind(params);
        self.rows(statement)
    }

    async fn execute(&self, statement: &str, params: &Params<'_>) -> Result<u64, Error> {
        self.bind(params);
        self.affected(statement)
    }

    async fn transaction(&mut self) -> Result<MockTransaction<'_>, Error> {
        self.record("BEGIN");
        Ok(MockTransaction { client: self })
    }
}

pub(crate) struct MockTransaction<'a> {
    client: &'a MockClient,
}

impl GenericTransaction for MockTransaction<'_> {
    type Row = MockRow;
    type Statement = String;

    async fn query_one(&self, statement: &str, params: &Params<'_>) -> Result<MockRow, Error> {
        self.client.bind(params);
        self.client
            .rows(statement)?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("query returned an unexpected number of rows"))
    }

    async fn prepare(&self, statement: &str) -> Result<String, Error> {
        self.client.record(&format!("PREPARE {}", statement));
        Ok(statement.to_string())
    }

    async fn execute(&self, statement: &String, params: &Params<'_>) -> Result<u64, Error> {
        self.client.bind(params);
        self.client.affected(statement)
    }

    async fn commit(self) -> Result<(), Error> {
        self.client.record("COMMIT");
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.client.record("ROLLBACK");
        Ok(())
    }
}
